//! Versioned event-snapshot store boundary.
//!
//! This module defines an infrastructure-facing abstraction for loading and
//! committing event snapshots without making any storage assumptions. The
//! version token is the optimistic-concurrency handle the booking engine
//! builds its retry loop on.

pub mod in_memory;
pub mod r#trait;

pub use in_memory::InMemoryEventStore;
pub use r#trait::{EventStore, StoreError, VersionToken};
