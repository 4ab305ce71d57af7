//! Infrastructure layer: persistence boundary and the booking engine.

pub mod booking_engine;
pub mod store;

pub use booking_engine::{BookingEngine, BookingError};
pub use store::{EventStore, InMemoryEventStore, StoreError, VersionToken};
