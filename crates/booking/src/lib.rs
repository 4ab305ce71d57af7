//! Booking domain module.
//!
//! This crate contains the seat-inventory business rules, implemented purely
//! as deterministic domain logic (no IO, no HTTP, no storage).

pub mod event;

pub use event::{BookSeats, Booking, Event, NewEvent};
