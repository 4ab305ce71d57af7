//! Race-free check-and-apply of seat reservations.
//!
//! The engine composes the domain model with the store contract: it loads a
//! versioned snapshot, lets the aggregate decide, and commits conditionally
//! on the version being unchanged. A lost race is retried from a fresh load
//! a bounded number of times, so two writers of the same event can never
//! both decrement past zero, and writers of unrelated events never contend.

use std::time::Instant;

use chrono::Utc;
use thiserror::Error;

use seatwise_booking::{BookSeats, Event, NewEvent};
use seatwise_core::{DomainError, EventId};

use crate::store::{EventStore, StoreError};

/// Conflict retries before the engine gives up and surfaces the clash.
const MAX_CONFLICT_RETRIES: u32 = 5;

/// Everything a rejected booking call can be attributed to.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BookingError {
    /// Malformed input (caller's fault, never retried).
    #[error("validation failed: {0}")]
    Validation(String),

    /// The event id does not resolve to an existing event.
    #[error("event not found")]
    NotFound,

    /// Business-rule rejection; carries the availability observed at the
    /// atomic check.
    #[error("only {available} seat(s) available")]
    InsufficientSeats { available: u32 },

    /// Optimistic retries exhausted (transient; the whole request may be
    /// retried by the caller).
    #[error("conflicting concurrent bookings: {0}")]
    Conflict(String),

    /// The caller-supplied deadline elapsed before a commit began.
    #[error("booking aborted: deadline elapsed")]
    Timeout,

    /// The backing store failed.
    #[error("store failure: {0}")]
    Store(StoreError),
}

impl From<DomainError> for BookingError {
    fn from(value: DomainError) -> Self {
        match value {
            DomainError::Validation(msg) => BookingError::Validation(msg),
            DomainError::InvalidId(msg) => BookingError::Validation(msg),
            DomainError::NotFound => BookingError::NotFound,
            DomainError::InsufficientSeats { available } => {
                BookingError::InsufficientSeats { available }
            }
        }
    }
}

impl From<StoreError> for BookingError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::NotFound => BookingError::NotFound,
            StoreError::Conflict(msg) => BookingError::Conflict(msg),
            StoreError::Unavailable(_) => BookingError::Store(value),
        }
    }
}

/// The booking engine. Owns no state of its own; the store handle is
/// injected at construction and its lifecycle belongs to the boundary.
#[derive(Debug)]
pub struct BookingEngine<S> {
    store: S,
}

impl<S> BookingEngine<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S> BookingEngine<S>
where
    S: EventStore,
{
    /// Creation-time invariant check, then insert.
    pub fn create_event(&self, cmd: NewEvent) -> Result<Event, BookingError> {
        let event = Event::create(cmd, Utc::now())?;
        let committed = self.store.create(event)?;
        tracing::info!(event_id = %committed.id(), total_seats = committed.total_seats(), "event created");
        Ok(committed)
    }

    /// Reserve seats on one event.
    ///
    /// Returns the committed snapshot (post-decrement, bookings included).
    /// Exactly one committed mutation on success, zero on any failure.
    /// Deliberately not idempotent: identical calls are distinct reservations.
    pub fn book(&self, event_id: EventId, cmd: &BookSeats) -> Result<Event, BookingError> {
        self.book_inner(event_id, cmd, None)
    }

    /// Like [`BookingEngine::book`], aborting with [`BookingError::Timeout`]
    /// if `deadline` passes before a commit attempt begins. An abort leaves
    /// no partial mutation; once `commit` is entered it runs to completion.
    pub fn book_with_deadline(
        &self,
        event_id: EventId,
        cmd: &BookSeats,
        deadline: Instant,
    ) -> Result<Event, BookingError> {
        self.book_inner(event_id, cmd, Some(deadline))
    }

    fn book_inner(
        &self,
        event_id: EventId,
        cmd: &BookSeats,
        deadline: Option<Instant>,
    ) -> Result<Event, BookingError> {
        // Fail fast on malformed input; no store access needed for that.
        cmd.validate()?;

        let mut attempt = 0u32;
        loop {
            if deadline.is_some_and(|d| Instant::now() >= d) {
                return Err(BookingError::Timeout);
            }

            let (mut event, token) = self.store.load_for_update(event_id)?;

            // Availability is re-checked here, at application time, against
            // the freshly loaded snapshot.
            event.apply_booking(cmd, Utc::now())?;

            match self.store.commit(event_id, token, event) {
                Ok(committed) => {
                    tracing::info!(
                        event_id = %event_id,
                        tickets = cmd.number_of_tickets,
                        available = committed.available_seats(),
                        "booking committed"
                    );
                    return Ok(committed);
                }
                Err(StoreError::Conflict(msg)) => {
                    if attempt >= MAX_CONFLICT_RETRIES {
                        tracing::warn!(event_id = %event_id, attempts = attempt, "optimistic retries exhausted");
                        return Err(BookingError::Conflict(msg));
                    }
                    attempt += 1;
                    tracing::debug!(event_id = %event_id, attempt, "commit conflict, retrying from fresh load");
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}
