use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;

use seatwise_booking::Event;
use seatwise_core::EventId;

/// Store-level failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No event exists under the given id.
    #[error("event not found")]
    NotFound,

    /// An optimistic commit lost the race: the stored version moved on
    /// since `load_for_update`. Callers retry from a fresh load.
    #[error("version conflict: {0}")]
    Conflict(String),

    /// The backing store itself failed (poisoned lock, backend outage).
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Opaque optimistic-concurrency marker paired with a loaded snapshot.
///
/// A token is only valid for a `commit` against the same event id it was
/// loaded from; the store rejects it once any other writer has committed.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct VersionToken(pub u64);

impl VersionToken {
    pub fn matches(self, actual: u64) -> bool {
        self.0 == actual
    }
}

/// Persistence contract for event snapshots.
///
/// The engine dictates this contract, not the storage technology: any backend
/// that can load a snapshot with a version marker and commit conditionally on
/// that marker can sit behind it.
pub trait EventStore: Send + Sync {
    /// Insert a freshly created event. Fails with [`StoreError::Conflict`]
    /// if the id is already taken.
    fn create(&self, event: Event) -> Result<Event, StoreError>;

    /// Read-only snapshot of one event.
    fn get(&self, id: EventId) -> Result<Event, StoreError>;

    /// Load a snapshot together with the version token required to commit
    /// a replacement.
    fn load_for_update(&self, id: EventId) -> Result<(Event, VersionToken), StoreError>;

    /// Replace the stored snapshot iff the stored version still matches
    /// `expected`. Returns the committed snapshot.
    fn commit(
        &self,
        id: EventId,
        expected: VersionToken,
        updated: Event,
    ) -> Result<Event, StoreError>;

    /// All events, ascending by date.
    fn list_all(&self) -> Result<Vec<Event>, StoreError>;

    /// Events with `start <= date < end`, ascending by date.
    fn list_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Event>, StoreError>;

    /// Remove an event outright. The core has no opinion on deletion; this
    /// exists for the boundary.
    fn delete(&self, id: EventId) -> Result<(), StoreError>;
}

impl<S> EventStore for Arc<S>
where
    S: EventStore + ?Sized,
{
    fn create(&self, event: Event) -> Result<Event, StoreError> {
        (**self).create(event)
    }

    fn get(&self, id: EventId) -> Result<Event, StoreError> {
        (**self).get(id)
    }

    fn load_for_update(&self, id: EventId) -> Result<(Event, VersionToken), StoreError> {
        (**self).load_for_update(id)
    }

    fn commit(
        &self,
        id: EventId,
        expected: VersionToken,
        updated: Event,
    ) -> Result<Event, StoreError> {
        (**self).commit(id, expected, updated)
    }

    fn list_all(&self) -> Result<Vec<Event>, StoreError> {
        (**self).list_all()
    }

    fn list_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Event>, StoreError> {
        (**self).list_by_date_range(start, end)
    }

    fn delete(&self, id: EventId) -> Result<(), StoreError> {
        (**self).delete(id)
    }
}
