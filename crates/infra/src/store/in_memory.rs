use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};

use seatwise_booking::Event;
use seatwise_core::EventId;

use super::r#trait::{EventStore, StoreError, VersionToken};

#[derive(Debug, Clone)]
struct VersionedEvent {
    event: Event,
    /// Bumped on every committed replacement; the optimistic check compares
    /// against this.
    version: u64,
}

/// In-memory versioned snapshot store.
///
/// Intended for tests/dev and single-process deployments. Not optimized for
/// performance. The map lock is held only for the individual operation;
/// version conflicts are strictly per event id, so writers of unrelated
/// events never invalidate each other's tokens.
#[derive(Debug, Default)]
pub struct InMemoryEventStore {
    events: RwLock<HashMap<EventId, VersionedEvent>>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn sorted_by_date(mut events: Vec<Event>) -> Vec<Event> {
        events.sort_by_key(Event::date);
        events
    }
}

impl EventStore for InMemoryEventStore {
    fn create(&self, event: Event) -> Result<Event, StoreError> {
        let mut events = self
            .events
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;

        let id = event.id();
        if events.contains_key(&id) {
            return Err(StoreError::Conflict(format!("event {id} already exists")));
        }

        events.insert(
            id,
            VersionedEvent {
                event: event.clone(),
                version: 1,
            },
        );
        Ok(event)
    }

    fn get(&self, id: EventId) -> Result<Event, StoreError> {
        let events = self
            .events
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;

        events
            .get(&id)
            .map(|v| v.event.clone())
            .ok_or(StoreError::NotFound)
    }

    fn load_for_update(&self, id: EventId) -> Result<(Event, VersionToken), StoreError> {
        let events = self
            .events
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;

        events
            .get(&id)
            .map(|v| (v.event.clone(), VersionToken(v.version)))
            .ok_or(StoreError::NotFound)
    }

    fn commit(
        &self,
        id: EventId,
        expected: VersionToken,
        updated: Event,
    ) -> Result<Event, StoreError> {
        let mut events = self
            .events
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;

        let entry = events.get_mut(&id).ok_or(StoreError::NotFound)?;

        // The check and the replacement happen under the same write guard,
        // so a matching token means no other commit slipped in between.
        if !expected.matches(entry.version) {
            return Err(StoreError::Conflict(format!(
                "expected version {}, found {}",
                expected.0, entry.version
            )));
        }

        entry.event = updated;
        entry.version += 1;
        Ok(entry.event.clone())
    }

    fn list_all(&self) -> Result<Vec<Event>, StoreError> {
        let events = self
            .events
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;

        Ok(Self::sorted_by_date(
            events.values().map(|v| v.event.clone()).collect(),
        ))
    }

    fn list_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Event>, StoreError> {
        let events = self
            .events
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;

        Ok(Self::sorted_by_date(
            events
                .values()
                .filter(|v| v.event.date() >= start && v.event.date() < end)
                .map(|v| v.event.clone())
                .collect(),
        ))
    }

    fn delete(&self, id: EventId) -> Result<(), StoreError> {
        let mut events = self
            .events
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;

        events.remove(&id).map(|_| ()).ok_or(StoreError::NotFound)
    }
}
