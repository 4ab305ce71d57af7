use std::sync::Arc;

use seatwise_infra::{BookingEngine, InMemoryEventStore};

/// Shared application services: one store handle, one engine built on it.
///
/// The store is opened here and lives for the process; handlers reach the
/// seat counters only through the engine, and use the store handle for
/// read-only queries and deletion.
#[derive(Debug)]
pub struct AppServices {
    store: Arc<InMemoryEventStore>,
    engine: BookingEngine<Arc<InMemoryEventStore>>,
}

pub fn build_services() -> AppServices {
    let store = Arc::new(InMemoryEventStore::new());
    let engine = BookingEngine::new(Arc::clone(&store));
    AppServices { store, engine }
}

impl AppServices {
    pub fn engine(&self) -> &BookingEngine<Arc<InMemoryEventStore>> {
        &self.engine
    }

    pub fn store(&self) -> &Arc<InMemoryEventStore> {
        &self.store
    }
}
