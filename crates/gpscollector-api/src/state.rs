use gpscollector_store::memory::MemoryPointStore;
use gpscollector_store::ports::PointStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PointStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn PointStore>) -> Self {
        Self { store }
    }

    /// State backed by a fresh in-memory store
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryPointStore::new()))
    }
}
