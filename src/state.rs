use crate::repository::HabitRepository;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone)]
pub struct AppState {
    repository: Arc<RwLock<Arc<HabitRepository>>>,
}

impl AppState {
    pub fn new(repository: HabitRepository) -> Self {
        Self {
            repository: Arc::new(RwLock::new(Arc::new(repository))),
        }
    }

    /// Snapshot of the active repository; the lock is not held across remote calls.
    pub async fn repository(&self) -> Arc<HabitRepository> {
        Arc::clone(&*self.repository.read().await)
    }

    pub async fn replace_repository(&self, repository: HabitRepository) {
        *self.repository.write().await = Arc::new(repository);
    }
}
