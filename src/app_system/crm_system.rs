use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{error, info};

use crate::repository::UserRepository;
use crate::store::CollectionActor;

/// The main application system.
///
/// Responsible for starting the document store actor, wiring the repository
/// to it, and handling shutdown.
pub struct CrmSystem {
    pub users: UserRepository,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl CrmSystem {
    pub fn new() -> Self {
        // Store-assigned ids, counter based for readable logs.
        let id_counter = Arc::new(AtomicU64::new(1));
        let next_id = move || {
            let id = id_counter.fetch_add(1, Ordering::SeqCst);
            format!("user_{}", id)
        };

        let (actor, store_client) = CollectionActor::new(32, next_id);
        let handle = tokio::spawn(actor.run());

        Self {
            users: UserRepository::new(store_client),
            handles: vec![handle],
        }
    }

    /// Stops the store actor by dropping its last client and waits for the
    /// task to finish.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");
        drop(self.users);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}

impl Default for CrmSystem {
    fn default() -> Self {
        Self::new()
    }
}
