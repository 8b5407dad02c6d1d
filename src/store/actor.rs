use std::collections::HashMap;

use serde_json::Value;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info, instrument};

use crate::store::client::CollectionClient;
use crate::store::{Document, StoreError};

// =============================================================================
// 1. THE MESSAGES
// =============================================================================

pub type StoreResponse<T> = oneshot::Sender<Result<T, StoreError>>;

/// Requests understood by the collection actor. Each variant carries a
/// oneshot channel for the reply.
#[derive(Debug)]
pub enum CollectionRequest {
    Get {
        id: String,
        respond_to: StoreResponse<Option<Document>>,
    },
    Insert {
        document: Document,
        respond_to: StoreResponse<String>,
    },
    Update {
        id: String,
        document: Document,
        respond_to: StoreResponse<()>,
    },
    Delete {
        id: String,
        respond_to: StoreResponse<()>,
    },
    Subscribe {
        respond_to: StoreResponse<watch::Receiver<Vec<Document>>>,
    },
}

// =============================================================================
// 2. THE ACTOR
// =============================================================================

/// Owns one schemaless collection of documents keyed by store-assigned ids,
/// standing in for the remote document database.
///
/// After every successful mutation the actor publishes a full snapshot of
/// the collection on a watch channel; `Subscribe` hands out receivers for
/// it. Each snapshot document carries its key injected as an `"id"` field,
/// so subscribers never need a separate key lookup.
pub struct CollectionActor {
    receiver: mpsc::Receiver<CollectionRequest>,
    documents: HashMap<String, Document>,
    /// Ids in insertion order; snapshots preserve it.
    order: Vec<String>,
    snapshot_tx: watch::Sender<Vec<Document>>,
    next_id_fn: Box<dyn Fn() -> String + Send + Sync>,
}

impl CollectionActor {
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> String + Send + Sync + 'static,
    ) -> (Self, CollectionClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (snapshot_tx, _) = watch::channel(Vec::new());
        let actor = Self {
            receiver,
            documents: HashMap::new(),
            order: Vec::new(),
            snapshot_tx,
            next_id_fn: Box::new(next_id_fn),
        };
        let client = CollectionClient::new(sender);
        (actor, client)
    }

    #[instrument(name = "collection_actor", skip(self))]
    pub async fn run(mut self) {
        info!("Collection actor starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CollectionRequest::Get { id, respond_to } => {
                    debug!(id = %id, "Processing get request");
                    let document = self.documents.get(&id).cloned();
                    let _ = respond_to.send(Ok(document));
                }
                CollectionRequest::Insert {
                    document,
                    respond_to,
                } => {
                    let id = (self.next_id_fn)();
                    debug!(id = %id, "Processing insert request");
                    self.documents.insert(id.clone(), document);
                    self.order.push(id.clone());
                    self.publish_snapshot();
                    let _ = respond_to.send(Ok(id));
                }
                CollectionRequest::Update {
                    id,
                    document,
                    respond_to,
                } => {
                    debug!(id = %id, "Processing update request");
                    if let Some(slot) = self.documents.get_mut(&id) {
                        *slot = document;
                        self.publish_snapshot();
                        let _ = respond_to.send(Ok(()));
                    } else {
                        let _ = respond_to.send(Err(StoreError::NotFound(id)));
                    }
                }
                CollectionRequest::Delete { id, respond_to } => {
                    debug!(id = %id, "Processing delete request");
                    if self.documents.remove(&id).is_some() {
                        self.order.retain(|known| known != &id);
                        self.publish_snapshot();
                        let _ = respond_to.send(Ok(()));
                    } else {
                        let _ = respond_to.send(Err(StoreError::NotFound(id)));
                    }
                }
                CollectionRequest::Subscribe { respond_to } => {
                    debug!("Processing subscribe request");
                    let _ = respond_to.send(Ok(self.snapshot_tx.subscribe()));
                }
            }
        }
        info!("Collection actor stopped");
    }

    /// Full collection in insertion order, each document with its key
    /// injected as an `"id"` field.
    fn snapshot(&self) -> Vec<Document> {
        self.order
            .iter()
            .filter_map(|id| {
                self.documents.get(id).map(|document| {
                    let mut with_id = document.clone();
                    with_id.insert("id".to_string(), Value::String(id.clone()));
                    with_id
                })
            })
            .collect()
    }

    fn publish_snapshot(&self) {
        // No receivers is fine; the next subscriber sees the latest value.
        let _ = self.snapshot_tx.send(self.snapshot());
    }
}

// =============================================================================
// 3. EXAMPLE USAGE (Test)
// =============================================================================
