use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, instrument};

use crate::store::actor::CollectionRequest;
use crate::store::{Document, StoreError};

/// Client handle for the collection actor.
///
/// Cheap to clone; every clone talks to the same collection. Channel
/// failures surface as [`StoreError::Closed`].
#[derive(Clone)]
pub struct CollectionClient {
    sender: mpsc::Sender<CollectionRequest>,
}

impl CollectionClient {
    pub fn new(sender: mpsc::Sender<CollectionRequest>) -> Self {
        Self { sender }
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: String) -> Result<Option<Document>, StoreError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(CollectionRequest::Get { id, respond_to })
            .await
            .map_err(|_| StoreError::Closed("collection actor closed".to_string()))?;
        response
            .await
            .map_err(|_| StoreError::Closed("collection actor dropped".to_string()))?
    }

    #[instrument(skip(self, document))]
    pub async fn insert(&self, document: Document) -> Result<String, StoreError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(CollectionRequest::Insert {
                document,
                respond_to,
            })
            .await
            .map_err(|_| StoreError::Closed("collection actor closed".to_string()))?;
        response
            .await
            .map_err(|_| StoreError::Closed("collection actor dropped".to_string()))?
    }

    #[instrument(skip(self, document))]
    pub async fn update(&self, id: String, document: Document) -> Result<(), StoreError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(CollectionRequest::Update {
                id,
                document,
                respond_to,
            })
            .await
            .map_err(|_| StoreError::Closed("collection actor closed".to_string()))?;
        response
            .await
            .map_err(|_| StoreError::Closed("collection actor dropped".to_string()))?
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: String) -> Result<(), StoreError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(CollectionRequest::Delete { id, respond_to })
            .await
            .map_err(|_| StoreError::Closed("collection actor closed".to_string()))?;
        response
            .await
            .map_err(|_| StoreError::Closed("collection actor dropped".to_string()))?
    }

    /// Requests a receiver for the full-snapshot watch channel. Dropping the
    /// receiver is the unsubscribe.
    #[instrument(skip(self))]
    pub async fn subscribe(&self) -> Result<watch::Receiver<Vec<Document>>, StoreError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(CollectionRequest::Subscribe { respond_to })
            .await
            .map_err(|_| StoreError::Closed("collection actor closed".to_string()))?;
        response
            .await
            .map_err(|_| StoreError::Closed("collection actor dropped".to_string()))?
    }
}
