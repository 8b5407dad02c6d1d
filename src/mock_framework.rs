//! # Mock Framework
//!
//! Utilities for testing the persistence gateway in isolation.
//!
//! Use [`create_mock_store`] to get a store client and a receiver, then use
//! helpers like [`expect_insert`] or [`expect_get`] to assert behavior.

use tokio::sync::{mpsc, oneshot, watch};

use crate::store::{CollectionClient, CollectionRequest, Document, StoreError};

/// Creates a mock store client and a receiver for asserting requests.
///
/// # Testing Strategy
/// Gateway tests don't need a full `CollectionActor`; they only care about
/// what the gateway sends. The mock client forwards to a channel we control,
/// so tests can inspect each request and play back the store's reply
/// (success, failure, absence) deterministically.
pub fn create_mock_store(
    buffer_size: usize,
) -> (CollectionClient, mpsc::Receiver<CollectionRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (CollectionClient::new(sender), receiver)
}

/// Helper to verify that the next message is an Insert request
pub async fn expect_insert(
    receiver: &mut mpsc::Receiver<CollectionRequest>,
) -> Option<(Document, oneshot::Sender<Result<String, StoreError>>)> {
    match receiver.recv().await {
        Some(CollectionRequest::Insert {
            document,
            respond_to,
        }) => Some((document, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get(
    receiver: &mut mpsc::Receiver<CollectionRequest>,
) -> Option<(String, oneshot::Sender<Result<Option<Document>, StoreError>>)> {
    match receiver.recv().await {
        Some(CollectionRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Update request
pub async fn expect_update(
    receiver: &mut mpsc::Receiver<CollectionRequest>,
) -> Option<(String, Document, oneshot::Sender<Result<(), StoreError>>)> {
    match receiver.recv().await {
        Some(CollectionRequest::Update {
            id,
            document,
            respond_to,
        }) => Some((id, document, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Delete request
pub async fn expect_delete(
    receiver: &mut mpsc::Receiver<CollectionRequest>,
) -> Option<(String, oneshot::Sender<Result<(), StoreError>>)> {
    match receiver.recv().await {
        Some(CollectionRequest::Delete { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Subscribe request
pub async fn expect_subscribe(
    receiver: &mut mpsc::Receiver<CollectionRequest>,
) -> Option<oneshot::Sender<Result<watch::Receiver<Vec<Document>>, StoreError>>> {
    match receiver.recv().await {
        Some(CollectionRequest::Subscribe { respond_to }) => Some(respond_to),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[tokio::test]
    async fn test_mock_store() {
        let (client, mut receiver) = create_mock_store(10);

        let insert_task = tokio::spawn(async move {
            let mut document = Document::new();
            document.insert("firstName".to_string(), Value::String("Test".to_string()));
            client.insert(document).await
        });

        let (document, responder) = expect_insert(&mut receiver)
            .await
            .expect("Expected Insert request");
        assert_eq!(
            document.get("firstName"),
            Some(&Value::String("Test".to_string()))
        );
        responder.send(Ok("user_1".to_string())).unwrap();

        let result = insert_task.await.unwrap();
        assert_eq!(result, Ok("user_1".to_string()));
    }
}
