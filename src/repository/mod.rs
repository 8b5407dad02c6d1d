//! The user persistence gateway: entity↔record mapping plus the CRUD and
//! live-list operations against the document store.

pub mod error;
pub mod mapper;

pub use error::*;

use tokio::sync::watch;
use tracing::{debug, instrument, warn};

use crate::domain::User;
use crate::store::{CollectionClient, Document};

/// Gateway between [`User`] entities and the document store.
///
/// Validation errors are raised before any store interaction. Single-shot
/// reads and all writes are fail-closed; the live list is fail-open.
#[derive(Clone)]
pub struct UserRepository {
    store: CollectionClient,
}

/// A live view of the full user list.
///
/// Every emission carries the complete current record set, mapped through
/// the storage→entity conversion on read. Dropping the subscription
/// unsubscribes; nothing else needs releasing.
pub struct UserListSubscription {
    receiver: watch::Receiver<Vec<Document>>,
}

impl UserListSubscription {
    /// The most recent emission, converted to entities.
    pub fn current(&self) -> Vec<User> {
        self.receiver
            .borrow()
            .iter()
            .map(|document| {
                let id = document
                    .get("id")
                    .and_then(serde_json::Value::as_str)
                    .unwrap_or_default();
                mapper::document_to_user(id, document)
            })
            .collect()
    }

    /// Waits for the next emission. Returns `false` once the store has gone
    /// away and no further emissions will arrive.
    pub async fn changed(&mut self) -> bool {
        self.receiver.changed().await.is_ok()
    }
}

impl UserRepository {
    pub fn new(store: CollectionClient) -> Self {
        Self { store }
    }

    /// Opens the live user list.
    ///
    /// When the store is unreachable this does not fail: the caller gets a
    /// frozen empty-list view and the failure is logged, keeping the list
    /// view responsive.
    #[instrument(skip(self))]
    pub async fn list_users(&self) -> UserListSubscription {
        debug!("Sending request");
        match self.store.subscribe().await {
            Ok(receiver) => UserListSubscription { receiver },
            Err(error) => {
                warn!(error = %error, "Store unreachable, serving an empty user list");
                let (_tx, receiver) = watch::channel(Vec::new());
                UserListSubscription { receiver }
            }
        }
    }

    /// Fetches one user by id. Fails with [`RepositoryError::NotFound`] when
    /// the record is absent; store failures are propagated.
    #[instrument(skip(self))]
    pub async fn get_user(&self, id: &str) -> Result<User, RepositoryError> {
        debug!("Sending request");
        match self.store.get(id.to_string()).await? {
            Some(document) => Ok(mapper::document_to_user(id, &document)),
            None => Err(RepositoryError::NotFound(id.to_string())),
        }
    }

    /// Persists a new user and returns the store-assigned id. The record is
    /// sent without an id.
    #[instrument(skip(self, user), fields(user_name = %user.full_name()))]
    pub async fn create_user(&self, user: &User) -> Result<String, RepositoryError> {
        if !user.is_valid() {
            return Err(RepositoryError::Validation(
                "first and last name are required".to_string(),
            ));
        }
        let document = mapper::record_to_document(&mapper::to_record(user));
        debug!("Sending request");
        Ok(self.store.insert(document).await?)
    }

    /// Overwrites the record behind `id` with the user's current fields,
    /// applying the same coercion rules as create.
    #[instrument(skip(self, user))]
    pub async fn update_user(&self, id: &str, user: &User) -> Result<(), RepositoryError> {
        if id.trim().is_empty() {
            return Err(RepositoryError::Validation(
                "user id is required".to_string(),
            ));
        }
        if !user.is_valid() {
            return Err(RepositoryError::Validation(
                "first and last name are required".to_string(),
            ));
        }
        let document = mapper::record_to_document(&mapper::to_record(user));
        debug!("Sending request");
        Ok(self.store.update(id.to_string(), document).await?)
    }

    /// Removes the record behind `id`. NotFound only when the store reports
    /// it.
    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: &str) -> Result<(), RepositoryError> {
        if id.trim().is_empty() {
            return Err(RepositoryError::Validation(
                "user id is required".to_string(),
            ));
        }
        debug!("Sending request");
        Ok(self.store.delete(id.to_string()).await?)
    }
}
