//! # Mock Framework
//!
//! Utilities for testing clients and actors in isolation.
//!
//! - Use [`create_mock_client`] to get a client and the receiver its requests arrive on, then
//!   use helpers like [`expect_create`] or [`expect_action`] to assert behavior.
//! - Use [`MockStorage`] to run a real actor against scripted storage responses.

use crate::framework::{ActorEntity, ResourceClient, ResourceRequest, Response};
use crate::storage::{Storage, StorageError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, watch};

// =============================================================================
// STORAGE EXPECTATION BUILDER API
// =============================================================================

/// Represents an expected call on a [`MockStorage`].
enum Expectation {
    Get {
        key: String,
        response: Result<Option<String>, StorageError>,
    },
    Set {
        key: String,
        response: Result<(), StorageError>,
    },
}

/// A [`Storage`] with expectation tracking for fluent testing.
///
/// Calls must arrive in the order the expectations were registered. Every `set_item` payload
/// is recorded so tests can assert exactly what was persisted.
///
/// # Example
/// ```ignore
/// let mock = MockStorage::new();
/// mock.expect_get("cart").return_ok(None);
/// mock.expect_set("cart").return_ok();
///
/// let storage: Arc<dyn Storage> = Arc::new(mock.clone());
/// // Use storage in tests...
/// mock.verify(); // Ensures all expectations were met
/// ```
#[derive(Clone, Default)]
pub struct MockStorage {
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
    writes: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockStorage {
    /// Creates a new mock storage with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects a `get_item` call for `key`.
    pub fn expect_get(&self, key: impl Into<String>) -> GetExpectationBuilder {
        GetExpectationBuilder {
            key: key.into(),
            expectations: self.expectations.clone(),
        }
    }

    /// Expects a `set_item` call for `key`.
    pub fn expect_set(&self, key: impl Into<String>) -> SetExpectationBuilder {
        SetExpectationBuilder {
            key: key.into(),
            expectations: self.expectations.clone(),
        }
    }

    /// Every `(key, value)` passed to `set_item`, in call order, including failed writes.
    pub fn writes(&self) -> Vec<(String, String)> {
        self.writes.lock().unwrap().clone()
    }

    /// The value of the most recent `set_item` call, if any.
    pub fn last_write(&self) -> Option<String> {
        self.writes.lock().unwrap().last().map(|(_, value)| value.clone())
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }

    fn next_expectation(&self) -> Option<Expectation> {
        self.expectations.lock().unwrap().pop_front()
    }
}

#[async_trait]
impl Storage for MockStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self.next_expectation() {
            Some(Expectation::Get {
                key: expected,
                response,
            }) if expected == key => response,
            _ => panic!("Unexpected get_item({key}) or expectation mismatch"),
        }
    }

    async fn set_item(&self, key: &str, value: String) -> Result<(), StorageError> {
        self.writes.lock().unwrap().push((key.to_string(), value));
        match self.next_expectation() {
            Some(Expectation::Set {
                key: expected,
                response,
            }) if expected == key => response,
            _ => panic!("Unexpected set_item({key}) or expectation mismatch"),
        }
    }

    async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        panic!("Unexpected remove_item({key})");
    }
}

/// Builder for `get_item` expectations.
pub struct GetExpectationBuilder {
    key: String,
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
}

impl GetExpectationBuilder {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: Option<String>) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Get {
            key: self.key,
            response: Ok(value),
        });
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: StorageError) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Get {
            key: self.key,
            response: Err(error),
        });
    }
}

/// Builder for `set_item` expectations.
pub struct SetExpectationBuilder {
    key: String,
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
}

impl SetExpectationBuilder {
    /// Sets the expectation to accept the write.
    pub fn return_ok(self) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Set {
            key: self.key,
            response: Ok(()),
        });
    }

    /// Sets the expectation to reject the write.
    pub fn return_err(self, error: StorageError) {
        let mut exps = self.expectations.lock().unwrap();
        exps.push_back(Expectation::Set {
            key: self.key,
            response: Err(error),
        });
    }
}

// =============================================================================
// CLIENT HELPERS
// =============================================================================

/// Creates a mock client and a receiver for asserting requests.
///
/// # Testing Strategy
/// When testing *client* logic (e.g., `CartClient`) there is no need to spin up a real
/// `ResourceActor`. The client sends to a channel the test controls; the test inspects each
/// request and answers it through the embedded responder, which makes success, failure and
/// ordering deterministic.
///
/// The client's snapshot stays empty; use [`create_mock_client_with_snapshot`] to drive it.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (client, receiver, _snapshot) = create_mock_client_with_snapshot(buffer_size);
    (client, receiver)
}

/// Like [`create_mock_client`], also returning the sender that feeds the client's snapshot.
pub fn create_mock_client_with_snapshot<T: ActorEntity>(
    buffer_size: usize,
) -> (
    ResourceClient<T>,
    mpsc::Receiver<ResourceRequest<T>>,
    watch::Sender<Arc<Vec<T>>>,
) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    let (snapshot, watcher) = watch::channel(Arc::new(Vec::new()));
    (ResourceClient::new(sender, watcher), receiver, snapshot)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Create, Response<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, Response<Option<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Action request
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Action, Response<T::ActionResult>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Delete request
pub async fn expect_delete<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, Response<()>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Delete { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Clear request
pub async fn expect_clear<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<Response<()>> {
    match receiver.recv().await {
        Some(ResourceRequest::Clear { respond_to }) => Some(respond_to),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_storage_scripted_calls() {
        let mock = MockStorage::new();
        mock.expect_get("cart").return_ok(Some("[]".to_string()));
        mock.expect_set("cart").return_ok();
        mock.expect_set("cart")
            .return_err(StorageError::Io(std::io::Error::other("disk full")));

        assert_eq!(mock.get_item("cart").await.unwrap().as_deref(), Some("[]"));
        mock.set_item("cart", "[1]".to_string()).await.unwrap();
        assert!(mock.set_item("cart", "[2]".to_string()).await.is_err());

        assert_eq!(
            mock.writes(),
            vec![
                ("cart".to_string(), "[1]".to_string()),
                ("cart".to_string(), "[2]".to_string()),
            ]
        );
        assert_eq!(mock.last_write().as_deref(), Some("[2]"));
        mock.verify();
    }

    #[tokio::test]
    #[should_panic(expected = "Not all expectations were met")]
    async fn test_mock_storage_verify_reports_leftovers() {
        let mock = MockStorage::new();
        mock.expect_get("cart").return_ok(None);
        mock.verify();
    }
}
