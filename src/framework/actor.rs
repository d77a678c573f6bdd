//! # Generic Actor Server
//!
//! This module defines the `ResourceActor`, the component that owns a persisted collection of
//! entities. It implements the "Server" side of the Actor Model: it processes messages
//! sequentially, so the collection and the storage key it is mirrored to are never touched by
//! two requests at once.

use crate::framework::client::ResourceClient;
use crate::framework::entity::ActorEntity;
use crate::framework::error::FrameworkError;
use crate::framework::message::ResourceRequest;
use crate::storage::Storage;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

/// The generic actor that manages a persisted, ordered collection of entities.
///
/// # Architecture Note
/// This struct is the "Server" half of the actor. It owns the state (`store`), the receiver
/// end of the request channel, and the storage handle the state is mirrored to.
///
/// **Concurrency Model**:
/// Requests are processed one at a time, so no `Mutex` guards the store and no two writes to
/// the storage key overlap. Each write observes every mutation that came before it.
///
/// **Commit Model**:
/// A mutating request is applied to a working copy of the collection. The working copy is
/// serialized and written to storage, and only once the write succeeds does it replace the
/// live collection and get published to subscribers. A failed write leaves the actor exactly
/// as it was.
///
/// # Usage Pattern
///
/// 1.  **Create**: `ResourceActor::new()` returns the `actor` (server) and `client` (interface).
/// 2.  **Load**: `actor.load().await?` adopts whatever was persisted under the key.
/// 3.  **Run**: spawn `actor.run(context)` in a background task.
///
/// ```rust,ignore
/// let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
/// let (mut actor, client) = ResourceActor::<CartItem>::new(32, storage, "cart");
/// actor.load().await?;
/// tokio::spawn(actor.run(()));
/// ```
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: Arc<Vec<T>>,
    storage: Arc<dyn Storage>,
    key: String,
    snapshot: watch::Sender<Arc<Vec<T>>>,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// # Arguments
    ///
    /// * `buffer_size` - The capacity of the MPSC channel. If the channel is full,
    ///   calls to the client will wait until there is space.
    /// * `storage` - Where the collection is persisted.
    /// * `key` - The storage key holding the JSON array.
    pub fn new(
        buffer_size: usize,
        storage: Arc<dyn Storage>,
        key: impl Into<String>,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let store = Arc::new(Vec::new());
        let (snapshot, watcher) = watch::channel(Arc::clone(&store));
        let actor = Self {
            receiver,
            store,
            storage,
            key: key.into(),
            snapshot,
        };
        let client = ResourceClient::new(sender, watcher);
        (actor, client)
    }

    /// Reads the persisted collection and adopts it as the current state.
    ///
    /// An absent key, or one holding only whitespace, leaves the collection empty. Entities that
    /// are not retained are dropped and repeated ids are folded into their first occurrence via
    /// [`ActorEntity::absorb_duplicate`], so the loaded collection upholds the same invariants
    /// as one built through requests. A normalized collection is written back; if that write
    /// fails the normalized collection is still adopted and the next commit persists it.
    ///
    /// Returns the number of entities loaded.
    pub async fn load(&mut self) -> Result<usize, FrameworkError> {
        let entity_type = entity_type::<T>();
        let raw = match self.storage.get_item(&self.key).await? {
            Some(raw) if !raw.trim().is_empty() => raw,
            _ => {
                info!(entity_type, key = %self.key, "Nothing persisted, starting empty");
                return Ok(0);
            }
        };

        let persisted: Vec<T> = serde_json::from_str(&raw)?;
        let persisted_len = persisted.len();

        let mut loaded: Vec<T> = Vec::with_capacity(persisted_len);
        for item in persisted {
            if !item.is_retained() {
                continue;
            }
            match loaded.iter_mut().find(|existing| existing.id() == item.id()) {
                Some(existing) => existing.absorb_duplicate(item),
                None => loaded.push(item),
            }
        }
        if loaded.len() == persisted_len {
            self.store = Arc::new(loaded);
            self.snapshot.send_replace(Arc::clone(&self.store));
        } else {
            warn!(
                entity_type,
                persisted = persisted_len,
                kept = loaded.len(),
                "Normalized persisted collection"
            );
            if let Err(e) = self.commit(loaded.clone()).await {
                warn!(entity_type, error = %e, "Failed to write back normalized collection");
                self.store = Arc::new(loaded);
                self.snapshot.send_replace(Arc::clone(&self.store));
            }
        }
        info!(entity_type, key = %self.key, size = self.store.len(), "Loaded");
        Ok(self.store.len())
    }

    /// Runs the actor's event loop, processing messages until the channel closes or a
    /// `Shutdown` request arrives.
    ///
    /// # Context Injection
    /// The `context` argument is injected into every entity hook. This allows entities
    /// to access external dependencies that were created *after* the actor was
    /// instantiated but *before* the loop started.
    pub async fn run(mut self, context: T::Context) {
        let entity_type = entity_type::<T>();
        info!(entity_type, size = self.store.len(), "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let result = self.create(params, &context).await;
                    if let Err(e) = &result {
                        warn!(entity_type, error = %e, "Create failed");
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.iter().find(|item| item.id() == &id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let result = self.delete(&id, &context).await;
                    match &result {
                        Ok(()) => info!(entity_type, %id, size = self.store.len(), "Deleted"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Delete failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Clear { respond_to } => {
                    debug!(entity_type, "Clear");
                    let result = self.clear(&context).await;
                    match &result {
                        Ok(()) => info!(entity_type, "Cleared"),
                        Err(e) => warn!(entity_type, error = %e, "Clear failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let result = self.action(&id, action, &context).await;
                    match &result {
                        Ok(_) => info!(entity_type, %id, size = self.store.len(), "Action ok"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Shutdown { respond_to } => {
                    debug!(entity_type, "Shutdown requested");
                    let _ = respond_to.send(Ok(()));
                    break;
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    async fn create(
        &mut self,
        params: T::Create,
        context: &T::Context,
    ) -> Result<T, FrameworkError> {
        let entity_type = entity_type::<T>();
        let id = T::create_id(&params).clone();
        let mut next = self.working_copy();

        let item = match next.iter_mut().find(|item| item.id() == &id) {
            Some(existing) => {
                existing.on_merge(params, context).await.map_err(entity_error)?;
                debug!(entity_type, %id, "Merged into existing");
                existing.clone()
            }
            None => {
                let mut item = T::from_create_params(params).map_err(entity_error)?;
                item.on_create(context).await.map_err(entity_error)?;
                next.push(item.clone());
                item
            }
        };

        let next = prune(next, context).await?;
        self.commit(next).await?;
        info!(entity_type, %id, size = self.store.len(), "Create committed");
        Ok(item)
    }

    async fn action(
        &mut self,
        id: &T::Id,
        action: T::Action,
        context: &T::Context,
    ) -> Result<T::ActionResult, FrameworkError> {
        let mut next = self.working_copy();
        let Some(item) = next.iter_mut().find(|item| item.id() == id) else {
            return Err(FrameworkError::NotFound(id.to_string()));
        };
        let result = item
            .handle_action(action, context)
            .await
            .map_err(entity_error)?;

        let next = prune(next, context).await?;
        self.commit(next).await?;
        Ok(result)
    }

    async fn delete(&mut self, id: &T::Id, context: &T::Context) -> Result<(), FrameworkError> {
        let mut next = self.working_copy();
        let Some(index) = next.iter().position(|item| item.id() == id) else {
            return Err(FrameworkError::NotFound(id.to_string()));
        };
        let removed = next.remove(index);
        removed.on_delete(context).await.map_err(entity_error)?;
        self.commit(next).await
    }

    async fn clear(&mut self, context: &T::Context) -> Result<(), FrameworkError> {
        for item in self.store.iter() {
            item.on_delete(context).await.map_err(entity_error)?;
        }
        self.commit(Vec::new()).await
    }

    fn working_copy(&self) -> Vec<T> {
        self.store.as_ref().clone()
    }

    /// Persists `next` and, once the write has succeeded, makes it the live collection.
    async fn commit(&mut self, next: Vec<T>) -> Result<(), FrameworkError> {
        let payload = serde_json::to_string(&next)?;
        self.storage.set_item(&self.key, payload).await?;
        self.store = Arc::new(next);
        self.snapshot.send_replace(Arc::clone(&self.store));
        Ok(())
    }
}

/// Drops entities that are no longer retained, running their `on_delete` hook.
async fn prune<T: ActorEntity>(
    next: Vec<T>,
    context: &T::Context,
) -> Result<Vec<T>, FrameworkError> {
    let (kept, dropped): (Vec<T>, Vec<T>) = next.into_iter().partition(T::is_retained);
    for item in &dropped {
        item.on_delete(context).await.map_err(entity_error)?;
        debug!(entity_type = entity_type::<T>(), id = %item.id(), "Pruned");
    }
    Ok(kept)
}

fn entity_error<E: std::error::Error + Send + Sync + 'static>(e: E) -> FrameworkError {
    FrameworkError::EntityError(Box::new(e))
}

// Extract just the type name (e.g., "CartItem" instead of "cart_store::model::cart_item::CartItem")
fn entity_type<T>() -> &'static str {
    std::any::type_name::<T>()
        .split("::")
        .last()
        .unwrap_or("Unknown")
}
