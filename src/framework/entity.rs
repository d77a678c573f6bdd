//! # ActorEntity Trait
//!
//! The `ActorEntity` trait defines the contract a resource must implement to be managed by the
//! generic [`ResourceActor`](crate::framework::ResourceActor). It specifies associated types for
//! IDs, creation payloads, actions, context and errors, and provides the lifecycle hooks the actor
//! calls while it mutates its persisted collection.
//!
//! # Architecture Note
//! The actor owns an *ordered* collection of entities and persists the whole collection after
//! every mutation. The entity only decides what a mutation means for itself; the actor decides
//! when it is committed. This keeps persistence, ordering and uniqueness in one place.
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::on_create`]
//! - [`ActorEntity::on_delete`]
//! - [`ActorEntity::is_retained`]
//! - [`ActorEntity::absorb_duplicate`]
//!
//! You do **not** need to implement these unless you want to customize behavior.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::{Debug, Display};

/// Trait that any resource entity must implement to be managed by `ResourceActor`.
///
/// # Async & Context
/// This trait is `#[async_trait]` so hooks may await. The `Context` type is injected into every
/// hook by [`ResourceActor::run`](crate::framework::ResourceActor::run), which lets dependencies
/// be bound after the actor is constructed.
///
/// # Persistence
/// Entities are stored as a JSON array, so they must round-trip through `serde`.
#[async_trait]
pub trait ActorEntity: Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Identifier that is unique within the collection.
    type Id: Eq + Clone + Send + Sync + Display + Debug;

    /// The payload that creates a new instance (or merges into an existing one).
    type Create: Send + Sync + Debug;

    /// Enum representing resource-specific operations (e.g., `Increment`).
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this entity.
    ///
    /// One error enum per actor rather than per message: every hook returns the same type, which
    /// keeps client-side matching simple.
    type Error: std::error::Error + Send + Sync + 'static;

    /// The identifier of this instance.
    fn id(&self) -> &Self::Id;

    /// The identifier a creation payload refers to.
    fn create_id(params: &Self::Create) -> &Self::Id;

    /// Construct the full entity from a creation payload.
    /// Called only when no entity with the same id exists.
    fn from_create_params(params: Self::Create) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks (Async) ---

    /// Called after a new entity is constructed and before it joins the collection.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when a creation payload names an id that already exists.
    /// The existing entity absorbs the payload instead of being duplicated.
    async fn on_merge(
        &mut self,
        params: Self::Create,
        ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the entity is removed from the collection.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handle a custom resource-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;

    /// Whether the entity stays in the collection after a mutation.
    /// Entities that return `false` are dropped before the collection is persisted.
    fn is_retained(&self) -> bool {
        true
    }

    /// Folds a later entry with the same id into this one while loading persisted data.
    /// The default keeps the first entry unchanged.
    fn absorb_duplicate(&mut self, _duplicate: Self) {}
}
