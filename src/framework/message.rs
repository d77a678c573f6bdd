//! # Generic Messages
//!
//! This module defines the generic message types used for communication between
//! the `ResourceClient` and `ResourceActor`.

use crate::framework::entity::ActorEntity;
use crate::framework::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to the actor to request operations.
///
/// # Resource-Oriented Architecture
/// Every actor manages one persisted collection of a single [`ActorEntity`] type. Instead of
/// ad-hoc messages per operation, requests are standardized around the lifecycle of that
/// collection:
///
/// - **Create**: Insert a new entity, or merge the payload into the entity with the same id.
/// - **Get (Read)**: Fetch the current state of one entity.
/// - **Delete**: Remove one entity.
/// - **Clear**: Remove every entity.
/// - **Action**: Execute a custom [`ActorEntity::Action`] on one entity.
/// - **Shutdown**: Stop the actor even while clients are still alive.
///
/// Every mutating request is persisted before it is answered.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Clear {
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
    Shutdown {
        respond_to: Response<()>,
    },
}
