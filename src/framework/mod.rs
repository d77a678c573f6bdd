//! Generic actor framework for persisted resource collections.
//!
//! This module provides the building blocks for a type-safe actor that owns an ordered
//! collection of entities and mirrors it to a [`Storage`](crate::storage::Storage) key.
//!
//! # Main Components
//!
//! - [`ActorEntity`] - Trait that resource types implement to be managed by actors
//! - [`ResourceActor`] - Generic actor that owns and persists the collection
//! - [`ResourceClient`] - Type-safe, cloneable handle for sending requests
//! - [`ResourceRequest`] - The request messages
//! - [`FrameworkError`] - Common error types
//!
//! # Testing
//!
//! See [`mock`] module for utilities to test clients without spawning full actors.

pub mod actor;
pub mod client;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
