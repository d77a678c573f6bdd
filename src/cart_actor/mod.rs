//! # Cart Actor
//!
//! This module implements the shopping-cart resource actor.
//!
//! ## Overview
//!
//! The cart is a single persisted collection of [`CartItem`] lines keyed by product id.
//! The generic [`ResourceActor`] owns the collection; this module supplies what the
//! operations mean for a cart line.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation for [`CartItem`]
//! - [`error`] - [`CartError`] type for type-safe error handling
//! - [`actions`] - [`CartAction`] and [`CartActionResult`] for quantity changes
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Operations
//!
//! | Operation | Request | Effect |
//! |---|---|---|
//! | add | `Create(NewCartItem)` | new line with quantity 1, or +1 on an existing line |
//! | increment | `Action(Increment)` | +1 |
//! | decrement | `Action(Decrement)` | -1, line removed at 0 |
//! | remove | `Delete` | line removed |
//! | clear | `Clear` | every line removed |
//!
//! Every operation is persisted under the configured key before it is answered.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
//! let (mut actor, generic_client) = cart_actor::new(32, storage, DEFAULT_STORAGE_KEY);
//! actor.load().await?;
//! tokio::spawn(actor.run(()));
//!
//! let client = CartClient::new(generic_client);
//! client.add_to_cart(NewCartItem::new("1", "Mug", "mug.png", 12.0)).await?;
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::framework::{ResourceActor, ResourceClient};
use crate::model::CartItem;
use crate::storage::Storage;
use std::sync::Arc;

/// Storage key the cart has always been persisted under.
pub const DEFAULT_STORAGE_KEY: &str = "@GoMarketplace:products";

/// Creates a new Cart actor and its client.
pub fn new(
    buffer_size: usize,
    storage: Arc<dyn Storage>,
    key: impl Into<String>,
) -> (ResourceActor<CartItem>, ResourceClient<CartItem>) {
    ResourceActor::new(buffer_size, storage, key)
}
