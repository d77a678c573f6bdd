//! # Cart Client
//!
//! Provides the consumer-facing API of the cart: the current lines plus the mutation
//! operations. It wraps a `ResourceClient<CartItem>` and exposes cart-specific methods.
//!
//! A `CartClient` is only useful while the [`CartProvider`](crate::lifecycle::CartProvider)
//! that handed it out is running. Once the provider shuts down every call fails with
//! [`CartError::NoProvider`].

use crate::cart_actor::{CartAction, CartActionResult, CartError};
use crate::clients::actor_client::ActorClient;
use crate::framework::{FrameworkError, ResourceClient};
use crate::model::{CartItem, CartSummary, NewCartItem, ProductId};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, instrument};

/// Client for interacting with the Cart actor.
#[derive(Clone)]
pub struct CartClient {
    inner: ResourceClient<CartItem>,
}

impl CartClient {
    pub fn new(inner: ResourceClient<CartItem>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<CartItem> for CartClient {
    type Error = CartError;

    fn inner(&self) -> &ResourceClient<CartItem> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::ActorClosed | FrameworkError::ActorDropped => CartError::NoProvider,
            FrameworkError::NotFound(id) => CartError::NotFound(ProductId(id)),
            FrameworkError::EntityError(inner) => match inner.downcast::<CartError>() {
                Ok(cart_error) => *cart_error,
                Err(other) => CartError::ActorCommunicationError(other.to_string()),
            },
            FrameworkError::Storage(e) => CartError::Storage(e.to_string()),
            FrameworkError::Serialization(e) => CartError::CorruptData(e.to_string()),
        }
    }
}

impl CartClient {
    /// The cart lines as of the last committed change, in the order they were added.
    pub fn products(&self) -> Result<Arc<Vec<CartItem>>, CartError> {
        self.ensure_open()?;
        Ok(self.inner.snapshot())
    }

    /// Totals over [`products`](Self::products).
    pub fn summary(&self) -> Result<CartSummary, CartError> {
        let products = self.products()?;
        Ok(CartSummary::from_items(&products))
    }

    /// A receiver notified after every committed change; `borrow()` yields the current lines.
    pub fn subscribe(&self) -> Result<watch::Receiver<Arc<Vec<CartItem>>>, CartError> {
        self.ensure_open()?;
        Ok(self.inner.subscribe())
    }

    /// Puts one unit of `item` in the cart.
    ///
    /// A product that is not in the cart yet gets a new line with a quantity of one;
    /// a product that already is gets its line incremented. Returns the resulting line.
    #[instrument(skip(self), fields(id = %item.id))]
    pub async fn add_to_cart(&self, item: NewCartItem) -> Result<CartItem, CartError> {
        debug!(?item, "add_to_cart called");
        self.inner.create(item).await.map_err(Self::map_error)
    }

    /// Adds one unit to the line for `id`. Returns the new quantity.
    #[instrument(skip(self))]
    pub async fn increment(&self, id: ProductId) -> Result<u32, CartError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(id, CartAction::Increment)
            .await
            .map_err(Self::map_error)?
        {
            CartActionResult::Increment(quantity) => Ok(quantity),
            other => Err(CartError::ActorCommunicationError(format!(
                "Increment answered with {other:?}"
            ))),
        }
    }

    /// Removes one unit from the line for `id`. Returns the new quantity; at zero the line
    /// has been removed from the cart.
    #[instrument(skip(self))]
    pub async fn decrement(&self, id: ProductId) -> Result<u32, CartError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(id, CartAction::Decrement)
            .await
            .map_err(Self::map_error)?
        {
            CartActionResult::Decrement(quantity) => Ok(quantity),
            other => Err(CartError::ActorCommunicationError(format!(
                "Decrement answered with {other:?}"
            ))),
        }
    }

    /// Removes the whole line for `id`, whatever its quantity.
    pub async fn remove(&self, id: ProductId) -> Result<(), CartError> {
        self.delete(id).await
    }

    fn ensure_open(&self) -> Result<(), CartError> {
        if self.inner.is_closed() {
            return Err(CartError::NoProvider);
        }
        Ok(())
    }
}
