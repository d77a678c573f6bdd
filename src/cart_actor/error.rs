//! Error types for the Cart actor.

use crate::model::ProductId;
use thiserror::Error;

/// Errors that can occur during cart operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    /// The cart was used before its provider was initialized, or after it shut down.
    #[error("Cart used outside of an initialized CartProvider")]
    NoProvider,

    /// No line in the cart has this product id.
    #[error("Product not in cart: {0}")]
    NotFound(ProductId),

    /// The item can't be stored (empty id, or a price that doesn't survive JSON).
    #[error("Invalid cart item {id}: {reason}")]
    InvalidItem { id: ProductId, reason: String },

    /// Incrementing would overflow the line's quantity.
    #[error("Quantity overflow for product {0}")]
    QuantityOverflow(ProductId),

    /// The storage backend failed; the cart is unchanged.
    #[error("Cart storage error: {0}")]
    Storage(String),

    /// The persisted cart could not be decoded.
    #[error("Persisted cart data is corrupt: {0}")]
    CorruptData(String),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<String> for CartError {
    fn from(msg: String) -> Self {
        CartError::ActorCommunicationError(msg)
    }
}
