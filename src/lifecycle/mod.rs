//! # Cart Lifecycle
//!
//! This module manages the runtime lifecycle of the cart: loading it, running it, handing
//! out access to it and shutting it down.
//!
//! ## The Provider Pattern
//!
//! The cart actor is simple; the interesting part is the order things happen in.
//! [`CartProvider`] is the "conductor":
//!
//! 1. **Dependency Injection** - the [`Storage`](crate::storage::Storage) backend is passed in,
//!    never looked up globally
//! 2. **Load before serve** - the persisted cart is adopted before the actor accepts requests
//! 3. **Scoped access** - [`CartProvider::use_cart`] only succeeds while the cart is running
//! 4. **Graceful Shutdown** - queued requests finish, later ones are refused
//!
//! ## Observability
//!
//! [`setup_tracing`] initializes structured logging for the whole crate. See the
//! [`tracing`] module for what gets logged at which level.

pub mod cart_provider;
pub mod tracing;

pub use cart_provider::*;
pub use tracing::*;
