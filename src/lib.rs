//! # Cart Store
//!
//! > **A persisted shopping-cart state container built on a resource-oriented actor.**
//!
//! The cart is an ordered list of product lines, each with a quantity. Consumers add products,
//! step quantities up and down, and read the current lines; every change is written to a
//! key-value [`Storage`](storage::Storage) backend before it is acknowledged, and the persisted
//! cart is restored when the provider starts.
//!
//! ## Design
//!
//! ### One owner for the cart
//! The cart lives inside a single [`ResourceActor`](framework::ResourceActor) task. Requests are
//! processed one at a time, so two quick clicks on "+" can never lose an update, and each
//! storage write contains every change that came before it.
//!
//! ### Persist, then publish
//! A mutation is applied to a copy of the cart and written to storage. Only when the write
//! succeeds does the copy become the current cart and reach subscribers. If storage fails, the
//! caller gets an error and the cart is exactly as it was.
//!
//! ### Explicit scope
//! A [`CartProvider`](lifecycle::CartProvider) owns the actor. Asking it for the cart before it
//! has loaded, or using a client after it shut down, yields
//! [`CartError::NoProvider`](cart_actor::CartError::NoProvider) instead of silently doing nothing.
//!
//! ## Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! The generic `ResourceActor<T>` and the [`ActorEntity`](framework::ActorEntity) trait.
//! - **Role**: Owns an ordered, persisted collection and runs the request loop.
//! - **Key items**: [`ResourceActor`](framework::ResourceActor),
//!   [`ResourceClient`](framework::ResourceClient), [`mock`](framework::mock).
//!
//! ### 2. Persistence ([`storage`])
//! The async [`Storage`](storage::Storage) trait with in-memory and JSON-file backends.
//!
//! ### 3. The Cart ([`model`], [`cart_actor`])
//! [`CartItem`](model::CartItem) and what add / increment / decrement mean for it.
//!
//! ### 4. The Interface ([`clients`])
//! [`CartClient`](clients::CartClient) hides message passing behind cart operations.
//!
//! ### 5. The Scope ([`lifecycle`], [`config`])
//! [`CartProvider`](lifecycle::CartProvider) loads, serves and shuts down the cart;
//! [`CartConfig`](config::CartConfig) says where and under which key.
//!
//! ## Quick Start
//!
//! ```bash
//! # Run the demo with info logs
//! RUST_LOG=info cargo run
//!
//! # Persist the demo cart to a file
//! CART_STORAGE_PATH=/tmp/cart.json RUST_LOG=info cargo run
//! ```

pub mod cart_actor;
pub mod clients;
pub mod config;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod storage;
