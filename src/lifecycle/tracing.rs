//! # Observability & Tracing
//!
//! The [`setup_tracing`] function initializes structured logging with the `tracing` crate.
//!
//! ## Configuration
//!
//! The compact format hides the crate/module prefix (`with_target(false)`); every framework
//! log line carries an `entity_type` field instead. Levels come from `RUST_LOG`.
//!
//! ## What Gets Traced
//!
//! - **Actor Lifecycle**: Load, startup, shutdown and final size
//! - **Requests**: Create, Get, Delete, Clear and custom Actions, with the product id
//! - **Commits**: Each persisted mutation and the resulting cart size
//! - **Errors**: Storage and entity failures with the id that caused them
//!
//! ## Usage Examples
//!
//! ```bash
//! # Lifecycle and committed mutations
//! RUST_LOG=info cargo run
//!
//! # Request payloads as well
//! RUST_LOG=debug cargo run
//!
//! # Storage reads and writes
//! RUST_LOG=cart_store::storage=trace cargo run
//! ```
//!
//! ## Workflow Trace Example
//!
//! **With `RUST_LOG=info`**:
//!
//! ```text
//! INFO Loaded entity_type="CartItem" key=@GoMarketplace:products size=1
//! INFO Cart provider initialized key=@GoMarketplace:products items=1
//! INFO Actor started entity_type="CartItem" size=1
//! INFO add_to_cart{id=2}: Create committed entity_type="CartItem" id=2 size=2
//! INFO decrement{id=ProductId("1")}: Action ok entity_type="CartItem" id=1 size=1
//! ```
//!
//! **With `RUST_LOG=debug`** the request payloads are logged once at entry:
//!
//! ```text
//! DEBUG add_to_cart{id=2}: add_to_cart called item=NewCartItem { id: ProductId("2"), title: "Cap", .. }
//! DEBUG Create entity_type="CartItem" params=NewCartItem { .. }
//! ```

/// Installs the global `fmt` subscriber.
///
/// Safe to call more than once: later calls (from tests, or from a host application that
/// already installed a subscriber) leave the existing subscriber in place.
pub fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // Don't show module paths - we use entity_type instead
        .compact() // Compact format shows spans inline (e.g., "add_to_cart:")
        .try_init();
}
