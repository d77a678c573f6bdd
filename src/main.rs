//! # Cart Store Demo
//!
//! Walks a cart through its operations:
//! 1.  Loading configuration and starting the [`CartProvider`].
//! 2.  Adding products, including one that is already in the cart.
//! 3.  Stepping a quantity down to zero, which removes the line.
//!
//! Set `CART_STORAGE_PATH` to keep the cart between runs.

use cart_store::config::CartConfig;
use cart_store::lifecycle::{setup_tracing, CartProvider};
use cart_store::model::NewCartItem;
use tracing::{error, info, Instrument};

const CONFIG_PATH: &str = "cart.toml";

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = CartConfig::load(CONFIG_PATH)
        .and_then(CartConfig::apply_env)
        .map_err(|e| e.to_string())?;
    info!(key = %config.storage_key, path = ?config.storage_path, "Starting cart demo");

    let provider = CartProvider::from_config(config)
        .await
        .map_err(|e| e.to_string())?;
    let cart = provider.use_cart().map_err(|e| e.to_string())?;

    let mug = NewCartItem::new("1", "Mug", "https://example.com/mug.png", 12.5);
    let cap = NewCartItem::new("2", "Cap", "https://example.com/cap.png", 20.0);

    let span = tracing::info_span!("filling_cart");
    async {
        info!("Adding products");
        cart.add_to_cart(mug.clone()).await?;
        cart.add_to_cart(cap.clone()).await?;
        // Same product again: the existing line is incremented.
        cart.add_to_cart(mug.clone()).await?;
        cart.increment(cap.id.clone()).await
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;

    let span = tracing::info_span!("emptying_line");
    let result = async {
        let mut remaining = cart.decrement(cap.id.clone()).await?;
        while remaining > 0 {
            remaining = cart.decrement(cap.id.clone()).await?;
        }
        Ok::<_, cart_store::cart_actor::CartError>(())
    }
    .instrument(span)
    .await;

    match result {
        Ok(()) => info!(id = %cap.id, "Line removed"),
        Err(e) => error!(error = %e, "Emptying line failed"),
    }

    let summary = cart.summary().map_err(|e| e.to_string())?;
    info!(
        lines = summary.distinct_items,
        quantity = summary.total_quantity,
        subtotal = summary.subtotal,
        "Cart contents"
    );

    provider.shutdown().await.map_err(|e| e.to_string())?;

    info!("Application completed successfully");
    Ok(())
}
