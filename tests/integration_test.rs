use cart_store::cart_actor::{CartError, DEFAULT_STORAGE_KEY};
use cart_store::clients::actor_client::ActorClient;
use cart_store::config::CartConfig;
use cart_store::lifecycle::CartProvider;
use cart_store::model::{CartItem, NewCartItem, ProductId};
use cart_store::storage::{MemoryStorage, Storage};
use std::sync::Arc;

fn mug() -> NewCartItem {
    NewCartItem::new("1", "Mug", "https://img/mug.png", 12.5)
}

fn cap() -> NewCartItem {
    NewCartItem::new("2", "Cap", "https://img/cap.png", 20.0)
}

async fn persisted(storage: &MemoryStorage) -> Vec<CartItem> {
    let raw = storage
        .get_item(DEFAULT_STORAGE_KEY)
        .await
        .expect("Failed to read storage")
        .expect("Nothing persisted");
    serde_json::from_str(&raw).expect("Persisted cart is not a JSON array of lines")
}

/// Full end-to-end flow through a running provider.
#[tokio::test]
async fn test_full_cart_flow() {
    let storage = Arc::new(MemoryStorage::new());
    let provider = CartProvider::start(CartConfig::default(), storage.clone())
        .await
        .expect("Failed to start provider");
    let cart = provider.use_cart().expect("Provider not running");

    // A new product gets a line with a quantity of one
    let line = cart.add_to_cart(mug()).await.expect("Failed to add mug");
    assert_eq!(line.quantity, 1);
    cart.add_to_cart(cap()).await.expect("Failed to add cap");

    // Adding the same product again increments its line
    let line = cart.add_to_cart(mug()).await.expect("Failed to add mug");
    assert_eq!(line.quantity, 2);

    let products = cart.products().unwrap();
    let ids: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["1", "2"], "Lines keep insertion order");
    assert_eq!(products[0].quantity, 2);
    assert_eq!(products[1].quantity, 1);

    // The persisted value is the state after the last mutation
    assert_eq!(persisted(&storage).await, *products);

    assert_eq!(cart.increment(ProductId::from("2")).await.unwrap(), 2);
    assert_eq!(cart.decrement(ProductId::from("2")).await.unwrap(), 1);

    // Reaching zero removes the line
    assert_eq!(cart.decrement(ProductId::from("2")).await.unwrap(), 0);
    let products = cart.products().unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].id, ProductId::from("1"));
    assert_eq!(persisted(&storage).await, *products);

    let summary = cart.summary().unwrap();
    assert_eq!(summary.distinct_items, 1);
    assert_eq!(summary.total_quantity, 2);
    assert_eq!(summary.subtotal, 25.0);

    provider.shutdown().await.expect("Failed to shutdown provider");
}

#[tokio::test]
async fn test_reload_restores_cart() {
    let storage = Arc::new(MemoryStorage::new());

    let provider = CartProvider::start(CartConfig::default(), storage.clone())
        .await
        .unwrap();
    let cart = provider.use_cart().unwrap();
    cart.add_to_cart(mug()).await.unwrap();
    cart.add_to_cart(cap()).await.unwrap();
    cart.increment(ProductId::from("2")).await.unwrap();
    let before = cart.products().unwrap();
    provider.shutdown().await.unwrap();

    let provider = CartProvider::start(CartConfig::default(), storage)
        .await
        .unwrap();
    let after = provider.use_cart().unwrap().products().unwrap();
    assert_eq!(after, before);
    provider.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_load_accepts_previous_format() {
    let raw = r#"[
        {"id":"7","title":"Shoe","image_url":"shoe.png","price":99.9,"quantity":3},
        {"id":"8","title":"Sock","image_url":"sock.png","price":5,"quantity":1}
    ]"#;
    let storage = Arc::new(MemoryStorage::with_item(DEFAULT_STORAGE_KEY, raw));

    let provider = CartProvider::start(CartConfig::default(), storage)
        .await
        .unwrap();
    let products = provider.use_cart().unwrap().products().unwrap();

    assert_eq!(products.len(), 2);
    assert_eq!(products[0], CartItem::new("7", "Shoe", "shoe.png", 99.9, 3));
    assert_eq!(products[1].price, 5.0);
    provider.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_unknown_fields_survive_mutations() {
    let raw = r#"[{"id":"1","title":"Mug","image_url":"mug.png","price":12.5,"quantity":1,"stock":5}]"#;
    let storage = Arc::new(MemoryStorage::with_item(DEFAULT_STORAGE_KEY, raw));

    let provider = CartProvider::start(CartConfig::default(), storage.clone())
        .await
        .unwrap();
    let cart = provider.use_cart().unwrap();
    cart.add_to_cart(cap()).await.unwrap();
    cart.add_to_cart(mug()).await.unwrap();

    let stored = storage.get_item(DEFAULT_STORAGE_KEY).await.unwrap().unwrap();
    let lines: serde_json::Value = serde_json::from_str(&stored).unwrap();
    assert_eq!(lines[0]["stock"], 5);
    assert_eq!(lines[0]["quantity"], 2);
    assert!(lines[1].get("stock").is_none());

    provider.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_load_normalizes_persisted_cart() {
    let raw = r#"[
        {"id":"1","title":"Mug","image_url":"mug.png","price":12.5,"quantity":2},
        {"id":"2","title":"Cap","image_url":"cap.png","price":20.0,"quantity":0},
        {"id":"1","title":"Mug (old)","image_url":"mug.png","price":10.0,"quantity":3}
    ]"#;
    let storage = Arc::new(MemoryStorage::with_item(DEFAULT_STORAGE_KEY, raw));

    let provider = CartProvider::start(CartConfig::default(), storage.clone())
        .await
        .unwrap();
    let products = provider.use_cart().unwrap().products().unwrap();

    // Zero-quantity lines are dropped, duplicate ids are folded into the first line
    assert_eq!(
        *products,
        vec![CartItem::new("1", "Mug", "mug.png", 12.5, 5)]
    );
    // The normalized cart replaces what was stored
    assert_eq!(persisted(&storage).await, *products);
    provider.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_blank_stored_value_starts_empty() {
    for raw in ["", "  \n\t"] {
        let storage = Arc::new(MemoryStorage::with_item(DEFAULT_STORAGE_KEY, raw));

        let provider = CartProvider::start(CartConfig::default(), storage.clone())
            .await
            .unwrap_or_else(|e| panic!("Blank value {raw:?} failed init: {e}"));
        let cart = provider.use_cart().unwrap();
        assert!(cart.products().unwrap().is_empty());

        cart.add_to_cart(mug()).await.unwrap();
        assert_eq!(persisted(&storage).await.len(), 1);
        provider.shutdown().await.unwrap();
    }
}

#[tokio::test]
async fn test_corrupt_cart_fails_init() {
    let storage = Arc::new(MemoryStorage::with_item(DEFAULT_STORAGE_KEY, "{not json"));

    let mut provider = CartProvider::new(CartConfig::default(), storage);
    let result = provider.init().await;

    assert!(
        matches!(result, Err(CartError::CorruptData(_))),
        "Expected CorruptData, got {result:?}"
    );
    assert!(!provider.is_initialized());
    assert_eq!(provider.use_cart().err(), Some(CartError::NoProvider));
}

#[tokio::test]
async fn test_use_outside_provider() {
    let provider = CartProvider::new(CartConfig::default(), Arc::new(MemoryStorage::new()));
    assert_eq!(provider.use_cart().err(), Some(CartError::NoProvider));

    let mut provider = provider;
    provider.init().await.unwrap();
    let cart = provider.use_cart().unwrap();
    provider.shutdown().await.unwrap();

    assert_eq!(cart.products().unwrap_err(), CartError::NoProvider);
    assert_eq!(cart.subscribe().err(), Some(CartError::NoProvider));
    assert_eq!(
        cart.add_to_cart(mug()).await.unwrap_err(),
        CartError::NoProvider
    );
    assert_eq!(
        cart.decrement(ProductId::from("1")).await.unwrap_err(),
        CartError::NoProvider
    );
}

/// Many callers adding at once: no update is lost and the final write holds all of them.
#[tokio::test]
async fn test_concurrent_adds() {
    let storage = Arc::new(MemoryStorage::new());
    let provider = CartProvider::start(CartConfig::default(), storage.clone())
        .await
        .unwrap();
    let cart = provider.use_cart().unwrap();

    let mut handles = vec![];
    for i in 0..30 {
        let cart = cart.clone();
        handles.push(tokio::spawn(async move {
            let item = if i % 3 == 0 { cap() } else { mug() };
            cart.add_to_cart(item).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().expect("Concurrent add failed");
    }

    let products = cart.products().unwrap();
    let quantity_of = |id: &str| {
        products
            .iter()
            .find(|p| p.id.as_str() == id)
            .map(|p| p.quantity)
    };
    assert_eq!(products.len(), 2);
    assert_eq!(quantity_of("1"), Some(20));
    assert_eq!(quantity_of("2"), Some(10));
    assert_eq!(persisted(&storage).await, *products);

    provider.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_missing_product_is_not_found() {
    let storage = Arc::new(MemoryStorage::new());
    let provider = CartProvider::start(CartConfig::default(), storage.clone())
        .await
        .unwrap();
    let cart = provider.use_cart().unwrap();

    let missing = ProductId::from("nope");
    assert_eq!(
        cart.increment(missing.clone()).await.unwrap_err(),
        CartError::NotFound(missing.clone())
    );
    assert_eq!(
        cart.decrement(missing.clone()).await.unwrap_err(),
        CartError::NotFound(missing.clone())
    );
    assert_eq!(
        cart.remove(missing.clone()).await.unwrap_err(),
        CartError::NotFound(missing)
    );

    // Nothing changed, so nothing was written
    assert!(storage.is_empty().await);
    provider.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_invalid_item_is_rejected() {
    let provider = CartProvider::start(CartConfig::default(), Arc::new(MemoryStorage::new()))
        .await
        .unwrap();
    let cart = provider.use_cart().unwrap();

    let result = cart
        .add_to_cart(NewCartItem::new("3", "Ghost", "ghost.png", f64::NAN))
        .await;
    assert!(matches!(result, Err(CartError::InvalidItem { .. })));
    assert!(cart.products().unwrap().is_empty());

    provider.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_remove_and_clear() {
    let storage = Arc::new(MemoryStorage::new());
    let provider = CartProvider::start(CartConfig::default(), storage.clone())
        .await
        .unwrap();
    let cart = provider.use_cart().unwrap();

    cart.add_to_cart(mug()).await.unwrap();
    cart.add_to_cart(mug()).await.unwrap();
    cart.add_to_cart(cap()).await.unwrap();

    // remove drops the whole line regardless of quantity
    cart.remove(ProductId::from("1")).await.unwrap();
    let products = cart.products().unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].id, ProductId::from("2"));

    assert!(cart.get(ProductId::from("1")).await.unwrap().is_none());
    assert_eq!(
        cart.get(ProductId::from("2")).await.unwrap().map(|p| p.quantity),
        Some(1)
    );

    cart.clear().await.unwrap();
    assert!(cart.products().unwrap().is_empty());
    assert!(persisted(&storage).await.is_empty());

    provider.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_subscriber_sees_each_commit() {
    let provider = CartProvider::start(CartConfig::default(), Arc::new(MemoryStorage::new()))
        .await
        .unwrap();
    let cart = provider.use_cart().unwrap();
    let mut updates = cart.subscribe().unwrap();

    cart.add_to_cart(mug()).await.unwrap();
    updates.changed().await.expect("Actor stopped publishing");
    assert_eq!(updates.borrow_and_update().len(), 1);

    cart.decrement(ProductId::from("1")).await.unwrap();
    updates.changed().await.expect("Actor stopped publishing");
    assert!(updates.borrow_and_update().is_empty());

    provider.shutdown().await.unwrap();
}
