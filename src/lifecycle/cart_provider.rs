use crate::cart_actor::{self, CartError};
use crate::clients::{ActorClient, CartClient};
use crate::config::CartConfig;
use crate::model::CartItem;
use crate::storage::{FileStorage, MemoryStorage, Storage};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// The scope inside which the cart can be used.
///
/// `CartProvider` is responsible for:
/// - **Loading**: Reading the persisted cart before anything can touch it
/// - **Lifecycle Management**: Starting and stopping the cart actor
/// - **Dependency Wiring**: Handing the injected [`Storage`] to the actor
/// - **Access Control**: Handing out [`CartClient`]s only while the cart is running
///
/// # Lifecycle
///
/// ```text
/// new() ──► Uninitialized ──init()──► Running ──shutdown()──► (consumed)
///              use_cart(): Err(NoProvider)   use_cart(): Ok(client)
/// ```
///
/// Clients that outlive the provider fail every call with [`CartError::NoProvider`].
///
/// # Example
///
/// ```ignore
/// let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
/// let provider = CartProvider::start(CartConfig::default(), storage).await?;
///
/// let cart = provider.use_cart()?;
/// cart.add_to_cart(NewCartItem::new("1", "Mug", "mug.png", 12.0)).await?;
///
/// provider.shutdown().await?;
/// ```
pub struct CartProvider {
    config: CartConfig,
    storage: Arc<dyn Storage>,
    state: ProviderState,
}

enum ProviderState {
    Uninitialized,
    Running {
        client: CartClient,
        handle: JoinHandle<()>,
    },
}

impl CartProvider {
    /// Creates a provider that has not loaded anything yet.
    pub fn new(config: CartConfig, storage: Arc<dyn Storage>) -> Self {
        Self {
            config,
            storage,
            state: ProviderState::Uninitialized,
        }
    }

    /// Creates a provider and initializes it.
    pub async fn start(config: CartConfig, storage: Arc<dyn Storage>) -> Result<Self, CartError> {
        let mut provider = Self::new(config, storage);
        provider.init().await?;
        Ok(provider)
    }

    /// Creates and initializes a provider whose storage follows the configuration:
    /// a [`FileStorage`] at `storage_path` when one is set, a [`MemoryStorage`] otherwise.
    pub async fn from_config(config: CartConfig) -> Result<Self, CartError> {
        let storage: Arc<dyn Storage> = match &config.storage_path {
            Some(path) => Arc::new(FileStorage::new(path)),
            None => Arc::new(MemoryStorage::new()),
        };
        Self::start(config, storage).await
    }

    /// Loads the persisted cart and starts the actor.
    ///
    /// This method:
    /// 1. Creates the cart actor and its client
    /// 2. Reads the configured storage key; an absent key means an empty cart
    /// 3. Spawns the actor in its own Tokio task
    ///
    /// Calling `init` on a running provider does nothing. If loading fails the provider
    /// stays uninitialized and `init` may be retried.
    pub async fn init(&mut self) -> Result<(), CartError> {
        if self.is_initialized() {
            return Ok(());
        }

        let (mut actor, generic_client) = cart_actor::new(
            self.config.channel_capacity,
            Arc::clone(&self.storage),
            self.config.storage_key.clone(),
        );

        // The actor is not serving yet, so nothing can observe the cart before it is loaded.
        let loaded = actor.load().await.map_err(|e| {
            error!(error = %e, key = %self.config.storage_key, "Failed to load cart");
            <CartClient as ActorClient<CartItem>>::map_error(e)
        })?;

        let handle = tokio::spawn(actor.run(()));
        self.state = ProviderState::Running {
            client: CartClient::new(generic_client),
            handle,
        };
        info!(key = %self.config.storage_key, items = loaded, "Cart provider initialized");
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        matches!(self.state, ProviderState::Running { .. })
    }

    /// Returns a client for the running cart.
    ///
    /// # Errors
    ///
    /// [`CartError::NoProvider`] if the provider has not been initialized.
    pub fn use_cart(&self) -> Result<CartClient, CartError> {
        match &self.state {
            ProviderState::Running { client, .. } => Ok(client.clone()),
            ProviderState::Uninitialized => Err(CartError::NoProvider),
        }
    }

    pub fn config(&self) -> &CartConfig {
        &self.config
    }

    /// Stops the cart actor and waits for it to finish.
    ///
    /// # Shutdown Process
    ///
    /// 1. A `Shutdown` request is queued; everything sent before it is still served and persisted.
    /// 2. The actor leaves its loop and drops its receiver.
    /// 3. Requests queued behind the shutdown, and any later call on a surviving
    ///    [`CartClient`], fail with [`CartError::NoProvider`].
    ///
    /// Shutting down an uninitialized provider is a no-op.
    pub async fn shutdown(self) -> Result<(), CartError> {
        let ProviderState::Running { client, handle } = self.state else {
            return Ok(());
        };
        info!("Shutting down cart provider...");

        if let Err(e) = client.inner().shutdown().await {
            // The actor already stopped on its own; the join below reports why.
            info!(error = %e, "Cart actor no longer accepting requests");
        }
        drop(client);

        if let Err(e) = handle.await {
            error!("Cart actor task failed: {:?}", e);
            return Err(CartError::ActorCommunicationError(format!(
                "Cart actor task failed: {e}"
            )));
        }

        info!("Cart provider shutdown complete.");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart_actor::DEFAULT_STORAGE_KEY;
    use crate::model::NewCartItem;

    #[tokio::test]
    async fn test_use_before_init_is_an_error() {
        let provider = CartProvider::new(CartConfig::default(), Arc::new(MemoryStorage::new()));

        assert!(!provider.is_initialized());
        assert_eq!(provider.use_cart().err(), Some(CartError::NoProvider));
    }

    #[tokio::test]
    async fn test_init_is_idempotent() {
        let mut provider =
            CartProvider::new(CartConfig::default(), Arc::new(MemoryStorage::new()));
        provider.init().await.unwrap();
        let cart = provider.use_cart().unwrap();
        cart.add_to_cart(NewCartItem::new("1", "Mug", "mug.png", 12.0))
            .await
            .unwrap();

        provider.init().await.unwrap();
        assert_eq!(provider.use_cart().unwrap().products().unwrap().len(), 1);

        provider.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_client_outliving_provider() {
        let provider = CartProvider::start(CartConfig::default(), Arc::new(MemoryStorage::new()))
            .await
            .unwrap();
        let cart = provider.use_cart().unwrap();

        provider.shutdown().await.unwrap();

        assert_eq!(cart.products().unwrap_err(), CartError::NoProvider);
        assert_eq!(
            cart.increment("1".into()).await.unwrap_err(),
            CartError::NoProvider
        );
    }

    #[tokio::test]
    async fn test_shutdown_uninitialized_is_noop() {
        let provider = CartProvider::new(CartConfig::default(), Arc::new(MemoryStorage::new()));
        provider.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_from_config_uses_file_storage() {
        let dir = tempfile::tempdir().unwrap();
        let config = CartConfig {
            storage_path: Some(dir.path().join("storage.json")),
            ..CartConfig::default()
        };

        let provider = CartProvider::from_config(config.clone()).await.unwrap();
        assert_eq!(provider.config(), &config);
        provider
            .use_cart()
            .unwrap()
            .add_to_cart(NewCartItem::new("1", "Mug", "mug.png", 12.0))
            .await
            .unwrap();
        provider.shutdown().await.unwrap();

        let reopened = CartProvider::from_config(config).await.unwrap();
        assert_eq!(reopened.config().storage_key, DEFAULT_STORAGE_KEY);
        let products = reopened.use_cart().unwrap().products().unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].quantity, 1);
        reopened.shutdown().await.unwrap();
    }
}
