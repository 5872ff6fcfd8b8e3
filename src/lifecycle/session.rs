use crate::auth::{auth_channel, AuthHandle};
use crate::clients::CartServiceClient;
use crate::service::memory::{CatalogProduct, InMemoryCartService};
use crate::sync::CartSync;
use tracing::{error, info};

/// One cart per running app.
///
/// `CartSession` is responsible for:
/// - **Lifecycle Management**: starting and stopping the service task and
///   the auth watcher
/// - **Dependency Wiring**: the synchronization core gets the service
///   client and the auth signal by explicit construction, with no hidden
///   global singletons
///
/// The UI tree receives `cart` (and clones of it) by reference; observers
/// read snapshots and never mutate state directly.
///
/// # Example
///
/// ```ignore
/// let session = CartSession::new(catalog);
/// session.auth.sign_in();
/// session.cart.add(&"p1".into(), 1).await?;
/// session.shutdown().await?;
/// ```
pub struct CartSession {
    /// The synchronization core backing every cart view.
    pub cart: CartSync<CartServiceClient>,

    /// Writer half of the session signal.
    pub auth: AuthHandle,

    /// Task handles for the service and the auth watcher (used for
    /// graceful shutdown).
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl CartSession {
    /// Starts the in-process cart service and the auth watcher, signed out.
    ///
    /// Sign-in populates the cart with one full reload; sign-out clears it
    /// locally. Both edges are driven by the spawned watcher.
    pub fn new(catalog: impl IntoIterator<Item = CatalogProduct>) -> Self {
        let (service, client) = InMemoryCartService::new(32, catalog);
        let (auth, auth_receiver) = auth_channel();
        let cart = CartSync::new(client, auth_receiver);

        let service_handle = tokio::spawn(service.run());
        let watcher_handle = tokio::spawn(cart.clone().watch_auth());

        Self {
            cart,
            auth,
            handles: vec![service_handle, watcher_handle],
        }
    }

    /// Gracefully shuts down the session.
    ///
    /// Dropping the auth handle stops the watcher; the watcher's clone of
    /// the cart was the last client of the service channel, so the service
    /// loop then exits too.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down cart session...");

        drop(self.cart);
        drop(self.auth);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Session task failed: {:?}", e);
                return Err(format!("Session task failed: {:?}", e));
            }
        }

        info!("Cart session shutdown complete.");
        Ok(())
    }
}
