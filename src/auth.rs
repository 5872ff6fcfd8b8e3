//! The session signal the synchronization core observes.
//!
//! The auth service proper (tokens, refresh, login forms) lives elsewhere;
//! the cart core only needs its observable surface: a boolean
//! "is authenticated" signal with edge transitions.

use std::sync::Arc;
use tokio::sync::watch;
use tracing::info;

/// Writer half of the session signal. Cheap to clone.
#[derive(Debug, Clone)]
pub struct AuthHandle {
    sender: Arc<watch::Sender<bool>>,
}

impl AuthHandle {
    pub fn sign_in(&self) {
        let was = self.sender.send_replace(true);
        if !was {
            info!("Session signed in");
        }
    }

    pub fn sign_out(&self) {
        let was = self.sender.send_replace(false);
        if was {
            info!("Session signed out");
        }
    }

    pub fn is_authenticated(&self) -> bool {
        *self.sender.borrow()
    }

    /// A fresh receiver for another observer.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.sender.subscribe()
    }
}

/// Creates the session signal, initially signed out.
pub fn auth_channel() -> (AuthHandle, watch::Receiver<bool>) {
    let (sender, receiver) = watch::channel(false);
    (
        AuthHandle {
            sender: Arc::new(sender),
        },
        receiver,
    )
}
