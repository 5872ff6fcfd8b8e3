//! Error types for the synchronization core.

use crate::service::ServiceError;
use thiserror::Error;

/// Failures surfaced by cart operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    /// A mutating call was attempted without a session. Refused locally,
    /// before any remote call, and never recorded into cart state.
    #[error("sign in to manage your cart")]
    Unauthenticated,

    /// The service reported a failure. The message is recorded into cart
    /// state and meant to be surfaced to the user transiently.
    #[error("{message}")]
    Remote { message: String },

    /// The service answered with something unparseable. Fatal class:
    /// distinguishable from "service said no" and never coerced into the
    /// normal failure path.
    #[error("cart service protocol error: {0}")]
    Protocol(ServiceError),
}
