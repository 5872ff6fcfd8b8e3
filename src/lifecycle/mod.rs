//! Session wiring and observability.

pub mod session;
pub mod tracing;

pub use session::CartSession;
pub use tracing::setup_tracing;
