//! # Observability & Tracing
//!
//! Structured logging for the cart core, built on the `tracing` crate.
//!
//! ## Configuration
//!
//! [`setup_tracing`] installs a compact subscriber that hides module paths
//! (`with_target(false)`) and reads its filter from `RUST_LOG`.
//!
//! ```bash
//! # Compact logs
//! RUST_LOG=info cargo test
//!
//! # Show request payloads at the service boundary
//! RUST_LOG=debug cargo test
//!
//! # Filter to the synchronization core only
//! RUST_LOG=storefront_cart::sync=debug cargo test
//! ```
//!
//! ## What Gets Traced
//!
//! - **Service lifecycle**: startup, per-request handling, shutdown
//! - **Synchronization**: reloads, discarded stale responses, optimistic
//!   removals, failures that keep previous items
//! - **Auth edges**: sign-in/sign-out and the transitions they drive
//!
//! With `RUST_LOG=info` a sign-in followed by an add looks like:
//!
//! ```text
//! INFO Session signed in
//! INFO Cart reloaded count=0
//! INFO Cart reloaded count=1
//! ```
//!
//! and `RUST_LOG=debug` adds the service-side view:
//!
//! ```text
//! DEBUG Sending add request product_id="p1" quantity=2
//! DEBUG Add product_id="p1" quantity=2
//! DEBUG Sending fetch request
//! DEBUG Fetch count=1
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // Keep log lines short; events carry structured fields instead
        .compact()
        .init();
}
