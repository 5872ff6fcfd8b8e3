//! The remote cart service boundary.
//!
//! The service is a black box to the rest of the crate: it is reached
//! through the request protocol in [`protocol`], served in-process by
//! [`memory::InMemoryCartService`], and replaced in tests by the doubles
//! in [`mock`].

pub mod memory;
pub mod mock;
pub mod protocol;

pub use memory::{CatalogProduct, InMemoryCartService};
pub use protocol::{CartRequest, Response, ServiceError};
