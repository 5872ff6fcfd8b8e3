//! # Storefront Cart
//!
//! > **The cart synchronization core of a marketplace storefront.**
//!
//! This crate implements the stateful heart of a storefront cart: the
//! local state container, its reconciliation with a remote cart service,
//! the selection/availability logic layered on top, and the checkout
//! handoff contract. Rendering, routing and styling are someone else's
//! problem. The crate exposes the state, intents and derived queries a
//! UI layer binds to.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### Reads reload, removals are optimistic
//!
//! Additions always re-derive local state from the service, because the
//! service owns quantity merging and price snapshots. Removal is the one
//! operation applied optimistically: its effect (absence) cannot be
//! contradicted by server-side recomputation. This asymmetry is
//! intentional and load-bearing.
//!
//! ### One writer, many observers
//!
//! [`store::CartState`] has private fields and a fixed set of synchronous,
//! infallible transitions. The synchronization core is the only component
//! that runs them; every other component reads snapshots. There is no
//! global singleton: [`lifecycle::CartSession`] constructs the whole
//! object graph explicitly and hands out clones.
//!
//! ### Last-issued load wins
//!
//! Concurrent reloads are resolved with a sequence number: a response that
//! arrives after a newer load was issued is discarded, so local state
//! reflects the most recently *issued* request rather than whichever
//! response happened to resolve last.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Boundary ([`service`], [`clients`])
//! The remote cart service as this crate sees it: the request protocol
//! ([`service::protocol`]), an in-process server ([`service::memory`]),
//! test doubles ([`service::mock`]), and the typed
//! [`CartService`](clients::CartService) seam with its channel-transport
//! implementation [`CartServiceClient`](clients::CartServiceClient).
//!
//! ### 2. The State ([`store`], [`model`])
//! [`CartState`](store::CartState) and its transitions; the closed item
//! types ([`CartItem`](model::CartItem), [`ItemStatus`](model::ItemStatus))
//! and the [`CheckoutPayload`](model::CheckoutPayload) handoff contract.
//!
//! ### 3. The Orchestrator ([`sync`])
//! [`CartSync`](sync::CartSync) turns UI intents into remote calls and
//! state transitions, gates everything on the [`auth`] signal, and exposes
//! derived queries (`is_in_cart`, `total_price`).
//!
//! ### 4. The Projection ([`selection`])
//! [`CheckoutSelection`](selection::CheckoutSelection): the page-local,
//! availability-gated selection set, bulk delete, and checkout handoff.
//!
//! ### 5. The Wiring ([`lifecycle`])
//! [`CartSession`](lifecycle::CartSession) for one-cart-per-app lifetime
//! management, and [`setup_tracing`](lifecycle::setup_tracing) for
//! structured logs.
//!
//! ## 🧪 Testing
//!
//! See [`service::mock`] for scripting the service in tests: expectation
//! queues for the common case, raw channel helpers when response timing
//! matters (racing loads, partial bulk failures).

pub mod auth;
pub mod clients;
pub mod lifecycle;
pub mod model;
pub mod selection;
pub mod service;
pub mod store;
pub mod sync;
