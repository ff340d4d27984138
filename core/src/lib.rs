// src/lib.rs

//! orderform: cart, catalog and submission flow for a mini-app ordering form.
//!
//! The form shows a store-specific slice of a fixed catalog, keeps the
//! requested quantity per product, checks per-product minimum order
//! quantities and posts one order to a relay endpoint, which forwards it
//! to an automation webhook.
//!
//!  - [`catalog`]: immutable product table plus the store visibility rule.
//!  - [`cart`]: quantity per product, totals, MOQ validation.
//!  - [`order`]: the submission snapshot sent downstream.
//!  - [`session`]: capability trait over the host SDK.
//!  - [`transport`]: outbound JSON POST, shared with the relay service.
//!  - [`checkout`]: the `Loading -> Ready -> Submitting -> Complete` flow.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod order;
pub mod session;
pub mod transport;

// --- Re-exports for the Public API ---

pub use crate::cart::Cart;
pub use crate::catalog::{Catalog, Product, StoreCode, StoreSelection, VisibilityGroup, VisibilityRule};
pub use crate::checkout::{FormConfig, FormState, OrderForm};
pub use crate::error::{CartError, CatalogError, SessionError, SubmitError, TransportError};
pub use crate::order::{Order, OrderItem};
pub use crate::session::{Identity, Profile, SessionHost};
pub use crate::transport::{HttpTransport, ReqwestTransport, TransportResponse};
