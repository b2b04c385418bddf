//! Seastack Storefront - headless storefront client SDK.
//!
//! Product browsing, cart management, multi-step checkout, and third-party
//! payment initiation against a remote GraphQL commerce API. The crate is
//! UI-agnostic: rendering and navigation belong to the embedding app, which
//! drives the state machines here and feeds back user input and browser
//! navigation events.
//!
//! # Architecture
//!
//! - [`commerce`] - GraphQL API client and domain types; the remote service
//!   owns cart, pricing, shipping, and checkout state
//! - [`cart`] - local cart mirror with a pure reducer and an explicit
//!   local-id/remote-id line mapping
//! - [`checkout`] - the Cart → Shipping → Billing → Review → Payment
//!   workflow controller and its steps
//! - [`payment`] - payment initiation lifecycle with Stripe and Klarna
//!   provider strategies
//! - [`config`] - environment configuration with secret validation
//!
//! # Concurrency model
//!
//! Single-threaded cooperative: every remote operation is async and awaited
//! sequentially within its workflow step. No step issues concurrent calls
//! against the same cart or checkout aggregate, so remote writes never
//! interleave.
//!
//! # Example
//!
//! ```rust,ignore
//! use seastack_storefront::cart::{CartStore, add_to_cart};
//! use seastack_storefront::checkout::{CheckoutFlow, ShippingForm, TermsAcceptance};
//! use seastack_storefront::commerce::CommerceClient;
//! use seastack_storefront::config::StorefrontConfig;
//!
//! let config = StorefrontConfig::from_env()?;
//! let client = CommerceClient::new(&config.commerce);
//! let mut store = CartStore::new(&config.default_country, &config.default_currency);
//!
//! add_to_cart(&client, &mut store, request).await?;
//!
//! let mut flow = CheckoutFlow::new();
//! flow.proceed_to_shipping(&store)?;
//! flow.submit_shipping(shipping_form);
//! let checkout = flow.submit_review(&client, &mut store, terms).await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod checkout;
pub mod commerce;
pub mod config;
pub mod payment;

pub use commerce::{CommerceApi, CommerceClient, CommerceError};
pub use config::StorefrontConfig;
