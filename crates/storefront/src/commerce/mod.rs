//! Commerce GraphQL API client.
//!
//! # Architecture
//!
//! - Uses the `graphql_client` crate for typed GraphQL documents, executed
//!   over `reqwest` (see [`CommerceClient`])
//! - The remote service is the source of truth for cart, pricing, shipping
//!   and checkout state - no local sync, direct API calls
//! - Catalog reads are cached in-memory via `moka` (5 minute TTL); cart and
//!   checkout operations are never cached
//! - The checkout workflow consumes the operations through the
//!   [`CommerceApi`] trait, so tests can substitute a scripted double
//!
//! # Example
//!
//! ```rust,ignore
//! use seastack_storefront::commerce::CommerceClient;
//!
//! let client = CommerceClient::new(&config.commerce);
//!
//! let created = client.create_cart("session-1", "NOK").await?;
//! let addition = client
//!     .add_item(&created.cart_id, vec![LineItemInput::new(product.id, 1)])
//!     .await?;
//! ```

mod cache;
mod client;
mod conversions;
pub mod queries;
pub mod types;

pub use client::CommerceClient;

use async_trait::async_trait;
use thiserror::Error;

use seastack_core::{CartId, CheckoutId, LineItemId, ShippingId};

use types::{
    Address, Cart, CartAddition, Checkout, CreatedCart, KlarnaPaymentSession, LineItemInput,
    LineShippingOptions, StripePaymentSession,
};

/// Errors that can occur when interacting with the commerce API.
#[derive(Debug, Error)]
pub enum CommerceError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// GraphQL query returned errors.
    #[error("GraphQL errors: {}", format_graphql_errors(.0))]
    GraphQL(Vec<GraphQLError>),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limited by the commerce API.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Response carried neither the requested data nor errors.
    #[error("Missing data in {0} response")]
    MissingData(&'static str),
}

/// A GraphQL error returned by the commerce API.
#[derive(Debug, Clone)]
pub struct GraphQLError {
    /// Error message.
    pub message: String,
    /// Source locations in the query.
    pub locations: Vec<GraphQLErrorLocation>,
    /// Path to the error in the response.
    pub path: Vec<serde_json::Value>,
}

/// Location in a GraphQL query where an error occurred.
#[derive(Debug, Clone)]
pub struct GraphQLErrorLocation {
    /// Line number (1-indexed).
    pub line: i64,
    /// Column number (1-indexed).
    pub column: i64,
}

fn format_graphql_errors(errors: &[GraphQLError]) -> String {
    if errors.is_empty() {
        return "(no error details provided)".to_string();
    }

    errors
        .iter()
        .enumerate()
        .map(|(i, e)| {
            let mut parts = Vec::new();

            // Include message if present
            if !e.message.is_empty() {
                parts.push(e.message.clone());
            }

            // Include path if present
            if !e.path.is_empty() {
                let path_str = e
                    .path
                    .iter()
                    .map(|p| match p {
                        serde_json::Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(".");
                parts.push(format!("path: {path_str}"));
            }

            // Include location if present
            if let Some(loc) = e.locations.first() {
                parts.push(format!("at line {}:{}", loc.line, loc.column));
            }

            if parts.is_empty() {
                format!("[error {}]: (no details)", i + 1)
            } else {
                parts.join(" ")
            }
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// Fields to set on an existing checkout.
///
/// `None` leaves the corresponding remote field untouched.
#[derive(Debug, Clone, Default)]
pub struct CheckoutUpdate {
    /// Buyer email address.
    pub email: Option<String>,
    /// Billing address.
    pub billing_address: Option<Address>,
    /// Shipping address.
    pub shipping_address: Option<Address>,
    /// Buyer accepted the terms and conditions.
    pub accepts_terms_conditions: Option<bool>,
    /// Buyer accepted the purchase conditions.
    pub accepts_purchase_conditions: Option<bool>,
}

/// The logical commerce operations the storefront consumes.
///
/// Each operation is an opaque async request/response call; the wire format
/// behind it belongs to the client implementation. The checkout workflow is
/// written against this trait so its sequencing and failure handling can be
/// tested without a network.
#[async_trait]
pub trait CommerceApi: Send + Sync {
    /// Create a new cart for a customer session.
    async fn create_cart(
        &self,
        customer_session_id: &str,
        currency: &str,
    ) -> Result<CreatedCart, CommerceError>;

    /// Set the cart's shipping country and return the refreshed cart.
    async fn update_cart(
        &self,
        cart_id: &CartId,
        shipping_country: &str,
    ) -> Result<Cart, CommerceError>;

    /// Add line items to a cart.
    async fn add_item(
        &self,
        cart_id: &CartId,
        line_items: Vec<LineItemInput>,
    ) -> Result<CartAddition, CommerceError>;

    /// Fetch the available shipping options per line item.
    async fn cart_shipping_options(
        &self,
        cart_id: &CartId,
    ) -> Result<Vec<LineShippingOptions>, CommerceError>;

    /// Select a shipping option for one line item.
    async fn update_item_shipping(
        &self,
        cart_id: &CartId,
        line_item_id: &LineItemId,
        shipping_id: &ShippingId,
    ) -> Result<(), CommerceError>;

    /// Create a checkout aggregate from a cart.
    async fn create_checkout(&self, cart_id: &CartId) -> Result<Checkout, CommerceError>;

    /// Update an existing checkout with buyer details.
    async fn update_checkout(
        &self,
        checkout_id: &CheckoutId,
        update: CheckoutUpdate,
    ) -> Result<Checkout, CommerceError>;

    /// Fetch an existing checkout.
    async fn get_checkout(&self, checkout_id: &CheckoutId) -> Result<Checkout, CommerceError>;

    /// Create a Stripe payment session (hosted checkout link).
    async fn create_payment_stripe(
        &self,
        checkout_id: &CheckoutId,
        email: &str,
        payment_method: &str,
        success_url: &str,
    ) -> Result<StripePaymentSession, CommerceError>;

    /// Create a Klarna payment session (server-rendered widget).
    async fn create_payment_klarna(
        &self,
        checkout_id: &CheckoutId,
        country_code: &str,
        href: &str,
        email: &str,
    ) -> Result<KlarnaPaymentSession, CommerceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commerce_error_display() {
        let err = CommerceError::NotFound("cart-123".to_string());
        assert_eq!(err.to_string(), "Not found: cart-123");
    }

    #[test]
    fn test_graphql_error_formatting() {
        let errors = vec![
            GraphQLError {
                message: "Field not found".to_string(),
                locations: vec![],
                path: vec![],
            },
            GraphQLError {
                message: "Invalid ID".to_string(),
                locations: vec![],
                path: vec![],
            },
        ];
        let err = CommerceError::GraphQL(errors);
        assert_eq!(
            err.to_string(),
            "GraphQL errors: Field not found; Invalid ID"
        );
    }

    #[test]
    fn test_graphql_error_empty_messages() {
        // Empty message but with path and location info
        let errors = vec![GraphQLError {
            message: String::new(),
            locations: vec![GraphQLErrorLocation { line: 5, column: 10 }],
            path: vec![
                serde_json::Value::String("Cart".to_string()),
                serde_json::Value::Number(0.into()),
            ],
        }];
        let err = CommerceError::GraphQL(errors);
        assert_eq!(err.to_string(), "GraphQL errors: path: Cart.0 at line 5:10");
    }

    #[test]
    fn test_graphql_error_no_details() {
        let errors = vec![GraphQLError {
            message: String::new(),
            locations: vec![],
            path: vec![],
        }];
        let err = CommerceError::GraphQL(errors);
        assert_eq!(err.to_string(), "GraphQL errors: [error 1]: (no details)");
    }

    #[test]
    fn test_graphql_error_empty_vec() {
        let err = CommerceError::GraphQL(vec![]);
        assert_eq!(
            err.to_string(),
            "GraphQL errors: (no error details provided)"
        );
    }

    #[test]
    fn test_rate_limited_error() {
        let err = CommerceError::RateLimited(60);
        assert_eq!(err.to_string(), "Rate limited, retry after 60 seconds");
    }
}
