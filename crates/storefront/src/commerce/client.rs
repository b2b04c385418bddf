//! Commerce API client implementation.
//!
//! Uses `graphql_client` documents with `reqwest` for HTTP. Catalog reads
//! are cached using `moka` (5-minute TTL); cart, checkout, and payment
//! operations always hit the network.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use graphql_client::{GraphQLQuery, Response};
use moka::future::Cache;
use secrecy::ExposeSecret;
use tracing::{debug, instrument};

use seastack_core::{CartId, CheckoutId, LineItemId, ProductId, ShippingId};

use crate::config::CommerceConfig;

use super::cache::CacheValue;
use super::conversions::{
    convert_addition, convert_cart, convert_checkout, convert_created_cart, convert_klarna_session,
    convert_line_shipping, convert_product, convert_product_summary, convert_stripe_session,
};
use super::queries::{
    AddItem, CreateCart, CreateCheckout, CreatePaymentKlarna, CreatePaymentStripe, GetCart,
    GetCheckout, GetProducts, GetProductsByIds, UpdateCart, UpdateCheckout, UpdateItem, add_item,
    create_cart, create_checkout, create_payment_klarna, create_payment_stripe, get_cart,
    get_checkout, get_products, get_products_by_ids, update_cart, update_checkout, update_item,
};
use super::types::{
    Cart, CartAddition, Checkout, CreatedCart, KlarnaPaymentSession, LineItemInput,
    LineShippingOptions, Product, ProductSummary, StripePaymentSession,
};
use super::{CheckoutUpdate, CommerceApi, CommerceError};

// =============================================================================
// CommerceClient
// =============================================================================

/// Client for the commerce GraphQL API.
///
/// Provides typed access to the catalog, cart, checkout, and payment
/// operations. Catalog reads are cached for 5 minutes.
#[derive(Clone)]
pub struct CommerceClient {
    inner: Arc<CommerceClientInner>,
}

struct CommerceClientInner {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    cache: Cache<String, CacheValue>,
}

impl CommerceClient {
    /// Create a new commerce API client.
    #[must_use]
    pub fn new(config: &CommerceConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            inner: Arc::new(CommerceClientInner {
                client,
                endpoint: config.endpoint.clone(),
                api_key: config.api_key.expose_secret().to_string(),
                cache,
            }),
        }
    }

    /// Execute a GraphQL operation.
    async fn execute<Q: GraphQLQuery>(
        &self,
        variables: Q::Variables,
    ) -> Result<Q::ResponseData, CommerceError>
    where
        Q::Variables: serde::Serialize,
    {
        let request_body = Q::build_query(variables);
        let operation = request_body.operation_name;

        let response = self
            .inner
            .client
            .post(&self.inner.endpoint)
            .header("Authorization", &self.inner.api_key)
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        // Check for rate limiting
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(CommerceError::RateLimited(retry_after));
        }

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        // Check for non-success status codes
        if !status.is_success() {
            tracing::error!(
                operation,
                status = %status,
                body = %response_text.chars().take(500).collect::<String>(),
                "Commerce API returned non-success status"
            );
            return Err(CommerceError::GraphQL(vec![super::GraphQLError {
                message: format!(
                    "HTTP {status}: {}",
                    response_text.chars().take(200).collect::<String>()
                ),
                locations: vec![],
                path: vec![],
            }]));
        }

        // Parse the response
        let response: Response<Q::ResponseData> = match serde_json::from_str(&response_text) {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(
                    operation,
                    error = %e,
                    body = %response_text.chars().take(500).collect::<String>(),
                    "Failed to parse commerce GraphQL response"
                );
                return Err(CommerceError::Parse(e));
            }
        };

        // Check for GraphQL errors
        if let Some(errors) = response.errors
            && !errors.is_empty()
        {
            // Log the raw errors for debugging
            tracing::debug!(
                operation,
                errors = ?errors,
                "GraphQL errors in response"
            );

            return Err(CommerceError::GraphQL(
                errors
                    .into_iter()
                    .map(|e| super::GraphQLError {
                        message: e.message,
                        locations: e.locations.map_or_else(Vec::new, |locs| {
                            locs.into_iter()
                                .map(|l| super::GraphQLErrorLocation {
                                    line: i64::from(l.line),
                                    column: i64::from(l.column),
                                })
                                .collect()
                        }),
                        path: e.path.map_or_else(Vec::new, |p| {
                            p.into_iter()
                                .map(|fragment| match fragment {
                                    graphql_client::PathFragment::Key(s) => {
                                        serde_json::Value::String(s)
                                    }
                                    graphql_client::PathFragment::Index(i) => {
                                        serde_json::Value::Number(i.into())
                                    }
                                })
                                .collect()
                        }),
                    })
                    .collect(),
            ));
        }

        response.data.ok_or_else(|| {
            tracing::error!(
                operation,
                body = %response_text.chars().take(500).collect::<String>(),
                "Commerce GraphQL response has no data and no errors"
            );
            CommerceError::MissingData(operation)
        })
    }

    // =========================================================================
    // Catalog Methods
    // =========================================================================

    /// Get the product listing for a currency/country pair.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn products(
        &self,
        currency: Option<&str>,
        shipping_country: Option<&str>,
    ) -> Result<Vec<ProductSummary>, CommerceError> {
        let cache_key = format!(
            "products:{}:{}",
            currency.unwrap_or(""),
            shipping_country.unwrap_or("")
        );

        // Check cache
        if let Some(CacheValue::Products(products)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for products");
            return Ok(products);
        }

        let variables = get_products::Variables {
            currency: currency.map(str::to_string),
            shipping_country_code: shipping_country.map(str::to_string),
        };

        let data = self.execute::<GetProducts>(variables).await?;

        let products: Vec<ProductSummary> = data
            .channel
            .get_products
            .into_iter()
            .map(convert_product_summary)
            .collect();

        // Cache the result
        self.inner
            .cache
            .insert(cache_key, CacheValue::Products(products.clone()))
            .await;

        Ok(products)
    }

    /// Get full details for a set of products.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn product_details(
        &self,
        product_ids: &[ProductId],
        currency: Option<&str>,
        shipping_country: Option<&str>,
    ) -> Result<Vec<Product>, CommerceError> {
        let ids: Vec<i64> = product_ids.iter().map(ProductId::as_i64).collect();
        let cache_key = format!(
            "product-details:{ids:?}:{}:{}",
            currency.unwrap_or(""),
            shipping_country.unwrap_or("")
        );

        // Check cache
        if let Some(CacheValue::ProductDetails(products)) = self.inner.cache.get(&cache_key).await
        {
            debug!("Cache hit for product details");
            return Ok(products);
        }

        let variables = get_products_by_ids::Variables {
            product_ids: ids,
            currency: currency.map(str::to_string),
            shipping_country_code: shipping_country.map(str::to_string),
        };

        let data = self.execute::<GetProductsByIds>(variables).await?;

        let products: Vec<Product> = data
            .channel
            .get_products_by_ids
            .into_iter()
            .map(convert_product)
            .collect();

        // Cache the result
        self.inner
            .cache
            .insert(cache_key, CacheValue::ProductDetails(products.clone()))
            .await;

        Ok(products)
    }

    /// Get full details for a single product.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is unknown or the API request fails.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn product(
        &self,
        product_id: ProductId,
        currency: Option<&str>,
        shipping_country: Option<&str>,
    ) -> Result<Product, CommerceError> {
        let products = self
            .product_details(&[product_id], currency, shipping_country)
            .await?;

        products
            .into_iter()
            .find(|p| p.id == product_id)
            .ok_or_else(|| CommerceError::NotFound(format!("Product not found: {product_id}")))
    }

    /// Invalidate all cached catalog data.
    pub async fn invalidate_catalog(&self) {
        self.inner.cache.invalidate_all();
        self.inner.cache.run_pending_tasks().await;
    }

    // =========================================================================
    // Cart Methods (not cached - mutable state)
    // =========================================================================

    /// Create a new cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart creation fails.
    #[instrument(skip(self), fields(customer_session_id = %customer_session_id))]
    pub async fn create_cart(
        &self,
        customer_session_id: &str,
        currency: &str,
    ) -> Result<CreatedCart, CommerceError> {
        let variables = create_cart::Variables {
            customer_session_id: customer_session_id.to_string(),
            currency: currency.to_string(),
        };

        let data = self.execute::<CreateCart>(variables).await?;

        Ok(convert_created_cart(data.cart.create_cart))
    }

    /// Set the cart's shipping country and return the refreshed cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart update fails.
    #[instrument(skip(self), fields(cart_id = %cart_id))]
    pub async fn update_cart(
        &self,
        cart_id: &CartId,
        shipping_country: &str,
    ) -> Result<Cart, CommerceError> {
        let variables = update_cart::Variables {
            cart_id: cart_id.as_str().to_string(),
            shipping_country: shipping_country.to_string(),
        };

        let data = self.execute::<UpdateCart>(variables).await?;

        Ok(convert_cart(data.cart.update_cart))
    }

    /// Add line items to a cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the mutation fails.
    #[instrument(skip(self, line_items), fields(cart_id = %cart_id))]
    pub async fn add_item(
        &self,
        cart_id: &CartId,
        line_items: Vec<LineItemInput>,
    ) -> Result<CartAddition, CommerceError> {
        let variables = add_item::Variables {
            cart_id: cart_id.as_str().to_string(),
            line_items,
        };

        let data = self.execute::<AddItem>(variables).await?;

        Ok(convert_addition(data.cart.add_item))
    }

    /// Fetch the available shipping options per line item.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart lookup fails.
    #[instrument(skip(self), fields(cart_id = %cart_id))]
    pub async fn cart_shipping_options(
        &self,
        cart_id: &CartId,
    ) -> Result<Vec<LineShippingOptions>, CommerceError> {
        let variables = get_cart::Variables {
            cart_id: cart_id.as_str().to_string(),
        };

        let data = self.execute::<GetCart>(variables).await?;

        Ok(data
            .cart
            .get_cart
            .line_items
            .into_iter()
            .map(convert_line_shipping)
            .collect())
    }

    /// Select a shipping option for one line item.
    ///
    /// # Errors
    ///
    /// Returns an error if the mutation fails.
    #[instrument(skip(self), fields(cart_id = %cart_id, line_item_id = %line_item_id))]
    pub async fn update_item_shipping(
        &self,
        cart_id: &CartId,
        line_item_id: &LineItemId,
        shipping_id: &ShippingId,
    ) -> Result<(), CommerceError> {
        let variables = update_item::Variables {
            cart_id: cart_id.as_str().to_string(),
            cart_item_id: line_item_id.as_str().to_string(),
            qty: None,
            shipping_id: Some(shipping_id.as_str().to_string()),
        };

        self.execute::<UpdateItem>(variables).await?;

        Ok(())
    }

    // =========================================================================
    // Checkout Methods
    // =========================================================================

    /// Create a checkout aggregate from a cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the mutation fails.
    #[instrument(skip(self), fields(cart_id = %cart_id))]
    pub async fn create_checkout(&self, cart_id: &CartId) -> Result<Checkout, CommerceError> {
        let variables = create_checkout::Variables {
            cart_id: cart_id.as_str().to_string(),
        };

        let data = self.execute::<CreateCheckout>(variables).await?;

        Ok(convert_checkout(data.checkout.create_checkout))
    }

    /// Update an existing checkout with buyer details.
    ///
    /// # Errors
    ///
    /// Returns an error if the mutation fails.
    #[instrument(skip(self, update), fields(checkout_id = %checkout_id))]
    pub async fn update_checkout(
        &self,
        checkout_id: &CheckoutId,
        update: CheckoutUpdate,
    ) -> Result<Checkout, CommerceError> {
        let variables = update_checkout::Variables {
            checkout_id: checkout_id.as_str().to_string(),
            email: update.email,
            billing_address: update.billing_address,
            shipping_address: update.shipping_address,
            buyer_accepts_purchase_conditions: update.accepts_purchase_conditions,
            buyer_accepts_terms_conditions: update.accepts_terms_conditions,
        };

        let data = self.execute::<UpdateCheckout>(variables).await?;

        Ok(convert_checkout(data.checkout.update_checkout))
    }

    /// Fetch an existing checkout.
    ///
    /// # Errors
    ///
    /// Returns an error if the checkout is not found or the request fails.
    #[instrument(skip(self), fields(checkout_id = %checkout_id))]
    pub async fn get_checkout(&self, checkout_id: &CheckoutId) -> Result<Checkout, CommerceError> {
        let variables = get_checkout::Variables {
            checkout_id: checkout_id.as_str().to_string(),
        };

        let data = self.execute::<GetCheckout>(variables).await?;

        data.checkout
            .get_checkout
            .map(convert_checkout)
            .ok_or_else(|| CommerceError::NotFound(format!("Checkout not found: {checkout_id}")))
    }

    // =========================================================================
    // Payment Methods
    // =========================================================================

    /// Create a Stripe payment session (hosted checkout link).
    ///
    /// # Errors
    ///
    /// Returns an error if the mutation fails.
    #[instrument(skip(self, email), fields(checkout_id = %checkout_id))]
    pub async fn create_payment_stripe(
        &self,
        checkout_id: &CheckoutId,
        email: &str,
        payment_method: &str,
        success_url: &str,
    ) -> Result<StripePaymentSession, CommerceError> {
        let variables = create_payment_stripe::Variables {
            checkout_id: checkout_id.as_str().to_string(),
            success_url: success_url.to_string(),
            payment_method: payment_method.to_string(),
            email: email.to_string(),
        };

        let data = self.execute::<CreatePaymentStripe>(variables).await?;

        Ok(convert_stripe_session(data.payment.create_payment_stripe))
    }

    /// Create a Klarna payment session (server-rendered widget).
    ///
    /// # Errors
    ///
    /// Returns an error if the mutation fails.
    #[instrument(skip(self, email), fields(checkout_id = %checkout_id))]
    pub async fn create_payment_klarna(
        &self,
        checkout_id: &CheckoutId,
        country_code: &str,
        href: &str,
        email: &str,
    ) -> Result<KlarnaPaymentSession, CommerceError> {
        let variables = create_payment_klarna::Variables {
            checkout_id: checkout_id.as_str().to_string(),
            country_code: country_code.to_string(),
            href: href.to_string(),
            email: email.to_string(),
        };

        let data = self.execute::<CreatePaymentKlarna>(variables).await?;

        Ok(convert_klarna_session(data.payment.create_payment_klarna))
    }
}

#[async_trait]
impl CommerceApi for CommerceClient {
    async fn create_cart(
        &self,
        customer_session_id: &str,
        currency: &str,
    ) -> Result<CreatedCart, CommerceError> {
        Self::create_cart(self, customer_session_id, currency).await
    }

    async fn update_cart(
        &self,
        cart_id: &CartId,
        shipping_country: &str,
    ) -> Result<Cart, CommerceError> {
        Self::update_cart(self, cart_id, shipping_country).await
    }

    async fn add_item(
        &self,
        cart_id: &CartId,
        line_items: Vec<LineItemInput>,
    ) -> Result<CartAddition, CommerceError> {
        Self::add_item(self, cart_id, line_items).await
    }

    async fn cart_shipping_options(
        &self,
        cart_id: &CartId,
    ) -> Result<Vec<LineShippingOptions>, CommerceError> {
        Self::cart_shipping_options(self, cart_id).await
    }

    async fn update_item_shipping(
        &self,
        cart_id: &CartId,
        line_item_id: &LineItemId,
        shipping_id: &ShippingId,
    ) -> Result<(), CommerceError> {
        Self::update_item_shipping(self, cart_id, line_item_id, shipping_id).await
    }

    async fn create_checkout(&self, cart_id: &CartId) -> Result<Checkout, CommerceError> {
        Self::create_checkout(self, cart_id).await
    }

    async fn update_checkout(
        &self,
        checkout_id: &CheckoutId,
        update: CheckoutUpdate,
    ) -> Result<Checkout, CommerceError> {
        Self::update_checkout(self, checkout_id, update).await
    }

    async fn get_checkout(&self, checkout_id: &CheckoutId) -> Result<Checkout, CommerceError> {
        Self::get_checkout(self, checkout_id).await
    }

    async fn create_payment_stripe(
        &self,
        checkout_id: &CheckoutId,
        email: &str,
        payment_method: &str,
        success_url: &str,
    ) -> Result<StripePaymentSession, CommerceError> {
        Self::create_payment_stripe(self, checkout_id, email, payment_method, success_url).await
    }

    async fn create_payment_klarna(
        &self,
        checkout_id: &CheckoutId,
        country_code: &str,
        href: &str,
        email: &str,
    ) -> Result<KlarnaPaymentSession, CommerceError> {
        Self::create_payment_klarna(self, checkout_id, country_code, href, email).await
    }
}
