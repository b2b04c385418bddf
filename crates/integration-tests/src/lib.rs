//! Test support for the Seastack workspace.
//!
//! [`MockCommerce`] is a scripted stand-in for the remote commerce service:
//! it records every operation in call order, returns canned data, and can be
//! told to fail specific operations. The checkout and payment workflow tests
//! use it to pin call sequencing and failure behavior without a network.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use rust_decimal::Decimal;

use seastack_core::{CartId, CheckoutId, LineItemId, Money, ProductId, ShippingId, VariantId};
use seastack_storefront::cart::{AddToCartRequest, CartAction, CartItem, CartStore, LineRef};
use seastack_storefront::commerce::types::{
    Address, Cart, CartAddition, Checkout, CreatedCart, KlarnaPaymentSession, LineItemInput,
    LineShippingOptions, Price, ShippingOption, StripePaymentSession,
};
use seastack_storefront::commerce::{
    CheckoutUpdate, CommerceApi, CommerceError, GraphQLError,
};

/// A remote line the mock cart reports, with the shipping countries it can
/// be delivered to.
#[derive(Debug, Clone)]
pub struct MockLine {
    pub line_item_id: LineItemId,
    pub product_id: ProductId,
    pub variant_id: Option<VariantId>,
    pub shipping_countries: Vec<String>,
}

impl MockLine {
    #[must_use]
    pub fn new(line_id: &str, product_id: i64, countries: &[&str]) -> Self {
        Self {
            line_item_id: LineItemId::new(line_id),
            product_id: ProductId::new(product_id),
            variant_id: None,
            shipping_countries: countries.iter().map(|c| (*c).to_string()).collect(),
        }
    }
}

/// Scripted commerce API double.
#[derive(Debug, Default)]
pub struct MockCommerce {
    calls: Mutex<Vec<String>>,
    fail_on: Mutex<HashSet<&'static str>>,
    lines: Mutex<Vec<MockLine>>,
    payment_sessions: Mutex<u32>,
}

impl MockCommerce {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the remote cart lines (and their shipping countries).
    pub fn set_lines(&self, lines: Vec<MockLine>) {
        *self.lines.lock().expect("mock lines lock") = lines;
    }

    /// Make one operation fail with a scripted GraphQL error.
    pub fn fail_on(&self, operation: &'static str) {
        self.fail_on
            .lock()
            .expect("mock fail_on lock")
            .insert(operation);
    }

    /// The operations invoked so far, in order. Arguments that matter to
    /// sequencing are appended after a colon.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("mock calls lock").clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().expect("mock calls lock").push(call.into());
    }

    fn check_failure(&self, operation: &'static str) -> Result<(), CommerceError> {
        if self.fail_on.lock().expect("mock fail_on lock").contains(operation) {
            return Err(CommerceError::GraphQL(vec![GraphQLError {
                message: format!("scripted failure in {operation}"),
                locations: vec![],
                path: vec![],
            }]));
        }
        Ok(())
    }

    fn price(amount: Decimal) -> Price {
        Price {
            amount,
            currency_code: "NOK".to_string(),
            amount_incl_taxes: None,
            tax_amount: None,
            tax_rate: None,
            discount: None,
            compare_at: None,
        }
    }

    fn checkout(&self, id: &str) -> Checkout {
        Checkout {
            id: CheckoutId::new(id),
            email: None,
            status: Some("active".to_string()),
            checkout_url: None,
            success_url: None,
            cancel_url: None,
            payment_method: None,
            buyer_accepts_terms_conditions: false,
            buyer_accepts_purchase_conditions: false,
            billing_address: None,
            shipping_address: None,
            available_payment_methods: vec![],
            discount_code: None,
            cart: None,
            totals: None,
            created_at: None,
            updated_at: None,
        }
    }
}

#[async_trait]
impl CommerceApi for MockCommerce {
    async fn create_cart(
        &self,
        customer_session_id: &str,
        _currency: &str,
    ) -> Result<CreatedCart, CommerceError> {
        self.record("create_cart");
        self.check_failure("create_cart")?;
        Ok(CreatedCart {
            cart_id: CartId::new("cart-1"),
            customer_session_id: customer_session_id.to_string(),
            shipping_country: None,
        })
    }

    async fn update_cart(
        &self,
        cart_id: &CartId,
        shipping_country: &str,
    ) -> Result<Cart, CommerceError> {
        self.record(format!("update_cart:{shipping_country}"));
        self.check_failure("update_cart")?;
        let lines = self.lines.lock().expect("mock lines lock").clone();
        Ok(Cart {
            cart_id: cart_id.clone(),
            customer_session_id: "session-1".to_string(),
            shipping_country: Some(shipping_country.to_string()),
            currency: Some("NOK".to_string()),
            line_items: lines
                .iter()
                .map(|line| seastack_storefront::commerce::types::RemoteLineItem {
                    id: line.line_item_id.clone(),
                    product_id: line.product_id,
                    variant_id: line.variant_id,
                    title: "Scripted item".to_string(),
                    variant_title: None,
                    supplier: None,
                    sku: None,
                    barcode: None,
                    brand: None,
                    image: None,
                    variant: vec![],
                    quantity: 1,
                    price: Self::price(Decimal::new(1000, 2)),
                    shipping: None,
                })
                .collect(),
            available_shipping_countries: vec!["NO".to_string(), "SE".to_string()],
            subtotal: None,
            shipping: None,
        })
    }

    async fn add_item(
        &self,
        _cart_id: &CartId,
        line_items: Vec<LineItemInput>,
    ) -> Result<CartAddition, CommerceError> {
        self.record("add_item");
        self.check_failure("add_item")?;
        Ok(CartAddition {
            subtotal: None,
            line_items: line_items
                .into_iter()
                .map(|line| seastack_storefront::commerce::types::AddedLineItem {
                    product_id: line.product_id,
                    title: "Scripted item".to_string(),
                    quantity: line.quantity,
                    price: Self::price(Decimal::new(1000, 2)),
                })
                .collect(),
        })
    }

    async fn cart_shipping_options(
        &self,
        _cart_id: &CartId,
    ) -> Result<Vec<LineShippingOptions>, CommerceError> {
        self.record("cart_shipping_options");
        self.check_failure("cart_shipping_options")?;
        let lines = self.lines.lock().expect("mock lines lock").clone();
        Ok(lines
            .iter()
            .map(|line| LineShippingOptions {
                line_item_id: line.line_item_id.clone(),
                available_shippings: line
                    .shipping_countries
                    .iter()
                    .map(|country| ShippingOption {
                        id: ShippingId::new(format!("ship-{country}")),
                        name: "Standard".to_string(),
                        description: None,
                        country_code: country.clone(),
                        price: Self::price(Decimal::new(4900, 2)),
                    })
                    .collect(),
            })
            .collect())
    }

    async fn update_item_shipping(
        &self,
        _cart_id: &CartId,
        line_item_id: &LineItemId,
        shipping_id: &ShippingId,
    ) -> Result<(), CommerceError> {
        self.record(format!("update_item_shipping:{line_item_id}:{shipping_id}"));
        self.check_failure("update_item_shipping")?;
        Ok(())
    }

    async fn create_checkout(&self, _cart_id: &CartId) -> Result<Checkout, CommerceError> {
        self.record("create_checkout");
        self.check_failure("create_checkout")?;
        Ok(self.checkout("checkout-1"))
    }

    async fn update_checkout(
        &self,
        checkout_id: &CheckoutId,
        update: CheckoutUpdate,
    ) -> Result<Checkout, CommerceError> {
        self.record("update_checkout");
        self.check_failure("update_checkout")?;
        let mut checkout = self.checkout(checkout_id.as_str());
        checkout.email = update.email;
        checkout.billing_address = update.billing_address;
        checkout.shipping_address = update.shipping_address;
        checkout.buyer_accepts_terms_conditions =
            update.accepts_terms_conditions.unwrap_or_default();
        checkout.buyer_accepts_purchase_conditions =
            update.accepts_purchase_conditions.unwrap_or_default();
        Ok(checkout)
    }

    async fn get_checkout(&self, checkout_id: &CheckoutId) -> Result<Checkout, CommerceError> {
        self.record("get_checkout");
        self.check_failure("get_checkout")?;
        Ok(self.checkout(checkout_id.as_str()))
    }

    async fn create_payment_stripe(
        &self,
        _checkout_id: &CheckoutId,
        _email: &str,
        _payment_method: &str,
        _success_url: &str,
    ) -> Result<StripePaymentSession, CommerceError> {
        self.record("create_payment_stripe");
        self.check_failure("create_payment_stripe")?;
        let mut sessions = self.payment_sessions.lock().expect("mock sessions lock");
        *sessions += 1;
        Ok(StripePaymentSession {
            order_id: seastack_core::OrderId::new(format!("order-{sessions}")),
            checkout_url: format!("https://pay.stripe.test/session/cs_{sessions}"),
        })
    }

    async fn create_payment_klarna(
        &self,
        _checkout_id: &CheckoutId,
        country_code: &str,
        _href: &str,
        _email: &str,
    ) -> Result<KlarnaPaymentSession, CommerceError> {
        self.record("create_payment_klarna");
        self.check_failure("create_payment_klarna")?;
        let mut sessions = self.payment_sessions.lock().expect("mock sessions lock");
        *sessions += 1;
        Ok(KlarnaPaymentSession {
            order_id: seastack_core::OrderId::new(format!("order-{sessions}")),
            status: Some("checkout_incomplete".to_string()),
            purchase_country: Some(country_code.to_string()),
            purchase_currency: Some("NOK".to_string()),
            locale: Some("nb-NO".to_string()),
            html_snippet: None,
        })
    }
}

// =============================================================================
// Fixture helpers
// =============================================================================

/// A demo address in the given country.
#[must_use]
pub fn address(country_code: &str) -> Address {
    Address {
        first_name: "Kari".to_string(),
        last_name: "Nordmann".to_string(),
        phone: "40000000".to_string(),
        phone_code: "+47".to_string(),
        address1: "Storgata 1".to_string(),
        address2: None,
        city: "Oslo".to_string(),
        province: None,
        province_code: None,
        country: "Norway".to_string(),
        country_code: country_code.to_string(),
        zip: "0155".to_string(),
        company: None,
    }
}

/// An add-to-cart request for the given product.
#[must_use]
pub fn add_request(product_id: i64, quantity: u32, amount: Decimal) -> AddToCartRequest {
    AddToCartRequest {
        product_id: ProductId::new(product_id),
        variant_id: None,
        title: format!("Product {product_id}"),
        price: Money::new(amount, "NOK"),
        quantity,
        image: None,
    }
}

/// A store holding a remote cart and the given items, with remote line ids
/// mapped 1:1 in order.
#[must_use]
pub fn store_with_items(items: &[(i64, u32, Decimal)], line_ids: &[&str]) -> CartStore {
    let mut store = CartStore::new("NO", "NOK");
    store.dispatch(CartAction::CartCreated {
        cart_id: CartId::new("cart-1"),
        customer_session_id: "session-1".to_string(),
    });

    let mut refs = Vec::new();
    for (idx, (product_id, quantity, amount)) in items.iter().enumerate() {
        let item = CartItem {
            local_id: seastack_core::LocalItemId::generate(),
            product_id: ProductId::new(*product_id),
            variant_id: None,
            title: format!("Product {product_id}"),
            price: Money::new(*amount, "NOK"),
            quantity: *quantity,
            image: None,
        };
        if let Some(line_id) = line_ids.get(idx) {
            refs.push(LineRef {
                line_item_id: LineItemId::new(*line_id),
                product_id: item.product_id,
                variant_id: None,
            });
        }
        store.dispatch(CartAction::AddItem(item));
    }

    store.dispatch(CartAction::SetShippingCountry {
        country: "NO".to_string(),
        currency: "NOK".to_string(),
        lines: refs,
    });

    store
}
