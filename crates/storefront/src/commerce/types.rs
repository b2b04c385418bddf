//! Domain types for the commerce API.
//!
//! These types provide a clean, ergonomic API separate from the raw wire
//! types in [`super::queries`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use seastack_core::{CartId, CheckoutId, LineItemId, Money, OrderId, ProductId, ShippingId, VariantId};

// =============================================================================
// Price & Image Types
// =============================================================================

/// A price as reported by the commerce API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    /// Amount excluding taxes.
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: String,
    /// Amount including taxes, when the API provides it.
    pub amount_incl_taxes: Option<Decimal>,
    /// Tax portion of the amount.
    pub tax_amount: Option<Decimal>,
    /// Applied tax rate.
    pub tax_rate: Option<Decimal>,
    /// Discount applied to the amount.
    pub discount: Option<Decimal>,
    /// Pre-discount comparison amount.
    pub compare_at: Option<Decimal>,
}

impl Price {
    /// The amount a buyer actually pays: tax-inclusive when known.
    #[must_use]
    pub fn effective_amount(&self) -> Decimal {
        self.amount_incl_taxes.unwrap_or(self.amount)
    }

    /// The buyer-facing amount as a [`Money`] value.
    #[must_use]
    pub fn to_money(&self) -> Money {
        Money::new(self.effective_amount(), self.currency_code.clone())
    }
}

/// Product or line-item image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// Image ID.
    pub id: Option<String>,
    /// Image URL.
    pub url: String,
    /// Display order within a gallery.
    pub order: Option<i64>,
    /// Image width in pixels.
    pub width: Option<i64>,
    /// Image height in pixels.
    pub height: Option<i64>,
}

// =============================================================================
// Catalog Types
// =============================================================================

/// A product as listed in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSummary {
    /// Product ID.
    pub id: ProductId,
    /// Product title.
    pub title: String,
    /// List price.
    pub price: Price,
    /// Product images.
    pub images: Vec<Image>,
}

/// A product variant (specific combination of options).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variant {
    /// Variant ID.
    pub id: VariantId,
    /// Variant title.
    pub title: Option<String>,
    /// SKU code.
    pub sku: Option<String>,
    /// Barcode.
    pub barcode: Option<String>,
    /// Variant price.
    pub price: Price,
    /// Quantity in stock, if tracked.
    pub quantity: Option<i64>,
    /// Variant images.
    pub images: Vec<Image>,
}

/// Full product details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Product ID.
    pub id: ProductId,
    /// Product title.
    pub title: String,
    /// Plain text description.
    pub description: Option<String>,
    /// SKU code.
    pub sku: Option<String>,
    /// Base price (variants may override).
    pub price: Price,
    /// Whether the product exposes selectable options.
    pub options_enabled: bool,
    /// Product images.
    pub images: Vec<Image>,
    /// Product variants.
    pub variants: Vec<Variant>,
}

// =============================================================================
// Cart Types
// =============================================================================

/// One selected option on a line item's variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantOption {
    /// Option name (e.g., "Size").
    pub option: String,
    /// Selected value (e.g., "Large").
    pub value: String,
}

/// A shipping option available to a line item for one country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingOption {
    /// Shipping rate ID.
    pub id: ShippingId,
    /// Carrier/service name.
    pub name: String,
    /// Service description.
    pub description: Option<String>,
    /// ISO 3166-1 alpha-2 country the rate applies to.
    pub country_code: String,
    /// Shipping price.
    pub price: Price,
}

/// The shipping option currently selected on a line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedShipping {
    /// Shipping rate ID.
    pub id: ShippingId,
    /// Carrier/service name.
    pub name: String,
    /// Service description.
    pub description: Option<String>,
    /// Shipping price.
    pub price: Price,
}

/// A line item as the remote cart reports it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteLineItem {
    /// Remote line-item ID.
    pub id: LineItemId,
    /// Product ID.
    pub product_id: ProductId,
    /// Variant ID, when a variant was chosen.
    pub variant_id: Option<VariantId>,
    /// Product title.
    pub title: String,
    /// Variant title.
    pub variant_title: Option<String>,
    /// Supplier name.
    pub supplier: Option<String>,
    /// SKU code.
    pub sku: Option<String>,
    /// Barcode.
    pub barcode: Option<String>,
    /// Brand name.
    pub brand: Option<String>,
    /// Line image.
    pub image: Option<Image>,
    /// Selected variant options.
    pub variant: Vec<VariantOption>,
    /// Quantity.
    pub quantity: u32,
    /// Unit price.
    pub price: Price,
    /// Currently selected shipping, if any.
    pub shipping: Option<SelectedShipping>,
}

/// A cart as the remote service reports it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    /// Cart ID.
    pub cart_id: CartId,
    /// Customer session the cart belongs to.
    pub customer_session_id: String,
    /// Shipping country currently set on the cart.
    pub shipping_country: Option<String>,
    /// Cart currency.
    pub currency: Option<String>,
    /// Line items.
    pub line_items: Vec<RemoteLineItem>,
    /// Countries the cart can ship to.
    pub available_shipping_countries: Vec<String>,
    /// Cart subtotal.
    pub subtotal: Option<Decimal>,
    /// Cart shipping total.
    pub shipping: Option<Decimal>,
}

/// Result of creating a cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedCart {
    /// Cart ID.
    pub cart_id: CartId,
    /// Customer session the cart belongs to.
    pub customer_session_id: String,
    /// Shipping country the cart was created with.
    pub shipping_country: Option<String>,
}

/// A line item echoed back by an add-item mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddedLineItem {
    /// Product ID.
    pub product_id: ProductId,
    /// Product title.
    pub title: String,
    /// Quantity added.
    pub quantity: u32,
    /// Unit price.
    pub price: Price,
}

/// Result of adding items to a cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartAddition {
    /// New cart subtotal.
    pub subtotal: Option<Decimal>,
    /// The lines as the cart now holds them.
    pub line_items: Vec<AddedLineItem>,
}

/// Input for adding a line item to a cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItemInput {
    /// Product ID.
    pub product_id: ProductId,
    /// Variant ID, when a variant was chosen.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant_id: Option<VariantId>,
    /// Quantity to add.
    pub quantity: u32,
}

impl LineItemInput {
    /// Input for `quantity` units of a product without variant selection.
    #[must_use]
    pub const fn new(product_id: ProductId, quantity: u32) -> Self {
        Self {
            product_id,
            variant_id: None,
            quantity,
        }
    }

    /// Select a specific variant.
    #[must_use]
    pub const fn with_variant(mut self, variant_id: VariantId) -> Self {
        self.variant_id = Some(variant_id);
        self
    }
}

/// The shipping options available to one remote line item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineShippingOptions {
    /// Remote line-item ID.
    pub line_item_id: LineItemId,
    /// Options, across all supported countries.
    pub available_shippings: Vec<ShippingOption>,
}

// =============================================================================
// Checkout Types
// =============================================================================

/// A postal address.
///
/// Shipping and billing addresses are independent values; "same as shipping"
/// is expressed by copying, never by aliasing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Phone number without country prefix.
    pub phone: String,
    /// Phone country prefix (e.g., "+47").
    pub phone_code: String,
    /// Street address.
    pub address1: String,
    /// Additional address line.
    pub address2: Option<String>,
    /// City.
    pub city: String,
    /// Province or state.
    pub province: Option<String>,
    /// Province or state code.
    pub province_code: Option<String>,
    /// Country name.
    pub country: String,
    /// ISO 3166-1 alpha-2 country code.
    pub country_code: String,
    /// Postal code.
    pub zip: String,
    /// Company name.
    pub company: Option<String>,
}

/// Checkout totals as priced by the remote service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutTotals {
    /// ISO 4217 currency code.
    pub currency_code: Option<String>,
    /// Items subtotal.
    pub subtotal: Option<Decimal>,
    /// Shipping total.
    pub shipping: Option<Decimal>,
    /// Grand total.
    pub total: Option<Decimal>,
    /// Tax total.
    pub taxes: Option<Decimal>,
    /// Applied tax rate.
    pub tax_rate: Option<Decimal>,
    /// Discount total.
    pub discounts: Option<Decimal>,
}

/// A payment method the checkout may be completed with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethod {
    /// Provider name (e.g., "Stripe", "Klarna").
    pub name: String,
}

/// The remote checkout aggregate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Checkout {
    /// Checkout ID.
    pub id: CheckoutId,
    /// Buyer email.
    pub email: Option<String>,
    /// Checkout status.
    pub status: Option<String>,
    /// Hosted checkout URL, when the provider supplies one.
    pub checkout_url: Option<String>,
    /// URL the provider redirects to on success.
    pub success_url: Option<String>,
    /// URL the provider redirects to on cancellation.
    pub cancel_url: Option<String>,
    /// Selected payment method name.
    pub payment_method: Option<String>,
    /// Buyer accepted the terms and conditions.
    pub buyer_accepts_terms_conditions: bool,
    /// Buyer accepted the purchase conditions.
    pub buyer_accepts_purchase_conditions: bool,
    /// Billing address.
    pub billing_address: Option<Address>,
    /// Shipping address.
    pub shipping_address: Option<Address>,
    /// Payment methods available for this checkout.
    pub available_payment_methods: Vec<PaymentMethod>,
    /// Applied discount code.
    pub discount_code: Option<String>,
    /// Snapshot of the underlying cart.
    pub cart: Option<Cart>,
    /// Priced totals.
    pub totals: Option<CheckoutTotals>,
    /// Creation timestamp.
    pub created_at: Option<String>,
    /// Last update timestamp.
    pub updated_at: Option<String>,
}

// =============================================================================
// Payment Session Types
// =============================================================================

/// A Stripe payment session: an order id plus a hosted checkout link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StripePaymentSession {
    /// Provider order ID.
    pub order_id: OrderId,
    /// Fully-formed hosted checkout URL.
    pub checkout_url: String,
}

/// A Klarna payment session, rendered server-side as a widget page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KlarnaPaymentSession {
    /// Provider order ID.
    pub order_id: OrderId,
    /// Session status.
    pub status: Option<String>,
    /// Purchase country.
    pub purchase_country: Option<String>,
    /// Purchase currency.
    pub purchase_currency: Option<String>,
    /// Session locale.
    pub locale: Option<String>,
    /// Widget HTML snippet, when requested.
    pub html_snippet: Option<String>,
}
