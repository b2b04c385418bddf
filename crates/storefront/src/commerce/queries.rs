//! GraphQL documents and wire types for the commerce API.
//!
//! Each operation is a unit struct implementing
//! [`graphql_client::GraphQLQuery`] with an explicit document, a `Variables`
//! type, and a `ResponseData` type. The documents are written against the
//! commerce schema's namespaced mutation/query roots (`Cart`, `Checkout`,
//! `Payment`, `Channel`); response types mirror that nesting.
//!
//! The raw types here carry exact wire field names; [`super::conversions`]
//! maps them onto the domain types in [`super::types`].

use graphql_client::{GraphQLQuery, QueryBody};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::LineItemInput;

// =============================================================================
// Shared wire fragments
// =============================================================================

/// A price object as the API serializes it (amounts are JSON numbers).
#[derive(Debug, Clone, Deserialize)]
pub struct RawPrice {
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub amount: Option<Decimal>,
    pub currency_code: String,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub amount_incl_taxes: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub tax_amount: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub tax_rate: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub discount: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub compare_at: Option<Decimal>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawImage {
    pub id: Option<String>,
    pub url: String,
    #[serde(default)]
    pub order: Option<i64>,
    #[serde(default)]
    pub width: Option<i64>,
    #[serde(default)]
    pub height: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawVariantOption {
    pub option: String,
    pub value: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawSelectedShipping {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: RawPrice,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawShippingOption {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub country_code: String,
    pub price: RawPrice,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawLineItem {
    pub id: String,
    pub supplier: Option<String>,
    pub image: Option<RawImage>,
    pub sku: Option<String>,
    pub barcode: Option<String>,
    pub brand: Option<String>,
    pub product_id: i64,
    pub title: String,
    pub variant_id: Option<i64>,
    pub variant_title: Option<String>,
    #[serde(default)]
    pub variant: Vec<RawVariantOption>,
    pub quantity: u32,
    pub price: RawPrice,
    pub shipping: Option<RawSelectedShipping>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCart {
    pub cart_id: String,
    pub customer_session_id: String,
    pub shipping_country: Option<String>,
    #[serde(default)]
    pub line_items: Vec<RawLineItem>,
    pub currency: Option<String>,
    #[serde(default)]
    pub available_shipping_countries: Vec<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub subtotal: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub shipping: Option<Decimal>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawAddress {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_code: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub province_code: Option<String>,
    pub country: Option<String>,
    pub country_code: Option<String>,
    pub zip: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawTotals {
    pub currency_code: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub subtotal: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub shipping: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub total: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub taxes: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub tax_rate: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub discounts: Option<Decimal>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawPaymentMethod {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCheckout {
    pub id: String,
    pub email: Option<String>,
    pub status: Option<String>,
    pub checkout_url: Option<String>,
    pub success_url: Option<String>,
    pub cancel_url: Option<String>,
    pub payment_method: Option<String>,
    #[serde(default)]
    pub buyer_accepts_terms_conditions: bool,
    #[serde(default)]
    pub buyer_accepts_purchase_conditions: bool,
    pub billing_address: Option<RawAddress>,
    pub shipping_address: Option<RawAddress>,
    #[serde(default)]
    pub available_payment_methods: Vec<RawPaymentMethod>,
    pub discount_code: Option<String>,
    pub cart: Option<RawCart>,
    pub totals: Option<RawTotals>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawVariant {
    pub id: i64,
    pub title: Option<String>,
    pub sku: Option<String>,
    pub barcode: Option<String>,
    pub price: RawPrice,
    #[serde(default)]
    pub quantity: Option<i64>,
    #[serde(default)]
    pub images: Vec<RawImage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawProductSummary {
    pub id: i64,
    pub title: String,
    pub price: RawPrice,
    #[serde(default)]
    pub images: Vec<RawImage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawProduct {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub sku: Option<String>,
    pub price: RawPrice,
    #[serde(default)]
    pub options_enabled: bool,
    #[serde(default)]
    pub images: Vec<RawImage>,
    #[serde(default)]
    pub variants: Vec<RawVariant>,
}

// =============================================================================
// Cart operations
// =============================================================================

pub struct CreateCart;

pub mod create_cart {
    use super::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub customer_session_id: String,
        pub currency: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        #[serde(rename = "Cart")]
        pub cart: CartOps,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct CartOps {
        #[serde(rename = "CreateCart")]
        pub create_cart: super::RawCart,
    }
}

impl GraphQLQuery for CreateCart {
    type Variables = create_cart::Variables;
    type ResponseData = create_cart::ResponseData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: "mutation CreateCart($customerSessionId: String!, $currency: String!) {
  Cart {
    CreateCart(customer_session_id: $customerSessionId, currency: $currency) {
      cart_id
      customer_session_id
      shipping_country
    }
  }
}",
            operation_name: "CreateCart",
        }
    }
}

pub struct AddItem;

pub mod add_item {
    use super::{Deserialize, LineItemInput, Serialize};

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub cart_id: String,
        pub line_items: Vec<LineItemInput>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        #[serde(rename = "Cart")]
        pub cart: CartOps,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct CartOps {
        #[serde(rename = "AddItem")]
        pub add_item: AddedItems,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct AddedItems {
        #[serde(default, with = "rust_decimal::serde::float_option")]
        pub subtotal: Option<rust_decimal::Decimal>,
        #[serde(default)]
        pub line_items: Vec<AddedLine>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct AddedLine {
        pub title: String,
        pub price: super::RawPrice,
        pub quantity: u32,
        pub product_id: i64,
    }
}

impl GraphQLQuery for AddItem {
    type Variables = add_item::Variables;
    type ResponseData = add_item::ResponseData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: "mutation AddItem($cartId: String!, $lineItems: [LineItemInput!]!) {
  Cart {
    AddItem(cart_id: $cartId, line_items: $lineItems) {
      subtotal
      line_items {
        title
        price { amount_incl_taxes currency_code }
        quantity
        product_id
      }
    }
  }
}",
            operation_name: "AddItem",
        }
    }
}

pub struct UpdateCart;

pub mod update_cart {
    use super::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub cart_id: String,
        pub shipping_country: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        #[serde(rename = "Cart")]
        pub cart: CartOps,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct CartOps {
        #[serde(rename = "UpdateCart")]
        pub update_cart: super::RawCart,
    }
}

impl GraphQLQuery for UpdateCart {
    type Variables = update_cart::Variables;
    type ResponseData = update_cart::ResponseData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: concat!(
                "mutation UpdateCart($cartId: String!, $shippingCountry: String!) {
  Cart {
    UpdateCart(cart_id: $cartId, shipping_country: $shippingCountry) {
      cart_id
      customer_session_id
      shipping_country
      line_items {",
                "
          id
          supplier
          image { id url order width height }
          sku
          barcode
          brand
          product_id
          title
          variant_id
          variant_title
          variant { option value }
          quantity
          price { amount currency_code amount_incl_taxes tax_amount tax_rate discount compare_at }
          shipping { id name description price { amount currency_code amount_incl_taxes tax_amount tax_rate } }",
                "
      }
      currency
      available_shipping_countries
    }
  }
}"
            ),
            operation_name: "UpdateCart",
        }
    }
}

pub struct GetCart;

pub mod get_cart {
    use super::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub cart_id: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        #[serde(rename = "Cart")]
        pub cart: CartOps,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct CartOps {
        #[serde(rename = "GetCart")]
        pub get_cart: ShippingCart,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ShippingCart {
        pub cart_id: String,
        #[serde(default)]
        pub line_items: Vec<ShippingLine>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ShippingLine {
        pub id: String,
        #[serde(default)]
        pub available_shippings: Vec<super::RawShippingOption>,
    }
}

impl GraphQLQuery for GetCart {
    type Variables = get_cart::Variables;
    type ResponseData = get_cart::ResponseData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: "query GetCart($cartId: String!) {
  Cart {
    GetCart(cart_id: $cartId) {
      cart_id
      line_items {
        id
        available_shippings {
          id
          name
          description
          country_code
          price { amount currency_code amount_incl_taxes tax_amount tax_rate }
        }
      }
    }
  }
}",
            operation_name: "GetCart",
        }
    }
}

pub struct UpdateItem;

pub mod update_item {
    use super::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub cart_id: String,
        pub cart_item_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub qty: Option<i64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub shipping_id: Option<String>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        #[serde(rename = "Cart")]
        pub cart: CartOps,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct CartOps {
        #[serde(rename = "UpdateItem")]
        pub update_item: UpdatedLine,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct UpdatedLine {
        pub id: String,
        pub quantity: u32,
    }
}

impl GraphQLQuery for UpdateItem {
    type Variables = update_item::Variables;
    type ResponseData = update_item::ResponseData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: "mutation UpdateItem($cartId: String!, $cartItemId: String!, $qty: Int, $shippingId: String) {
  Cart {
    UpdateItem(cart_id: $cartId, cart_item_id: $cartItemId, qty: $qty, shipping_id: $shippingId) {
      id
      quantity
    }
  }
}",
            operation_name: "UpdateItem",
        }
    }
}

// =============================================================================
// Checkout operations
// =============================================================================

macro_rules! checkout_query {
    ($head:literal, $tail:literal) => {
        concat!(
            $head,
            "
      buyer_accepts_purchase_conditions
      buyer_accepts_terms_conditions
      created_at
      updated_at
      id
      success_url
      cancel_url
      payment_method
      email
      status
      checkout_url
      billing_address {",
            "
          first_name
          last_name
          phone_code
          phone
          company
          address1
          address2
          city
          province
          province_code
          country
          country_code
          zip",
            "
      }
      shipping_address {",
            "
          first_name
          last_name
          phone_code
          phone
          company
          address1
          address2
          city
          province
          province_code
          country
          country_code
          zip",
            "
      }
      available_payment_methods { name }
      discount_code
      cart {
        cart_id
        customer_session_id
        shipping_country
        line_items {",
            "
          id
          supplier
          image { id url order width height }
          sku
          barcode
          brand
          product_id
          title
          variant_id
          variant_title
          variant { option value }
          quantity
          price { amount currency_code amount_incl_taxes tax_amount tax_rate discount compare_at }
          shipping { id name description price { amount currency_code amount_incl_taxes tax_amount tax_rate } }",
            "
        }
        currency
        available_shipping_countries
        subtotal
        shipping
      }
      totals {
        currency_code
        subtotal
        shipping
        total
        taxes
        tax_rate
        discounts
      }",
            $tail
        )
    };
}

pub struct CreateCheckout;

pub mod create_checkout {
    use super::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub cart_id: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        #[serde(rename = "Checkout")]
        pub checkout: CheckoutOps,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct CheckoutOps {
        #[serde(rename = "CreateCheckout")]
        pub create_checkout: super::RawCheckout,
    }
}

impl GraphQLQuery for CreateCheckout {
    type Variables = create_checkout::Variables;
    type ResponseData = create_checkout::ResponseData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: checkout_query!(
                "mutation CreateCheckout($cartId: String!) {
  Checkout {
    CreateCheckout(cart_id: $cartId) {",
                "
    }
  }
}"
            ),
            operation_name: "CreateCheckout",
        }
    }
}

pub struct UpdateCheckout;

pub mod update_checkout {
    use super::{Deserialize, Serialize};
    use crate::commerce::types::Address;

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub checkout_id: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub email: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub billing_address: Option<Address>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub shipping_address: Option<Address>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub buyer_accepts_purchase_conditions: Option<bool>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub buyer_accepts_terms_conditions: Option<bool>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        #[serde(rename = "Checkout")]
        pub checkout: CheckoutOps,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct CheckoutOps {
        #[serde(rename = "UpdateCheckout")]
        pub update_checkout: super::RawCheckout,
    }
}

impl GraphQLQuery for UpdateCheckout {
    type Variables = update_checkout::Variables;
    type ResponseData = update_checkout::ResponseData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: checkout_query!(
                "mutation UpdateCheckout($checkoutId: String!, $email: String, $billingAddress: AddressArgs, $shippingAddress: AddressArgs, $buyerAcceptsPurchaseConditions: Boolean, $buyerAcceptsTermsConditions: Boolean) {
  Checkout {
    UpdateCheckout(checkout_id: $checkoutId, email: $email, billing_address: $billingAddress, shipping_address: $shippingAddress, buyer_accepts_purchase_conditions: $buyerAcceptsPurchaseConditions, buyer_accepts_terms_conditions: $buyerAcceptsTermsConditions) {",
                "
    }
  }
}"
            ),
            operation_name: "UpdateCheckout",
        }
    }
}

pub struct GetCheckout;

pub mod get_checkout {
    use super::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub checkout_id: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        #[serde(rename = "Checkout")]
        pub checkout: CheckoutOps,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct CheckoutOps {
        #[serde(rename = "GetCheckout")]
        pub get_checkout: Option<super::RawCheckout>,
    }
}

impl GraphQLQuery for GetCheckout {
    type Variables = get_checkout::Variables;
    type ResponseData = get_checkout::ResponseData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: checkout_query!(
                "query GetCheckout($checkoutId: String!) {
  Checkout {
    GetCheckout(checkout_id: $checkoutId) {",
                "
    }
  }
}"
            ),
            operation_name: "GetCheckout",
        }
    }
}

// =============================================================================
// Payment operations
// =============================================================================

pub struct CreatePaymentStripe;

pub mod create_payment_stripe {
    use super::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub checkout_id: String,
        pub success_url: String,
        pub payment_method: String,
        pub email: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        #[serde(rename = "Payment")]
        pub payment: PaymentOps,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct PaymentOps {
        #[serde(rename = "CreatePaymentStripe")]
        pub create_payment_stripe: StripeSession,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct StripeSession {
        pub checkout_url: String,
        pub order_id: String,
    }
}

impl GraphQLQuery for CreatePaymentStripe {
    type Variables = create_payment_stripe::Variables;
    type ResponseData = create_payment_stripe::ResponseData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: "mutation CreatePaymentStripe($checkoutId: String!, $successUrl: String!, $paymentMethod: String!, $email: String!) {
  Payment {
    CreatePaymentStripe(checkout_id: $checkoutId, success_url: $successUrl, payment_method: $paymentMethod, email: $email) {
      checkout_url
      order_id
    }
  }
}",
            operation_name: "CreatePaymentStripe",
        }
    }
}

pub struct CreatePaymentKlarna;

pub mod create_payment_klarna {
    use super::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub checkout_id: String,
        pub country_code: String,
        pub href: String,
        pub email: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        #[serde(rename = "Payment")]
        pub payment: PaymentOps,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct PaymentOps {
        #[serde(rename = "CreatePaymentKlarna")]
        pub create_payment_klarna: KlarnaSession,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct KlarnaSession {
        pub order_id: String,
        pub status: Option<String>,
        pub purchase_country: Option<String>,
        pub purchase_currency: Option<String>,
        pub locale: Option<String>,
        pub html_snippet: Option<String>,
    }
}

impl GraphQLQuery for CreatePaymentKlarna {
    type Variables = create_payment_klarna::Variables;
    type ResponseData = create_payment_klarna::ResponseData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: "mutation CreatePaymentKlarna($checkoutId: String!, $countryCode: String!, $href: String!, $email: String!) {
  Payment {
    CreatePaymentKlarna(checkout_id: $checkoutId, country_code: $countryCode, href: $href, email: $email) {
      order_id
      status
      purchase_country
      purchase_currency
      locale
      html_snippet
    }
  }
}",
            operation_name: "CreatePaymentKlarna",
        }
    }
}

// =============================================================================
// Catalog operations
// =============================================================================

pub struct GetProducts;

pub mod get_products {
    use super::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        #[serde(skip_serializing_if = "Option::is_none")]
        pub currency: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub shipping_country_code: Option<String>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        #[serde(rename = "Channel")]
        pub channel: ChannelOps,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ChannelOps {
        #[serde(rename = "GetProducts", default)]
        pub get_products: Vec<super::RawProductSummary>,
    }
}

impl GraphQLQuery for GetProducts {
    type Variables = get_products::Variables;
    type ResponseData = get_products::ResponseData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: "query GetProducts($currency: String, $shippingCountryCode: String) {
  Channel {
    GetProducts(currency: $currency, shipping_country_code: $shippingCountryCode) {
      price { amount amount_incl_taxes currency_code }
      title
      id
      images { id order url }
    }
  }
}",
            operation_name: "GetProducts",
        }
    }
}

pub struct GetProductsByIds;

pub mod get_products_by_ids {
    use super::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub product_ids: Vec<i64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub currency: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub shipping_country_code: Option<String>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        #[serde(rename = "Channel")]
        pub channel: ChannelOps,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ChannelOps {
        #[serde(rename = "GetProductsByIds", default)]
        pub get_products_by_ids: Vec<super::RawProduct>,
    }
}

impl GraphQLQuery for GetProductsByIds {
    type Variables = get_products_by_ids::Variables;
    type ResponseData = get_products_by_ids::ResponseData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: "query GetProductsByIds($productIds: [Int!]!, $currency: String, $shippingCountryCode: String) {
  Channel {
    GetProductsByIds(product_ids: $productIds, currency: $currency, shipping_country_code: $shippingCountryCode) {
      id
      description
      title
      price { amount amount_incl_taxes currency_code }
      sku
      variants {
        id
        barcode
        price { amount amount_incl_taxes currency_code }
        quantity
        sku
        title
        images { id url }
      }
      options_enabled
      images { height id order url width }
    }
  }
}",
            operation_name: "GetProductsByIds",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_variables_serialize_camel_case() {
        let body = CreateCart::build_query(create_cart::Variables {
            customer_session_id: "session-1".to_string(),
            currency: "NOK".to_string(),
        });
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["operationName"], "CreateCart");
        assert_eq!(json["variables"]["customerSessionId"], "session-1");
        assert_eq!(json["variables"]["currency"], "NOK");
    }

    #[test]
    fn test_update_item_omits_unset_arguments() {
        let body = UpdateItem::build_query(update_item::Variables {
            cart_id: "cart-1".to_string(),
            cart_item_id: "line-1".to_string(),
            qty: None,
            shipping_id: Some("ship-1".to_string()),
        });
        let json = serde_json::to_value(&body).unwrap();
        assert!(json["variables"].get("qty").is_none());
        assert_eq!(json["variables"]["shippingId"], "ship-1");
    }

    #[test]
    fn test_create_cart_response_parses() {
        let raw = serde_json::json!({
            "Cart": {
                "CreateCart": {
                    "cart_id": "cart-1",
                    "customer_session_id": "session-1",
                    "shipping_country": "NO"
                }
            }
        });
        let data: create_cart::ResponseData = serde_json::from_value(raw).unwrap();
        assert_eq!(data.cart.create_cart.cart_id, "cart-1");
        assert_eq!(data.cart.create_cart.shipping_country.as_deref(), Some("NO"));
    }

    #[test]
    fn test_price_amounts_parse_from_json_numbers() {
        let raw = serde_json::json!({
            "amount": 10.0,
            "currency_code": "NOK",
            "amount_incl_taxes": 12.5
        });
        let price: RawPrice = serde_json::from_value(raw).unwrap();
        assert_eq!(price.amount, Some(rust_decimal::Decimal::new(100, 1)));
        assert_eq!(
            price.amount_incl_taxes,
            Some(rust_decimal::Decimal::new(125, 1))
        );
    }

    #[test]
    fn test_get_cart_response_parses_shipping_options() {
        let raw = serde_json::json!({
            "Cart": {
                "GetCart": {
                    "cart_id": "cart-1",
                    "line_items": [{
                        "id": "line-1",
                        "available_shippings": [{
                            "id": "ship-1",
                            "name": "Standard",
                            "description": null,
                            "country_code": "NO",
                            "price": { "amount": 49.0, "currency_code": "NOK" }
                        }]
                    }]
                }
            }
        });
        let data: get_cart::ResponseData = serde_json::from_value(raw).unwrap();
        let line = &data.cart.get_cart.line_items[0];
        assert_eq!(line.available_shippings[0].country_code, "NO");
    }
}
