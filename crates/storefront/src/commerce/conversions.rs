//! Conversions from raw wire types to domain types.

use rust_decimal::Decimal;

use seastack_core::{CartId, CheckoutId, LineItemId, OrderId, ProductId, ShippingId, VariantId};

use super::queries::{
    RawAddress, RawCart, RawCheckout, RawImage, RawLineItem, RawPaymentMethod, RawPrice,
    RawProduct, RawProductSummary, RawSelectedShipping, RawShippingOption, RawTotals, RawVariant,
    add_item, create_payment_klarna, create_payment_stripe, get_cart,
};
use super::types::{
    AddedLineItem, Address, Cart, CartAddition, Checkout, CheckoutTotals, CreatedCart, Image,
    KlarnaPaymentSession, LineShippingOptions, PaymentMethod, Price, Product, ProductSummary,
    RemoteLineItem, SelectedShipping, ShippingOption, StripePaymentSession, Variant,
    VariantOption,
};

pub fn convert_price(raw: RawPrice) -> Price {
    Price {
        // Some operations only return the tax-inclusive amount
        amount: raw
            .amount
            .or(raw.amount_incl_taxes)
            .unwrap_or(Decimal::ZERO),
        currency_code: raw.currency_code,
        amount_incl_taxes: raw.amount_incl_taxes,
        tax_amount: raw.tax_amount,
        tax_rate: raw.tax_rate,
        discount: raw.discount,
        compare_at: raw.compare_at,
    }
}

pub fn convert_image(raw: RawImage) -> Image {
    Image {
        id: raw.id,
        url: raw.url,
        order: raw.order,
        width: raw.width,
        height: raw.height,
    }
}

pub fn convert_selected_shipping(raw: RawSelectedShipping) -> SelectedShipping {
    SelectedShipping {
        id: ShippingId::new(raw.id),
        name: raw.name,
        description: raw.description,
        price: convert_price(raw.price),
    }
}

pub fn convert_shipping_option(raw: RawShippingOption) -> ShippingOption {
    ShippingOption {
        id: ShippingId::new(raw.id),
        name: raw.name,
        description: raw.description,
        country_code: raw.country_code,
        price: convert_price(raw.price),
    }
}

pub fn convert_line_item(raw: RawLineItem) -> RemoteLineItem {
    RemoteLineItem {
        id: LineItemId::new(raw.id),
        product_id: ProductId::new(raw.product_id),
        variant_id: raw.variant_id.map(VariantId::new),
        title: raw.title,
        variant_title: raw.variant_title,
        supplier: raw.supplier,
        sku: raw.sku,
        barcode: raw.barcode,
        brand: raw.brand,
        image: raw.image.map(convert_image),
        variant: raw
            .variant
            .into_iter()
            .map(|v| VariantOption {
                option: v.option,
                value: v.value,
            })
            .collect(),
        quantity: raw.quantity,
        price: convert_price(raw.price),
        shipping: raw.shipping.map(convert_selected_shipping),
    }
}

pub fn convert_cart(raw: RawCart) -> Cart {
    Cart {
        cart_id: CartId::new(raw.cart_id),
        customer_session_id: raw.customer_session_id,
        shipping_country: raw.shipping_country,
        currency: raw.currency,
        line_items: raw.line_items.into_iter().map(convert_line_item).collect(),
        available_shipping_countries: raw.available_shipping_countries,
        subtotal: raw.subtotal,
        shipping: raw.shipping,
    }
}

pub fn convert_created_cart(raw: RawCart) -> CreatedCart {
    CreatedCart {
        cart_id: CartId::new(raw.cart_id),
        customer_session_id: raw.customer_session_id,
        shipping_country: raw.shipping_country,
    }
}

pub fn convert_addition(raw: add_item::AddedItems) -> CartAddition {
    CartAddition {
        subtotal: raw.subtotal,
        line_items: raw
            .line_items
            .into_iter()
            .map(|line| AddedLineItem {
                product_id: ProductId::new(line.product_id),
                title: line.title,
                quantity: line.quantity,
                price: convert_price(line.price),
            })
            .collect(),
    }
}

pub fn convert_line_shipping(raw: get_cart::ShippingLine) -> LineShippingOptions {
    LineShippingOptions {
        line_item_id: LineItemId::new(raw.id),
        available_shippings: raw
            .available_shippings
            .into_iter()
            .map(convert_shipping_option)
            .collect(),
    }
}

pub fn convert_address(raw: RawAddress) -> Address {
    Address {
        first_name: raw.first_name.unwrap_or_default(),
        last_name: raw.last_name.unwrap_or_default(),
        phone: raw.phone.unwrap_or_default(),
        phone_code: raw.phone_code.unwrap_or_default(),
        address1: raw.address1.unwrap_or_default(),
        address2: raw.address2,
        city: raw.city.unwrap_or_default(),
        province: raw.province,
        province_code: raw.province_code,
        country: raw.country.unwrap_or_default(),
        country_code: raw.country_code.unwrap_or_default(),
        zip: raw.zip.unwrap_or_default(),
        company: raw.company,
    }
}

fn convert_totals(raw: RawTotals) -> CheckoutTotals {
    CheckoutTotals {
        currency_code: raw.currency_code,
        subtotal: raw.subtotal,
        shipping: raw.shipping,
        total: raw.total,
        taxes: raw.taxes,
        tax_rate: raw.tax_rate,
        discounts: raw.discounts,
    }
}

fn convert_payment_method(raw: RawPaymentMethod) -> PaymentMethod {
    PaymentMethod { name: raw.name }
}

pub fn convert_checkout(raw: RawCheckout) -> Checkout {
    Checkout {
        id: CheckoutId::new(raw.id),
        email: raw.email,
        status: raw.status,
        checkout_url: raw.checkout_url,
        success_url: raw.success_url,
        cancel_url: raw.cancel_url,
        payment_method: raw.payment_method,
        buyer_accepts_terms_conditions: raw.buyer_accepts_terms_conditions,
        buyer_accepts_purchase_conditions: raw.buyer_accepts_purchase_conditions,
        billing_address: raw.billing_address.map(convert_address),
        shipping_address: raw.shipping_address.map(convert_address),
        available_payment_methods: raw
            .available_payment_methods
            .into_iter()
            .map(convert_payment_method)
            .collect(),
        discount_code: raw.discount_code,
        cart: raw.cart.map(convert_cart),
        totals: raw.totals.map(convert_totals),
        created_at: raw.created_at,
        updated_at: raw.updated_at,
    }
}

pub fn convert_stripe_session(raw: create_payment_stripe::StripeSession) -> StripePaymentSession {
    StripePaymentSession {
        order_id: OrderId::new(raw.order_id),
        checkout_url: raw.checkout_url,
    }
}

pub fn convert_klarna_session(raw: create_payment_klarna::KlarnaSession) -> KlarnaPaymentSession {
    KlarnaPaymentSession {
        order_id: OrderId::new(raw.order_id),
        status: raw.status,
        purchase_country: raw.purchase_country,
        purchase_currency: raw.purchase_currency,
        locale: raw.locale,
        html_snippet: raw.html_snippet,
    }
}

pub fn convert_product_summary(raw: RawProductSummary) -> ProductSummary {
    ProductSummary {
        id: ProductId::new(raw.id),
        title: raw.title,
        price: convert_price(raw.price),
        images: raw.images.into_iter().map(convert_image).collect(),
    }
}

fn convert_variant(raw: RawVariant) -> Variant {
    Variant {
        id: VariantId::new(raw.id),
        title: raw.title,
        sku: raw.sku,
        barcode: raw.barcode,
        price: convert_price(raw.price),
        quantity: raw.quantity,
        images: raw.images.into_iter().map(convert_image).collect(),
    }
}

pub fn convert_product(raw: RawProduct) -> Product {
    Product {
        id: ProductId::new(raw.id),
        title: raw.title,
        description: raw.description,
        sku: raw.sku,
        price: convert_price(raw.price),
        options_enabled: raw.options_enabled,
        images: raw.images.into_iter().map(convert_image).collect(),
        variants: raw.variants.into_iter().map(convert_variant).collect(),
    }
}
