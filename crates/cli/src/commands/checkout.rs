//! `checkout` command: run the full workflow against a live endpoint.
//!
//! Adds the requested product to a fresh cart, walks the checkout workflow
//! with a demo address, and initiates payment with the selected provider.
//! The payment redirect URL is printed for manual completion; a CLI has no
//! embedded browser surface to observe the success navigation with.

use clap::Args;
use seastack_core::{ProductId, VariantId};
use seastack_storefront::cart::{AddToCartRequest, CartStore, add_to_cart, select_shipping_country};
use seastack_storefront::checkout::{CheckoutFlow, ShippingForm, TermsAcceptance};
use seastack_storefront::commerce::CommerceClient;
use seastack_storefront::commerce::types::Address;
use seastack_storefront::config::StorefrontConfig;
use seastack_storefront::payment::{
    KlarnaProvider, PaymentFlow, PaymentPhase, PaymentProvider, StripeProvider,
};

/// Arguments for the `checkout` command.
#[derive(Debug, Args)]
pub struct CheckoutArgs {
    /// Product to buy
    #[arg(long)]
    pub product_id: i64,

    /// Variant of the product
    #[arg(long)]
    pub variant_id: Option<i64>,

    /// Quantity to buy
    #[arg(long, default_value_t = 1)]
    pub quantity: u32,

    /// Shipping country (ISO 3166-1 alpha-2)
    #[arg(short = 'k', long)]
    pub country: Option<String>,

    /// Buyer email
    #[arg(long)]
    pub email: String,

    /// Payment provider (stripe or klarna)
    #[arg(long, default_value = "stripe")]
    pub provider: String,

    /// Buyer first name
    #[arg(long, default_value = "Test")]
    pub first_name: String,

    /// Buyer last name
    #[arg(long, default_value = "Buyer")]
    pub last_name: String,

    /// Street address
    #[arg(long, default_value = "Storgata 1")]
    pub address1: String,

    /// City
    #[arg(long, default_value = "Oslo")]
    pub city: String,

    /// Postal code
    #[arg(long, default_value = "0155")]
    pub zip: String,

    /// Phone number
    #[arg(long, default_value = "40000000")]
    pub phone: String,

    /// Phone country prefix
    #[arg(long, default_value = "+47")]
    pub phone_code: String,
}

/// Run the scripted checkout flow.
pub async fn run(
    config: &StorefrontConfig,
    args: CheckoutArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = CommerceClient::new(&config.commerce);
    let country = args
        .country
        .clone()
        .unwrap_or_else(|| config.default_country.clone());

    let mut store = CartStore::new(country.clone(), config.default_currency.clone());

    // Look the product up so the local mirror carries real title and price
    let product_id = ProductId::new(args.product_id);
    let product = client
        .product(product_id, Some(&config.default_currency), Some(&country))
        .await?;

    println!("Adding to cart: {} ({})", product.title, product.price.to_money());
    add_to_cart(
        &client,
        &mut store,
        AddToCartRequest {
            product_id,
            variant_id: args.variant_id.map(VariantId::new),
            title: product.title.clone(),
            price: product.price.to_money(),
            quantity: args.quantity,
            image: product.images.first().map(|image| image.url.clone()),
        },
    )
    .await?;

    select_shipping_country(&client, &mut store, &country).await?;

    let address = Address {
        first_name: args.first_name,
        last_name: args.last_name,
        phone: args.phone,
        phone_code: args.phone_code,
        address1: args.address1,
        address2: None,
        city: args.city,
        province: None,
        province_code: None,
        country: country.clone(),
        country_code: country.clone(),
        zip: args.zip,
        company: None,
    };

    let mut flow = CheckoutFlow::new();
    flow.proceed_to_shipping(&store)?;
    flow.submit_shipping(ShippingForm {
        address,
        email: args.email.clone(),
        same_as_billing: true,
    });

    let checkout = flow
        .submit_review(
            &client,
            &mut store,
            TermsAcceptance {
                terms_conditions: true,
                purchase_conditions: true,
            },
        )
        .await?;
    println!("Checkout created: {}", checkout.id);
    if let Some(totals) = &checkout.totals
        && let Some(total) = totals.total
    {
        println!(
            "Total: {total} {}",
            totals.currency_code.as_deref().unwrap_or("")
        );
    }

    let provider: Box<dyn PaymentProvider> = match args.provider.as_str() {
        "klarna" => Box::new(KlarnaProvider::new(&config.payment)),
        _ => Box::new(StripeProvider::new(&config.payment)),
    };

    let mut payment = PaymentFlow::new();
    payment
        .initiate(&client, provider.as_ref(), &store, Some(&args.email))
        .await?;

    match payment.phase() {
        PaymentPhase::AwaitingRedirect(session) => {
            println!("Payment session created: order {}", session.order_id);
            println!("Complete payment at: {}", session.redirect_url);
        }
        PaymentPhase::AwaitingEmail => {
            println!("A valid email is required to initiate payment");
        }
        other => {
            println!("Payment phase: {other:?}");
        }
    }

    Ok(())
}
