//! `products` command: list the catalog.

use seastack_storefront::commerce::CommerceClient;
use seastack_storefront::config::StorefrontConfig;

/// List the product catalog for a currency/country pair.
pub async fn list(
    config: &StorefrontConfig,
    currency: Option<String>,
    country: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = CommerceClient::new(&config.commerce);

    let currency = currency.unwrap_or_else(|| config.default_currency.clone());
    let country = country.unwrap_or_else(|| config.default_country.clone());

    let products = client.products(Some(&currency), Some(&country)).await?;

    if products.is_empty() {
        println!("No products available for {currency}/{country}");
        return Ok(());
    }

    for product in products {
        println!(
            "{:>8}  {}  {}",
            product.id,
            product.price.to_money(),
            product.title
        );
    }

    Ok(())
}
