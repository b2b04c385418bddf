//! Cache value types for the commerce client.

use super::types::{Product, ProductSummary};

/// Values stored in the catalog cache.
#[derive(Clone)]
pub enum CacheValue {
    /// Product listing for a currency/country pair.
    Products(Vec<ProductSummary>),
    /// Product details for a set of product ids.
    ProductDetails(Vec<Product>),
}
