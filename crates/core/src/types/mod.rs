//! Core type definitions.

mod email;
mod id;
mod money;

pub use email::{Email, EmailError};
pub use id::{
    CartId, CheckoutId, LineItemId, LocalItemId, OrderId, ProductId, ShippingId, VariantId,
};
pub use money::Money;
