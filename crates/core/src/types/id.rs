//! Newtype IDs for type-safe entity references.
//!
//! The remote commerce API identifies carts, checkouts, line items, shipping
//! rates, and orders by opaque strings, and products/variants by integers.
//! Use `define_id!` for the string-keyed ids and `define_numeric_id!` for
//! the integer-keyed ones, so ids from different entity types cannot be
//! mixed accidentally.
//!
//! [`LocalItemId`] is the one id minted on this side: a synthetic key for a
//! cart line that exists before (or without) a confirmed remote line-item
//! id. The cart store keeps an explicit `LocalItemId -> LineItemId` map
//! instead of guessing at reconciliation time.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to define a type-safe wrapper around an opaque remote string id.
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

/// Macro to define a type-safe wrapper around a numeric remote id.
#[macro_export]
macro_rules! define_numeric_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Create a new ID from an i64 value.
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the underlying i64 value.
            #[must_use]
            pub const fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

// Remote string-keyed entity ids
define_id!(CartId);
define_id!(CheckoutId);
define_id!(LineItemId);
define_id!(ShippingId);
define_id!(OrderId);

// Remote numeric entity ids
define_numeric_id!(ProductId);
define_numeric_id!(VariantId);

/// Synthetic client-side id for a cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalItemId(Uuid);

impl LocalItemId {
    /// Mint a fresh local id.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl core::fmt::Display for LocalItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Default for LocalItemId {
    fn default() -> Self {
        Self::generate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_ids_are_distinct_types() {
        let cart_id = CartId::new("cart-1");
        assert_eq!(cart_id.as_str(), "cart-1");
        assert_eq!(cart_id.to_string(), "cart-1");
    }

    #[test]
    fn test_numeric_id_roundtrip() {
        let product_id = ProductId::new(42);
        assert_eq!(product_id.as_i64(), 42);
        assert_eq!(i64::from(product_id), 42);
    }

    #[test]
    fn test_local_ids_are_unique() {
        assert_ne!(LocalItemId::generate(), LocalItemId::generate());
    }
}
