//! Shipping resolution step.
//!
//! Before a checkout can be created, every cart line needs a shipping option
//! valid for the buyer's country. The remote service exposes the options per
//! line item; this step selects and applies one option per line,
//! sequentially, tolerating per-item misses.

use tracing::{info, instrument, warn};

use seastack_core::LocalItemId;

use crate::cart::CartState;
use crate::commerce::{CommerceApi, CommerceError};

/// Why a cart line was left without a shipping selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The local line has no known remote line id.
    NoRemoteLine,
    /// No available shipping option matches the requested country.
    NoCountryMatch,
}

/// A cart line the resolution pass skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedItem {
    /// The skipped line.
    pub local_id: LocalItemId,
    /// Why it was skipped.
    pub reason: SkipReason,
}

/// Outcome of a shipping resolution pass.
#[derive(Debug, Clone, Default)]
pub struct ShippingResolution {
    /// Lines whose shipping selection was updated remotely.
    pub updated: Vec<LocalItemId>,
    /// Lines left without a selection (soft failures).
    pub skipped: Vec<SkippedItem>,
}

impl ShippingResolution {
    /// Whether every line got a shipping selection.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Resolve shipping for every cart line against the given country.
///
/// Fetches the per-line shipping options, then walks the local cart lines in
/// order: resolve the remote line id through the store's id map, pick the
/// first available option whose country code matches, and apply it with an
/// update call. Lines run strictly one at a time; the remote service orders
/// per-cart mutations.
///
/// A line with no remote id or no matching option is recorded as skipped and
/// processing continues with the remaining lines.
///
/// # Errors
///
/// Only the initial options lookup and the individual update calls can fail;
/// either aborts the step (recoverable by retrying from review).
#[instrument(skip(api, state), fields(country_code = %country_code))]
pub async fn resolve_shipping(
    api: &dyn CommerceApi,
    state: &CartState,
    country_code: &str,
) -> Result<ShippingResolution, CommerceError> {
    let Some(cart_id) = state.cart_id.as_ref() else {
        return Err(CommerceError::NotFound("no cart to resolve".to_string()));
    };

    let options = api.cart_shipping_options(cart_id).await?;

    let mut resolution = ShippingResolution::default();

    for item in &state.items {
        let Some(line_id) = state.remote_line_id(item.local_id) else {
            warn!(local_id = %item.local_id, "no remote line id for cart item");
            resolution.skipped.push(SkippedItem {
                local_id: item.local_id,
                reason: SkipReason::NoRemoteLine,
            });
            continue;
        };

        let line_options = options.iter().find(|line| line.line_item_id == *line_id);
        let matched = line_options.and_then(|line| {
            line.available_shippings
                .iter()
                .find(|option| option.country_code == country_code)
        });

        match matched {
            Some(option) => {
                api.update_item_shipping(cart_id, line_id, &option.id).await?;
                info!(local_id = %item.local_id, shipping_id = %option.id, "updated item shipping");
                resolution.updated.push(item.local_id);
            }
            None => {
                warn!(
                    local_id = %item.local_id,
                    line_id = %line_id,
                    "no available shipping for item in {country_code}"
                );
                resolution.skipped.push(SkippedItem {
                    local_id: item.local_id,
                    reason: SkipReason::NoCountryMatch,
                });
            }
        }
    }

    Ok(resolution)
}
