//! Checkout submission step.
//!
//! Runs the review-step submission in strict order: resolve shipping, create
//! the remote checkout, update it with the buyer's details, persist the
//! result into the cart store. Each sub-operation's success gates the next;
//! an error anywhere leaves the workflow on the review step.

use tracing::{info, instrument};

use crate::cart::{CartAction, CartState, CartStore, CheckoutState};
use crate::commerce::types::{Address, Checkout};
use crate::commerce::{CheckoutUpdate, CommerceApi};

use super::shipping::resolve_shipping;
use super::{CheckoutError, TermsAcceptance, TermsError, ValidationError};

/// Everything the submission step needs from the workflow controller.
#[derive(Debug, Clone, Copy)]
pub struct SubmitArgs<'a> {
    /// Collected contact email.
    pub email: Option<&'a str>,
    /// Collected shipping address.
    pub shipping_address: Option<&'a Address>,
    /// Collected billing address.
    pub billing_address: Option<&'a Address>,
    /// Terms checkbox state.
    pub terms: TermsAcceptance,
}

/// Check every precondition that must hold before any network call.
fn validate(state: &CartState, args: &SubmitArgs<'_>) -> Result<(), ValidationError> {
    if state.cart_id.is_none() {
        return Err(ValidationError::MissingCartId);
    }
    if args.shipping_address.is_none() {
        return Err(ValidationError::MissingShippingAddress);
    }
    if args.billing_address.is_none() {
        return Err(ValidationError::MissingBillingAddress);
    }
    if args.email.is_none_or(str::is_empty) {
        return Err(ValidationError::MissingEmail);
    }
    if state.is_empty() {
        return Err(ValidationError::EmptyCart);
    }
    Ok(())
}

/// Run the checkout submission step.
///
/// Order of operations, each gated on the previous:
///
/// 1. resolve shipping per cart line (per-item misses are tolerated)
/// 2. create the remote checkout from the cart
/// 3. update the checkout with email, addresses, and terms flags
/// 4. persist checkout id/email/addresses into the cart store
///
/// Both terms checkboxes must be checked, and all preconditions (cart id,
/// both addresses, email, non-empty cart) must hold, before the first
/// network call is issued.
///
/// # Errors
///
/// [`CheckoutError::TermsNotAccepted`] and [`CheckoutError::Validation`] are
/// local failures with no network traffic. [`CheckoutError::Commerce`] wraps
/// a failed remote call; collected state is untouched so the user can retry.
#[instrument(skip(api, store, args))]
pub async fn submit_checkout(
    api: &dyn CommerceApi,
    store: &mut CartStore,
    args: SubmitArgs<'_>,
) -> Result<Checkout, CheckoutError> {
    if !args.terms.terms_conditions || !args.terms.purchase_conditions {
        return Err(CheckoutError::TermsNotAccepted(TermsError {
            terms_accepted: args.terms.terms_conditions,
            purchase_accepted: args.terms.purchase_conditions,
        }));
    }

    validate(store.state(), &args)?;

    // Validated above, so these cannot fail; destructure without panicking.
    let (Some(email), Some(shipping_address), Some(billing_address), Some(cart_id)) = (
        args.email,
        args.shipping_address,
        args.billing_address,
        store.state().cart_id.clone(),
    ) else {
        return Err(ValidationError::MissingCartId.into());
    };

    let resolution = resolve_shipping(api, store.state(), &billing_address.country_code).await?;
    if !resolution.is_complete() {
        info!(
            skipped = resolution.skipped.len(),
            "proceeding with partial shipping resolution"
        );
    }

    let created = api.create_checkout(&cart_id).await?;
    info!(checkout_id = %created.id, "checkout created");

    let updated = api
        .update_checkout(
            &created.id,
            CheckoutUpdate {
                email: Some(email.to_string()),
                billing_address: Some(billing_address.clone()),
                shipping_address: Some(shipping_address.clone()),
                accepts_terms_conditions: Some(args.terms.terms_conditions),
                accepts_purchase_conditions: Some(args.terms.purchase_conditions),
            },
        )
        .await?;

    store.dispatch(CartAction::SetCheckoutState(CheckoutState {
        id: created.id.clone(),
        email: email.to_string(),
        billing_address: billing_address.clone(),
        shipping_address: shipping_address.clone(),
        accepts_terms_conditions: args.terms.terms_conditions,
        accepts_purchase_conditions: args.terms.purchase_conditions,
    }));

    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_reports_first_missing_field() {
        let state = CartState::new("NO", "NOK");
        let args = SubmitArgs {
            email: None,
            shipping_address: None,
            billing_address: None,
            terms: TermsAcceptance {
                terms_conditions: true,
                purchase_conditions: true,
            },
        };

        // No cart id comes first
        assert_eq!(validate(&state, &args), Err(ValidationError::MissingCartId));
    }

    #[test]
    fn test_validate_rejects_empty_email() {
        let mut store = CartStore::new("NO", "NOK");
        store.dispatch(CartAction::CartCreated {
            cart_id: seastack_core::CartId::new("cart-1"),
            customer_session_id: "session-1".to_string(),
        });

        let address = Address {
            first_name: "Kari".to_string(),
            last_name: "Tester".to_string(),
            phone: "12345678".to_string(),
            phone_code: "+47".to_string(),
            address1: "Storgata 1".to_string(),
            address2: None,
            city: "Oslo".to_string(),
            province: None,
            province_code: None,
            country: "Norway".to_string(),
            country_code: "NO".to_string(),
            zip: "0155".to_string(),
            company: None,
        };
        let args = SubmitArgs {
            email: Some(""),
            shipping_address: Some(&address),
            billing_address: Some(&address),
            terms: TermsAcceptance {
                terms_conditions: true,
                purchase_conditions: true,
            },
        };

        assert_eq!(
            validate(store.state(), &args),
            Err(ValidationError::MissingEmail)
        );
    }
}
