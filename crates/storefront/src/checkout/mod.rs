//! Checkout workflow: Cart → Shipping → Billing → Review → Payment.
//!
//! [`CheckoutFlow`] is the workflow controller. It owns the current step and
//! the form state collected so far (addresses, email, the "same as shipping"
//! choice) and nothing else - remote state lives in the cart store and the
//! remote service. Every submission returns an explicit `Result`; on error
//! the controller stays on the current step with its collected state intact,
//! so the user can retry without re-entering anything.

mod shipping;
mod submit;

pub use shipping::{ShippingResolution, SkipReason, SkippedItem, resolve_shipping};
pub use submit::{SubmitArgs, submit_checkout};

use thiserror::Error;
use tracing::instrument;

use crate::cart::{CartAction, CartStore, Screen};
use crate::commerce::types::{Address, Checkout};
use crate::commerce::{CommerceApi, CommerceError};

/// The steps of the checkout workflow, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WorkflowStep {
    /// Cart summary.
    Cart,
    /// Shipping address and contact email form.
    Shipping,
    /// Billing address form (skipped when billing aliases shipping).
    Billing,
    /// Order review and terms acceptance.
    Review,
    /// Payment provider selection and initiation.
    Payment,
}

impl WorkflowStep {
    /// The step a back action returns to. `Cart` is the floor.
    #[must_use]
    pub const fn previous(self) -> Self {
        match self {
            Self::Cart | Self::Shipping => Self::Cart,
            Self::Billing => Self::Shipping,
            Self::Review => Self::Billing,
            Self::Payment => Self::Review,
        }
    }
}

/// A checkout precondition that failed before any network call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// No remote cart exists.
    #[error("no cart id - add an item to the cart first")]
    MissingCartId,
    /// No shipping address collected.
    #[error("shipping address information is missing")]
    MissingShippingAddress,
    /// No billing address collected.
    #[error("billing address information is missing")]
    MissingBillingAddress,
    /// No email collected.
    #[error("email address is missing")]
    MissingEmail,
    /// The cart has no lines.
    #[error("the cart is empty")]
    EmptyCart,
}

/// Which terms checkboxes are unchecked, for UI highlighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermsError {
    /// Terms and conditions box is checked.
    pub terms_accepted: bool,
    /// Purchase conditions box is checked.
    pub purchase_accepted: bool,
}

/// Errors surfaced by checkout workflow steps.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// A precondition failed; no network call was made.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// One or both terms checkboxes are unchecked; no network call was made.
    #[error("both the terms and the purchase conditions must be accepted")]
    TermsNotAccepted(TermsError),

    /// A remote call failed. Collected form state is preserved for retry.
    #[error(transparent)]
    Commerce(#[from] CommerceError),
}

/// The shipping form: address, contact email, and the billing choice.
#[derive(Debug, Clone)]
pub struct ShippingForm {
    /// Shipping address.
    pub address: Address,
    /// Contact email.
    pub email: String,
    /// Reuse the shipping address as the billing address.
    pub same_as_billing: bool,
}

/// Terms acceptance state at review submission.
#[derive(Debug, Clone, Copy)]
pub struct TermsAcceptance {
    /// Terms and conditions accepted.
    pub terms_conditions: bool,
    /// Purchase conditions accepted.
    pub purchase_conditions: bool,
}

/// The checkout workflow controller.
#[derive(Debug, Clone)]
pub struct CheckoutFlow {
    step: WorkflowStep,
    shipping_address: Option<Address>,
    billing_address: Option<Address>,
    email: Option<String>,
    same_as_shipping: bool,
}

impl Default for CheckoutFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckoutFlow {
    /// A fresh workflow at the cart step.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            step: WorkflowStep::Cart,
            shipping_address: None,
            billing_address: None,
            email: None,
            same_as_shipping: true,
        }
    }

    /// The current step.
    #[must_use]
    pub const fn step(&self) -> WorkflowStep {
        self.step
    }

    /// The collected shipping address.
    #[must_use]
    pub const fn shipping_address(&self) -> Option<&Address> {
        self.shipping_address.as_ref()
    }

    /// The collected billing address.
    #[must_use]
    pub const fn billing_address(&self) -> Option<&Address> {
        self.billing_address.as_ref()
    }

    /// The collected contact email.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Proceed from the cart summary to the shipping form.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyCart`] when the cart has no lines;
    /// the workflow stays on the cart step.
    pub fn proceed_to_shipping(&mut self, store: &CartStore) -> Result<WorkflowStep, CheckoutError> {
        if store.state().is_empty() {
            return Err(ValidationError::EmptyCart.into());
        }
        self.step = WorkflowStep::Shipping;
        Ok(self.step)
    }

    /// Submit the shipping form.
    ///
    /// With "same as shipping" checked the billing address becomes a copy of
    /// the shipping address and the billing step is skipped entirely.
    pub fn submit_shipping(&mut self, form: ShippingForm) -> WorkflowStep {
        self.email = Some(form.email);
        self.same_as_shipping = form.same_as_billing;
        if form.same_as_billing {
            self.billing_address = Some(form.address.clone());
            self.step = WorkflowStep::Review;
        } else {
            self.billing_address = None;
            self.step = WorkflowStep::Billing;
        }
        self.shipping_address = Some(form.address);
        self.step
    }

    /// Submit the billing form.
    pub fn submit_billing(&mut self, address: Address) -> WorkflowStep {
        self.billing_address = Some(address);
        self.step = WorkflowStep::Review;
        self.step
    }

    /// Go back one step.
    pub fn back(&mut self) -> WorkflowStep {
        self.step = self.step.previous();
        self.step
    }

    /// Submit the review step: run the checkout submission step and advance
    /// to the payment step on success.
    ///
    /// On any error the workflow stays on the review step with all collected
    /// state intact.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckoutError`] per the submission step's contract: local
    /// validation and terms errors issue no network calls; remote errors are
    /// recoverable by retrying from review.
    #[instrument(skip(self, api, store))]
    pub async fn submit_review(
        &mut self,
        api: &dyn CommerceApi,
        store: &mut CartStore,
        terms: TermsAcceptance,
    ) -> Result<Checkout, CheckoutError> {
        let args = SubmitArgs {
            email: self.email.as_deref(),
            shipping_address: self.shipping_address.as_ref(),
            billing_address: self.billing_address.as_ref(),
            terms,
        };

        let checkout = submit_checkout(api, store, args).await?;

        self.step = WorkflowStep::Payment;
        store.dispatch(CartAction::SetSelectedScreen(Screen::Payment));
        Ok(checkout)
    }
}
