//! Payment initiation step.
//!
//! Given a completed checkout, a payment provider turns it into a session
//! the buyer finishes in an embedded browser surface. Providers are
//! strategies behind [`PaymentProvider`]; the surface itself is outside this
//! crate - it feeds navigation URLs into [`PaymentFlow::observe_navigation`]
//! and reports closure via [`PaymentFlow::cancel`].
//!
//! Lifecycle: `Idle → AwaitingEmail (optional) → Initiating →
//! AwaitingRedirect → Succeeded | Failed`. Closing the surface before the
//! success URL appears returns to `Idle`; re-initiating always creates a
//! fresh session, never reusing a stale order id. Initiation failures are
//! surfaced and never retried automatically.

mod klarna;
mod stripe;

pub use klarna::KlarnaProvider;
pub use stripe::StripeProvider;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, instrument, warn};

use seastack_core::{CheckoutId, Email, EmailError, OrderId};

use crate::cart::CartStore;
use crate::commerce::{CommerceApi, CommerceError};

/// How a navigation URL is recognized as the provider's success redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuccessMarker {
    /// The URL contains the given fragment.
    Contains(String),
    /// The URL starts with the given prefix.
    Prefix(String),
}

impl SuccessMarker {
    /// Whether a navigated URL signals success.
    #[must_use]
    pub fn matches(&self, url: &str) -> bool {
        match self {
            Self::Contains(fragment) => url.contains(fragment),
            Self::Prefix(prefix) => url.starts_with(prefix),
        }
    }
}

/// A created payment session awaiting completion in the browser surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSession {
    /// Provider order id.
    pub order_id: OrderId,
    /// URL to open in the embedded browser surface.
    pub redirect_url: String,
    /// How to recognize the success redirect.
    pub success_marker: SuccessMarker,
}

/// Everything a provider needs to create a session.
#[derive(Debug, Clone, Copy)]
pub struct SessionContext<'a> {
    /// The completed checkout.
    pub checkout_id: &'a CheckoutId,
    /// Validated buyer email.
    pub email: &'a str,
    /// Buyer country (ISO 3166-1 alpha-2).
    pub country_code: &'a str,
}

/// A payment provider strategy.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Provider name (for logging and selection).
    fn name(&self) -> &'static str;

    /// Create a payment session for a completed checkout.
    async fn create_session(
        &self,
        api: &dyn CommerceApi,
        ctx: SessionContext<'_>,
    ) -> Result<ActiveSession, CommerceError>;
}

/// Errors surfaced by payment initiation.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// No checkout exists yet; the user must complete checkout first.
    #[error("checkout information missing - complete the checkout process first")]
    MissingCheckout,

    /// The cart is empty; nothing to pay for.
    #[error("the cart is empty")]
    EmptyCart,

    /// The supplied email is not syntactically valid.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Session creation failed remotely. The user must re-trigger.
    #[error(transparent)]
    Commerce(#[from] CommerceError),
}

/// Where the payment flow currently stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PaymentPhase {
    /// Nothing in flight.
    #[default]
    Idle,
    /// Waiting for the buyer to supply a valid email.
    AwaitingEmail,
    /// Session creation in flight.
    Initiating,
    /// Session created; waiting for the success redirect.
    AwaitingRedirect(ActiveSession),
    /// Success redirect observed.
    Succeeded {
        /// Provider order id of the completed payment.
        order_id: OrderId,
    },
    /// Session creation failed.
    Failed {
        /// Human-readable failure reason.
        reason: String,
    },
}

/// The payment initiation state machine.
#[derive(Debug, Clone, Default)]
pub struct PaymentFlow {
    phase: PaymentPhase,
}

impl PaymentFlow {
    /// A fresh flow in the idle phase.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current phase.
    #[must_use]
    pub const fn phase(&self) -> &PaymentPhase {
        &self.phase
    }

    /// Start payment initiation with the selected provider.
    ///
    /// Preconditions: the store must hold a checkout state and a non-empty
    /// cart; violating either returns an error and routes the user back to
    /// checkout without touching the phase.
    ///
    /// The email used is `email` if given, else the checkout's email. If it
    /// fails the syntactic check the flow moves to
    /// [`PaymentPhase::AwaitingEmail`] and no session is created.
    ///
    /// # Errors
    ///
    /// [`PaymentError::MissingCheckout`] / [`PaymentError::EmptyCart`] for
    /// precondition violations; [`PaymentError::Commerce`] when session
    /// creation fails (the phase moves to [`PaymentPhase::Failed`] and the
    /// user must re-trigger - there is no automatic retry).
    #[instrument(skip(self, api, provider, store, email), fields(provider = provider.name()))]
    pub async fn initiate(
        &mut self,
        api: &dyn CommerceApi,
        provider: &dyn PaymentProvider,
        store: &CartStore,
        email: Option<&str>,
    ) -> Result<&PaymentPhase, PaymentError> {
        let state = store.state();
        let Some(checkout) = state.checkout.as_ref() else {
            warn!("payment initiation without checkout state");
            return Err(PaymentError::MissingCheckout);
        };
        if state.is_empty() {
            return Err(PaymentError::EmptyCart);
        }

        let candidate = email.unwrap_or(checkout.email.as_str());
        let Ok(email) = Email::parse(candidate) else {
            info!("no valid email, awaiting input");
            self.phase = PaymentPhase::AwaitingEmail;
            return Ok(&self.phase);
        };

        self.phase = PaymentPhase::Initiating;

        let ctx = SessionContext {
            checkout_id: &checkout.id,
            email: email.as_str(),
            country_code: &state.selected_country,
        };

        match provider.create_session(api, ctx).await {
            Ok(session) => {
                info!(order_id = %session.order_id, "payment session created");
                self.phase = PaymentPhase::AwaitingRedirect(session);
                Ok(&self.phase)
            }
            Err(e) => {
                warn!(error = %e, "payment session creation failed");
                self.phase = PaymentPhase::Failed {
                    reason: e.to_string(),
                };
                Err(e.into())
            }
        }
    }

    /// Supply the email requested by [`PaymentPhase::AwaitingEmail`].
    ///
    /// On success the flow returns to idle and the caller re-initiates with
    /// the validated address.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentError::InvalidEmail`] when the address fails the
    /// syntactic check; the flow stays in `AwaitingEmail`.
    pub fn submit_email(&mut self, email: &str) -> Result<Email, PaymentError> {
        let email = Email::parse(email)?;
        if self.phase == PaymentPhase::AwaitingEmail {
            self.phase = PaymentPhase::Idle;
        }
        Ok(email)
    }

    /// Feed a navigation event from the embedded browser surface.
    ///
    /// Returns `true` when the URL matched the active session's success
    /// marker and the flow moved to [`PaymentPhase::Succeeded`].
    pub fn observe_navigation(&mut self, url: &str) -> bool {
        let PaymentPhase::AwaitingRedirect(session) = &self.phase else {
            return false;
        };
        if !session.success_marker.matches(url) {
            return false;
        }
        let order_id = session.order_id.clone();
        info!(%order_id, "payment success redirect observed");
        self.phase = PaymentPhase::Succeeded { order_id };
        true
    }

    /// The buyer closed the embedded browser surface.
    ///
    /// Before the success URL was observed this is a cancellation, not a
    /// failure: the flow returns to idle and the buyer may retry with a
    /// fresh session.
    pub fn cancel(&mut self) {
        if matches!(self.phase, PaymentPhase::AwaitingRedirect(_)) {
            info!("payment surface closed before completion");
            self.phase = PaymentPhase::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(order_id: &str) -> ActiveSession {
        ActiveSession {
            order_id: OrderId::new(order_id),
            redirect_url: "https://pay.example.test/session".to_string(),
            success_marker: SuccessMarker::Contains(format!(
                "https://shop.example.test/return?order_id={order_id}&payment_processor=STRIPE"
            )),
        }
    }

    #[test]
    fn test_marker_contains_matches_anywhere() {
        let marker = SuccessMarker::Contains("order_id=42&payment_processor=STRIPE".to_string());
        assert!(marker.matches(
            "https://shop.example.test/return?order_id=42&payment_processor=STRIPE&extra=1"
        ));
        assert!(!marker.matches("https://shop.example.test/return?order_id=43"));
    }

    #[test]
    fn test_marker_prefix_requires_start() {
        let marker = SuccessMarker::Prefix("https://shop.example.test/return".to_string());
        assert!(marker.matches("https://shop.example.test/return?order_id=42"));
        assert!(!marker.matches("https://evil.example.test/https://shop.example.test/return"));
    }

    #[test]
    fn test_observe_navigation_success() {
        let mut flow = PaymentFlow::new();
        flow.phase = PaymentPhase::AwaitingRedirect(session("42"));

        assert!(!flow.observe_navigation("https://pay.example.test/3ds-challenge"));
        assert!(flow.observe_navigation(
            "https://shop.example.test/return?order_id=42&payment_processor=STRIPE"
        ));
        assert_eq!(
            flow.phase(),
            &PaymentPhase::Succeeded {
                order_id: OrderId::new("42")
            }
        );
    }

    #[test]
    fn test_cancel_returns_to_idle_without_success() {
        let mut flow = PaymentFlow::new();
        flow.phase = PaymentPhase::AwaitingRedirect(session("42"));

        flow.cancel();
        assert_eq!(flow.phase(), &PaymentPhase::Idle);

        // Navigation after cancel does nothing
        assert!(!flow.observe_navigation(
            "https://shop.example.test/return?order_id=42&payment_processor=STRIPE"
        ));
    }

    #[test]
    fn test_cancel_outside_redirect_phase_is_noop() {
        let mut flow = PaymentFlow::new();
        flow.cancel();
        assert_eq!(flow.phase(), &PaymentPhase::Idle);

        flow.phase = PaymentPhase::Succeeded {
            order_id: OrderId::new("42"),
        };
        flow.cancel();
        assert!(matches!(flow.phase(), PaymentPhase::Succeeded { .. }));
    }

    #[test]
    fn test_submit_email_validates() {
        let mut flow = PaymentFlow::new();
        flow.phase = PaymentPhase::AwaitingEmail;

        assert!(matches!(
            flow.submit_email("not-an-email"),
            Err(PaymentError::InvalidEmail(_))
        ));
        assert_eq!(flow.phase(), &PaymentPhase::AwaitingEmail);

        let email = flow.submit_email("kari@example.com");
        assert!(email.is_ok());
        assert_eq!(flow.phase(), &PaymentPhase::Idle);
    }
}
