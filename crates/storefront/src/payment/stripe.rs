//! Stripe provider: hosted checkout link.
//!
//! Session creation returns an order id and a fully-formed checkout URL to
//! open in the embedded browser surface. Success is the surface navigating
//! to the configured return base URL carrying the order id and a provider
//! tag as query parameters.

use async_trait::async_trait;

use crate::commerce::{CommerceApi, CommerceError};
use crate::config::PaymentConfig;

use super::{ActiveSession, PaymentProvider, SessionContext, SuccessMarker};

/// Payment method name the commerce API expects for Stripe sessions.
const PAYMENT_METHOD: &str = "Stripe";

/// Stripe hosted-checkout provider.
#[derive(Debug, Clone)]
pub struct StripeProvider {
    return_base_url: String,
}

impl StripeProvider {
    /// Build the provider from the payment configuration.
    #[must_use]
    pub fn new(config: &PaymentConfig) -> Self {
        Self {
            return_base_url: config.return_base_url.clone(),
        }
    }
}

#[async_trait]
impl PaymentProvider for StripeProvider {
    fn name(&self) -> &'static str {
        "stripe"
    }

    async fn create_session(
        &self,
        api: &dyn CommerceApi,
        ctx: SessionContext<'_>,
    ) -> Result<ActiveSession, CommerceError> {
        let session = api
            .create_payment_stripe(ctx.checkout_id, ctx.email, PAYMENT_METHOD, &self.return_base_url)
            .await?;

        let success_marker = SuccessMarker::Contains(format!(
            "{}?order_id={}&payment_processor=STRIPE",
            self.return_base_url, session.order_id
        ));

        Ok(ActiveSession {
            order_id: session.order_id,
            redirect_url: session.checkout_url,
            success_marker,
        })
    }
}
