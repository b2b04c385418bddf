//! Klarna provider: server-rendered widget.
//!
//! Session creation returns an order id only; the redirect target is a fixed
//! commerce-server endpoint that renders the Klarna widget for the checkout.
//! Success is the surface navigating anywhere under the configured return
//! base URL.

use async_trait::async_trait;

use crate::commerce::{CommerceApi, CommerceError};
use crate::config::PaymentConfig;

use super::{ActiveSession, PaymentProvider, SessionContext, SuccessMarker};

/// Klarna widget provider.
#[derive(Debug, Clone)]
pub struct KlarnaProvider {
    return_base_url: String,
    server_base_url: String,
}

impl KlarnaProvider {
    /// Build the provider from the payment configuration.
    #[must_use]
    pub fn new(config: &PaymentConfig) -> Self {
        Self {
            return_base_url: config.return_base_url.clone(),
            server_base_url: config.server_base_url.clone(),
        }
    }
}

#[async_trait]
impl PaymentProvider for KlarnaProvider {
    fn name(&self) -> &'static str {
        "klarna"
    }

    async fn create_session(
        &self,
        api: &dyn CommerceApi,
        ctx: SessionContext<'_>,
    ) -> Result<ActiveSession, CommerceError> {
        // Klarna requires an uppercase ISO country code
        let country_code = ctx.country_code.to_uppercase();

        let session = api
            .create_payment_klarna(ctx.checkout_id, &country_code, &self.return_base_url, ctx.email)
            .await?;

        let redirect_url = format!(
            "{}/api/checkout/{}/payment-klarna-html-body",
            self.server_base_url, ctx.checkout_id
        );

        Ok(ActiveSession {
            order_id: session.order_id,
            redirect_url,
            success_marker: SuccessMarker::Prefix(self.return_base_url.clone()),
        })
    }
}
