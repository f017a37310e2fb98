//! App checkout, payment methods and transaction status.

use http::Method;

use super::{Bold, RequestConfig, endpoint};
use crate::BoldError;
use crate::http::HttpClient;
use crate::models::{
    AppCheckoutRequest, AppCheckoutResponse, PaymentMethodsResponse, PaymentVoucherResponse,
};
use crate::time::Sleeper;

/// Payments resource, obtained from [`Bold::payments`].
#[derive(Debug, Clone, Copy)]
pub struct Payments<'a, H, S> {
    bold: &'a Bold<H, S>,
}

impl<'a, H, S> Payments<'a, H, S> {
    pub(super) const fn new(bold: &'a Bold<H, S>) -> Self {
        Self { bold }
    }
}

impl<H: HttpClient, S: Sleeper> Payments<'_, H, S> {
    /// Starts a payment on a terminal through app checkout.
    ///
    /// Pass an idempotency key in `config` before enabling retries.
    ///
    /// # Errors
    ///
    /// `api_error` if the envelope reports errors, or any executor error.
    pub async fn create(
        &self,
        input: &AppCheckoutRequest,
        config: RequestConfig,
    ) -> Result<AppCheckoutResponse, BoldError> {
        let url = endpoint(
            &self.bold.base_urls.integrations,
            &["payments", "app-checkout"],
        )?;
        let body = serde_json::to_value(input)
            .map_err(|e| BoldError::network_with_cause("Failed to serialize request body", e))?;
        let spec = self
            .bold
            .authorized(Method::POST, url, config)?
            .with_json_body(body);

        self.bold.call_enveloped(spec).await
    }

    /// Lists the payment methods enabled for the merchant.
    ///
    /// # Errors
    ///
    /// `api_error` if the envelope reports errors, or any executor error.
    pub async fn methods(&self, config: RequestConfig) -> Result<PaymentMethodsResponse, BoldError> {
        let url = endpoint(
            &self.bold.base_urls.integrations,
            &["payments", "payment-methods"],
        )?;
        let spec = self.bold.authorized(Method::GET, url, config)?;
        self.bold.call_enveloped(spec).await
    }

    /// Fetches the voucher (status) of a sale.
    ///
    /// # Errors
    ///
    /// Any executor error.
    pub async fn status(
        &self,
        sale_id: &str,
        config: RequestConfig,
    ) -> Result<PaymentVoucherResponse, BoldError> {
        let url = endpoint(
            &self.bold.base_urls.payments,
            &["v2", "payment-voucher", sale_id],
        )?;
        let spec = self.bold.authorized(Method::GET, url, config)?;
        self.bold.call(spec).await
    }
}
