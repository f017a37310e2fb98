//! Webhook helpers bound to the client's secret key, and the notification
//! fallback service.

use http::{HeaderMap, Method};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{Bold, RequestConfig, endpoint};
use crate::BoldError;
use crate::executor::{Issue, JsonSchema, Schema};
use crate::http::HttpClient;
use crate::models::{WebhookNotification, WebhookNotificationsResponse};
use crate::signature::{self, SIGNATURE_HEADER, WebhookVerification};
use crate::time::Sleeper;

/// Webhooks resource, obtained from [`Bold::webhooks`].
#[derive(Debug, Clone, Copy)]
pub struct Webhooks<'a, H, S> {
    bold: &'a Bold<H, S>,
}

impl<'a, H, S> Webhooks<'a, H, S> {
    pub(super) const fn new(bold: &'a Bold<H, S>) -> Self {
        Self { bold }
    }

    /// Verifies a webhook signature with the client's secret key.
    #[must_use]
    pub fn verify(&self, payload: impl AsRef<[u8]>, signature: &str) -> WebhookVerification {
        signature::verify_signature(payload, signature, &self.bold.secret_key)
    }

    /// Verifies a webhook signature with another secret key.
    #[must_use]
    pub fn verify_with(
        &self,
        payload: impl AsRef<[u8]>,
        signature: &str,
        secret_key: &str,
    ) -> WebhookVerification {
        signature::verify_signature(payload, signature, secret_key)
    }

    /// Verifies a webhook using the `x-bold-signature` request header.
    #[must_use]
    pub fn verify_headers(
        &self,
        headers: &HeaderMap,
        payload: impl AsRef<[u8]>,
    ) -> WebhookVerification {
        let Some(value) = headers.get(SIGNATURE_HEADER) else {
            return WebhookVerification::invalid("Signature is required");
        };
        match value.to_str() {
            Ok(signature) => self.verify(payload, signature),
            Err(_) => WebhookVerification::invalid("Invalid signature"),
        }
    }

    /// Signs `payload` with the client's secret key.
    #[must_use]
    pub fn generate_signature(&self, payload: impl AsRef<[u8]>) -> String {
        signature::generate_signature(payload, &self.bold.secret_key)
    }

    /// Signs `payload` with another secret key.
    #[must_use]
    pub fn generate_signature_with(&self, payload: impl AsRef<[u8]>, secret_key: &str) -> String {
        signature::generate_signature(payload, secret_key)
    }

    /// Parses a payload as JSON without validation; `None` if malformed.
    #[must_use]
    pub fn parse<T: DeserializeOwned>(&self, payload: &str) -> Option<T> {
        signature::parse_payload(payload)
    }

    /// Parses and validates a webhook notification.
    ///
    /// # Errors
    ///
    /// `invalid_response` with the issues found. A payload that is not JSON
    /// yields a single root issue and keeps the payload text as `raw`.
    pub fn parse_notification(&self, payload: &str) -> Result<WebhookNotification, BoldError> {
        let raw: Value = serde_json::from_str(payload).map_err(|e| BoldError::InvalidResponse {
            issues: vec![Issue::new("", e.to_string())],
            raw: Value::String(payload.to_string()),
        })?;

        JsonSchema::<WebhookNotification>::new()
            .validate(&raw)
            .map_err(|issues| BoldError::InvalidResponse { issues, raw })
    }
}

impl<H: HttpClient, S: Sleeper> Webhooks<'_, H, S> {
    /// Fetches the notifications recorded for a payment.
    ///
    /// With `is_external_reference`, `payment_id` is the merchant's own
    /// reference instead of Bold's payment id.
    ///
    /// # Errors
    ///
    /// Any executor error.
    pub async fn notifications(
        &self,
        payment_id: &str,
        is_external_reference: bool,
        config: RequestConfig,
    ) -> Result<WebhookNotificationsResponse, BoldError> {
        let mut url = endpoint(
            &self.bold.base_urls.integrations,
            &["payments", "webhook", "notifications", payment_id],
        )?;
        if is_external_reference {
            url.query_pairs_mut()
                .append_pair("is_external_reference", "true");
        }

        let spec = self.bold.authorized(Method::GET, url, config)?;
        self.bold.call(spec).await
    }
}
