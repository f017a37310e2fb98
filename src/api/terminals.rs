//! Dataphones bound to the merchant.

use http::Method;

use super::{Bold, RequestConfig, endpoint};
use crate::BoldError;
use crate::http::HttpClient;
use crate::models::BindedTerminalsResponse;
use crate::time::Sleeper;

/// Terminals resource, obtained from [`Bold::terminals`].
#[derive(Debug, Clone, Copy)]
pub struct Terminals<'a, H, S> {
    bold: &'a Bold<H, S>,
}

impl<'a, H, S> Terminals<'a, H, S> {
    pub(super) const fn new(bold: &'a Bold<H, S>) -> Self {
        Self { bold }
    }
}

impl<H: HttpClient, S: Sleeper> Terminals<'_, H, S> {
    /// Lists the terminals available to the merchant.
    ///
    /// # Errors
    ///
    /// `api_error` if the envelope reports errors, or any executor error.
    pub async fn list(&self, config: RequestConfig) -> Result<BindedTerminalsResponse, BoldError> {
        let url = endpoint(
            &self.bold.base_urls.integrations,
            &["payments", "binded-terminals"],
        )?;
        let spec = self.bold.authorized(Method::GET, url, config)?;
        self.bold.call_enveloped(spec).await
    }
}
