//! OAuth client-credentials tokens.

use http::Method;

use super::{Bold, RequestConfig, endpoint};
use crate::BoldError;
use crate::executor::{JsonSchema, RequestBody, RequestSpec};
use crate::http::HttpClient;
use crate::models::OAuthToken;
use crate::time::Sleeper;

/// OAuth resource, obtained from [`Bold::oauth`].
#[derive(Debug, Clone, Copy)]
pub struct OAuth<'a, H, S> {
    bold: &'a Bold<H, S>,
}

impl<'a, H, S> OAuth<'a, H, S> {
    pub(super) const fn new(bold: &'a Bold<H, S>) -> Self {
        Self { bold }
    }

    /// Returns the configured credentials, or the `config` error naming the
    /// first missing one.
    fn credentials(&self) -> Result<(&'a str, &'a str), BoldError> {
        let missing = |field| {
            BoldError::config("clientId and clientSecret are required for OAuth token", field)
        };
        let client_id = self
            .bold
            .client_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| missing("client_id"))?;
        let client_secret = self
            .bold
            .client_secret
            .as_deref()
            .filter(|secret| !secret.is_empty())
            .ok_or_else(|| missing("client_secret"))?;
        Ok((client_id, client_secret))
    }
}

impl<H: HttpClient, S: Sleeper> OAuth<'_, H, S> {
    /// Requests an access token with the client-credentials grant.
    ///
    /// The request is form-encoded and carries no identity-key header.
    ///
    /// # Errors
    ///
    /// - `config` (field `client_id` or `client_secret`) when credentials
    ///   are missing; nothing is sent
    /// - any executor error
    pub async fn get_token(&self, config: RequestConfig) -> Result<OAuthToken, BoldError> {
        let (client_id, client_secret) = self.credentials()?;
        let url = endpoint(&self.bold.base_urls.oauth, &["oauth", "token"])?;

        let spec = RequestSpec::new(Method::POST, url, JsonSchema::new()).with_form_body(
            RequestBody::form([
                ("grant_type", "client_credentials"),
                ("client_id", client_id),
                ("client_secret", client_secret),
            ]),
        );
        let spec = config.apply(spec, self.bold.defaults)?;

        self.bold.call(spec).await
    }
}
