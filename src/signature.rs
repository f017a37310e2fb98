//! Webhook signature verification.
//!
//! Bold signs each webhook by Base64-encoding the raw request body and
//! computing HMAC-SHA256 over that Base64 text with the merchant's secret
//! key. The lowercase hex digest travels in the [`SIGNATURE_HEADER`] header.
//!
//! Verification must run on the exact bytes received; re-serialized JSON
//! will not match.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use hmac::digest::InvalidLength;
use hmac::{Hmac, Mac};
use serde::de::DeserializeOwned;
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the webhook signature.
pub const SIGNATURE_HEADER: &str = "x-bold-signature";

/// Outcome of a signature check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookVerification {
    /// Whether the signature matched.
    pub valid: bool,
    /// Why verification failed; `None` when valid.
    pub error: Option<String>,
}

impl WebhookVerification {
    /// A passing result.
    #[must_use]
    pub const fn valid() -> Self {
        Self {
            valid: true,
            error: None,
        }
    }

    /// A failing result with the given reason.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            error: Some(message.into()),
        }
    }
}

/// Verifies `signature` against the raw webhook `payload`.
///
/// Empty payloads and empty signatures are rejected before any HMAC work.
/// A signature of the wrong length is rejected without the constant-time
/// comparison; equal-length signatures are compared in constant time.
///
/// # Example
///
/// ```
/// use bold_sdk::signature::{generate_signature, verify_signature};
///
/// let body = br#"{"type":"SALE_APPROVED"}"#;
/// let signature = generate_signature(body, "secret");
///
/// assert!(verify_signature(body, &signature, "secret").valid);
/// assert!(!verify_signature(body, &signature, "other").valid);
/// ```
pub fn verify_signature(
    payload: impl AsRef<[u8]>,
    signature: &str,
    secret_key: &str,
) -> WebhookVerification {
    let payload = payload.as_ref();
    if payload.is_empty() {
        return WebhookVerification::invalid("Payload is required");
    }
    if signature.is_empty() {
        return WebhookVerification::invalid("Signature is required");
    }

    let expected = match compute_signature(payload, secret_key) {
        Ok(expected) => expected,
        Err(err) => return WebhookVerification::invalid(err.to_string()),
    };

    if signature.len() != expected.len() {
        return WebhookVerification::invalid("Invalid signature");
    }

    if bool::from(signature.as_bytes().ct_eq(expected.as_bytes())) {
        WebhookVerification::valid()
    } else {
        WebhookVerification::invalid("Invalid signature")
    }
}

/// Computes the signature Bold would send for `payload`.
///
/// Mostly useful for building webhook fixtures in tests.
///
/// # Panics
///
/// Never in practice: HMAC accepts keys of any length.
#[must_use]
pub fn generate_signature(payload: impl AsRef<[u8]>, secret_key: &str) -> String {
    compute_signature(payload.as_ref(), secret_key).expect("HMAC accepts keys of any length")
}

/// Parses a webhook body as JSON, returning `None` if it is malformed or
/// does not fit `T`.
#[must_use]
pub fn parse_payload<T: DeserializeOwned>(payload: &str) -> Option<T> {
    serde_json::from_str(payload).ok()
}

fn compute_signature(payload: &[u8], secret_key: &str) -> Result<String, InvalidLength> {
    let encoded = BASE64.encode(payload);
    let mut mac = HmacSha256::new_from_slice(secret_key.as_bytes())?;
    mac.update(encoded.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}
