//! Contracts of the integrations API (checkout, payment methods, terminals).

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

/// Responses wrapped in the `{ payload, errors }` envelope.
///
/// The API may answer 2xx while reporting failures in `errors`; the facade
/// turns a non-empty array into an `api_error`.
pub trait ApiEnvelope {
    /// Application errors reported alongside the payload.
    fn errors(&self) -> &[Value];

    /// Returns true if the API reported at least one error.
    fn has_api_errors(&self) -> bool {
        !self.errors().is_empty()
    }
}

macro_rules! impl_api_envelope {
    ($($ty:ty),+ $(,)?) => {
        $(impl ApiEnvelope for $ty {
            fn errors(&self) -> &[Value] {
                &self.errors
            }
        })+
    };
}

/// Payment method identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethodName {
    Daviplata,
    Nequi,
    PayByLink,
    Pos,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct PaymentMethod {
    pub name: PaymentMethodName,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct PaymentMethodsPayload {
    pub payment_methods: Vec<PaymentMethod>,
}

/// Response of `GET /payments/payment-methods`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct PaymentMethodsResponse {
    pub payload: PaymentMethodsPayload,
    pub errors: Vec<Value>,
}

/// A dataphone bound to the merchant account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Terminal {
    pub terminal_model: String,
    pub terminal_serial: String,
    pub status: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct TerminalsPayload {
    pub available_terminals: Vec<Terminal>,
}

/// Response of `GET /payments/binded-terminals`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct BindedTerminalsResponse {
    pub payload: TerminalsPayload,
    pub errors: Vec<Value>,
}

/// Colombian identity document types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentType {
    Cedula,
    Nit,
    CedulaExtranjeria,
    Pep,
    Pasaporte,
    Nuip,
    RegistroCivil,
    DocumentoExtranjeria,
    TarjetaIdentidad,
    Ppt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaxType {
    Vat,
    Consumption,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Tax {
    #[serde(rename = "type")]
    pub kind: TaxType,
    pub base: f64,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct PayerDocument {
    pub document_type: DocumentType,
    #[validate(length(min = 4, max = 15))]
    pub document_number: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Payer {
    #[validate(email)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[validate(nested)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<PayerDocument>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Amount {
    /// ISO 4217 code, e.g. `COP`.
    pub currency: String,
    pub taxes: Vec<Tax>,
    pub tip_amount: f64,
    pub total_amount: f64,
}

/// Body of `POST /payments/app-checkout`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct AppCheckoutRequest {
    #[validate(nested)]
    pub amount: Amount,
    pub payment_method: PaymentMethodName,
    pub terminal_model: String,
    pub terminal_serial: String,
    /// Merchant order reference.
    pub reference: String,
    #[validate(email)]
    pub user_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[validate(nested)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payer: Option<Payer>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct AppCheckoutPayload {
    pub integration_id: String,
}

/// Response of `POST /payments/app-checkout`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct AppCheckoutResponse {
    pub payload: AppCheckoutPayload,
    pub errors: Vec<Value>,
}

impl_api_envelope!(
    PaymentMethodsResponse,
    BindedTerminalsResponse,
    AppCheckoutResponse,
);
