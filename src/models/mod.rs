//! Request and response contracts of the Bold API.
//!
//! Every response type derives `serde::Deserialize` for structure and
//! `validator::Validate` for content rules, so it can be used with
//! [`JsonSchema`](crate::executor::JsonSchema).

mod integrations;
mod oauth;
mod transaction;
mod webhooks;

pub use integrations::{
    Amount, ApiEnvelope, AppCheckoutPayload, AppCheckoutRequest, AppCheckoutResponse,
    BindedTerminalsResponse, DocumentType, Payer, PayerDocument, PaymentMethod,
    PaymentMethodName, PaymentMethodsPayload, PaymentMethodsResponse, Tax, TaxType, Terminal,
    TerminalsPayload,
};
pub use oauth::OAuthToken;
pub use transaction::{PaymentStatus, PaymentVoucherResponse};
pub use webhooks::{
    CaptureMode, CardBrand, CardType, IntegrationType, PaymentMethodType, WebhookAmount,
    WebhookCard, WebhookData, WebhookEventType, WebhookMetadata, WebhookNotification,
    WebhookNotificationsResponse, WebhookTax,
};
