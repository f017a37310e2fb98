//! Webhook notification contracts.
//!
//! Notifications are open-ended: the metadata, data and notification
//! objects keep any field they do not name in `extra`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use super::TaxType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WebhookEventType {
    SaleApproved,
    SaleRejected,
    VoidApproved,
    VoidRejected,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct WebhookTax {
    pub base: f64,
    #[serde(rename = "type")]
    pub kind: TaxType,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct WebhookAmount {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    pub total: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taxes: Option<Vec<WebhookTax>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tip: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardBrand {
    Visa,
    VisaElectron,
    Mastercard,
    Maestro,
    AmericanExpress,
    Codensa,
    Diners,
    Discover,
    Tuya,
    Sodexo,
    Olimpica,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CaptureMode {
    Chip,
    ContactlessChip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardType {
    Debit,
    Credit,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct WebhookCard {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capture_mode: Option<CaptureMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<CardBrand>,
    /// Some notifications name the brand `franchise` instead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub franchise: Option<CardBrand>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cardholder_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terminal_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub masked_pan: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installments: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_type: Option<CardType>,
}

impl WebhookCard {
    /// The card brand, whichever field carried it.
    #[must_use]
    pub fn brand(&self) -> Option<CardBrand> {
        self.brand.or(self.franchise)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethodType {
    Card,
    CardWeb,
    SoftPos,
    Nequi,
    BotonBancolombia,
    Pse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IntegrationType {
    Pos,
    SoftPos,
    ApiIntegrations,
    Link,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct WebhookMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct WebhookData {
    pub payment_id: String,
    pub merchant_id: String,
    pub created_at: String,
    pub amount: WebhookAmount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<WebhookMetadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payer_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethodType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card: Option<WebhookCard>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approval_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integration: Option<IntegrationType>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A webhook event as delivered to the merchant endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct WebhookNotification {
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: WebhookEventType,
    pub subject: String,
    pub source: String,
    pub spec_version: String,
    /// Event time as sent by Bold (epoch-based number).
    pub time: i64,
    pub data: WebhookData,
    pub datacontenttype: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response of the notifications fallback service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct WebhookNotificationsResponse {
    pub notifications: Vec<WebhookNotification>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::{JsonSchema, Schema};
    use serde_json::json;

    fn notification() -> Value {
        json!({
            "id": "9f3c1a2e",
            "type": "SALE_APPROVED",
            "subject": "PAY_123",
            "source": "/payments",
            "spec_version": "1.0",
            "time": 1_732_000_000_000_i64,
            "datacontenttype": "application/json",
            "data": {
                "payment_id": "PAY_123",
                "merchant_id": "MRC_1",
                "created_at": "2024-11-19T10:00:00Z",
                "amount": {"currency": "COP", "total": 59900, "taxes": [
                    {"base": 50336, "type": "VAT", "value": 9564}
                ]},
                "metadata": {"reference": "ORD-77", "channel": "web"},
                "payment_method": "CARD",
                "card": {"franchise": "UNKNOWN", "card_type": "CREDIT"},
                "integration": "API_INTEGRATIONS",
                "risk_score": 3
            },
            "delivery_attempt": 2
        })
    }

    #[test]
    fn notification_decodes_and_keeps_unknown_fields() {
        let parsed = JsonSchema::<WebhookNotification>::new()
            .validate(&notification())
            .unwrap();

        assert_eq!(parsed.event_type, WebhookEventType::SaleApproved);
        assert_eq!(parsed.extra["delivery_attempt"], 2);
        assert_eq!(parsed.data.extra["risk_score"], 3);
        let metadata = parsed.data.metadata.as_ref().unwrap();
        assert_eq!(metadata.reference.as_deref(), Some("ORD-77"));
        assert_eq!(metadata.extra["channel"], "web");
    }

    #[test]
    fn card_brand_falls_back_to_franchise() {
        let parsed = JsonSchema::<WebhookNotification>::new()
            .validate(&notification())
            .unwrap();

        let card = parsed.data.card.unwrap();
        assert_eq!(card.brand(), Some(CardBrand::Unknown));
        assert_eq!(card.card_type, Some(CardType::Credit));
    }

    #[test]
    fn brand_field_wins_over_franchise() {
        let card = WebhookCard {
            brand: Some(CardBrand::Visa),
            franchise: Some(CardBrand::Mastercard),
            ..WebhookCard::default()
        };

        assert_eq!(card.brand(), Some(CardBrand::Visa));
    }

    #[test]
    fn unknown_event_type_is_rejected() {
        let mut raw = notification();
        raw["type"] = json!("SALE_PENDING");

        assert!(JsonSchema::<WebhookNotification>::new().validate(&raw).is_err());
    }

    #[test]
    fn missing_required_data_field_is_rejected() {
        let mut raw = notification();
        raw["data"].as_object_mut().unwrap().remove("merchant_id");

        assert!(JsonSchema::<WebhookNotification>::new().validate(&raw).is_err());
    }

    #[test]
    fn card_brand_wire_names() {
        assert_eq!(
            serde_json::to_value(CardBrand::AmericanExpress).unwrap(),
            "AMERICAN_EXPRESS"
        );
        assert_eq!(
            serde_json::to_value(PaymentMethodType::BotonBancolombia).unwrap(),
            "BOTON_BANCOLOMBIA"
        );
    }
}
