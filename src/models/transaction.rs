//! Payment voucher (transaction status) contracts.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

/// Lifecycle state of a sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    NoTransactionFound,
    Processing,
    Pending,
    Approved,
    Rejected,
    Failed,
    Voided,
}

/// Voucher returned for a sale.
///
/// Fields the API adds beyond the ones listed here are kept in `extra` and
/// written back out on serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct PaymentVoucherResponse {
    pub link_id: String,
    pub total: f64,
    pub subtotal: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<String>,
    pub payment_status: PaymentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payer_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_date: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
