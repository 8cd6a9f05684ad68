//! Payment provider webhook payloads.

use serde_json::Value;

/// Webhook `type` values that announce a payment.
const PAYMENT_TYPES: [&str; 2] = ["payment", "payment.created"];

/// A webhook notification, classified by what the reconciler should do with it.
///
/// Two payload shapes announce payments:
/// - `{"type": "payment" | "payment.created", "data": {"id": ...}}`
/// - the legacy IPN form `{"topic": "payment", "resource": "<id or URL>"}`
///
/// Everything else, including bodies that are not JSON, is `Unrecognized`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentNotification {
    /// A payment event carrying the provider's payment id.
    Payment { payment_id: String },

    /// A payment event without a usable id.
    MissingPaymentId { kind: String },

    /// Any other notification.
    Unrecognized { kind: Option<String> },
}

impl PaymentNotification {
    /// Classifies a raw webhook body.
    pub fn parse(body: &[u8]) -> Self {
        match serde_json::from_slice::<Value>(body) {
            Ok(value) => Self::from_value(&value),
            Err(_) => PaymentNotification::Unrecognized { kind: None },
        }
    }

    /// Classifies an already-decoded webhook body.
    pub fn from_value(value: &Value) -> Self {
        if let Some(kind) = value.get("type").and_then(Value::as_str) {
            if !PAYMENT_TYPES.contains(&kind) {
                return PaymentNotification::Unrecognized {
                    kind: Some(kind.to_string()),
                };
            }
            return match value.pointer("/data/id").and_then(id_string) {
                Some(payment_id) => PaymentNotification::Payment { payment_id },
                None => PaymentNotification::MissingPaymentId {
                    kind: kind.to_string(),
                },
            };
        }

        if let Some(topic) = value.get("topic").and_then(Value::as_str) {
            if topic != "payment" {
                return PaymentNotification::Unrecognized {
                    kind: Some(topic.to_string()),
                };
            }
            let resource = value.get("resource").and_then(id_string);
            return match resource.as_deref().and_then(last_segment) {
                Some(payment_id) => PaymentNotification::Payment {
                    payment_id: payment_id.to_string(),
                },
                None => PaymentNotification::MissingPaymentId {
                    kind: topic.to_string(),
                },
            };
        }

        PaymentNotification::Unrecognized { kind: None }
    }

    /// Short label for metrics.
    pub fn label(&self) -> &'static str {
        match self {
            PaymentNotification::Payment { .. } => "payment",
            PaymentNotification::MissingPaymentId { .. } => "missing_id",
            PaymentNotification::Unrecognized { .. } => "unrecognized",
        }
    }
}

/// Ids arrive as strings or bare numbers depending on the notification version.
fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn last_segment(resource: &str) -> Option<&str> {
    resource
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|s| !s.is_empty())
}
