//! WhatsApp confirmation dispatch.

use std::sync::Arc;

use domain::{ContactNumber, EnrollmentRecord, ValidatedEnrollment};
use gateways::{AlertSink, Messenger};

/// Who to notify and about which course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient {
    pub name: String,
    pub contact: ContactNumber,
    pub course: String,
}

impl From<&EnrollmentRecord> for Recipient {
    fn from(record: &EnrollmentRecord) -> Self {
        Self {
            name: record.name.clone(),
            contact: record.contact.clone(),
            course: record.course.clone(),
        }
    }
}

impl From<ValidatedEnrollment> for Recipient {
    fn from(enrollment: ValidatedEnrollment) -> Self {
        Self {
            name: enrollment.name,
            contact: enrollment.contact,
            course: enrollment.course,
        }
    }
}

/// Result of a confirmation attempt. Failures are values, never errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationOutcome {
    Sent { message_id: String },
    Failed { reason: String },
}

impl NotificationOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, NotificationOutcome::Sent { .. })
    }
}

/// Builds the enrollment confirmation text.
pub fn confirmation_message(name: &str, course: &str) -> String {
    format!(
        "Olá {name}! Sua inscrição no curso {course} foi confirmada. Em breve você receberá seus dados de acesso."
    )
}

/// Sends enrollment confirmations over WhatsApp.
///
/// Delivery failures are logged, counted and forwarded to the alert sink;
/// they never propagate to the caller.
pub struct NotificationDispatcher {
    messenger: Arc<dyn Messenger>,
    alerts: Arc<dyn AlertSink>,
}

impl NotificationDispatcher {
    /// Creates a dispatcher over the given messenger and alert sink.
    pub fn new(messenger: Arc<dyn Messenger>, alerts: Arc<dyn AlertSink>) -> Self {
        Self { messenger, alerts }
    }

    /// Sends the confirmation message to the recipient's contact digits.
    #[tracing::instrument(skip(self, recipient), fields(course = %recipient.course))]
    pub async fn dispatch(&self, recipient: &Recipient) -> NotificationOutcome {
        let digits = recipient.contact.digits();
        if digits.is_empty() {
            return self
                .fail(recipient, "contact has no digits".to_string())
                .await;
        }

        let body = confirmation_message(&recipient.name, &recipient.course);
        match self.messenger.send_whatsapp(&digits, &body).await {
            Ok(receipt) => {
                metrics::counter!("notifications_sent_total").increment(1);
                tracing::info!(message_id = %receipt.message_id, "confirmation sent");
                NotificationOutcome::Sent {
                    message_id: receipt.message_id,
                }
            }
            Err(e) => self.fail(recipient, e.to_string()).await,
        }
    }

    async fn fail(&self, recipient: &Recipient, reason: String) -> NotificationOutcome {
        metrics::counter!("notifications_failed_total").increment(1);
        tracing::error!(reason = %reason, "failed to send WhatsApp confirmation");
        self.alerts
            .alert(&format!(
                "WhatsApp confirmation for {} ({}) failed: {reason}",
                recipient.name, recipient.course
            ))
            .await;
        NotificationOutcome::Failed { reason }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gateways::{InMemoryAlertSink, InMemoryMessenger};

    fn setup() -> (NotificationDispatcher, InMemoryMessenger, InMemoryAlertSink) {
        let messenger = InMemoryMessenger::new();
        let alerts = InMemoryAlertSink::new();
        let dispatcher =
            NotificationDispatcher::new(Arc::new(messenger.clone()), Arc::new(alerts.clone()));
        (dispatcher, messenger, alerts)
    }

    fn ana(contact: &str) -> Recipient {
        Recipient {
            name: "Ana".to_string(),
            contact: ContactNumber::new(contact),
            course: "EEB".to_string(),
        }
    }

    #[test]
    fn test_confirmation_message() {
        assert_eq!(
            confirmation_message("Ana", "EEB"),
            "Olá Ana! Sua inscrição no curso EEB foi confirmada. Em breve você receberá seus dados de acesso."
        );
    }

    #[tokio::test]
    async fn test_sends_to_normalized_digits() {
        let (dispatcher, messenger, alerts) = setup();

        let outcome = dispatcher.dispatch(&ana("+55 (11) 99999-9999")).await;

        assert!(outcome.is_sent());
        let sent = messenger.sent_messages().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "5511999999999");
        assert_eq!(sent[0].body, confirmation_message("Ana", "EEB"));
        assert!(alerts.alerts().await.is_empty());
    }

    #[tokio::test]
    async fn test_send_failure_is_reported_not_raised() {
        let (dispatcher, messenger, alerts) = setup();
        messenger.set_fail_on_send(true).await;

        let outcome = dispatcher.dispatch(&ana("5511999999999")).await;

        assert!(matches!(outcome, NotificationOutcome::Failed { .. }));
        assert_eq!(messenger.attempts().await, 1);
        let reported = alerts.alerts().await;
        assert_eq!(reported.len(), 1);
        assert!(reported[0].contains("Ana"));
    }

    #[tokio::test]
    async fn test_contact_without_digits_skips_messenger() {
        let (dispatcher, messenger, alerts) = setup();

        let outcome = dispatcher.dispatch(&ana("no phone")).await;

        assert_eq!(
            outcome,
            NotificationOutcome::Failed {
                reason: "contact has no digits".to_string()
            }
        );
        assert_eq!(messenger.attempts().await, 0);
        assert_eq!(alerts.alerts().await.len(), 1);
    }
}
