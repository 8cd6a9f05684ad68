//! Payment webhook reconciliation.

use std::sync::Arc;

use domain::Reference;
use gateways::PaymentGateway;
use record_store::{RecordRepository, RecordStore};

use crate::dispatcher::{NotificationDispatcher, NotificationOutcome, Recipient};
use crate::error::Result;
use crate::notification::PaymentNotification;

/// What a notification led to. Every variant is acknowledged to the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Not a payment event, or a payment event without an id.
    Ignored,
    /// The payment lookup failed; the error was logged.
    LookupFailed,
    /// The payment exists but is not approved.
    NotApproved { status: String },
    /// No stored record carries the payment's correlation token.
    UnknownReference { reference: Option<Reference> },
    /// The record was already completed by an earlier notification.
    AlreadyCompleted { reference: Reference },
    /// The record moved to completed and a confirmation was attempted.
    Completed {
        reference: Reference,
        notification: NotificationOutcome,
    },
}

/// Applies payment notifications to pending enrollments.
pub struct WebhookReconciler<S: RecordStore> {
    repository: Arc<RecordRepository<S>>,
    payments: Arc<dyn PaymentGateway>,
    dispatcher: Arc<NotificationDispatcher>,
}

impl<S: RecordStore> WebhookReconciler<S> {
    /// Creates a reconciler.
    pub fn new(
        repository: Arc<RecordRepository<S>>,
        payments: Arc<dyn PaymentGateway>,
        dispatcher: Arc<NotificationDispatcher>,
    ) -> Self {
        Self {
            repository,
            payments,
            dispatcher,
        }
    }

    /// Processes one notification.
    ///
    /// Only storage failures are returned as errors; collaborator failures
    /// are logged and reported through the outcome. The writer lock is held
    /// from lookup to commit, so a redelivered notification waits and then
    /// finds the record already completed.
    #[tracing::instrument(skip(self), fields(kind = notification.label()))]
    pub async fn reconcile(&self, notification: &PaymentNotification) -> Result<ReconcileOutcome> {
        metrics::counter!("webhook_notifications_total", "kind" => notification.label())
            .increment(1);

        let payment_id = match notification {
            PaymentNotification::Payment { payment_id } => payment_id,
            PaymentNotification::MissingPaymentId { kind } => {
                tracing::warn!(%kind, "payment notification without payment id");
                return Ok(ReconcileOutcome::Ignored);
            }
            PaymentNotification::Unrecognized { kind } => {
                tracing::debug!(?kind, "ignoring non-payment notification");
                return Ok(ReconcileOutcome::Ignored);
            }
        };

        let payment = match self.payments.get_payment(payment_id).await {
            Ok(payment) => payment,
            Err(e) => {
                tracing::error!(%payment_id, error = %e, "payment lookup failed");
                return Ok(ReconcileOutcome::LookupFailed);
            }
        };

        if !payment.is_approved() {
            tracing::info!(%payment_id, status = %payment.status, "payment not approved");
            return Ok(ReconcileOutcome::NotApproved {
                status: payment.status,
            });
        }

        let Some(reference) = payment.external_reference else {
            tracing::warn!(%payment_id, "approved payment has no external reference");
            return Ok(ReconcileOutcome::UnknownReference { reference: None });
        };

        let mut batch = self.repository.begin().await?;
        let Some(record) = batch.find_mut(&reference) else {
            tracing::warn!(%payment_id, %reference, "no enrollment matches payment reference");
            return Ok(ReconcileOutcome::UnknownReference {
                reference: Some(reference),
            });
        };

        if !record.is_pending() {
            tracing::info!(%reference, "enrollment already completed");
            return Ok(ReconcileOutcome::AlreadyCompleted { reference });
        }

        let notification = self.dispatcher.dispatch(&Recipient::from(&*record)).await;
        record.complete()?;
        batch.commit().await?;

        metrics::counter!("enrollments_completed_total").increment(1);
        tracing::info!(%reference, sent = notification.is_sent(), "enrollment completed");

        Ok(ReconcileOutcome::Completed {
            reference,
            notification,
        })
    }
}
