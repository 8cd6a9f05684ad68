//! Payment provider webhook.

use std::sync::Arc;

use ::enrollment::PaymentNotification;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use record_store::RecordStore;

use super::AppState;

/// POST /mp-webhook — reconcile a payment notification.
///
/// Answers `200 OK` for every handled notification, including ones that were
/// ignored or whose payment lookup failed, so the provider stops redelivering.
/// Only storage failures produce a 500.
#[tracing::instrument(skip(state, body), fields(bytes = body.len()))]
pub async fn mp_webhook<S: RecordStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    body: Bytes,
) -> (StatusCode, &'static str) {
    let notification = PaymentNotification::parse(&body);
    tracing::info!(?notification, "payment notification received");

    match state.reconciler.reconcile(&notification).await {
        Ok(outcome) => {
            tracing::debug!(?outcome, "notification handled");
            (StatusCode::OK, "OK")
        }
        Err(e) => {
            tracing::error!(error = %e, "webhook processing failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "internal error")
        }
    }
}
