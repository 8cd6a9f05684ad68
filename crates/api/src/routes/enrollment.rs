//! Enrollment intake and direct enrollment endpoints.

use std::sync::Arc;

use ::enrollment::Recipient;
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use domain::EnrollmentForm;
use record_store::RecordStore;
use serde::Serialize;

use super::AppState;
use crate::error::ApiError;

#[derive(Serialize)]
pub struct PreferenceResponse {
    pub init_point: String,
}

#[derive(Serialize)]
pub struct EnrollResponse {
    pub success: bool,
}

/// POST /create_preference — open a checkout session for an enrollment form.
#[tracing::instrument(skip(state, payload))]
pub async fn create_preference<S: RecordStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    payload: Result<Json<EnrollmentForm>, JsonRejection>,
) -> Result<Json<PreferenceResponse>, ApiError> {
    let Json(form) = payload?;
    let outcome = state.intake.submit(&form).await?;
    Ok(Json(PreferenceResponse {
        init_point: outcome.init_point,
    }))
}

/// POST /matricular — send the enrollment confirmation without any payment check.
///
/// A failed send is reported by the dispatcher and does not change the response.
#[tracing::instrument(skip(state, payload))]
pub async fn matricular<S: RecordStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    payload: Result<Json<EnrollmentForm>, JsonRejection>,
) -> Result<Json<EnrollResponse>, ApiError> {
    let Json(form) = payload?;
    let enrollment = form.validate()?;

    let outcome = state.dispatcher.dispatch(&Recipient::from(enrollment)).await;
    tracing::debug!(sent = outcome.is_sent(), "direct enrollment processed");
    Ok(Json(EnrollResponse { success: true }))
}
