//! Course catalog listing.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use record_store::RecordStore;
use serde::Serialize;

use super::AppState;

#[derive(Serialize)]
pub struct CourseResponse {
    pub code: String,
    /// Price in reais.
    pub price: f64,
}

#[derive(Serialize)]
pub struct CourseListResponse {
    pub courses: Vec<CourseResponse>,
}

/// GET /courses — lists the priced course codes.
pub async fn list<S: RecordStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Json<CourseListResponse> {
    let courses = state
        .intake
        .catalog()
        .iter()
        .map(|(code, price)| CourseResponse {
            code: code.to_string(),
            price: price.as_decimal(),
        })
        .collect();
    Json(CourseListResponse { courses })
}
