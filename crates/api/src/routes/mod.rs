//! HTTP route handlers.

pub mod courses;
pub mod enrollment;
pub mod ops;
pub mod webhook;

use std::sync::Arc;

use ::enrollment::{EnrollmentIntake, NotificationDispatcher, WebhookReconciler};
use record_store::{RecordRepository, RecordStore};

/// Shared application state accessible from all handlers.
pub struct AppState<S: RecordStore> {
    pub intake: EnrollmentIntake<S>,
    pub reconciler: WebhookReconciler<S>,
    pub dispatcher: Arc<NotificationDispatcher>,
    pub repository: Arc<RecordRepository<S>>,
}
