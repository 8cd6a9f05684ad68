//! Enrollment workflows.
//!
//! The flow spans two requests:
//! 1. [`EnrollmentIntake`] prices the course, opens a checkout session and
//!    stores a pending record keyed by a fresh reference.
//! 2. [`WebhookReconciler`] handles the provider's payment notification,
//!    confirms approval, sends the WhatsApp confirmation through the
//!    [`NotificationDispatcher`] and marks the record completed.

pub mod dispatcher;
pub mod error;
pub mod intake;
pub mod notification;
pub mod reconciler;

pub use dispatcher::{NotificationDispatcher, NotificationOutcome, Recipient, confirmation_message};
pub use error::{EnrollmentError, Result};
pub use intake::{CheckoutOutcome, EnrollmentIntake};
pub use notification::PaymentNotification;
pub use reconciler::{ReconcileOutcome, WebhookReconciler};
