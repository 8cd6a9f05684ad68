//! External collaborators of the enrollment service.
//!
//! Each collaborator is a trait with an HTTP implementation for production
//! and an in-memory implementation for tests:
//! - [`PaymentGateway`]: checkout creation and payment lookup (Mercado Pago)
//! - [`Messenger`]: WhatsApp delivery (Twilio)
//! - [`AlertSink`]: operational alerts (Discord webhook)

pub mod alert;
pub mod error;
pub mod mercadopago;
pub mod messaging;
pub mod payment;
pub mod twilio;

pub use alert::{AlertSink, DiscordAlertSink, InMemoryAlertSink, NoopAlertSink};
pub use error::{GatewayError, Result};
pub use mercadopago::{MercadoPagoConfig, MercadoPagoGateway};
pub use messaging::{InMemoryMessenger, MessageReceipt, Messenger, SentMessage};
pub use payment::{
    BackUrls, CheckoutRequest, CheckoutSession, InMemoryPaymentGateway, PaymentDetails,
    PaymentGateway,
};
pub use twilio::{TwilioConfig, TwilioMessenger};

/// Default timeout applied to every outbound HTTP request.
pub const DEFAULT_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(15);
