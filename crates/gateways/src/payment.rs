//! Payment gateway trait and in-memory implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use domain::{Money, Reference};
use tokio::sync::Mutex;

use crate::error::{GatewayError, Result};

/// Redirect targets shown to the payer after checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackUrls {
    pub success: String,
    pub failure: String,
    pub pending: String,
}

impl BackUrls {
    /// Uses the same URL for every checkout outcome.
    pub fn all(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            success: url.clone(),
            failure: url.clone(),
            pending: url,
        }
    }
}

/// A single-item checkout session request.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutRequest {
    pub title: String,
    pub quantity: u32,
    pub currency_id: String,
    pub unit_price: Money,
    pub payer_name: String,
    /// Correlation token echoed back on the resulting payment.
    pub external_reference: Reference,
    pub back_urls: BackUrls,
}

/// A checkout session created by the payment provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSession {
    /// Provider-side identifier of the session, when reported.
    pub preference_id: Option<String>,
    /// URL the payer is redirected to.
    pub init_point: String,
}

/// Payment status as reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentDetails {
    pub payment_id: String,
    /// Provider status string, e.g. `approved`, `pending`, `rejected`.
    pub status: String,
    pub external_reference: Option<Reference>,
}

impl PaymentDetails {
    /// Returns true if the provider reports the payment as approved.
    pub fn is_approved(&self) -> bool {
        self.status == "approved"
    }
}

/// Trait for payment provider operations.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Creates a hosted checkout session.
    async fn create_checkout(&self, request: &CheckoutRequest) -> Result<CheckoutSession>;

    /// Looks up the current state of a payment.
    async fn get_payment(&self, payment_id: &str) -> Result<PaymentDetails>;
}

#[derive(Debug, Default)]
struct InMemoryPaymentState {
    checkouts: Vec<CheckoutRequest>,
    payments: HashMap<String, PaymentDetails>,
    lookups: usize,
    next_id: u32,
    fail_on_checkout: bool,
    fail_on_lookup: bool,
}

/// In-memory payment gateway for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPaymentGateway {
    state: Arc<Mutex<InMemoryPaymentState>>,
}

impl InMemoryPaymentGateway {
    /// Creates a new in-memory payment gateway.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures subsequent checkout calls to fail.
    pub async fn set_fail_on_checkout(&self, fail: bool) {
        self.state.lock().await.fail_on_checkout = fail;
    }

    /// Configures subsequent payment lookups to fail.
    pub async fn set_fail_on_lookup(&self, fail: bool) {
        self.state.lock().await.fail_on_lookup = fail;
    }

    /// Registers a payment that lookups will return.
    pub async fn insert_payment(&self, payment: PaymentDetails) {
        self.state
            .lock()
            .await
            .payments
            .insert(payment.payment_id.clone(), payment);
    }

    /// Registers a payment with the given status and correlation token.
    pub async fn insert(&self, payment_id: &str, status: &str, reference: &Reference) {
        self.insert_payment(PaymentDetails {
            payment_id: payment_id.to_string(),
            status: status.to_string(),
            external_reference: Some(reference.clone()),
        })
        .await;
    }

    /// Returns every checkout request received so far.
    pub async fn checkout_requests(&self) -> Vec<CheckoutRequest> {
        self.state.lock().await.checkouts.clone()
    }

    /// Returns how many payment lookups were attempted.
    pub async fn lookup_count(&self) -> usize {
        self.state.lock().await.lookups
    }
}

#[async_trait]
impl PaymentGateway for InMemoryPaymentGateway {
    async fn create_checkout(&self, request: &CheckoutRequest) -> Result<CheckoutSession> {
        let mut state = self.state.lock().await;

        if state.fail_on_checkout {
            return Err(GatewayError::Rejected("Checkout unavailable".to_string()));
        }

        state.next_id += 1;
        let preference_id = format!("PREF-{:04}", state.next_id);
        state.checkouts.push(request.clone());

        Ok(CheckoutSession {
            init_point: format!("https://checkout.test/pay?pref_id={preference_id}"),
            preference_id: Some(preference_id),
        })
    }

    async fn get_payment(&self, payment_id: &str) -> Result<PaymentDetails> {
        let mut state = self.state.lock().await;
        state.lookups += 1;

        if state.fail_on_lookup {
            return Err(GatewayError::Rejected("Lookup unavailable".to_string()));
        }

        state
            .payments
            .get(payment_id)
            .cloned()
            .ok_or_else(|| GatewayError::Status {
                provider: "in-memory",
                status: 404,
                body: format!("payment {payment_id} not found"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CheckoutRequest {
        CheckoutRequest {
            title: "Inscrição no curso EEB".to_string(),
            quantity: 1,
            currency_id: "BRL".to_string(),
            unit_price: Money::from_reais(1500),
            payer_name: "Ana".to_string(),
            external_reference: Reference::new("ref-1"),
            back_urls: BackUrls::all("https://example.test/thanks"),
        }
    }

    #[tokio::test]
    async fn test_checkout_ids_are_sequential() {
        let gateway = InMemoryPaymentGateway::new();

        let s1 = gateway.create_checkout(&request()).await.unwrap();
        let s2 = gateway.create_checkout(&request()).await.unwrap();

        assert_eq!(s1.preference_id.as_deref(), Some("PREF-0001"));
        assert_eq!(s2.preference_id.as_deref(), Some("PREF-0002"));
        assert!(s1.init_point.ends_with("PREF-0001"));
        assert_eq!(gateway.checkout_requests().await.len(), 2);
    }

    #[tokio::test]
    async fn test_fail_on_checkout() {
        let gateway = InMemoryPaymentGateway::new();
        gateway.set_fail_on_checkout(true).await;

        assert!(gateway.create_checkout(&request()).await.is_err());
        assert!(gateway.checkout_requests().await.is_empty());
    }

    #[tokio::test]
    async fn test_lookup_registered_and_unknown_payments() {
        let gateway = InMemoryPaymentGateway::new();
        gateway
            .insert("123", "approved", &Reference::new("ref-1"))
            .await;

        let payment = gateway.get_payment("123").await.unwrap();
        assert!(payment.is_approved());
        assert_eq!(payment.external_reference, Some(Reference::new("ref-1")));

        let missing = gateway.get_payment("999").await;
        assert!(matches!(
            missing,
            Err(GatewayError::Status { status: 404, .. })
        ));
        assert_eq!(gateway.lookup_count().await, 2);
    }

    #[test]
    fn test_back_urls_all() {
        let urls = BackUrls::all("https://example.test/thanks");
        assert_eq!(urls.success, urls.failure);
        assert_eq!(urls.failure, urls.pending);
    }

    #[test]
    fn test_only_approved_is_approved() {
        let mut payment = PaymentDetails {
            payment_id: "1".to_string(),
            status: "pending".to_string(),
            external_reference: None,
        };
        assert!(!payment.is_approved());
        payment.status = "approved".to_string();
        assert!(payment.is_approved());
    }
}
