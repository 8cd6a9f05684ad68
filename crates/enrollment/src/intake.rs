//! Enrollment intake: validate, price, open checkout, store pending record.

use std::sync::Arc;
use std::time::Instant;

use domain::{CourseCatalog, EnrollmentForm, EnrollmentRecord, Money, Reference};
use gateways::{BackUrls, CheckoutRequest, PaymentGateway};
use record_store::{RecordRepository, RecordStore};

use crate::error::Result;

/// Currency of every checkout item.
pub const CURRENCY: &str = "BRL";

/// Result of a successful intake.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutOutcome {
    pub reference: Reference,
    /// Checkout URL the client should redirect the payer to.
    pub init_point: String,
    pub price: Money,
}

/// Handles enrollment form submissions.
pub struct EnrollmentIntake<S: RecordStore> {
    repository: Arc<RecordRepository<S>>,
    payments: Arc<dyn PaymentGateway>,
    catalog: CourseCatalog,
    back_urls: BackUrls,
}

impl<S: RecordStore> EnrollmentIntake<S> {
    /// Creates an intake handler.
    pub fn new(
        repository: Arc<RecordRepository<S>>,
        payments: Arc<dyn PaymentGateway>,
        catalog: CourseCatalog,
        back_urls: BackUrls,
    ) -> Self {
        Self {
            repository,
            payments,
            catalog,
            back_urls,
        }
    }

    /// Returns the course catalog used for pricing.
    pub fn catalog(&self) -> &CourseCatalog {
        &self.catalog
    }

    /// Validates the form, creates a checkout session and stores a pending record.
    ///
    /// Nothing is persisted unless the payment provider accepted the checkout.
    #[tracing::instrument(skip(self, form))]
    pub async fn submit(&self, form: &EnrollmentForm) -> Result<CheckoutOutcome> {
        metrics::counter!("enrollment_intake_total").increment(1);
        let result = self.open_checkout(form).await;
        if let Err(e) = &result {
            metrics::counter!("enrollment_intake_failed_total").increment(1);
            if e.is_validation() {
                tracing::info!(error = %e, "enrollment rejected");
            } else {
                tracing::error!(error = %e, "enrollment intake failed");
            }
        }
        result
    }

    async fn open_checkout(&self, form: &EnrollmentForm) -> Result<CheckoutOutcome> {
        let enrollment = form.validate()?;

        let price = self.catalog.price_of(&enrollment.course);
        if !self.catalog.contains(&enrollment.course) {
            metrics::counter!("enrollment_unknown_course_total").increment(1);
            tracing::warn!(course = %enrollment.course, "unknown course code, pricing at zero");
        }

        let reference = Reference::generate();
        let request = CheckoutRequest {
            title: format!("Inscrição no curso {}", enrollment.course),
            quantity: 1,
            currency_id: CURRENCY.to_string(),
            unit_price: price,
            payer_name: enrollment.name.clone(),
            external_reference: reference.clone(),
            back_urls: self.back_urls.clone(),
        };

        let started = Instant::now();
        let session = self.payments.create_checkout(&request).await?;
        metrics::histogram!("checkout_creation_seconds").record(started.elapsed().as_secs_f64());

        self.repository
            .append(EnrollmentRecord::pending(reference.clone(), enrollment))
            .await?;
        tracing::info!(reference = %reference, price = %price, "pending enrollment stored");

        Ok(CheckoutOutcome {
            reference,
            init_point: session.init_point,
            price,
        })
    }
}
