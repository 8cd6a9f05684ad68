//! Mercado Pago implementation of [`PaymentGateway`].

use std::time::Duration;

use async_trait::async_trait;
use domain::Reference;
use serde::{Deserialize, Serialize};

use crate::error::{GatewayError, Result};
use crate::payment::{CheckoutRequest, CheckoutSession, PaymentDetails, PaymentGateway};

const PROVIDER: &str = "mercadopago";

/// Connection settings for the Mercado Pago REST API.
#[derive(Debug, Clone)]
pub struct MercadoPagoConfig {
    pub access_token: String,
    /// API root, normally `https://api.mercadopago.com`.
    pub base_url: String,
    pub timeout: Duration,
}

/// Payment gateway talking to Mercado Pago's Checkout Pro and Payments APIs.
#[derive(Debug, Clone)]
pub struct MercadoPagoGateway {
    http: reqwest::Client,
    config: MercadoPagoConfig,
}

impl MercadoPagoGateway {
    /// Builds a gateway with its own HTTP client.
    pub fn new(config: MercadoPagoConfig) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Serialize)]
struct PreferenceBody<'a> {
    items: [PreferenceItem<'a>; 1],
    payer: PreferencePayer<'a>,
    external_reference: &'a str,
    back_urls: PreferenceBackUrls<'a>,
}

#[derive(Debug, Serialize)]
struct PreferenceItem<'a> {
    title: &'a str,
    quantity: u32,
    currency_id: &'a str,
    unit_price: f64,
}

#[derive(Debug, Serialize)]
struct PreferencePayer<'a> {
    name: &'a str,
}

#[derive(Debug, Serialize)]
struct PreferenceBackUrls<'a> {
    success: &'a str,
    failure: &'a str,
    pending: &'a str,
}

impl<'a> From<&'a CheckoutRequest> for PreferenceBody<'a> {
    fn from(req: &'a CheckoutRequest) -> Self {
        Self {
            items: [PreferenceItem {
                title: &req.title,
                quantity: req.quantity,
                currency_id: &req.currency_id,
                unit_price: req.unit_price.as_decimal(),
            }],
            payer: PreferencePayer {
                name: &req.payer_name,
            },
            external_reference: req.external_reference.as_str(),
            back_urls: PreferenceBackUrls {
                success: &req.back_urls.success,
                failure: &req.back_urls.failure,
                pending: &req.back_urls.pending,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct PreferenceResponse {
    id: Option<String>,
    init_point: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PaymentResponse {
    status: Option<String>,
    external_reference: Option<String>,
}

/// Payment ids end up in a URL path; only plain tokens are allowed through.
fn is_valid_payment_id(id: &str) -> bool {
    !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

#[async_trait]
impl PaymentGateway for MercadoPagoGateway {
    #[tracing::instrument(skip(self, request), fields(reference = %request.external_reference))]
    async fn create_checkout(&self, request: &CheckoutRequest) -> Result<CheckoutSession> {
        let response = self
            .http
            .post(self.url("/checkout/preferences"))
            .bearer_auth(&self.config.access_token)
            .json(&PreferenceBody::from(request))
            .send()
            .await?;
        let response = GatewayError::check(PROVIDER, response).await?;
        let body: PreferenceResponse = response.json().await?;

        let init_point = body.init_point.ok_or_else(|| GatewayError::InvalidResponse {
            provider: PROVIDER,
            reason: "preference has no init_point".to_string(),
        })?;
        tracing::debug!(preference_id = ?body.id, "checkout preference created");

        Ok(CheckoutSession {
            preference_id: body.id,
            init_point,
        })
    }

    #[tracing::instrument(skip(self))]
    async fn get_payment(&self, payment_id: &str) -> Result<PaymentDetails> {
        if !is_valid_payment_id(payment_id) {
            return Err(GatewayError::Rejected(format!(
                "invalid payment id {payment_id:?}"
            )));
        }

        let response = self
            .http
            .get(self.url(&format!("/v1/payments/{payment_id}")))
            .bearer_auth(&self.config.access_token)
            .send()
            .await?;
        let response = GatewayError::check(PROVIDER, response).await?;
        let body: PaymentResponse = response.json().await?;

        let status = body.status.ok_or_else(|| GatewayError::InvalidResponse {
            provider: PROVIDER,
            reason: "payment has no status".to_string(),
        })?;

        Ok(PaymentDetails {
            payment_id: payment_id.to_string(),
            status,
            external_reference: body
                .external_reference
                .filter(|r| !r.is_empty())
                .map(Reference::from),
        })
    }
}
