//! HTTP API server for the enrollment checkout service.
//!
//! Provides the checkout intake, payment webhook and direct enrollment
//! endpoints, with structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use domain::CourseCatalog;
use enrollment::{EnrollmentIntake, NotificationDispatcher, WebhookReconciler};
use gateways::{
    AlertSink, BackUrls, DiscordAlertSink, GatewayError, MercadoPagoGateway, Messenger,
    NoopAlertSink, PaymentGateway, TwilioMessenger,
};
use metrics_exporter_prometheus::PrometheusHandle;
use record_store::{RecordRepository, RecordStore};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use config::Config;
use routes::AppState;

/// External services the application talks to.
#[derive(Clone)]
pub struct Collaborators {
    pub payments: Arc<dyn PaymentGateway>,
    pub messenger: Arc<dyn Messenger>,
    pub alerts: Arc<dyn AlertSink>,
}

impl Collaborators {
    /// Builds the HTTP-backed collaborators described by `config`.
    pub fn from_config(config: &Config) -> Result<Self, GatewayError> {
        let alerts: Arc<dyn AlertSink> = match &config.discord_webhook_url {
            Some(url) => Arc::new(DiscordAlertSink::new(url.clone(), config.http_timeout)?),
            None => Arc::new(NoopAlertSink),
        };
        Ok(Self {
            payments: Arc::new(MercadoPagoGateway::new(config.mercadopago.clone())?),
            messenger: Arc::new(TwilioMessenger::new(config.twilio.clone())?),
            alerts,
        })
    }
}

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S: RecordStore + 'static>(
    state: Arc<AppState<S>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::ops::metrics))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::ops::health::<S>))
        .route("/courses", get(routes::courses::list::<S>))
        .route(
            "/create_preference",
            post(routes::enrollment::create_preference::<S>),
        )
        .route("/mp-webhook", post(routes::webhook::mp_webhook::<S>))
        .route("/matricular", post(routes::enrollment::matricular::<S>))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Wires the enrollment services over a record store backend.
pub fn create_state<S: RecordStore + 'static>(
    store: S,
    collaborators: Collaborators,
    catalog: CourseCatalog,
    back_urls: BackUrls,
) -> Arc<AppState<S>> {
    let repository = Arc::new(RecordRepository::new(store));
    let dispatcher = Arc::new(NotificationDispatcher::new(
        collaborators.messenger,
        collaborators.alerts,
    ));

    let intake = EnrollmentIntake::new(
        repository.clone(),
        collaborators.payments.clone(),
        catalog,
        back_urls,
    );
    let reconciler = WebhookReconciler::new(
        repository.clone(),
        collaborators.payments,
        dispatcher.clone(),
    );

    Arc::new(AppState {
        intake,
        reconciler,
        dispatcher,
        repository,
    })
}
