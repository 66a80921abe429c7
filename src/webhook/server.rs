// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Webhook HTTP server.
//!
//! Serves the admission and conversion webhooks over TLS, plus the metrics and
//! liveness endpoints scraped from inside the cluster.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use axum_server::tls_rustls::RustlsConfig;
use kube::core::admission::AdmissionReview;
use kube::core::DynamicObject;
use tracing::{error, info};

use super::admission::review_admission;
use super::conversion::{review_conversion, ConversionReview};
use crate::constants::{CONVERT_PATH, HEALTHZ_PATH, METRICS_PATH, VALIDATE_PATH};
use crate::errors::WebhookError;
use crate::metrics::gather_metrics;
use crate::validation::ExternalDnsValidator;

/// Shared state for webhook handlers
#[derive(Debug, Clone)]
pub struct WebhookState {
    pub validator: ExternalDnsValidator,
}

impl WebhookState {
    #[must_use]
    pub fn new(validator: ExternalDnsValidator) -> Self {
        Self { validator }
    }
}

/// Create the webhook router
pub fn create_webhook_router(state: Arc<WebhookState>) -> Router {
    Router::new()
        .route(VALIDATE_PATH, post(validate_external_dns))
        .route(CONVERT_PATH, post(convert_external_dns))
        .route(METRICS_PATH, get(metrics))
        .route(HEALTHZ_PATH, get(healthz))
        .with_state(state)
}

/// Validate ExternalDNS admission webhook handler
async fn validate_external_dns(
    State(state): State<Arc<WebhookState>>,
    Json(review): Json<AdmissionReview<DynamicObject>>,
) -> Json<AdmissionReview<DynamicObject>> {
    Json(review_admission(&state.validator, review))
}

/// Convert ExternalDNS objects between served versions
async fn convert_external_dns(Json(review): Json<ConversionReview>) -> Json<ConversionReview> {
    Json(review_conversion(review))
}

async fn metrics() -> impl IntoResponse {
    match gather_metrics() {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            body,
        ),
        Err(e) => {
            error!(error = %e, "Failed to gather metrics");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(header::CONTENT_TYPE, "text/plain")],
                e.to_string(),
            )
        }
    }
}

async fn healthz() -> &'static str {
    "ok"
}

/// Run the webhook server with TLS
///
/// Binds to `0.0.0.0:<port>` and serves every webhook endpoint.
///
/// # Arguments
/// * `validator` - Validator shared by every admission request
/// * `port` - HTTPS port
/// * `cert_path` - Path to TLS certificate file (PEM format)
/// * `key_path` - Path to TLS private key file (PEM format)
///
/// # Errors
/// Returns [`WebhookError::TlsConfig`] when the certificate or key cannot be
/// loaded and [`WebhookError::Server`] when the server stops with an error.
pub async fn run_webhook_server(
    validator: ExternalDnsValidator,
    port: u16,
    cert_path: &Path,
    key_path: &Path,
) -> Result<(), WebhookError> {
    let state = Arc::new(WebhookState::new(validator));
    let app = create_webhook_router(state);

    let config = RustlsConfig::from_pem_file(cert_path, key_path)
        .await
        .map_err(|e| WebhookError::TlsConfig(e.to_string()))?;

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(
        %addr,
        platform_managed_credentials = validator.platform_managed_credentials(),
        "Webhook server listening with TLS"
    );

    axum_server::bind_rustls(addr, config)
        .serve(app.into_make_service())
        .await
        .map_err(|e| WebhookError::Server(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
#[path = "server_tests.rs"]
mod server_tests;
