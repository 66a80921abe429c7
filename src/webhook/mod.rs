// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Admission and conversion webhooks for `ExternalDNS` resources.
//!
//! - [`admission`] - `POST /validate-externaldns`, gates create and update
//! - [`conversion`] - `POST /convert`, moves objects between served versions
//! - [`server`] - the TLS server hosting both, plus `/metrics` and `/healthz`

pub mod admission;
pub mod conversion;
pub mod server;

pub use admission::review_admission;
pub use conversion::{review_conversion, ConversionReview};
pub use server::{create_webhook_router, run_webhook_server, WebhookState};

// Re-export kube-rs admission types for contract testing
pub use kube::core::admission::{AdmissionRequest, AdmissionResponse, AdmissionReview, Operation};
