// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

#![allow(unexpected_cfgs)]

//! # ExternalDNS Operator - admission validation and resource naming
//!
//! Configuration core of a Kubernetes operator that runs external-dns on behalf
//! of `ExternalDNS` custom resources. Every resource is validated before it is
//! persisted, and every object the operator derives from it gets a deterministic
//! name that fits in a DNS-1123 label.
//!
//! ## Modules
//!
//! - [`crd`] - `ExternalDNS` types for the `v1beta1` and `v1alpha1` versions, and conversion between them
//! - [`validation`] - Domain filter, provider credential and source rules
//! - [`names`] - Per-zone and per-instance object names, managed labels
//! - [`webhook`] - Admission and conversion webhooks and their TLS server
//! - [`errors`] - Violation, rejection and schema error types
//! - [`metrics`] - Prometheus metrics
//! - [`config`] - Command-line and environment configuration
//!
//! ## Example
//!
//! ```rust
//! use external_dns_operator::crd::conversion::decode_spec;
//! use external_dns_operator::names::container_names;
//! use external_dns_operator::validation::ExternalDnsValidator;
//!
//! let spec = decode_spec(
//!     "externaldns.olm.openshift.io/v1beta1",
//!     serde_json::json!({
//!         "provider": {"type": "AWS", "aws": {"credentials": {"name": "aws-access-key"}}},
//!         "source": {"type": "OpenShiftRoute"},
//!         "zones": ["Z0323552X0970SB2UHBB"]
//!     }),
//! )
//! .unwrap();
//!
//! assert!(ExternalDnsValidator::new(false).validate_create(&spec).is_ok());
//! assert_eq!(container_names(&spec), vec!["external-dns-wznx6zr".to_string()]);
//! ```

pub mod config;
pub mod constants;
pub mod crd;
pub mod errors;
pub mod labels;
pub mod metrics;
pub mod names;
pub mod validation;
pub mod webhook;

#[cfg(test)]
mod crd_tests;
#[cfg(test)]
mod errors_tests;
