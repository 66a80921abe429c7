// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Global constants for the ExternalDNS operator.
//!
//! This module contains all numeric and string constants used throughout the codebase.
//! Constants are organized by category for easy maintenance.

// ============================================================================
// API Constants
// ============================================================================

/// API group for the `ExternalDNS` CRD
pub const API_GROUP: &str = "externaldns.olm.openshift.io";

/// Storage (hub) version of the `ExternalDNS` CRD
pub const API_VERSION_V1BETA1: &str = "v1beta1";

/// Legacy served version of the `ExternalDNS` CRD
pub const API_VERSION_V1ALPHA1: &str = "v1alpha1";

/// Fully qualified API version of the storage version (group/version)
pub const API_GROUP_VERSION_V1BETA1: &str = "externaldns.olm.openshift.io/v1beta1";

/// Fully qualified API version of the legacy version (group/version)
pub const API_GROUP_VERSION_V1ALPHA1: &str = "externaldns.olm.openshift.io/v1alpha1";

/// Kind name for `ExternalDNS` resource
pub const KIND_EXTERNAL_DNS: &str = "ExternalDNS";

// ============================================================================
// Spec Limits
// ============================================================================

/// Maximum number of zones a single `ExternalDNS` resource may target
pub const MAX_ZONES: usize = 10;

/// Maximum length of a DNS-1123 label (and of most Kubernetes object names)
pub const DNS1123_LABEL_MAX_LENGTH: usize = 63;

// ============================================================================
// Child Resource Naming
// ============================================================================

/// Base name of every object the operator creates for an `ExternalDNS` instance
pub const EXTERNAL_DNS_BASE_NAME: &str = "external-dns";

/// Prefix of the credentials secret copied into the operand namespace
pub const CREDENTIALS_SECRET_PREFIX: &str = "external-dns-credentials";

// ============================================================================
// Webhook Server Constants
// ============================================================================

/// Default webhook server port
pub const WEBHOOK_PORT: u16 = 9443;

/// Default path to webhook TLS certificate
pub const WEBHOOK_CERT_PATH: &str = "/etc/webhook/certs/tls.crt";

/// Default path to webhook TLS private key
pub const WEBHOOK_KEY_PATH: &str = "/etc/webhook/certs/tls.key";

/// Path of the validating admission endpoint
pub const VALIDATE_PATH: &str = "/validate-externaldns";

/// Path of the CRD conversion endpoint
pub const CONVERT_PATH: &str = "/convert";

/// Path of the Prometheus metrics endpoint
pub const METRICS_PATH: &str = "/metrics";

/// Path of the liveness endpoint
pub const HEALTHZ_PATH: &str = "/healthz";
