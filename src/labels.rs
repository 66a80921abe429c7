// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Common label constants applied to every object derived from an `ExternalDNS` resource.
//!
//! This module defines standard Kubernetes labels and operator-specific labels
//! to ensure consistency across all resources created by the controller.

// ============================================================================
// Kubernetes Standard Labels
// https://kubernetes.io/docs/concepts/overview/working-with-objects/common-labels/
// ============================================================================

/// Standard label for the component name within the architecture
pub const K8S_COMPONENT: &str = "app.kubernetes.io/component";

/// Standard label for the tool being used to manage the operation of an application
pub const K8S_MANAGED_BY: &str = "app.kubernetes.io/managed-by";

/// Standard label for the name of the application (e.g., "external-dns")
pub const K8S_NAME: &str = "app.kubernetes.io/name";

/// Standard label for a unique name identifying the instance of an application
pub const K8S_INSTANCE: &str = "app.kubernetes.io/instance";

// ============================================================================
// Kubernetes Standard Label Values
// ============================================================================

/// Application name for the external-dns operand
pub const APP_NAME_EXTERNAL_DNS: &str = "external-dns";

/// Component value for the DNS publisher deployment
pub const COMPONENT_DNS_PUBLISHER: &str = "dns-publisher";

/// Value for `app.kubernetes.io/managed-by` on operator-owned objects
pub const MANAGED_BY_OPERATOR: &str = "external-dns-operator";

// ============================================================================
// Operator-Specific Labels
// ============================================================================

/// Label carrying the name of the owning `ExternalDNS` resource
pub const EXTERNAL_DNS_OWNER_LABEL: &str = "externaldns.olm.openshift.io/owning-externaldns";

// ============================================================================
// Operator-Specific Annotations
// ============================================================================

/// Annotation preserving the AWS assume-role strategy while an object is served as
/// `v1alpha1`, which has no field for it
pub const ASSUME_ROLE_STRATEGY_ANNOTATION: &str =
    "externaldns.olm.openshift.io/aws-assume-role-strategy";
