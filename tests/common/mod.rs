// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

// Common fixtures for integration tests

#![allow(dead_code)]

use external_dns_operator::webhook::AdmissionReview;
use kube::core::DynamicObject;
use serde_json::{json, Value};

pub const V1BETA1: &str = "externaldns.olm.openshift.io/v1beta1";
pub const V1ALPHA1: &str = "externaldns.olm.openshift.io/v1alpha1";
pub const VALID_ARN: &str = "arn:aws:iam::123456789012:role/my-role";
pub const REVIEW_UID: &str = "a5b3f7c2-1d4e-4f6a-9b8c-0e2d4f6a8b1c";

/// Wrap a spec in an `ExternalDNS` object of the given version
pub fn external_dns(api_version: &str, spec: Value) -> Value {
    json!({
        "apiVersion": api_version,
        "kind": "ExternalDNS",
        "metadata": {"name": "sample-aws", "generation": 1},
        "spec": spec
    })
}

/// Build an `AdmissionReview` for the given operation
pub fn admission_review(
    operation: &str,
    object: Option<Value>,
    old_object: Option<Value>,
) -> AdmissionReview<DynamicObject> {
    serde_json::from_value(json!({
        "apiVersion": "admission.k8s.io/v1",
        "kind": "AdmissionReview",
        "request": {
            "uid": REVIEW_UID,
            "kind": {"group": "externaldns.olm.openshift.io", "version": "v1beta1", "kind": "ExternalDNS"},
            "resource": {"group": "externaldns.olm.openshift.io", "version": "v1beta1", "resource": "externaldnses"},
            "name": "sample-aws",
            "operation": operation,
            "userInfo": {"username": "system:admin"},
            "object": object,
            "oldObject": old_object,
            "dryRun": false
        }
    }))
    .expect("admission review fixture should deserialize")
}

/// A `v1beta1` AWS spec using a credentials secret
pub fn aws_spec_v1beta1() -> Value {
    json!({
        "domains": [{"filterType": "Include", "matchType": "Exact", "name": "apps.example.com"}],
        "provider": {"type": "AWS", "aws": {"credentials": {"name": "aws-access-key"}}},
        "source": {
            "type": "Service",
            "hostnameAnnotation": "Ignore",
            "fqdnTemplate": ["{{.Name}}.apps.example.com"],
            "service": {"serviceType": ["LoadBalancer"]}
        },
        "zones": ["Z0323552X0970SB2UHBB"]
    })
}

/// The same spec expressed in `v1alpha1`
pub fn aws_spec_v1alpha1() -> Value {
    json!({
        "domains": [{"filterType": "Include", "match": {"matchType": "Exact", "name": "apps.example.com"}}],
        "provider": {"type": "AWS", "aws": {"credentials": {"name": "aws-access-key"}}},
        "source": {
            "type": "Service",
            "hostnameAnnotation": "Ignore",
            "fqdnTemplate": ["{{.Name}}.apps.example.com"],
            "service": {"serviceType": ["LoadBalancer"]}
        },
        "zones": ["Z0323552X0970SB2UHBB"]
    })
}

/// An Infoblox provider block with all settings present
pub fn infoblox_provider() -> Value {
    json!({
        "type": "Infoblox",
        "infoblox": {
            "credentials": {"name": "infoblox-credentials"},
            "gridHost": "gridhost.example.com",
            "wapiPort": 443,
            "wapiVersion": "2.3.1"
        }
    })
}
