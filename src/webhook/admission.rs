// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Validating admission review for `ExternalDNS` resources.
//!
//! Objects arrive as [`DynamicObject`]s in whichever served version the API
//! server chose. Their `spec` is decoded into the storage version before the
//! [`ExternalDnsValidator`] runs, so the same rules apply to every version.

use std::time::Instant;

use kube::core::admission::{AdmissionRequest, AdmissionResponse, AdmissionReview, Operation};
use kube::core::DynamicObject;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::crd::{conversion::decode_spec, ExternalDNSSpec};
use crate::errors::{AdmissionRejection, SchemaError};
use crate::metrics::{
    record_admission, record_violation, RESULT_ALLOWED, RESULT_DENIED, RESULT_ERROR,
};
use crate::validation::ExternalDnsValidator;

/// Outcome of reviewing one admission request.
#[derive(Debug)]
enum Verdict {
    Allowed,
    Denied(AdmissionRejection),
    Malformed(SchemaError),
}

/// Reviews an `AdmissionReview` and returns the review to send back.
///
/// Rule violations and undecodable objects both produce a denial carrying the
/// request UID. A review without a request yields an `invalid` response.
#[must_use]
pub fn review_admission(
    validator: &ExternalDnsValidator,
    review: AdmissionReview<DynamicObject>,
) -> AdmissionReview<DynamicObject> {
    let started = Instant::now();

    let request: AdmissionRequest<DynamicObject> = match review.try_into() {
        Ok(request) => request,
        Err(e) => {
            error!(error = %e, "Failed to extract admission request");
            record_admission("UNKNOWN", RESULT_ERROR, started.elapsed());
            return AdmissionResponse::invalid(format!("Invalid AdmissionReview: {e}"))
                .into_review();
        }
    };

    let operation = operation_label(&request.operation);
    debug!(
        uid = %request.uid,
        operation,
        namespace = ?request.namespace,
        name = ?request.name,
        "Processing admission request"
    );

    let response = AdmissionResponse::from(&request);
    let response = match evaluate(validator, &request) {
        Verdict::Allowed => {
            info!(uid = %request.uid, operation, name = ?request.name, "Admission request allowed");
            record_admission(operation, RESULT_ALLOWED, started.elapsed());
            response
        }
        Verdict::Denied(rejection) => {
            for violation in rejection.violations() {
                record_violation(violation.reason());
            }
            warn!(
                uid = %request.uid,
                operation,
                name = ?request.name,
                reason = rejection.primary_reason(),
                message = %rejection,
                "Admission request denied"
            );
            record_admission(operation, RESULT_DENIED, started.elapsed());
            response.deny(rejection.to_string())
        }
        Verdict::Malformed(e) => {
            error!(uid = %request.uid, operation, error = %e, "Failed to decode ExternalDNS");
            record_admission(operation, RESULT_ERROR, started.elapsed());
            response.deny(e.to_string())
        }
    };

    response.into_review()
}

fn evaluate(
    validator: &ExternalDnsValidator,
    request: &AdmissionRequest<DynamicObject>,
) -> Verdict {
    match request.operation {
        Operation::Create => match decode_object(request, request.object.as_ref(), "object") {
            Ok(spec) => verdict(validator.validate_create(&spec)),
            Err(e) => Verdict::Malformed(e),
        },
        Operation::Update => {
            let spec = match decode_object(request, request.object.as_ref(), "object") {
                Ok(spec) => spec,
                Err(e) => return Verdict::Malformed(e),
            };
            match decode_object(request, request.old_object.as_ref(), "oldObject") {
                Ok(old) => verdict(validator.validate_update(&spec, &old)),
                Err(e) => {
                    warn!(
                        uid = %request.uid,
                        error = %e,
                        "Failed to decode old ExternalDNS, treating as CREATE"
                    );
                    verdict(validator.validate_create(&spec))
                }
            }
        }
        Operation::Delete | Operation::Connect => verdict(validator.validate_delete()),
    }
}

fn verdict(outcome: Result<(), AdmissionRejection>) -> Verdict {
    match outcome {
        Ok(()) => Verdict::Allowed,
        Err(rejection) => Verdict::Denied(rejection),
    }
}

/// Decodes the spec of `object`, using its own `apiVersion` when it has one and
/// the version of the request kind otherwise.
fn decode_object(
    request: &AdmissionRequest<DynamicObject>,
    object: Option<&DynamicObject>,
    field: &'static str,
) -> Result<ExternalDNSSpec, SchemaError> {
    let object = object.ok_or_else(|| SchemaError::MissingObject {
        operation: operation_label(&request.operation).to_string(),
        field,
    })?;

    let api_version = match &object.types {
        Some(types) if !types.api_version.is_empty() => types.api_version.clone(),
        _ => format!("{}/{}", request.kind.group, request.kind.version),
    };
    let spec = object.data.get("spec").cloned().unwrap_or(Value::Null);

    decode_spec(&api_version, spec)
}

fn operation_label(operation: &Operation) -> &'static str {
    match operation {
        Operation::Create => "CREATE",
        Operation::Update => "UPDATE",
        Operation::Delete => "DELETE",
        Operation::Connect => "CONNECT",
    }
}

#[cfg(test)]
#[path = "admission_tests.rs"]
mod admission_tests;
