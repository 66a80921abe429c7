// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! CRD conversion review (`apiextensions.k8s.io/v1` `ConversionReview`).
//!
//! The API server sends a batch of objects and a desired version; either every
//! object converts or the whole review fails.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, info};

use crate::crd::conversion::convert_object;
use crate::metrics::{record_conversion, RESULT_ERROR, RESULT_SUCCESS};

/// API version of the conversion review envelope
pub const CONVERSION_REVIEW_API_VERSION: &str = "apiextensions.k8s.io/v1";

/// Kind of the conversion review envelope
pub const CONVERSION_REVIEW_KIND: &str = "ConversionReview";

const STATUS_SUCCESS: &str = "Success";
const STATUS_FAILURE: &str = "Failure";

/// Kubernetes ConversionReview
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionReview {
    pub api_version: String,
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<ConversionRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<ConversionResponse>,
}

/// ConversionRequest carries the objects to convert
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionRequest {
    pub uid: String,
    #[serde(rename = "desiredAPIVersion")]
    pub desired_api_version: String,
    #[serde(default)]
    pub objects: Vec<Value>,
}

/// ConversionResponse contains the converted objects
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionResponse {
    pub uid: String,
    #[serde(default)]
    pub converted_objects: Vec<Value>,
    pub result: ConversionResult,
}

/// Outcome of a conversion, shaped like a `metav1.Status`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionResult {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ConversionReview {
    fn respond(uid: String, outcome: Result<Vec<Value>, String>) -> Self {
        let (converted_objects, result) = match outcome {
            Ok(objects) => (
                objects,
                ConversionResult {
                    status: STATUS_SUCCESS.to_string(),
                    message: None,
                },
            ),
            Err(message) => (
                Vec::new(),
                ConversionResult {
                    status: STATUS_FAILURE.to_string(),
                    message: Some(message),
                },
            ),
        };

        Self {
            api_version: CONVERSION_REVIEW_API_VERSION.to_string(),
            kind: CONVERSION_REVIEW_KIND.to_string(),
            request: None,
            response: Some(ConversionResponse {
                uid,
                converted_objects,
                result,
            }),
        }
    }

    /// Returns true when the response reports success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.response
            .as_ref()
            .is_some_and(|response| response.result.status == STATUS_SUCCESS)
    }
}

/// Converts every object of a review to the desired version.
#[must_use]
pub fn review_conversion(review: ConversionReview) -> ConversionReview {
    let Some(request) = review.request else {
        error!("Conversion review missing request");
        return ConversionReview::respond(
            String::new(),
            Err("Missing request in ConversionReview".to_string()),
        );
    };

    debug!(
        uid = %request.uid,
        desired_api_version = %request.desired_api_version,
        objects = request.objects.len(),
        "Processing conversion request"
    );

    let desired = request.desired_api_version;
    let outcome: Result<Vec<Value>, String> = request
        .objects
        .into_iter()
        .map(|object| {
            let converted = convert_object(object, &desired);
            let result = if converted.is_ok() { RESULT_SUCCESS } else { RESULT_ERROR };
            record_conversion(&desired, result);
            converted.map_err(|e| e.to_string())
        })
        .collect();

    match &outcome {
        Ok(objects) => {
            info!(
                uid = %request.uid,
                desired_api_version = %desired,
                objects = objects.len(),
                "Conversion succeeded"
            );
        }
        Err(message) => {
            error!(
                uid = %request.uid,
                desired_api_version = %desired,
                error = %message,
                "Conversion failed"
            );
        }
    }

    ConversionReview::respond(request.uid, outcome)
}
