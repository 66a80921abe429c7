// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Admission, schema and webhook error types for the ExternalDNS operator.
//!
//! This module provides specialized error types for:
//! - Field invariant violations raised by the individual admission rules
//! - The aggregated rejection returned to the API server
//! - Decoding failures for the served schema versions
//! - Webhook server start-up failures
//!
//! The `Display` text of every [`FieldViolation`] is the exact reason string
//! surfaced to users in the admission response, so these messages are part of
//! the operator's public contract.

use std::fmt;

use thiserror::Error;

use crate::crd::ProviderType;

/// Violations raised while checking a single domain filter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainFilterError {
    /// `matchType: Exact` without a `name`.
    #[error("Name cannot be empty when match type is Exact")]
    EmptyExactName,

    /// `matchType: Pattern` without a `pattern`.
    #[error("Pattern cannot be empty when match type is Pattern")]
    EmptyPattern,

    /// The pattern does not compile as a regular expression.
    #[error("invalid pattern for Pattern match type: {reason}")]
    InvalidPattern {
        /// Compiler error reported by the regex engine
        reason: String,
    },

    /// The match type is neither `Exact` nor `Pattern`.
    #[error("unsupported match type {match_type}")]
    UnsupportedMatchType {
        /// The match type value as submitted
        match_type: String,
    },
}

/// Violations raised while checking the DNS provider configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// AWS provider without a credentials secret or an assume role.
    #[error("credentials secret or assume role must be specified when provider type is AWS")]
    AwsCredentialsRequired,

    /// AWS provider with both a credentials secret and an assume role.
    #[error("credentials secret and assume role are mutually exclusive but both are specified")]
    AwsCredentialsConflict,

    /// AWS assume role block without an ARN.
    #[error("assume role arn must be specified when assume role is set")]
    AwsAssumeRoleArnRequired,

    /// AWS assume role ARN that does not parse.
    #[error("{arn} is not a valid AWS ARN")]
    InvalidAwsArn {
        /// The ARN as submitted
        arn: String,
    },

    /// Azure or BlueCat provider without a config file secret.
    #[error("config file name must be specified when provider type is {provider}")]
    ConfigFileRequired {
        /// Provider that requires the config file
        provider: ProviderType,
    },

    /// GCP provider without a credentials secret.
    #[error("credentials secret must be specified when provider type is GCP")]
    GcpCredentialsRequired,

    /// Infoblox provider missing one or more of its connection settings.
    ///
    /// The message intentionally names all four settings rather than the missing one.
    #[error(
        "credentials secret, grid host, WAPI port and WAPI version must be specified when provider type is Infoblox"
    )]
    InfobloxSettingsIncomplete,
}

/// Violations raised while checking the source configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The CRD source type is recognised but not supported for new resources.
    #[error("CRD source is not implemented")]
    CrdSourceNotImplemented,

    /// Service source ignoring hostname annotations with nothing to derive names from.
    #[error("fqdnTemplate must be specified when hostnameAnnotation is Ignore")]
    FqdnTemplateRequired,
}

/// A single failed admission rule.
///
/// Always user-recoverable by correcting the resource; never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldViolation {
    /// Domain filter rule failure
    #[error(transparent)]
    DomainFilter(#[from] DomainFilterError),

    /// Provider credential rule failure
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Source consistency rule failure
    #[error(transparent)]
    Source(#[from] SourceError),
}

impl FieldViolation {
    /// Returns a CamelCase reason code for this violation.
    ///
    /// Used as the admission status reason and as a metrics label.
    #[must_use]
    pub fn reason(&self) -> &'static str {
        match self {
            Self::DomainFilter(DomainFilterError::EmptyExactName) => "DomainNameRequired",
            Self::DomainFilter(DomainFilterError::EmptyPattern) => "DomainPatternRequired",
            Self::DomainFilter(DomainFilterError::InvalidPattern { .. }) => "InvalidDomainPattern",
            Self::DomainFilter(DomainFilterError::UnsupportedMatchType { .. }) => {
                "UnsupportedMatchType"
            }

            Self::Provider(ProviderError::AwsCredentialsRequired) => "AWSCredentialsRequired",
            Self::Provider(ProviderError::AwsCredentialsConflict) => "AWSCredentialsConflict",
            Self::Provider(ProviderError::AwsAssumeRoleArnRequired) => "AWSAssumeRoleARNRequired",
            Self::Provider(ProviderError::InvalidAwsArn { .. }) => "InvalidAWSARN",
            Self::Provider(ProviderError::ConfigFileRequired { .. }) => "ConfigFileRequired",
            Self::Provider(ProviderError::GcpCredentialsRequired) => "GCPCredentialsRequired",
            Self::Provider(ProviderError::InfobloxSettingsIncomplete) => {
                "InfobloxSettingsIncomplete"
            }

            Self::Source(SourceError::CrdSourceNotImplemented) => "SourceNotImplemented",
            Self::Source(SourceError::FqdnTemplateRequired) => "FQDNTemplateRequired",
        }
    }
}

/// Every violation found in one admission request.
///
/// Holds at least one violation. Rendered as the newline-joined reasons, in the
/// order the rules ran, with nothing truncated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdmissionRejection {
    violations: Vec<FieldViolation>,
}

impl AdmissionRejection {
    /// The violations, in evaluation order.
    #[must_use]
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    /// The user-facing reason strings, in evaluation order.
    #[must_use]
    pub fn reasons(&self) -> Vec<String> {
        self.violations.iter().map(ToString::to_string).collect()
    }

    /// Reason code of the first violation, used as the admission status reason.
    #[must_use]
    pub fn primary_reason(&self) -> &'static str {
        self.violations
            .first()
            .map_or("ValidationFailed", FieldViolation::reason)
    }
}

impl fmt::Display for AdmissionRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

impl std::error::Error for AdmissionRejection {}

/// Collects the outcome of every admission rule without short-circuiting.
///
/// Identical reasons are kept once, at the position of their first occurrence.
#[derive(Debug, Default)]
pub struct Violations {
    collected: Vec<FieldViolation>,
}

impl Violations {
    /// Creates an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the outcome of one rule.
    pub fn record<E: Into<FieldViolation>>(&mut self, outcome: Result<(), E>) {
        if let Err(err) = outcome {
            self.push(err.into());
        }
    }

    /// Records a violation directly.
    pub fn push(&mut self, violation: FieldViolation) {
        if !self.collected.contains(&violation) {
            self.collected.push(violation);
        }
    }

    /// Number of distinct violations collected so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.collected.len()
    }

    /// Returns true when no rule has failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.collected.is_empty()
    }

    /// Converts the collected outcomes into a verdict.
    ///
    /// # Errors
    ///
    /// Returns an [`AdmissionRejection`] when at least one rule failed.
    pub fn finish(self) -> Result<(), AdmissionRejection> {
        if self.collected.is_empty() {
            Ok(())
        } else {
            Err(AdmissionRejection {
                violations: self.collected,
            })
        }
    }
}

/// Errors raised while decoding an `ExternalDNS` document at the version boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// The document declares an apiVersion this operator does not serve.
    #[error("unsupported ExternalDNS apiVersion '{api_version}'")]
    UnsupportedVersion {
        /// The apiVersion as submitted
        api_version: String,
    },

    /// The document does not match the schema of its declared version.
    #[error("failed to decode ExternalDNS {api_version}: {reason}")]
    Malformed {
        /// The apiVersion the document was decoded as
        api_version: String,
        /// Decoder error
        reason: String,
    },

    /// The admission request carries no object for an operation that needs one.
    #[error("admission request for {operation} carries no {field}")]
    MissingObject {
        /// Admission operation (CREATE, UPDATE)
        operation: String,
        /// Which object is missing (object, oldObject)
        field: &'static str,
    },
}

/// Errors that can occur when running the webhook server.
#[derive(Error, Debug)]
pub enum WebhookError {
    /// TLS certificate or key could not be loaded
    #[error("TLS configuration error: {0}")]
    TlsConfig(String),

    /// The HTTP server failed
    #[error("Webhook server error: {0}")]
    Server(String),
}
