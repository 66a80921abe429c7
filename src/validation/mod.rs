// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Admission-time validation of `ExternalDNS` resources.
//!
//! [`ExternalDnsValidator`] runs every rule against the storage representation of
//! a resource and reports all failures at once:
//!
//! 1. each domain filter ([`domain_filter`])
//! 2. the source ([`source`])
//! 3. the provider credentials ([`provider`])
//!
//! Rules never short-circuit. The verdict lists every distinct reason in the order
//! above, so users can fix a resource in one round trip.
//!
//! # Example
//!
//! ```rust,ignore
//! use external_dns_operator::validation::ExternalDnsValidator;
//!
//! let validator = ExternalDnsValidator::new(false);
//! if let Err(rejection) = validator.validate_create(&spec) {
//!     eprintln!("{rejection}");
//! }
//! ```

pub mod domain_filter;
pub mod provider;
pub mod source;

pub use domain_filter::validate_domain_filter;
pub use provider::{is_valid_arn, validate_provider};
pub use source::validate_source;

use tracing::debug;

use crate::crd::ExternalDNSSpec;
use crate::errors::{AdmissionRejection, Violations};

/// Validates `ExternalDNS` resources on create and update.
///
/// Holds only process-wide settings read at start-up, so one instance can be
/// shared by every request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExternalDnsValidator {
    platform_managed_credentials: bool,
}

impl ExternalDnsValidator {
    /// Creates a validator.
    ///
    /// # Arguments
    ///
    /// * `platform_managed_credentials` - Whether the platform injects credentials
    ///   for AWS, GCP and Azure, making the user-supplied ones optional
    #[must_use]
    pub fn new(platform_managed_credentials: bool) -> Self {
        Self {
            platform_managed_credentials,
        }
    }

    /// Whether the platform supplies cloud provider credentials.
    #[must_use]
    pub fn platform_managed_credentials(&self) -> bool {
        self.platform_managed_credentials
    }

    /// Validates a resource being created.
    ///
    /// # Errors
    ///
    /// Returns an [`AdmissionRejection`] listing every failed rule.
    pub fn validate_create(&self, spec: &ExternalDNSSpec) -> Result<(), AdmissionRejection> {
        self.validate(spec, None)
    }

    /// Validates a resource being updated.
    ///
    /// `old` is the stored spec, already converted to the storage version.
    ///
    /// # Errors
    ///
    /// Returns an [`AdmissionRejection`] listing every failed rule.
    pub fn validate_update(
        &self,
        spec: &ExternalDNSSpec,
        old: &ExternalDNSSpec,
    ) -> Result<(), AdmissionRejection> {
        self.validate(spec, Some(old))
    }

    /// Deletion is never blocked.
    ///
    /// # Errors
    ///
    /// Never returns an error.
    pub fn validate_delete(&self) -> Result<(), AdmissionRejection> {
        Ok(())
    }

    fn validate(
        &self,
        spec: &ExternalDNSSpec,
        previous: Option<&ExternalDNSSpec>,
    ) -> Result<(), AdmissionRejection> {
        let mut violations = Violations::new();

        for domain in &spec.domains {
            violations.record(validate_domain_filter(domain));
        }
        violations.record(validate_source(&spec.source, previous));
        violations.record(validate_provider(
            &spec.provider,
            self.platform_managed_credentials,
        ));

        debug!(
            provider = %spec.provider_type(),
            source = %spec.source_type(),
            domains = spec.domains.len(),
            violations = violations.len(),
            "Validated ExternalDNS spec"
        );

        violations.finish()
    }
}
