// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Source consistency checks.

use tracing::debug;

use crate::crd::{
    ExternalDNSSource, ExternalDNSSpec, HostnameAnnotationPolicy, SourceKind, SourceType,
};
use crate::errors::SourceError;

/// Validates the source settings of a spec.
///
/// # Arguments
///
/// * `source` - The source configuration being admitted
/// * `previous` - The stored spec on update, `None` on create
///
/// # Errors
///
/// - [`SourceError::CrdSourceNotImplemented`] for a `CRD` source, unless the
///   stored object already used one
/// - [`SourceError::FqdnTemplateRequired`] for a `Service` source that ignores the
///   hostname annotation and has no non-blank template
pub fn validate_source(
    source: &ExternalDNSSource,
    previous: Option<&ExternalDNSSpec>,
) -> Result<(), SourceError> {
    match &source.kind {
        SourceKind::Crd { .. } => {
            // Objects created before the restriction keep working.
            if previous.is_some_and(|old| old.source_type() == SourceType::Crd) {
                debug!("Keeping CRD source of an existing ExternalDNS");
                return Ok(());
            }
            Err(SourceError::CrdSourceNotImplemented)
        }
        // Route hostnames are always templated per route by the operator.
        SourceKind::OpenShiftRoute { .. } => Ok(()),
        SourceKind::Service { .. } => {
            if source.hostname_annotation == HostnameAnnotationPolicy::Ignore
                && !has_fqdn_template(source)
            {
                return Err(SourceError::FqdnTemplateRequired);
            }
            Ok(())
        }
    }
}

fn has_fqdn_template(source: &ExternalDNSSource) -> bool {
    source
        .fqdn_template
        .iter()
        .any(|template| !template.trim().is_empty())
}

#[cfg(test)]
#[path = "source_tests.rs"]
mod source_tests;
