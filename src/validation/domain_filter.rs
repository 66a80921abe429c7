// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Domain filter rule checks.

use regex::Regex;
use tracing::debug;

use crate::crd::{DomainMatchType, ExternalDNSDomain};
use crate::errors::DomainFilterError;

/// Validates one include/exclude domain filter.
///
/// # Arguments
///
/// * `domain` - The filter to check
///
/// # Errors
///
/// Returns a [`DomainFilterError`] when:
/// - an `Exact` filter has no name
/// - a `Pattern` filter has no pattern, or the pattern does not compile
/// - the match type is neither `Exact` nor `Pattern`
pub fn validate_domain_filter(domain: &ExternalDNSDomain) -> Result<(), DomainFilterError> {
    match &domain.match_type {
        DomainMatchType::Exact => {
            if domain.name.as_deref().unwrap_or_default().is_empty() {
                return Err(DomainFilterError::EmptyExactName);
            }
        }
        DomainMatchType::Pattern => {
            let pattern = domain.pattern.as_deref().unwrap_or_default();
            if pattern.is_empty() {
                return Err(DomainFilterError::EmptyPattern);
            }
            // Compiled only to prove it parses; the operand does the matching.
            Regex::new(pattern).map_err(|e| DomainFilterError::InvalidPattern {
                reason: e.to_string(),
            })?;
        }
        DomainMatchType::Unsupported(other) => {
            return Err(DomainFilterError::UnsupportedMatchType {
                match_type: other.clone(),
            });
        }
    }

    debug!(
        filter_type = ?domain.filter_type,
        match_type = %domain.match_type,
        "Domain filter is valid"
    );
    Ok(())
}

#[cfg(test)]
#[path = "domain_filter_tests.rs"]
mod domain_filter_tests;
