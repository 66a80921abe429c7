// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Provider credential checks.
//!
//! Every provider owns its own secret references; the rules here only check that
//! the references are present. Resolving them is left to the controller.

use tracing::debug;

use crate::crd::{
    is_secret_named, AwsProviderOptions, ExternalDNSProvider, InfobloxProviderOptions,
    ProviderType,
};
use crate::errors::ProviderError;

/// Number of `:`-separated sections in an ARN.
const ARN_SECTIONS: usize = 6;

/// Prefix every ARN starts with.
const ARN_PREFIX: &str = "arn:";

/// Returns true when the platform supplies credentials for this provider itself.
#[must_use]
pub fn is_platform_provided(provider: ProviderType) -> bool {
    matches!(
        provider,
        ProviderType::Aws | ProviderType::Gcp | ProviderType::Azure
    )
}

/// Validates the credential settings of a provider.
///
/// # Arguments
///
/// * `provider` - The provider configuration to check
/// * `platform_managed_credentials` - Whether the platform injects credentials for
///   the cloud providers it runs on
///
/// # Errors
///
/// Returns a [`ProviderError`] naming the first missing or conflicting setting.
pub fn validate_provider(
    provider: &ExternalDNSProvider,
    platform_managed_credentials: bool,
) -> Result<(), ProviderError> {
    let provider_type = provider.provider_type();
    if platform_managed_credentials && is_platform_provided(provider_type) {
        debug!(provider = %provider_type, "Credentials are supplied by the platform");
        return Ok(());
    }

    match provider {
        ExternalDNSProvider::Aws { aws } => validate_aws(aws),
        ExternalDNSProvider::Gcp { gcp } => {
            if is_secret_named(gcp.credentials.as_ref()) {
                Ok(())
            } else {
                Err(ProviderError::GcpCredentialsRequired)
            }
        }
        ExternalDNSProvider::Azure { azure } => {
            require_config_file(is_secret_named(azure.config_file.as_ref()), provider_type)
        }
        ExternalDNSProvider::BlueCat { blue_cat } => {
            require_config_file(is_secret_named(blue_cat.config_file.as_ref()), provider_type)
        }
        ExternalDNSProvider::Infoblox { infoblox } => validate_infoblox(infoblox),
    }
}

fn require_config_file(present: bool, provider: ProviderType) -> Result<(), ProviderError> {
    if present {
        Ok(())
    } else {
        Err(ProviderError::ConfigFileRequired { provider })
    }
}

fn validate_aws(aws: &AwsProviderOptions) -> Result<(), ProviderError> {
    let has_credentials = is_secret_named(aws.credentials.as_ref());

    match (&aws.assume_role, has_credentials) {
        (None, false) => Err(ProviderError::AwsCredentialsRequired),
        (Some(_), true) => Err(ProviderError::AwsCredentialsConflict),
        (None, true) => Ok(()),
        (Some(role), false) => {
            if role.arn.is_empty() {
                return Err(ProviderError::AwsAssumeRoleArnRequired);
            }
            if !is_valid_arn(&role.arn) {
                return Err(ProviderError::InvalidAwsArn {
                    arn: role.arn.clone(),
                });
            }
            debug!(arn = %role.arn, strategy = ?role.strategy, "AWS assume role is valid");
            Ok(())
        }
    }
}

// Any missing setting yields the same combined message.
fn validate_infoblox(infoblox: &InfobloxProviderOptions) -> Result<(), ProviderError> {
    let complete = is_secret_named(infoblox.credentials.as_ref())
        && !infoblox.grid_host.is_empty()
        && infoblox.wapi_port != 0
        && !infoblox.wapi_version.is_empty();

    if complete {
        Ok(())
    } else {
        Err(ProviderError::InfobloxSettingsIncomplete)
    }
}

/// Checks that `arn` has the shape `arn:partition:service:region:account-id:resource`.
///
/// Region and account may be empty (IAM and S3 ARNs leave them out); partition,
/// service and resource may not. The resource section may itself contain `:`.
#[must_use]
pub fn is_valid_arn(arn: &str) -> bool {
    if !arn.starts_with(ARN_PREFIX) {
        return false;
    }

    let sections: Vec<&str> = arn.splitn(ARN_SECTIONS, ':').collect();
    if sections.len() != ARN_SECTIONS {
        return false;
    }

    let (partition, service, resource) = (sections[1], sections[2], sections[5]);
    !partition.is_empty() && !service.is_empty() && !resource.is_empty()
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod provider_tests;
