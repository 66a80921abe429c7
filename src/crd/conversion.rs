// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Conversion between the served `ExternalDNS` versions.
//!
//! `v1beta1` is the hub: admission decodes whichever version it receives into
//! `v1beta1` before any rule runs, and the CRD conversion webhook moves whole
//! objects between versions through the same adapters.
//!
//! `v1alpha1` has no field for the AWS assume-role strategy. When a `v1beta1`
//! object is served as `v1alpha1` the strategy is parked in the
//! [`ASSUME_ROLE_STRATEGY_ANNOTATION`] annotation and restored on the way back.

use std::collections::BTreeMap;

use kube::core::ObjectMeta;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::{v1alpha1, v1beta1};
use crate::constants::{
    API_GROUP, API_GROUP_VERSION_V1ALPHA1, API_GROUP_VERSION_V1BETA1, API_VERSION_V1ALPHA1,
    API_VERSION_V1BETA1,
};
use crate::errors::SchemaError;
use crate::labels::ASSUME_ROLE_STRATEGY_ANNOTATION;

/// A schema version served by the `ExternalDNS` CRD.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ServedVersion {
    /// Legacy version
    V1alpha1,
    /// Storage version
    V1beta1,
}

impl ServedVersion {
    /// Parses an `apiVersion` value, with or without the group.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnsupportedVersion`] for other groups or versions.
    pub fn parse(api_version: &str) -> Result<Self, SchemaError> {
        let version = match api_version.split_once('/') {
            Some((group, version)) if group == API_GROUP => version,
            Some(_) => {
                return Err(SchemaError::UnsupportedVersion {
                    api_version: api_version.to_string(),
                })
            }
            None => api_version,
        };

        match version {
            API_VERSION_V1ALPHA1 => Ok(Self::V1alpha1),
            API_VERSION_V1BETA1 => Ok(Self::V1beta1),
            _ => Err(SchemaError::UnsupportedVersion {
                api_version: api_version.to_string(),
            }),
        }
    }

    /// The fully qualified `apiVersion` of this version.
    #[must_use]
    pub fn api_version(self) -> &'static str {
        match self {
            Self::V1alpha1 => API_GROUP_VERSION_V1ALPHA1,
            Self::V1beta1 => API_GROUP_VERSION_V1BETA1,
        }
    }
}

/// Decodes a `spec` document of the given version into the storage representation.
///
/// # Errors
///
/// Returns a [`SchemaError`] when the version is not served or the document does
/// not match its schema.
pub fn decode_spec(
    api_version: &str,
    spec: Value,
) -> Result<v1beta1::ExternalDNSSpec, SchemaError> {
    match ServedVersion::parse(api_version)? {
        ServedVersion::V1beta1 => decode(api_version, spec),
        ServedVersion::V1alpha1 => {
            let legacy: v1alpha1::ExternalDNSSpec = decode(api_version, spec)?;
            Ok(legacy.into())
        }
    }
}

/// Converts a whole `ExternalDNS` object to `desired_api_version`.
///
/// Metadata and status are carried over unchanged apart from the strategy
/// annotation described in the module documentation.
///
/// # Errors
///
/// Returns a [`SchemaError`] when either version is not served or the object does
/// not match the schema of the version it declares.
pub fn convert_object(object: Value, desired_api_version: &str) -> Result<Value, SchemaError> {
    let current = object
        .get("apiVersion")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let from = ServedVersion::parse(&current)?;
    let to = ServedVersion::parse(desired_api_version)?;

    debug!(from = %current, to = %desired_api_version, "Converting ExternalDNS object");

    match (from, to) {
        (ServedVersion::V1alpha1, ServedVersion::V1alpha1)
        | (ServedVersion::V1beta1, ServedVersion::V1beta1) => Ok(object),
        (ServedVersion::V1alpha1, ServedVersion::V1beta1) => {
            let legacy: v1alpha1::ExternalDNS = decode(&current, object)?;
            let mut metadata = legacy.metadata;
            let strategy = take_strategy_annotation(&mut metadata);

            let mut spec = v1beta1::ExternalDNSSpec::from(legacy.spec);
            if let v1beta1::ExternalDNSProvider::Aws { aws } = &mut spec.provider {
                if let Some(role) = aws.assume_role.as_mut() {
                    role.strategy = strategy;
                }
            }

            encode(
                desired_api_version,
                &v1beta1::ExternalDNS {
                    metadata,
                    spec,
                    status: legacy.status,
                },
            )
        }
        (ServedVersion::V1beta1, ServedVersion::V1alpha1) => {
            let hub: v1beta1::ExternalDNS = decode(&current, object)?;
            let mut metadata = hub.metadata;
            if let Some(strategy) = assume_role_strategy(&hub.spec) {
                metadata
                    .annotations
                    .get_or_insert_with(BTreeMap::new)
                    .insert(
                        ASSUME_ROLE_STRATEGY_ANNOTATION.to_string(),
                        strategy.to_string(),
                    );
            }

            encode(
                desired_api_version,
                &v1alpha1::ExternalDNS {
                    metadata,
                    spec: hub.spec.into(),
                    status: hub.status,
                },
            )
        }
    }
}

fn decode<T: DeserializeOwned>(api_version: &str, document: Value) -> Result<T, SchemaError> {
    serde_json::from_value(document).map_err(|e| SchemaError::Malformed {
        api_version: api_version.to_string(),
        reason: e.to_string(),
    })
}

fn encode<T: Serialize>(api_version: &str, object: &T) -> Result<Value, SchemaError> {
    serde_json::to_value(object).map_err(|e| SchemaError::Malformed {
        api_version: api_version.to_string(),
        reason: e.to_string(),
    })
}

fn assume_role_strategy(spec: &v1beta1::ExternalDNSSpec) -> Option<v1beta1::AssumeRoleStrategy> {
    match &spec.provider {
        v1beta1::ExternalDNSProvider::Aws { aws } => {
            aws.assume_role.as_ref().and_then(|role| role.strategy)
        }
        _ => None,
    }
}

fn take_strategy_annotation(metadata: &mut ObjectMeta) -> Option<v1beta1::AssumeRoleStrategy> {
    let annotations = metadata.annotations.as_mut()?;
    let raw = annotations.remove(ASSUME_ROLE_STRATEGY_ANNOTATION)?;
    if annotations.is_empty() {
        metadata.annotations = None;
    }

    match raw.parse() {
        Ok(strategy) => Some(strategy),
        Err(e) => {
            warn!(
                annotation = ASSUME_ROLE_STRATEGY_ANNOTATION,
                error = %e,
                "Dropping unparseable assume role strategy"
            );
            None
        }
    }
}

// ============================================================================
// v1alpha1 -> v1beta1
// ============================================================================

impl From<v1alpha1::ExternalDNSSpec> for v1beta1::ExternalDNSSpec {
    fn from(legacy: v1alpha1::ExternalDNSSpec) -> Self {
        let source = v1beta1::ExternalDNSSource {
            hostname_annotation: legacy.source.hostname_annotation.unwrap_or(
                match legacy.source.r#type {
                    v1beta1::SourceType::OpenShiftRoute => v1beta1::HostnameAnnotationPolicy::Allow,
                    v1beta1::SourceType::Service | v1beta1::SourceType::Crd => {
                        v1beta1::HostnameAnnotationPolicy::Ignore
                    }
                },
            ),
            kind: match legacy.source.r#type {
                v1beta1::SourceType::Service => v1beta1::SourceKind::Service {
                    service: legacy.source.service.unwrap_or_default(),
                },
                v1beta1::SourceType::OpenShiftRoute => v1beta1::SourceKind::OpenShiftRoute {
                    openshift_route_options: legacy
                        .source
                        .openshift_route_options
                        .unwrap_or_default(),
                },
                v1beta1::SourceType::Crd => v1beta1::SourceKind::Crd {
                    crd: legacy.source.crd.unwrap_or_default(),
                },
            },
            fqdn_template: legacy.source.fqdn_template,
            label_filter: legacy.label_filter,
        };

        Self {
            domains: legacy
                .domains
                .into_iter()
                .map(|domain| v1beta1::ExternalDNSDomain {
                    filter_type: domain.filter_type,
                    match_type: domain.r#match.match_type,
                    name: domain.r#match.name,
                    pattern: domain.r#match.pattern,
                })
                .collect(),
            provider: legacy.provider.into(),
            source,
            zones: legacy.zones,
        }
    }
}

/// Sibling blocks of a `v1alpha1` provider that its `type` does not read.
///
/// `v1beta1` has nowhere to keep them, so they are lost on conversion.
fn unused_provider_blocks(legacy: &v1alpha1::ExternalDNSProvider) -> Vec<&'static str> {
    let aws = legacy.r#type == v1beta1::ProviderType::Aws;
    [
        ("aws", legacy.aws.is_some() && !aws),
        ("assumeRole", legacy.assume_role.is_some() && !aws),
        (
            "gcp",
            legacy.gcp.is_some() && legacy.r#type != v1beta1::ProviderType::Gcp,
        ),
        (
            "azure",
            legacy.azure.is_some() && legacy.r#type != v1beta1::ProviderType::Azure,
        ),
        (
            "blueCat",
            legacy.blue_cat.is_some() && legacy.r#type != v1beta1::ProviderType::BlueCat,
        ),
        (
            "infoblox",
            legacy.infoblox.is_some() && legacy.r#type != v1beta1::ProviderType::Infoblox,
        ),
    ]
    .into_iter()
    .filter_map(|(block, unused)| unused.then_some(block))
    .collect()
}

impl From<v1alpha1::ExternalDNSProvider> for v1beta1::ExternalDNSProvider {
    fn from(legacy: v1alpha1::ExternalDNSProvider) -> Self {
        let unused = unused_provider_blocks(&legacy);
        if !unused.is_empty() {
            warn!(
                provider = %legacy.r#type,
                blocks = ?unused,
                "Dropping provider blocks that do not match the provider type"
            );
        }

        match legacy.r#type {
            v1beta1::ProviderType::Aws => Self::Aws {
                aws: v1beta1::AwsProviderOptions {
                    credentials: legacy.aws.and_then(|aws| aws.credentials),
                    assume_role: legacy.assume_role.map(|role| v1beta1::AwsAssumeRole {
                        arn: role.arn,
                        strategy: None,
                    }),
                },
            },
            v1beta1::ProviderType::Gcp => Self::Gcp {
                gcp: legacy.gcp.unwrap_or_default(),
            },
            v1beta1::ProviderType::Azure => Self::Azure {
                azure: legacy.azure.unwrap_or_default(),
            },
            v1beta1::ProviderType::BlueCat => Self::BlueCat {
                blue_cat: legacy.blue_cat.unwrap_or_default(),
            },
            v1beta1::ProviderType::Infoblox => Self::Infoblox {
                infoblox: legacy.infoblox.unwrap_or_default(),
            },
        }
    }
}

// ============================================================================
// v1beta1 -> v1alpha1
// ============================================================================

impl From<v1beta1::ExternalDNSSpec> for v1alpha1::ExternalDNSSpec {
    fn from(hub: v1beta1::ExternalDNSSpec) -> Self {
        let source_type = hub.source.kind.source_type();
        let mut source = v1alpha1::ExternalDNSSource {
            r#type: source_type,
            hostname_annotation: Some(hub.source.hostname_annotation),
            fqdn_template: hub.source.fqdn_template,
            service: None,
            openshift_route_options: None,
            crd: None,
        };
        match hub.source.kind {
            v1beta1::SourceKind::Service { service } => source.service = Some(service),
            v1beta1::SourceKind::OpenShiftRoute {
                openshift_route_options,
            } => source.openshift_route_options = Some(openshift_route_options),
            v1beta1::SourceKind::Crd { crd } => source.crd = Some(crd),
        }

        Self {
            domains: hub
                .domains
                .into_iter()
                .map(|domain| v1alpha1::ExternalDNSDomain {
                    filter_type: domain.filter_type,
                    r#match: v1alpha1::DomainMatch {
                        match_type: domain.match_type,
                        name: domain.name,
                        pattern: domain.pattern,
                    },
                })
                .collect(),
            provider: hub.provider.into(),
            source,
            zones: hub.zones,
            label_filter: hub.source.label_filter,
        }
    }
}

impl From<v1beta1::ExternalDNSProvider> for v1alpha1::ExternalDNSProvider {
    fn from(hub: v1beta1::ExternalDNSProvider) -> Self {
        let mut legacy = Self {
            r#type: hub.provider_type(),
            aws: None,
            assume_role: None,
            gcp: None,
            azure: None,
            blue_cat: None,
            infoblox: None,
        };
        match hub {
            v1beta1::ExternalDNSProvider::Aws { aws } => {
                legacy.aws = Some(v1alpha1::AwsProviderOptions {
                    credentials: aws.credentials,
                });
                legacy.assume_role = aws
                    .assume_role
                    .map(|role| v1alpha1::AwsAssumeRole { arn: role.arn });
            }
            v1beta1::ExternalDNSProvider::Gcp { gcp } => legacy.gcp = Some(gcp),
            v1beta1::ExternalDNSProvider::Azure { azure } => legacy.azure = Some(azure),
            v1beta1::ExternalDNSProvider::BlueCat { blue_cat } => legacy.blue_cat = Some(blue_cat),
            v1beta1::ExternalDNSProvider::Infoblox { infoblox } => legacy.infoblox = Some(infoblox),
        }
        legacy
    }
}

#[cfg(test)]
#[path = "conversion_tests.rs"]
mod conversion_tests;
