// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! `ExternalDNS` `v1alpha1`, the legacy served version.
//!
//! Differences from `v1beta1`:
//! - domain match settings are nested under `domains[].match`
//! - the provider is a `type` plus optional sibling blocks, with the AWS assume
//!   role beside them at `provider.assumeRole` and no strategy field
//! - the label filter lives at `spec.labelFilter`
//! - `source.hostnameAnnotation` is optional; when absent, route sources allow the
//!   annotation and every other source ignores it
//!
//! See [`super::conversion`] for the adapters into the storage version.

use k8s_openapi::apimachinery::pkg::apis::meta::v1::LabelSelector;
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::v1beta1::{
    AzureProviderOptions, BlueCatProviderOptions, CrdSourceOptions, DomainFilterType,
    DomainMatchType, GcpProviderOptions, HostnameAnnotationPolicy, InfobloxProviderOptions,
    ProviderType, RouteSourceOptions, SecretReference, ServiceSourceOptions, SourceType,
};

/// `ExternalDNS` describes one external-dns deployment managed by the operator.
#[derive(CustomResource, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "externaldns.olm.openshift.io",
    version = "v1alpha1",
    kind = "ExternalDNS",
    plural = "externaldnses",
    shortname = "extdns",
    derive = "PartialEq",
    doc = "ExternalDNS describes a managed external-dns deployment. Deprecated in favour of v1beta1."
)]
#[kube(status = "crate::crd::v1beta1::ExternalDNSStatus")]
#[serde(rename_all = "camelCase")]
pub struct ExternalDNSSpec {
    /// Domains to include in or exclude from publishing, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub domains: Vec<ExternalDNSDomain>,

    /// DNS provider that records are published to.
    pub provider: ExternalDNSProvider,

    /// Cluster resources that records are derived from.
    pub source: ExternalDNSSource,

    /// Provider zone identifiers to publish into.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[schemars(length(max = 10))]
    pub zones: Vec<String>,

    /// Restricts the source objects considered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_filter: Option<LabelSelector>,
}

/// One domain filter rule.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExternalDNSDomain {
    /// Whether matching names are published or skipped.
    pub filter_type: DomainFilterType,

    /// Match settings.
    pub r#match: DomainMatch,
}

/// Match settings of a domain filter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DomainMatch {
    /// How `name` or `pattern` is compared against record names.
    pub match_type: DomainMatchType,

    /// Domain name for `Exact` matches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Regular expression for `Pattern` matches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

/// Provider configuration: a type plus the block for that type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExternalDNSProvider {
    /// Provider type.
    pub r#type: ProviderType,

    /// AWS settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aws: Option<AwsProviderOptions>,

    /// IAM role assumed by the operand (AWS only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assume_role: Option<AwsAssumeRole>,

    /// GCP settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gcp: Option<GcpProviderOptions>,

    /// Azure settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub azure: Option<AzureProviderOptions>,

    /// BlueCat settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blue_cat: Option<BlueCatProviderOptions>,

    /// Infoblox settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub infoblox: Option<InfobloxProviderOptions>,
}

/// AWS settings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AwsProviderOptions {
    /// Secret holding the access key pair.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<SecretReference>,
}

/// IAM role to assume.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AwsAssumeRole {
    /// Role ARN.
    #[serde(default)]
    pub arn: String,
}

/// Source configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExternalDNSSource {
    /// Source type.
    pub r#type: SourceType,

    /// Hostname annotation policy. Defaults depend on the source type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname_annotation: Option<HostnameAnnotationPolicy>,

    /// Go templates producing record names from source objects.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fqdn_template: Vec<String>,

    /// Service settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<ServiceSourceOptions>,

    /// Route settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openshift_route_options: Option<RouteSourceOptions>,

    /// CRD settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crd: Option<CrdSourceOptions>,
}
