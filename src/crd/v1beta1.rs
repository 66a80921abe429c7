// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! `ExternalDNS` `v1beta1`, the storage version.
//!
//! Every other served version converts into these types before it reaches the
//! admission rules, so validators and the controller only ever see this shape.
//!
//! # Example
//!
//! ```yaml
//! apiVersion: externaldns.olm.openshift.io/v1beta1
//! kind: ExternalDNS
//! metadata:
//!   name: sample
//! spec:
//!   domains:
//!     - filterType: Include
//!       matchType: Exact
//!       name: apps.example.com
//!   provider:
//!     type: AWS
//!     aws:
//!       credentials:
//!         name: aws-access-key
//!   source:
//!     type: Service
//!     hostnameAnnotation: Ignore
//!     fqdnTemplate:
//!       - "{{.Name}}.apps.example.com"
//!   zones:
//!     - Z0323552X0970SB2UHBB
//! ```

use std::borrow::Cow;
use std::fmt;

use k8s_openapi::apimachinery::pkg::apis::meta::v1::{Condition, LabelSelector};
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// `ExternalDNS` describes one external-dns deployment managed by the operator.
#[derive(CustomResource, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "externaldns.olm.openshift.io",
    version = "v1beta1",
    kind = "ExternalDNS",
    plural = "externaldnses",
    shortname = "extdns",
    derive = "PartialEq",
    doc = "ExternalDNS describes a managed external-dns deployment that publishes DNS records for cluster resources to a DNS provider.",
    printcolumn = r#"{"name":"Provider","type":"string","jsonPath":".spec.provider.type"}"#,
    printcolumn = r#"{"name":"Source","type":"string","jsonPath":".spec.source.type"}"#
)]
#[kube(status = "ExternalDNSStatus")]
#[serde(rename_all = "camelCase")]
pub struct ExternalDNSSpec {
    /// Domains to include in or exclude from publishing, in order.
    ///
    /// An `Exclude` filter wins over an `Include` filter matching the same name.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub domains: Vec<ExternalDNSDomain>,

    /// DNS provider that records are published to.
    pub provider: ExternalDNSProvider,

    /// Cluster resources that records are derived from.
    pub source: ExternalDNSSource,

    /// Provider zone identifiers to publish into. Empty means every zone the
    /// credentials can reach.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[schemars(length(max = 10))]
    pub zones: Vec<String>,
}

impl ExternalDNSSpec {
    /// Source type discriminator of this spec.
    #[must_use]
    pub fn source_type(&self) -> SourceType {
        self.source.kind.source_type()
    }

    /// Provider type discriminator of this spec.
    #[must_use]
    pub fn provider_type(&self) -> ProviderType {
        self.provider.provider_type()
    }
}

// ============================================================================
// Domain Filters
// ============================================================================

/// One domain filter rule.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExternalDNSDomain {
    /// Whether matching names are published or skipped.
    pub filter_type: DomainFilterType,

    /// How `name` or `pattern` is compared against record names.
    pub match_type: DomainMatchType,

    /// Domain name, required when `matchType` is `Exact`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Regular expression, required when `matchType` is `Pattern`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

/// Whether a domain filter includes or excludes the names it matches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum DomainFilterType {
    /// Publish matching names
    Include,
    /// Never publish matching names
    Exclude,
}

/// How a domain filter matches names.
///
/// Unknown values are kept verbatim so the admission webhook can report them
/// instead of failing to decode the whole object.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DomainMatchType {
    /// Match the domain name and its subdomains literally
    Exact,
    /// Match names against a regular expression
    Pattern,
    /// Any other value
    Unsupported(String),
}

impl From<String> for DomainMatchType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Exact" => Self::Exact,
            "Pattern" => Self::Pattern,
            _ => Self::Unsupported(value),
        }
    }
}

impl From<DomainMatchType> for String {
    fn from(value: DomainMatchType) -> Self {
        match value {
            DomainMatchType::Exact => "Exact".to_string(),
            DomainMatchType::Pattern => "Pattern".to_string(),
            DomainMatchType::Unsupported(other) => other,
        }
    }
}

impl fmt::Display for DomainMatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact => f.write_str("Exact"),
            Self::Pattern => f.write_str("Pattern"),
            Self::Unsupported(other) => f.write_str(other),
        }
    }
}

impl JsonSchema for DomainMatchType {
    fn schema_name() -> Cow<'static, str> {
        "DomainMatchType".into()
    }

    fn json_schema(_generator: &mut schemars::SchemaGenerator) -> schemars::Schema {
        schemars::json_schema!({
            "type": "string",
            "enum": ["Exact", "Pattern"],
            "description": "How a domain filter matches names: Exact or Pattern."
        })
    }
}

// ============================================================================
// Providers
// ============================================================================

/// Provider type discriminator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum ProviderType {
    /// Amazon Route 53
    #[serde(rename = "AWS")]
    Aws,
    /// Google Cloud DNS
    #[serde(rename = "GCP")]
    Gcp,
    /// Azure DNS
    Azure,
    /// BlueCat Address Manager
    BlueCat,
    /// Infoblox NIOS
    Infoblox,
}

impl fmt::Display for ProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Aws => "AWS",
            Self::Gcp => "GCP",
            Self::Azure => "Azure",
            Self::BlueCat => "BlueCat",
            Self::Infoblox => "Infoblox",
        };
        f.write_str(name)
    }
}

/// DNS provider configuration, tagged by `type`.
///
/// The block matching the type may be omitted; admission then reports the
/// missing settings instead of rejecting the document as malformed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ExternalDNSProvider {
    /// Amazon Route 53
    #[serde(rename = "AWS")]
    Aws {
        /// AWS settings
        #[serde(default)]
        aws: AwsProviderOptions,
    },
    /// Google Cloud DNS
    #[serde(rename = "GCP")]
    Gcp {
        /// GCP settings
        #[serde(default)]
        gcp: GcpProviderOptions,
    },
    /// Azure DNS
    Azure {
        /// Azure settings
        #[serde(default)]
        azure: AzureProviderOptions,
    },
    /// BlueCat Address Manager
    BlueCat {
        /// BlueCat settings
        #[serde(default, rename = "blueCat")]
        blue_cat: BlueCatProviderOptions,
    },
    /// Infoblox NIOS
    Infoblox {
        /// Infoblox settings
        #[serde(default)]
        infoblox: InfobloxProviderOptions,
    },
}

impl ExternalDNSProvider {
    /// The `type` discriminator of this provider.
    #[must_use]
    pub fn provider_type(&self) -> ProviderType {
        match self {
            Self::Aws { .. } => ProviderType::Aws,
            Self::Gcp { .. } => ProviderType::Gcp,
            Self::Azure { .. } => ProviderType::Azure,
            Self::BlueCat { .. } => ProviderType::BlueCat,
            Self::Infoblox { .. } => ProviderType::Infoblox,
        }
    }
}

// One flat object: structural schemas cannot carry a `oneOf` whose branches
// disagree on `type`.
impl JsonSchema for ExternalDNSProvider {
    fn schema_name() -> Cow<'static, str> {
        "ExternalDNSProvider".into()
    }

    fn json_schema(generator: &mut schemars::SchemaGenerator) -> schemars::Schema {
        let aws = generator.subschema_for::<AwsProviderOptions>();
        let gcp = generator.subschema_for::<GcpProviderOptions>();
        let azure = generator.subschema_for::<AzureProviderOptions>();
        let blue_cat = generator.subschema_for::<BlueCatProviderOptions>();
        let infoblox = generator.subschema_for::<InfobloxProviderOptions>();

        schemars::json_schema!({
            "type": "object",
            "description": "DNS provider configuration. Only the block named by type is read.",
            "properties": {
                "type": {
                    "type": "string",
                    "enum": ["AWS", "GCP", "Azure", "BlueCat", "Infoblox"]
                },
                "aws": aws,
                "gcp": gcp,
                "azure": azure,
                "blueCat": blue_cat,
                "infoblox": infoblox
            },
            "required": ["type"]
        })
    }
}

/// Reference to a secret in the operator namespace. Resolved by the controller.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SecretReference {
    /// Secret name
    #[serde(default)]
    pub name: String,
}

impl SecretReference {
    /// Creates a reference to the named secret.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Returns true when the reference is present and names a secret.
#[must_use]
pub fn is_secret_named(reference: Option<&SecretReference>) -> bool {
    reference.is_some_and(|secret| !secret.name.is_empty())
}

/// AWS provider settings. Exactly one of `credentials` and `assumeRole` is expected.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AwsProviderOptions {
    /// Secret holding `aws_access_key_id` and `aws_secret_access_key`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<SecretReference>,

    /// IAM role assumed by the operand instead of static credentials.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assume_role: Option<AwsAssumeRole>,
}

/// IAM role to assume.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AwsAssumeRole {
    /// Role ARN, `arn:partition:service:region:account-id:resource`.
    #[serde(default)]
    pub arn: String,

    /// How the operand pod obtains the role.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<AssumeRoleStrategy>,
}

/// Mechanism used to hand the assumed role to the operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum AssumeRoleStrategy {
    /// IAM roles for service accounts
    Irsa,
    /// kiam agent
    Kiam,
    /// kube2iam agent
    Kube2iam,
}

impl fmt::Display for AssumeRoleStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Irsa => "irsa",
            Self::Kiam => "kiam",
            Self::Kube2iam => "kube2iam",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for AssumeRoleStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "irsa" => Ok(Self::Irsa),
            "kiam" => Ok(Self::Kiam),
            "kube2iam" => Ok(Self::Kube2iam),
            other => Err(format!("unknown assume role strategy '{other}'")),
        }
    }
}

/// GCP provider settings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GcpProviderOptions {
    /// Secret holding the service account key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<SecretReference>,

    /// GCP project hosting the zones. Defaults to the key's project.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
}

/// Azure provider settings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AzureProviderOptions {
    /// Secret holding the `azure.json` configuration file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_file: Option<SecretReference>,
}

/// BlueCat provider settings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BlueCatProviderOptions {
    /// Secret holding the BlueCat gateway configuration file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_file: Option<SecretReference>,
}

/// Infoblox provider settings. All four connection settings are required.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct InfobloxProviderOptions {
    /// Secret holding `EXTERNAL_DNS_INFOBLOX_WAPI_USERNAME` and `..._PASSWORD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<SecretReference>,

    /// Grid Manager host.
    #[serde(default)]
    pub grid_host: String,

    /// WAPI port.
    #[serde(default)]
    #[schemars(range(min = 0, max = 65535))]
    pub wapi_port: i32,

    /// WAPI version, for example `2.3.1`.
    #[serde(default)]
    pub wapi_version: String,
}

// ============================================================================
// Sources
// ============================================================================

/// Source type discriminator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum SourceType {
    /// Kubernetes `Service` objects
    Service,
    /// OpenShift `Route` objects
    OpenShiftRoute,
    /// `DNSEndpoint` custom resources
    #[serde(rename = "CRD")]
    Crd,
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Service => "Service",
            Self::OpenShiftRoute => "OpenShiftRoute",
            Self::Crd => "CRD",
        };
        f.write_str(name)
    }
}

/// Source configuration: the tagged source kind plus settings shared by every kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExternalDNSSource {
    /// Source kind, tagged by `type`.
    #[serde(flatten)]
    pub kind: SourceKind,

    /// Whether the `external-dns.alpha.kubernetes.io/hostname` annotation is honoured.
    #[serde(default)]
    pub hostname_annotation: HostnameAnnotationPolicy,

    /// Go templates producing record names from source objects.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fqdn_template: Vec<String>,

    /// Restricts the source objects considered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_filter: Option<LabelSelector>,
}

/// Source kind, tagged by `type`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SourceKind {
    /// Kubernetes `Service` objects
    Service {
        /// Service settings
        #[serde(default)]
        service: ServiceSourceOptions,
    },
    /// OpenShift `Route` objects
    OpenShiftRoute {
        /// Route settings
        #[serde(default, rename = "openshiftRouteOptions")]
        openshift_route_options: RouteSourceOptions,
    },
    /// `DNSEndpoint` custom resources
    #[serde(rename = "CRD")]
    Crd {
        /// CRD settings
        #[serde(default)]
        crd: CrdSourceOptions,
    },
}

impl SourceKind {
    /// The `type` discriminator of this source.
    #[must_use]
    pub fn source_type(&self) -> SourceType {
        match self {
            Self::Service { .. } => SourceType::Service,
            Self::OpenShiftRoute { .. } => SourceType::OpenShiftRoute,
            Self::Crd { .. } => SourceType::Crd,
        }
    }
}

// Flattened into `ExternalDNSSource`, so this must stay a plain object.
impl JsonSchema for SourceKind {
    fn schema_name() -> Cow<'static, str> {
        "SourceKind".into()
    }

    fn json_schema(generator: &mut schemars::SchemaGenerator) -> schemars::Schema {
        let service = generator.subschema_for::<ServiceSourceOptions>();
        let route = generator.subschema_for::<RouteSourceOptions>();
        let crd = generator.subschema_for::<CrdSourceOptions>();

        schemars::json_schema!({
            "type": "object",
            "properties": {
                "type": {
                    "type": "string",
                    "enum": ["Service", "OpenShiftRoute", "CRD"]
                },
                "service": service,
                "openshiftRouteOptions": route,
                "crd": crd
            },
            "required": ["type"]
        })
    }
}

/// Hostname annotation policy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum HostnameAnnotationPolicy {
    /// Record names come from `fqdnTemplate` only
    #[default]
    Ignore,
    /// The hostname annotation on source objects is honoured
    Allow,
}

/// `Service` source settings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSourceOptions {
    /// Service types to publish. Empty publishes every type.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub service_type: Vec<ServiceType>,
}

/// Kubernetes service type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum ServiceType {
    /// `ClusterIP`
    #[serde(rename = "ClusterIP")]
    ClusterIp,
    /// `NodePort`
    NodePort,
    /// `LoadBalancer`
    LoadBalancer,
    /// `ExternalName`
    ExternalName,
}

/// `Route` source settings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RouteSourceOptions {
    /// Router whose canonical hostname is used as the record target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub router_name: Option<String>,
}

/// `DNSEndpoint` custom resource source settings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CrdSourceOptions {
    /// Kind of the endpoint resource.
    #[serde(default)]
    pub kind: String,

    /// API version of the endpoint resource.
    #[serde(default)]
    pub version: String,
}

// ============================================================================
// Status
// ============================================================================

/// Observed state of an `ExternalDNS` resource. Shared by every served version.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExternalDNSStatus {
    /// Current conditions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,

    /// Most recent generation observed by the controller.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed_generation: Option<i64>,

    /// Zones records are currently published to.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub zones: Vec<String>,
}
