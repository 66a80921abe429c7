// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for the `ExternalDNS` CRD types

#[cfg(test)]
mod tests {
    use crate::constants::{API_GROUP, KIND_EXTERNAL_DNS, MAX_ZONES};
    use crate::crd::*;
    use kube::core::crd::merge_crds;
    use kube::CustomResourceExt;
    use serde_json::json;

    #[test]
    fn test_crd_identity() {
        let crd = ExternalDNS::crd();
        assert_eq!(crd.spec.group, API_GROUP);
        assert_eq!(crd.spec.names.kind, KIND_EXTERNAL_DNS);
        assert_eq!(crd.spec.names.plural, "externaldnses");
        assert_eq!(
            crd.spec.names.short_names,
            Some(vec!["extdns".to_string()])
        );
    }

    #[test]
    fn test_zones_limited_in_schema() {
        let crd = serde_json::to_value(ExternalDNS::crd()).unwrap();
        let zones = &crd["spec"]["versions"][0]["schema"]["openAPIV3Schema"]["properties"]["spec"]
            ["properties"]["zones"];
        assert_eq!(zones["maxItems"], json!(MAX_ZONES));
    }

    #[test]
    fn test_provider_schema_is_one_flat_object() {
        let crd = serde_json::to_value(ExternalDNS::crd()).unwrap();
        let provider = &crd["spec"]["versions"][0]["schema"]["openAPIV3Schema"]["properties"]
            ["spec"]["properties"]["provider"];

        assert!(provider.get("oneOf").is_none());
        assert_eq!(provider["required"], json!(["type"]));
        assert_eq!(
            provider["properties"]["type"]["enum"],
            json!(["AWS", "GCP", "Azure", "BlueCat", "Infoblox"])
        );
        for block in ["aws", "gcp", "azure", "blueCat", "infoblox"] {
            assert!(
                provider["properties"].get(block).is_some(),
                "missing {block}"
            );
        }
    }

    #[test]
    fn test_source_schema_flattens_kind() {
        let crd = serde_json::to_value(ExternalDNS::crd()).unwrap();
        let source = &crd["spec"]["versions"][0]["schema"]["openAPIV3Schema"]["properties"]
            ["spec"]["properties"]["source"];

        assert!(source.get("oneOf").is_none());
        assert_eq!(
            source["properties"]["type"]["enum"],
            json!(["Service", "OpenShiftRoute", "CRD"])
        );
        for field in [
            "service",
            "openshiftRouteOptions",
            "crd",
            "hostnameAnnotation",
            "fqdnTemplate",
            "labelFilter",
        ] {
            assert!(source["properties"].get(field).is_some(), "missing {field}");
        }
    }

    #[test]
    fn test_merged_crd_stores_v1beta1() {
        let crd = merge_crds(
            vec![v1alpha1::ExternalDNS::crd(), v1beta1::ExternalDNS::crd()],
            "v1beta1",
        )
        .unwrap();

        let versions: Vec<(String, bool)> = crd
            .spec
            .versions
            .iter()
            .map(|v| (v.name.clone(), v.storage))
            .collect();
        assert_eq!(
            versions,
            vec![
                ("v1alpha1".to_string(), false),
                ("v1beta1".to_string(), true)
            ]
        );
    }

    #[test]
    fn test_provider_tagged_by_type() {
        let provider: ExternalDNSProvider = serde_json::from_value(json!({
            "type": "Infoblox",
            "infoblox": {
                "credentials": {"name": "infoblox-creds"},
                "gridHost": "gridhost.example.com",
                "wapiPort": 443,
                "wapiVersion": "2.3.1"
            }
        }))
        .unwrap();

        assert_eq!(provider.provider_type(), ProviderType::Infoblox);
        let value = serde_json::to_value(&provider).unwrap();
        assert_eq!(value["type"], "Infoblox");
        assert_eq!(value["infoblox"]["wapiPort"], 443);
    }

    #[test]
    fn test_provider_block_may_be_omitted() {
        let provider: ExternalDNSProvider =
            serde_json::from_value(json!({"type": "AWS"})).unwrap();
        assert_eq!(
            provider,
            ExternalDNSProvider::Aws {
                aws: AwsProviderOptions::default()
            }
        );
    }

    #[test]
    fn test_source_defaults() {
        let source: ExternalDNSSource =
            serde_json::from_value(json!({"type": "Service"})).unwrap();
        assert_eq!(source.kind.source_type(), SourceType::Service);
        assert_eq!(source.hostname_annotation, HostnameAnnotationPolicy::Ignore);
        assert!(source.fqdn_template.is_empty());
        assert!(source.label_filter.is_none());
    }

    #[test]
    fn test_source_serializes_flat() {
        let source = ExternalDNSSource {
            kind: SourceKind::OpenShiftRoute {
                openshift_route_options: RouteSourceOptions {
                    router_name: Some("default".to_string()),
                },
            },
            hostname_annotation: HostnameAnnotationPolicy::Allow,
            fqdn_template: vec![],
            label_filter: None,
        };

        let value = serde_json::to_value(&source).unwrap();
        assert_eq!(value["type"], "OpenShiftRoute");
        assert_eq!(value["openshiftRouteOptions"]["routerName"], "default");
        assert_eq!(value["hostnameAnnotation"], "Allow");
    }

    #[test]
    fn test_match_type_round_trips_unknown_values() {
        let domain: ExternalDNSDomain = serde_json::from_value(json!({
            "filterType": "Include",
            "matchType": "Regex",
            "pattern": ".*"
        }))
        .unwrap();

        assert_eq!(
            domain.match_type,
            DomainMatchType::Unsupported("Regex".to_string())
        );
        assert_eq!(serde_json::to_value(&domain).unwrap()["matchType"], "Regex");
    }

    #[test]
    fn test_assume_role_strategy_names() {
        for (name, strategy) in [
            ("irsa", AssumeRoleStrategy::Irsa),
            ("kiam", AssumeRoleStrategy::Kiam),
            ("kube2iam", AssumeRoleStrategy::Kube2iam),
        ] {
            assert_eq!(name.parse::<AssumeRoleStrategy>().unwrap(), strategy);
            assert_eq!(strategy.to_string(), name);
            assert_eq!(serde_json::to_value(strategy).unwrap(), name);
        }
        assert!("iam".parse::<AssumeRoleStrategy>().is_err());
    }

    #[test]
    fn test_is_secret_named() {
        assert!(is_secret_named(Some(&SecretReference::new("creds"))));
        assert!(!is_secret_named(Some(&SecretReference::new(""))));
        assert!(!is_secret_named(None));
    }
}
