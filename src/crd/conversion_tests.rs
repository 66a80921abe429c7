// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for `conversion.rs`

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::crd::conversion::{
        convert_object, decode_spec, unused_provider_blocks, ServedVersion,
    };
    use crate::crd::{
        v1alpha1, AssumeRoleStrategy, DomainMatchType, ExternalDNSProvider,
        HostnameAnnotationPolicy, ProviderType, SourceKind, SourceType,
    };
    use crate::errors::SchemaError;
    use crate::labels::ASSUME_ROLE_STRATEGY_ANNOTATION;

    fn legacy_object() -> serde_json::Value {
        json!({
            "apiVersion": "externaldns.olm.openshift.io/v1alpha1",
            "kind": "ExternalDNS",
            "metadata": {"name": "sample"},
            "spec": {
                "domains": [{
                    "filterType": "Include",
                    "match": {"matchType": "Exact", "name": "apps.example.com"}
                }],
                "provider": {
                    "type": "AWS",
                    "assumeRole": {"arn": "arn:aws:iam::123456789012:role/dns"}
                },
                "source": {"type": "OpenShiftRoute"},
                "labelFilter": {"matchLabels": {"app": "web"}},
                "zones": ["Z0323552X0970SB2UHBB"]
            }
        })
    }

    #[test]
    fn test_served_version_accepts_group_and_bare_versions() {
        assert_eq!(
            ServedVersion::parse("externaldns.olm.openshift.io/v1beta1").unwrap(),
            ServedVersion::V1beta1
        );
        assert_eq!(ServedVersion::parse("v1alpha1").unwrap(), ServedVersion::V1alpha1);
        assert_eq!(
            ServedVersion::V1alpha1.api_version(),
            "externaldns.olm.openshift.io/v1alpha1"
        );
    }

    #[test]
    fn test_served_version_rejects_foreign_group() {
        let err = ServedVersion::parse("externaldns.k8s.io/v1beta1").unwrap_err();
        assert!(matches!(err, SchemaError::UnsupportedVersion { .. }));

        let err = ServedVersion::parse("v2").unwrap_err();
        assert_eq!(err.to_string(), "unsupported ExternalDNS apiVersion 'v2'");
    }

    #[test]
    fn test_decode_legacy_spec_moves_fields_to_storage_shape() {
        let spec = decode_spec(
            "externaldns.olm.openshift.io/v1alpha1",
            legacy_object()["spec"].clone(),
        )
        .unwrap();

        assert_eq!(spec.domains.len(), 1);
        assert_eq!(spec.domains[0].match_type, DomainMatchType::Exact);
        assert_eq!(spec.domains[0].name.as_deref(), Some("apps.example.com"));

        let ExternalDNSProvider::Aws { aws } = &spec.provider else {
            panic!("expected AWS provider, got {:?}", spec.provider);
        };
        assert!(aws.credentials.is_none());
        let role = aws.assume_role.as_ref().unwrap();
        assert_eq!(role.arn, "arn:aws:iam::123456789012:role/dns");
        assert_eq!(role.strategy, None);

        assert_eq!(spec.source_type(), SourceType::OpenShiftRoute);
        assert!(spec.source.label_filter.is_some());
        assert_eq!(spec.zones, vec!["Z0323552X0970SB2UHBB".to_string()]);
    }

    #[test]
    fn test_legacy_hostname_annotation_default_depends_on_source() {
        let route = decode_spec("v1alpha1", legacy_object()["spec"].clone()).unwrap();
        assert_eq!(route.source.hostname_annotation, HostnameAnnotationPolicy::Allow);

        let mut spec = legacy_object()["spec"].clone();
        spec["source"] = json!({"type": "Service"});
        let service = decode_spec("v1alpha1", spec).unwrap();
        assert_eq!(service.source.hostname_annotation, HostnameAnnotationPolicy::Ignore);
        assert!(matches!(service.source.kind, SourceKind::Service { .. }));
    }

    #[test]
    fn test_decode_storage_spec_keeps_unknown_match_type() {
        let spec = decode_spec(
            "v1beta1",
            json!({
                "domains": [{"filterType": "Exclude", "matchType": "Glob", "name": "x"}],
                "provider": {"type": "Azure"},
                "source": {"type": "Service", "fqdnTemplate": ["{{.Name}}.example.com"]}
            }),
        )
        .unwrap();

        assert_eq!(
            spec.domains[0].match_type,
            DomainMatchType::Unsupported("Glob".to_string())
        );
        assert_eq!(spec.provider_type(), ProviderType::Azure);
    }

    #[test]
    fn test_decode_malformed_spec() {
        let err = decode_spec("v1beta1", json!({"provider": {"type": "Route53"}})).unwrap_err();
        assert!(matches!(err, SchemaError::Malformed { .. }));
    }

    #[test]
    fn test_convert_object_same_version_is_identity() {
        let object = legacy_object();
        let converted =
            convert_object(object.clone(), "externaldns.olm.openshift.io/v1alpha1").unwrap();
        assert_eq!(converted, object);
    }

    #[test]
    fn test_convert_object_to_storage_version() {
        let converted =
            convert_object(legacy_object(), "externaldns.olm.openshift.io/v1beta1").unwrap();

        assert_eq!(converted["apiVersion"], "externaldns.olm.openshift.io/v1beta1");
        assert_eq!(converted["kind"], "ExternalDNS");
        assert_eq!(converted["metadata"]["name"], "sample");
        assert_eq!(converted["spec"]["domains"][0]["matchType"], "Exact");
        assert_eq!(
            converted["spec"]["provider"]["aws"]["assumeRole"]["arn"],
            "arn:aws:iam::123456789012:role/dns"
        );
        assert_eq!(converted["spec"]["source"]["labelFilter"]["matchLabels"]["app"], "web");
        assert!(converted["spec"].get("labelFilter").is_none());
    }

    #[test]
    fn test_assume_role_strategy_survives_round_trip_through_legacy_version() {
        let mut storage =
            convert_object(legacy_object(), "externaldns.olm.openshift.io/v1beta1").unwrap();
        storage["spec"]["provider"]["aws"]["assumeRole"]["strategy"] = json!("irsa");

        let legacy = convert_object(storage, "externaldns.olm.openshift.io/v1alpha1").unwrap();
        assert_eq!(
            legacy["metadata"]["annotations"][ASSUME_ROLE_STRATEGY_ANNOTATION],
            "irsa"
        );
        assert!(legacy["spec"]["provider"]["assumeRole"].get("strategy").is_none());

        let restored = convert_object(legacy, "externaldns.olm.openshift.io/v1beta1").unwrap();
        assert_eq!(
            restored["spec"]["provider"]["aws"]["assumeRole"]["strategy"],
            "irsa"
        );
        assert!(restored["metadata"].get("annotations").is_none());

        let spec: crate::crd::ExternalDNSSpec =
            serde_json::from_value(restored["spec"].clone()).unwrap();
        let ExternalDNSProvider::Aws { aws } = spec.provider else {
            panic!("expected AWS provider");
        };
        assert_eq!(
            aws.assume_role.and_then(|role| role.strategy),
            Some(AssumeRoleStrategy::Irsa)
        );
    }

    #[test]
    fn test_unparseable_strategy_annotation_is_dropped() {
        let mut object = legacy_object();
        object["metadata"]["annotations"] = json!({
            ASSUME_ROLE_STRATEGY_ANNOTATION: "magic",
            "team": "dns"
        });

        let converted = convert_object(object, "v1beta1").unwrap();
        assert!(converted["spec"]["provider"]["aws"]["assumeRole"]
            .get("strategy")
            .is_none());
        assert_eq!(converted["metadata"]["annotations"]["team"], "dns");
        assert!(converted["metadata"]["annotations"]
            .get(ASSUME_ROLE_STRATEGY_ANNOTATION)
            .is_none());
    }

    #[test]
    fn test_storage_to_legacy_spec_places_provider_blocks_side_by_side() {
        let hub = decode_spec(
            "v1beta1",
            json!({
                "provider": {"type": "GCP", "gcp": {"credentials": {"name": "gcp-key"}}},
                "source": {
                    "type": "Service",
                    "service": {"serviceType": ["LoadBalancer"]},
                    "labelFilter": {"matchLabels": {"tier": "edge"}}
                }
            }),
        )
        .unwrap();

        let legacy = v1alpha1::ExternalDNSSpec::from(hub);
        assert_eq!(legacy.provider.r#type, ProviderType::Gcp);
        assert_eq!(
            legacy.provider.gcp.and_then(|gcp| gcp.credentials).map(|s| s.name),
            Some("gcp-key".to_string())
        );
        assert!(legacy.provider.aws.is_none());
        assert_eq!(legacy.source.r#type, SourceType::Service);
        assert_eq!(
            legacy.source.hostname_annotation,
            Some(HostnameAnnotationPolicy::Ignore)
        );
        assert!(legacy.source.service.is_some());
        assert!(legacy.label_filter.is_some());
    }

    #[test]
    fn test_legacy_provider_blocks_not_matching_type_are_reported() {
        let legacy: v1alpha1::ExternalDNSProvider = serde_json::from_value(json!({
            "type": "GCP",
            "gcp": {"credentials": {"name": "gcp-key"}},
            "aws": {"credentials": {"name": "aws-access-key"}},
            "assumeRole": {"arn": "arn:aws:iam::123456789012:role/my-role"}
        }))
        .unwrap();
        assert_eq!(unused_provider_blocks(&legacy), vec!["aws", "assumeRole"]);

        let hub = ExternalDNSProvider::from(legacy);
        let value = serde_json::to_value(&hub).unwrap();
        assert_eq!(value["type"], "GCP");
        assert_eq!(value["gcp"]["credentials"]["name"], "gcp-key");
        assert!(value.get("aws").is_none());
    }

    #[test]
    fn test_legacy_aws_provider_uses_every_block() {
        let legacy: v1alpha1::ExternalDNSProvider = serde_json::from_value(json!({
            "type": "AWS",
            "aws": {"credentials": {"name": "aws-access-key"}},
            "assumeRole": {"arn": "arn:aws:iam::123456789012:role/my-role"}
        }))
        .unwrap();
        assert!(unused_provider_blocks(&legacy).is_empty());
    }

    #[test]
    fn test_convert_object_without_api_version() {
        let err = convert_object(json!({"kind": "ExternalDNS"}), "v1beta1").unwrap_err();
        assert!(matches!(err, SchemaError::UnsupportedVersion { .. }));
    }
}
