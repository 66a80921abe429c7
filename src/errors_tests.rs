// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for `errors.rs`

#[cfg(test)]
mod tests {
    use crate::crd::ProviderType;
    use crate::errors::*;

    #[test]
    fn test_violation_display_is_transparent() {
        let violation = FieldViolation::from(ProviderError::ConfigFileRequired {
            provider: ProviderType::Azure,
        });
        assert_eq!(
            violation.to_string(),
            "config file name must be specified when provider type is Azure"
        );
        assert_eq!(violation.reason(), "ConfigFileRequired");
    }

    #[test]
    fn test_reason_codes() {
        assert_eq!(
            FieldViolation::from(DomainFilterError::InvalidPattern {
                reason: "x".into()
            })
            .reason(),
            "InvalidDomainPattern"
        );
        assert_eq!(
            FieldViolation::from(ProviderError::InvalidAwsArn { arn: "x".into() }).reason(),
            "InvalidAWSARN"
        );
        assert_eq!(
            FieldViolation::from(SourceError::CrdSourceNotImplemented).reason(),
            "SourceNotImplemented"
        );
    }

    #[test]
    fn test_empty_collector_accepts() {
        let violations = Violations::new();
        assert!(violations.is_empty());
        assert!(violations.finish().is_ok());
    }

    #[test]
    fn test_collector_keeps_order_and_drops_duplicates() {
        let mut violations = Violations::new();
        violations.record(Err::<(), _>(SourceError::FqdnTemplateRequired));
        violations.record(Ok::<(), SourceError>(()));
        violations.record(Err::<(), _>(ProviderError::GcpCredentialsRequired));
        violations.record(Err::<(), _>(SourceError::FqdnTemplateRequired));
        assert_eq!(violations.len(), 2);

        let rejection = violations.finish().unwrap_err();
        assert_eq!(
            rejection.reasons(),
            vec![
                "fqdnTemplate must be specified when hostnameAnnotation is Ignore".to_string(),
                "credentials secret must be specified when provider type is GCP".to_string(),
            ]
        );
        assert_eq!(rejection.primary_reason(), "FQDNTemplateRequired");
    }

    #[test]
    fn test_distinct_patterns_are_not_duplicates() {
        let mut violations = Violations::new();
        violations.push(
            DomainFilterError::UnsupportedMatchType {
                match_type: "Glob".into(),
            }
            .into(),
        );
        violations.push(
            DomainFilterError::UnsupportedMatchType {
                match_type: "Wildcard".into(),
            }
            .into(),
        );

        let rejection = violations.finish().unwrap_err();
        assert_eq!(
            rejection.to_string(),
            "unsupported match type Glob\nunsupported match type Wildcard"
        );
    }

    #[test]
    fn test_schema_error_messages() {
        let err = SchemaError::MissingObject {
            operation: "UPDATE".into(),
            field: "oldObject",
        };
        assert_eq!(err.to_string(), "admission request for UPDATE carries no oldObject");

        let err = SchemaError::Malformed {
            api_version: "v1beta1".into(),
            reason: "missing field `provider`".into(),
        };
        assert_eq!(
            err.to_string(),
            "failed to decode ExternalDNS v1beta1: missing field `provider`"
        );
    }

    #[test]
    fn test_webhook_error_messages() {
        assert_eq!(
            WebhookError::TlsConfig("no such file".into()).to_string(),
            "TLS configuration error: no such file"
        );
        assert_eq!(
            WebhookError::Server("bind failed".into()).to_string(),
            "Webhook server error: bind failed"
        );
    }
}
