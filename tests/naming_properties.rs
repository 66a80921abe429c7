// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

// Test code is allowed to panic on failure
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]

//! Property-based tests for derived resource names
//!
//! For any zone identifier and any valid prefix:
//! 1. The name fits in a DNS-1123 label and matches its grammar
//! 2. The same inputs always produce the same name
//! 3. Short prefixes are kept whole
//!
//! Run with: cargo test --test naming_properties

use proptest::prelude::*;
use regex::Regex;

use external_dns_operator::constants::{DNS1123_LABEL_MAX_LENGTH, EXTERNAL_DNS_BASE_NAME};
use external_dns_operator::names::{container_name, name_token, resource_name};

const DNS1123_LABEL: &str = "^[a-z0-9]([-a-z0-9]*[a-z0-9])?$";

fn dns_prefix() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,90}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_name_is_dns1123_label(prefix in dns_prefix(), zone in ".{0,128}") {
        let name = resource_name(&prefix, &zone);
        prop_assert!(name.len() <= DNS1123_LABEL_MAX_LENGTH, "{} is too long", name);
        prop_assert!(Regex::new(DNS1123_LABEL).unwrap().is_match(&name), "{} is not a label", name);
    }

    #[test]
    fn prop_name_is_deterministic(prefix in dns_prefix(), zone in "[A-Z0-9]{0,32}") {
        prop_assert_eq!(resource_name(&prefix, &zone), resource_name(&prefix, &zone));
    }

    #[test]
    fn prop_short_prefix_kept(prefix in "[a-z][a-z0-9]{0,40}", zone in "[A-Z0-9]{1,32}") {
        let name = resource_name(&prefix, &zone);
        prop_assert_eq!(name, format!("{}-{}", prefix, name_token(&zone)));
    }

    #[test]
    fn prop_token_shape(zone in ".{0,64}") {
        let token = name_token(&zone);
        prop_assert!((1..=7).contains(&token.len()));
        prop_assert!(token.as_bytes()[0].is_ascii_lowercase());
        prop_assert!(token.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit()));
    }

    #[test]
    fn prop_container_names_share_base(zone in "[A-Z0-9]{0,32}") {
        let name = container_name(&zone);
        let base = format!("{EXTERNAL_DNS_BASE_NAME}-");
        prop_assert!(name.starts_with(&base));
    }
}

#[test]
fn test_known_zone_names() {
    assert_eq!(container_name("Z0323552X0970SB2UHBB"), "external-dns-wznx6zr");
    assert_eq!(container_name(""), "external-dns-cqbt4sk");
}
