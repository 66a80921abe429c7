// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Deterministic names for the objects derived from an `ExternalDNS` resource.
//!
//! Provider zone identifiers are opaque and can be long (Azure zone IDs are full
//! resource paths), but every name derived from them must be a DNS-1123 label.
//! [`resource_name`] maps a zone to a short hash token instead:
//!
//! - the zone bytes are hashed with 32-bit FNV-1a
//! - the token starts with a consonant picked by `hash % 20`
//! - the rest encodes `hash / 20` in base 27, least significant digit first,
//!   over consonants and the digits `2 4 5 6 7 8 9`
//!
//! Vowels and the digits `0 1 3` are left out so tokens never spell words or
//! look like each other. A token is 1 to 7 characters.
//!
//! # Example
//!
//! ```rust
//! use external_dns_operator::names::resource_name;
//!
//! assert_eq!(
//!     resource_name("external-dns", "Z0323552X0970SB2UHBB"),
//!     "external-dns-wznx6zr"
//! );
//! ```

use std::collections::BTreeMap;

use crate::constants::{
    CREDENTIALS_SECRET_PREFIX, DNS1123_LABEL_MAX_LENGTH, EXTERNAL_DNS_BASE_NAME,
};
use crate::crd::ExternalDNSSpec;
use crate::labels::{
    APP_NAME_EXTERNAL_DNS, COMPONENT_DNS_PUBLISHER, EXTERNAL_DNS_OWNER_LABEL, K8S_COMPONENT,
    K8S_INSTANCE, K8S_MANAGED_BY, K8S_NAME, MANAGED_BY_OPERATOR,
};

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// Alphabet for the leading token character.
const LEADING_ALPHABET: &[u8; 20] = b"bcdfghjklmnpqrstvwxz";

/// Alphabet for the remaining token characters.
const TOKEN_ALPHABET: &[u8; 27] = b"bcdfghjklmnpqrstvwxz2456789";

/// 32-bit FNV-1a hash of `bytes`.
#[must_use]
pub fn fnv1a_32(bytes: &[u8]) -> u32 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u32::from(*byte)).wrapping_mul(FNV_PRIME)
    })
}

/// Short token identifying `zone`. Always starts with a letter.
#[must_use]
pub fn name_token(zone: &str) -> String {
    let hash = fnv1a_32(zone.as_bytes());

    let mut token = String::with_capacity(7);
    token.push(char::from(LEADING_ALPHABET[(hash % 20) as usize]));

    let mut rest = hash / 20;
    while rest > 0 {
        token.push(char::from(TOKEN_ALPHABET[(rest % 27) as usize]));
        rest /= 27;
    }
    token
}

/// Name for the object serving `zone`: `<prefix>-<token>`.
///
/// The prefix is shortened when needed so the result fits in a DNS-1123 label;
/// hyphens left dangling at the cut are removed. A prefix that is cut away
/// entirely leaves just the token.
///
/// # Arguments
///
/// * `prefix` - Base name, expected to be a valid DNS-1123 label prefix
/// * `zone` - Provider zone identifier, any length, may be empty
#[must_use]
pub fn resource_name(prefix: &str, zone: &str) -> String {
    let token = name_token(zone);
    let budget = DNS1123_LABEL_MAX_LENGTH - 1 - token.len();

    let mut end = prefix.len().min(budget);
    while !prefix.is_char_boundary(end) {
        end -= 1;
    }
    let prefix = prefix[..end].trim_end_matches('-');

    if prefix.is_empty() {
        token
    } else {
        format!("{prefix}-{token}")
    }
}

/// Name of the deployment and service account of an `ExternalDNS` instance.
#[must_use]
pub fn instance_resource_name(instance: &str) -> String {
    format!("{EXTERNAL_DNS_BASE_NAME}-{instance}")
}

/// Name of the credentials secret copied into the operand namespace.
#[must_use]
pub fn credentials_secret_name(instance: &str) -> String {
    format!("{CREDENTIALS_SECRET_PREFIX}-{instance}")
}

/// Name of the operand container publishing into `zone`.
#[must_use]
pub fn container_name(zone: &str) -> String {
    resource_name(EXTERNAL_DNS_BASE_NAME, zone)
}

/// Container names for every zone of `spec`, in zone order.
///
/// A spec without zones runs one container covering every zone, named as if
/// for the empty zone.
#[must_use]
pub fn container_names(spec: &ExternalDNSSpec) -> Vec<String> {
    if spec.zones.is_empty() {
        return vec![container_name("")];
    }
    spec.zones.iter().map(|zone| container_name(zone)).collect()
}

/// Labels applied to every object owned by the `ExternalDNS` named `instance`.
#[must_use]
pub fn managed_labels(instance: &str) -> BTreeMap<String, String> {
    let mut labels = BTreeMap::new();
    labels.insert(K8S_NAME.into(), APP_NAME_EXTERNAL_DNS.into());
    labels.insert(K8S_INSTANCE.into(), instance.into());
    labels.insert(K8S_COMPONENT.into(), COMPONENT_DNS_PUBLISHER.into());
    labels.insert(K8S_MANAGED_BY.into(), MANAGED_BY_OPERATOR.into());
    labels.insert(EXTERNAL_DNS_OWNER_LABEL.into(), instance.into());
    labels
}

#[cfg(test)]
#[path = "names_tests.rs"]
mod names_tests;
