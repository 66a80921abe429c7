// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! CRD YAML Generator
//!
//! Generates the `ExternalDNS` CRD YAML from the Rust types in src/crd/.
//! Both served versions are merged into one definition with `v1beta1` as the
//! storage version and conversion delegated to the operator webhook.
//!
//! Usage:
//!   cargo run --bin crdgen
//!
//! The generated file is written to deploy/crds/ with proper headers.

use external_dns_operator::constants::{
    API_GROUP_VERSION_V1ALPHA1, API_GROUP_VERSION_V1BETA1, API_VERSION_V1ALPHA1,
    API_VERSION_V1BETA1, CONVERT_PATH,
};
use external_dns_operator::crd::{v1alpha1, v1beta1};
use kube::core::crd::merge_crds;
use kube::CustomResourceExt;
use serde_json::{json, Value};
use std::fs;
use std::path::Path;

const COPYRIGHT_HEADER: &str = "# Copyright (c) 2025 Erick Bourgeois, firestoned
# SPDX-License-Identifier: MIT
#
# This file is AUTO-GENERATED from src/crd/
# DO NOT EDIT MANUALLY - Run `cargo run --bin crdgen` to regenerate
#
";

const OUTPUT_FILE: &str = "externaldnses.crd.yaml";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = Path::new("deploy/crds");

    // Ensure output directory exists
    fs::create_dir_all(output_dir)?;

    println!("Generating CRD YAML files from src/crd/...");

    let crd = merge_crds(
        vec![v1alpha1::ExternalDNS::crd(), v1beta1::ExternalDNS::crd()],
        API_VERSION_V1BETA1,
    )?;

    // Convert CRD to JSON for manipulation
    let mut crd_json: Value = serde_json::to_value(&crd)?;

    if let Some(versions) = crd_json["spec"]["versions"].as_array_mut() {
        for version in versions.iter_mut() {
            if version["name"] == API_VERSION_V1ALPHA1 {
                version["deprecated"] = Value::Bool(true);
                version["deprecationWarning"] = Value::String(format!(
                    "{API_GROUP_VERSION_V1ALPHA1} is deprecated. Use {API_GROUP_VERSION_V1BETA1} instead."
                ));
            }
        }
    }

    // The CA bundle and service namespace are injected at deploy time
    crd_json["spec"]["conversion"] = json!({
        "strategy": "Webhook",
        "webhook": {
            "conversionReviewVersions": ["v1"],
            "clientConfig": {
                "service": {
                    "name": "external-dns-operator-webhook",
                    "path": CONVERT_PATH
                }
            }
        }
    });

    // Convert back to YAML
    let yaml = serde_yaml::to_string(&crd_json)?;

    // Add copyright header
    let content = format!("{COPYRIGHT_HEADER}{yaml}");

    let output_path = output_dir.join(OUTPUT_FILE);
    fs::write(&output_path, content)?;

    println!("  ✓ Generated {OUTPUT_FILE}");
    println!("\nNext steps:");
    println!("  1. Review the generated file");
    println!("  2. Deploy with: kubectl apply -f deploy/crds/");

    Ok(())
}
