// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Command-line and environment configuration of the webhook server.
//!
//! Every flag has an environment variable fallback so the operator can be
//! configured from its Deployment manifest alone.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::constants::{WEBHOOK_CERT_PATH, WEBHOOK_KEY_PATH, WEBHOOK_PORT};

/// Start-up settings of the ExternalDNS operator webhook server.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "external-dns-operator",
    version,
    about = "Admission and conversion webhooks for ExternalDNS resources"
)]
pub struct OperatorArgs {
    /// HTTPS port the webhooks listen on.
    #[arg(long, env = "WEBHOOK_PORT", default_value_t = WEBHOOK_PORT)]
    pub port: u16,

    /// PEM certificate served by the webhooks.
    #[arg(long, env = "WEBHOOK_CERT_PATH", default_value = WEBHOOK_CERT_PATH)]
    pub cert_path: PathBuf,

    /// PEM private key of the certificate.
    #[arg(long, env = "WEBHOOK_KEY_PATH", default_value = WEBHOOK_KEY_PATH)]
    pub key_path: PathBuf,

    /// The platform injects AWS, GCP and Azure credentials, so resources may omit them.
    #[arg(long, env = "PLATFORM_MANAGED_CREDENTIALS")]
    pub platform_managed_credentials: bool,

    /// Log output format.
    #[arg(long, env = "RUST_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Compact human-readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}
