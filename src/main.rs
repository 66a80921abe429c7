// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

use anyhow::{Context, Result};
use clap::Parser;
use external_dns_operator::{
    config::{LogFormat, OperatorArgs},
    validation::ExternalDnsValidator,
    webhook::run_webhook_server,
};
use tracing::{debug, error, info};

fn main() -> Result<()> {
    let args = OperatorArgs::parse();

    // Build Tokio runtime with custom thread names
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .thread_name("external-dns-webhook")
        .enable_all()
        .build()?;

    runtime.block_on(async_main(args))
}

fn initialize_logging(format: LogFormat) {
    // Respects RUST_LOG environment variable if set, otherwise defaults to INFO level
    // Example: RUST_LOG=debug cargo run
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    match format {
        LogFormat::Json => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_file(true)
                .with_line_number(true)
                .with_thread_names(true)
                .with_target(false)
                .json()
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_file(true)
                .with_line_number(true)
                .with_thread_names(true)
                .with_target(false)
                .with_ansi(true)
                .compact()
                .init();
        }
    }
}

async fn async_main(args: OperatorArgs) -> Result<()> {
    initialize_logging(args.log_format);

    info!("Starting ExternalDNS operator webhooks");
    debug!(?args, "Parsed configuration");

    // axum-server needs a process-wide rustls provider; an earlier install is fine
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        debug!("rustls crypto provider already installed");
    }

    let validator = ExternalDnsValidator::new(args.platform_managed_credentials);

    tokio::select! {
        result = run_webhook_server(validator, args.port, &args.cert_path, &args.key_path) => {
            if let Err(e) = &result {
                error!("CRITICAL: webhook server exited: {e}");
            }
            result.context("webhook server failed")?;
            anyhow::bail!("webhook server exited unexpectedly without error")
        }
        signal = tokio::signal::ctrl_c() => {
            signal.context("failed to listen for shutdown signal")?;
            info!("Shutdown signal received, stopping webhooks");
            Ok(())
        }
    }
}
