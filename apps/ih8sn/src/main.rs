//! # ih8sn
//!
//! Rewrites device identity properties from `/system/etc/ih8sn.conf`.
//!
//! ## Usage
//!
//! ```bash
//! # From init, once per boot stage
//! ih8sn init
//! ih8sn boot_completed
//!
//! # Dry run on a host against a `getprop` dump
//! ih8sn init --config ./ih8sn.conf --snapshot ./getprop.txt --print
//! ```

use clap::Parser;
use ih8sn::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    // IH8SN_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("IH8SN_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "ih8sn=info".into());

    // stdout is reserved for --print
    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    // Invalid or missing stage exits here, before any store access
    let cli = cli::Cli::parse();

    if let Err(e) = cli::execute(cli) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}
