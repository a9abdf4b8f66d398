//! spv-header
//!
//! Regenerates `vector_multiply.hpp` from `vector_multiply.spv`. Run it from
//! the shader directory; it takes no arguments.

use anyhow::{Context, Result};
use spv_header::{TranscodeConfig, Transcoder};
use std::io::IsTerminal;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "spv_header=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal()),
        )
        .init();

    match run() {
        Ok(confirmation) => println!("{confirmation}"),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    }
}

fn run() -> Result<String> {
    let config = TranscodeConfig::default();
    let destination = config.destination_path.clone();

    let report = Transcoder::new(config)
        .run()
        .with_context(|| format!("Failed to generate {}", destination.display()))?;

    Ok(report.confirmation())
}
