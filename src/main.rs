// src/main.rs

use clap::Parser;
use color_eyre::eyre::Result;
use footprint_rs_scanner::core::models::ScanRequest;
use footprint_rs_scanner::core::orchestrator::{ProviderSet, ScanConfig, ScanOrchestrator};
use footprint_rs_scanner::logging;
use std::time::Duration;

/// Scan the digital footprint of a subject and print the risk report as JSON.
///
/// At least one of --email, --domain, or --ip must be given. The report is
/// written to stdout; logs go to the data-dir log file (and stderr with -v).
#[derive(Parser, Debug)]
#[command(name = "footprint", version, about)]
struct Cli {
    /// Email address of the subject.
    #[arg(long)]
    email: Option<String>,

    /// Domain of the subject.
    #[arg(long)]
    domain: Option<String>,

    /// IPv4 address to geolocate. Without it the scanner's own public
    /// address is discovered and used.
    #[arg(long)]
    ip: Option<String>,

    /// Apply one uniform deadline (in seconds) to every provider lookup.
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Pretty-print the JSON report.
    #[arg(long)]
    pretty: bool,

    /// Also log to stderr.
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    logging::initialize_logging(cli.verbose)?;

    let request = ScanRequest {
        email: cli.email,
        domain: cli.domain,
        ip: cli.ip,
    };

    let mut config = ScanConfig::default();
    if let Some(secs) = cli.timeout_secs {
        config = config.with_uniform_timeout(Duration::from_secs(secs));
    }

    let orchestrator = ScanOrchestrator::new(ProviderSet::with_defaults()).with_config(config);
    let envelope = orchestrator.scan_envelope(&request).await;

    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&envelope)?
    } else {
        serde_json::to_string(&envelope)?
    };
    println!("{rendered}");

    if !envelope.is_success() {
        std::process::exit(1);
    }
    Ok(())
}
