// src/main.rs

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use std::path::PathBuf;
use tracing::error;

mod core;
mod logging;

use crate::core::catalog::{load_catalog, resolve_catalog_path};
use crate::core::config::{Intensity, ScanConfig};
use crate::core::scanner::DorkScanner;

/// Converts known exposure dorks into direct HTTP probes against one host.
#[derive(Parser, Debug)]
#[command(name = "dorkprobe", version, about, long_about = None)]
struct Args {
    /// Target base URL (e.g. http://10.0.0.1:8080). A bare host:port is scanned over http.
    #[arg(long, env = "DORKPROBE_TARGET_URL")]
    target_url: String,

    /// Scan intensity: probe budget, worker count, timeout and categories.
    #[arg(long, value_enum, default_value_t = Intensity::Standard, env = "DORKPROBE_INTENSITY")]
    intensity: Intensity,

    /// Cookie string for authenticated scanning (e.g. "PHPSESSID=abc123; security=low").
    #[arg(long, env = "DORKPROBE_COOKIE")]
    cookie: Option<String>,

    /// Path to the dork catalog (GHDB XML, or JSON when the extension is .json).
    #[arg(long, default_value = "data/ghdb.xml", env = "DORKPROBE_CATALOG")]
    catalog: PathBuf,

    /// Comma-separated category allowlist overriding the intensity preset, or "all".
    #[arg(long, value_delimiter = ',', env = "DORKPROBE_CATEGORIES")]
    categories: Vec<String>,

    /// Mirror log output to stderr.
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    // A missing log file must not stop the scan.
    if let Err(e) = logging::initialize_logging(args.verbose) {
        eprintln!("WARNING: logging disabled: {e}");
    }

    let config = ScanConfig::new(&args.target_url, args.cookie.clone(), args.intensity)
        .with_categories(args.categories.clone());

    let entries = match resolve_catalog_path(&args.catalog).and_then(|path| load_catalog(&path)) {
        Ok(entries) => entries,
        Err(e) => {
            error!(error = %e, "Catalog load failed.");
            eprintln!("ERROR: {e}");
            std::process::exit(1);
        }
    };

    let scanner = DorkScanner::new(config).wrap_err("failed to prepare HTTP client")?;
    let report = scanner.run(&entries).await;
    println!("{report}");

    Ok(())
}
