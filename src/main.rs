//! strain: a terminal dashboard for CPU utilisation, frequency,
//! temperature, fan speed and power draw.
//!
//! Run with:  `RUST_LOG=debug strain --log-file strain.log`

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use strain_config::StrainConfig;
use strain_terminal::Options;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "strain", version, about = "Live bar graphs of CPU sensors in the terminal")]
struct Args {
    /// Config file (default: $XDG_CONFIG_HOME/strain/strain.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Sampling interval in milliseconds
    #[arg(long, value_name = "MS")]
    refresh_ms: Option<u64>,

    /// Draw partial cells with eighth-block glyphs
    #[arg(long)]
    smooth: bool,

    /// Print one reading of every sensor as JSON and exit
    #[arg(long)]
    json: bool,

    /// Append readings to this CSV file on every refresh
    #[arg(long, value_name = "FILE")]
    csv: Option<PathBuf>,

    /// Write logs here; the dashboard owns the terminal otherwise
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    tracing::info!("strain v{} starting", env!("CARGO_PKG_VERSION"));

    let config_path = args.config.clone().unwrap_or_else(strain_config::default_path);
    let config = strain_config::load(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;
    let config = apply_overrides(config, &args);

    if args.json {
        let readings = strain_terminal::dump_json(&config).await?;
        println!("{}", serde_json::to_string_pretty(&readings)?);
        return Ok(());
    }

    let options = Options { config_path, csv: args.csv };
    strain_terminal::run(config, options).await?;
    Ok(())
}

/// RUST_LOG controls verbosity (default: info).  The dashboard draws on
/// stdout, so without `--log-file` interactive logs are discarded.
fn init_logging(args: &Args) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match &args.log_file {
        Some(path) => {
            let file = File::options()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None if args.json => builder.with_writer(std::io::stderr).init(),
        None => builder.with_writer(std::io::sink).init(),
    }
    Ok(())
}

/// Command-line values win over the config file.
fn apply_overrides(mut config: StrainConfig, args: &Args) -> StrainConfig {
    if let Some(ms) = args.refresh_ms {
        config.global.refresh_ms = ms;
    }
    if args.smooth {
        config.global.smooth = true;
    }
    strain_config::sanitize(config)
}
