use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use hostwatch::check::HealthCheck;
use hostwatch::config::{Config, read_config_file};
use tracing::{info, level_filters::LevelFilter, trace};
use tracing_subscriber::{filter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Parser)]
struct Args {
    /// Config file (JSON); environment variables are used when omitted
    #[arg(short, long)]
    file: Option<String>,

    /// Env file loaded before reading the configuration
    #[arg(long, default_value = "config/alert_config")]
    env_file: PathBuf,

    /// Log file receiving the cycle's records
    #[arg(long, default_value = "logs/health_monitor.log")]
    log_file: PathBuf,
}

fn init(log_file: &Path) -> anyhow::Result<()> {
    if let Some(parent) = log_file.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().append(true).create(true).open(log_file)?;

    let filter = filter::Targets::new().with_targets(vec![
        ("hostwatch", LevelFilter::TRACE),
        ("hostwatch_check", LevelFilter::TRACE),
    ]);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Arc::new(file))
                .compact()
                .with_ansi(false),
        )
        .with(filter)
        .init();

    info!("logging initialised");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    dotenv::from_path(&args.env_file).ok();
    dotenv::dotenv().ok();
    init(&args.log_file)?;
    trace!("started with args: {args:?}");

    let config = match &args.file {
        Some(path) => read_config_file(path)?,
        None => Config::from_env(),
    };

    let mut check = HealthCheck::new(config);

    // the health verdict is the real signal; surface it as the exit code
    match check.run().await {
        Ok(result) if result.healthy => Ok(()),
        Ok(_) => std::process::exit(1),
        Err(_) => std::process::exit(2),
    }
}
