mod platform;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use linklet_logging::linklet_error;
use log::LevelFilter;
use platform::config::AppConfig;
use platform::logging::LogDestination;

#[derive(Debug, Parser)]
#[command(name = "linklet", about = "Terminal client for a URL shortening service")]
struct Cli {
    /// RON configuration file (defaults to ./linklet.ron when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Where log output goes
    #[arg(long, value_enum, default_value_t = LogDestination::File)]
    log: LogDestination,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    platform::logging::initialize(cli.log, level);

    let config = AppConfig::load(cli.config.as_deref())
        .inspect_err(|err| linklet_error!("invalid configuration: {}", err))
        .context("loading configuration")?;
    platform::run_app(config)
}
