mod analysis;
mod config;
mod ingest;
mod model;
mod stats;

use crate::analysis::Analyzer;
use crate::config::{Config, FileConfig};
use anyhow::{Context, Result};
use clap::Parser;
use std::{
    io::{self, BufWriter, Write},
    path::PathBuf,
};

/// Print every measurement of a time series together with the mean of all
/// measurements inside the time window centered on it.
///
/// Each input line holds a `YYYY-MM-DDThh:mm` timestamp and a number.
#[derive(Debug, Parser)]
#[command(version, about)]
struct CLI {
    /// Averaging window size [default: 240h]
    #[arg(short = 'd', long = "window", value_name = "WINDOW-SIZE")]
    window: Option<humantime::Duration>,

    /// TOML config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Input file; if not given, standard input will be read
    #[arg(value_name = "INPUT-FILE")]
    input_file: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::new()
        .format_timestamp_millis()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let args = match CLI::try_parse() {
        Ok(args) => args,
        Err(error) => {
            let code = if error.use_stderr() { 1 } else { 0 };
            error.print().ok();
            std::process::exit(code);
        }
    };

    if let Err(error) = run_cli(args) {
        log::error!("{error:#}");
        std::process::exit(1);
    }
}

fn run_cli(args: CLI) -> Result<()> {
    log::info!("{args:#?}");

    let file_cfg = match &args.config {
        Some(file) => FileConfig::from_file(file)?,
        None => FileConfig::default(),
    };
    let cfg = Config::new(args.window.map(Into::into), file_cfg, args.input_file)
        .context("failed to construct cfg")?;
    log::info!("{cfg:#?}");

    let reader = cfg.input.open()?;
    let msrs = ingest::read_measurements(reader)?;
    log::info!("read {} measurements", msrs.len());

    let mut writer = BufWriter::new(io::stdout().lock());
    Analyzer::new(cfg.window)
        .write_report(&msrs, &mut writer)
        .context("failed to write report")?;
    writer.flush().context("failed to flush writer stream")?;

    Ok(())
}
