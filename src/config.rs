use anyhow::{Context, Result};
use chrono::TimeDelta;
use serde::Deserialize;
use std::{
    fs::{self, File},
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
    time::Duration,
};

/// Averaging window size used when neither the command line nor the
/// config file sets one.
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(240 * 60 * 60);

/// Source of the measurement lines.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Stdin,
    File(PathBuf),
}

impl Input {
    pub fn open(&self) -> Result<Box<dyn BufRead>> {
        match self {
            Input::Stdin => Ok(Box::new(io::stdin().lock())),
            Input::File(file) => {
                let file = File::open(file)
                    .with_context(|| format!("Could not open file '{}'", file.display()))?;
                Ok(Box::new(BufReader::new(file)))
            }
        }
    }
}

/// Settings read from an optional TOML config file.
///
/// ```toml
/// window = "240h"
/// ```
#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Averaging window size as a duration literal.
    pub window: Option<String>,
}

impl FileConfig {
    /// Load a [`FileConfig`] from a TOML file.
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = file.as_ref();
        let contents =
            fs::read_to_string(file).with_context(|| format!("failed to read {file:?}"))?;
        Self::from_toml(&contents).with_context(|| format!("failed to load config {file:?}"))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to deserialize config")
    }
}

/// Run configuration, resolved once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Total width of the averaging window.
    pub window: TimeDelta,
    pub input: Input,
}

impl Config {
    /// Resolve the configuration.
    ///
    /// The window size is taken from `window` if given, then from the config
    /// file, then [`DEFAULT_WINDOW`]. Without an input file, standard input
    /// is read.
    ///
    /// # Errors
    /// Returns an error if the config file holds an invalid duration literal
    /// or if the window size does not fit a [`TimeDelta`].
    pub fn new(
        window: Option<Duration>,
        file_cfg: FileConfig,
        input_file: Option<PathBuf>,
    ) -> Result<Self> {
        let window = match (window, file_cfg.window) {
            (Some(window), _) => window,
            (None, Some(literal)) => humantime::parse_duration(&literal)
                .with_context(|| format!("invalid window size {literal:?} in config"))?,
            (None, None) => DEFAULT_WINDOW,
        };
        let window = TimeDelta::from_std(window).with_context(|| {
            format!(
                "window size {} is out of range",
                humantime::format_duration(window)
            )
        })?;

        let input = match input_file {
            Some(file) => Input::File(file),
            None => Input::Stdin,
        };

        Ok(Self { window, input })
    }
}
