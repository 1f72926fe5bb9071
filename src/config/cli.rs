use crate::core::{ConfigProvider, InputSource};
use crate::utils::error::{Result, StatsError};
use clap::Parser;
use std::path::{Path, PathBuf};

pub const DEFAULT_PROGRAM_NAME: &str = "stats-recorder";

#[derive(Debug, Clone, Parser)]
#[command(name = "stats-recorder")]
#[command(about = "Compute the mean and median of a list of integers and store them")]
pub struct CliConfig {
    /// Comma-separated integers, e.g. 1,2,3
    #[arg(long, value_name = "NUMBERS", allow_hyphen_values = true, conflicts_with = "file")]
    pub input: Option<String>,

    /// File whose first line holds the comma-separated integers
    #[arg(long, value_name = "FILE_PATH")]
    pub file: Option<PathBuf>,

    /// TOML file with a [database] section
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn input_source(&self) -> Result<InputSource> {
        match (&self.input, &self.file) {
            (Some(text), _) => Ok(InputSource::Inline(text.clone())),
            (None, Some(path)) => Ok(InputSource::File(path.clone())),
            (None, None) => Err(StatsError::MissingInput),
        }
    }
}

pub fn usage(program: &str) -> String {
    format!("Usage: {} --input <numbers> --file <file-path>", program)
}

/// File name of `argv[0]`, or the package name when unavailable.
pub fn program_name(argv0: Option<&str>) -> String {
    argv0
        .and_then(|arg| Path::new(arg).file_name())
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_PROGRAM_NAME)
        .to_string()
}
