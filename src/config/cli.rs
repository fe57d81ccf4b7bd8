use std::path::PathBuf;

use clap::Parser;

use super::{RunConfig, TomlConfig};
use crate::domain::model::{ParseErrorPolicy, RowNumbering};
use crate::utils::error::Result;
use crate::utils::logger::LogFormat;
use crate::utils::validation::Validate;

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "csv-normalizer")]
#[command(about = "Validate and normalize a CSV export read from stdin")]
pub struct CliConfig {
    /// Read the CSV from this file instead of stdin
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Write the normalized CSV to this file instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Path to an optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// What to do with rows whose timestamp or duration cannot be parsed
    #[arg(long, value_enum)]
    pub on_parse_error: Option<ParseErrorPolicy>,

    /// How row numbers in drop warnings are counted
    #[arg(long, value_enum)]
    pub row_numbering: Option<RowNumbering>,

    /// Hours added to every timestamp
    #[arg(long, allow_negative_numbers = true)]
    pub shift_hours: Option<i64>,

    /// Log output format
    #[arg(long, value_enum)]
    pub log_format: Option<LogFormat>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU and memory usage after each phase")]
    pub monitor: bool,
}

impl CliConfig {
    /// Loads the config file when given, then applies command line overrides.
    pub fn resolve(&self) -> Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::debug!("Loading configuration from {}", path.display());
                let file = TomlConfig::from_file(path)?;
                file.validate()?;
                RunConfig::from_toml(&file)
            }
            None => RunConfig::default(),
        };

        // 命令列參數優先於設定檔
        if let Some(input) = &self.input {
            config.input = Some(input.clone());
        }
        if let Some(output) = &self.output {
            config.output = Some(output.clone());
        }
        if let Some(policy) = self.on_parse_error {
            config.on_parse_error = policy;
        }
        if let Some(numbering) = self.row_numbering {
            config.row_numbering = numbering;
        }
        if let Some(shift) = self.shift_hours {
            config.shift_hours = shift;
        }
        if let Some(format) = self.log_format {
            config.log_format = format;
        }
        config.monitor |= self.monitor;

        config.validate()?;
        Ok(config)
    }
}
