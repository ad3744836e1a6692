//! CLI route: single route table and run context.

use crate::cli::parse::{Commands, OutputFormat};
use crate::config::{ConfigLoader, TableGenConfig};
use crate::error::TableGenError;
use crate::generator::{RunMode, TableGen};
use crate::report::{format_report_json, format_report_text, format_task_order};
use std::path::PathBuf;
use tracing::info;

/// Runtime context for CLI execution: base directory and loaded configuration.
pub struct RunContext {
    base_dir: PathBuf,
    config: TableGenConfig,
}

impl RunContext {
    /// Create run context from base directory and optional config path. Uses ConfigLoader only.
    pub fn new(base_dir: PathBuf, config_path: Option<PathBuf>) -> Result<Self, TableGenError> {
        let config = match config_path {
            Some(ref cfg_path) => ConfigLoader::load_from_file(cfg_path)?,
            None => ConfigLoader::load(&base_dir)?,
        };
        Self::with_config(base_dir, config)
    }

    /// Create run context from an already loaded configuration.
    pub fn with_config(base_dir: PathBuf, config: TableGenConfig) -> Result<Self, TableGenError> {
        config.validate().map_err(|errors| {
            TableGenError::Config(
                errors
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; "),
            )
        })?;
        Ok(Self { base_dir, config })
    }

    pub fn config(&self) -> &TableGenConfig {
        &self.config
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, TableGenError> {
        let generator = TableGen::new(&self.base_dir, self.config.clone());

        match command {
            Commands::Generate { dry_run, format } => {
                let mode = if *dry_run {
                    RunMode::DryRun
                } else {
                    RunMode::Write
                };
                let report = generator.run(mode)?;
                info!(
                    changed = report.total_changed(),
                    written = report.written_files.len(),
                    "Generation finished"
                );
                match format {
                    OutputFormat::Json => format_report_json(&report),
                    OutputFormat::Text => Ok(format_report_text(
                        &report,
                        self.config.output.dump_table_sizes,
                    )),
                }
            }
            Commands::Check => {
                let report = generator.run(RunMode::Check)?;
                Ok(format!("All generated regions are up to date ({} records)", report.records))
            }
            Commands::Tasks => Ok(format_task_order(&generator.task_order()?)),
        }
    }
}
