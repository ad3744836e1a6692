//! Configuration System
//!
//! Layered generator configuration: built-in defaults, the user-level config
//! file, the workspace `tablegen.toml` and finally `TABLEGEN__*` environment
//! variables. Validation runs after loading.

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::global_file::global_config_path;
pub use sources::workspace_file::WORKSPACE_CONFIG_FILE;

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableGenConfig {
    /// Instruction database and generated files
    #[serde(default)]
    pub database: DatabaseConfig,

    /// ISA description used for enumeration comments
    #[serde(default)]
    pub isa: IsaConfig,

    /// Report settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// File holding the instruction-info region
    #[serde(default = "default_instruction_file")]
    pub instruction_file: PathBuf,

    /// Every file loaded into the generator context, relative to the base directory
    #[serde(default = "default_files")]
    pub files: Vec<PathBuf>,

    /// Name of the instruction-info region
    #[serde(default = "default_region")]
    pub region: String,

    /// Name of the invocation macro
    #[serde(default = "default_macro_name")]
    pub macro_name: String,
}

pub(crate) const DEFAULT_FILES: [&str; 5] = [
    "src/asmjit/arm/a64emitter.h",
    "src/asmjit/arm/a64globals.h",
    "src/asmjit/arm/a64instdb.cpp",
    "src/asmjit/arm/a64instdb.h",
    "src/asmjit/arm/a64instdb_p.h",
];

pub(crate) const DEFAULT_INSTRUCTION_FILE: &str = "src/asmjit/arm/a64instdb.cpp";

fn default_instruction_file() -> PathBuf {
    PathBuf::from(DEFAULT_INSTRUCTION_FILE)
}

fn default_files() -> Vec<PathBuf> {
    DEFAULT_FILES.iter().map(PathBuf::from).collect()
}

fn default_region() -> String {
    "InstInfo".to_string()
}

fn default_macro_name() -> String {
    "INST".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            instruction_file: default_instruction_file(),
            files: default_files(),
            region: default_region(),
            macro_name: default_macro_name(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IsaConfig {
    /// TOML ISA description; relative paths resolve against the base directory
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Only entries of this execution mode annotate the enumeration
    #[serde(default)]
    pub mode: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Report per-table size estimates after a run
    #[serde(default = "default_true")]
    pub dump_table_sizes: bool,
}

fn default_true() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dump_table_sizes: default_true(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Database: {0}")]
    Database(String),

    #[error("ISA: {0}")]
    Isa(String),
}

impl DatabaseConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.files.is_empty() {
            return Err("File list cannot be empty".to_string());
        }
        if !self.files.contains(&self.instruction_file) {
            return Err(format!(
                "Instruction file {} is not among the loaded files",
                self.instruction_file.display()
            ));
        }
        if self.region.trim().is_empty() {
            return Err("Region name cannot be empty".to_string());
        }
        if self.macro_name.trim().is_empty() {
            return Err("Macro name cannot be empty".to_string());
        }
        Ok(())
    }
}

impl IsaConfig {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(path) = &self.path {
            if path.as_os_str().is_empty() {
                return Err("Path cannot be empty".to_string());
            }
        }
        if self.mode.as_deref().is_some_and(|m| m.trim().is_empty()) {
            return Err("Mode cannot be blank".to_string());
        }
        Ok(())
    }
}

impl TableGenConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.database.validate() {
            errors.push(ValidationError::Database(e));
        }
        if let Err(e) = self.isa.validate() {
            errors.push(ValidationError::Isa(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
