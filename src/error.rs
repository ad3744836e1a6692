//! Error types for the table generator.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while extracting instruction records from the database region.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Instruction region '{region}' not found (expected '// ${{{region}:Begin}}' and '// ${{{region}:End')")]
    RegionMissing { region: String },

    #[error("Instruction region '{region}' appears {count} times; expected exactly one")]
    RegionDuplicated { region: String, count: usize },

    #[error("No instruction invocations found in region '{region}'")]
    NoInvocations { region: String },

    #[error("Parsed {parsed} invocations but found {openings} '{macro_name}(' openings")]
    CountMismatch {
        macro_name: String,
        parsed: usize,
        openings: usize,
    },

    #[error("Malformed invocation at line {line}, column {column}: {reason}")]
    Malformed {
        line: usize,
        column: usize,
        reason: String,
    },

    #[error("Duplicate instruction name: {0}")]
    DuplicateName(String),
}

/// Errors raised while ordering tasks.
#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("Dependency '{dependency}' of task '{task}' doesn't exist")]
    UnknownDependency { task: String, dependency: String },

    #[error("Task registered twice: {0}")]
    DuplicateTask(String),

    #[error("Cyclic dependency between tasks: {}", .0.join(", "))]
    CyclicDependency(Vec<String>),
}

/// Errors raised while locating a marked region for injection.
#[derive(Debug, Error)]
pub enum RegionError {
    #[error("Region '{region}' not found in any loaded file")]
    NotFound { region: String },

    #[error("Region '{region}' found {count} times; expected exactly one")]
    Duplicated { region: String, count: usize },

    #[error("Region '{region}' in {path:?} has no end marker")]
    Unterminated { region: String, path: PathBuf },
}

/// Top-level generator error.
#[derive(Debug, Error)]
pub enum TableGenError {
    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Scheduling failed: {0}")]
    Scheduler(#[from] SchedulerError),

    #[error("Injection failed: {0}")]
    Region(#[from] RegionError),

    #[error("Record '{name}' has unresolved {field} after all tasks ran")]
    Incomplete { name: String, field: &'static str },

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("ISA description error: {0}")]
    Isa(String),

    #[error("Generated tables are out of date in: {}", display_paths(.0))]
    Stale(Vec<PathBuf>),
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<config::ConfigError> for TableGenError {
    fn from(err: config::ConfigError) -> Self {
        TableGenError::Config(err.to_string())
    }
}

impl TableGenError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        TableGenError::Io {
            path: path.into(),
            source,
        }
    }
}
