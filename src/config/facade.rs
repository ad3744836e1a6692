//! Configuration loading entry points.

use super::merge::merge_policy::builder_with_defaults;
use super::sources::{global_file, workspace_file};
use super::TableGenConfig;
use config::{ConfigError, Environment, File};
use std::path::Path;

/// Environment variables `TABLEGEN__SECTION__KEY` override file values.
const ENV_PREFIX: &str = "TABLEGEN";
const ENV_SEPARATOR: &str = "__";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for `base_dir`: defaults, global file, workspace file,
    /// then environment.
    pub fn load(base_dir: &Path) -> Result<TableGenConfig, ConfigError> {
        let builder = builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, base_dir)?;

        builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Load exactly one file over the defaults.
    pub fn load_from_file(path: &Path) -> Result<TableGenConfig, ConfigError> {
        builder_with_defaults()?
            .add_source(File::from(path).required(true))
            .build()?
            .try_deserialize()
    }
}
