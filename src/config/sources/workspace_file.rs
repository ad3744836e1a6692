//! Workspace config file source: `<base_dir>/tablegen.toml`

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use std::path::Path;

pub const WORKSPACE_CONFIG_FILE: &str = "tablegen.toml";

/// Add the workspace config file to builder when present.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    base_dir: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let config_path = base_dir.join(WORKSPACE_CONFIG_FILE);
    if config_path.exists() {
        return Ok(builder.add_source(File::from(config_path).required(false)));
    }
    Ok(builder)
}
