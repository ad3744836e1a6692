//! Merge rules: defaults, override order, conflict handling.

use crate::config::{DEFAULT_FILES, DEFAULT_INSTRUCTION_FILE};
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
///
/// Later sources replace earlier values key by key; list values such as
/// `database.files` are replaced wholesale, never concatenated.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("database.instruction_file", DEFAULT_INSTRUCTION_FILE)?
        .set_default(
            "database.files",
            DEFAULT_FILES.iter().map(|f| f.to_string()).collect::<Vec<_>>(),
        )?
        .set_default("database.region", "InstInfo")?
        .set_default("database.macro_name", "INST")?
        .set_default("output.dump_table_sizes", true)
}
