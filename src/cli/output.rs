//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::{RegionError, TableGenError};

/// Map domain errors to a string for CLI output, with a hint where one helps.
pub fn map_error(e: &TableGenError) -> String {
    match e {
        TableGenError::Stale(_) => format!("{}\nRun `tablegen generate` to update them.", e),
        TableGenError::Region(RegionError::NotFound { region }) => format!(
            "{}\nAdd '// ${{{}:Begin}}' and '// ${{{}:End}}' markers to one of the configured files.",
            e, region, region
        ),
        _ => e.to_string(),
    }
}
