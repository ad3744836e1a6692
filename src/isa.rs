//! Instruction-set description used to annotate the id enumeration.
//!
//! The description is advisory: it only feeds human-readable comments. A name
//! with no matching entry produces an empty comment, never an error.
//!
//! The bundled [`IsaCatalog`] reads a TOML document:
//!
//! ```toml
//! [[instruction]]
//! name = "adc"
//! arch = "A64"
//! encoding = "A64"
//! extensions = ["BASE"]
//! ```

use crate::error::TableGenError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;

/// One encoding of an instruction as known to the ISA description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IsaEntry {
    pub name: String,
    /// Execution mode the entry belongs to (e.g. `A64`, `A32`).
    #[serde(default)]
    pub arch: String,
    /// Encoding family (`T16`, `T32`, `A32`, `A64`).
    #[serde(default)]
    pub encoding: String,
    #[serde(default)]
    pub extensions: Vec<String>,
}

/// Read-only lookup of ISA entries by instruction name.
pub trait IsaDescription {
    fn query(&self, name: &str) -> Vec<&IsaEntry>;
}

#[derive(Debug, Default, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    instruction: Vec<IsaEntry>,
}

/// In-memory ISA description.
#[derive(Debug, Default)]
pub struct IsaCatalog {
    entries: Vec<IsaEntry>,
    by_name: HashMap<String, Vec<usize>>,
}

impl IsaCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<IsaEntry>) -> Self {
        let mut by_name: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, entry) in entries.iter().enumerate() {
            by_name.entry(entry.name.to_lowercase()).or_default().push(i);
        }
        Self { entries, by_name }
    }

    pub fn from_toml_str(text: &str) -> Result<Self, TableGenError> {
        let file: CatalogFile =
            toml::from_str(text).map_err(|e| TableGenError::Isa(e.to_string()))?;
        Ok(Self::from_entries(file.instruction))
    }

    pub fn load(path: &Path) -> Result<Self, TableGenError> {
        let text = std::fs::read_to_string(path).map_err(|e| TableGenError::io(path, e))?;
        let file: CatalogFile = toml::from_str(&text)
            .map_err(|e| TableGenError::Isa(format!("{}: {}", path.display(), e)))?;
        Ok(Self::from_entries(file.instruction))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IsaDescription for IsaCatalog {
    fn query(&self, name: &str) -> Vec<&IsaEntry> {
        self.by_name
            .get(&name.to_lowercase())
            .map(|ids| ids.iter().map(|&i| &self.entries[i]).collect())
            .unwrap_or_default()
    }
}

/// Entries matching `name`, restricted to `mode` when given.
pub fn query_mode<'a>(
    isa: &'a dyn IsaDescription,
    name: &str,
    mode: Option<&str>,
) -> Vec<&'a IsaEntry> {
    let entries = isa.query(name);
    match mode {
        Some(mode) => entries.into_iter().filter(|e| e.arch == mode).collect(),
        None => entries,
    }
}

/// Architecture coverage summary such as `[Txx A32 A64]` or `[--- --- A64]`.
pub fn arch_of(entries: &[&IsaEntry]) -> String {
    let has = |encoding: &str| entries.iter().any(|e| e.encoding == encoding);
    let (t16, t32) = (has("T16"), has("T32"));

    let thumb = match (t16, t32) {
        (true, false) => "T16",
        (false, true) => "T32",
        (true, true) => "Txx",
        (false, false) => "---",
    };
    let a32 = if has("A32") { "A32" } else { "---" };
    let a64 = if has("A64") { "A64" } else { "---" };

    format!("[{} {} {}]", thumb, a32, a64)
}

/// Sorted, distinct extension tags referenced by `entries`.
pub fn features_of(entries: &[&IsaEntry]) -> Vec<String> {
    entries
        .iter()
        .flat_map(|e| e.extensions.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Enumerator comment for `entries`; empty when nothing matched.
pub fn comment_of(entries: &[&IsaEntry]) -> String {
    if entries.is_empty() {
        return String::new();
    }
    let mut text = arch_of(entries);
    let features = features_of(entries);
    if !features.is_empty() {
        text.push_str(" {");
        text.push_str(&features.join("|"));
        text.push('}');
    }
    text
}
