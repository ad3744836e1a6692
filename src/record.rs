//! Record Model
//!
//! In-memory, ordered collection of instruction records with a lookup by name.
//! Records are created once per run by the extractor and later mutated in place
//! by tasks that resolve table indices.

use crate::error::ExtractionError;
use serde::Serialize;
use std::collections::HashMap;
use tracing::warn;

/// Enum symbol of the sentinel record.
pub const NONE_SYMBOL: &str = "None";

/// Opcode-data literal meaning "no opcode payload".
pub const NO_OPCODE_DATA: &str = "(_)";

/// Suffix marking a variant spelling of an instruction that displays without it.
const VARIANT_SUFFIX: &str = "_v";

/// Index tokens exactly as they appeared in the previous generated output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PreviousIndices {
    pub opcode_data_index: String,
    pub name_index: String,
}

/// One row of the instruction database.
#[derive(Debug, Clone, Serialize)]
pub struct InstructionRecord {
    /// Numeric identity; the sentinel is always 0.
    pub id: usize,
    /// Lowercase lookup key; empty for the sentinel.
    pub name: String,
    /// Name shown to humans (variant suffix stripped).
    pub display_name: String,
    /// Symbol used in the generated enumeration (without `kId`).
    pub enum_symbol: String,
    pub encoding_class: String,
    pub opcode_data: String,
    pub rw_info: String,
    pub flags: String,
    /// Index into the per-encoding opcode table; `None` until resolved.
    pub opcode_data_index: Option<usize>,
    /// Offset into the packed name blob; `None` until resolved.
    pub name_index: Option<usize>,
    pub previous: PreviousIndices,
}

impl InstructionRecord {
    pub fn new(
        enum_symbol: impl Into<String>,
        encoding_class: impl Into<String>,
        opcode_data: impl Into<String>,
        rw_info: impl Into<String>,
        flags: impl Into<String>,
    ) -> Self {
        let enum_symbol = enum_symbol.into();
        let name = if enum_symbol == NONE_SYMBOL {
            String::new()
        } else {
            enum_symbol.to_lowercase()
        };
        let display_name = name
            .strip_suffix(VARIANT_SUFFIX)
            .map(str::to_string)
            .unwrap_or_else(|| name.clone());

        Self {
            id: 0,
            name,
            display_name,
            enum_symbol,
            encoding_class: encoding_class.into(),
            opcode_data: opcode_data.into(),
            rw_info: rw_info.into(),
            flags: flags.into(),
            opcode_data_index: None,
            name_index: None,
            previous: PreviousIndices::default(),
        }
    }

    /// Synthesised "no instruction" record.
    pub fn sentinel() -> Self {
        let mut record = Self::new(NONE_SYMBOL, NONE_SYMBOL, NO_OPCODE_DATA, "0", "0");
        record.previous = PreviousIndices {
            opcode_data_index: "0".to_string(),
            name_index: "0".to_string(),
        };
        record
    }

    pub fn is_sentinel(&self) -> bool {
        self.name.is_empty()
    }

    /// True when the record carries no opcode payload and never enters a table.
    pub fn has_no_opcode_data(&self) -> bool {
        self.opcode_data == NO_OPCODE_DATA
    }
}

/// Ordered record collection. The sentinel always sits at index 0 once finalized.
#[derive(Debug, Default)]
pub struct RecordSet {
    records: Vec<InstructionRecord>,
    by_name: HashMap<String, usize>,
}

impl RecordSet {
    /// Build the set from extracted records: place the sentinel first, reject
    /// duplicate names and assign ids in order.
    pub fn from_extracted(mut records: Vec<InstructionRecord>) -> Result<Self, ExtractionError> {
        match records.iter().position(InstructionRecord::is_sentinel) {
            Some(0) => {}
            Some(pos) => {
                warn!(position = pos, "Sentinel record is not first; moving it to id 0");
                let sentinel = records.remove(pos);
                records.insert(0, sentinel);
            }
            None => {
                warn!("Database has no sentinel record; synthesising INST(None, ...)");
                records.insert(0, InstructionRecord::sentinel());
            }
        }

        let mut by_name = HashMap::with_capacity(records.len());
        for (id, record) in records.iter_mut().enumerate() {
            record.id = id;
            if by_name.insert(record.name.clone(), id).is_some() {
                return Err(ExtractionError::DuplicateName(if record.name.is_empty() {
                    NONE_SYMBOL.to_string()
                } else {
                    record.name.clone()
                }));
            }
        }

        Ok(Self { records, by_name })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: usize) -> Option<&InstructionRecord> {
        self.records.get(id)
    }

    pub fn get_by_name(&self, name: &str) -> Option<&InstructionRecord> {
        self.by_name.get(name).and_then(|&id| self.records.get(id))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, InstructionRecord> {
        self.records.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, InstructionRecord> {
        self.records.iter_mut()
    }

    pub fn as_slice(&self) -> &[InstructionRecord] {
        &self.records
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a InstructionRecord;
    type IntoIter = std::slice::Iter<'a, InstructionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
