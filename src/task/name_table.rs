//! Packed instruction name table and its per-letter lookup index.

use super::Task;
use crate::context::GeneratorContext;
use crate::error::TableGenError;
use crate::record::InstructionRecord;
use crate::table::NameBlob;
use tracing::debug;

const LINE_WIDTH: usize = 120;
const LETTERS: usize = 26;
const ID_COLUMN: usize = 22;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NameTable;

impl Task for NameTable {
    fn name(&self) -> &str {
        "NameTable"
    }

    fn run(&self, ctx: &mut GeneratorContext) -> Result<usize, TableGenError> {
        let mut blob = NameBlob::new();
        let mut max_name_size = 0;

        for record in ctx.records_mut().iter_mut() {
            record.name_index = Some(blob.add(&record.display_name));
            max_name_size = max_name_size.max(record.display_name.len());
        }
        debug!(
            bytes = blob.size(),
            unique = blob.unique_names(),
            "Packed instruction names"
        );

        let mut data = String::from("const char InstDB::_nameData[] =\n");
        data.push_str(&blob.format("  ", LINE_WIDTH));
        data.push_str("\n\n");
        data.push_str(&render_letter_index(ctx.records().as_slice()));

        let limits = format!("enum : uint32_t {{ kMaxNameSize = {} }};\n", max_name_size);

        let cost = blob.size() + LETTERS * 4;
        Ok(ctx.inject("NameData", &data, cost)? + ctx.inject("NameLimits", &limits, 0)?)
    }
}

/// First and last instruction id per initial letter `a`..`z`.
fn render_letter_index(records: &[InstructionRecord]) -> String {
    let mut ranges: [Option<(&str, &str)>; LETTERS] = [None; LETTERS];

    for record in records.iter().filter(|r| !r.is_sentinel()) {
        let Some(letter) = record.display_name.bytes().next() else {
            continue;
        };
        if !letter.is_ascii_lowercase() {
            continue;
        }
        let slot = &mut ranges[usize::from(letter - b'a')];
        *slot = match *slot {
            Some((first, _)) => Some((first, record.enum_symbol.as_str())),
            None => Some((record.enum_symbol.as_str(), record.enum_symbol.as_str())),
        };
    }

    let mut out = String::from("const InstDB::InstNameIndex InstDB::instNameIndex[26] = {\n");
    for (i, range) in ranges.iter().enumerate() {
        let (first, last) = match range {
            Some((first, last)) => (format!("Inst::kId{}", first), format!("Inst::kId{}", last)),
            None => ("Inst::kIdNone".to_string(), "Inst::kIdNone".to_string()),
        };
        out.push_str(&format!(
            "  {{ {:<w$}, {:<w$} + 1 }}{}\n",
            first,
            last,
            if i + 1 == LETTERS { "" } else { "," },
            w = ID_COLUMN
        ));
    }
    out.push_str("};\n");
    out
}
