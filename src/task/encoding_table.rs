//! Per-encoding opcode tables.
//!
//! Records are grouped by encoding class. Each record with opcode data gets its
//! own slot in its class table (no deduplication), so `opcode_data_index` is
//! the record's position among the class members in extraction order. Records
//! without opcode data resolve to index 0 and never become table rows.

use super::Task;
use crate::context::GeneratorContext;
use crate::error::TableGenError;
use crate::record::NONE_SYMBOL;
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EncodingTable;

struct Row {
    name: String,
    data: String,
}

impl Task for EncodingTable {
    fn name(&self) -> &str {
        "EncodingTable"
    }

    fn run(&self, ctx: &mut GeneratorContext) -> Result<usize, TableGenError> {
        let mut classes: BTreeMap<String, Vec<Row>> = BTreeMap::new();

        for record in ctx.records_mut().iter_mut() {
            let rows = classes.entry(record.encoding_class.clone()).or_default();
            if record.has_no_opcode_data() {
                record.opcode_data_index = Some(0);
                continue;
            }
            record.opcode_data_index = Some(rows.len());
            rows.push(Row {
                name: record.name.clone(),
                data: brace_initializer(&record.opcode_data),
            });
        }

        let ids = render_ids(classes.keys());
        let (forward, definitions) = render_tables(&classes);
        debug!(classes = classes.len(), "Built encoding tables");

        Ok(ctx.inject("EncodingId", &ids, 0)?
            + ctx.inject("EncodingDataForward", &forward, 0)?
            + ctx.inject("EncodingData", &definitions, 0)?)
    }
}

/// `(1, 2)` becomes `{ 1, 2 }`.
fn brace_initializer(opcode_data: &str) -> String {
    opcode_data.replace('(', "{ ").replace(')', " }")
}

/// Table variable name: the class name with its first letter lowercased.
fn table_name(class: &str) -> String {
    let mut chars = class.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn render_ids<'a>(classes: impl Iterator<Item = &'a String>) -> String {
    let mut out = String::from("enum EncodingId : uint32_t {\n  kEncodingNone = 0");
    for class in classes.filter(|c| c.as_str() != NONE_SYMBOL) {
        out.push_str(",\n  kEncoding");
        out.push_str(class);
    }
    out.push_str("\n};\n");
    out
}

fn render_tables(classes: &BTreeMap<String, Vec<Row>>) -> (String, String) {
    let mut forward = String::new();
    let mut definitions = String::new();

    for (class, rows) in classes.iter().filter(|(_, rows)| !rows.is_empty()) {
        let name = table_name(class);
        let count = rows.len();

        forward.push_str(&format!("extern const {} {}[{}];\n", class, name, count));

        if !definitions.is_empty() {
            definitions.push('\n');
        }
        definitions.push_str(&format!("const {} {}[{}] = {{\n", class, name, count));
        for (i, row) in rows.iter().enumerate() {
            let separator = if i + 1 == count { " " } else { "," };
            definitions.push_str(&format!("  {}{} // {}\n", row.data, separator, row.name));
        }
        definitions.push_str("};\n");
    }

    (forward, definitions)
}
