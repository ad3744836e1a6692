//! Run report rendering: human-readable text (comfy-table) or JSON.

use crate::context::TableSize;
use crate::error::TableGenError;
use crate::generator::RunReport;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::{CellAlignment, Table};
use owo_colors::OwoColorize;

/// Format a section heading with bold/underline.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

/// `Size of <region>` rows plus the `Size of all tables` total.
pub fn format_table_sizes(sizes: &[TableSize]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Table", "Bytes"]);
    for size in sizes {
        table.add_row(vec![format!("Size of {}", size.region), size.bytes.to_string()]);
    }
    let total: usize = sizes.iter().map(|s| s.bytes).sum();
    table.add_row(vec!["Size of all tables".to_string(), total.to_string()]);
    if let Some(column) = table.column_mut(1) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    table.to_string()
}

/// Human-readable run summary.
pub fn format_report_text(report: &RunReport, dump_table_sizes: bool) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Tasks")));

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Task", "Changed"]);
    for task in &report.tasks {
        table.add_row(vec![task.name.clone(), task.changed.to_string()]);
    }
    table.add_row(vec![format!("{} (merge)", report.region), report.merged.to_string()]);
    out.push_str(&format!("{}\n\n", table));

    out.push_str(&format!(
        "  Records: {}\n  Moved indices: {}\n",
        report.records, report.moved
    ));

    if report.modified_files.is_empty() {
        out.push_str(&format!("  {}\n", "Up to date".green()));
    } else {
        let verb = if report.written_files.is_empty() {
            "Would update"
        } else {
            "Updated"
        };
        for path in &report.modified_files {
            out.push_str(&format!("  {} {}\n", verb.yellow(), path.display()));
        }
    }

    if dump_table_sizes && !report.table_sizes.is_empty() {
        out.push('\n');
        out.push_str(&format!("{}\n\n", format_section_heading("Table sizes")));
        out.push_str(&format_table_sizes(&report.table_sizes));
        out.push('\n');
    }

    out
}

pub fn format_report_json(report: &RunReport) -> Result<String, TableGenError> {
    serde_json::to_string_pretty(report)
        .map_err(|e| TableGenError::Config(format!("Failed to serialize report: {}", e)))
}

/// One task name per line, in execution order.
pub fn format_task_order(order: &[&str]) -> String {
    order
        .iter()
        .enumerate()
        .map(|(i, name)| format!("{}. {}", i + 1, name))
        .collect::<Vec<_>>()
        .join("\n")
}
