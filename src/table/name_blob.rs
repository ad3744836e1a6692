//! Packed, NUL-terminated name storage addressed by byte offset.

use super::indexed::IndexedDataTable;

/// Names packed back to back, each followed by a NUL byte.
///
/// Identical names resolve to the same offset through the shared
/// [`IndexedDataTable`], so the empty sentinel name and any other empty name
/// share one zero-length span.
#[derive(Debug, Default)]
pub struct NameBlob {
    table: IndexedDataTable,
    offsets: Vec<usize>,
    size: usize,
}

impl NameBlob {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `name` and return its byte offset in the blob.
    pub fn add(&mut self, name: &str) -> usize {
        let idx = self.table.add_indexed(name);
        if idx == self.offsets.len() {
            self.offsets.push(self.size);
            self.size += name.len() + 1;
        }
        self.offsets[idx]
    }

    /// Total blob size in bytes, terminators included.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn unique_names(&self) -> usize {
        self.table.len()
    }

    /// Render the blob as adjacent C string literals, wrapped at `width` columns.
    ///
    /// Every entry but the last carries an explicit `\0`; the last relies on the
    /// literal's implicit terminator and closes the statement.
    pub fn format(&self, indent: &str, width: usize) -> String {
        let count = self.table.len();
        let mut out = String::new();
        let mut line = String::new();

        for (i, name) in self.table.iter().enumerate() {
            let item = if i + 1 == count {
                format!("\"{}\";", escape(name))
            } else {
                format!("\"{}\\0\"", escape(name))
            };

            if line.is_empty() {
                line = format!("{}{}", indent, item);
            } else if line.len() + 1 + item.len() <= width {
                line.push(' ');
                line.push_str(&item);
            } else {
                out.push_str(&line);
                out.push('\n');
                line = format!("{}{}", indent, item);
            }
        }

        out.push_str(&line);
        out
    }
}

fn escape(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            _ => out.push(c),
        }
    }
    out
}
