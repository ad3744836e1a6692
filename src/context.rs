//! Generator context: the state shared by every task in a run.
//!
//! Owns the loaded source files, the record model and the ISA description,
//! and exposes the injection operation that writes generated blocks back into
//! marked regions. Nothing touches the disk until [`GeneratorContext::save`].

use crate::error::{RegionError, TableGenError};
use crate::isa::{IsaCatalog, IsaDescription};
use crate::record::RecordSet;
use crate::region::{self, Located};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A loaded source file and its pending content.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    original: String,
    content: String,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>, content: String) -> Self {
        Self {
            path: path.into(),
            original: content.clone(),
            content,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_modified(&self) -> bool {
        self.content != self.original
    }
}

/// Estimated size of one generated table, keyed by region name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableSize {
    pub region: String,
    pub bytes: usize,
}

pub struct GeneratorContext {
    base_dir: PathBuf,
    files: Vec<SourceFile>,
    records: RecordSet,
    isa: Box<dyn IsaDescription>,
    mode: Option<String>,
    table_sizes: Vec<TableSize>,
}

impl GeneratorContext {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            files: Vec::new(),
            records: RecordSet::default(),
            isa: Box::new(IsaCatalog::empty()),
            mode: None,
            table_sizes: Vec::new(),
        }
    }

    pub fn with_isa(mut self, isa: Box<dyn IsaDescription>, mode: Option<String>) -> Self {
        self.isa = isa;
        self.mode = mode;
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Read and cache `paths` (relative to the base directory). Already loaded
    /// paths are left as they are.
    pub fn load<P: AsRef<Path>>(&mut self, paths: &[P]) -> Result<(), TableGenError> {
        for path in paths {
            let path = path.as_ref();
            if self.file(path).is_some() {
                continue;
            }
            let full = self.base_dir.join(path);
            let content = fs::read_to_string(&full).map_err(|e| TableGenError::io(&full, e))?;
            debug!(path = %path.display(), bytes = content.len(), "Loaded source file");
            self.files.push(SourceFile::new(path, content));
        }
        Ok(())
    }

    /// Register in-memory content under `path` without touching the disk.
    pub fn add_file(&mut self, path: impl Into<PathBuf>, content: impl Into<String>) {
        let path = path.into();
        let content = content.into();
        match self.files.iter_mut().find(|f| f.path == path) {
            Some(file) => *file = SourceFile::new(path, content),
            None => self.files.push(SourceFile::new(path, content)),
        }
    }

    pub fn file(&self, path: &Path) -> Option<&str> {
        self.files
            .iter()
            .find(|f| f.path == path)
            .map(SourceFile::content)
    }

    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    pub fn records(&self) -> &RecordSet {
        &self.records
    }

    pub fn records_mut(&mut self) -> &mut RecordSet {
        &mut self.records
    }

    pub fn set_records(&mut self, records: RecordSet) {
        self.records = records;
    }

    pub fn isa(&self) -> &dyn IsaDescription {
        self.isa.as_ref()
    }

    pub fn mode(&self) -> Option<&str> {
        self.mode.as_deref()
    }

    /// Replace the body of region `name` with the disclaimer-wrapped `content`.
    ///
    /// The region must exist exactly once across all loaded files; otherwise
    /// nothing is modified. Returns the number of changed characters (0 when the
    /// region already held identical text). A non-zero `estimated_size` is
    /// recorded for the table-size report.
    pub fn inject(
        &mut self,
        name: &str,
        content: &str,
        estimated_size: usize,
    ) -> Result<usize, TableGenError> {
        let mut hits = Vec::new();
        let mut count = 0usize;
        for (i, file) in self.files.iter().enumerate() {
            match region::locate(&file.content, name) {
                Located::Missing => {}
                Located::Found(span) => {
                    count += 1;
                    hits.push((i, span));
                }
                Located::Duplicated(n) => count += n,
                Located::Unterminated => {
                    return Err(RegionError::Unterminated {
                        region: name.to_string(),
                        path: file.path.clone(),
                    }
                    .into())
                }
            }
        }

        let (index, span) = match (count, hits.pop()) {
            (1, Some(hit)) => hit,
            (0, _) => {
                return Err(RegionError::NotFound {
                    region: name.to_string(),
                }
                .into())
            }
            (count, _) => {
                return Err(RegionError::Duplicated {
                    region: name.to_string(),
                    count,
                }
                .into())
            }
        };

        let file = &mut self.files[index];
        let block = region::render_block(content, &span.indent);
        let changed = region::changed_chars(span.body(&file.content), &block);
        if changed > 0 {
            file.content = region::splice(&file.content, &span, &block);
        }
        debug!(
            region = name,
            path = %file.path.display(),
            changed,
            "Injected region"
        );

        if estimated_size > 0 {
            match self.table_sizes.iter_mut().find(|t| t.region == name) {
                Some(entry) => entry.bytes = estimated_size,
                None => self.table_sizes.push(TableSize {
                    region: name.to_string(),
                    bytes: estimated_size,
                }),
            }
        }

        Ok(changed)
    }

    pub fn table_sizes(&self) -> &[TableSize] {
        &self.table_sizes
    }

    pub fn modified_files(&self) -> Vec<PathBuf> {
        self.files
            .iter()
            .filter(|f| f.is_modified())
            .map(|f| f.path.clone())
            .collect()
    }

    /// Write back every file whose content changed; returns the written paths.
    pub fn save(&mut self) -> Result<Vec<PathBuf>, TableGenError> {
        let mut written = Vec::new();
        for file in self.files.iter_mut().filter(|f| f.is_modified()) {
            let full = self.base_dir.join(&file.path);
            fs::write(&full, file.content.as_bytes()).map_err(|e| TableGenError::io(&full, e))?;
            info!(path = %file.path.display(), "Saved regenerated file");
            file.original = file.content.clone();
            written.push(file.path.clone());
        }
        Ok(written)
    }
}
