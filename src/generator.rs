//! Generator driver.
//!
//! One run loads the configured files, extracts the instruction records, runs
//! every task in dependency order, regenerates the instruction-info region from
//! the resolved records and finally saves (or, in check mode, compares). Any
//! error aborts the run before anything is written.

use crate::config::TableGenConfig;
use crate::context::{GeneratorContext, TableSize};
use crate::error::{SchedulerError, TableGenError};
use crate::extract::extract;
use crate::isa::{IsaCatalog, IsaDescription};
use crate::record::{InstructionRecord, RecordSet};
use crate::schedule::{Scheduler, TaskOutcome};
use crate::task::GeneratorTask;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info};

/// What a run does with the regenerated files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Write back every modified file.
    Write,
    /// Report what would change without writing.
    DryRun,
    /// Fail with [`TableGenError::Stale`] when anything would change.
    Check,
}

/// Summary of one generator run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub records: usize,
    pub tasks: Vec<TaskOutcome>,
    /// Region the instruction rows were merged into.
    pub region: String,
    /// Characters changed in the instruction-info region.
    pub merged: usize,
    /// Records whose resolved indices differ from the previous output.
    pub moved: usize,
    pub table_sizes: Vec<TableSize>,
    pub total_table_size: usize,
    pub modified_files: Vec<PathBuf>,
    pub written_files: Vec<PathBuf>,
}

impl RunReport {
    pub fn total_changed(&self) -> usize {
        self.tasks.iter().map(|t| t.changed).sum::<usize>() + self.merged
    }
}

pub struct TableGen {
    base_dir: PathBuf,
    config: TableGenConfig,
    scheduler: Scheduler<GeneratorTask>,
}

impl TableGen {
    /// Generator over `base_dir` with every built-in task registered.
    pub fn new(base_dir: impl Into<PathBuf>, config: TableGenConfig) -> Self {
        let mut scheduler = Scheduler::new();
        for task in GeneratorTask::all() {
            scheduler.push(task);
        }
        Self {
            base_dir: base_dir.into(),
            config,
            scheduler,
        }
    }

    pub fn config(&self) -> &TableGenConfig {
        &self.config
    }

    pub fn task_order(&self) -> Result<Vec<&str>, SchedulerError> {
        self.scheduler.order()
    }

    pub fn run(&self, mode: RunMode) -> Result<RunReport, TableGenError> {
        let mut ctx = GeneratorContext::new(&self.base_dir).with_isa(
            self.load_isa()?,
            self.config.isa.mode.clone(),
        );

        self.before_run(&mut ctx)?;
        let tasks = self.scheduler.run(&mut ctx)?;
        let (merged, moved) = self.merge(&mut ctx)?;

        let modified_files = ctx.modified_files();
        let written_files = match mode {
            RunMode::Write => ctx.save()?,
            RunMode::DryRun => Vec::new(),
            RunMode::Check if modified_files.is_empty() => Vec::new(),
            RunMode::Check => return Err(TableGenError::Stale(modified_files)),
        };

        let table_sizes = ctx.table_sizes().to_vec();
        let total_table_size = table_sizes.iter().map(|t| t.bytes).sum();

        Ok(RunReport {
            records: ctx.records().len(),
            tasks,
            region: self.config.database.region.clone(),
            merged,
            moved,
            table_sizes,
            total_table_size,
            modified_files,
            written_files,
        })
    }

    fn load_isa(&self) -> Result<Box<dyn IsaDescription>, TableGenError> {
        match &self.config.isa.path {
            Some(path) => {
                let catalog = IsaCatalog::load(&self.base_dir.join(path))?;
                info!(entries = catalog.len(), path = %path.display(), "Loaded ISA description");
                Ok(Box::new(catalog))
            }
            None => Ok(Box::new(IsaCatalog::empty())),
        }
    }

    fn before_run(&self, ctx: &mut GeneratorContext) -> Result<(), TableGenError> {
        let database = &self.config.database;
        ctx.load(&database.files)?;

        let text = ctx
            .file(&database.instruction_file)
            .ok_or_else(|| {
                TableGenError::Config(format!(
                    "Instruction file {} is not among the loaded files",
                    database.instruction_file.display()
                ))
            })?;

        let records = extract(text, &database.region, &database.macro_name)?;
        ctx.set_records(RecordSet::from_extracted(records)?);
        Ok(())
    }

    /// Regenerate the instruction-info region. Returns the changed character
    /// count and how many records moved relative to the previous output.
    fn merge(&self, ctx: &mut GeneratorContext) -> Result<(usize, usize), TableGenError> {
        let rows = render_records(ctx.records())?;
        let moved = ctx.records().iter().filter(|r| has_moved(r)).count();
        info!(moved, "Records with changed indices");

        let cost = ctx.records().len() * 4;
        let changed = ctx.inject(&self.config.database.region, &rows, cost)?;
        debug!(changed, "Merged instruction-info region");
        Ok((changed, moved))
    }
}

/// Render every record as one `INST(...)` invocation carrying its resolved indices.
pub fn render_records(records: &RecordSet) -> Result<String, TableGenError> {
    let count = records.len();
    let mut out = String::new();

    for record in records {
        let opcode_data_index = resolved(record, record.opcode_data_index, "opcode_data_index")?;
        let name_index = resolved(record, record.name_index, "name_index")?;

        out.push_str(&format!(
            "INST({:<17}, {:<19}, {:<86}, {:<10}, {:<26}, {:<3}, {:<4}){} // #{}\n",
            record.enum_symbol,
            record.encoding_class,
            record.opcode_data,
            record.rw_info,
            record.flags,
            opcode_data_index,
            name_index,
            if record.id + 1 == count { " " } else { "," },
            record.id
        ));
    }

    Ok(out)
}

fn resolved(
    record: &InstructionRecord,
    index: Option<usize>,
    field: &'static str,
) -> Result<usize, TableGenError> {
    index.ok_or_else(|| TableGenError::Incomplete {
        name: record.enum_symbol.clone(),
        field,
    })
}

fn has_moved(record: &InstructionRecord) -> bool {
    let differs = |index: Option<usize>, previous: &str| {
        index.map(|i| i.to_string()).as_deref() != Some(previous)
    };
    differs(record.opcode_data_index, &record.previous.opcode_data_index)
        || differs(record.name_index, &record.previous.name_index)
}
