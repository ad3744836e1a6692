//! Generation tasks.
//!
//! A task runs once against the shared [`GeneratorContext`] and reports how
//! many characters it changed across the regions it injected. The set of tasks
//! is fixed, so they are a closed enum rather than an open plugin registry.

mod encoding_table;
mod id_enum;
mod name_table;

pub use encoding_table::EncodingTable;
pub use id_enum::IdEnum;
pub use name_table::NameTable;

use crate::context::GeneratorContext;
use crate::error::TableGenError;

pub trait Task {
    fn name(&self) -> &str;

    /// Names of the tasks that must complete before this one.
    fn dependencies(&self) -> Vec<&str> {
        Vec::new()
    }

    fn run(&self, ctx: &mut GeneratorContext) -> Result<usize, TableGenError>;
}

/// The tasks that make up a generator run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorTask {
    IdEnum(IdEnum),
    NameTable(NameTable),
    EncodingTable(EncodingTable),
}

impl GeneratorTask {
    /// Every built-in task, in registration order.
    pub fn all() -> Vec<GeneratorTask> {
        vec![
            GeneratorTask::IdEnum(IdEnum),
            GeneratorTask::NameTable(NameTable),
            GeneratorTask::EncodingTable(EncodingTable),
        ]
    }

    fn inner(&self) -> &dyn Task {
        match self {
            GeneratorTask::IdEnum(task) => task,
            GeneratorTask::NameTable(task) => task,
            GeneratorTask::EncodingTable(task) => task,
        }
    }
}

impl Task for GeneratorTask {
    fn name(&self) -> &str {
        self.inner().name()
    }

    fn dependencies(&self) -> Vec<&str> {
        self.inner().dependencies()
    }

    fn run(&self, ctx: &mut GeneratorContext) -> Result<usize, TableGenError> {
        self.inner().run(ctx)
    }
}
