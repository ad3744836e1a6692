//! Task scheduling: dependency validation and a stable topological order.
//!
//! Each step takes the earliest-registered pending task whose dependencies
//! have all been placed, so ties between ready tasks always fall to
//! registration order. Identical registrations produce the identical order.

use crate::context::GeneratorContext;
use crate::error::{SchedulerError, TableGenError};
use crate::task::Task;
use serde::Serialize;
use std::collections::HashSet;
use tracing::info;

/// Result of running one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskOutcome {
    pub name: String,
    pub changed: usize,
}

pub struct Scheduler<T> {
    tasks: Vec<T>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self { tasks: Vec::new() }
    }
}

impl<T: Task> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_task(mut self, task: T) -> Self {
        self.tasks.push(task);
        self
    }

    pub fn push(&mut self, task: T) {
        self.tasks.push(task);
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Indices of the registered tasks in execution order.
    pub fn plan(&self) -> Result<Vec<usize>, SchedulerError> {
        let mut names = HashSet::with_capacity(self.tasks.len());
        for task in &self.tasks {
            if !names.insert(task.name()) {
                return Err(SchedulerError::DuplicateTask(task.name().to_string()));
            }
        }

        for task in &self.tasks {
            for dependency in task.dependencies() {
                if !names.contains(dependency) {
                    return Err(SchedulerError::UnknownDependency {
                        task: task.name().to_string(),
                        dependency: dependency.to_string(),
                    });
                }
            }
        }

        let mut order = Vec::with_capacity(self.tasks.len());
        let mut done: HashSet<&str> = HashSet::with_capacity(self.tasks.len());
        let mut pending: Vec<usize> = (0..self.tasks.len()).collect();

        while !pending.is_empty() {
            let ready = pending.iter().position(|&i| {
                self.tasks[i]
                    .dependencies()
                    .iter()
                    .all(|dependency| done.contains(dependency))
            });

            let Some(position) = ready else {
                return Err(SchedulerError::CyclicDependency(
                    pending
                        .iter()
                        .map(|&i| self.tasks[i].name().to_string())
                        .collect(),
                ));
            };

            let i = pending.remove(position);
            done.insert(self.tasks[i].name());
            order.push(i);
        }

        Ok(order)
    }

    /// Task names in execution order.
    pub fn order(&self) -> Result<Vec<&str>, SchedulerError> {
        Ok(self
            .plan()?
            .into_iter()
            .map(|i| self.tasks[i].name())
            .collect())
    }

    /// Run every task once, strictly in order, stopping at the first failure.
    pub fn run(&self, ctx: &mut GeneratorContext) -> Result<Vec<TaskOutcome>, TableGenError> {
        let plan = self.plan()?;
        let mut outcomes = Vec::with_capacity(plan.len());

        for i in plan {
            let task = &self.tasks[i];
            info!(task = task.name(), "Running task");
            let changed = task.run(ctx)?;
            info!(task = task.name(), changed, "Task completed");
            outcomes.push(TaskOutcome {
                name: task.name().to_string(),
                changed,
            });
        }

        Ok(outcomes)
    }
}
