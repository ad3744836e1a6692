//! Property-based tests for task ordering

use proptest::prelude::*;
use std::collections::{HashMap, HashSet};
use tablegen::context::GeneratorContext;
use tablegen::error::TableGenError;
use tablegen::schedule::Scheduler;
use tablegen::task::Task;

struct Node {
    name: String,
    deps: Vec<String>,
}

impl Task for Node {
    fn name(&self) -> &str {
        &self.name
    }

    fn dependencies(&self) -> Vec<&str> {
        self.deps.iter().map(String::as_str).collect()
    }

    fn run(&self, _ctx: &mut GeneratorContext) -> Result<usize, TableGenError> {
        Ok(0)
    }
}

/// Acyclic graphs: task `i` may only depend on tasks `j < i`; registration
/// order is an arbitrary permutation.
fn dag() -> impl Strategy<Value = (Vec<Vec<bool>>, Vec<usize>)> {
    (1usize..10).prop_flat_map(|n| {
        (
            proptest::collection::vec(proptest::collection::vec(any::<bool>(), n), n),
            Just((0..n).collect::<Vec<_>>()).prop_shuffle(),
        )
    })
}

fn build(edges: &[Vec<bool>], registration: &[usize]) -> Scheduler<Node> {
    let mut scheduler = Scheduler::new();
    for &i in registration {
        let deps = (0..i)
            .filter(|&j| edges[i][j])
            .map(|j| format!("t{}", j))
            .collect();
        scheduler.push(Node {
            name: format!("t{}", i),
            deps,
        });
    }
    scheduler
}

/// Every task runs after all of its dependencies
#[test]
fn test_order_respects_dependencies_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&dag(), |(edges, registration)| {
            let scheduler = build(&edges, &registration);
            let order = scheduler.order().unwrap();
            prop_assert_eq!(order.len(), registration.len());

            let position: HashMap<&str, usize> =
                order.iter().enumerate().map(|(p, name)| (*name, p)).collect();
            for &i in &registration {
                for j in (0..i).filter(|&j| edges[i][j]) {
                    let task = format!("t{}", i);
                    let dep = format!("t{}", j);
                    prop_assert!(position[dep.as_str()] < position[task.as_str()]);
                }
            }
            Ok(())
        })
        .unwrap();
}

/// No earlier-registered task that was already runnable is passed over
#[test]
fn test_ready_ties_fall_to_registration_order_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&dag(), |(edges, registration)| {
            let scheduler = build(&edges, &registration);
            let order = scheduler.order().unwrap();
            let name = |i: usize| format!("t{}", i);
            let ready = |i: usize, placed: &HashSet<String>| {
                (0..i).filter(|&j| edges[i][j]).all(|j| placed.contains(&name(j)))
            };

            let mut placed: HashSet<String> = HashSet::new();
            for chosen in &order {
                let slot = registration
                    .iter()
                    .position(|&i| name(i) == *chosen)
                    .unwrap();
                for &earlier in &registration[..slot] {
                    if !placed.contains(&name(earlier)) {
                        prop_assert!(!ready(earlier, &placed));
                    }
                }
                placed.insert(chosen.to_string());
            }
            Ok(())
        })
        .unwrap();
}

/// Identical registrations always produce the identical order
#[test]
fn test_order_is_stable_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&dag(), |(edges, registration)| {
            let first = build(&edges, &registration);
            let second = build(&edges, &registration);
            prop_assert_eq!(first.order().unwrap(), second.order().unwrap());
            Ok(())
        })
        .unwrap();
}

/// Tasks without dependencies keep their registration order
#[test]
fn test_independent_tasks_keep_registration_order_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &Just((0..8).collect::<Vec<usize>>()).prop_shuffle(),
            |registration| {
                let edges = vec![vec![false; 8]; 8];
                let scheduler = build(&edges, &registration);
                let expected: Vec<String> =
                    registration.iter().map(|i| format!("t{}", i)).collect();
                prop_assert_eq!(scheduler.order().unwrap(), expected);
                Ok(())
            },
        )
        .unwrap();
}
