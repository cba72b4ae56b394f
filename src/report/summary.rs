// src/report/summary.rs

//! Aggregate numbers derived from a finished run.

use std::collections::BTreeMap;

use crate::dag::ScheduleOutcome;
use crate::report::labels::LabelTable;
use crate::types::Step;

/// Count of assigned operations per resource label, for every step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceUsage {
    per_step: Vec<BTreeMap<String, usize>>,
}

impl ResourceUsage {
    pub fn compute(outcome: &ScheduleOutcome<'_>, labels: &LabelTable) -> Self {
        let graph = outcome.graph();
        let mut per_step: Vec<BTreeMap<String, usize>> =
            vec![BTreeMap::new(); outcome.horizon() + 1];

        for (op, step) in outcome.schedule().iter() {
            let resource = labels.resource_of(graph.name_of(op));
            *per_step[step].entry(resource.to_string()).or_insert(0) += 1;
        }

        Self { per_step }
    }

    /// Usage at `step`; empty beyond the horizon.
    pub fn at(&self, step: Step) -> Option<&BTreeMap<String, usize>> {
        self.per_step.get(step)
    }

    pub fn count(&self, step: Step, resource: &str) -> usize {
        self.at(step)
            .and_then(|m| m.get(resource))
            .copied()
            .unwrap_or(0)
    }

    pub fn steps(&self) -> impl Iterator<Item = (Step, &BTreeMap<String, usize>)> {
        self.per_step.iter().enumerate()
    }

    /// Every resource label that appears at least once, sorted.
    pub fn resource_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self
            .per_step
            .iter()
            .flat_map(|m| m.keys().map(String::as_str))
            .collect();
        types.sort_unstable();
        types.dedup();
        types
    }
}

/// Headline statistics of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub operations: usize,
    pub dependencies: usize,
    /// Critical-path length in steps.
    pub horizon: Step,
    pub critical: usize,
    pub average_mobility: f64,
    pub max_step_cost: f64,
    pub peak_load: usize,
    /// Number of operations carrying each resource label.
    pub resource_counts: BTreeMap<String, usize>,
}

impl Summary {
    pub fn compute(outcome: &ScheduleOutcome<'_>, labels: &LabelTable) -> Self {
        let graph = outcome.graph();
        let timing = outcome.timing();

        let total_mobility: usize = graph.operations().map(|op| timing.mobility(op)).sum();
        let average_mobility = if graph.is_empty() {
            0.0
        } else {
            total_mobility as f64 / graph.len() as f64
        };

        let mut resource_counts = BTreeMap::new();
        for name in graph.names() {
            *resource_counts
                .entry(labels.resource_of(name).to_string())
                .or_insert(0) += 1;
        }

        Self {
            operations: graph.len(),
            dependencies: graph.edge_count(),
            horizon: outcome.horizon(),
            critical: timing.critical_operations().len(),
            average_mobility,
            max_step_cost: outcome.cost().peak().1,
            peak_load: outcome.schedule().peak_load().1,
            resource_counts,
        }
    }
}
