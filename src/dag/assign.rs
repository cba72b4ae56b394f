// src/dag/assign.rs

//! Step assignment against a frozen [`DistributionCost`] table.

use crate::dag::force::{COST_TOLERANCE, DistributionCost};
use crate::dag::graph::DependencyGraph;
use crate::dag::timing::{TimingAnalysis, TimingWindow};
use crate::types::{OpId, Step};

/// Final step per operation, indexed by [`OpId`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    steps: Vec<Step>,
    horizon: Step,
}

impl Schedule {
    pub fn step_of(&self, op: OpId) -> Step {
        self.steps[op.index()]
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn horizon(&self) -> Step {
        self.horizon
    }

    /// `(op, step)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (OpId, Step)> + '_ {
        self.steps.iter().enumerate().map(|(i, &s)| (OpId(i), s))
    }

    /// Operations assigned to `step`, in name order.
    pub fn ops_at(&self, step: Step) -> Vec<OpId> {
        self.iter()
            .filter(|&(_, s)| s == step)
            .map(|(op, _)| op)
            .collect()
    }

    /// Number of operations assigned to each step `0..=horizon`.
    pub fn load_per_step(&self) -> Vec<usize> {
        let mut load = vec![0; self.horizon + 1];
        for &step in &self.steps {
            load[step] += 1;
        }
        load
    }

    /// Busiest step (first one on ties) and its load.
    pub fn peak_load(&self) -> (Step, usize) {
        self.load_per_step()
            .into_iter()
            .enumerate()
            .fold((0, 0), |best, (step, load)| {
                if load > best.1 { (step, load) } else { best }
            })
    }
}

/// Pick the cheapest step inside `window`.
///
/// Scans the window in increasing order and keeps the first minimum, so ties
/// go to the earliest step.
pub fn best_step(window: TimingWindow, cost: &DistributionCost) -> Step {
    let mut best = window.asap;
    let mut best_cost = cost.at(best);

    for step in window.steps().skip(1) {
        let c = cost.at(step);
        if c < best_cost - COST_TOLERANCE {
            best = step;
            best_cost = c;
        }
    }

    best
}

/// Assign every operation independently; the result does not depend on
/// visiting order because `cost` is read-only here.
pub fn assign_steps(
    graph: &DependencyGraph,
    timing: &TimingAnalysis,
    cost: &DistributionCost,
) -> Schedule {
    let steps = graph
        .operations()
        .map(|op| best_step(timing.window(op), cost))
        .collect();

    Schedule {
        steps,
        horizon: timing.horizon(),
    }
}
