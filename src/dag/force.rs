// src/dag/force.rs

//! Uniform-distribution force model.
//!
//! Every operation is assumed equally likely to land on any step of its
//! timing window, so it contributes `1 / mobility` to each of those steps.
//! Summing the contributions gives the expected number of operations
//! contending for each step.

use tracing::debug;

use crate::dag::graph::DependencyGraph;
use crate::dag::timing::{TimingAnalysis, TimingWindow};
use crate::types::Step;

/// Absolute tolerance used when comparing two step costs.
///
/// Costs that are equal as fractions can differ in the last bits once summed
/// as floats; anything closer than this is treated as a tie.
pub const COST_TOLERANCE: f64 = 1e-9;

/// Probability mass an operation with `window` places on `step`.
pub fn weight(window: TimingWindow, step: Step) -> f64 {
    if window.contains(step) {
        1.0 / window.mobility() as f64
    } else {
        0.0
    }
}

/// Per-step distribution cost over `0..=horizon`.
///
/// Computed once from the full node set and never updated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionCost {
    per_step: Vec<f64>,
}

impl DistributionCost {
    pub fn compute(graph: &DependencyGraph, timing: &TimingAnalysis) -> Self {
        let mut per_step = vec![0.0; timing.horizon() + 1];

        for op in graph.operations() {
            let window = timing.window(op);
            let share = weight(window, window.asap);
            for step in window.steps() {
                per_step[step] += share;
            }
        }

        debug!(steps = per_step.len(), "distribution cost computed");

        Self { per_step }
    }

    /// Cost at `step`; zero beyond the horizon.
    pub fn at(&self, step: Step) -> f64 {
        self.per_step.get(step).copied().unwrap_or(0.0)
    }

    /// Number of steps, `horizon + 1`.
    pub fn len(&self) -> usize {
        self.per_step.len()
    }

    pub fn is_empty(&self) -> bool {
        self.per_step.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.per_step
    }

    pub fn iter(&self) -> impl Iterator<Item = (Step, f64)> + '_ {
        self.per_step.iter().copied().enumerate()
    }

    /// Sum over all steps; equals the number of operations.
    pub fn total(&self) -> f64 {
        self.per_step.iter().sum()
    }

    /// Most contended step (first one on ties) and its cost.
    pub fn peak(&self) -> (Step, f64) {
        let mut best = (0, self.at(0));
        for (step, cost) in self.iter().skip(1) {
            if cost > best.1 + COST_TOLERANCE {
                best = (step, cost);
            }
        }
        best
    }
}
