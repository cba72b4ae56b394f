// src/dag/timing.rs

//! ASAP / ALAP analysis and the slack/mobility arithmetic derived from it.

use std::ops::RangeInclusive;

use tracing::debug;

use crate::dag::graph::DependencyGraph;
use crate::types::{OpId, Step};

/// Feasible step interval `[asap, alap]` of one operation.
///
/// `asap <= alap` holds for every window produced by [`TimingAnalysis`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingWindow {
    pub asap: Step,
    pub alap: Step,
}

impl TimingWindow {
    /// `alap - asap`.
    pub fn slack(&self) -> usize {
        self.alap - self.asap
    }

    /// Number of feasible steps, `slack + 1`. Never zero.
    pub fn mobility(&self) -> usize {
        self.slack() + 1
    }

    /// Zero slack: the step is fixed by precedence alone.
    pub fn is_critical(&self) -> bool {
        self.asap == self.alap
    }

    pub fn contains(&self, step: Step) -> bool {
        self.asap <= step && step <= self.alap
    }

    pub fn steps(&self) -> RangeInclusive<Step> {
        self.asap..=self.alap
    }
}

/// Per-operation ASAP and ALAP steps plus the schedule horizon.
///
/// Tables are indexed by [`OpId`]; the graph itself is never modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimingAnalysis {
    asap: Vec<Step>,
    alap: Vec<Step>,
    horizon: Step,
}

impl TimingAnalysis {
    /// Run the forward (ASAP) and backward (ALAP) sweeps.
    ///
    /// The horizon is the largest ASAP value (0 for an empty graph).
    pub fn analyze(graph: &DependencyGraph) -> Self {
        let asap = asap_steps(graph);
        let horizon = asap.iter().copied().max().unwrap_or(0);
        let alap = alap_steps(graph, horizon);

        debug!(operations = graph.len(), horizon, "timing analysis complete");

        Self {
            asap,
            alap,
            horizon,
        }
    }

    /// Critical-path length in steps.
    pub fn horizon(&self) -> Step {
        self.horizon
    }

    pub fn asap(&self, op: OpId) -> Step {
        self.asap[op.index()]
    }

    pub fn alap(&self, op: OpId) -> Step {
        self.alap[op.index()]
    }

    pub fn window(&self, op: OpId) -> TimingWindow {
        TimingWindow {
            asap: self.asap(op),
            alap: self.alap(op),
        }
    }

    pub fn slack(&self, op: OpId) -> usize {
        self.window(op).slack()
    }

    pub fn mobility(&self, op: OpId) -> usize {
        self.window(op).mobility()
    }

    pub fn is_critical(&self, op: OpId) -> bool {
        self.window(op).is_critical()
    }

    /// Zero-slack operations in name order.
    pub fn critical_operations(&self) -> Vec<OpId> {
        (0..self.asap.len())
            .map(OpId)
            .filter(|&op| self.is_critical(op))
            .collect()
    }

    /// Iterate `(op, window)` in name order.
    pub fn windows(&self) -> impl Iterator<Item = (OpId, TimingWindow)> + '_ {
        (0..self.asap.len()).map(move |i| (OpId(i), self.window(OpId(i))))
    }
}

/// Earliest feasible step per operation.
///
/// Roots get step 0; everything else `1 + max(asap[pred])`. Visiting in
/// topological order guarantees every predecessor is final first.
pub fn asap_steps(graph: &DependencyGraph) -> Vec<Step> {
    let mut asap: Vec<Step> = vec![0; graph.len()];

    for &op in graph.topological_order() {
        let step = graph
            .predecessors(op)
            .into_iter()
            .map(|pred| asap[pred.index()] + 1)
            .max()
            .unwrap_or(0);
        asap[op.index()] = step;
    }

    asap
}

/// Latest feasible step per operation, bounded by `horizon`.
///
/// Sinks get `horizon`; everything else `min(alap[succ]) - 1`, visiting in
/// reverse topological order.
pub fn alap_steps(graph: &DependencyGraph, horizon: Step) -> Vec<Step> {
    let mut alap: Vec<Step> = vec![horizon; graph.len()];

    for &op in graph.topological_order().iter().rev() {
        // A successor's ALAP is at least its ASAP, which is at least 1.
        let step = graph
            .successors(op)
            .into_iter()
            .map(|succ| alap[succ.index()] - 1)
            .min()
            .unwrap_or(horizon);
        alap[op.index()] = step;
    }

    alap
}
