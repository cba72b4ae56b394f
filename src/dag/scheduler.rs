// src/dag/scheduler.rs

use tracing::{debug, info};

use crate::dag::assign::{Schedule, assign_steps};
use crate::dag::force::DistributionCost;
use crate::dag::graph::DependencyGraph;
use crate::dag::timing::{TimingAnalysis, TimingWindow};
use crate::errors::Result;
use crate::types::{OpId, Step};

/// Runs the scheduling passes over a borrowed, immutable graph.
///
/// Pass order:
/// - ASAP (forward sweep) and ALAP (backward sweep, bounded by the horizon)
/// - distribution cost over the full node set
/// - step assignment against that frozen cost table
///
/// Each pass only reads what the previous one produced. Running twice on the
/// same graph yields identical outcomes.
#[derive(Debug, Clone, Copy)]
pub struct Scheduler<'g> {
    graph: &'g DependencyGraph,
}

impl<'g> Scheduler<'g> {
    pub fn new(graph: &'g DependencyGraph) -> Self {
        Self { graph }
    }

    pub fn run(&self) -> ScheduleOutcome<'g> {
        let timing = TimingAnalysis::analyze(self.graph);
        let cost = DistributionCost::compute(self.graph, &timing);
        let schedule = assign_steps(self.graph, &timing, &cost);

        let critical = timing.critical_operations().len();
        let (peak_step, peak_cost) = cost.peak();
        debug!(peak_step, peak_cost, "cost table frozen; steps assigned");
        info!(
            operations = self.graph.len(),
            edges = self.graph.edge_count(),
            horizon = timing.horizon(),
            critical,
            "schedule complete"
        );

        ScheduleOutcome {
            graph: self.graph,
            timing,
            cost,
            schedule,
        }
    }
}

/// Everything one scheduling run produced, plus the graph it ran on.
#[derive(Debug, Clone)]
pub struct ScheduleOutcome<'g> {
    graph: &'g DependencyGraph,
    timing: TimingAnalysis,
    cost: DistributionCost,
    schedule: Schedule,
}

impl<'g> ScheduleOutcome<'g> {
    pub fn graph(&self) -> &'g DependencyGraph {
        self.graph
    }

    pub fn timing(&self) -> &TimingAnalysis {
        &self.timing
    }

    pub fn cost(&self) -> &DistributionCost {
        &self.cost
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn horizon(&self) -> Step {
        self.timing.horizon()
    }

    /// Assigned step of the named operation.
    pub fn step_of(&self, name: &str) -> Result<Step> {
        let op = self.graph.id_of(name)?;
        Ok(self.schedule.step_of(op))
    }

    /// ASAP/ALAP window of the named operation.
    pub fn window_of(&self, name: &str) -> Result<TimingWindow> {
        let op = self.graph.id_of(name)?;
        Ok(self.timing.window(op))
    }

    pub fn is_critical(&self, name: &str) -> Result<bool> {
        Ok(self.window_of(name)?.is_critical())
    }

    /// Names of zero-slack operations, in name order.
    pub fn critical_operations(&self) -> Vec<&'g str> {
        self.timing
            .critical_operations()
            .into_iter()
            .map(|op| self.graph.name_of(op))
            .collect()
    }

    /// Names of operations assigned to `step`, in name order.
    pub fn names_at(&self, step: Step) -> Vec<&'g str> {
        self.schedule
            .ops_at(step)
            .into_iter()
            .map(|op: OpId| self.graph.name_of(op))
            .collect()
    }
}
