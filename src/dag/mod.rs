// src/dag/mod.rs

//! Dependency graph and the scheduling passes over it.
//!
//! - [`graph`] builds the immutable graph and rejects cycles.
//! - [`timing`] computes ASAP/ALAP windows, slack and mobility.
//! - [`force`] turns windows into the per-step distribution cost.
//! - [`assign`] picks the cheapest step inside each window.
//! - [`scheduler`] runs the passes in order and bundles their outputs.

pub mod assign;
pub mod force;
pub mod graph;
pub mod scheduler;
pub mod timing;

pub use assign::Schedule;
pub use force::DistributionCost;
pub use graph::DependencyGraph;
pub use scheduler::{ScheduleOutcome, Scheduler};
pub use timing::{TimingAnalysis, TimingWindow};
