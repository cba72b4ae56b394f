// src/report/rows.rs

//! Per-operation result rows: scheduling outputs joined with labels.

use crate::dag::ScheduleOutcome;
use crate::errors::{Result, SchedError};
use crate::report::labels::LabelTable;
use crate::types::{SortKey, Step};

/// Everything known about one operation after a scheduling run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledOp {
    pub name: String,
    pub stage: String,
    pub asap: Step,
    pub alap: Step,
    pub slack: usize,
    pub mobility: usize,
    /// Step chosen by the force-directed assignment.
    pub step: Step,
    pub resource: String,
    pub critical: bool,
}

/// All rows of one run, in a chosen order.
#[derive(Debug, Clone)]
pub struct ScheduleReport {
    rows: Vec<ScheduledOp>,
    sort: SortKey,
}

impl ScheduleReport {
    /// Join an outcome with labels. Rows start sorted by (step, name).
    pub fn build(outcome: &ScheduleOutcome<'_>, labels: &LabelTable) -> Self {
        let graph = outcome.graph();
        let timing = outcome.timing();
        let schedule = outcome.schedule();

        let rows = graph
            .operations()
            .map(|op| {
                let name = graph.name_of(op);
                let window = timing.window(op);
                ScheduledOp {
                    name: name.to_string(),
                    stage: labels.stage_of(name).to_string(),
                    asap: window.asap,
                    alap: window.alap,
                    slack: window.slack(),
                    mobility: window.mobility(),
                    step: schedule.step_of(op),
                    resource: labels.resource_of(name).to_string(),
                    critical: window.is_critical(),
                }
            })
            .collect();

        let mut report = Self {
            rows,
            sort: SortKey::Name,
        };
        report.sort_by(SortKey::Step);
        report
    }

    pub fn sort_by(&mut self, key: SortKey) {
        match key {
            SortKey::Step => self.rows.sort_by(|a, b| (a.step, &a.name).cmp(&(b.step, &b.name))),
            SortKey::Name => self.rows.sort_by(|a, b| a.name.cmp(&b.name)),
            SortKey::Asap => self.rows.sort_by(|a, b| (a.asap, &a.name).cmp(&(b.asap, &b.name))),
            SortKey::Slack => {
                self.rows.sort_by(|a, b| (a.slack, &a.name).cmp(&(b.slack, &b.name)))
            }
        }
        self.sort = key;
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort
    }

    pub fn rows(&self) -> &[ScheduledOp] {
        &self.rows
    }

    /// Row for the named operation.
    pub fn row(&self, name: &str) -> Result<&ScheduledOp> {
        self.rows
            .iter()
            .find(|r| r.name == name)
            .ok_or_else(|| SchedError::OperationNotFound(name.to_string()))
    }

    pub fn critical_rows(&self) -> impl Iterator<Item = &ScheduledOp> {
        self.rows.iter().filter(|r| r.critical)
    }
}
