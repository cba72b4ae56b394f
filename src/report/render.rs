// src/report/render.rs

//! Plain-text rendering of report data for the terminal.

use std::fmt::Write;

use crate::dag::DistributionCost;
use crate::report::rows::ScheduleReport;
use crate::report::summary::{ResourceUsage, Summary};

const RULE_WIDTH: usize = 80;

fn heading(out: &mut String, title: &str) {
    let rule = "=".repeat(RULE_WIDTH);
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{rule}");
}

/// Per-operation table. With `critical_only`, zero-slack rows only.
pub fn render_table(report: &ScheduleReport, critical_only: bool) -> String {
    let mut out = String::new();
    heading(&mut out, "SCHEDULE");

    let _ = writeln!(
        out,
        "{:<24} {:>5} {:>4} {:>4} {:>5} {:>8} {:>4}  {:<12} {}",
        "Signal", "Stage", "ASAP", "ALAP", "Slack", "Mobility", "Step", "Resource", "Critical"
    );
    let _ = writeln!(out, "{}", "-".repeat(RULE_WIDTH));

    for row in report.rows().iter().filter(|r| !critical_only || r.critical) {
        let _ = writeln!(
            out,
            "{:<24} {:>5} {:>4} {:>4} {:>5} {:>8} {:>4}  {:<12} {}",
            row.name,
            row.stage,
            row.asap,
            row.alap,
            row.slack,
            row.mobility,
            row.step,
            row.resource,
            if row.critical { "YES" } else { "NO" }
        );
    }

    out
}

/// Distribution cost per step, two decimals.
pub fn render_costs(cost: &DistributionCost) -> String {
    let mut out = String::new();
    heading(&mut out, "DISTRIBUTION COST PER STEP");
    for (step, c) in cost.iter() {
        let _ = writeln!(out, "  Step {step}: {c:.2} operations");
    }
    out
}

/// Assigned operations per step, broken down by resource type.
pub fn render_usage(usage: &ResourceUsage) -> String {
    let mut out = String::new();
    heading(&mut out, "RESOURCE USAGE PER STEP");
    for (step, by_resource) in usage.steps() {
        let total: usize = by_resource.values().sum();
        let parts: Vec<String> = by_resource
            .iter()
            .map(|(resource, n)| format!("{resource}={n}"))
            .collect();
        let _ = writeln!(out, "  Step {step}: {total} [{}]", parts.join(", "));
    }
    out
}

pub fn render_summary(summary: &Summary) -> String {
    let mut out = String::new();
    heading(&mut out, "SUMMARY");
    let _ = writeln!(out, "Total control signals: {}", summary.operations);
    let _ = writeln!(out, "Total dependencies: {}", summary.dependencies);
    let _ = writeln!(out, "Critical path length: {} steps", summary.horizon);
    let _ = writeln!(out, "Critical signals: {}", summary.critical);
    let _ = writeln!(out, "Average mobility: {:.2}", summary.average_mobility);
    let _ = writeln!(out, "Max step cost: {:.2} operations", summary.max_step_cost);
    let _ = writeln!(out, "Peak step load: {} operations", summary.peak_load);
    let _ = writeln!(out);
    for (resource, count) in summary.resource_counts.iter() {
        let _ = writeln!(out, "{resource:<15}: {count} signals");
    }
    out
}
