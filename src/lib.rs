// src/lib.rs

pub mod cli;
pub mod config;
pub mod dag;
pub mod errors;
pub mod logging;
pub mod report;
pub mod types;

use std::path::PathBuf;

use anyhow::Result;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::loader::load_and_validate;
use crate::config::model::ConfigFile;
use crate::dag::{DependencyGraph, Scheduler};
use crate::report::render::{render_costs, render_summary, render_table, render_usage};
use crate::report::{ResourceUsage, ScheduleReport, Summary};
use crate::types::OpId;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading + validation
/// - graph construction (fails on cycles)
/// - the scheduling run
/// - label joins and the printed report
pub fn run(args: CliArgs) -> Result<()> {
    let config_path = PathBuf::from(&args.config);
    let cfg = load_and_validate(&config_path)?;
    let graph = cfg.build_graph()?;

    if args.dry_run {
        print_dry_run(&cfg, &graph);
        return Ok(());
    }

    let outcome = Scheduler::new(&graph).run();
    let labels = cfg.label_table();

    let mut report = ScheduleReport::build(&outcome, &labels);
    report.sort_by(args.sort);

    let usage = ResourceUsage::compute(&outcome, &labels);
    let summary = Summary::compute(&outcome, &labels);

    info!(
        config = %config_path.display(),
        horizon = summary.horizon,
        critical = summary.critical,
        "printing schedule report"
    );

    println!("{}", render_table(&report, args.critical_only));
    println!("{}", render_costs(outcome.cost()));
    println!("{}", render_usage(&usage));
    print!("{}", render_summary(&summary));

    Ok(())
}

/// Dry-run output: operations, roots, sinks and the deduplicated edge list.
fn print_dry_run(cfg: &ConfigFile, graph: &DependencyGraph) {
    println!("ctrlsched dry-run");
    println!("  edges in config = {}", cfg.edges.len());
    println!("  distinct edges = {}", graph.edge_count());
    println!("  operations = {}", graph.len());
    println!("  roots = {:?}", op_names(graph, graph.roots()));
    println!("  sinks = {:?}", op_names(graph, graph.sinks()));
    println!();

    println!("dependencies ({}):", graph.edge_count());
    for (producer, consumer) in graph.edges() {
        println!(
            "  {} -> {}",
            graph.name_of(producer),
            graph.name_of(consumer)
        );
    }

    let isolated: Vec<&str> = graph
        .operations()
        .filter(|&op| graph.is_root(op) && graph.is_sink(op))
        .map(|op| graph.name_of(op))
        .collect();
    if !isolated.is_empty() {
        println!("isolated operations: {:?}", isolated);
    }

    debug!("dry-run complete (no scheduling)");
}

fn op_names(graph: &DependencyGraph, ops: Vec<OpId>) -> Vec<&str> {
    ops.into_iter().map(|op| graph.name_of(op)).collect()
}
