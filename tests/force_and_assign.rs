use std::error::Error;

use ctrlsched::dag::assign::{assign_steps, best_step};
use ctrlsched::dag::force::weight;
use ctrlsched::dag::{DependencyGraph, DistributionCost, Scheduler, TimingAnalysis, TimingWindow};
use ctrlsched_test_utils::builders::EdgeListBuilder;
use ctrlsched_test_utils::init_tracing;

type TestResult = Result<(), Box<dyn Error>>;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-12,
        "expected {expected}, got {actual}"
    );
}

fn unbalanced_join() -> DependencyGraph {
    EdgeListBuilder::new()
        .edge("A", "B")
        .edge("A", "C")
        .edge("C", "D")
        .edge("B", "E")
        .edge("D", "E")
        .build()
}

#[test]
fn weight_is_uniform_over_window() {
    let w = TimingWindow { asap: 1, alap: 4 };

    assert_close(weight(w, 0), 0.0);
    for step in 1..=4 {
        assert_close(weight(w, step), 0.25);
    }
    assert_close(weight(w, 5), 0.0);
}

#[test]
fn cost_table_for_unbalanced_join() -> TestResult {
    init_tracing();

    let graph = unbalanced_join();
    let timing = TimingAnalysis::analyze(&graph);
    let cost = DistributionCost::compute(&graph, &timing);

    assert_eq!(cost.len(), 4);
    assert_close(cost.at(0), 1.0);
    assert_close(cost.at(1), 1.5);
    assert_close(cost.at(2), 1.5);
    assert_close(cost.at(3), 1.0);
    assert_close(cost.at(99), 0.0);
    assert_close(cost.total(), 5.0);

    // Step 1 and 2 tie for the peak; the earlier one is reported.
    let (step, peak) = cost.peak();
    assert_eq!(step, 1);
    assert_close(peak, 1.5);

    Ok(())
}

#[test]
fn ties_resolve_to_earliest_step() -> TestResult {
    init_tracing();

    let graph = unbalanced_join();
    let outcome = Scheduler::new(&graph).run();

    // B may sit at 1 or 2, both cost 1.5.
    assert_eq!(outcome.step_of("B")?, 1);
    for (name, step) in [("A", 0), ("C", 1), ("D", 2), ("E", 3)] {
        assert_eq!(outcome.step_of(name)?, step, "step of {name}");
    }

    Ok(())
}

#[test]
fn cheapest_step_wins_inside_window() -> TestResult {
    init_tracing();

    // Chain a..d fixes one op on each of 0..=3. x is free over 0..=3 and the
    // y -> z pair floats inside the same horizon.
    let graph = EdgeListBuilder::new()
        .chain(&["a", "b", "c", "d"])
        .operation("x")
        .edge("y", "z")
        .build();
    let timing = TimingAnalysis::analyze(&graph);
    let cost = DistributionCost::compute(&graph, &timing);

    // x: [0,3] -> 1/4 each; y: [0,2] -> 1/3; z: [1,3] -> 1/3.
    assert_close(cost.at(0), 1.0 + 0.25 + 1.0 / 3.0);
    assert_close(cost.at(1), 1.0 + 0.25 + 2.0 / 3.0);
    assert_close(cost.at(2), 1.0 + 0.25 + 2.0 / 3.0);
    assert_close(cost.at(3), 1.0 + 0.25 + 1.0 / 3.0);

    let schedule = assign_steps(&graph, &timing, &cost);
    let step = |name: &str| schedule.step_of(graph.id_of(name).unwrap());

    // Steps 0 and 3 tie for x.
    assert_eq!(step("x"), 0);
    assert_eq!(step("y"), 0);
    assert_eq!(step("z"), 3);

    Ok(())
}

#[test]
fn frozen_costs_do_not_rebalance() -> TestResult {
    init_tracing();

    // Two identical free pairs next to a critical chain. Every P lands on 0
    // and every Q on 2 because the table is never updated after assignment.
    let graph = EdgeListBuilder::new()
        .chain(&["A", "B", "C"])
        .edge("P1", "Q1")
        .edge("P2", "Q2")
        .build();
    let outcome = Scheduler::new(&graph).run();

    assert_close(outcome.cost().at(0), 2.0);
    assert_close(outcome.cost().at(1), 3.0);
    assert_close(outcome.cost().at(2), 2.0);

    assert_eq!(outcome.step_of("P1")?, 0);
    assert_eq!(outcome.step_of("P2")?, 0);
    assert_eq!(outcome.step_of("Q1")?, 2);
    assert_eq!(outcome.step_of("Q2")?, 2);

    let schedule = outcome.schedule();
    assert_eq!(schedule.load_per_step(), vec![3, 1, 3]);
    assert_eq!(schedule.peak_load(), (0, 3));
    assert_eq!(outcome.names_at(1), vec!["B"]);

    Ok(())
}

#[test]
fn best_step_scans_window_in_order() {
    init_tracing();

    let graph = unbalanced_join();
    let timing = TimingAnalysis::analyze(&graph);
    let cost = DistributionCost::compute(&graph, &timing);

    // Costs are [1.0, 1.5, 1.5, 1.0].
    assert_eq!(best_step(TimingWindow { asap: 0, alap: 3 }, &cost), 0);
    assert_eq!(best_step(TimingWindow { asap: 1, alap: 2 }, &cost), 1);
    assert_eq!(best_step(TimingWindow { asap: 1, alap: 3 }, &cost), 3);
    assert_eq!(best_step(TimingWindow { asap: 2, alap: 2 }, &cost), 2);
}

#[test]
fn critical_operations_keep_their_only_step() -> TestResult {
    init_tracing();

    let graph = DependencyGraph::build(&[("A", "B"), ("A", "C"), ("B", "D"), ("C", "D")])?;
    let outcome = Scheduler::new(&graph).run();

    for name in ["A", "B", "C", "D"] {
        let w = outcome.window_of(name)?;
        assert_eq!(outcome.step_of(name)?, w.asap);
    }
    assert_eq!(outcome.critical_operations(), vec!["A", "B", "C", "D"]);

    Ok(())
}

#[test]
fn empty_graph_has_single_zero_step() -> TestResult {
    init_tracing();

    let edges: [(&str, &str); 0] = [];
    let graph = DependencyGraph::build(&edges)?;
    let outcome = Scheduler::new(&graph).run();

    assert_eq!(outcome.horizon(), 0);
    assert_eq!(outcome.cost().as_slice(), &[0.0]);
    assert!(outcome.schedule().is_empty());
    assert_eq!(outcome.schedule().load_per_step(), vec![0]);

    Ok(())
}
