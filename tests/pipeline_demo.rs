use std::error::Error;
use std::path::PathBuf;

use ctrlsched::config::load_and_validate;
use ctrlsched::dag::Scheduler;
use ctrlsched::errors::SchedError;
use ctrlsched::report::{ResourceUsage, ScheduleReport, Summary};
use ctrlsched_test_utils::init_tracing;

type TestResult = Result<(), Box<dyn Error>>;

fn demo(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos").join(name)
}

#[test]
fn mips_pipeline_windows_and_steps() -> TestResult {
    init_tracing();

    let cfg = load_and_validate(demo("mips_pipeline.toml"))?;
    let graph = cfg.build_graph()?;

    assert_eq!(graph.len(), 24);
    assert_eq!(graph.edge_count(), 39);

    let outcome = Scheduler::new(&graph).run();
    assert_eq!(outcome.horizon(), 8);

    // (name, asap, alap, step)
    let expected = [
        ("ALUOp", 5, 5, 5),
        ("ALUSrc", 4, 4, 4),
        ("Branch", 1, 5, 1),
        ("BranchTaken", 7, 7, 7),
        ("BranchZero", 6, 6, 6),
        ("Bubble", 3, 6, 5),
        ("Flush_IF_ID", 8, 8, 8),
        ("FwdA", 3, 3, 3),
        ("FwdB", 3, 3, 3),
        ("FwdC", 3, 8, 7),
        ("ID_EX_Flush", 8, 8, 8),
        ("IF_ID_Write", 4, 8, 7),
        ("ImmSrc", 1, 3, 1),
        ("Instruction_Decode", 0, 0, 0),
        ("Jump", 1, 7, 1),
        ("MemRead", 1, 4, 1),
        ("MemToReg", 1, 1, 1),
        ("MemWrite", 1, 8, 1),
        ("PCWrite", 4, 7, 7),
        ("PC_src", 8, 8, 8),
        ("RegDst", 1, 3, 1),
        ("RegWrite", 2, 2, 2),
        ("Stall", 2, 5, 5),
        ("TargetAddrReady", 6, 7, 7),
    ];

    for (name, asap, alap, step) in expected {
        let w = outcome.window_of(name)?;
        assert_eq!((w.asap, w.alap), (asap, alap), "window of {name}");
        assert_eq!(outcome.step_of(name)?, step, "step of {name}");
    }

    assert_eq!(outcome.critical_operations().len(), 12);
    assert_eq!(outcome.schedule().load_per_step(), vec![1, 7, 1, 2, 1, 3, 1, 5, 3]);

    Ok(())
}

#[test]
fn mips_pipeline_exact_cost_ties_pick_earliest_step() -> TestResult {
    init_tracing();

    let cfg = load_and_validate(demo("mips_pipeline.toml"))?;
    let graph = cfg.build_graph()?;
    let outcome = Scheduler::new(&graph).run();
    let cost = outcome.cost();

    // Steps 1 and 7 both carry 2003/840 in exact arithmetic.
    assert!((cost.at(1) - 2003.0 / 840.0).abs() < 1e-9);
    assert!((cost.at(7) - 2003.0 / 840.0).abs() < 1e-9);
    assert_eq!(outcome.step_of("Jump")?, 1);
    assert_eq!(outcome.step_of("MemWrite")?, 1);

    let (peak_step, peak_cost) = cost.peak();
    assert_eq!(peak_step, 3);
    assert!((peak_cost - 3403.0 / 840.0).abs() < 1e-9);
    assert!((cost.total() - 24.0).abs() < 1e-9);

    Ok(())
}

#[test]
fn mips_pipeline_labels_and_summary() -> TestResult {
    init_tracing();

    let cfg = load_and_validate(demo("mips_pipeline.toml"))?;
    let graph = cfg.build_graph()?;
    let outcome = Scheduler::new(&graph).run();
    let labels = cfg.label_table();

    let report = ScheduleReport::build(&outcome, &labels);
    let decode = report.row("Instruction_Decode")?;
    assert_eq!(decode.stage, "IF");
    assert_eq!(decode.resource, "Decoder");
    assert!(decode.critical);

    // Not in either label table.
    let target = report.row("TargetAddrReady")?;
    assert_eq!(target.resource, "Unknown");
    assert_eq!(target.stage, "?");

    let summary = Summary::compute(&outcome, &labels);
    assert_eq!(summary.operations, 24);
    assert_eq!(summary.dependencies, 39);
    assert_eq!(summary.horizon, 8);
    assert_eq!(summary.critical, 12);
    assert!((summary.average_mobility - 67.0 / 24.0).abs() < 1e-9);
    assert_eq!(summary.peak_load, 7);
    assert_eq!(summary.resource_counts.get("Decoder"), Some(&11));
    assert_eq!(summary.resource_counts.get("Comparator"), Some(&3));
    assert_eq!(summary.resource_counts.get("Logic"), Some(&8));
    assert_eq!(summary.resource_counts.get("Mux"), Some(&1));
    assert_eq!(summary.resource_counts.get("Unknown"), Some(&1));

    let usage = ResourceUsage::compute(&outcome, &labels);
    assert_eq!(usage.count(0, "Decoder"), 1);
    assert_eq!(usage.count(8, "Mux"), 1);
    assert_eq!(usage.count(8, "Logic"), 2);
    assert_eq!(
        usage.resource_types(),
        vec!["Comparator", "Decoder", "Logic", "Mux", "Unknown"]
    );

    Ok(())
}

#[test]
fn stage_prefixed_adjacency_demo_is_cyclic() -> TestResult {
    init_tracing();

    let cfg = load_and_validate(demo("cdg_adjacency.toml"))?;

    // Prefixes are stripped from names and kept as stage labels.
    assert!(cfg.edges.iter().any(|(p, c)| p == "PC_src" && c == "RegWrite"));
    assert!(cfg.operations.iter().any(|o| o == "MemWrite"));
    let labels = cfg.label_table();
    assert_eq!(labels.stage_of("PC_src"), "IF");
    assert_eq!(labels.stage_of("FwdC"), "MEM");
    assert_eq!(labels.stage_of("MemToReg"), "WB");

    match cfg.build_graph() {
        Err(SchedError::Cycle(err)) => {
            assert_eq!(err.cycles.len(), 1);
            assert_eq!(
                err.cycles[0],
                vec!["ALUOp", "BranchZero", "BranchTaken", "ID_EX_Flush"]
            );
        }
        Err(e) => panic!("expected Cycle error, got: {:?}", e),
        Ok(_) => panic!("expected Cycle error, got a graph"),
    }

    Ok(())
}
