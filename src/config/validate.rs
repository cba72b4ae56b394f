// src/config/validate.rs

use std::collections::BTreeMap;

use tracing::warn;

use crate::config::model::{ConfigFile, GraphSection, LabelSection, RawConfigFile};
use crate::errors::{Result, SchedError};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = SchedError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;

        let RawConfigFile { graph, mut labels } = raw;
        let (edges, operations) = flatten_graph(&graph, &mut labels.stage)?;
        warn_unknown_labels(&edges, &operations, &labels);

        Ok(ConfigFile::new_unchecked(edges, operations, labels))
    }
}

/// Run the structural checks without building anything.
pub fn validate_config(cfg: &RawConfigFile) -> Result<()> {
    validate_raw_config(cfg)
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    ensure_has_operations(&cfg.graph)?;
    validate_names(&cfg.graph)?;
    validate_stage_prefixes(&cfg.graph)?;
    Ok(())
}

fn ensure_has_operations(graph: &GraphSection) -> Result<()> {
    if graph.edges.is_empty() && graph.operations.is_empty() && graph.adjacency.is_empty() {
        return Err(SchedError::Config(
            "config must declare at least one edge or operation under [graph]".to_string(),
        ));
    }
    Ok(())
}

fn validate_names(graph: &GraphSection) -> Result<()> {
    for (producer, consumer) in graph.edges.iter() {
        if is_blank(producer) || is_blank(consumer) {
            return Err(SchedError::Config(format!(
                "[graph].edges contains a blank operation name in ({:?}, {:?})",
                producer, consumer
            )));
        }
    }

    for name in graph.operations.iter() {
        if is_blank(name) {
            return Err(SchedError::Config(
                "[graph].operations contains a blank operation name".to_string(),
            ));
        }
    }

    for (producer, consumers) in graph.adjacency.iter() {
        if is_blank(producer) {
            return Err(SchedError::Config(
                "[graph.adjacency] contains a blank producer name".to_string(),
            ));
        }
        if consumers.iter().any(|c| is_blank(c)) {
            return Err(SchedError::Config(format!(
                "[graph.adjacency] entry '{}' contains a blank consumer name",
                producer
            )));
        }
    }

    Ok(())
}

fn validate_stage_prefixes(graph: &GraphSection) -> Result<()> {
    if !graph.stage_prefixed {
        return Ok(());
    }

    for (producer, consumers) in graph.adjacency.iter() {
        for name in std::iter::once(producer).chain(consumers.iter()) {
            if split_stage(name).is_none() {
                return Err(SchedError::Config(format!(
                    "[graph.adjacency] name '{}' must have the form STAGE:name when stage_prefixed = true",
                    name
                )));
            }
        }
    }

    Ok(())
}

/// Merge `edges` and `adjacency` into one ordered edge list, plus the
/// explicit operation list.
///
/// An adjacency producer with no consumers is kept as an operation. With
/// `stage_prefixed`, the stage part of each adjacency name is recorded in
/// `stages` unless the operation already has an explicit stage label.
fn flatten_graph(
    graph: &GraphSection,
    stages: &mut BTreeMap<String, String>,
) -> Result<(Vec<(String, String)>, Vec<String>)> {
    let mut edges = graph.edges.clone();
    let mut operations = graph.operations.clone();
    let mut hints: BTreeMap<String, String> = BTreeMap::new();

    for (producer, consumers) in graph.adjacency.iter() {
        let producer = resolve_name(graph, producer, &mut hints)?;
        if consumers.is_empty() {
            operations.push(producer.clone());
        }
        for consumer in consumers {
            let consumer = resolve_name(graph, consumer, &mut hints)?;
            edges.push((producer.clone(), consumer));
        }
    }

    for (name, stage) in hints {
        stages.entry(name).or_insert(stage);
    }

    Ok((edges, operations))
}

fn resolve_name(
    graph: &GraphSection,
    raw: &str,
    hints: &mut BTreeMap<String, String>,
) -> Result<String> {
    if !graph.stage_prefixed {
        return Ok(raw.to_string());
    }

    let (stage, name) = split_stage(raw).ok_or_else(|| {
        SchedError::Config(format!("adjacency name '{}' has no STAGE: prefix", raw))
    })?;

    match hints.get(name) {
        Some(existing) if existing != stage => {
            warn!(
                operation = %name,
                first = %existing,
                ignored = %stage,
                "operation appears with conflicting stage prefixes; keeping the first"
            );
        }
        Some(_) => {}
        None => {
            hints.insert(name.to_string(), stage.to_string());
        }
    }

    Ok(name.to_string())
}

/// `"IF:PC_src"` -> `Some(("IF", "PC_src"))`.
fn split_stage(raw: &str) -> Option<(&str, &str)> {
    let (stage, name) = raw.split_once(':')?;
    if is_blank(stage) || is_blank(name) {
        return None;
    }
    Some((stage, name))
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

fn warn_unknown_labels(edges: &[(String, String)], operations: &[String], labels: &LabelSection) {
    let known = |name: &str| {
        operations.iter().any(|o| o == name)
            || edges.iter().any(|(p, c)| p == name || c == name)
    };

    for name in labels.resource.keys().chain(labels.stage.keys()) {
        if !known(name) {
            warn!(operation = %name, "label for operation not in the graph; ignoring");
        }
    }
}
