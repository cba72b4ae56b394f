// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::dag::DependencyGraph;
use crate::errors::Result;
use crate::report::labels::{LabelTable, UNKNOWN_RESOURCE, UNKNOWN_STAGE};

/// Configuration as read from a TOML file, before validation.
///
/// ```toml
/// [graph]
/// edges = [["Instruction_Decode", "MemRead"], ["MemRead", "Stall"]]
///
/// [labels.resource]
/// Instruction_Decode = "Decoder"
///
/// [labels.stage]
/// Instruction_Decode = "IF"
/// ```
///
/// All sections are optional as far as serde is concerned; validation then
/// requires at least one operation.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RawConfigFile {
    /// Dependency structure from `[graph]`.
    #[serde(default)]
    pub graph: GraphSection,

    /// Resource / stage annotations from `[labels]`.
    #[serde(default)]
    pub labels: LabelSection,
}

/// Validated configuration.
///
/// Only constructed through `TryFrom<RawConfigFile>`, which also resolves the
/// adjacency form and any `STAGE:name` prefixes into a flat edge list.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    /// Ordered `(producer, consumer)` pairs: `graph.edges` first, then the
    /// adjacency entries in key order.
    pub edges: Vec<(String, String)>,

    /// Explicitly declared operations (may include ones with no edges).
    pub operations: Vec<String>,

    /// Labels, including stage hints taken from prefixed adjacency keys.
    pub labels: LabelSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(
        edges: Vec<(String, String)>,
        operations: Vec<String>,
        labels: LabelSection,
    ) -> Self {
        Self {
            edges,
            operations,
            labels,
        }
    }

    /// Build the dependency graph described by this config.
    pub fn build_graph(&self) -> Result<DependencyGraph> {
        let graph = DependencyGraph::build_with_operations(&self.operations, &self.edges)?;
        Ok(graph)
    }

    /// Lookup table for resource / stage labels.
    pub fn label_table(&self) -> LabelTable {
        LabelTable::from_section(&self.labels)
    }
}

/// `[graph]` section.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct GraphSection {
    /// `edges = [["A", "B"], ...]`, producer first.
    #[serde(default)]
    pub edges: Vec<(String, String)>,

    /// Operations to include even if no edge mentions them.
    #[serde(default)]
    pub operations: Vec<String>,

    /// `[graph.adjacency]`: producer -> consumers.
    #[serde(default)]
    pub adjacency: BTreeMap<String, Vec<String>>,

    /// If true, adjacency names are written `STAGE:name`; the prefix becomes
    /// the operation's stage label and is stripped from the name.
    ///
    /// Has no effect on `edges` or `operations`.
    #[serde(default)]
    pub stage_prefixed: bool,
}

/// `[labels]` section.
///
/// Labels never influence scheduling; they are joined onto the results at
/// reporting time. Operations without a label get the defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct LabelSection {
    #[serde(default = "default_resource")]
    pub default_resource: String,

    #[serde(default = "default_stage")]
    pub default_stage: String,

    /// `[labels.resource]`: operation -> resource type.
    #[serde(default)]
    pub resource: BTreeMap<String, String>,

    /// `[labels.stage]`: operation -> pipeline stage.
    #[serde(default)]
    pub stage: BTreeMap<String, String>,
}

fn default_resource() -> String {
    UNKNOWN_RESOURCE.to_string()
}

fn default_stage() -> String {
    UNKNOWN_STAGE.to_string()
}

impl Default for LabelSection {
    fn default() -> Self {
        Self {
            default_resource: default_resource(),
            default_stage: default_stage(),
            resource: BTreeMap::new(),
            stage: BTreeMap::new(),
        }
    }
}
