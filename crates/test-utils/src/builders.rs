#![allow(dead_code)]

use ctrlsched::config::{ConfigFile, GraphSection, LabelSection, RawConfigFile};
use ctrlsched::dag::DependencyGraph;

/// Builder for an ordered `(producer, consumer)` edge list.
#[derive(Debug, Default, Clone)]
pub struct EdgeListBuilder {
    operations: Vec<String>,
    edges: Vec<(String, String)>,
}

impl EdgeListBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn edge(mut self, producer: &str, consumer: &str) -> Self {
        self.edges.push((producer.to_string(), consumer.to_string()));
        self
    }

    /// Add a chain `a -> b -> c -> ...`.
    pub fn chain(mut self, names: &[&str]) -> Self {
        for pair in names.windows(2) {
            self.edges.push((pair[0].to_string(), pair[1].to_string()));
        }
        self
    }

    pub fn operation(mut self, name: &str) -> Self {
        self.operations.push(name.to_string());
        self
    }

    pub fn edges(&self) -> &[(String, String)] {
        &self.edges
    }

    /// Build the graph, panicking on cycles.
    pub fn build(self) -> DependencyGraph {
        DependencyGraph::build_with_operations(&self.operations, &self.edges)
            .expect("Failed to build acyclic graph from builder")
    }
}

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile {
                graph: GraphSection::default(),
                labels: LabelSection::default(),
            },
        }
    }

    pub fn edge(mut self, producer: &str, consumer: &str) -> Self {
        self.config
            .graph
            .edges
            .push((producer.to_string(), consumer.to_string()));
        self
    }

    pub fn operation(mut self, name: &str) -> Self {
        self.config.graph.operations.push(name.to_string());
        self
    }

    pub fn adjacency(mut self, producer: &str, consumers: &[&str]) -> Self {
        self.config.graph.adjacency.insert(
            producer.to_string(),
            consumers.iter().map(|c| c.to_string()).collect(),
        );
        self
    }

    pub fn stage_prefixed(mut self, val: bool) -> Self {
        self.config.graph.stage_prefixed = val;
        self
    }

    pub fn resource(mut self, op: &str, resource: &str) -> Self {
        self.config
            .labels
            .resource
            .insert(op.to_string(), resource.to_string());
        self
    }

    pub fn stage(mut self, op: &str, stage: &str) -> Self {
        self.config
            .labels
            .stage
            .insert(op.to_string(), stage.to_string());
        self
    }

    pub fn defaults(mut self, resource: &str, stage: &str) -> Self {
        self.config.labels.default_resource = resource.to_string();
        self.config.labels.default_stage = stage.to_string();
        self
    }

    pub fn raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}
