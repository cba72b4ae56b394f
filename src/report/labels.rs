// src/report/labels.rs

//! Resource-type and pipeline-stage labels, keyed by operation name.

use std::collections::HashMap;

use crate::config::model::LabelSection;

/// Resource label for operations missing from the table.
pub const UNKNOWN_RESOURCE: &str = "Unknown";

/// Stage label for operations missing from the table.
pub const UNKNOWN_STAGE: &str = "?";

/// Fixed lookup table of per-operation annotations.
///
/// Missing operations resolve to the configured defaults (`Unknown` / `?`
/// unless overridden), never to an error.
#[derive(Debug, Clone)]
pub struct LabelTable {
    resource: HashMap<String, String>,
    stage: HashMap<String, String>,
    default_resource: String,
    default_stage: String,
}

impl Default for LabelTable {
    fn default() -> Self {
        Self {
            resource: HashMap::new(),
            stage: HashMap::new(),
            default_resource: UNKNOWN_RESOURCE.to_string(),
            default_stage: UNKNOWN_STAGE.to_string(),
        }
    }
}

impl LabelTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_section(section: &LabelSection) -> Self {
        Self {
            resource: section
                .resource
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            stage: section
                .stage
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            default_resource: section.default_resource.clone(),
            default_stage: section.default_stage.clone(),
        }
    }

    pub fn with_resource(mut self, op: &str, resource: &str) -> Self {
        self.resource.insert(op.to_string(), resource.to_string());
        self
    }

    pub fn with_stage(mut self, op: &str, stage: &str) -> Self {
        self.stage.insert(op.to_string(), stage.to_string());
        self
    }

    pub fn resource_of(&self, op: &str) -> &str {
        self.resource
            .get(op)
            .map(String::as_str)
            .unwrap_or(&self.default_resource)
    }

    pub fn stage_of(&self, op: &str) -> &str {
        self.stage
            .get(op)
            .map(String::as_str)
            .unwrap_or(&self.default_stage)
    }
}
