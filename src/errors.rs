// src/errors.rs

//! Crate-wide error type and result alias.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchedError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Cycle(#[from] CycleError),

    #[error("Operation not found: {0}")]
    OperationNotFound(String),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// The dependency edges do not form a DAG.
///
/// Holds one concrete cycle per strongly connected component that was found.
/// Each cycle lists operation names in edge order, starting from the
/// lexicographically smallest member; the closing edge back to the first
/// name is implied. A self-loop shows up as a one-element cycle.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cycle detected in dependency graph: {}", render_cycles(.cycles))]
pub struct CycleError {
    pub cycles: Vec<Vec<String>>,
}

impl CycleError {
    /// Whether any reported cycle passes through `name`.
    pub fn involves(&self, name: &str) -> bool {
        self.cycles.iter().any(|c| c.iter().any(|n| n == name))
    }
}

/// Render cycles as `A -> B -> A; C -> C`.
fn render_cycles(cycles: &[Vec<String>]) -> String {
    cycles
        .iter()
        .map(|cycle| {
            let mut parts: Vec<&str> = cycle.iter().map(String::as_str).collect();
            if let Some(first) = cycle.first() {
                parts.push(first.as_str());
            }
            parts.join(" -> ")
        })
        .collect::<Vec<_>>()
        .join("; ")
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, SchedError>;
