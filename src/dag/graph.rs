// src/dag/graph.rs

use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

use petgraph::Direction;
use petgraph::algo::{tarjan_scc, toposort};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use tracing::{debug, warn};

use crate::errors::{CycleError, Result, SchedError};
use crate::types::OpId;

impl From<NodeIndex> for OpId {
    fn from(ix: NodeIndex) -> Self {
        OpId(ix.index())
    }
}

impl OpId {
    fn node(self) -> NodeIndex {
        NodeIndex::new(self.0)
    }
}

/// Immutable, validated dependency graph of named operations.
///
/// Nodes are the union of all edge endpoints plus any explicitly declared
/// operations. They are inserted in lexicographic name order, so the
/// underlying node index *is* the deterministic tie-break order used by every
/// later pass. Edge direction is producer -> consumer.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    inner: DiGraph<String, ()>,
    /// One topological order, computed once during construction.
    topo: Vec<OpId>,
}

impl DependencyGraph {
    /// Build a graph from an ordered list of `(producer, consumer)` pairs.
    pub fn build<S: AsRef<str>>(edges: &[(S, S)]) -> std::result::Result<Self, CycleError> {
        Self::build_with_operations::<S, S>(&[], edges)
    }

    /// Build a graph from explicit operations plus dependency edges.
    ///
    /// `operations` only matters for operations that appear in no edge;
    /// naming an operation twice (or in both lists) is harmless. Duplicate
    /// edges collapse into one. Fails with every cycle found, one per
    /// strongly connected component.
    pub fn build_with_operations<O, S>(
        operations: &[O],
        edges: &[(S, S)],
    ) -> std::result::Result<Self, CycleError>
    where
        O: AsRef<str>,
        S: AsRef<str>,
    {
        // Phase 1: collect the node set in lexicographic order.
        let mut names: BTreeSet<&str> = operations.iter().map(AsRef::as_ref).collect();
        for (producer, consumer) in edges {
            names.insert(producer.as_ref());
            names.insert(consumer.as_ref());
        }

        let mut inner: DiGraph<String, ()> = DiGraph::with_capacity(names.len(), edges.len());
        let mut index: HashMap<&str, NodeIndex> = HashMap::with_capacity(names.len());
        for name in names {
            index.insert(name, inner.add_node(name.to_string()));
        }

        // Phase 2: adjacency.
        let mut duplicates = 0usize;
        for (producer, consumer) in edges {
            let from = index[producer.as_ref()];
            let to = index[consumer.as_ref()];
            if inner.contains_edge(from, to) {
                warn!(
                    producer = producer.as_ref(),
                    consumer = consumer.as_ref(),
                    "duplicate dependency ignored"
                );
                duplicates += 1;
                continue;
            }
            inner.add_edge(from, to, ());
        }

        let topo = match toposort(&inner, None) {
            Ok(order) => order.into_iter().map(OpId::from).collect(),
            Err(_) => return Err(find_cycles(&inner)),
        };

        debug!(
            operations = inner.node_count(),
            edges = inner.edge_count(),
            duplicates,
            "dependency graph built"
        );

        Ok(Self { inner, topo })
    }

    /// Number of operations.
    pub fn len(&self) -> usize {
        self.inner.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.node_count() == 0
    }

    /// Number of distinct dependency edges.
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// All operations in lexicographic name order.
    pub fn operations(&self) -> impl Iterator<Item = OpId> + '_ {
        self.inner.node_indices().map(OpId::from)
    }

    /// All operation names in lexicographic order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.inner.raw_nodes().iter().map(|n| n.weight.as_str())
    }

    /// Name of an operation.
    ///
    /// Panics if `op` did not come from this graph.
    pub fn name_of(&self, op: OpId) -> &str {
        self.inner[op.node()].as_str()
    }

    /// Look up an operation by exact (case-sensitive) name.
    pub fn id_of(&self, name: &str) -> Result<OpId> {
        self.inner
            .raw_nodes()
            .binary_search_by(|n| n.weight.as_str().cmp(name))
            .map(OpId)
            .map_err(|_| SchedError::OperationNotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.id_of(name).is_ok()
    }

    /// Direct producers of `op`, in name order.
    pub fn predecessors(&self, op: OpId) -> Vec<OpId> {
        self.neighbors(op, Direction::Incoming)
    }

    /// Direct consumers of `op`, in name order.
    pub fn successors(&self, op: OpId) -> Vec<OpId> {
        self.neighbors(op, Direction::Outgoing)
    }

    /// Operations with no predecessors.
    pub fn roots(&self) -> Vec<OpId> {
        self.operations()
            .filter(|&op| self.is_root(op))
            .collect()
    }

    /// Operations with no successors.
    pub fn sinks(&self) -> Vec<OpId> {
        self.operations()
            .filter(|&op| self.is_sink(op))
            .collect()
    }

    pub fn is_root(&self, op: OpId) -> bool {
        self.inner
            .neighbors_directed(op.node(), Direction::Incoming)
            .next()
            .is_none()
    }

    pub fn is_sink(&self, op: OpId) -> bool {
        self.inner
            .neighbors_directed(op.node(), Direction::Outgoing)
            .next()
            .is_none()
    }

    /// A topological order: every producer precedes all of its consumers.
    pub fn topological_order(&self) -> &[OpId] {
        &self.topo
    }

    /// Distinct edges as `(producer, consumer)`, sorted by producer then consumer.
    pub fn edges(&self) -> Vec<(OpId, OpId)> {
        let mut edges: Vec<(OpId, OpId)> = self
            .inner
            .edge_references()
            .map(|e| (OpId::from(e.source()), OpId::from(e.target())))
            .collect();
        edges.sort();
        edges
    }

    fn neighbors(&self, op: OpId, dir: Direction) -> Vec<OpId> {
        let mut out: Vec<OpId> = self
            .inner
            .neighbors_directed(op.node(), dir)
            .map(OpId::from)
            .collect();
        out.sort();
        out
    }
}

/// Collect one concrete cycle per non-trivial strongly connected component.
fn find_cycles(graph: &DiGraph<String, ()>) -> CycleError {
    let mut cycles: Vec<Vec<NodeIndex>> = tarjan_scc(graph)
        .into_iter()
        .filter(|scc| scc.len() > 1 || graph.contains_edge(scc[0], scc[0]))
        .map(|scc| {
            let members: HashSet<NodeIndex> = scc.iter().copied().collect();
            let start = scc.iter().copied().min().unwrap_or(scc[0]);
            cycle_through(graph, &members, start)
        })
        .collect();
    cycles.sort();

    CycleError {
        cycles: cycles
            .into_iter()
            .map(|c| c.into_iter().map(|ix| graph[ix].clone()).collect())
            .collect(),
    }
}

/// Shortest cycle through `start` that stays inside `members` (BFS).
fn cycle_through(
    graph: &DiGraph<String, ()>,
    members: &HashSet<NodeIndex>,
    start: NodeIndex,
) -> Vec<NodeIndex> {
    if graph.contains_edge(start, start) {
        return vec![start];
    }

    let mut parent: HashMap<NodeIndex, NodeIndex> = HashMap::new();
    let mut queue = VecDeque::from([start]);

    while let Some(node) = queue.pop_front() {
        let mut next: Vec<NodeIndex> = graph
            .neighbors(node)
            .filter(|n| members.contains(n))
            .collect();
        next.sort();

        for succ in next {
            if succ == start {
                let mut path = vec![node];
                let mut cur = node;
                while let Some(&p) = parent.get(&cur) {
                    path.push(p);
                    cur = p;
                }
                path.reverse();
                return path;
            }
            if !parent.contains_key(&succ) {
                parent.insert(succ, node);
                queue.push_back(succ);
            }
        }
    }

    // Unreachable for a genuine SCC member.
    vec![start]
}
