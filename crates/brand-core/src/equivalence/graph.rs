//! Undirected relation graph over lower-cased brand names.

use std::collections::{HashMap, HashSet};

use crate::relation::ParsedRelation;

/// Index of a node in the graph's arena.
pub type NodeId = usize;

/// Arena-backed undirected graph.
///
/// Nodes are stored in first-seen order, which is the order every later
/// pass (component collection, dedup) walks them in.
#[derive(Debug, Clone, Default)]
pub struct RelationGraph {
    names: Vec<String>,
    index: HashMap<String, NodeId>,
    adjacency: Vec<HashSet<NodeId>>,
}

impl RelationGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from parsed relations, primary before its secondaries.
    pub fn from_relations(relations: &[ParsedRelation]) -> Self {
        let mut graph = Self::new();
        for relation in relations {
            let primary = graph.ensure_node(&relation.primary);
            for secondary in &relation.secondaries {
                let secondary = graph.ensure_node(secondary);
                graph.connect(primary, secondary);
            }
        }
        graph
    }

    /// Insert a node if absent and return its id.
    pub fn ensure_node(&mut self, name: &str) -> NodeId {
        if let Some(&id) = self.index.get(name) {
            return id;
        }
        let id = self.names.len();
        self.names.push(name.to_string());
        self.index.insert(name.to_string(), id);
        self.adjacency.push(HashSet::new());
        id
    }

    /// Add an undirected edge.
    pub fn connect(&mut self, a: NodeId, b: NodeId) {
        self.adjacency[a].insert(b);
        self.adjacency[b].insert(a);
    }

    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.index.get(name).copied()
    }

    pub fn name(&self, id: NodeId) -> &str {
        &self.names[id]
    }

    /// Direct neighbours of a node.
    pub fn neighbors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.adjacency[id].iter().copied()
    }

    pub fn are_adjacent(&self, a: NodeId, b: NodeId) -> bool {
        self.adjacency[a].contains(&b)
    }

    /// Node ids in insertion order.
    pub fn node_ids(&self) -> std::ops::Range<NodeId> {
        0..self.names.len()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Every node reachable from `start`, including `start` itself.
    ///
    /// Explicit worklist; no recursion.
    pub fn component(&self, start: NodeId) -> Vec<NodeId> {
        let mut visited = vec![false; self.names.len()];
        let mut stack = vec![start];
        let mut members = Vec::new();
        visited[start] = true;

        while let Some(current) = stack.pop() {
            members.push(current);
            for next in self.neighbors(current) {
                if !visited[next] {
                    visited[next] = true;
                    stack.push(next);
                }
            }
        }

        members
    }

    /// Label every node with a component number in one pass.
    ///
    /// Component numbers are assigned in node insertion order, so the
    /// first node of each component is its lowest-numbered member.
    pub fn component_labels(&self) -> Vec<usize> {
        let mut labels = vec![usize::MAX; self.names.len()];
        let mut next_label = 0;

        for id in self.node_ids() {
            if labels[id] != usize::MAX {
                continue;
            }
            for member in self.component(id) {
                labels[member] = next_label;
            }
            next_label += 1;
        }

        labels
    }
}
