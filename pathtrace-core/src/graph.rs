//! Graph model the engines run over.
//!
//! A [`Graph`] is validated once at construction and is read-only afterwards:
//! every edge endpoint exists in the node map, node ids are unique and edge
//! ids are unique. Edges are directed; an undirected connection is two
//! opposing edges that share a weight (see [`GraphBuilder::undirected_edge`]).
//!
//! Edge order is significant. Bellman-Ford relaxes edges in sequence order and
//! Dijkstra walks a node's outgoing edges in sequence order, which is what
//! makes two runs over the same graph produce identical traces.

use crate::error::{Error, Result};
use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Node identifier, unique within a graph.
pub type NodeId = u32;

/// Edge identifier, unique within a graph.
pub type EdgeId = u32;

/// A graph vertex. The label is cosmetic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub label: String,
}

impl Node {
    pub fn new(id: NodeId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
        }
    }
}

/// A directed, weighted edge.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    pub weight: f64,
}

impl Edge {
    pub fn new(id: EdgeId, source: NodeId, target: NodeId, weight: f64) -> Self {
        Self {
            id,
            source,
            target,
            weight,
        }
    }
}

/// Serialized shape of a graph: plain node and edge lists.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GraphData {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

/// Immutable directed graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GraphData", into = "GraphData")]
pub struct Graph {
    nodes: BTreeMap<NodeId, Node>,
    edges: Vec<Edge>,
    /// Outgoing edge positions (into `edges`) per node, in sequence order.
    outgoing: BTreeMap<NodeId, Vec<usize>>,
}

impl Graph {
    /// Build a graph from node and edge lists.
    ///
    /// # Errors
    ///
    /// - [`Error::DuplicateNode`] if two nodes share an id
    /// - [`Error::DuplicateEdge`] if two edges share an id
    /// - [`Error::UnknownNode`] if an edge endpoint is not a node
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Result<Self> {
        let mut node_map = BTreeMap::new();
        for node in nodes {
            let id = node.id;
            if node_map.insert(id, node).is_some() {
                return Err(Error::DuplicateNode { node: id });
            }
        }

        let mut outgoing: BTreeMap<NodeId, Vec<usize>> =
            node_map.keys().map(|&id| (id, Vec::new())).collect();
        let mut edge_ids = HashSet::with_capacity(edges.len());

        for (pos, edge) in edges.iter().enumerate() {
            if !edge_ids.insert(edge.id) {
                return Err(Error::DuplicateEdge { edge: edge.id });
            }
            if !node_map.contains_key(&edge.source) {
                return Err(Error::unknown_node(
                    edge.source,
                    format!("edge {} source", edge.id),
                ));
            }
            if !node_map.contains_key(&edge.target) {
                return Err(Error::unknown_node(
                    edge.target,
                    format!("edge {} target", edge.id),
                ));
            }
            outgoing.entry(edge.source).or_default().push(pos);
        }

        Ok(Self {
            nodes: node_map,
            edges,
            outgoing,
        })
    }

    /// Start building a graph incrementally.
    pub fn builder() -> GraphBuilder {
        GraphBuilder::default()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Nodes in ascending id order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Node ids in ascending order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// Edges in sequence order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    /// Outgoing edges of `node` in sequence order. Empty for unknown nodes.
    pub fn outgoing(&self, node: NodeId) -> impl Iterator<Item = &Edge> {
        self.outgoing
            .get(&node)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .map(move |&pos| &self.edges[pos])
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Display label for a node, falling back to its numeric id.
    pub fn label(&self, id: NodeId) -> String {
        match self.nodes.get(&id) {
            Some(node) if !node.label.is_empty() => node.label.clone(),
            _ => id.to_string(),
        }
    }

    /// Check that `source` names a node of this graph.
    pub fn require_node(&self, source: NodeId, referenced_by: &str) -> Result<()> {
        if self.contains(source) {
            Ok(())
        } else {
            Err(Error::unknown_node(source, referenced_by))
        }
    }

    /// Build a petgraph view of this graph.
    ///
    /// Node weights are node ids, edge weights are the edge weights. Nodes are
    /// inserted in ascending id order and edges in sequence order.
    pub fn to_digraph(&self) -> DiGraphView {
        let mut graph = DiGraph::with_capacity(self.nodes.len(), self.edges.len());
        let mut index = HashMap::with_capacity(self.nodes.len());

        for &id in self.nodes.keys() {
            index.insert(id, graph.add_node(id));
        }
        for edge in &self.edges {
            graph.add_edge(index[&edge.source], index[&edge.target], edge.weight);
        }

        DiGraphView { graph, index }
    }
}

impl TryFrom<GraphData> for Graph {
    type Error = Error;

    fn try_from(data: GraphData) -> Result<Self> {
        Graph::new(data.nodes, data.edges)
    }
}

impl From<Graph> for GraphData {
    fn from(graph: Graph) -> Self {
        GraphData {
            nodes: graph.nodes.into_values().collect(),
            edges: graph.edges,
        }
    }
}

/// A petgraph `DiGraph` built from a [`Graph`], with the id lookup table.
#[derive(Debug, Clone)]
pub struct DiGraphView {
    pub graph: DiGraph<NodeId, f64>,
    pub index: HashMap<NodeId, NodeIndex>,
}

impl DiGraphView {
    pub fn node_index(&self, id: NodeId) -> Option<NodeIndex> {
        self.index.get(&id).copied()
    }
}

/// Incremental graph construction. Validation happens in [`build`](Self::build).
#[derive(Debug, Default, Clone)]
pub struct GraphBuilder {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    next_edge_id: EdgeId,
}

impl GraphBuilder {
    pub fn node(mut self, id: NodeId, label: impl Into<String>) -> Self {
        self.nodes.push(Node::new(id, label));
        self
    }

    /// Add a directed edge with the next sequential edge id.
    pub fn edge(mut self, source: NodeId, target: NodeId, weight: f64) -> Self {
        let id = self.next_edge_id;
        self.push_edge(Edge::new(id, source, target, weight));
        self
    }

    /// Add a directed edge with an explicit id.
    pub fn edge_with_id(mut self, id: EdgeId, source: NodeId, target: NodeId, weight: f64) -> Self {
        self.push_edge(Edge::new(id, source, target, weight));
        self
    }

    /// Add `a -> b` and `b -> a` with the same weight.
    pub fn undirected_edge(self, a: NodeId, b: NodeId, weight: f64) -> Self {
        self.edge(a, b, weight).edge(b, a, weight)
    }

    pub fn build(self) -> Result<Graph> {
        Graph::new(self.nodes, self.edges)
    }

    fn push_edge(&mut self, edge: Edge) {
        self.next_edge_id = self.next_edge_id.max(edge.id.saturating_add(1));
        self.edges.push(edge);
    }
}
