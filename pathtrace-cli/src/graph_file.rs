//! Graph files on disk.
//!
//! A graph file is the serialized form of [`Graph`]:
//!
//! ```json
//! {
//!   "nodes": [{"id": 0, "label": "A"}, {"id": 1, "label": "B"}],
//!   "edges": [{"id": 0, "source": 0, "target": 1, "weight": 1.5}]
//! }
//! ```

use anyhow::{bail, Context, Result};
use pathtrace_core::{Graph, NodeId};
use std::path::Path;

/// Read and validate a graph file.
pub fn load(path: &Path) -> Result<Graph> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read graph file {}", path.display()))?;
    let graph: Graph = serde_json::from_str(&content)
        .with_context(|| format!("Invalid graph file {}", path.display()))?;
    tracing::debug!(
        path = %path.display(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "graph loaded"
    );
    Ok(graph)
}

/// Resolve a node given on the command line, by id first and then by label.
pub fn resolve_node(graph: &Graph, query: &str) -> Result<NodeId> {
    if let Ok(id) = query.parse::<NodeId>() {
        if graph.contains(id) {
            return Ok(id);
        }
    }

    let mut matches = graph.nodes().filter(|n| n.label == query);
    match (matches.next(), matches.next()) {
        (Some(node), None) => Ok(node.id),
        (Some(_), Some(_)) => bail!("Label '{}' matches more than one node, use the id", query),
        (None, _) => bail!("No node with id or label '{}'", query),
    }
}
