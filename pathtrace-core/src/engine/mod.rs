//! Shortest-path engines that record their execution.
//!
//! Every engine is a pure function from `(Graph, source)` to a
//! [`StepTrace`]: input is validated before the first step is recorded, the
//! run is synchronous, and the only output is the finished trace or an
//! [`Error`]. Consumers replay the trace afterwards through a
//! [`PlaybackController`](crate::PlaybackController); they never observe a
//! run in progress.
//!
//! # Cancellation
//!
//! [`Engine::run_cancellable`] polls a caller-supplied abort check once per
//! outer iteration (per heap pop for Dijkstra, per relaxation pass for
//! Bellman-Ford). When it returns `true` the run stops with
//! [`Error::Cancelled`] and the partial recording is discarded.

mod bellman_ford;
mod dijkstra;
mod heap;

pub use bellman_ford::BellmanFord;
pub use dijkstra::Dijkstra;

use crate::error::{Error, Result};
use crate::graph::{Graph, NodeId};
use crate::step::StepTrace;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which algorithm produced a trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EngineKind {
    Dijkstra,
    BellmanFord,
}

impl EngineKind {
    pub const ALL: [EngineKind; 2] = [EngineKind::Dijkstra, EngineKind::BellmanFord];

    pub fn name(&self) -> &'static str {
        match self {
            EngineKind::Dijkstra => "dijkstra",
            EngineKind::BellmanFord => "bellman-ford",
        }
    }

    /// Whether the engine accepts negative edge weights.
    pub fn allows_negative_weights(&self) -> bool {
        matches!(self, EngineKind::BellmanFord)
    }

    /// Construct the engine for this kind.
    pub fn engine(&self, options: EngineOptions) -> Box<dyn Engine> {
        match self {
            EngineKind::Dijkstra => Box::new(Dijkstra::new()),
            EngineKind::BellmanFord => Box::new(BellmanFord::new().with_early_stop(options.early_stop)),
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EngineKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dijkstra" => Ok(EngineKind::Dijkstra),
            "bellman-ford" | "bellman_ford" | "bellmanford" | "bf" => Ok(EngineKind::BellmanFord),
            _ => Err(format!("Unknown engine: '{}'", s)),
        }
    }
}

/// Tunables shared by [`EngineKind::engine`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EngineOptions {
    /// Bellman-Ford: stop after a pass with no improvements.
    pub early_stop: bool,
}

/// A graph algorithm that records a replayable trace.
pub trait Engine {
    fn kind(&self) -> EngineKind;

    /// Run to completion, polling `abort` once per outer iteration.
    ///
    /// # Errors
    ///
    /// - validation errors ([`Error::UnknownNode`], [`Error::InvalidWeight`],
    ///   [`Error::NonFiniteWeight`]) before any step is recorded
    /// - [`Error::Cancelled`] if `abort` returned `true`
    fn run_cancellable(
        &self,
        graph: &Graph,
        source: NodeId,
        abort: &mut dyn FnMut() -> bool,
    ) -> Result<StepTrace>;

    /// Run to completion.
    fn run(&self, graph: &Graph, source: NodeId) -> Result<StepTrace> {
        self.run_cancellable(graph, source, &mut || false)
    }
}

/// Run the engine of `kind` over `graph` from `source`.
pub fn run(
    kind: EngineKind,
    graph: &Graph,
    source: NodeId,
    options: EngineOptions,
) -> Result<StepTrace> {
    kind.engine(options).run(graph, source)
}

/// Shared precondition checks, performed before any step is recorded.
fn validate(graph: &Graph, source: NodeId, kind: EngineKind) -> Result<()> {
    graph.require_node(source, "source")?;

    for edge in graph.edges() {
        if !edge.weight.is_finite() {
            return Err(Error::NonFiniteWeight {
                edge: edge.id,
                weight: edge.weight,
            });
        }
        if edge.weight < 0.0 && !kind.allows_negative_weights() {
            return Err(Error::InvalidWeight {
                edge: edge.id,
                weight: edge.weight,
            });
        }
    }

    // A pass relaxes each edge once, and no run records more than |V| + 1
    // passes' worth of chained relaxations.
    let total: f64 = graph.edges().iter().map(|e| e.weight.abs()).sum();
    let bound = total * (graph.node_count() as f64 + 1.0);
    if !bound.is_finite() {
        return Err(Error::WeightOverflow { bound });
    }

    tracing::debug!(
        engine = %kind,
        source,
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "input validated"
    );
    Ok(())
}
