//! Step and trace data model.
//!
//! A [`StepTrace`] is the contract between the engines and every consumer:
//! an ordered, immutable list of [`Step`] snapshots plus the run's
//! [`Outcome`]. Consumers render a step from its fields alone; nothing here
//! refers back to engine internals.
//!
//! # Invariants
//!
//! - `trace.steps()[i].index == i`
//! - the trace is non-empty and exactly its last step is terminal
//! - the terminal step's negative-cycle flag agrees with the outcome
//! - the terminal step's distances equal the outcome's distances
//!
//! These are checked when a trace is frozen and again when one is
//! deserialized.

use crate::engine::EngineKind;
use crate::error::{Error, Result};
use crate::graph::{EdgeId, Graph, NodeId};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// Best-known distance to a node.
///
/// Unreachable is an explicit variant rather than a sentinel number so it can
/// never leak into numeric displays. Every finite distance orders before
/// `Unreachable`.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Distance {
    Finite(f64),
    Unreachable,
}

impl Distance {
    pub const ZERO: Distance = Distance::Finite(0.0);

    pub fn is_finite(&self) -> bool {
        matches!(self, Distance::Finite(_))
    }

    pub fn value(&self) -> Option<f64> {
        match *self {
            Distance::Finite(v) => Some(v),
            Distance::Unreachable => None,
        }
    }

    /// Distance after following an edge of `weight` from here.
    pub fn extend(&self, weight: f64) -> Distance {
        match *self {
            Distance::Finite(v) => Distance::Finite(v + weight),
            Distance::Unreachable => Distance::Unreachable,
        }
    }

    /// Strict improvement test used by every relaxation.
    pub fn improves_on(&self, current: &Distance) -> bool {
        self < current
    }

    /// Total order used by the heap: finite values by `f64::total_cmp`,
    /// then `Unreachable`.
    pub fn total_cmp(&self, other: &Distance) -> Ordering {
        match (self, other) {
            (Distance::Finite(a), Distance::Finite(b)) => a.total_cmp(b),
            (Distance::Finite(_), Distance::Unreachable) => Ordering::Less,
            (Distance::Unreachable, Distance::Finite(_)) => Ordering::Greater,
            (Distance::Unreachable, Distance::Unreachable) => Ordering::Equal,
        }
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distance::Finite(v) => write!(f, "{}", v),
            Distance::Unreachable => write!(f, "∞"),
        }
    }
}

/// Distance per node, ordered by node id.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Distances(BTreeMap<NodeId, Distance>);

impl Distances {
    /// Source at zero, every other node unreachable.
    pub fn initial(graph: &Graph, source: NodeId) -> Self {
        Self(
            graph
                .node_ids()
                .map(|id| {
                    let d = if id == source {
                        Distance::ZERO
                    } else {
                        Distance::Unreachable
                    };
                    (id, d)
                })
                .collect(),
        )
    }

    /// Distance of `id`; nodes not in the map are unreachable.
    pub fn get(&self, id: NodeId) -> Distance {
        self.0.get(&id).copied().unwrap_or(Distance::Unreachable)
    }

    pub fn set(&mut self, id: NodeId, distance: Distance) {
        self.0.insert(id, distance);
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, Distance)> + '_ {
        self.0.iter().map(|(&id, &d)| (id, d))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn reachable_count(&self) -> usize {
        self.0.values().filter(|d| d.is_finite()).count()
    }
}

impl FromIterator<(NodeId, Distance)> for Distances {
    fn from_iter<I: IntoIterator<Item = (NodeId, Distance)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// One entry of the logical min-heap view.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeapEntry {
    pub id: NodeId,
    pub dist: Distance,
    /// A better distance for `id` has been found since this entry was pushed,
    /// or the node is already finalized; the entry will be skipped when popped.
    pub stale: bool,
}

/// Heap contents sorted by `(dist, id)`; element 0 is popped next.
pub type HeapSnapshot = Vec<HeapEntry>;

/// A single edge relaxation: the edge examined and its effect.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Relaxation {
    pub edge: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    pub weight: f64,
    /// Target distance before the relaxation.
    pub before: Distance,
    /// `dist[source] + weight`.
    pub candidate: Distance,
    /// Target distance after the relaxation.
    pub after: Distance,
    pub improved: bool,
}

/// How the node that currently ends a shortest path was reached.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Predecessor {
    pub node: NodeId,
    pub edge: EdgeId,
}

/// Negative cycle found by the Bellman-Ford verification pass.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NegativeCycle {
    /// Every edge that would still strictly improve its target, in edge order.
    pub improving_edges: Vec<EdgeId>,
    /// Nodes of one negative cycle in traversal order; the last node has an
    /// edge back to the first.
    pub cycle: Vec<NodeId>,
}

/// Events recorded by the Dijkstra engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DijkstraEvent {
    /// About to pop the heap top `node`.
    Examine {
        node: NodeId,
        /// The top entry is stale and will be discarded without relaxing.
        stale: bool,
        heap: HeapSnapshot,
    },
    Relax(Relaxation),
    Finished,
}

/// Events recorded by the Bellman-Ford engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BellmanFordEvent {
    Relax(Relaxation),
    PassComplete {
        pass: usize,
        total_passes: usize,
        improvements: usize,
    },
    Finished {
        negative_cycle: Option<NegativeCycle>,
    },
}

/// Engine-specific part of a step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "engine", rename_all = "snake_case")]
pub enum StepDetail {
    /// Playback sentinel shown before the first step.
    NotStarted,
    Dijkstra {
        /// Finalized nodes in finalization order.
        visited: Vec<NodeId>,
        event: DijkstraEvent,
    },
    BellmanFord {
        /// Relaxation pass number; `|V|` during verification.
        iteration: usize,
        event: BellmanFordEvent,
    },
}

/// One immutable snapshot at a decision point.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub index: usize,
    pub description: String,
    pub distances: Distances,
    pub detail: StepDetail,
}

impl Step {
    /// The "nothing played yet" sentinel.
    pub fn not_started() -> Self {
        Self {
            index: 0,
            description: "Not started".to_string(),
            distances: Distances::default(),
            detail: StepDetail::NotStarted,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        matches!(self.detail, StepDetail::NotStarted)
    }

    /// True for the final step of a run.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self.detail,
            StepDetail::Dijkstra {
                event: DijkstraEvent::Finished,
                ..
            } | StepDetail::BellmanFord {
                event: BellmanFordEvent::Finished { .. },
                ..
            }
        )
    }

    pub fn negative_cycle(&self) -> Option<&NegativeCycle> {
        match &self.detail {
            StepDetail::BellmanFord {
                event: BellmanFordEvent::Finished { negative_cycle },
                ..
            } => negative_cycle.as_ref(),
            _ => None,
        }
    }

    pub fn negative_cycle_detected(&self) -> bool {
        self.negative_cycle().is_some()
    }

    /// The edge under examination, if this is a relaxation step.
    pub fn active_edge(&self) -> Option<&Relaxation> {
        match &self.detail {
            StepDetail::Dijkstra {
                event: DijkstraEvent::Relax(r),
                ..
            }
            | StepDetail::BellmanFord {
                event: BellmanFordEvent::Relax(r),
                ..
            } => Some(r),
            _ => None,
        }
    }

    /// Heap view, present on Dijkstra examine steps.
    pub fn heap(&self) -> Option<&[HeapEntry]> {
        match &self.detail {
            StepDetail::Dijkstra {
                event: DijkstraEvent::Examine { heap, .. },
                ..
            } => Some(heap),
            _ => None,
        }
    }

    pub fn visited(&self) -> Option<&[NodeId]> {
        match &self.detail {
            StepDetail::Dijkstra { visited, .. } => Some(visited),
            _ => None,
        }
    }

    pub fn iteration(&self) -> Option<usize> {
        match &self.detail {
            StepDetail::BellmanFord { iteration, .. } => Some(*iteration),
            _ => None,
        }
    }

    pub fn engine(&self) -> Option<EngineKind> {
        match &self.detail {
            StepDetail::NotStarted => None,
            StepDetail::Dijkstra { .. } => Some(EngineKind::Dijkstra),
            StepDetail::BellmanFord { .. } => Some(EngineKind::BellmanFord),
        }
    }
}

/// Final answer of a normal run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShortestPaths {
    pub source: NodeId,
    pub distances: Distances,
    /// Last edge on the current shortest path to each reached node.
    pub predecessors: BTreeMap<NodeId, Predecessor>,
}

impl ShortestPaths {
    /// Node sequence from the source to `target`, or `None` if unreachable.
    pub fn path_to(&self, target: NodeId) -> Option<Vec<NodeId>> {
        if !self.distances.get(target).is_finite() {
            return None;
        }

        let mut path = vec![target];
        let mut current = target;
        while current != self.source {
            let pred = self.predecessors.get(&current)?;
            current = pred.node;
            path.push(current);
            if path.len() > self.distances.len() {
                return None;
            }
        }
        path.reverse();
        Some(path)
    }

    /// Edge ids along the path to `target`.
    pub fn edges_to(&self, target: NodeId) -> Option<Vec<EdgeId>> {
        let path = self.path_to(target)?;
        path.iter()
            .skip(1)
            .map(|n| self.predecessors.get(n).map(|p| p.edge))
            .collect()
    }
}

/// How a run ended.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Distances are final shortest-path values.
    ShortestPaths(ShortestPaths),
    /// A reachable negative cycle exists; `distances` are the values after the
    /// last relaxation pass and are not shortest paths.
    NegativeCycle {
        cycle: NegativeCycle,
        distances: Distances,
    },
}

impl Outcome {
    pub fn distances(&self) -> &Distances {
        match self {
            Outcome::ShortestPaths(sp) => &sp.distances,
            Outcome::NegativeCycle { distances, .. } => distances,
        }
    }

    pub fn is_negative_cycle(&self) -> bool {
        matches!(self, Outcome::NegativeCycle { .. })
    }

    pub fn shortest_paths(&self) -> Option<&ShortestPaths> {
        match self {
            Outcome::ShortestPaths(sp) => Some(sp),
            Outcome::NegativeCycle { .. } => None,
        }
    }
}

/// Serialized shape of a trace, checked on the way in.
#[derive(Deserialize)]
struct TraceData {
    engine: EngineKind,
    source: NodeId,
    steps: Vec<Step>,
    outcome: Outcome,
}

/// Frozen, ordered record of one engine run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TraceData")]
pub struct StepTrace {
    engine: EngineKind,
    source: NodeId,
    steps: Vec<Step>,
    outcome: Outcome,
}

impl StepTrace {
    /// Freeze a list of steps into a trace, checking the trace invariants.
    pub(crate) fn new(
        engine: EngineKind,
        source: NodeId,
        steps: Vec<Step>,
        outcome: Outcome,
    ) -> Result<Self> {
        let trace = Self {
            engine,
            source,
            steps,
            outcome,
        };
        trace.validate()?;
        Ok(trace)
    }

    fn validate(&self) -> Result<()> {
        let last = self
            .steps
            .last()
            .ok_or_else(|| Error::invalid_trace("trace has no steps"))?;

        for (i, step) in self.steps.iter().enumerate() {
            if step.index != i {
                return Err(Error::invalid_trace(format!(
                    "step at position {} has index {}",
                    i, step.index
                )));
            }
            if step.engine() != Some(self.engine) {
                return Err(Error::invalid_trace(format!(
                    "step {} was not recorded by {}",
                    i, self.engine
                )));
            }
            if step.is_terminal() != (i + 1 == self.steps.len()) {
                return Err(Error::invalid_trace(format!(
                    "terminal step must be last, found one at {}",
                    i
                )));
            }
        }

        if last.negative_cycle_detected() != self.outcome.is_negative_cycle() {
            return Err(Error::invalid_trace(
                "terminal step and outcome disagree about negative cycle",
            ));
        }
        if &last.distances != self.outcome.distances() {
            return Err(Error::invalid_trace(
                "terminal step distances differ from outcome",
            ));
        }
        Ok(())
    }

    pub fn engine(&self) -> EngineKind {
        self.engine
    }

    pub fn source(&self) -> NodeId {
        self.source
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn get(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false for a validated trace.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.steps.iter()
    }

    /// The terminal step.
    pub fn last(&self) -> &Step {
        // Validation guarantees at least one step.
        &self.steps[self.steps.len() - 1]
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    pub fn final_distances(&self) -> &Distances {
        self.outcome.distances()
    }

    pub fn negative_cycle_detected(&self) -> bool {
        self.outcome.is_negative_cycle()
    }
}

impl TryFrom<TraceData> for StepTrace {
    type Error = Error;

    fn try_from(data: TraceData) -> Result<Self> {
        StepTrace::new(data.engine, data.source, data.steps, data.outcome)
    }
}

impl<'a> IntoIterator for &'a StepTrace {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}
