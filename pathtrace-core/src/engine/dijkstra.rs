//! Dijkstra's algorithm with a recorded heap.
//!
//! All nodes enter the heap up front (source at 0, the rest unreachable).
//! Every iteration records an `Examine` step showing the heap before the pop.
//! A popped node that is already visited is discarded without relaxation
//! steps; otherwise it is finalized and one `Relax` step is recorded per
//! outgoing edge to an unvisited target, in edge sequence order.
//!
//! Complexity: O((V + E) log V) heap work, plus the cost of copying the
//! distance table into every step.

use super::heap::MinHeap;
use super::{validate, Engine, EngineKind};
use crate::error::{Error, Result};
use crate::graph::{Graph, NodeId};
use crate::recorder::TraceRecorder;
use crate::step::{
    DijkstraEvent, Distance, Distances, Outcome, Predecessor, Relaxation, ShortestPaths, StepDetail,
    StepTrace,
};
use std::collections::{BTreeMap, HashSet};

/// Dijkstra engine. Requires non-negative edge weights.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dijkstra;

impl Dijkstra {
    pub fn new() -> Self {
        Self
    }
}

fn detail(visited: &[NodeId], event: DijkstraEvent) -> StepDetail {
    StepDetail::Dijkstra {
        visited: visited.to_vec(),
        event,
    }
}

impl Engine for Dijkstra {
    fn kind(&self) -> EngineKind {
        EngineKind::Dijkstra
    }

    fn run_cancellable(
        &self,
        graph: &Graph,
        source: NodeId,
        abort: &mut dyn FnMut() -> bool,
    ) -> Result<StepTrace> {
        validate(graph, source, EngineKind::Dijkstra)?;

        let mut recorder = TraceRecorder::new(EngineKind::Dijkstra, source);
        let mut distances = Distances::initial(graph, source);
        let mut predecessors = BTreeMap::new();
        let mut visited: Vec<NodeId> = Vec::with_capacity(graph.node_count());
        let mut visited_set: HashSet<NodeId> = HashSet::with_capacity(graph.node_count());

        let mut heap = MinHeap::new();
        for (id, dist) in distances.iter() {
            heap.push(id, dist);
        }

        while visited.len() < graph.node_count() {
            if abort() {
                tracing::debug!(steps = recorder.len(), "dijkstra run cancelled");
                return Err(Error::Cancelled {
                    steps_recorded: recorder.len(),
                });
            }

            let Some((node, dist)) = heap.peek() else {
                break;
            };
            let stale = visited_set.contains(&node);
            let snapshot = heap.snapshot(&distances, &visited_set);
            let description = if stale {
                format!(
                    "Discard stale heap entry {} ({}): already visited",
                    graph.label(node),
                    dist
                )
            } else {
                format!("Examine heap top {} ({})", graph.label(node), dist)
            };
            recorder.record(
                description,
                &distances,
                detail(
                    &visited,
                    DijkstraEvent::Examine {
                        node,
                        stale,
                        heap: snapshot,
                    },
                ),
            );

            heap.pop();
            if stale {
                continue;
            }

            visited.push(node);
            visited_set.insert(node);
            let base = distances.get(node);
            tracing::trace!(node, %base, heap = heap.len(), "node finalized");

            for edge in graph.outgoing(node) {
                if visited_set.contains(&edge.target) {
                    continue;
                }

                let before = distances.get(edge.target);
                let candidate = base.extend(edge.weight);
                let improved = candidate.improves_on(&before);
                if improved {
                    distances.set(edge.target, candidate);
                    heap.push(edge.target, candidate);
                    predecessors.insert(
                        edge.target,
                        Predecessor {
                            node,
                            edge: edge.id,
                        },
                    );
                }

                let relaxation = Relaxation {
                    edge: edge.id,
                    source: node,
                    target: edge.target,
                    weight: edge.weight,
                    before,
                    candidate,
                    after: distances.get(edge.target),
                    improved,
                };
                recorder.record(
                    describe_relaxation(graph, &relaxation, base),
                    &distances,
                    detail(&visited, DijkstraEvent::Relax(relaxation)),
                );
            }
        }

        let reachable = distances.reachable_count();
        recorder.record(
            format!(
                "Finished: {} of {} nodes reachable from {}",
                reachable,
                graph.node_count(),
                graph.label(source)
            ),
            &distances,
            detail(&visited, DijkstraEvent::Finished),
        );

        tracing::info!(
            engine = "dijkstra",
            source,
            steps = recorder.len(),
            reachable,
            "run complete"
        );

        recorder.finish(Outcome::ShortestPaths(ShortestPaths {
            source,
            distances,
            predecessors,
        }))
    }
}

/// "Relax A → B: 0 + 1 = 1 < ∞, update B" style label shared by both engines.
pub(super) fn describe_relaxation(
    graph: &Graph,
    r: &Relaxation,
    base: Distance,
) -> String {
    let (from, to) = (graph.label(r.source), graph.label(r.target));
    if r.improved {
        format!(
            "Relax {} → {}: {} + {} = {} < {}, update {}",
            from, to, base, r.weight, r.candidate, r.before, to
        )
    } else {
        format!(
            "Relax {} → {}: {} + {} = {} ≥ {}, keep",
            from, to, base, r.weight, r.candidate, r.before
        )
    }
}
