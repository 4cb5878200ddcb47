//! Bellman-Ford with negative-cycle detection.
//!
//! Runs `|V|-1` passes over the edges in sequence order, recording one
//! `Relax` step per edge and one `PassComplete` step per pass, then a
//! verification pass at iteration `|V|`. The verification pass works on a
//! scratch copy of the distances: improvements propagate inside the copy so
//! every edge of the cycle shows up, while the recorded distances stay at
//! their post-pass values. A detected cycle ends the trace with
//! `negative_cycle` set; it is an outcome, not an error.
//!
//! Complexity: O(V * E).

use super::dijkstra::describe_relaxation;
use super::{validate, Engine, EngineKind};
use crate::error::{Error, Result};
use crate::graph::{Graph, NodeId};
use crate::recorder::TraceRecorder;
use crate::step::{
    BellmanFordEvent, Distances, NegativeCycle, Outcome, Predecessor, Relaxation, ShortestPaths,
    StepDetail, StepTrace,
};
use std::collections::BTreeMap;

/// Bellman-Ford engine. Accepts negative weights.
#[derive(Debug, Clone, Copy, Default)]
pub struct BellmanFord {
    early_stop: bool,
}

impl BellmanFord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop after the first pass that improves nothing. The trace still has
    /// exactly one `PassComplete` step per pass that actually ran.
    pub fn with_early_stop(mut self, early_stop: bool) -> Self {
        self.early_stop = early_stop;
        self
    }

    pub fn early_stop(&self) -> bool {
        self.early_stop
    }
}

impl Engine for BellmanFord {
    fn kind(&self) -> EngineKind {
        EngineKind::BellmanFord
    }

    fn run_cancellable(
        &self,
        graph: &Graph,
        source: NodeId,
        abort: &mut dyn FnMut() -> bool,
    ) -> Result<StepTrace> {
        validate(graph, source, EngineKind::BellmanFord)?;

        let mut recorder = TraceRecorder::new(EngineKind::BellmanFord, source);
        let mut distances = Distances::initial(graph, source);
        let mut predecessors = BTreeMap::new();
        let node_count = graph.node_count();
        let total_passes = node_count.saturating_sub(1);

        for pass in 1..=total_passes {
            if abort() {
                tracing::debug!(pass, steps = recorder.len(), "bellman-ford run cancelled");
                return Err(Error::Cancelled {
                    steps_recorded: recorder.len(),
                });
            }

            let mut improvements = 0;
            for edge in graph.edges() {
                let base = distances.get(edge.source);
                let before = distances.get(edge.target);
                let candidate = base.extend(edge.weight);
                let improved = candidate.improves_on(&before);
                if improved {
                    improvements += 1;
                    distances.set(edge.target, candidate);
                    predecessors.insert(
                        edge.target,
                        Predecessor {
                            node: edge.source,
                            edge: edge.id,
                        },
                    );
                }

                let relaxation = Relaxation {
                    edge: edge.id,
                    source: edge.source,
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
                    StepDetail::BellmanFord {
                        iteration: pass,
                        event: BellmanFordEvent::Relax(relaxation),
                    },
                );
            }

            recorder.record(
                format!(
                    "Pass {} of {} complete: {} improvement{}",
                    pass,
                    total_passes,
                    improvements,
                    if improvements == 1 { "" } else { "s" }
                ),
                &distances,
                StepDetail::BellmanFord {
                    iteration: pass,
                    event: BellmanFordEvent::PassComplete {
                        pass,
                        total_passes,
                        improvements,
                    },
                },
            );

            if self.early_stop && improvements == 0 {
                tracing::debug!(pass, total_passes, "no improvements, stopping early");
                break;
            }
        }

        if abort() {
            return Err(Error::Cancelled {
                steps_recorded: recorder.len(),
            });
        }

        let negative_cycle = verify(graph, &distances, &predecessors);
        let description = match &negative_cycle {
            Some(cycle) => format!(
                "Verification pass: negative cycle detected via {}",
                describe_edges(graph, &cycle.improving_edges)
            ),
            None => "Verification pass: no edge improves, distances are final".to_string(),
        };
        recorder.record(
            description,
            &distances,
            StepDetail::BellmanFord {
                iteration: node_count,
                event: BellmanFordEvent::Finished {
                    negative_cycle: negative_cycle.clone(),
                },
            },
        );

        let outcome = match negative_cycle {
            Some(cycle) => {
                tracing::warn!(
                    source,
                    improving_edges = ?cycle.improving_edges,
                    cycle = ?cycle.cycle,
                    "negative cycle reachable from source"
                );
                Outcome::NegativeCycle { cycle, distances }
            }
            None => {
                tracing::info!(
                    engine = "bellman-ford",
                    source,
                    steps = recorder.len(),
                    reachable = distances.reachable_count(),
                    "run complete"
                );
                Outcome::ShortestPaths(ShortestPaths {
                    source,
                    distances,
                    predecessors,
                })
            }
        };

        recorder.finish(outcome)
    }
}

/// One more pass over a scratch copy. Returns the improving edges and one
/// extracted cycle, or `None` when nothing improves.
fn verify(
    graph: &Graph,
    distances: &Distances,
    predecessors: &BTreeMap<NodeId, Predecessor>,
) -> Option<NegativeCycle> {
    let mut scratch = distances.clone();
    let mut preds = predecessors.clone();
    let mut improving_edges = Vec::new();
    let mut first_target = None;

    for edge in graph.edges() {
        let candidate = scratch.get(edge.source).extend(edge.weight);
        if candidate.improves_on(&scratch.get(edge.target)) {
            improving_edges.push(edge.id);
            first_target.get_or_insert(edge.target);
            scratch.set(edge.target, candidate);
            preds.insert(
                edge.target,
                Predecessor {
                    node: edge.source,
                    edge: edge.id,
                },
            );
        }
    }

    let start = first_target?;
    Some(NegativeCycle {
        improving_edges,
        cycle: extract_cycle(start, &preds, graph.node_count()).unwrap_or_default(),
    })
}

/// Walk predecessors `node_count` times to land inside the cycle, then
/// collect it in forward order.
fn extract_cycle(
    start: NodeId,
    preds: &BTreeMap<NodeId, Predecessor>,
    node_count: usize,
) -> Option<Vec<NodeId>> {
    let mut on_cycle = start;
    for _ in 0..node_count {
        on_cycle = preds.get(&on_cycle)?.node;
    }

    let mut cycle = vec![on_cycle];
    let mut current = preds.get(&on_cycle)?.node;
    while current != on_cycle {
        if cycle.len() > node_count {
            return None;
        }
        cycle.push(current);
        current = preds.get(&current)?.node;
    }
    cycle.reverse();
    Some(cycle)
}

fn describe_edges(graph: &Graph, edges: &[crate::graph::EdgeId]) -> String {
    edges
        .iter()
        .filter_map(|&id| graph.edge(id))
        .map(|e| format!("{} → {}", graph.label(e.source), graph.label(e.target)))
        .collect::<Vec<_>>()
        .join(", ")
}
