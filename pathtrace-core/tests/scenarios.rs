//! End-to-end scenarios and properties for the recorded engines.

use pathtrace_core::exporter::json::{export, ExportConfig};
use pathtrace_core::{
    run, BellmanFord, BellmanFordEvent, Dijkstra, Distance, Engine, EngineKind, EngineOptions,
    Graph, NodeId, PlaybackController, StepDetail, StepTrace,
};
use proptest::prelude::*;

const A: NodeId = 0;
const B: NodeId = 1;
const C: NodeId = 2;
const D: NodeId = 3;

fn graph(labels: &[&str], edges: &[(NodeId, NodeId, f64)]) -> Graph {
    let mut builder = Graph::builder();
    for (id, label) in labels.iter().enumerate() {
        builder = builder.node(id as NodeId, *label);
    }
    for &(s, t, w) in edges {
        builder = builder.edge(s, t, w);
    }
    builder.build().unwrap()
}

fn dijkstra_scenario() -> Graph {
    graph(
        &["A", "B", "C", "D"],
        &[(A, B, 1.0), (A, C, 4.0), (B, C, 2.0), (B, D, 5.0), (C, D, 1.0)],
    )
}

fn finite(v: f64) -> Distance {
    Distance::Finite(v)
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn dijkstra_scenario_final_distances_and_heap() {
    let trace = Dijkstra::new().run(&dijkstra_scenario(), A).unwrap();
    let d = trace.final_distances();
    assert_eq!(
        [d.get(A), d.get(B), d.get(C), d.get(D)],
        [finite(0.0), finite(1.0), finite(3.0), finite(4.0)]
    );

    // The step where C is popped shows C on top at 3.
    let pop_c = trace
        .iter()
        .find(|s| {
            s.heap()
                .and_then(|h| h.first())
                .is_some_and(|e| e.id == C && !e.stale)
        })
        .unwrap();
    let top = pop_c.heap().unwrap()[0];
    assert_eq!(top.dist, finite(3.0));
    assert!(pop_c.description.starts_with("Examine heap top C"));
}

#[test]
fn bellman_ford_scenario_without_cycle() {
    let g = graph(&["A", "B", "C"], &[(A, B, 4.0), (A, C, 5.0), (B, C, -2.0)]);
    let trace = BellmanFord::new().run(&g, A).unwrap();
    let d = trace.final_distances();
    assert_eq!([d.get(A), d.get(B), d.get(C)], [finite(0.0), finite(4.0), finite(2.0)]);
    assert!(!trace.last().negative_cycle_detected());

    let passes = trace
        .iter()
        .filter(|s| {
            matches!(
                s.detail,
                StepDetail::BellmanFord {
                    event: BellmanFordEvent::PassComplete { .. },
                    ..
                }
            )
        })
        .count();
    assert_eq!(passes, 2);
}

#[test]
fn bellman_ford_scenario_with_cycle() {
    let g = graph(&["A", "B", "C"], &[(A, B, 1.0), (B, C, -3.0), (C, B, 1.0)]);
    let trace = BellmanFord::new().run(&g, A).unwrap();
    let last = trace.last();
    assert!(last.negative_cycle_detected());

    let cycle = last.negative_cycle().unwrap();
    let c_to_b = g
        .edges()
        .iter()
        .find(|e| e.source == C && e.target == B)
        .unwrap()
        .id;
    assert!(cycle.improving_edges.contains(&c_to_b));

    let mut members = cycle.cycle.clone();
    members.sort();
    assert_eq!(members, vec![B, C]);
    assert!(trace.outcome().is_negative_cycle());
}

// ============================================================================
// Determinism and playback
// ============================================================================

#[test]
fn identical_runs_serialize_identically() {
    let g = dijkstra_scenario();
    for kind in EngineKind::ALL {
        let first = run(kind, &g, A, EngineOptions::default()).unwrap();
        let second = run(kind, &g, A, EngineOptions::default()).unwrap();
        let config = ExportConfig::default();
        assert_eq!(export(&first, &config).unwrap(), export(&second, &config).unwrap());
    }
}

#[test]
fn equal_distance_ties_pop_lower_id_first() {
    let g = graph(&["S", "X", "Y"], &[(A, C, 2.0), (A, B, 2.0)]);
    let trace = Dijkstra::new().run(&g, A).unwrap();
    assert_eq!(trace.last().visited().unwrap(), &[A, B, C]);
}

#[test]
fn playback_seek_is_idempotent() {
    let trace = Dijkstra::new().run(&dijkstra_scenario(), A).unwrap();
    let mut pc = PlaybackController::new(trace);
    for i in 0..pc.len() {
        let once = pc.seek(i).unwrap().clone();
        let twice = pc.seek(i).unwrap().clone();
        assert_eq!(once, twice);
        assert_eq!(once, pc.trace().steps()[i]);
    }
}

#[test]
fn playback_boundaries_are_noops() {
    let trace = Dijkstra::new().run(&dijkstra_scenario(), A).unwrap();
    let mut pc = PlaybackController::new(trace);

    let first = pc.seek(0).unwrap().clone();
    assert_eq!(pc.previous(), &first);
    assert_eq!(pc.position(), Some(0));

    let last = pc.seek_end().clone();
    let end = pc.len() - 1;
    assert_eq!(pc.next(), &last);
    assert_eq!(pc.position(), Some(end));
    assert!(pc.current().is_terminal());
}

#[test]
fn playback_walks_whole_trace() {
    let trace = BellmanFord::new()
        .run(&graph(&["A", "B"], &[(A, B, -1.0)]), A)
        .unwrap();
    let expected: Vec<usize> = (0..trace.len()).collect();
    let mut pc = PlaybackController::new(trace);
    let mut seen = Vec::new();
    while !pc.is_at_end() {
        seen.push(pc.next().index);
    }
    assert_eq!(seen, expected);
}

#[test]
fn every_step_has_full_distance_table() {
    let g = dijkstra_scenario();
    for kind in EngineKind::ALL {
        let trace = run(kind, &g, A, EngineOptions::default()).unwrap();
        for step in &trace {
            assert_eq!(step.distances.len(), g.node_count());
        }
    }
}

// ============================================================================
// Oracles
// ============================================================================

/// Floyd-Warshall over the same edges.
fn brute_force(g: &Graph, source: NodeId) -> Vec<Option<f64>> {
    let ids: Vec<NodeId> = g.node_ids().collect();
    let n = ids.len();
    let pos = |id: NodeId| ids.iter().position(|&x| x == id).unwrap();
    let mut dist = vec![vec![None::<f64>; n]; n];
    for i in 0..n {
        dist[i][i] = Some(0.0);
    }
    for e in g.edges() {
        let (s, t) = (pos(e.source), pos(e.target));
        if dist[s][t].map_or(true, |d| e.weight < d) {
            dist[s][t] = Some(e.weight);
        }
    }
    for k in 0..n {
        for i in 0..n {
            for j in 0..n {
                if let (Some(a), Some(b)) = (dist[i][k], dist[k][j]) {
                    if dist[i][j].map_or(true, |d| a + b < d) {
                        dist[i][j] = Some(a + b);
                    }
                }
            }
        }
    }
    dist[pos(source)].clone()
}

fn assert_matches_oracle(trace: &StepTrace, g: &Graph, expected: &[Option<f64>]) {
    for (i, id) in g.node_ids().enumerate() {
        assert_eq!(trace.final_distances().get(id).value(), expected[i], "node {}", id);
    }
}

#[test]
fn dijkstra_matches_brute_force() {
    let g = dijkstra_scenario();
    let trace = Dijkstra::new().run(&g, A).unwrap();
    assert_matches_oracle(&trace, &g, &brute_force(&g, A));
}

#[test]
fn paths_sum_to_distances() {
    let g = dijkstra_scenario();
    let trace = Dijkstra::new().run(&g, A).unwrap();
    let paths = trace.outcome().shortest_paths().unwrap();
    for id in g.node_ids() {
        let edges = paths.edges_to(id).unwrap();
        let total: f64 = edges.iter().map(|&e| g.edge(e).unwrap().weight).sum();
        assert_eq!(finite(total), trace.final_distances().get(id));
    }
}

fn arb_graph(min_weight: i32) -> impl Strategy<Value = (Graph, NodeId)> {
    (1usize..8).prop_flat_map(move |n| {
        let edges = prop::collection::vec((0..n, 0..n, min_weight..20), 0..24);
        (Just(n), edges, 0..n)
    })
    .prop_map(|(n, edges, source)| {
        let mut builder = Graph::builder();
        for id in 0..n {
            builder = builder.node(id as NodeId, format!("n{}", id));
        }
        for (s, t, w) in edges {
            builder = builder.edge(s as NodeId, t as NodeId, w as f64);
        }
        (builder.build().unwrap(), source as NodeId)
    })
}

proptest! {
    #[test]
    fn dijkstra_agrees_with_brute_force((g, source) in arb_graph(0)) {
        let trace = Dijkstra::new().run(&g, source).unwrap();
        let expected = brute_force(&g, source);
        for (i, id) in g.node_ids().enumerate() {
            prop_assert_eq!(trace.final_distances().get(id).value(), expected[i]);
        }
    }

    #[test]
    fn dijkstra_agrees_with_petgraph((g, source) in arb_graph(0)) {
        let trace = Dijkstra::new().run(&g, source).unwrap();
        let view = g.to_digraph();
        let start = view.node_index(source).unwrap();
        let oracle = petgraph::algo::dijkstra(&view.graph, start, None, |e| *e.weight());
        for id in g.node_ids() {
            let idx = view.node_index(id).unwrap();
            prop_assert_eq!(trace.final_distances().get(id).value(), oracle.get(&idx).copied());
        }
    }

    #[test]
    fn bellman_ford_agrees_with_dijkstra((g, source) in arb_graph(0)) {
        let dijkstra = Dijkstra::new().run(&g, source).unwrap();
        let bellman_ford = BellmanFord::new().run(&g, source).unwrap();
        prop_assert!(!bellman_ford.negative_cycle_detected());
        prop_assert_eq!(dijkstra.final_distances(), bellman_ford.final_distances());
    }

    #[test]
    fn bellman_ford_agrees_with_petgraph((g, source) in arb_graph(-4)) {
        let trace = BellmanFord::new().run(&g, source).unwrap();
        let view = g.to_digraph();
        let start = view.node_index(source).unwrap();
        match petgraph::algo::bellman_ford(&view.graph, start) {
            Ok(paths) => {
                prop_assert!(!trace.negative_cycle_detected());
                for id in g.node_ids() {
                    let idx = view.node_index(id).unwrap();
                    let expected = paths.distances[idx.index()];
                    let expected = expected.is_finite().then_some(expected);
                    prop_assert_eq!(trace.final_distances().get(id).value(), expected);
                }
            }
            Err(_) => {
                prop_assert!(trace.negative_cycle_detected());
                let cycle = trace.last().negative_cycle().unwrap();
                prop_assert!(!cycle.improving_edges.is_empty());
            }
        }
    }

    #[test]
    fn early_stop_keeps_final_distances((g, source) in arb_graph(-4)) {
        let full = BellmanFord::new().run(&g, source).unwrap();
        let early = BellmanFord::new().with_early_stop(true).run(&g, source).unwrap();
        prop_assert_eq!(full.negative_cycle_detected(), early.negative_cycle_detected());
        if !full.negative_cycle_detected() {
            prop_assert_eq!(full.final_distances(), early.final_distances());
        }
        prop_assert!(early.len() <= full.len());
    }

    #[test]
    fn traces_have_one_terminal_step((g, source) in arb_graph(0)) {
        for kind in EngineKind::ALL {
            let trace = run(kind, &g, source, EngineOptions::default()).unwrap();
            let terminal = trace.iter().filter(|s| s.is_terminal()).count();
            prop_assert_eq!(terminal, 1);
            prop_assert!(trace.last().is_terminal());
        }
    }
}
