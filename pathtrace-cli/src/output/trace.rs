//! Human-readable views of recorded steps and traces.

use super::{JsonOutput, OutputConfig, Outputter, TableOutput};
use colored::Colorize;
use pathtrace_core::{
    DijkstraEvent, Distance, Distances, Graph, NegativeCycle, NodeId, Outcome,
    Relaxation, Step, StepDetail, StepTrace,
};
use serde::Serialize;

/// Distance as shown to users.
pub fn distance_text(distance: Distance) -> String {
    match distance {
        Distance::Finite(v) => v.to_string(),
        Distance::Unreachable => "unreachable".to_string(),
    }
}

/// One row per node: label, id, distance, and a note on the node the step
/// just updated.
pub fn distance_rows(graph: &Graph, distances: &Distances, updated: Option<NodeId>) -> Vec<Vec<String>> {
    graph
        .node_ids()
        .map(|id| {
            vec![
                graph.label(id),
                id.to_string(),
                distance_text(distances.get(id)),
                if updated == Some(id) { "updated" } else { "" }.to_string(),
            ]
        })
        .collect()
}

fn node_list(graph: &Graph, nodes: &[NodeId], separator: &str) -> String {
    nodes
        .iter()
        .map(|&id| graph.label(id))
        .collect::<Vec<_>>()
        .join(separator)
}

fn edge_text(graph: &Graph, relaxation: &Relaxation) -> String {
    format!(
        "{} → {} (edge {}, weight {}): candidate {}, was {}, {}",
        graph.label(relaxation.source),
        graph.label(relaxation.target),
        relaxation.edge,
        relaxation.weight,
        distance_text(relaxation.candidate),
        distance_text(relaxation.before),
        if relaxation.improved { "improved" } else { "kept" }
    )
}

/// Short phase tag used in step listings.
pub fn phase(step: &Step, node_count: usize) -> String {
    match &step.detail {
        StepDetail::NotStarted => "-".to_string(),
        StepDetail::Dijkstra { event, .. } => match event {
            DijkstraEvent::Examine { stale: true, .. } => "discard",
            DijkstraEvent::Examine { .. } => "examine",
            DijkstraEvent::Relax(_) => "relax",
            DijkstraEvent::Finished => "finished",
        }
        .to_string(),
        StepDetail::BellmanFord { iteration, .. } if *iteration >= node_count => "verify".to_string(),
        StepDetail::BellmanFord { iteration, .. } => format!("pass {}", iteration),
    }
}

/// Lines describing a negative cycle.
pub fn negative_cycle_lines(graph: &Graph, cycle: &NegativeCycle) -> Vec<String> {
    let mut lines = vec![format!("{}", "Negative cycle detected".red().bold())];
    if !cycle.cycle.is_empty() {
        let mut nodes = cycle.cycle.clone();
        nodes.push(cycle.cycle[0]);
        lines.push(format!("  Cycle: {}", node_list(graph, &nodes, " → ")));
    }
    let edges: Vec<String> = cycle
        .improving_edges
        .iter()
        .filter_map(|&id| graph.edge(id))
        .map(|e| format!("{} → {}", graph.label(e.source), graph.label(e.target)))
        .collect();
    lines.push(format!("  Still improving: {}", edges.join(", ")));
    lines
}

/// A single step, positioned within its trace.
#[derive(Serialize)]
pub struct StepView<'a> {
    /// Zero-based cursor position; `None` before the first step.
    pub position: Option<usize>,
    pub total: usize,
    pub step: &'a Step,
    #[serde(skip)]
    pub graph: &'a Graph,
}

impl Outputter for StepView<'_> {
    fn to_table(&self, config: &OutputConfig) -> String {
        let mut out = Vec::new();

        let heading = match self.position {
            Some(p) => format!("Step {} ({}/{})", p, p + 1, self.total),
            None => format!("Not started ({} steps recorded)", self.total),
        };
        match self.step.engine() {
            Some(engine) => out.push(format!("{} [{}]", heading.cyan().bold(), engine)),
            None => out.push(heading.cyan().bold().to_string()),
        }
        if self.step.is_sentinel() {
            return out.join("\n");
        }
        out.push(self.step.description.clone());
        out.push(String::new());

        if let Some(visited) = self.step.visited() {
            let visited = if visited.is_empty() {
                "(none)".to_string()
            } else {
                node_list(self.graph, visited, ", ")
            };
            out.push(format!("{} {}", "Visited:".cyan(), visited));
        }
        if let Some(iteration) = self.step.iteration() {
            let passes = self.graph.node_count().saturating_sub(1);
            let text = if iteration > passes {
                "verification".to_string()
            } else {
                format!("{} of {}", iteration, passes)
            };
            out.push(format!("{} {}", "Pass:".cyan(), text));
        }
        if let Some(relaxation) = self.step.active_edge() {
            out.push(format!("{} {}", "Edge:".cyan(), edge_text(self.graph, relaxation)));
        }

        let updated = self
            .step
            .active_edge()
            .filter(|r| r.improved)
            .map(|r| r.target);
        out.push(TableOutput::from_rows(
            &["Node", "Id", "Distance", ""],
            &distance_rows(self.graph, &self.step.distances, updated),
            config,
        ));

        if let Some(heap) = self.step.heap() {
            let rows: Vec<Vec<String>> = heap
                .iter()
                .enumerate()
                .map(|(i, entry)| {
                    let mut notes = Vec::new();
                    if i == 0 {
                        notes.push("next");
                    }
                    if entry.stale {
                        notes.push("stale");
                    }
                    vec![
                        i.to_string(),
                        self.graph.label(entry.id),
                        distance_text(entry.dist),
                        notes.join(", "),
                    ]
                })
                .collect();
            out.push(format!("{}", "Heap:".cyan()));
            out.push(TableOutput::from_rows(&["#", "Node", "Distance", ""], &rows, config));
        }

        if let Some(cycle) = self.step.negative_cycle() {
            out.extend(negative_cycle_lines(self.graph, cycle));
        }

        out.join("\n")
    }
}

/// Summary of a whole run: optional step listing plus the outcome.
#[derive(Serialize)]
pub struct TraceReport<'a> {
    pub trace: &'a StepTrace,
    #[serde(skip)]
    pub graph: &'a Graph,
    #[serde(skip)]
    pub show_steps: bool,
}

impl Outputter for TraceReport<'_> {
    fn to_table(&self, config: &OutputConfig) -> String {
        let mut out = Vec::new();
        let outcome = if self.trace.negative_cycle_detected() {
            "negative cycle"
        } else {
            "shortest paths"
        };
        out.push(TableOutput::format_key_value(
            &[
                ("engine", self.trace.engine().to_string()),
                ("source", self.graph.label(self.trace.source())),
                ("steps", self.trace.len().to_string()),
                ("outcome", outcome.to_string()),
            ],
            config,
        ));

        if self.show_steps {
            let node_count = self.graph.node_count();
            let rows: Vec<Vec<String>> = self
                .trace
                .iter()
                .map(|step| {
                    vec![
                        step.index.to_string(),
                        phase(step, node_count),
                        step.description.clone(),
                    ]
                })
                .collect();
            out.push(TableOutput::from_rows(&["#", "Phase", "Description"], &rows, config));
        }

        match self.trace.outcome() {
            Outcome::ShortestPaths(paths) => {
                let rows: Vec<Vec<String>> = self
                    .graph
                    .node_ids()
                    .map(|id| {
                        let path = paths
                            .path_to(id)
                            .map(|p| node_list(self.graph, &p, " → "))
                            .unwrap_or_else(|| "-".to_string());
                        vec![
                            self.graph.label(id),
                            distance_text(paths.distances.get(id)),
                            path,
                        ]
                    })
                    .collect();
                out.push(TableOutput::from_rows(&["Node", "Distance", "Path"], &rows, config));
            }
            Outcome::NegativeCycle { cycle, distances } => {
                out.extend(negative_cycle_lines(self.graph, cycle));
                out.push("Distances after the last pass (not shortest paths):".to_string());
                out.push(TableOutput::from_rows(
                    &["Node", "Id", "Distance", ""],
                    &distance_rows(self.graph, distances, None),
                    config,
                ));
            }
        }

        out.join("\n")
    }

    /// The JSON form is the trace itself, so it can be loaded back.
    fn to_json(&self, config: &OutputConfig) -> String {
        JsonOutput::format(self.trace, config)
    }
}
