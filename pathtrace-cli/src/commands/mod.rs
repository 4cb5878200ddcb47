//! Command implementations for the pathtrace CLI
//!
//! Each command module provides a `run` function that executes the command logic.

pub mod completions;
pub mod replay;
pub mod run;
pub mod step;

use crate::config::PathtraceConfig;
use crate::graph_file;
use anyhow::{Context, Result};
use clap::Args;
use pathtrace_core::{EngineKind, EngineOptions, Graph, StepTrace};
use std::path::PathBuf;

/// Arguments shared by every command that records a run.
#[derive(Args, Debug, Clone)]
pub struct RecordArgs {
    /// Graph file (JSON with `nodes` and `edges`)
    pub graph: PathBuf,

    /// Source node, by id or label
    #[arg(short, long)]
    pub source: String,

    /// Engine to run: dijkstra, bellman-ford (default from config, else dijkstra)
    #[arg(short, long)]
    pub engine: Option<EngineKind>,

    /// Bellman-Ford: stop after a pass with no improvements
    #[arg(long)]
    pub early_stop: bool,
}

/// A graph together with the trace recorded over it.
pub struct Recording {
    pub graph: Graph,
    pub trace: StepTrace,
}

/// Load the graph and record a run, resolving flags against the config.
pub fn record(args: &RecordArgs, config: &PathtraceConfig) -> Result<Recording> {
    let graph = graph_file::load(&args.graph)?;
    let source = graph_file::resolve_node(&graph, &args.source)?;
    let kind = args
        .engine
        .or_else(|| config.default_engine())
        .unwrap_or(EngineKind::Dijkstra);
    let options = EngineOptions {
        early_stop: args.early_stop || config.early_stop(),
    };

    let trace = pathtrace_core::run(kind, &graph, source, options)
        .with_context(|| format!("{} run from {} failed", kind, graph.label(source)))?;
    tracing::debug!(engine = %kind, steps = trace.len(), "run recorded");

    Ok(Recording { graph, trace })
}
