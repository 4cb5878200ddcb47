//! pathtrace core - recorded shortest-path algorithms.
//!
//! Runs Dijkstra or Bellman-Ford over a small weighted directed graph and
//! records every intermediate state as an ordered, immutable [`StepTrace`].
//! A [`PlaybackController`] then moves back and forth through the recording.
//! Nothing here draws anything; consumers render the steps themselves.
//!
//! # Features
//!
//! - **Deterministic traces**: the same graph and source always produce the
//!   same steps, down to the serialized bytes
//! - **Full snapshots**: every step owns its distance table, heap view and
//!   visited set, so any step can be shown without replaying earlier ones
//! - **Negative cycles as outcomes**: Bellman-Ford reports them on its final
//!   step instead of failing
//!
//! # Usage
//!
//! ```
//! use pathtrace_core::{EngineKind, EngineOptions, Graph, PlaybackController};
//!
//! let graph = Graph::builder()
//!     .node(0, "A")
//!     .node(1, "B")
//!     .edge(0, 1, 3.0)
//!     .build()?;
//!
//! let trace = pathtrace_core::run(EngineKind::Dijkstra, &graph, 0, EngineOptions::default())?;
//! assert!(trace.last().is_terminal());
//!
//! let mut playback = PlaybackController::new(trace);
//! let first = playback.next();
//! assert_eq!(first.description, "Examine heap top A (0)");
//! # Ok::<(), pathtrace_core::Error>(())
//! ```

pub mod engine;
pub mod error;
pub mod exporter;
pub mod graph;
pub mod playback;
pub mod recorder;
pub mod step;

pub use engine::{run, BellmanFord, Dijkstra, Engine, EngineKind, EngineOptions};
pub use error::{Error, Result};
pub use graph::{Edge, EdgeId, Graph, GraphBuilder, Node, NodeId};
pub use playback::PlaybackController;
pub use step::{
    BellmanFordEvent, DijkstraEvent, Distance, Distances, HeapEntry, HeapSnapshot, NegativeCycle,
    Outcome, Predecessor, Relaxation, ShortestPaths, Step, StepDetail, StepTrace,
};
