//! Append-only trace recorder.
//!
//! Each engine run owns one [`TraceRecorder`]. Steps can only be appended,
//! indices are assigned here, and [`TraceRecorder::finish`] consumes the
//! recorder to produce the frozen [`StepTrace`]. A run that errors out drops
//! its recorder, so callers never see a partial trace.

use crate::engine::EngineKind;
use crate::error::Result;
use crate::graph::NodeId;
use crate::step::{Distances, Outcome, Step, StepDetail, StepTrace};

#[derive(Debug)]
pub struct TraceRecorder {
    engine: EngineKind,
    source: NodeId,
    steps: Vec<Step>,
}

impl TraceRecorder {
    pub fn new(engine: EngineKind, source: NodeId) -> Self {
        Self {
            engine,
            source,
            steps: Vec::new(),
        }
    }

    /// Append a snapshot and return its index.
    pub fn record(
        &mut self,
        description: impl Into<String>,
        distances: &Distances,
        detail: StepDetail,
    ) -> usize {
        let index = self.steps.len();
        let description = description.into();
        tracing::trace!(engine = %self.engine, index, %description, "step recorded");
        self.steps.push(Step {
            index,
            description,
            distances: distances.clone(),
            detail,
        });
        index
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Freeze the recorded steps together with the run's outcome.
    pub fn finish(self, outcome: Outcome) -> Result<StepTrace> {
        StepTrace::new(self.engine, self.source, self.steps, outcome)
    }
}
