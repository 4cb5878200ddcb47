//! Step command - show one recorded step

use super::{record, RecordArgs};
use crate::config::PathtraceConfig;
use crate::output::{Output, OutputConfig, StepView};
use anyhow::{Context, Result};
use pathtrace_core::PlaybackController;

/// Seek to step `at` (zero-based) and render it. Without `at`, show the
/// terminal step.
pub fn run(
    args: &RecordArgs,
    at: Option<usize>,
    config: &PathtraceConfig,
    output: OutputConfig,
) -> Result<()> {
    let recording = record(args, config)?;
    let mut controller = PlaybackController::new(recording.trace);

    match at {
        Some(index) => {
            controller
                .seek(index)
                .with_context(|| format!("Cannot show step {}", index))?;
        }
        None => {
            controller.seek_end();
        }
    }

    let view = StepView {
        position: controller.position(),
        total: controller.len(),
        step: controller.current(),
        graph: &recording.graph,
    };
    Output::with_config(view, output).render()
}
