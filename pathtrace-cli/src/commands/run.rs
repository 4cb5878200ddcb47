//! Run command - record a run and print its steps and outcome

use super::{record, RecordArgs};
use crate::config::PathtraceConfig;
use crate::output::{Output, OutputConfig, TraceReport};
use anyhow::Result;

pub fn run(args: &RecordArgs, show_steps: bool, config: &PathtraceConfig, output: OutputConfig) -> Result<()> {
    let recording = record(args, config)?;
    let report = TraceReport {
        trace: &recording.trace,
        graph: &recording.graph,
        show_steps,
    };
    Output::with_config(report, output).render()
}
