//! Cursor over a finished [`StepTrace`].
//!
//! The controller never touches the trace itself, only its own position.
//! Position `None` means nothing has been played yet; [`current`] then
//! returns a `NotStarted` sentinel step instead of failing.
//!
//! [`current`]: PlaybackController::current

use crate::error::{Error, Result};
use crate::step::{Step, StepTrace};

#[derive(Clone, Debug)]
pub struct PlaybackController {
    trace: StepTrace,
    position: Option<usize>,
    sentinel: Step,
}

impl PlaybackController {
    pub fn new(trace: StepTrace) -> Self {
        Self {
            trace,
            position: None,
            sentinel: Step::not_started(),
        }
    }

    /// Advance one step. No-op on the last step.
    pub fn next(&mut self) -> &Step {
        let last = self.trace.len().saturating_sub(1);
        self.position = match self.position {
            None if !self.trace.is_empty() => Some(0),
            Some(p) if p < last => Some(p + 1),
            other => other,
        };
        self.current()
    }

    /// Go back one step. No-op at index 0 and before the first step.
    pub fn previous(&mut self) -> &Step {
        if let Some(p) = self.position.filter(|&p| p > 0) {
            self.position = Some(p - 1);
        }
        self.current()
    }

    /// Jump to step `index`.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] if `index >= len`. The position is unchanged.
    pub fn seek(&mut self, index: usize) -> Result<&Step> {
        if index >= self.trace.len() {
            return Err(Error::OutOfRange {
                index,
                len: self.trace.len(),
            });
        }
        self.position = Some(index);
        Ok(self.current())
    }

    /// Jump to the terminal step.
    pub fn seek_end(&mut self) -> &Step {
        if !self.trace.is_empty() {
            self.position = Some(self.trace.len() - 1);
        }
        self.current()
    }

    pub fn reset(&mut self) {
        self.position = None;
    }

    pub fn current(&self) -> &Step {
        self.position
            .and_then(|p| self.trace.get(p))
            .unwrap_or(&self.sentinel)
    }

    pub fn position(&self) -> Option<usize> {
        self.position
    }

    pub fn len(&self) -> usize {
        self.trace.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trace.is_empty()
    }

    pub fn is_started(&self) -> bool {
        self.position.is_some()
    }

    pub fn is_at_end(&self) -> bool {
        self.position == Some(self.trace.len().saturating_sub(1))
    }

    pub fn trace(&self) -> &StepTrace {
        &self.trace
    }

    pub fn into_trace(self) -> StepTrace {
        self.trace
    }
}
