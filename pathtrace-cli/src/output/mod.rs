//! Output formatting for the pathtrace CLI
//!
//! Every command result implements [`Outputter`] and is rendered either as
//! human-readable tables or as JSON. Colors and truncation follow whether
//! stdout is a terminal unless the config says otherwise.

use clap::ValueEnum;
use serde::Serialize;
use std::io::IsTerminal;
use std::str::FromStr;

mod json;
mod table;
mod trace;

pub use self::json::JsonOutput;
pub use self::table::TableOutput;
pub use self::trace::{StepView, TraceReport};

/// Output format for CLI results
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable tables (default)
    #[default]
    Table,
    /// JSON for machine consumption
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: '{}'", s)),
        }
    }
}

/// Configuration for output rendering
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Disable colored output
    pub no_color: bool,
    /// Disable wrapping to the terminal width
    pub no_truncate: bool,
    /// Override terminal width (None = auto-detect)
    pub width: Option<usize>,
    /// Compact mode: blank table borders, minified JSON
    pub compact: bool,
}

impl OutputConfig {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            no_color: false,
            no_truncate: false,
            width: None,
            compact: false,
        }
    }

    /// Create an OutputConfig with automatic TTY detection and optional color override.
    ///
    /// When stdout is not a TTY, colors are off unless `color_override` is
    /// `Some(true)`, and tables are never wrapped.
    pub fn auto_detect_with_color_override(
        format: OutputFormat,
        color_override: Option<bool>,
    ) -> Self {
        let is_tty = std::io::stdout().is_terminal();
        let mut config = Self::new(format);
        config.no_color = !color_override.unwrap_or(is_tty);
        config.no_truncate = !is_tty;
        config
    }

    /// Get the effective terminal width
    pub fn effective_width(&self) -> usize {
        self.width.unwrap_or_else(|| {
            terminal_size::terminal_size()
                .map(|(w, _)| w.0 as usize)
                .unwrap_or(80)
        })
    }

    pub fn use_colors(&self) -> bool {
        !self.no_color
    }

    pub fn should_truncate(&self) -> bool {
        !self.no_truncate
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::auto_detect_with_color_override(OutputFormat::Table, None)
    }
}

/// Types that can be rendered in every supported format.
pub trait Outputter: Serialize + Sized {
    /// Render as table format
    fn to_table(&self, config: &OutputConfig) -> String;

    /// Render as JSON format
    fn to_json(&self, config: &OutputConfig) -> String {
        JsonOutput::format(self, config)
    }

    /// Render using the format specified in config
    fn render(&self, config: &OutputConfig) -> String {
        match config.format {
            OutputFormat::Table => self.to_table(config),
            OutputFormat::Json => self.to_json(config),
        }
    }

    /// Render and print to stdout
    fn output(&self, config: &OutputConfig) {
        println!("{}", self.render(config));
    }
}

/// Wrapper pairing a result with its render configuration.
pub struct Output<T> {
    data: T,
    config: OutputConfig,
}

impl<T: Outputter> Output<T> {
    pub fn with_config(data: T, config: OutputConfig) -> Self {
        Self { data, config }
    }

    /// Render the output to stdout
    pub fn render(&self) -> anyhow::Result<()> {
        self.data.output(&self.config);
        Ok(())
    }
}
