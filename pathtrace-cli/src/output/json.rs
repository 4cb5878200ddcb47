//! JSON output formatting for machine-readable output.

use super::OutputConfig;
use serde::Serialize;

/// JSON output formatter
pub struct JsonOutput;

impl JsonOutput {
    /// Format data as JSON string
    ///
    /// Pretty-printed unless `config.compact` is set.
    pub fn format<T: Serialize + ?Sized>(data: &T, config: &OutputConfig) -> String {
        if config.compact {
            serde_json::to_string(data).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
        } else {
            serde_json::to_string_pretty(data)
                .unwrap_or_else(|e| format!("{{\n  \"error\": \"{}\"\n}}", e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;

    #[test]
    fn test_format_compact() {
        let mut config = OutputConfig::new(OutputFormat::Json);
        config.compact = true;
        assert_eq!(JsonOutput::format(&vec![1, 2], &config), "[1,2]");
    }

    #[test]
    fn test_format_pretty() {
        let config = OutputConfig::new(OutputFormat::Json);
        assert!(JsonOutput::format(&vec![1, 2], &config).contains('\n'));
    }
}
