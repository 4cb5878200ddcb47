//! Table output formatting using the `tabled` crate

use super::OutputConfig;
use tabled::{
    builder::Builder,
    settings::{object::Columns, style::Style, Alignment, Modify, Width},
};

/// Table output formatter
pub struct TableOutput;

impl TableOutput {
    /// Format a simple key-value table
    pub fn format_key_value(pairs: &[(&str, String)], config: &OutputConfig) -> String {
        let mut builder = Builder::default();

        for (key, value) in pairs {
            builder.push_record([*key, value.as_str()]);
        }

        let mut table = builder.build();
        Self::style(&mut table, config);
        table.with(Modify::new(Columns::first()).with(Alignment::right()));
        Self::fit(&mut table, config);

        table.to_string()
    }

    /// Create a simple table from rows of strings
    pub fn from_rows(headers: &[&str], rows: &[Vec<String>], config: &OutputConfig) -> String {
        if rows.is_empty() {
            return "(none)".to_string();
        }

        let mut builder = Builder::default();
        builder.push_record(headers.iter().copied());

        for row in rows {
            builder.push_record(row.iter().map(|s| s.as_str()));
        }

        let mut table = builder.build();
        Self::style(&mut table, config);
        Self::fit(&mut table, config);

        table.to_string()
    }

    fn style(table: &mut tabled::Table, config: &OutputConfig) {
        if config.compact {
            table.with(Style::blank());
        } else {
            table.with(Style::rounded());
        }
    }

    fn fit(table: &mut tabled::Table, config: &OutputConfig) {
        if config.should_truncate() {
            table.with(Width::wrap(config.effective_width()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;

    fn config() -> OutputConfig {
        let mut config = OutputConfig::new(OutputFormat::Table);
        config.no_truncate = true;
        config
    }

    #[test]
    fn test_from_rows() {
        let rows = vec![
            vec!["A".to_string(), "0".to_string()],
            vec!["B".to_string(), "unreachable".to_string()],
        ];
        let output = TableOutput::from_rows(&["Node", "Distance"], &rows, &config());
        assert!(output.contains("Node"));
        assert!(output.contains("unreachable"));
    }

    #[test]
    fn test_from_rows_empty() {
        assert_eq!(TableOutput::from_rows(&["Node"], &[], &config()), "(none)");
    }

    #[test]
    fn test_key_value() {
        let output = TableOutput::format_key_value(&[("engine", "dijkstra".to_string())], &config());
        assert!(output.contains("engine"));
        assert!(output.contains("dijkstra"));
    }
}
