//! Configuration loading from `.pathtracerc.toml`.
//!
//! The file is optional and looked up in the working directory. Every
//! section and key may be omitted; command-line flags win over anything set
//! here.
//!
//! # Example Configuration
//!
//! ```toml
//! [engine]
//! default = "bellman-ford"
//! early_stop = true
//!
//! [output]
//! format = "table"
//! color = true
//! compact = false
//! width = 120
//! ```

use pathtrace_core::EngineKind;
use serde::Deserialize;
use std::path::Path;

pub const CONFIG_FILE: &str = ".pathtracerc.toml";

/// Root configuration structure loaded from `.pathtracerc.toml`.
#[derive(Debug, Deserialize, Default)]
pub struct PathtraceConfig {
    /// Engine selection and tuning.
    #[serde(default)]
    pub engine: EngineSettings,

    /// Output formatting preferences.
    #[serde(default)]
    pub output: OutputSettings,
}

#[derive(Debug, Deserialize, Default)]
pub struct EngineSettings {
    /// Engine used when `--engine` is not given: `dijkstra` or `bellman-ford`.
    #[serde(default)]
    pub default: Option<String>,

    /// Stop Bellman-Ford after a pass with no improvements.
    #[serde(default)]
    pub early_stop: Option<bool>,
}

/// Output formatting preferences.
///
/// `--format` overrides `format`. When `color` is unset, colors follow
/// whether stdout is a terminal.
#[derive(Debug, Deserialize, Default)]
pub struct OutputSettings {
    /// Valid values: `table`, `json`.
    #[serde(default)]
    pub format: Option<String>,

    #[serde(default)]
    pub color: Option<bool>,

    /// Blank table borders and minified JSON.
    #[serde(default)]
    pub compact: Option<bool>,

    /// Wrap tables to this many columns instead of the terminal width.
    #[serde(default)]
    pub width: Option<usize>,
}

impl PathtraceConfig {
    /// Load configuration from `root`, falling back to defaults when the file
    /// is missing or unreadable.
    pub fn load(root: &Path) -> Self {
        let config_path = root.join(CONFIG_FILE);
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse {}: {}", CONFIG_FILE, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read {}: {}", CONFIG_FILE, e);
                }
            }
        }
        Self::default()
    }

    /// Configured default engine. Unknown names are logged and ignored.
    pub fn default_engine(&self) -> Option<EngineKind> {
        let name = self.engine.default.as_deref()?;
        match name.parse() {
            Ok(kind) => Some(kind),
            Err(e) => {
                tracing::warn!("Ignoring [engine].default in {}: {}", CONFIG_FILE, e);
                None
            }
        }
    }

    pub fn early_stop(&self) -> bool {
        self.engine.early_stop.unwrap_or(false)
    }

    pub fn default_format(&self) -> Option<&str> {
        self.output.format.as_deref()
    }

    pub fn use_color(&self) -> Option<bool> {
        self.output.color
    }

    pub fn compact(&self) -> bool {
        self.output.compact.unwrap_or(false)
    }

    pub fn width(&self) -> Option<usize> {
        self.output.width
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = PathtraceConfig::load(dir.path());
        assert_eq!(config.default_engine(), None);
        assert!(!config.early_stop());
        assert_eq!(config.default_format(), None);
        assert_eq!(config.use_color(), None);
        assert!(!config.compact());
        assert_eq!(config.width(), None);
    }

    #[test]
    fn test_load_all_sections() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            r#"
[engine]
default = "bellman-ford"
early_stop = true

[output]
format = "json"
color = false
compact = true
width = 100
"#,
        )
        .unwrap();

        let config = PathtraceConfig::load(dir.path());
        assert_eq!(config.default_engine(), Some(EngineKind::BellmanFord));
        assert!(config.early_stop());
        assert_eq!(config.default_format(), Some("json"));
        assert_eq!(config.use_color(), Some(false));
        assert!(config.compact());
        assert_eq!(config.width(), Some(100));
    }

    #[test]
    fn test_partial_file() {
        let config: PathtraceConfig = toml::from_str("[output]\ncolor = true\n").unwrap();
        assert_eq!(config.use_color(), Some(true));
        assert_eq!(config.default_engine(), None);
    }

    #[test]
    fn test_invalid_toml_falls_back() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "[engine\ndefault = ").unwrap();
        let config = PathtraceConfig::load(dir.path());
        assert_eq!(config.default_engine(), None);
    }

    #[test]
    fn test_unknown_engine_ignored() {
        let config: PathtraceConfig = toml::from_str("[engine]\ndefault = \"prim\"\n").unwrap();
        assert_eq!(config.default_engine(), None);
    }
}
