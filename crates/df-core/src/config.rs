//! Application configuration types.
//!
//! The top-level [`Config`] struct is deserialized from TOML and carries the
//! staging, output, and input sections plus any number of named scenarios.
//! Every section defaults sensibly so a completely empty file is valid.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::action::ActionRequest;
use crate::error::Result;
use crate::Error;

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub staging: StagingConfig,
    pub output: OutputConfig,
    pub input: InputConfig,
    #[serde(rename = "scenario")]
    pub scenarios: Vec<Scenario>,
}

impl Config {
    /// Deserialize a `Config` from a TOML string.
    ///
    /// This is intentionally string-based so the caller can read the file
    /// however it sees fit (embedded, test fixture, etc.).
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).map_err(|e| Error::Config(format!("config parse error: {e}")))
    }

    /// Load configuration from a file path. Read and parse failures are hard
    /// errors; use this for explicitly named config files.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_toml(&contents)
    }

    /// Load configuration from a file path, falling back to defaults if the
    /// path is `None`, the file does not exist, or the file fails to parse.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(contents) => Self::from_toml(&contents).unwrap_or_else(|e| {
                tracing::warn!("Failed to parse config file {}: {e}", path.display());
                Self::default()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No config file at {}; using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                tracing::warn!("Failed to read config file {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Look up a scenario by name.
    pub fn scenario(&self, name: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.name == name)
    }

    /// Return a list of validation warnings (non-fatal issues).
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.input.extensions.is_empty() {
            warnings.push("input.extensions is empty; directory inputs will match no files".into());
        }
        for ext in &self.input.extensions {
            if ext.starts_with('.') {
                warnings.push(format!(
                    "input extension '{ext}' has a leading dot; extensions are matched without one"
                ));
            }
        }

        for (i, scenario) in self.scenarios.iter().enumerate() {
            if scenario.name.is_empty() {
                warnings.push(format!("scenario[{i}].name is empty"));
            }
            if scenario.actions.is_empty() {
                warnings.push(format!(
                    "scenario '{}' declares no actions and will do nothing",
                    scenario.name
                ));
            }
        }

        let mut seen = std::collections::HashSet::new();
        for scenario in &self.scenarios {
            if !seen.insert(scenario.name.as_str()) {
                warnings.push(format!(
                    "duplicate scenario name '{}'; only the first is reachable",
                    scenario.name
                ));
            }
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// Stage-directory settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StagingConfig {
    /// Fixed stage root. When unset, each run gets a fresh temp directory.
    pub root: Option<PathBuf>,
    /// Keep stage directories after the run instead of cleaning them up.
    pub keep: bool,
}

/// Output artifact settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the final working set is exported to.
    pub dir: PathBuf,
    /// Also write the structured run log as `run-log.json` next to the outputs.
    pub export_log: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./docforge-out"),
            export_log: true,
        }
    }
}

/// Input resolution settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// File extensions (without dot) picked up when an input is a directory.
    pub extensions: Vec<String>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["txt".into(), "md".into()],
        }
    }
}

/// A named, ordered action list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, rename = "action")]
    pub actions: Vec<ActionRequest>,
}
