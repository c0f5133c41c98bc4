//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/utilkit/utilkit.toml`
//! 3. Explicit config file (`--config`)
//! 4. Environment variables: `UTILKIT_*` prefix, `__` between sections

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::application::ApplicationError;
use crate::domain::axis::{DEFAULT_DECIMAL_PLACES, DEFAULT_SPLIT_COUNT};
use crate::domain::node::{DEFAULT_CHILDREN_FIELD, DEFAULT_IDENTITY_FIELD};
use crate::domain::series::DEFAULT_INTERVAL_MINUTES;

/// Field names used when walking trees.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TreeSettings {
    /// Field holding the child nodes (default: "children")
    pub children_field: String,
    /// Field compared when looking up parents (default: "id")
    pub identity_field: String,
}

impl Default for TreeSettings {
    fn default() -> Self {
        Self {
            children_field: DEFAULT_CHILDREN_FIELD.into(),
            identity_field: DEFAULT_IDENTITY_FIELD.into(),
        }
    }
}

/// Chart axis and gap-filling defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ChartSettings {
    /// Precision of axis tick labels
    pub decimal_places: u32,
    /// Number of axis intervals
    pub split_count: u32,
    /// Minute grid for filler points
    pub interval_minutes: u32,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            decimal_places: DEFAULT_DECIMAL_PLACES,
            split_count: DEFAULT_SPLIT_COUNT,
            interval_minutes: DEFAULT_INTERVAL_MINUTES,
        }
    }
}

/// Raw settings for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub tree: RawTreeSettings,
    pub chart: RawChartSettings,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawTreeSettings {
    pub children_field: Option<String>,
    pub identity_field: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawChartSettings {
    pub decimal_places: Option<u32>,
    pub split_count: Option<u32>,
    pub interval_minutes: Option<u32>,
}

/// Unified configuration for utilkit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Settings {
    pub tree: TreeSettings,
    pub chart: ChartSettings,
}

/// Get the XDG config directory for utilkit.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "utilkit").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("utilkit.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay wins where it specifies a value, otherwise keep self.
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            tree: TreeSettings {
                children_field: overlay
                    .tree
                    .children_field
                    .clone()
                    .unwrap_or_else(|| self.tree.children_field.clone()),
                identity_field: overlay
                    .tree
                    .identity_field
                    .clone()
                    .unwrap_or_else(|| self.tree.identity_field.clone()),
            },
            chart: ChartSettings {
                decimal_places: overlay
                    .chart
                    .decimal_places
                    .unwrap_or(self.chart.decimal_places),
                split_count: overlay.chart.split_count.unwrap_or(self.chart.split_count),
                interval_minutes: overlay
                    .chart
                    .interval_minutes
                    .unwrap_or(self.chart.interval_minutes),
            },
        }
    }

    /// Load settings with layered precedence, using the XDG global file.
    ///
    /// # Arguments
    /// * `explicit` - Optional config file given on the command line (must exist)
    pub fn load(explicit: Option<&Path>) -> Result<Self, ApplicationError> {
        Self::load_from(global_config_path().as_deref(), explicit)
    }

    /// Load settings from an optional global file and an optional explicit file.
    ///
    /// A missing global file is skipped; a missing explicit file is an error.
    #[instrument(level = "debug")]
    pub fn load_from(global: Option<&Path>, explicit: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global {
            if global_path.exists() {
                debug!("global config: {}", global_path.display());
                current = current.merge_with(&load_raw_settings(global_path)?);
            }
        }

        // 3. Explicit config file
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", path.display()),
                });
            }
            current = current.merge_with(&load_raw_settings(path)?);
        }

        // 4. Environment variables (explicit override)
        current = Self::apply_env_overrides(current)?;

        current.validate()?;
        Ok(current)
    }

    /// Apply UTILKIT_* environment variables as explicit overrides.
    fn apply_env_overrides(settings: Self) -> Result<Self, ApplicationError> {
        // Use config crate just for env var parsing
        let config = Config::builder()
            .add_source(Environment::with_prefix("UTILKIT").separator("__"))
            .build()
            .map_err(config_err)?;
        Self::apply_overrides(settings, &config)
    }

    fn apply_overrides(mut settings: Self, config: &Config) -> Result<Self, ApplicationError> {
        if let Ok(val) = config.get_string("tree.children_field") {
            settings.tree.children_field = val;
        }
        if let Ok(val) = config.get_string("tree.identity_field") {
            settings.tree.identity_field = val;
        }
        if let Some(val) = get_u32(config, "chart.decimal_places")? {
            settings.chart.decimal_places = val;
        }
        if let Some(val) = get_u32(config, "chart.split_count")? {
            settings.chart.split_count = val;
        }
        if let Some(val) = get_u32(config, "chart.interval_minutes")? {
            settings.chart.interval_minutes = val;
        }
        Ok(settings)
    }

    /// Reject values the domain operations cannot work with.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        let problem = if self.tree.children_field.is_empty() {
            Some("tree.children_field must not be empty")
        } else if self.tree.identity_field.is_empty() {
            Some("tree.identity_field must not be empty")
        } else if self.chart.split_count == 0 {
            Some("chart.split_count must be positive")
        } else if self.chart.interval_minutes == 0 {
            Some("chart.interval_minutes must be positive")
        } else {
            None
        };
        match problem {
            Some(message) => Err(ApplicationError::Config {
                message: message.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# utilkit configuration
#
# Locations (by precedence, lowest to highest):
#   Global:   ~/.config/utilkit/utilkit.toml
#   Explicit: utilkit --config <file>
#   Env:      UTILKIT_* environment variables, e.g. UTILKIT_CHART__SPLIT_COUNT=4

[tree]
# Field holding child nodes
# children_field = "children"

# Field used to match nodes by identity
# identity_field = "id"

[chart]
# Decimal places shown on axis labels
# decimal_places = 2

# Number of axis intervals
# split_count = 5

# Minute grid used when filling gaps in time series
# interval_minutes = 5
"#
        .to_string()
    }
}

fn get_u32(config: &Config, key: &str) -> Result<Option<u32>, ApplicationError> {
    match config.get_int(key) {
        Ok(val) => u32::try_from(val)
            .map(Some)
            .map_err(|_| ApplicationError::Config {
                message: format!("{key} out of range: {val}"),
            }),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(config_err(e)),
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_defaults_when_created_then_match_domain_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.tree.children_field, "children");
        assert_eq!(settings.tree.identity_field, "id");
        assert_eq!(settings.chart.decimal_places, 2);
        assert_eq!(settings.chart.split_count, 5);
        assert_eq!(settings.chart.interval_minutes, 5);
    }

    #[test]
    fn given_partial_overlay_when_merging_then_only_specified_keys_change() {
        let overlay = RawSettings {
            tree: RawTreeSettings {
                children_field: Some("items".into()),
                identity_field: None,
            },
            chart: RawChartSettings {
                decimal_places: None,
                split_count: Some(4),
                interval_minutes: None,
            },
        };

        let result = Settings::default().merge_with(&overlay);

        assert_eq!(result.tree.children_field, "items");
        assert_eq!(result.tree.identity_field, "id");
        assert_eq!(result.chart.split_count, 4);
        assert_eq!(result.chart.decimal_places, 2);
    }

    #[test]
    fn given_override_source_when_applying_then_replaces_values() {
        let config = Config::builder()
            .set_override("chart.interval_minutes", 15)
            .and_then(|b| b.set_override("tree.identity_field", "key"))
            .and_then(|b| b.build())
            .expect("build config");

        let result = Settings::apply_overrides(Settings::default(), &config).expect("apply");

        assert_eq!(result.chart.interval_minutes, 15);
        assert_eq!(result.tree.identity_field, "key");
        assert_eq!(result.chart.split_count, 5);
    }

    #[test]
    fn given_negative_override_when_applying_then_config_error() {
        let config = Config::builder()
            .set_override("chart.split_count", -3)
            .and_then(|b| b.build())
            .expect("build config");

        let result = Settings::apply_overrides(Settings::default(), &config);
        assert!(matches!(result, Err(ApplicationError::Config { .. })));
    }

    #[test]
    fn given_zero_split_count_when_validating_then_rejected() {
        let mut settings = Settings::default();
        settings.chart.split_count = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn given_template_when_parsed_then_yields_defaults() {
        let raw: RawSettings = toml::from_str(&Settings::template()).expect("template parses");
        assert_eq!(Settings::default().merge_with(&raw), Settings::default());
    }

    #[test]
    fn given_settings_when_serialized_then_round_trips_through_toml() {
        let toml = Settings::default().to_toml().expect("serialize");
        assert!(toml.contains("[chart]"));
        assert!(toml.contains("children_field = \"children\""));
    }
}
