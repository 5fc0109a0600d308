use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{DEFAULT_REPORT_WIDTH, DEFAULT_ROOM_ORDER};

/// Planner settings persisted between sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerSettings {
    /// Rooms in walk-through order. Show files are arranged against this list.
    pub room_order: Vec<String>,
    /// Where `list_shows` looks for show files. `None` means the working directory.
    pub shows_directory: Option<PathBuf>,
    /// Width of the section rules in the text report.
    pub report_width: usize,
    /// Keep a `.bak` copy of a show file before overwriting it.
    pub autosave_backup: bool,
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self {
            room_order: DEFAULT_ROOM_ORDER.iter().map(|s| s.to_string()).collect(),
            shows_directory: None,
            report_width: DEFAULT_REPORT_WIDTH,
            autosave_backup: false,
        }
    }
}

/// Configuration manager for planner settings.
///
/// Separates the schema (defaults, valid ranges, descriptions) from the
/// persisted values. Settings live in `config.json` under the user config
/// directory unless a path is given.
pub struct ConfigManager {
    config_path: PathBuf,
    settings: PlannerSettings,
}

/// Available configuration options with validation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSchema {
    pub room_order: ConfigOption<Vec<String>>,
    pub report_width: ConfigOption<usize>,
    pub autosave_backup: ConfigOption<bool>,
}

/// Configuration option with its default and valid range
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigOption<T> {
    pub default: T,
    pub valid_range: Option<(T, T)>,
    pub description: String,
}

/// Persisted configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    pub settings: PlannerSettings,
    pub created_at: String,
    pub modified_at: String,
}

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(String),
    #[error("Failed to write config file: {0}")]
    Write(String),
    #[error("Failed to parse config file: {0}")]
    Parse(String),
    #[error("Failed to serialize config: {0}")]
    Serialize(String),
    #[error("Config validation errors: {}", .0.join(", "))]
    Validation(Vec<String>),
}

impl ConfigManager {
    /// Create a new configuration manager. Without a path, uses
    /// `<config dir>/cueplan/config.json`, or `config.json` in the working
    /// directory when the platform has no config directory.
    pub fn new(config_path: Option<PathBuf>) -> Self {
        let config_path = config_path.unwrap_or_else(Self::default_path);

        Self {
            config_path,
            settings: PlannerSettings::default(),
        }
    }

    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .map(|dir| dir.join("cueplan").join("config.json"))
            .unwrap_or_else(|| PathBuf::from("config.json"))
    }

    /// Load settings from the configuration file, writing defaults first if
    /// the file does not exist yet.
    pub fn load(&mut self) -> Result<PlannerSettings, ConfigError> {
        if !self.config_path.exists() {
            log::info!(
                "no config at {}, writing defaults",
                self.config_path.display()
            );
            self.save()?;
            return Ok(self.settings.clone());
        }

        let content = fs::read_to_string(&self.config_path)
            .map_err(|e| ConfigError::Read(e.to_string()))?;

        let config_file: ConfigFile =
            serde_json::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

        if config_file.version != env!("CARGO_PKG_VERSION") {
            log::warn!(
                "config file version {} doesn't match planner version {}; using defaults for new settings",
                config_file.version,
                env!("CARGO_PKG_VERSION")
            );
        }

        Self::validate_settings(&config_file.settings).map_err(ConfigError::Validation)?;

        self.settings = config_file.settings;
        Ok(self.settings.clone())
    }

    /// Save current settings to the configuration file
    pub fn save(&self) -> Result<(), ConfigError> {
        if let Some(parent) = self.config_path.parent() {
            if parent != Path::new("") && parent != Path::new(".") {
                fs::create_dir_all(parent).map_err(|e| ConfigError::Write(e.to_string()))?;
            }
        }

        let now = chrono::Utc::now().to_rfc3339();
        let config_file = ConfigFile {
            version: env!("CARGO_PKG_VERSION").to_string(),
            settings: self.settings.clone(),
            created_at: now.clone(),
            modified_at: now,
        };

        let content = serde_json::to_string_pretty(&config_file)
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;

        fs::write(&self.config_path, content).map_err(|e| ConfigError::Write(e.to_string()))?;

        Ok(())
    }

    /// Validate, then store and save new settings.
    pub fn update_settings(&mut self, settings: PlannerSettings) -> Result<(), ConfigError> {
        Self::validate_settings(&settings).map_err(ConfigError::Validation)?;
        self.settings = settings;
        self.save()
    }

    pub fn settings(&self) -> &PlannerSettings {
        &self.settings
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn schema() -> ConfigSchema {
        ConfigSchema {
            room_order: ConfigOption {
                default: PlannerSettings::default().room_order,
                valid_range: None,
                description: "Rooms in the order visitors walk through them".to_string(),
            },
            report_width: ConfigOption {
                default: DEFAULT_REPORT_WIDTH,
                valid_range: Some((40, 200)),
                description: "Width of section rules in the text report".to_string(),
            },
            autosave_backup: ConfigOption {
                default: false,
                valid_range: None,
                description: "Keep a .bak copy when overwriting a show file".to_string(),
            },
        }
    }

    /// Check settings against the schema, collecting every violation.
    pub fn validate_settings(settings: &PlannerSettings) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        let schema = Self::schema();

        if settings.room_order.is_empty() {
            errors.push("room_order must name at least one room".to_string());
        }
        if settings.room_order.iter().any(|name| name.trim().is_empty()) {
            errors.push("room_order must not contain empty names".to_string());
        }
        for (index, name) in settings.room_order.iter().enumerate() {
            if settings.room_order[..index].contains(name) {
                errors.push(format!("room_order lists {:?} more than once", name));
            }
        }

        if let Some((min, max)) = schema.report_width.valid_range {
            if settings.report_width < min || settings.report_width > max {
                errors.push(format!("report_width must be between {} and {}", min, max));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn reset_to_defaults(&mut self) -> Result<(), ConfigError> {
        self.settings = PlannerSettings::default();
        self.save()
    }
}
