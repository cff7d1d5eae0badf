//! Generator configuration file support.
//!
//! Configuration is read from TOML. Every section and field is optional:
//!
//! ```toml
//! [catalog]
//! slots = ["08:00-09:00", "09:00-10:00"]
//!
//! [preferences]
//! avoid_consecutive_classes = true
//! prefer_morning_slots = true
//! max_daily_hours = 8
//!
//! [generation]
//! max_options = 10
//! credit_existing_sessions = true
//! log_filter = "info"
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TimetableError};
use crate::models::time::DEFAULT_SLOTS;
use crate::models::{GenerationConstraints, GenerationRequest, SlotCatalog};

/// Upper bound on alternative timetables per request.
pub const MAX_OPTIONS: usize = 10;

/// Generator configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub preferences: PreferenceDefaults,
    #[serde(default)]
    pub generation: GenerationSettings,
}

/// Default time-slot catalog, used when a caller supplies none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSettings {
    #[serde(default = "default_slots")]
    pub slots: Vec<String>,
}

/// Preferences applied when a request omits them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferenceDefaults {
    #[serde(default = "default_true")]
    pub avoid_consecutive_classes: bool,
    #[serde(default = "default_true")]
    pub prefer_morning_slots: bool,
    #[serde(default = "default_max_daily_hours")]
    pub max_daily_hours: u32,
}

/// Run-level settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationSettings {
    #[serde(default = "default_max_options")]
    pub max_options: usize,
    /// Count sessions a batch already holds toward a subject's requirement.
    #[serde(default = "default_true")]
    pub credit_existing_sessions: bool,
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_slots() -> Vec<String> {
    DEFAULT_SLOTS.iter().map(|s| s.to_string()).collect()
}

fn default_true() -> bool {
    true
}

fn default_max_daily_hours() -> u32 {
    8
}

fn default_max_options() -> usize {
    MAX_OPTIONS
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            slots: default_slots(),
        }
    }
}

impl Default for PreferenceDefaults {
    fn default() -> Self {
        Self {
            avoid_consecutive_classes: default_true(),
            prefer_morning_slots: default_true(),
            max_daily_hours: default_max_daily_hours(),
        }
    }
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            max_options: default_max_options(),
            credit_existing_sessions: default_true(),
            log_filter: default_log_filter(),
        }
    }
}

impl GeneratorConfig {
    /// Parses configuration from TOML text.
    ///
    /// # Errors
    /// [`TimetableError::Config`] on malformed TOML, an invalid catalog slot,
    /// or a `max_options` outside `1..=10`.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: GeneratorConfig = toml::from_str(content)
            .map_err(|e| TimetableError::Config(format!("Failed to parse config: {e}")))?;
        config.check()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            TimetableError::Config(format!(
                "Failed to read config file {}: {e}",
                path.as_ref().display()
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// The configured default slot catalog.
    pub fn slot_catalog(&self) -> Result<SlotCatalog> {
        SlotCatalog::parse(self.catalog.slots.as_slice())
            .map_err(|e| TimetableError::Config(format!("Invalid catalog slot: {e}")))
    }

    /// Preferences applied to requests that omit them.
    pub fn default_constraints(&self) -> GenerationConstraints {
        GenerationConstraints {
            avoid_consecutive_classes: self.preferences.avoid_consecutive_classes,
            prefer_morning_slots: self.preferences.prefer_morning_slots,
            max_daily_hours: self.preferences.max_daily_hours,
        }
    }

    /// Builds a request for `batch_ids`; empty `slots` fall back to the
    /// configured catalog.
    pub fn request_for<B: Into<String>>(
        &self,
        batch_ids: impl IntoIterator<Item = B>,
        slots: Vec<String>,
    ) -> GenerationRequest {
        let slots = if slots.is_empty() {
            self.catalog.slots.clone()
        } else {
            slots
        };
        GenerationRequest::new(batch_ids, slots)
    }

    fn check(&self) -> Result<()> {
        self.slot_catalog()?;
        if !(1..=MAX_OPTIONS).contains(&self.generation.max_options) {
            return Err(TimetableError::Config(format!(
                "max_options must be between 1 and {MAX_OPTIONS}, got {}",
                self.generation.max_options
            )));
        }
        Ok(())
    }
}
