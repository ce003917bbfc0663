//! Settings management

use crate::error::{Result, TagCloudError};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// File looked up in the working directory when no settings path is given
pub const SETTINGS_FILE: &str = "tagcloud.toml";

/// Environment variable naming a settings file
pub const SETTINGS_ENV: &str = "TAGCLOUD_SETTINGS";

/// Related name a tag foreign key conventionally carries
pub const DEFAULT_RELATED_NAME: &str = "taggit_taggeditem_items";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CloudSettings {
    pub min_weight: f64,
    pub max_weight: f64,
}

impl Default for CloudSettings {
    fn default() -> Self {
        CloudSettings {
            min_weight: 1.0,
            max_weight: 6.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Swallow render-time tag errors instead of failing the page
    pub silent_failures: bool,
}

/// Process-wide settings, threaded explicitly into the tagging environment
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub tag_model: String,
    pub tagged_item_model: String,
    pub tag_field_related_name: String,
    /// Limit applied to tag lists that don't give one
    pub default_limit: Option<usize>,
    /// Directory overriding the built-in inclusion partials
    pub templates_dir: Option<PathBuf>,
    pub cloud: CloudSettings,
    pub render: RenderSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            tag_model: "taggit.Tag".to_string(),
            tagged_item_model: "taggit.TaggedItem".to_string(),
            tag_field_related_name: DEFAULT_RELATED_NAME.to_string(),
            default_limit: None,
            templates_dir: None,
            cloud: CloudSettings::default(),
            render: RenderSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from a TOML file
    ///
    /// A relative `templates_dir` is resolved against the file's directory.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            TagCloudError::Config(format!(
                "Failed to read settings {}: {}",
                path.display(),
                e
            ))
        })?;

        let mut settings = Self::from_toml(&contents)?;
        if let (Some(dir), Some(base)) = (&settings.templates_dir, path.parent()) {
            if dir.is_relative() {
                settings.templates_dir = Some(base.join(dir));
            }
        }
        log::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Parse and validate settings from TOML text
    pub fn from_toml(contents: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(contents)
            .map_err(|e| TagCloudError::Config(format!("Failed to parse settings: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Find settings: explicit path, then `TAGCLOUD_SETTINGS`, then
    /// `tagcloud.toml` in `dir`, else defaults
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from_file(path);
        }

        if let Ok(path) = std::env::var(SETTINGS_ENV) {
            let path = PathBuf::from(path);
            if !path.is_file() {
                return Err(TagCloudError::Config(format!(
                    "{} is set to '{}' but no such file exists",
                    SETTINGS_ENV,
                    path.display()
                )));
            }
            return Self::load_from_file(&path);
        }

        let local = dir.join(SETTINGS_FILE);
        if local.is_file() {
            Self::load_from_file(&local)
        } else {
            log::debug!("No settings file found, using defaults");
            Ok(Settings::default())
        }
    }

    pub fn validate(&self) -> Result<()> {
        let CloudSettings {
            min_weight,
            max_weight,
        } = self.cloud;
        if !min_weight.is_finite() || !max_weight.is_finite() {
            return Err(TagCloudError::Config(
                "Cloud weights must be finite numbers".to_string(),
            ));
        }
        if min_weight > max_weight {
            return Err(TagCloudError::Config(format!(
                "min_weight ({}) exceeds max_weight ({})",
                min_weight, max_weight
            )));
        }
        if self.default_limit == Some(0) {
            return Err(TagCloudError::Config(
                "default_limit must be a positive integer".to_string(),
            ));
        }
        Ok(())
    }
}
