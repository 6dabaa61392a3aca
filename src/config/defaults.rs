//! Global default settings.
//!
//! Every loaded configuration starts from a [`DefaultSettings`] baseline. The
//! built-in baseline is:
//!
//! ```yaml
//! language: en
//! pipeline: []
//! data: null
//! ```
//!
//! A custom baseline can be read from a YAML file with
//! [`DefaultSettings::from_path`]; unrecognized keys are kept and become global
//! settings of every configuration loaded on top of it.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::component::ComponentSpec;
use crate::errors::{ConfigError, Result};

/// Key holding the ordered component list.
pub const PIPELINE_KEY: &str = "pipeline";

/// Key holding the pipeline language.
pub const LANGUAGE_KEY: &str = "language";

/// Key holding the training data location.
pub const DATA_KEY: &str = "data";

/// The fixed baseline applied before any template or user override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultSettings {
    #[serde(default = "default_language")]
    pub language: String,

    #[serde(default)]
    pub pipeline: Vec<ComponentSpec>,

    #[serde(default)]
    pub data: Value,

    /// Any further global keys carried by a custom defaults file.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_language() -> String {
    "en".to_string()
}

impl Default for DefaultSettings {
    fn default() -> Self {
        Self {
            language: default_language(),
            pipeline: Vec::new(),
            data: Value::Null,
            extra: Map::new(),
        }
    }
}

impl DefaultSettings {
    /// Read a defaults document (YAML or JSON).
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::io(path.display().to_string(), e.to_string()))?;
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&text).map_err(|e| {
            ConfigError::invalid_config(format!(
                "Failed to read defaults file '{}'. Error: {e}",
                path.display()
            ))
        })
    }

    /// Global settings without the pipeline, keys sorted.
    pub fn settings(&self) -> Map<String, Value> {
        let mut out = self.extra.clone();
        out.insert(LANGUAGE_KEY.to_string(), Value::String(self.language.clone()));
        out.insert(DATA_KEY.to_string(), self.data.clone());
        out
    }

    /// The full baseline mapping, including `pipeline`.
    pub fn to_mapping(&self) -> Map<String, Value> {
        let mut out = self.settings();
        out.insert(
            PIPELINE_KEY.to_string(),
            Value::Array(self.pipeline.iter().map(ComponentSpec::to_value).collect()),
        );
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builtin_baseline() {
        let defaults = DefaultSettings::default();
        assert_eq!(
            Value::Object(defaults.to_mapping()),
            json!({ "language": "en", "pipeline": [], "data": null })
        );
    }

    #[test]
    fn test_deserialize_keeps_extra_keys() {
        let defaults: DefaultSettings =
            serde_yaml::from_str("language: de\nepochs: 50\n").unwrap();
        assert_eq!(defaults.language, "de");
        assert!(defaults.pipeline.is_empty());
        assert_eq!(defaults.extra.get("epochs"), Some(&json!(50)));
        assert_eq!(defaults.settings().get("epochs"), Some(&json!(50)));
    }

    #[test]
    fn test_from_path_missing_file_is_io_error() {
        let err = DefaultSettings::from_path("/nonexistent/defaults.yml").unwrap_err();
        assert_eq!(err.code(), crate::error_code::ErrorCode::Io);
    }
}
