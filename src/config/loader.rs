//! Loading configuration documents.
//!
//! [`ConfigLoader::load`] turns a configuration source into a
//! [`PipelineConfig`]:
//!
//! 1. Parse the source into a mapping (YAML or JSON; an empty document is an
//!    empty mapping).
//! 2. Classify `pipeline`: a string is a template name, a list is an explicit
//!    component list, absent keeps the default pipeline and `null` empties it.
//! 3. Merge defaults, template, explicit pipeline and the remaining keys with
//!    [`ConfigLayers::merge`].
//!
//! # Example
//!
//! ```yaml
//! language: en
//! pipeline: supervised_embeddings
//! ```

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use super::component::parse_pipeline;
use super::defaults::{DefaultSettings, PIPELINE_KEY};
use super::merge::ConfigLayers;
use super::store::PipelineConfig;
use crate::errors::{ConfigError, Result};
use crate::templates::TemplateRegistry;

/// Where a configuration comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    /// A YAML or JSON document on disk.
    Path(PathBuf),
    /// An already-parsed top-level mapping.
    Mapping(Map<String, Value>),
}

impl From<&Path> for ConfigSource {
    fn from(path: &Path) -> Self {
        Self::Path(path.to_path_buf())
    }
}

impl From<PathBuf> for ConfigSource {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<&str> for ConfigSource {
    fn from(path: &str) -> Self {
        Self::Path(PathBuf::from(path))
    }
}

impl From<Map<String, Value>> for ConfigSource {
    fn from(mapping: Map<String, Value>) -> Self {
        Self::Mapping(mapping)
    }
}

/// Resolves configuration sources against a template registry and a
/// defaults baseline.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    templates: TemplateRegistry,
    defaults: DefaultSettings,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// A loader with the built-in templates and the built-in defaults.
    pub fn new() -> Self {
        Self::with_parts(TemplateRegistry::builtin(), DefaultSettings::default())
    }

    pub fn with_parts(templates: TemplateRegistry, defaults: DefaultSettings) -> Self {
        Self {
            templates,
            defaults,
        }
    }

    pub fn templates(&self) -> &TemplateRegistry {
        &self.templates
    }

    pub fn defaults(&self) -> &DefaultSettings {
        &self.defaults
    }

    /// Load and resolve a configuration.
    pub fn load(&self, source: impl Into<ConfigSource>) -> Result<PipelineConfig> {
        match source.into() {
            ConfigSource::Path(path) => self.load_path(&path),
            ConfigSource::Mapping(mapping) => self.load_mapping(mapping),
        }
    }

    /// Read, parse and resolve the document at `path`.
    pub fn load_path(&self, path: &Path) -> Result<PipelineConfig> {
        let _span = tracing::info_span!("load_config", path = %path.display()).entered();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::io(path.display().to_string(), e.to_string()))?;
        let mapping = parse_document(&text, &path.display().to_string())?;
        self.resolve(mapping)
    }

    /// Parse and resolve a document held in memory. `origin` names it in errors.
    pub fn load_str(&self, text: &str, origin: &str) -> Result<PipelineConfig> {
        let mapping = parse_document(text, origin)?;
        self.resolve(mapping)
    }

    pub fn load_mapping(&self, mapping: Map<String, Value>) -> Result<PipelineConfig> {
        self.resolve(mapping)
    }

    fn resolve(&self, mut mapping: Map<String, Value>) -> Result<PipelineConfig> {
        let mut layers = ConfigLayers::new(self.defaults.clone());

        match mapping.remove(PIPELINE_KEY) {
            None => {}
            Some(Value::Null) => layers = layers.with_pipeline(Vec::new()),
            Some(Value::String(name)) => {
                layers = layers.with_template(self.expand_template(&name)?);
            }
            Some(Value::Array(items)) => layers = layers.with_pipeline(parse_pipeline(items)?),
            Some(other) => {
                return Err(ConfigError::invalid_config(format!(
                    "`pipeline` must be a template name or a list of components, got {other}"
                )))
            }
        }

        Ok(layers.with_overrides(mapping).merge())
    }

    fn expand_template(&self, name: &str) -> Result<Vec<crate::config::ComponentSpec>> {
        let resolved = match self.templates.resolve_alias(name) {
            Some(current) => {
                tracing::warn!(
                    template = name,
                    replacement = current,
                    "You have specified the pipeline template '{name}' which has been renamed \
                     to '{current}'. Please update your configuration as the old name will \
                     stop working in a future version."
                );
                current
            }
            None => name,
        };

        tracing::debug!(template = resolved, "expanding pipeline template");
        self.templates.lookup(resolved).map_err(|err| match err {
            ConfigError::UnknownTemplate { name, known } => ConfigError::invalid_config(format!(
                "No pipeline specified and unknown pipeline template '{name}' passed. \
                 Known pipeline templates: {}",
                known.join(", ")
            )),
            other => other,
        })
    }
}

/// Parse a YAML/JSON document into its top-level mapping.
fn parse_document(text: &str, origin: &str) -> Result<Map<String, Value>> {
    let blank = text.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#')
    });
    if blank {
        return Ok(Map::new());
    }

    let value: Value = serde_yaml::from_str(text).map_err(|e| {
        ConfigError::invalid_config(format!(
            "Failed to read configuration file '{origin}'. Error: {e}"
        ))
    })?;

    match value {
        Value::Object(mapping) => Ok(mapping),
        Value::Null => Ok(Map::new()),
        other => Err(ConfigError::invalid_config(format!(
            "Configuration file '{origin}' must contain a mapping at the top level, got {other}"
        ))),
    }
}

/// Load `source` with the built-in templates and defaults.
pub fn load(source: impl Into<ConfigSource>) -> Result<PipelineConfig> {
    ConfigLoader::new().load(source)
}
