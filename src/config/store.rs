//! The resolved pipeline configuration.
//!
//! A [`PipelineConfig`] is what [`ConfigLoader`](super::loader::ConfigLoader)
//! produces: an ordered component list plus flat global settings. It is owned
//! by whoever loaded it and only changes through the explicit mutators below.
//!
//! # Mapping shape
//!
//! [`PipelineConfig::as_mapping`] returns the whole configuration as one
//! mapping. Keys are sorted; the `pipeline` array keeps execution order.
//!
//! ```json
//! {
//!   "data": null,
//!   "language": "en",
//!   "pipeline": [
//!     { "name": "WhitespaceTokenizer" },
//!     { "name": "SklearnIntentClassifier", "C": 324 }
//!   ]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::component::{parse_pipeline, ComponentSpec};
use super::defaults::{DefaultSettings, LANGUAGE_KEY, PIPELINE_KEY};
use crate::errors::{ConfigError, Result};

/// Ordered components plus global settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct PipelineConfig {
    pipeline: Vec<ComponentSpec>,
    /// Every top-level key except `pipeline`.
    settings: Map<String, Value>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::from_defaults(&DefaultSettings::default())
    }
}

impl PipelineConfig {
    /// Build a configuration from already-resolved parts.
    pub fn from_parts(pipeline: Vec<ComponentSpec>, mut settings: Map<String, Value>) -> Self {
        settings.remove(PIPELINE_KEY);
        Self { pipeline, settings }
    }

    pub fn from_defaults(defaults: &DefaultSettings) -> Self {
        Self::from_parts(defaults.pipeline.clone(), defaults.settings())
    }

    // ─── Components ─────────────────────────────────────────────────────

    pub fn pipeline(&self) -> &[ComponentSpec] {
        &self.pipeline
    }

    /// Number of components in the pipeline.
    pub fn component_count(&self) -> usize {
        self.pipeline.len()
    }

    /// Component names in execution order.
    pub fn component_names(&self) -> Vec<&str> {
        self.pipeline.iter().map(ComponentSpec::name).collect()
    }

    /// The component at `index`, or [`ConfigError::ComponentIndex`].
    pub fn spec_at(&self, index: usize) -> Result<&ComponentSpec> {
        self.pipeline
            .get(index)
            .ok_or_else(|| ConfigError::component_index(index, self.pipeline.len()))
    }

    /// Update (or insert) attributes on the component at `index`.
    ///
    /// Other components are never touched and applying the same attributes
    /// twice gives the same result as applying them once. Either every
    /// attribute is applied or, on error, none is.
    pub fn set_component_attribute<K, V, I>(&mut self, index: usize, attrs: I) -> Result<()>
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        let len = self.pipeline.len();
        let component = self
            .pipeline
            .get_mut(index)
            .ok_or_else(|| ConfigError::component_index(index, len))?;

        let mut updated = component.clone();
        for (key, value) in attrs {
            updated.set(key, value)?;
        }
        *component = updated;
        Ok(())
    }

    /// The component's keys layered over `defaults`.
    ///
    /// An index past the end is not an error here: a warning is logged and
    /// the defaults are returned unchanged.
    pub fn component_config(
        &self,
        index: usize,
        defaults: &Map<String, Value>,
    ) -> Map<String, Value> {
        match self.pipeline.get(index) {
            Some(component) => override_defaults(defaults, component.as_map()),
            None => {
                tracing::warn!(
                    index,
                    components = self.pipeline.len(),
                    "Tried to get configuration value for component number {index} which is \
                     not part of the pipeline. Returning defaults."
                );
                defaults.clone()
            }
        }
    }

    // ─── Global settings ────────────────────────────────────────────────

    /// A global setting. `pipeline` is not a setting; use [`Self::pipeline`].
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.settings.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        key == PIPELINE_KEY || self.settings.contains_key(key)
    }

    /// Set a global setting.
    ///
    /// Setting `pipeline` replaces the component list and requires a list
    /// of component mappings.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Result<()> {
        let key = key.into();
        let value = value.into();
        if key == PIPELINE_KEY {
            self.pipeline = match value {
                Value::Array(items) => parse_pipeline(items)?,
                Value::Null => Vec::new(),
                other => {
                    return Err(ConfigError::invalid_config(format!(
                        "`pipeline` must be a list of components, got {other}"
                    )))
                }
            };
        } else {
            self.settings.insert(key, value);
        }
        Ok(())
    }

    /// Remove a global setting. Removing `pipeline` empties the component list.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        if key == PIPELINE_KEY {
            let old = std::mem::take(&mut self.pipeline);
            return Some(pipeline_value(&old));
        }
        self.settings.remove(key)
    }

    /// Number of top-level keys, counting `pipeline`.
    pub fn len(&self) -> usize {
        self.settings.len() + 1
    }

    /// Always false: `pipeline` is present even when it has no components.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Top-level `(key, value)` pairs in key order, `pipeline` included.
    pub fn items(&self) -> impl Iterator<Item = (String, Value)> {
        self.as_mapping().into_iter()
    }

    pub fn language(&self) -> Option<&str> {
        self.settings.get(LANGUAGE_KEY).and_then(Value::as_str)
    }

    /// The full configuration as one mapping (keys sorted, pipeline ordered).
    pub fn as_mapping(&self) -> Map<String, Value> {
        let mut out = self.settings.clone();
        out.insert(PIPELINE_KEY.to_string(), pipeline_value(&self.pipeline));
        out
    }

    // ─── Persistence ────────────────────────────────────────────────────

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(&self.as_mapping())?)
    }

    /// Write the configuration as YAML. Loading the file again yields an
    /// equal configuration.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let yaml = self.to_yaml()?;
        std::fs::write(path, yaml)
            .map_err(|e| ConfigError::io(path.display().to_string(), e.to_string()))
    }
}

fn pipeline_value(pipeline: &[ComponentSpec]) -> Value {
    Value::Array(pipeline.iter().map(ComponentSpec::to_value).collect())
}

/// `custom` layered over `defaults`; keys in `custom` win.
pub fn override_defaults(
    defaults: &Map<String, Value>,
    custom: &Map<String, Value>,
) -> Map<String, Value> {
    let mut out = defaults.clone();
    for (key, value) in custom {
        out.insert(key.clone(), value.clone());
    }
    out
}

impl TryFrom<Map<String, Value>> for PipelineConfig {
    type Error = ConfigError;

    fn try_from(mut map: Map<String, Value>) -> Result<Self> {
        let pipeline = match map.remove(PIPELINE_KEY) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => parse_pipeline(items)?,
            Some(other) => {
                return Err(ConfigError::invalid_config(format!(
                    "a resolved configuration needs `pipeline` as a list of components, got {other}"
                )))
            }
        };
        Ok(Self::from_parts(pipeline, map))
    }
}

impl From<PipelineConfig> for Map<String, Value> {
    fn from(config: PipelineConfig) -> Self {
        config.as_mapping()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> PipelineConfig {
        PipelineConfig::from_parts(
            vec![
                ComponentSpec::new("WhitespaceTokenizer"),
                ComponentSpec::new("RegexFeaturizer"),
                ComponentSpec::new("SklearnIntentClassifier"),
            ],
            json!({ "language": "en", "data": null })
                .as_object()
                .cloned()
                .unwrap(),
        )
    }

    #[test]
    fn test_default_equals_builtin_baseline() {
        let config = PipelineConfig::default();
        assert_eq!(config.as_mapping(), DefaultSettings::default().to_mapping());
        assert_eq!(config.component_count(), 0);
        assert_eq!(config.language(), Some("en"));
    }

    #[test]
    fn test_spec_at() {
        let config = sample();
        assert_eq!(config.spec_at(1).unwrap().name(), "RegexFeaturizer");
        let err = config.spec_at(3).unwrap_err();
        assert_eq!(err, ConfigError::component_index(3, 3));
    }

    #[test]
    fn test_set_component_attribute_only_touches_index() {
        let mut config = sample();
        config.set_component_attribute(2, [("C", 324)]).unwrap();

        assert_eq!(config.spec_at(0).unwrap(), &ComponentSpec::new("WhitespaceTokenizer"));
        assert_eq!(config.spec_at(1).unwrap(), &ComponentSpec::new("RegexFeaturizer"));
        assert_eq!(
            config.spec_at(2).unwrap(),
            &ComponentSpec::new("SklearnIntentClassifier").with_param("C", 324)
        );
    }

    #[test]
    fn test_set_component_attribute_idempotent() {
        let mut once = sample();
        once.set_component_attribute(0, [("case_sensitive", false)]).unwrap();
        let mut twice = once.clone();
        twice.set_component_attribute(0, [("case_sensitive", false)]).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_set_component_attribute_out_of_range() {
        let mut config = sample();
        let before = config.clone();
        let err = config.set_component_attribute(7, [("C", 1)]).unwrap_err();
        assert!(err.is_component_index());
        assert_eq!(config, before);
    }

    #[test]
    fn test_set_component_attribute_is_all_or_nothing() {
        let mut config = sample();
        let before = config.clone();
        let attrs: Vec<(&str, Value)> = vec![("C", json!(1)), ("name", json!(5))];
        assert!(config.set_component_attribute(2, attrs).is_err());
        assert_eq!(config, before);
    }

    #[test]
    fn test_component_config_layers_over_defaults() {
        let mut config = sample();
        config.set_component_attribute(2, [("C", 10)]).unwrap();
        let defaults = json!({ "C": 1, "kernel": "linear" }).as_object().cloned().unwrap();

        let merged = config.component_config(2, &defaults);
        assert_eq!(merged.get("C"), Some(&json!(10)));
        assert_eq!(merged.get("kernel"), Some(&json!("linear")));
        assert_eq!(merged.get("name"), Some(&json!("SklearnIntentClassifier")));

        assert_eq!(config.component_config(99, &defaults), defaults);
    }

    #[test]
    fn test_settings_access() {
        let mut config = sample();
        assert!(config.contains_key("pipeline"));
        assert!(!config.contains_key("epochs"));

        config.set("epochs", 300).unwrap();
        assert_eq!(config.get("epochs"), Some(&json!(300)));
        assert_eq!(config.len(), 4);

        assert_eq!(config.remove("epochs"), Some(json!(300)));
        assert_eq!(config.len(), 3);
        assert!(!config.is_empty());
    }

    #[test]
    fn test_items_in_key_order() {
        let config = sample();
        let keys: Vec<String> = config.items().map(|(key, _)| key).collect();
        assert_eq!(keys, ["data", "language", "pipeline"]);

        let (_, pipeline) = config.items().last().unwrap();
        assert_eq!(
            pipeline,
            json!([
                { "name": "WhitespaceTokenizer" },
                { "name": "RegexFeaturizer" },
                { "name": "SklearnIntentClassifier" }
            ])
        );
        assert_eq!(config.items().count(), config.len());
    }

    #[test]
    fn test_set_pipeline_key_replaces_components() {
        let mut config = sample();
        config
            .set("pipeline", json!([{ "name": "KeywordIntentClassifier" }]))
            .unwrap();
        assert_eq!(config.component_names(), ["KeywordIntentClassifier"]);

        assert!(config.set("pipeline", "keyword").is_err());

        let removed = config.remove("pipeline").unwrap();
        assert_eq!(removed, json!([{ "name": "KeywordIntentClassifier" }]));
        assert_eq!(config.component_count(), 0);
    }

    #[test]
    fn test_as_mapping_keeps_pipeline_order() {
        let mapping = sample().as_mapping();
        let keys: Vec<&String> = mapping.keys().collect();
        assert_eq!(keys, ["data", "language", "pipeline"]);
        assert_eq!(
            mapping["pipeline"],
            json!([
                { "name": "WhitespaceTokenizer" },
                { "name": "RegexFeaturizer" },
                { "name": "SklearnIntentClassifier" }
            ])
        );
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = sample();
        let json = serde_json::to_string(&config).unwrap();
        let back: PipelineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_deserialize_rejects_template_name() {
        let res: std::result::Result<PipelineConfig, _> =
            serde_json::from_str(r#"{ "pipeline": "keyword" }"#);
        assert!(res.is_err());
    }
}
