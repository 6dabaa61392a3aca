//! Layered configuration merge.
//!
//! Layers are applied in a fixed order:
//!
//! 1. global defaults
//! 2. template expansion (replaces the default pipeline)
//! 3. explicit pipeline list (replaces whatever pipeline came before)
//! 4. explicit non-pipeline keys (override defaults key by key)
//!
//! The pipeline is replaced wholesale, never merged element-wise. A source
//! provides either a template or an explicit list, never both, but the order
//! is fixed regardless.

use serde_json::{Map, Value};

use super::component::ComponentSpec;
use super::defaults::{DefaultSettings, PIPELINE_KEY};
use super::store::PipelineConfig;

/// The inputs of one merge, kept separate until [`ConfigLayers::merge`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigLayers {
    pub defaults: DefaultSettings,
    pub template: Option<Vec<ComponentSpec>>,
    pub pipeline: Option<Vec<ComponentSpec>>,
    pub overrides: Map<String, Value>,
}

impl ConfigLayers {
    pub fn new(defaults: DefaultSettings) -> Self {
        Self {
            defaults,
            ..Default::default()
        }
    }

    pub fn with_template(mut self, components: Vec<ComponentSpec>) -> Self {
        self.template = Some(components);
        self
    }

    pub fn with_pipeline(mut self, components: Vec<ComponentSpec>) -> Self {
        self.pipeline = Some(components);
        self
    }

    pub fn with_overrides(mut self, overrides: Map<String, Value>) -> Self {
        self.overrides = overrides;
        self
    }

    /// Apply every layer in order and produce the resolved configuration.
    pub fn merge(self) -> PipelineConfig {
        let Self {
            defaults,
            template,
            pipeline,
            overrides,
        } = self;

        let mut settings = defaults.settings();
        let mut components = defaults.pipeline;

        if let Some(expanded) = template {
            tracing::debug!(components = expanded.len(), "applying template layer");
            components = expanded;
        }

        if let Some(explicit) = pipeline {
            tracing::debug!(components = explicit.len(), "applying explicit pipeline layer");
            components = explicit;
        }

        for (key, value) in overrides {
            if key == PIPELINE_KEY {
                continue;
            }
            settings.insert(key, value);
        }

        PipelineConfig::from_parts(components, settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn names(config: &PipelineConfig) -> Vec<&str> {
        config.component_names()
    }

    #[test]
    fn test_defaults_only() {
        let config = ConfigLayers::default().merge();
        assert_eq!(config, PipelineConfig::default());
    }

    #[test]
    fn test_template_replaces_default_pipeline() {
        let defaults = DefaultSettings {
            pipeline: vec![ComponentSpec::new("WhitespaceTokenizer")],
            ..Default::default()
        };
        let config = ConfigLayers::new(defaults)
            .with_template(vec![ComponentSpec::new("KeywordIntentClassifier")])
            .merge();
        assert_eq!(names(&config), ["KeywordIntentClassifier"]);
    }

    #[test]
    fn test_explicit_pipeline_applied_after_template() {
        let config = ConfigLayers::default()
            .with_template(vec![ComponentSpec::new("KeywordIntentClassifier")])
            .with_pipeline(vec![
                ComponentSpec::new("WhitespaceTokenizer"),
                ComponentSpec::new("EmbeddingIntentClassifier"),
            ])
            .merge();
        assert_eq!(
            names(&config),
            ["WhitespaceTokenizer", "EmbeddingIntentClassifier"]
        );
    }

    #[test]
    fn test_overrides_replace_keys_and_keep_others() {
        let defaults = DefaultSettings {
            extra: json!({ "epochs": 100, "batch_size": 32 })
                .as_object()
                .cloned()
                .unwrap(),
            ..Default::default()
        };
        let config = ConfigLayers::new(defaults)
            .with_overrides(
                json!({ "language": "de", "epochs": 5 })
                    .as_object()
                    .cloned()
                    .unwrap(),
            )
            .merge();
        assert_eq!(config.language(), Some("de"));
        assert_eq!(config.get("epochs"), Some(&json!(5)));
        assert_eq!(config.get("batch_size"), Some(&json!(32)));
        assert_eq!(config.get("data"), Some(&Value::Null));
    }

    #[test]
    fn test_pipeline_key_in_overrides_is_ignored() {
        let config = ConfigLayers::default()
            .with_pipeline(vec![ComponentSpec::new("RegexFeaturizer")])
            .with_overrides(json!({ "pipeline": [] }).as_object().cloned().unwrap())
            .merge();
        assert_eq!(names(&config), ["RegexFeaturizer"]);
    }
}
