//! Component instantiation seams.
//!
//! Building real NLP components is outside this crate. A pipeline builder
//! implements [`ComponentBuilder`]; whatever it produces only has to expose
//! its name through [`PipelineComponent`] so requirements can be checked
//! against the instantiated pipeline.
//!
//! [`DeclaredComponentBuilder`] is a builder that instantiates nothing: it
//! resolves each component's effective configuration (registered component
//! defaults overridden by its `ComponentSpec`) and keeps it alongside the name.

use rustc_hash::FxHashMap;
use serde_json::{Map, Value};

use crate::config::{override_defaults, ComponentSpec, PipelineConfig};
use crate::errors::Result;

/// A runnable pipeline component, as far as this crate is concerned.
pub trait PipelineComponent: Send + Sync {
    /// The component class name, matching [`ComponentSpec::name`].
    fn name(&self) -> &str;
}

/// Creates components from their specs.
pub trait ComponentBuilder {
    /// Instantiate the component described by `spec`.
    ///
    /// `config` is the whole resolved configuration, for builders that
    /// propagate global settings into components.
    fn create_component(
        &self,
        spec: &ComponentSpec,
        config: &PipelineConfig,
    ) -> Result<Box<dyn PipelineComponent>>;
}

/// Instantiate every component of `config` in pipeline order.
pub fn build_pipeline(
    builder: &dyn ComponentBuilder,
    config: &PipelineConfig,
) -> Result<Vec<Box<dyn PipelineComponent>>> {
    config
        .pipeline()
        .iter()
        .map(|spec| builder.create_component(spec, config))
        .collect()
}

// ─── Declared components ────────────────────────────────────────────────────

/// A component reduced to its name and effective configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct DeclaredComponent {
    name: String,
    config: Map<String, Value>,
}

impl DeclaredComponent {
    pub fn config(&self) -> &Map<String, Value> {
        &self.config
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.config.get(key)
    }
}

impl PipelineComponent for DeclaredComponent {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Builds [`DeclaredComponent`]s, layering each spec over per-component
/// defaults registered with [`Self::with_component_defaults`].
#[derive(Debug, Clone, Default)]
pub struct DeclaredComponentBuilder {
    defaults: FxHashMap<String, Map<String, Value>>,
}

impl DeclaredComponentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: register default hyperparameters for a component name.
    pub fn with_component_defaults(
        mut self,
        name: impl Into<String>,
        defaults: Map<String, Value>,
    ) -> Self {
        self.defaults.insert(name.into(), defaults);
        self
    }

    /// The effective configuration of `spec`.
    pub fn resolve(&self, spec: &ComponentSpec) -> DeclaredComponent {
        let config = match self.defaults.get(spec.name()) {
            Some(defaults) => override_defaults(defaults, spec.as_map()),
            None => spec.as_map().clone(),
        };
        DeclaredComponent {
            name: spec.name().to_string(),
            config,
        }
    }
}

impl ComponentBuilder for DeclaredComponentBuilder {
    fn create_component(
        &self,
        spec: &ComponentSpec,
        _config: &PipelineConfig,
    ) -> Result<Box<dyn PipelineComponent>> {
        Ok(Box::new(self.resolve(spec)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn builder() -> DeclaredComponentBuilder {
        DeclaredComponentBuilder::new()
            .with_component_defaults(
                "CountVectorsFeaturizer",
                json!({ "analyzer": "word", "min_ngram": 1, "max_ngram": 1 })
                    .as_object()
                    .cloned()
                    .unwrap(),
            )
            .with_component_defaults(
                "EmbeddingIntentClassifier",
                json!({ "epochs": 300 }).as_object().cloned().unwrap(),
            )
    }

    #[test]
    fn test_spec_overrides_component_defaults() {
        let spec = ComponentSpec::new("CountVectorsFeaturizer").with_param("max_ngram", 3);
        let component = builder().resolve(&spec);
        assert_eq!(component.name(), "CountVectorsFeaturizer");
        assert_eq!(component.get("max_ngram"), Some(&json!(3)));
        assert_eq!(component.get("analyzer"), Some(&json!("word")));
    }

    #[test]
    fn test_unregistered_component_keeps_spec() {
        let spec = ComponentSpec::new("RegexFeaturizer");
        let component = builder().resolve(&spec);
        assert_eq!(component.config(), spec.as_map());
    }

    #[test]
    fn test_build_pipeline_keeps_order() {
        let config = PipelineConfig::from_parts(
            vec![
                ComponentSpec::new("WhitespaceTokenizer"),
                ComponentSpec::new("EmbeddingIntentClassifier").with_param("epochs", 10),
            ],
            Map::new(),
        );
        let components = build_pipeline(&builder(), &config).unwrap();
        let names: Vec<&str> = components.iter().map(|c| c.name()).collect();
        assert_eq!(names, ["WhitespaceTokenizer", "EmbeddingIntentClassifier"]);
    }
}
