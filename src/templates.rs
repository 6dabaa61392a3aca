//! Named pipeline templates.
//!
//! A template is a shorthand for a complete component list. Users write
//! `pipeline: supervised_embeddings` instead of spelling out every component,
//! and [`ConfigLoader`](crate::config::ConfigLoader) expands the name through
//! a [`TemplateRegistry`].
//!
//! The registry is assembled once (usually with [`TemplateRegistry::builtin`])
//! and is read-only afterwards. [`TemplateRegistry::lookup`] hands out owned
//! copies, so editing a loaded configuration never reaches back into the
//! registry.

use std::collections::BTreeMap;

use crate::config::ComponentSpec;
use crate::errors::{ConfigError, Result};

/// Old template names that still resolve, mapped to their current names.
const LEGACY_ALIASES: &[(&str, &str)] = &[
    ("spacy_sklearn", "pretrained_embeddings_spacy"),
    ("tensorflow_embedding", "supervised_embeddings"),
];

/// Immutable table of template name → ordered component list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateRegistry {
    templates: BTreeMap<String, Vec<ComponentSpec>>,
    aliases: BTreeMap<String, String>,
}

impl TemplateRegistry {
    /// A registry with no templates.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in template set.
    pub fn builtin() -> Self {
        let mut registry = Self::empty()
            .with_template(
                "pretrained_embeddings_spacy",
                vec![
                    ComponentSpec::new("SpacyNLP"),
                    ComponentSpec::new("SpacyTokenizer"),
                    ComponentSpec::new("SpacyFeaturizer"),
                    ComponentSpec::new("RegexFeaturizer"),
                    ComponentSpec::new("CRFEntityExtractor"),
                    ComponentSpec::new("EntitySynonymMapper"),
                    ComponentSpec::new("SklearnIntentClassifier"),
                ],
            )
            .with_template("keyword", vec![ComponentSpec::new("KeywordIntentClassifier")])
            .with_template(
                "supervised_embeddings",
                vec![
                    ComponentSpec::new("WhitespaceTokenizer"),
                    ComponentSpec::new("RegexFeaturizer"),
                    ComponentSpec::new("CRFEntityExtractor"),
                    ComponentSpec::new("EntitySynonymMapper"),
                    ComponentSpec::new("CountVectorsFeaturizer"),
                    ComponentSpec::new("CountVectorsFeaturizer")
                        .with_param("analyzer", "char_wb")
                        .with_param("min_ngram", 1)
                        .with_param("max_ngram", 4),
                    ComponentSpec::new("EmbeddingIntentClassifier"),
                ],
            )
            .with_template(
                "pretrained_embeddings_convert",
                vec![
                    ComponentSpec::new("ConveRTTokenizer"),
                    ComponentSpec::new("ConveRTFeaturizer"),
                    ComponentSpec::new("EmbeddingIntentClassifier"),
                ],
            );
        for (legacy, current) in LEGACY_ALIASES {
            registry = registry.with_alias(*legacy, *current);
        }
        registry
    }

    /// Builder method: register a template.
    pub fn with_template(
        mut self,
        name: impl Into<String>,
        components: Vec<ComponentSpec>,
    ) -> Self {
        self.templates.insert(name.into(), components);
        self
    }

    /// Builder method: register an old name that resolves to `target`.
    pub fn with_alias(mut self, legacy: impl Into<String>, target: impl Into<String>) -> Self {
        self.aliases.insert(legacy.into(), target.into());
        self
    }

    /// Owned copy of the components registered under `name`.
    pub fn lookup(&self, name: &str) -> Result<Vec<ComponentSpec>> {
        self.templates
            .get(name)
            .cloned()
            .ok_or_else(|| ConfigError::unknown_template(name, self.names()))
    }

    /// The current name for a legacy alias, if `name` is one.
    pub fn resolve_alias(&self, name: &str) -> Option<&str> {
        self.aliases.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    /// Registered template names, sorted.
    pub fn names(&self) -> Vec<String> {
        self.templates.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ComponentSpec])> {
        self.templates
            .iter()
            .map(|(name, components)| (name.as_str(), components.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
