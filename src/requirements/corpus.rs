//! Facts about a training corpus that decide which components are needed.
//!
//! The validator never sees raw training data, only a
//! [`TrainingCorpusSummary`]. Anything that can produce one implements
//! [`CorpusSummarySource`].

use serde::{Deserialize, Serialize};

/// Read-only counts derived from a training dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingCorpusSummary {
    /// Total training examples.
    #[serde(default)]
    pub examples: usize,
    /// Examples with at least one entity annotation.
    #[serde(default)]
    pub entity_examples: usize,
    /// Entity annotations produced by or meant for a pretrained extractor.
    #[serde(default)]
    pub pretrained_entity_examples: usize,
    #[serde(default)]
    pub regex_features: usize,
    #[serde(default)]
    pub lookup_tables: usize,
    /// Synonym mappings, explicit or inline.
    #[serde(default)]
    pub entity_synonyms: usize,
    /// Examples that pair an intent with a response.
    #[serde(default)]
    pub response_examples: usize,
}

impl TrainingCorpusSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_entity_examples(&self) -> bool {
        self.entity_examples > 0
    }

    pub fn has_pretrained_entity_examples(&self) -> bool {
        self.pretrained_entity_examples > 0
    }

    pub fn has_regex_features(&self) -> bool {
        self.regex_features > 0
    }

    pub fn has_lookup_tables(&self) -> bool {
        self.lookup_tables > 0
    }

    pub fn has_entity_synonyms(&self) -> bool {
        self.entity_synonyms > 0
    }

    pub fn has_response_examples(&self) -> bool {
        self.response_examples > 0
    }

    /// Builder method: set the example count
    pub fn with_examples(mut self, n: usize) -> Self {
        self.examples = n;
        self
    }

    /// Builder method: set the entity example count
    pub fn with_entity_examples(mut self, n: usize) -> Self {
        self.entity_examples = n;
        self
    }

    /// Builder method: set the pretrained entity annotation count
    pub fn with_pretrained_entity_examples(mut self, n: usize) -> Self {
        self.pretrained_entity_examples = n;
        self
    }

    /// Builder method: set the regex feature count
    pub fn with_regex_features(mut self, n: usize) -> Self {
        self.regex_features = n;
        self
    }

    /// Builder method: set the lookup table count
    pub fn with_lookup_tables(mut self, n: usize) -> Self {
        self.lookup_tables = n;
        self
    }

    /// Builder method: set the synonym count
    pub fn with_entity_synonyms(mut self, n: usize) -> Self {
        self.entity_synonyms = n;
        self
    }

    /// Builder method: set the response example count
    pub fn with_response_examples(mut self, n: usize) -> Self {
        self.response_examples = n;
        self
    }

    /// Combine the facts of two datasets.
    pub fn merge(self, other: Self) -> Self {
        Self {
            examples: self.examples + other.examples,
            entity_examples: self.entity_examples + other.entity_examples,
            pretrained_entity_examples: self.pretrained_entity_examples
                + other.pretrained_entity_examples,
            regex_features: self.regex_features + other.regex_features,
            lookup_tables: self.lookup_tables + other.lookup_tables,
            entity_synonyms: self.entity_synonyms + other.entity_synonyms,
            response_examples: self.response_examples + other.response_examples,
        }
    }
}

/// Anything that can describe a training corpus.
pub trait CorpusSummarySource {
    fn corpus_summary(&self) -> TrainingCorpusSummary;
}

impl CorpusSummarySource for TrainingCorpusSummary {
    fn corpus_summary(&self) -> TrainingCorpusSummary {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_nothing() {
        let s = TrainingCorpusSummary::new();
        assert!(!s.has_entity_examples());
        assert!(!s.has_pretrained_entity_examples());
        assert!(!s.has_regex_features());
        assert!(!s.has_lookup_tables());
        assert!(!s.has_entity_synonyms());
        assert!(!s.has_response_examples());
    }

    #[test]
    fn test_merge_adds_counts() {
        let a = TrainingCorpusSummary::new().with_examples(3).with_regex_features(1);
        let b = TrainingCorpusSummary::new()
            .with_examples(2)
            .with_entity_synonyms(4);
        let merged = a.merge(b);
        assert_eq!(merged.examples, 5);
        assert!(merged.has_regex_features());
        assert!(merged.has_entity_synonyms());
        assert!(!merged.has_lookup_tables());
    }
}
