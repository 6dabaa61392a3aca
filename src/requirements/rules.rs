//! The built-in requirement table.
//!
//! Each [`Requirement`] links a fact about the training data to the
//! components that can act on it. Adding a requirement means adding a row to
//! [`BUILTIN_REQUIREMENTS`]; the validator itself does not change.
//!
//! | rule | applies when the corpus has | satisfied by any of |
//! |------|-----------------------------|---------------------|
//! | `pretrained_entity_extractor` | entities needing pretrained extraction | `SpacyEntityExtractor`, `DucklingHTTPExtractor` |
//! | `regex_features` | regex features | `RegexFeaturizer` |
//! | `lookup_table_features` | lookup tables | `RegexFeaturizer` |
//! | `entity_synonyms` | synonyms | `EntitySynonymMapper` |
//! | `response_selector` | response examples | `ResponseSelector` |

use rustc_hash::FxHashSet;

use super::corpus::TrainingCorpusSummary;

/// Entity extractors that ship with a pretrained model.
pub const PRETRAINED_EXTRACTORS: &[&str] = &["SpacyEntityExtractor", "DucklingHTTPExtractor"];

/// Components that turn regex and lookup-table patterns into features.
pub const PATTERN_FEATURIZERS: &[&str] = &["RegexFeaturizer"];

pub const SYNONYM_MAPPERS: &[&str] = &["EntitySynonymMapper"];

pub const RESPONSE_SELECTORS: &[&str] = &["ResponseSelector"];

/// A data-derived condition and the components that satisfy it.
#[derive(Debug, Clone, Copy)]
pub struct Requirement {
    /// Stable rule identifier (e.g., `"regex_features"`).
    pub name: &'static str,
    /// Whether the corpus needs one of `satisfied_by`.
    pub applies: fn(&TrainingCorpusSummary) -> bool,
    /// Any one of these component names satisfies the requirement.
    pub satisfied_by: &'static [&'static str],
    pub message: &'static str,
    pub hint: &'static str,
}

impl Requirement {
    pub fn applies_to(&self, summary: &TrainingCorpusSummary) -> bool {
        (self.applies)(summary)
    }

    pub fn is_satisfied_by(&self, components: &FxHashSet<&str>) -> bool {
        self.satisfied_by.iter().any(|name| components.contains(name))
    }
}

pub const BUILTIN_REQUIREMENTS: [Requirement; 5] = [
    Requirement {
        name: "pretrained_entity_extractor",
        applies: TrainingCorpusSummary::has_pretrained_entity_examples,
        satisfied_by: PRETRAINED_EXTRACTORS,
        message: "You have defined training data with entities that need a pretrained entity \
                  extractor, but your NLU pipeline does not include one.",
        hint: "Add a 'SpacyEntityExtractor' or a 'DucklingHTTPExtractor' to your pipeline.",
    },
    Requirement {
        name: "regex_features",
        applies: TrainingCorpusSummary::has_regex_features,
        satisfied_by: PATTERN_FEATURIZERS,
        message: "You have defined training data with regexes, but your NLU pipeline does not \
                  include a 'RegexFeaturizer'.",
        hint: "To featurize regexes, include a 'RegexFeaturizer' in your pipeline.",
    },
    Requirement {
        name: "lookup_table_features",
        applies: TrainingCorpusSummary::has_lookup_tables,
        satisfied_by: PATTERN_FEATURIZERS,
        message: "You have defined training data consisting of lookup tables, but your NLU \
                  pipeline does not include a 'RegexFeaturizer'.",
        hint: "To featurize lookup tables, add a 'RegexFeaturizer' to your pipeline.",
    },
    Requirement {
        name: "entity_synonyms",
        applies: TrainingCorpusSummary::has_entity_synonyms,
        satisfied_by: SYNONYM_MAPPERS,
        message: "You have defined synonyms in your training data, but your NLU pipeline does \
                  not include an 'EntitySynonymMapper'.",
        hint: "To map synonyms, add an 'EntitySynonymMapper' to your pipeline.",
    },
    Requirement {
        name: "response_selector",
        applies: TrainingCorpusSummary::has_response_examples,
        satisfied_by: RESPONSE_SELECTORS,
        message: "You have defined training data with examples for training a response \
                  selector, but your NLU pipeline does not include a response selector \
                  component.",
        hint: "To train a model on your response selector data, add a 'ResponseSelector' to \
               your pipeline.",
    },
];
