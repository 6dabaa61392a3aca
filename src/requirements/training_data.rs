//! Reader for JSON NLU training data.
//!
//! Only what is needed to summarize a corpus is modeled. The accepted shape:
//!
//! ```json
//! {
//!   "rasa_nlu_data": {
//!     "common_examples": [
//!       {
//!         "text": "show me chinese restaurants",
//!         "intent": "restaurant_search",
//!         "entities": [
//!           { "start": 8, "end": 15, "value": "chinese", "entity": "cuisine" }
//!         ]
//!       }
//!     ],
//!     "regex_features": [{ "name": "zipcode", "pattern": "[0-9]{5}" }],
//!     "lookup_tables": [{ "name": "plates", "elements": ["tacos", "beef"] }],
//!     "entity_synonyms": [{ "value": "chinese", "synonyms": ["chines"] }],
//!     "response_examples": [
//!       { "text": "what is a bot?", "intent": "faq/bot", "response": "A program." }
//!     ]
//!   }
//! }
//! ```
//!
//! An example with both `intent` and `response` counts as response-selection
//! data, whichever section it is listed in. A hand-labelled entity whose
//! `value` differs from the annotated span is an inline synonym; entities
//! produced by an extractor carry normalized values and are never synonyms.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::corpus::{CorpusSummarySource, TrainingCorpusSummary};
use super::rules::PRETRAINED_EXTRACTORS;
use crate::errors::{ConfigError, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingData {
    #[serde(default)]
    pub common_examples: Vec<Example>,
    #[serde(default)]
    pub regex_features: Vec<RegexFeature>,
    #[serde(default)]
    pub lookup_tables: Vec<LookupTable>,
    #[serde(default)]
    pub entity_synonyms: Vec<EntitySynonym>,
    #[serde(default)]
    pub response_examples: Vec<Example>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Example {
    pub text: String,
    #[serde(default)]
    pub intent: Option<String>,
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub entities: Vec<EntityAnnotation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityAnnotation {
    /// Character offset of the first annotated character.
    pub start: usize,
    /// Character offset one past the last annotated character.
    pub end: usize,
    pub value: Value,
    pub entity: String,
    /// Component that produced the annotation, if not hand-labelled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extractor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegexFeature {
    pub name: String,
    pub pattern: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupTable {
    pub name: String,
    /// Inline element list or a path to an element file.
    pub elements: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySynonym {
    pub value: String,
    #[serde(default)]
    pub synonyms: Vec<String>,
}

#[derive(Deserialize)]
struct TrainingDataFile {
    rasa_nlu_data: TrainingData,
}

impl Example {
    fn is_response_example(&self) -> bool {
        self.intent.is_some() && self.response.as_deref().is_some_and(|r| !r.is_empty())
    }

    /// The annotated slice of `text`, by character offsets.
    fn span(&self, entity: &EntityAnnotation) -> String {
        self.text
            .chars()
            .skip(entity.start)
            .take(entity.end.saturating_sub(entity.start))
            .collect()
    }
}

impl TrainingData {
    /// Parse one JSON document. `origin` names it in errors.
    pub fn from_json(text: &str, origin: &str) -> Result<Self> {
        let file: TrainingDataFile = serde_json::from_str(text).map_err(|e| {
            ConfigError::serialization(format!("Failed to parse training data '{origin}': {e}"))
        })?;
        Ok(file.rasa_nlu_data)
    }

    /// Read a training data file, or every `.json` file in a directory.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.is_dir() {
            let mut files = Vec::new();
            collect_json_files(path, &mut files)?;
            files.sort();
            let mut data = Self::default();
            for file in files {
                data.extend(Self::read_file(&file)?);
            }
            Ok(data)
        } else {
            Self::read_file(path)
        }
    }

    fn read_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::io(path.display().to_string(), e.to_string()))?;
        Self::from_json(&text, &path.display().to_string())
    }

    /// Append another dataset.
    pub fn extend(&mut self, other: Self) {
        self.common_examples.extend(other.common_examples);
        self.regex_features.extend(other.regex_features);
        self.lookup_tables.extend(other.lookup_tables);
        self.entity_synonyms.extend(other.entity_synonyms);
        self.response_examples.extend(other.response_examples);
    }

    /// Every example, `common_examples` first.
    pub fn examples(&self) -> impl Iterator<Item = &Example> {
        self.common_examples.iter().chain(&self.response_examples)
    }

    /// Summarize, also treating entities of the given types as pretrained.
    pub fn summary_with_pretrained_types(
        &self,
        pretrained_types: &[&str],
    ) -> TrainingCorpusSummary {
        let mut synonyms: FxHashSet<(String, String)> = FxHashSet::default();
        for entry in &self.entity_synonyms {
            for synonym in &entry.synonyms {
                synonyms.insert((synonym.clone(), entry.value.clone()));
            }
        }

        let mut entity_examples = 0;
        let mut pretrained = 0;
        let mut responses = 0;

        for example in self.examples() {
            if !example.entities.is_empty() {
                entity_examples += 1;
            }
            if example.is_response_example() {
                responses += 1;
            }
            for entity in &example.entities {
                let by_extractor = entity
                    .extractor
                    .as_deref()
                    .is_some_and(|e| PRETRAINED_EXTRACTORS.contains(&e));
                if by_extractor || pretrained_types.contains(&entity.entity.as_str()) {
                    pretrained += 1;
                }
                if entity.extractor.is_some() {
                    continue;
                }
                if let Value::String(value) = &entity.value {
                    let span = example.span(entity);
                    if &span != value {
                        synonyms.insert((span, value.clone()));
                    }
                }
            }
        }

        TrainingCorpusSummary {
            examples: self.common_examples.len() + self.response_examples.len(),
            entity_examples,
            pretrained_entity_examples: pretrained,
            regex_features: self.regex_features.len(),
            lookup_tables: self.lookup_tables.len(),
            entity_synonyms: synonyms.len(),
            response_examples: responses,
        }
    }
}

impl CorpusSummarySource for TrainingData {
    fn corpus_summary(&self) -> TrainingCorpusSummary {
        self.summary_with_pretrained_types(&[])
    }
}

fn collect_json_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| ConfigError::io(dir.display().to_string(), e.to_string()))?;
    for entry in entries {
        let entry = entry.map_err(|e| ConfigError::io(dir.display().to_string(), e.to_string()))?;
        let path = entry.path();
        // symlinks are not followed, so a link cycle cannot recurse forever
        let file_type = entry
            .file_type()
            .map_err(|e| ConfigError::io(path.display().to_string(), e.to_string()))?;
        if file_type.is_dir() {
            collect_json_files(&path, out)?;
        } else if file_type.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            out.push(path);
        }
    }
    Ok(())
}
