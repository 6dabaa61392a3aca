//! Data-driven component requirements.
//!
//! Some components are only needed because of what the training data
//! contains: regexes need a featurizer, synonyms need a mapper, response
//! examples need a response selector. This module decides, from a summary of
//! the corpus, which of those the resolved pipeline is missing.
//!
//! ## Submodules
//!
//! - [`corpus`]: [`TrainingCorpusSummary`] and the [`CorpusSummarySource`] seam
//! - [`training_data`]: JSON training data reader that produces summaries
//! - [`rules`]: the declarative [`Requirement`] table
//! - [`validator`]: [`RequirementValidator`] and [`RequirementWarning`]

pub mod corpus;
pub mod rules;
pub mod training_data;
pub mod validator;

pub use corpus::{CorpusSummarySource, TrainingCorpusSummary};
pub use rules::{Requirement, BUILTIN_REQUIREMENTS, PRETRAINED_EXTRACTORS};
pub use training_data::TrainingData;
pub use validator::{RequirementValidator, RequirementWarning};
