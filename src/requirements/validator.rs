//! Requirement validation.
//!
//! [`RequirementValidator`] evaluates every [`Requirement`] against the
//! component names of a pipeline and a [`TrainingCorpusSummary`]. Each unmet
//! requirement produces exactly one [`RequirementWarning`]; evaluation never
//! stops early and never fails, since a pipeline missing an optional
//! component still trains.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use nlu_pipeline_config::{RequirementValidator, TrainingCorpusSummary};
//!
//! let summary = TrainingCorpusSummary::new().with_regex_features(3);
//! let warnings = RequirementValidator::with_defaults()
//!     .validate(["WhitespaceTokenizer", "CRFEntityExtractor"], &summary);
//! assert_eq!(warnings.len(), 1);
//! ```

use std::fmt;

use rustc_hash::FxHashSet;
use serde::Serialize;

use super::corpus::{CorpusSummarySource, TrainingCorpusSummary};
use super::rules::{Requirement, BUILTIN_REQUIREMENTS};
use crate::components::PipelineComponent;
use crate::config::PipelineConfig;
use crate::error_code::ErrorCode;

// ─── Warning ────────────────────────────────────────────────────────────────

/// An unmet requirement.
///
/// # Display format
///
/// ```text
/// [missing_component] regex_features: You have defined training data with regexes, ...
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequirementWarning {
    pub code: ErrorCode,
    /// Name of the requirement that was not met.
    pub rule: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// Components, any one of which would have satisfied the requirement.
    pub candidates: Vec<String>,
}

impl RequirementWarning {
    fn from_requirement(requirement: &Requirement) -> Self {
        Self {
            code: ErrorCode::MissingComponent,
            rule: requirement.name.to_string(),
            message: requirement.message.to_string(),
            hint: Some(requirement.hint.to_string()),
            candidates: requirement
                .satisfied_by
                .iter()
                .map(|name| name.to_string())
                .collect(),
        }
    }
}

impl fmt::Display for RequirementWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code, self.rule, self.message)
    }
}

// ─── Validator ──────────────────────────────────────────────────────────────

/// Runs a table of [`Requirement`]s against a pipeline and a corpus summary.
#[derive(Debug, Clone)]
pub struct RequirementValidator {
    rules: Vec<Requirement>,
}

impl RequirementValidator {
    /// A validator with no requirements.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// A validator with [`BUILTIN_REQUIREMENTS`].
    pub fn with_defaults() -> Self {
        Self {
            rules: BUILTIN_REQUIREMENTS.to_vec(),
        }
    }

    /// Register an additional requirement.
    pub fn add_rule(&mut self, rule: Requirement) {
        self.rules.push(rule);
    }

    /// Builder method: register an additional requirement.
    pub fn with_rule(mut self, rule: Requirement) -> Self {
        self.add_rule(rule);
        self
    }

    pub fn rules(&self) -> &[Requirement] {
        &self.rules
    }

    /// One warning per requirement that applies to `summary` and that none
    /// of `components` satisfies, in rule order.
    pub fn validate<'a, I>(
        &self,
        components: I,
        summary: &TrainingCorpusSummary,
    ) -> Vec<RequirementWarning>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let present: FxHashSet<&str> = components.into_iter().collect();

        let warnings: Vec<RequirementWarning> = self
            .rules
            .iter()
            .filter(|rule| rule.applies_to(summary) && !rule.is_satisfied_by(&present))
            .map(RequirementWarning::from_requirement)
            .collect();

        for warning in &warnings {
            tracing::warn!(rule = %warning.rule, "{}", warning.message);
        }
        warnings
    }

    /// Validate the components declared in a resolved configuration.
    pub fn validate_config(
        &self,
        config: &PipelineConfig,
        summary: &TrainingCorpusSummary,
    ) -> Vec<RequirementWarning> {
        self.validate(config.component_names(), summary)
    }

    /// Validate an instantiated pipeline.
    pub fn validate_components(
        &self,
        components: &[Box<dyn PipelineComponent>],
        summary: &TrainingCorpusSummary,
    ) -> Vec<RequirementWarning> {
        self.validate(components.iter().map(|c| c.name()), summary)
    }

    /// Validate against anything that can summarize a corpus.
    pub fn validate_source<'a, I, S>(&self, components: I, source: &S) -> Vec<RequirementWarning>
    where
        I: IntoIterator<Item = &'a str>,
        S: CorpusSummarySource + ?Sized,
    {
        self.validate(components, &source.corpus_summary())
    }
}

impl Default for RequirementValidator {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════════
