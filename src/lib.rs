//! # nlu_pipeline_config
//!
//! Pipeline configuration resolution and component requirement validation
//! for NLU pipelines.
//!
//! This library turns a user configuration into a fully materialized, ordered
//! list of component specifications, and checks a training corpus for data
//! that the resolved pipeline cannot act on.
//!
//! ## Features
//!
//! - **Templates**: `pipeline: supervised_embeddings` expands to a complete
//!   component list, with owned copies so edits never leak into the registry
//! - **Layered merge**: defaults → template → explicit pipeline → overrides,
//!   in a fixed order
//! - **Requirement checks**: regexes, lookup tables, synonyms, response
//!   examples and pretrained entities are matched against the pipeline, with
//!   one warning per unmet requirement

pub mod components;
pub mod config;
pub mod error_code;
pub mod errors;
pub mod requirements;
pub mod templates;

// Re-export commonly used types
pub use components::{
    build_pipeline, ComponentBuilder, DeclaredComponent, DeclaredComponentBuilder,
    PipelineComponent,
};
pub use config::{
    load, ComponentSpec, ConfigLayers, ConfigLoader, ConfigSource, DefaultSettings,
    PipelineConfig,
};
pub use error_code::ErrorCode;
pub use errors::{ConfigError, Result};
pub use requirements::{
    CorpusSummarySource, Requirement, RequirementValidator, RequirementWarning,
    TrainingCorpusSummary, TrainingData, BUILTIN_REQUIREMENTS,
};
pub use templates::TemplateRegistry;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
