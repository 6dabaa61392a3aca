//! Pipeline configuration: component specs, defaults, layered merge and loading.
//!
//! ## Submodules
//!
//! - [`component`]: a single component's name and hyperparameters
//! - [`defaults`]: the global baseline every load starts from
//! - [`merge`]: the ordered defaults → template → pipeline → overrides merge
//! - [`store`]: the resolved [`PipelineConfig`] and its accessors
//! - [`loader`]: parsing sources and resolving templates

pub mod component;
pub mod defaults;
pub mod loader;
pub mod merge;
pub mod store;

pub use component::{parse_pipeline, ComponentSpec, NAME_KEY};
pub use defaults::{DefaultSettings, DATA_KEY, LANGUAGE_KEY, PIPELINE_KEY};
pub use loader::{load, ConfigLoader, ConfigSource};
pub use merge::ConfigLayers;
pub use store::{override_defaults, PipelineConfig};
