//! Error types for nlu_pipeline_config
//!
//! Structural problems (unparsable documents, unknown templates, bad component
//! indices) are errors and always propagate to the caller. Missing optional
//! components are reported as [`RequirementWarning`](crate::requirements::RequirementWarning)
//! values instead and never show up here.

use thiserror::Error;

use crate::error_code::ErrorCode;

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Main error type for nlu_pipeline_config
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The configuration document is malformed or cannot be resolved
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// A template name was looked up that is not registered
    #[error("Unknown pipeline template '{name}'. Known pipeline templates: {}", known.join(", "))]
    UnknownTemplate { name: String, known: Vec<String> },

    /// A component index is outside the pipeline
    #[error("Component index {index} is out of range for a pipeline of {len} component(s)")]
    ComponentIndex { index: usize, len: usize },

    /// The configuration source could not be read
    #[error("Failed to read '{path}': {message}")]
    Io { path: String, message: String },

    /// A configuration could not be serialized
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl ConfigError {
    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an unknown template error
    pub fn unknown_template(name: impl Into<String>, known: Vec<String>) -> Self {
        Self::UnknownTemplate {
            name: name.into(),
            known,
        }
    }

    /// Create a component index error
    pub fn component_index(index: usize, len: usize) -> Self {
        Self::ComponentIndex { index, len }
    }

    /// Create an I/O error for the given path
    pub fn io(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Io {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Stable code for programmatic matching.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidConfig { .. } => ErrorCode::InvalidConfig,
            Self::UnknownTemplate { .. } => ErrorCode::UnknownTemplate,
            Self::ComponentIndex { .. } => ErrorCode::ComponentIndex,
            Self::Io { .. } => ErrorCode::Io,
            Self::Serialization { .. } => ErrorCode::Serialization,
        }
    }

    /// Check if this error is an invalid-config error
    pub fn is_invalid_config(&self) -> bool {
        matches!(self, Self::InvalidConfig { .. })
    }

    /// Check if this error is an out-of-range component index
    pub fn is_component_index(&self) -> bool {
        matches!(self, Self::ComponentIndex { .. })
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::serialization(err.to_string())
    }
}
