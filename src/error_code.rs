//! Stable, machine-readable error codes.
//!
//! Every [`ConfigError`](crate::errors::ConfigError) and every
//! [`RequirementWarning`](crate::requirements::RequirementWarning) carries one
//! of these codes so callers can match on the kind of problem without parsing
//! messages. Codes serialize as `snake_case` strings.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The configuration document could not be parsed or has the wrong shape.
    InvalidConfig,
    /// A pipeline template name is not registered.
    UnknownTemplate,
    /// A component index points past the end of the pipeline.
    ComponentIndex,
    /// The configuration source could not be read.
    Io,
    /// A configuration could not be serialized.
    Serialization,
    /// Training data needs a component the pipeline does not contain.
    MissingComponent,
}

impl ErrorCode {
    /// Returns the `snake_case` name used in JSON and log output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidConfig => "invalid_config",
            Self::UnknownTemplate => "unknown_template",
            Self::ComponentIndex => "component_index",
            Self::Io => "io",
            Self::Serialization => "serialization",
            Self::MissingComponent => "missing_component",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
