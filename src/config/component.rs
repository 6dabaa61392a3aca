//! A single pipeline component specification.
//!
//! A [`ComponentSpec`] is a flat mapping from hyperparameter name to value.
//! The `name` key is mandatory and identifies the component class; every other
//! key is component-specific. Keys are kept sorted so two specs with the same
//! content serialize identically.
//!
//! # YAML shape
//!
//! ```yaml
//! - name: CountVectorsFeaturizer
//!   analyzer: char_wb
//!   min_ngram: 1
//!   max_ngram: 4
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{ConfigError, Result};

/// Key that names the component class.
pub const NAME_KEY: &str = "name";

/// Name plus hyperparameters of one pipeline component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct ComponentSpec {
    params: Map<String, Value>,
}

impl ComponentSpec {
    /// Create a spec that carries only a component name.
    pub fn new(name: impl Into<String>) -> Self {
        let mut params = Map::new();
        params.insert(NAME_KEY.to_string(), Value::String(name.into()));
        Self { params }
    }

    /// Builder method: add or replace a hyperparameter.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Build a spec from a mapping, checking that `name` is a string.
    pub fn from_map(params: Map<String, Value>) -> Result<Self> {
        match params.get(NAME_KEY) {
            Some(Value::String(_)) => Ok(Self { params }),
            Some(other) => Err(ConfigError::invalid_config(format!(
                "component `name` must be a string, got {other}"
            ))),
            None => Err(ConfigError::invalid_config(
                "component is missing the required `name` key",
            )),
        }
    }

    /// The component class name.
    pub fn name(&self) -> &str {
        self.params
            .get(NAME_KEY)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.params.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// Update `key` in place, inserting it if absent.
    ///
    /// Renaming the component is allowed, but the new name must be a string.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Result<()> {
        let key = key.into();
        let value = value.into();
        if key == NAME_KEY && !value.is_string() {
            return Err(ConfigError::invalid_config(format!(
                "component `name` must be a string, got {value}"
            )));
        }
        self.params.insert(key, value);
        Ok(())
    }

    /// All keys including `name`, in sorted order.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.params
    }

    /// Hyperparameters only (every key except `name`).
    pub fn hyperparameters(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.params.iter().filter(|(k, _)| k.as_str() != NAME_KEY)
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.params.clone())
    }
}

impl TryFrom<Map<String, Value>> for ComponentSpec {
    type Error = ConfigError;

    fn try_from(params: Map<String, Value>) -> Result<Self> {
        Self::from_map(params)
    }
}

impl From<ComponentSpec> for Map<String, Value> {
    fn from(spec: ComponentSpec) -> Self {
        spec.params
    }
}

impl fmt::Display for ComponentSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Value::Object(self.params.clone()))
    }
}

/// Parse an explicit `pipeline` list. Entry positions are reported in errors.
pub fn parse_pipeline(items: Vec<Value>) -> Result<Vec<ComponentSpec>> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(map) => ComponentSpec::from_map(map).map_err(|err| match err {
                ConfigError::InvalidConfig { message } => ConfigError::invalid_config(format!(
                    "pipeline component {index}: {message}"
                )),
                other => other,
            }),
            other => Err(ConfigError::invalid_config(format!(
                "pipeline component {index} must be a mapping with a `name` key, got {other}"
            ))),
        })
        .collect()
}
