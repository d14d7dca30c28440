//! Bound keyword arguments

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::CommandError;
use crate::interaction::OptionTree;

/// Keyword arguments resolved for one handler invocation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundArgs {
    values: OptionTree,
}

impl BoundArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(values: OptionTree) -> Self {
        Self { values }
    }

    /// Raw value for a parameter
    pub fn raw(&self, param: &str) -> Option<&Value> {
        self.values.get(param)
    }

    pub fn contains(&self, param: &str) -> bool {
        self.values.contains_key(param)
    }

    /// Typed value for an optional parameter.
    ///
    /// Absent and `null` both give `Ok(None)`.
    pub fn get<T: DeserializeOwned>(&self, param: &str) -> Result<Option<T>, CommandError> {
        match self.values.get(param) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(|e| CommandError::bad_argument(param, e.to_string())),
        }
    }

    /// Typed value for a parameter that must be present
    pub fn require<T: DeserializeOwned>(&self, param: &str) -> Result<T, CommandError> {
        self.get(param)?
            .ok_or_else(|| CommandError::missing_argument(param))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn as_map(&self) -> &OptionTree {
        &self.values
    }

    pub fn into_map(self) -> OptionTree {
        self.values
    }
}
