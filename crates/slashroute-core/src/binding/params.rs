//! Declared parameter schemas and resolution

use async_trait::async_trait;
use serde_json::Value;
use tracing::trace;

use super::args::BoundArgs;
use crate::error::CommandError;
use crate::interaction::{Interaction, OptionTree};

/// One declared handler parameter
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    pub name: String,
    pub required: bool,
    pub default: Option<Value>,
}

impl ParamSpec {
    /// A parameter that must be supplied
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: true,
            default: None,
        }
    }

    /// A parameter that may be omitted
    pub fn optional(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: false,
            default: None,
        }
    }

    /// An optional parameter with a fallback value
    pub fn with_default(name: impl Into<String>, default: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            required: false,
            default: Some(default.into()),
        }
    }
}

/// Parameter schema of a handler body
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamSchema {
    params: Vec<ParamSpec>,
    accept_extra: bool,
}

impl ParamSchema {
    /// Schema with no parameters; any supplied argument is dropped
    pub fn new() -> Self {
        Self::default()
    }

    /// Schema that passes every supplied argument through
    pub fn any() -> Self {
        Self {
            params: Vec::new(),
            accept_extra: true,
        }
    }

    pub fn param(mut self, spec: ParamSpec) -> Self {
        self.params.push(spec);
        self
    }

    /// Keep arguments that no declared parameter names
    pub fn accept_extra(mut self, accept: bool) -> Self {
        self.accept_extra = accept;
        self
    }

    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    pub fn accepts_extra(&self) -> bool {
        self.accept_extra
    }

    pub fn get(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|p| p.name == name)
    }
}

/// Turns renamed raw arguments into the exact arguments a body receives
#[async_trait]
pub trait ParamResolver: Send + Sync {
    async fn resolve(
        &self,
        schema: &ParamSchema,
        interaction: &Interaction,
        args: OptionTree,
    ) -> Result<BoundArgs, CommandError>;
}

/// Default resolver driven purely by the declared schema
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaResolver;

#[async_trait]
impl ParamResolver for SchemaResolver {
    async fn resolve(
        &self,
        schema: &ParamSchema,
        _interaction: &Interaction,
        mut args: OptionTree,
    ) -> Result<BoundArgs, CommandError> {
        let mut bound = OptionTree::new();

        for spec in schema.params() {
            match args.remove(spec.name.as_str()) {
                Some(value) => {
                    bound.insert(spec.name.clone(), value);
                }
                None => match (&spec.default, spec.required) {
                    (Some(default), _) => {
                        bound.insert(spec.name.clone(), default.clone());
                    }
                    (None, true) => return Err(CommandError::missing_argument(&spec.name)),
                    (None, false) => {}
                },
            }
        }

        if schema.accepts_extra() {
            bound.extend(args);
        } else {
            for name in args.keys() {
                trace!("Dropping undeclared argument: {}", name);
            }
        }

        Ok(BoundArgs::from_map(bound))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(value: Value) -> OptionTree {
        value.as_object().cloned().unwrap()
    }

    fn inter() -> Interaction {
        Interaction::builder("test").build()
    }

    #[tokio::test]
    async fn test_declared_params_bound() {
        let schema = ParamSchema::new()
            .param(ParamSpec::required("value"))
            .param(ParamSpec::optional("note"));
        let bound = SchemaResolver
            .resolve(&schema, &inter(), args(json!({"value": 5})))
            .await
            .unwrap();
        assert_eq!(bound.raw("value"), Some(&json!(5)));
        assert!(!bound.contains("note"));
    }

    #[tokio::test]
    async fn test_default_applied() {
        let schema = ParamSchema::new().param(ParamSpec::with_default("limit", 10));
        let bound = SchemaResolver
            .resolve(&schema, &inter(), OptionTree::new())
            .await
            .unwrap();
        assert_eq!(bound.get::<u32>("limit").unwrap(), Some(10));
    }

    #[tokio::test]
    async fn test_missing_required() {
        let schema = ParamSchema::new().param(ParamSpec::required("name"));
        let err = SchemaResolver
            .resolve(&schema, &inter(), OptionTree::new())
            .await
            .unwrap_err();
        assert!(matches!(err, CommandError::MissingArgument { ref param } if param == "name"));
    }

    #[tokio::test]
    async fn test_extras_dropped_by_default() {
        let schema = ParamSchema::new().param(ParamSpec::required("x"));
        let bound = SchemaResolver
            .resolve(&schema, &inter(), args(json!({"x": 1, "y": 2})))
            .await
            .unwrap();
        assert_eq!(bound.len(), 1);
        assert!(!bound.contains("y"));
    }

    #[tokio::test]
    async fn test_any_passes_everything() {
        let bound = SchemaResolver
            .resolve(&ParamSchema::any(), &inter(), args(json!({"x": 1, "y": 2})))
            .await
            .unwrap();
        assert_eq!(bound.len(), 2);
    }
}
