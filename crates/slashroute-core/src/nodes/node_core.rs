//! Fields common to every node

use std::fmt;
use std::sync::Arc;

use crate::autocomplete::{Autocompleter, Autocompleters};
use crate::binding::{Connectors, ParamSchema};
use crate::concurrency::ConcurrencyLimiter;
use crate::handlers::{CommandBody, ErrorHandler};
use crate::hooks::{Check, InvokeHook, InvokeHooks};

/// Routing and invocation data carried by every node
#[derive(Clone)]
pub struct NodeCore {
    name: String,
    qualified_name: String,
    body: Option<Arc<dyn CommandBody>>,
    schema: ParamSchema,
    connectors: Connectors,
    autocompleters: Autocompleters,
    error_handler: Option<Arc<dyn ErrorHandler>>,
    checks: Vec<Arc<dyn Check>>,
    hooks: InvokeHooks,
    guild_only: bool,
    limiter: Option<Arc<dyn ConcurrencyLimiter>>,
}

impl NodeCore {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            qualified_name: name.clone(),
            name,
            body: None,
            schema: ParamSchema::any(),
            connectors: Connectors::new(),
            autocompleters: Autocompleters::new(),
            error_handler: None,
            checks: Vec::new(),
            hooks: InvokeHooks::new(),
            guild_only: false,
            limiter: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Space-joined ancestry, e.g. `"tag edit title"`
    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    pub fn body(&self) -> Option<&Arc<dyn CommandBody>> {
        self.body.as_ref()
    }

    pub fn schema(&self) -> &ParamSchema {
        &self.schema
    }

    pub fn connectors(&self) -> &Connectors {
        &self.connectors
    }

    pub fn autocompleters(&self) -> &Autocompleters {
        &self.autocompleters
    }

    pub fn error_handler(&self) -> Option<&Arc<dyn ErrorHandler>> {
        self.error_handler.as_ref()
    }

    pub fn has_error_handler(&self) -> bool {
        self.error_handler.is_some()
    }

    pub fn checks(&self) -> &[Arc<dyn Check>] {
        &self.checks
    }

    pub fn hooks(&self) -> &InvokeHooks {
        &self.hooks
    }

    pub fn guild_only(&self) -> bool {
        self.guild_only
    }

    pub fn limiter(&self) -> Option<&Arc<dyn ConcurrencyLimiter>> {
        self.limiter.as_ref()
    }

    pub(crate) fn set_parent(&mut self, parent_qualified_name: &str) {
        self.qualified_name = format!("{} {}", parent_qualified_name, self.name);
    }

    pub(crate) fn set_body(&mut self, body: Arc<dyn CommandBody>) {
        self.body = Some(body);
    }

    pub(crate) fn set_schema(&mut self, schema: ParamSchema) {
        self.schema = schema;
    }

    pub(crate) fn set_connectors(&mut self, connectors: Connectors) {
        self.connectors = connectors;
    }

    pub(crate) fn add_connector(&mut self, api_name: &str, param_name: &str) {
        self.connectors.insert(api_name, param_name);
    }

    pub(crate) fn add_autocompleter(&mut self, param: &str, autocompleter: Autocompleter) {
        self.autocompleters.insert(param, autocompleter);
    }

    pub(crate) fn set_error_handler(&mut self, handler: Arc<dyn ErrorHandler>) {
        self.error_handler = Some(handler);
    }

    pub(crate) fn add_check(&mut self, check: Arc<dyn Check>) {
        self.checks.push(check);
    }

    pub(crate) fn add_before_hook(&mut self, hook: Arc<dyn InvokeHook>) {
        self.hooks.add_before(hook);
    }

    pub(crate) fn add_after_hook(&mut self, hook: Arc<dyn InvokeHook>) {
        self.hooks.add_after(hook);
    }

    pub(crate) fn set_guild_only(&mut self, guild_only: bool) {
        self.guild_only = guild_only;
    }

    pub(crate) fn set_limiter(&mut self, limiter: Arc<dyn ConcurrencyLimiter>) {
        self.limiter = Some(limiter);
    }
}

impl fmt::Debug for NodeCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeCore")
            .field("qualified_name", &self.qualified_name)
            .field("has_body", &self.body.is_some())
            .field("schema", &self.schema)
            .field("connectors", &self.connectors)
            .field("autocompleters", &self.autocompleters)
            .field("checks", &self.checks.len())
            .field("hooks", &self.hooks)
            .field("guild_only", &self.guild_only)
            .field("limited", &self.limiter.is_some())
            .finish()
    }
}

/// Setters shared by every node builder. The builder must have a `core: NodeCore` field.
macro_rules! node_builder_setters {
    ($builder:ty) => {
        impl $builder {
            /// Handler body
            pub fn body(mut self, body: impl $crate::handlers::CommandBody + 'static) -> Self {
                self.core.set_body(std::sync::Arc::new(body));
                self
            }

            /// Declared parameters used by the binder
            pub fn schema(mut self, schema: $crate::binding::ParamSchema) -> Self {
                self.core.set_schema(schema);
                self
            }

            pub fn connectors(mut self, connectors: $crate::binding::Connectors) -> Self {
                self.core.set_connectors(connectors);
                self
            }

            /// Rename option `api_name` to parameter `param_name` before binding
            pub fn connector(mut self, api_name: &str, param_name: &str) -> Self {
                self.core.add_connector(api_name, param_name);
                self
            }

            pub fn autocomplete(
                mut self,
                param: &str,
                autocompleter: $crate::autocomplete::Autocompleter,
            ) -> Self {
                self.core.add_autocompleter(param, autocompleter);
                self
            }

            /// Local error handler for this node's scope
            pub fn on_error(mut self, handler: impl $crate::handlers::ErrorHandler + 'static) -> Self {
                self.core.set_error_handler(std::sync::Arc::new(handler));
                self
            }

            pub fn check(mut self, check: impl $crate::hooks::Check + 'static) -> Self {
                self.core.add_check(std::sync::Arc::new(check));
                self
            }

            pub fn before_invoke(mut self, hook: impl $crate::hooks::InvokeHook + 'static) -> Self {
                self.core.add_before_hook(std::sync::Arc::new(hook));
                self
            }

            pub fn after_invoke(mut self, hook: impl $crate::hooks::InvokeHook + 'static) -> Self {
                self.core.add_after_hook(std::sync::Arc::new(hook));
                self
            }

            /// Refuse invocations outside a guild
            pub fn guild_only(mut self, guild_only: bool) -> Self {
                self.core.set_guild_only(guild_only);
                self
            }

            pub fn max_concurrency(
                mut self,
                limiter: std::sync::Arc<dyn $crate::concurrency::ConcurrencyLimiter>,
            ) -> Self {
                self.core.set_limiter(limiter);
                self
            }
        }
    };
}

pub(crate) use node_builder_setters;
