//! Autocompleter registrations

use futures::future::BoxFuture;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use crate::interaction::{Choice, Interaction};

type AutocompleteFn = dyn Fn(Interaction, String) -> BoxFuture<'static, anyhow::Result<Option<Vec<Choice>>>>
    + Send
    + Sync;

/// Suggestion source registered for one parameter.
///
/// Resolved once at lookup time: either a function of the partial input or
/// a fixed list.
#[derive(Clone)]
pub enum Autocompleter {
    Invocable(Arc<AutocompleteFn>),
    Static(Vec<Choice>),
}

impl Autocompleter {
    /// Async suggestion function. Returning `Ok(None)` sends nothing.
    pub fn invocable<F, Fut>(f: F) -> Self
    where
        F: Fn(Interaction, String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<Option<Vec<Choice>>>> + Send + 'static,
    {
        Self::Invocable(Arc::new(move |interaction, partial| {
            Box::pin(f(interaction, partial))
        }))
    }

    /// Synchronous suggestion function over the partial input
    pub fn sync<F>(f: F) -> Self
    where
        F: Fn(&str) -> Vec<Choice> + Send + Sync + 'static,
    {
        let f = Arc::new(f);
        Self::invocable(move |_interaction, partial| {
            let f = f.clone();
            async move { Ok(Some(f(&partial))) }
        })
    }

    /// Fixed list of choices
    pub fn choices<I, C>(choices: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Choice>,
    {
        Self::Static(choices.into_iter().map(Into::into).collect())
    }

    /// Produce suggestions for `partial`
    pub async fn suggest(
        &self,
        interaction: &Interaction,
        partial: &str,
    ) -> anyhow::Result<Option<Vec<Choice>>> {
        match self {
            Self::Invocable(f) => f(interaction.clone(), partial.to_string()).await,
            Self::Static(choices) => Ok(Some(choices.clone())),
        }
    }
}

impl fmt::Debug for Autocompleter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invocable(_) => f.write_str("Autocompleter::Invocable(..)"),
            Self::Static(choices) => f.debug_tuple("Autocompleter::Static").field(choices).finish(),
        }
    }
}

/// Autocompleters of one node, keyed by parameter name
#[derive(Debug, Clone, Default)]
pub struct Autocompleters {
    entries: HashMap<String, Autocompleter>,
}

impl Autocompleters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, param: impl Into<String>, autocompleter: Autocompleter) {
        self.entries.insert(param.into(), autocompleter);
    }

    pub fn get(&self, param: &str) -> Option<&Autocompleter> {
        self.entries.get(param)
    }

    pub fn contains(&self, param: &str) -> bool {
        self.entries.contains_key(param)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
