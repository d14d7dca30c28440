//! Response channel for an interaction

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single autocomplete suggestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    /// Label shown to the user
    pub name: String,
    /// Value submitted when the choice is picked
    pub value: Value,
}

impl Choice {
    /// Create a choice with a distinct label and value
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl From<&str> for Choice {
    fn from(s: &str) -> Self {
        Self::new(s, s)
    }
}

impl From<String> for Choice {
    fn from(s: String) -> Self {
        Self::new(s.clone(), s)
    }
}

/// Outbound channel used to answer an interaction.
///
/// Implemented by the transport layer. The core only ever sends a rejection
/// message or a list of autocomplete choices through it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InteractionResponder: Send + Sync {
    /// Send a text message in reply to the interaction
    async fn send_message(&self, content: &str, ephemeral: bool) -> anyhow::Result<()>;

    /// Answer an autocomplete interaction with suggestions
    async fn send_autocomplete(&self, choices: Vec<Choice>) -> anyhow::Result<()>;
}

/// Responder that drops everything, for interactions with no reply channel
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopResponder;

#[async_trait]
impl InteractionResponder for NoopResponder {
    async fn send_message(&self, _content: &str, _ephemeral: bool) -> anyhow::Result<()> {
        Ok(())
    }

    async fn send_autocomplete(&self, _choices: Vec<Choice>) -> anyhow::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_choice_from_str() {
        let choice = Choice::from("hello");
        assert_eq!(choice.name, "hello");
        assert_eq!(choice.value, json!("hello"));
    }

    #[test]
    fn test_choice_new_with_number() {
        let choice = Choice::new("Ten", 10);
        assert_eq!(choice.value, json!(10));
    }

    #[test]
    fn test_choice_serializes_like_wire_format() {
        let choice = Choice::new("Red", "red");
        let json = serde_json::to_value(&choice).unwrap();
        assert_eq!(json, json!({"name": "Red", "value": "red"}));
    }
}
