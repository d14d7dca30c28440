//! Wire-format command payloads
//!
//! Converts the platform's `ApplicationCommandData` shape (a list of options
//! where sub-commands and groups carry their own option lists) into the
//! nested [`OptionTree`] the router consumes.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::{FocusedOption, Interaction, InteractionBuilder, OptionTree};

/// Application command option types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionType {
    SubCommand,
    SubCommandGroup,
    String,
    Integer,
    Boolean,
    User,
    Channel,
    Role,
    Mentionable,
    Number,
    Attachment,
    Unknown(u8),
}

impl OptionType {
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::SubCommand,
            2 => Self::SubCommandGroup,
            3 => Self::String,
            4 => Self::Integer,
            5 => Self::Boolean,
            6 => Self::User,
            7 => Self::Channel,
            8 => Self::Role,
            9 => Self::Mentionable,
            10 => Self::Number,
            11 => Self::Attachment,
            other => Self::Unknown(other),
        }
    }

    /// Whether options of this type nest further options
    pub fn is_branch(&self) -> bool {
        matches!(self, Self::SubCommand | Self::SubCommandGroup)
    }
}

/// One entry of a payload's option list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayloadOption {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<PayloadOption>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub focused: bool,
}

impl PayloadOption {
    pub fn option_type(&self) -> OptionType {
        OptionType::from_u8(self.kind)
    }
}

/// A command interaction as delivered by the platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandPayload {
    #[serde(default, deserialize_with = "snowflake_opt")]
    pub id: Option<u64>,
    pub name: String,
    #[serde(default, deserialize_with = "snowflake_opt")]
    pub guild_id: Option<u64>,
    #[serde(default, deserialize_with = "snowflake_opt")]
    pub channel_id: Option<u64>,
    #[serde(default, deserialize_with = "snowflake_opt")]
    pub user_id: Option<u64>,
    #[serde(default)]
    pub options: Vec<PayloadOption>,
}

impl CommandPayload {
    /// Parse a payload from JSON text
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Build the nested option tree for routing
    pub fn option_tree(&self) -> OptionTree {
        options_to_tree(&self.options)
    }

    /// The focused option at any nesting level, if any
    pub fn focused_option(&self) -> Option<FocusedOption> {
        find_focused(&self.options)
    }

    /// Start an interaction builder pre-filled from this payload
    pub fn to_interaction(&self) -> InteractionBuilder {
        let mut builder = Interaction::builder(self.name.clone()).options(self.option_tree());
        if let Some(id) = self.id {
            builder = builder.id(id);
        }
        if let Some(guild_id) = self.guild_id {
            builder = builder.guild(guild_id);
        }
        if let Some(channel_id) = self.channel_id {
            builder = builder.channel(channel_id);
        }
        if let Some(user_id) = self.user_id {
            builder = builder.user(user_id);
        }
        if let Some(focused) = self.focused_option() {
            builder = builder.focused(focused.name, focused.value);
        }
        builder
    }
}

fn options_to_tree(options: &[PayloadOption]) -> OptionTree {
    let mut tree = OptionTree::new();
    for option in options {
        let value = if option.option_type().is_branch() {
            Value::Object(options_to_tree(&option.options))
        } else {
            option.value.clone().unwrap_or(Value::Null)
        };
        tree.insert(option.name.clone(), value);
    }
    tree
}

fn find_focused(options: &[PayloadOption]) -> Option<FocusedOption> {
    options.iter().find_map(|option| {
        if option.focused {
            let value = match &option.value {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Null) | None => String::new(),
                Some(other) => other.to_string(),
            };
            Some(FocusedOption::new(option.name.clone(), value))
        } else {
            find_focused(&option.options)
        }
    })
}

/// Snowflakes arrive as strings but tests and tools often use numbers
fn snowflake_opt<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Snowflake {
        Num(u64),
        Str(String),
    }

    match Option::<Snowflake>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Snowflake::Num(n)) => Ok(Some(n)),
        Some(Snowflake::Str(s)) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const NESTED: &str = r#"{
        "id": "991",
        "name": "tag",
        "guild_id": "42",
        "options": [
            {"name": "manage", "type": 2, "options": [
                {"name": "rename", "type": 1, "options": [
                    {"name": "old-name", "type": 3, "value": "rust"},
                    {"name": "new-name", "type": 3, "value": "ferris"}
                ]}
            ]}
        ]
    }"#;

    #[test]
    fn test_parse_nested_payload() {
        let payload = CommandPayload::from_json(NESTED).unwrap();
        assert_eq!(payload.id, Some(991));
        assert_eq!(payload.guild_id, Some(42));
        assert_eq!(
            serde_json::Value::Object(payload.option_tree()),
            json!({"manage": {"rename": {"old-name": "rust", "new-name": "ferris"}}})
        );
    }

    #[test]
    fn test_option_tree_keeps_wire_order() {
        let payload = CommandPayload::from_json(NESTED).unwrap();
        let tree = payload.option_tree();
        let leaf = tree["manage"]["rename"].as_object().unwrap();
        let keys: Vec<&String> = leaf.keys().collect();
        assert_eq!(keys, vec!["old-name", "new-name"]);
    }

    #[test]
    fn test_empty_subcommand_becomes_empty_object() {
        let payload = CommandPayload::from_json(
            r#"{"name": "tag", "options": [{"name": "list", "type": 1}]}"#,
        )
        .unwrap();
        assert_eq!(
            serde_json::Value::Object(payload.option_tree()),
            json!({"list": {}})
        );
    }

    #[test]
    fn test_focused_option_found_at_depth() {
        let payload = CommandPayload::from_json(
            r#"{"name": "tag", "options": [
                {"name": "show", "type": 1, "options": [
                    {"name": "name", "type": 3, "value": "he", "focused": true}
                ]}
            ]}"#,
        )
        .unwrap();
        assert_eq!(payload.focused_option(), Some(FocusedOption::new("name", "he")));

        let inter = payload.to_interaction().build();
        assert!(inter.is_autocomplete());
        assert!(inter.guild_id().is_none());
    }

    #[test]
    fn test_numeric_focused_value_is_stringified() {
        let payload = CommandPayload::from_json(
            r#"{"name": "roll", "options": [{"name": "sides", "type": 4, "value": 2, "focused": true}]}"#,
        )
        .unwrap();
        assert_eq!(payload.focused_option().unwrap().value, "2");
    }

    #[test]
    fn test_bad_snowflake_rejected() {
        let result = CommandPayload::from_json(r#"{"name": "x", "guild_id": "not-a-number"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_option_type_mapping() {
        assert_eq!(OptionType::from_u8(1), OptionType::SubCommand);
        assert!(OptionType::from_u8(2).is_branch());
        assert!(!OptionType::from_u8(3).is_branch());
        assert_eq!(OptionType::from_u8(99), OptionType::Unknown(99));
    }
}
