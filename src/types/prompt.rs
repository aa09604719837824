//! Prompt and message types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Message role.
///
/// Unknown roles round-trip through [`Role::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
    #[serde(untagged)]
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::Tool => "tool",
            Self::Other(role) => role,
        }
    }
}

/// A single `{role, content}` chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptMessage {
    pub role: Role,
    pub content: String,
}

impl PromptMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// Ordered conversation plus free-form metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Prompt {
    pub messages: Vec<PromptMessage>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub metadata: Map<String, Value>,
}

impl Prompt {
    pub fn new(messages: Vec<PromptMessage>) -> Self {
        Self {
            messages,
            metadata: Map::new(),
        }
    }

    /// Add a metadata entry
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// System messages in their original order.
    pub fn system_messages(&self) -> impl Iterator<Item = &PromptMessage> {
        self.messages.iter().filter(|m| m.role == Role::System)
    }
}

impl From<Vec<PromptMessage>> for Prompt {
    fn from(messages: Vec<PromptMessage>) -> Self {
        Self::new(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_prompt_wire_shape() {
        let prompt = Prompt::new(vec![
            PromptMessage::system("You are concise."),
            PromptMessage::user("List 3 Kaizen benefits."),
        ])
        .with_metadata("source", "cost-demo");

        assert_eq!(
            serde_json::to_value(&prompt).unwrap(),
            json!({
                "messages": [
                    {"role": "system", "content": "You are concise."},
                    {"role": "user", "content": "List 3 Kaizen benefits."}
                ],
                "metadata": {"source": "cost-demo"}
            })
        );
    }

    #[test]
    fn test_empty_metadata_is_omitted() {
        let prompt = Prompt::new(vec![PromptMessage::user("hi")]);
        let value = serde_json::to_value(&prompt).unwrap();
        assert!(value.get("metadata").is_none());
    }

    #[test]
    fn test_unknown_role_preserved() {
        let msg: PromptMessage =
            serde_json::from_value(json!({"role": "developer", "content": "x"})).unwrap();
        assert_eq!(msg.role, Role::Other("developer".into()));
        assert_eq!(serde_json::to_value(&msg).unwrap()["role"], "developer");
    }
}
