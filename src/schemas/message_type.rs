use serde::{Deserialize, Serialize};
use std::fmt;

/// Enum `MessageType` represents the type of a message.
/// It can be a `System`, `Ai`, or `Human` message.
///
/// # Usage
/// ```rust,ignore
/// let system_message_type = MessageType::System;
/// let ai_message_type = MessageType::Ai;
/// let human_message_type = MessageType::Human;
/// ```
#[derive(PartialEq, Eq, Serialize, Deserialize, Debug, Clone, Default)]
pub enum MessageType {
    #[default]
    #[serde(rename = "system")]
    System,
    #[serde(rename = "ai")]
    Ai,
    #[serde(rename = "human")]
    Human,
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageType::System => write!(f, "system"),
            MessageType::Ai => write!(f, "ai"),
            MessageType::Human => write!(f, "human"),
        }
    }
}
