use std::fmt;

use async_openai::{
    error::OpenAIError,
    types::{
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
    },
};
use serde::{Deserialize, Serialize};

use super::MessageType;

/// A single chat message sent to, or received from, a language model.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Message {
    pub content: String,
    pub message_type: MessageType,
}

impl Message {
    pub fn new<T: Into<String>>(message_type: MessageType, content: T) -> Self {
        Message {
            content: content.into(),
            message_type,
        }
    }

    pub fn new_human_message<T: Into<String>>(content: T) -> Self {
        Self::new(MessageType::Human, content)
    }

    pub fn new_system_message<T: Into<String>>(content: T) -> Self {
        Self::new(MessageType::System, content)
    }

    pub fn new_ai_message<T: Into<String>>(content: T) -> Self {
        Self::new(MessageType::Ai, content)
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.message_type, self.content)
    }
}

// Convert to async-openai type
impl TryFrom<Message> for ChatCompletionRequestMessage {
    type Error = OpenAIError;

    fn try_from(message: Message) -> Result<Self, Self::Error> {
        let message = match message.message_type {
            MessageType::System => ChatCompletionRequestSystemMessageArgs::default()
                .content(message.content)
                .build()?
                .into(),
            MessageType::Ai => ChatCompletionRequestAssistantMessageArgs::default()
                .content(message.content)
                .build()?
                .into(),
            MessageType::Human => ChatCompletionRequestUserMessageArgs::default()
                .content(message.content)
                .build()?
                .into(),
        };

        Ok(message)
    }
}
