use async_openai::types::ChatCompletionRequestMessage;
use serde::Serialize;

use crate::{
    llm::{options::CallOptions, LLMError},
    schemas::Message,
};

/// Request payload sent to an OpenAI-compatible chat completions API.
#[derive(Serialize, Debug)]
pub struct OpenAIRequest {
    pub messages: Vec<ChatCompletionRequestMessage>,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>,
}

impl OpenAIRequest {
    /// Creates a new [`OpenAIRequest`].
    pub fn new(
        model: impl Into<String>,
        messages: Vec<Message>,
    ) -> Result<OpenAIRequest, LLMError> {
        let messages = messages
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(OpenAIRequest {
            messages,
            model: model.into(),
            max_tokens: None,
            temperature: None,
            stop: None,
            top_p: None,
            seed: None,
        })
    }

    /// Adds options to the request.
    pub fn with_options(self, options: CallOptions) -> Self {
        OpenAIRequest {
            max_tokens: options.max_tokens,
            temperature: options.temperature,
            stop: options.stop_words,
            top_p: options.top_p,
            seed: options.seed,
            ..self
        }
    }
}
