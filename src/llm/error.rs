use async_openai::error::OpenAIError;
use serde_json::Error as SerdeJsonError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LLMError {
    #[error("OpenAI error: {0}")]
    OpenAIError(#[from] OpenAIError),

    #[error("Serde json error: {0}")]
    SerdeError(#[from] SerdeJsonError),

    #[error("Content not found in response: Expected at {0}")]
    ContentNotFound(String),

    #[error("LLM refused to answer: {0}")]
    Refused(String),

    #[error("Error: {0}")]
    OtherError(String),
}
