use thiserror::Error;

use crate::{
    llm::LLMError, output_parser::OutputParseError, schemas::BuilderError,
    template::TemplateError, tools::SQLDatabaseError,
};

use super::IntermediateStep;

#[derive(Error, Debug)]
pub enum ChainError {
    #[error("LLM error: {0}")]
    LLMError(#[from] LLMError),

    #[error("Output parse error: {0}")]
    OutputParseError(#[from] OutputParseError),

    #[error("Prompt error: {0}")]
    PromptError(#[from] TemplateError),

    #[error("Database error: {0}")]
    DatabaseError(#[from] SQLDatabaseError),

    #[error("Builder error: {0}")]
    BuilderError(#[from] BuilderError),

    /// A failure together with the steps completed before it.
    #[error("{source}")]
    WithSteps {
        source: Box<ChainError>,
        steps: Vec<IntermediateStep>,
    },

    #[error("Error: {0}")]
    OtherError(String),
}

impl ChainError {
    pub fn with_steps(self, steps: Vec<IntermediateStep>) -> Self {
        match self {
            ChainError::WithSteps { source, .. } => ChainError::WithSteps { source, steps },
            source => ChainError::WithSteps {
                source: Box::new(source),
                steps,
            },
        }
    }

    /// Steps recorded before the failure, if any.
    pub fn steps(&self) -> &[IntermediateStep] {
        match self {
            ChainError::WithSteps { steps, .. } => steps,
            _ => &[],
        }
    }

    /// The underlying error, without recorded steps.
    pub fn root(&self) -> &ChainError {
        match self {
            ChainError::WithSteps { source, .. } => source.root(),
            other => other,
        }
    }
}
