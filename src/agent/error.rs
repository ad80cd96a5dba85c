use thiserror::Error;

use crate::{chain::ChainError, schemas::BuilderError, tools::SQLDatabaseError};

pub const MISSING_API_KEY: &str = "No OpenAI API key provided. Please set the OPENAI_API_KEY environment variable or provide it when prompted.";

#[derive(Error, Debug)]
pub enum AskError {
    #[error(
        "No OpenAI API key provided. Please set the OPENAI_API_KEY environment variable or provide it when prompted."
    )]
    MissingApiKey,

    #[error("{0}")]
    DatabaseError(#[from] SQLDatabaseError),

    #[error("{0}")]
    ChainError(#[from] ChainError),

    #[error("{0}")]
    BuilderError(#[from] BuilderError),

    #[error("Cannot build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
