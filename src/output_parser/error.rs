use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputParseError {
    #[error("No match found in output: {0}")]
    NoMatch(String),

    #[error("Empty output")]
    Empty,

    #[error("Other error: {0}")]
    Other(String),
}
