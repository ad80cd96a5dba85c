use thiserror::Error;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Missing input variable: {0}")]
    MissingVariable(String),

    #[error("Missing placeholder: {0}")]
    MissingPlaceholder(String),

    #[error("Error: {0}")]
    OtherError(String),
}
