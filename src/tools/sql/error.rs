use thiserror::Error;

#[derive(Error, Debug)]
pub enum SQLDatabaseError {
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("table_names {0:?} not found in database")]
    TablesNotFound(Vec<String>),

    #[error("Cannot specify both include_tables and ignore_tables")]
    ConflictingTableFilters,

    #[error("Invalid database URI: {0}")]
    InvalidUri(#[from] url::ParseError),

    #[error("Unsupported database URI scheme `{0}`, expected postgres:// or postgresql://")]
    UnsupportedUri(String),

    #[error("Cannot decode column `{column}` of type {type_name}: {reason}")]
    Decode {
        column: String,
        type_name: String,
        reason: String,
    },

    #[error("Error: {0}")]
    Other(String),
}
