use async_trait::async_trait;

use super::{SQLDatabaseError, SqlValue};

/// Column names and decoded rows of one statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<SqlValue>>,
}

impl QueryResult {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<SqlValue>>) -> Self {
        Self { columns, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A database backend the SQL tools can introspect and query.
#[async_trait]
pub trait Engine: Send + Sync {
    /// Dialect name as used in prompts, e.g. `postgresql`.
    fn dialect(&self) -> &str;

    async fn table_names(&self) -> Result<Vec<String>, SQLDatabaseError>;

    /// `CREATE` statements describing the table and the types it depends on.
    async fn table_info(&self, table: &str) -> Result<String, SQLDatabaseError>;

    async fn sample_rows(&self, table: &str, limit: usize)
        -> Result<QueryResult, SQLDatabaseError>;

    async fn execute(&self, query: &str) -> Result<QueryResult, SQLDatabaseError>;

    async fn close(&self) {}
}
