use std::{
    collections::{BTreeMap, HashMap},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
};

use async_trait::async_trait;

use super::{Engine, QueryResult, SQLDatabaseError};

/// Engine serving canned table descriptions and query results.
#[derive(Clone, Default)]
pub struct InMemoryEngine {
    tables: BTreeMap<String, (String, QueryResult)>,
    results: HashMap<String, Result<QueryResult, String>>,
    executed: Arc<Mutex<Vec<String>>>,
    closed: Arc<AtomicBool>,
}

impl InMemoryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(mut self, name: &str, ddl: &str, sample: QueryResult) -> Self {
        self.tables.insert(name.into(), (ddl.into(), sample));
        self
    }

    pub fn with_result(mut self, query: &str, result: QueryResult) -> Self {
        self.results.insert(query.into(), Ok(result));
        self
    }

    pub fn with_error(mut self, query: &str, message: &str) -> Self {
        self.results.insert(query.into(), Err(message.into()));
        self
    }

    pub fn executed(&self) -> Vec<String> {
        self.executed.lock().unwrap().clone()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Engine for InMemoryEngine {
    fn dialect(&self) -> &str {
        "postgresql"
    }

    async fn table_names(&self) -> Result<Vec<String>, SQLDatabaseError> {
        Ok(self.tables.keys().cloned().collect())
    }

    async fn table_info(&self, table: &str) -> Result<String, SQLDatabaseError> {
        self.tables
            .get(table)
            .map(|(ddl, _)| ddl.clone())
            .ok_or_else(|| SQLDatabaseError::TablesNotFound(vec![table.into()]))
    }

    async fn sample_rows(
        &self,
        table: &str,
        limit: usize,
    ) -> Result<QueryResult, SQLDatabaseError> {
        let (_, sample) = self
            .tables
            .get(table)
            .ok_or_else(|| SQLDatabaseError::TablesNotFound(vec![table.into()]))?;

        let mut sample = sample.clone();
        sample.rows.truncate(limit);
        Ok(sample)
    }

    async fn execute(&self, query: &str) -> Result<QueryResult, SQLDatabaseError> {
        self.executed.lock().unwrap().push(query.to_string());
        match self.results.get(query) {
            Some(Ok(result)) => Ok(result.clone()),
            Some(Err(message)) => Err(SQLDatabaseError::Other(message.clone())),
            None => Ok(QueryResult::default()),
        }
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}
