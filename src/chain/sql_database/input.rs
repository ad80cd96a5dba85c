use std::borrow::Cow;

use crate::schemas::{ChainInput, Ctor};

/// Input of [`SQLDatabaseChain`](super::SQLDatabaseChain). An empty `tables`
/// slice means every usable table.
#[derive(Clone, Default, ChainInput, Ctor)]
pub struct SqlChainInput<'a> {
    #[langchain(into = "text")]
    pub query: &'a str,
    pub tables: &'a [String],
}

impl<'a> SqlChainInput<'a> {
    pub fn new(query: &'a str) -> Self {
        Self { query, tables: &[] }
    }

    pub fn query(mut self, query: &'a str) -> Self {
        self.query = query;
        self
    }

    pub fn tables(mut self, tables: &'a [String]) -> Self {
        self.tables = tables;
        self
    }
}

#[derive(Clone, ChainInput, Ctor)]
pub struct SqlChainLLMChainInput<'a> {
    #[langchain(into = "text")]
    pub input: Cow<'a, str>,
    #[langchain(into = "text")]
    pub top_k: usize,
    #[langchain(into = "text")]
    pub dialect: Cow<'a, str>,
    #[langchain(into = "text")]
    #[serde(rename = "table_info")]
    pub tables_info: Cow<'a, str>,
}

#[derive(Clone, ChainInput, Ctor)]
pub struct QueryCheckerInput<'a> {
    #[langchain(into = "text")]
    pub query: &'a str,
    #[langchain(into = "text")]
    pub dialect: &'a str,
}
