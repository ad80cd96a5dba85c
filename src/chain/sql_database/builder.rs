use crate::{
    chain::LLMChain,
    llm::{options::CallOptions, LLM},
    output_parser::{OutputParser, SqlQueryParser},
    schemas::BuilderError,
    template::PromptTemplate,
    tools::SQLDatabase,
};

use super::{
    chain::SQLDatabaseChain, get_prompt_for_dialect, query_checker_prompt, DEFAULT_TOP_K,
    SQL_PROMPT_VARIABLES, STOP_WORD,
};

pub struct SQLDatabaseChainBuilder {
    llm: Option<Box<dyn LLM>>,
    top_k: Option<usize>,
    database: Option<SQLDatabase>,
    prompt: Option<PromptTemplate>,
    query_checker_prompt: Option<PromptTemplate>,
    use_query_checker: bool,
    return_direct: bool,
    sql_parser: Option<Box<dyn OutputParser>>,
}

impl SQLDatabaseChainBuilder {
    pub(super) fn new() -> Self {
        Self {
            llm: None,
            top_k: None,
            database: None,
            prompt: None,
            query_checker_prompt: None,
            use_query_checker: false,
            return_direct: false,
            sql_parser: None,
        }
    }

    pub fn llm(mut self, llm: impl Into<Box<dyn LLM>>) -> Self {
        self.llm = Some(llm.into());
        self
    }

    pub fn top_k(mut self, top_k: usize) -> Self {
        self.top_k = Some(top_k);
        self
    }

    pub fn database(mut self, database: SQLDatabase) -> Self {
        self.database = Some(database);
        self
    }

    /// Replaces the dialect's default generation prompt. It may use the
    /// variables `input`, `table_info`, `dialect` and `top_k`.
    pub fn prompt(mut self, prompt: impl Into<PromptTemplate>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    /// Has the model double check each generated query before it runs.
    pub fn use_query_checker(mut self, use_query_checker: bool) -> Self {
        self.use_query_checker = use_query_checker;
        self
    }

    pub fn query_checker_prompt(mut self, prompt: impl Into<PromptTemplate>) -> Self {
        self.query_checker_prompt = Some(prompt.into());
        self
    }

    /// Return the raw SQL result instead of asking the model for an answer.
    pub fn return_direct(mut self, return_direct: bool) -> Self {
        self.return_direct = return_direct;
        self
    }

    pub fn sql_parser(mut self, sql_parser: impl OutputParser + 'static) -> Self {
        self.sql_parser = Some(Box::new(sql_parser));
        self
    }

    pub fn build(self) -> Result<SQLDatabaseChain, BuilderError> {
        let llm = self.llm.ok_or(BuilderError::MissingField("llm"))?;
        let database = self
            .database
            .ok_or(BuilderError::MissingField("database"))?;

        let prompt = self
            .prompt
            .unwrap_or_else(|| get_prompt_for_dialect(database.dialect()));

        let mut unknown = prompt
            .variables()
            .into_iter()
            .filter(|v| !SQL_PROMPT_VARIABLES.contains(v))
            .collect::<Vec<_>>();
        if !unknown.is_empty() {
            unknown.sort_unstable();
            return Err(BuilderError::Other(format!(
                "prompt uses unsupported variables: {}",
                unknown.join(", ")
            )));
        }

        let llm_chain = LLMChain::builder()
            .prompt(prompt)
            .llm(llm.clone_box())
            .options(CallOptions::new().with_stop_words([STOP_WORD]))
            .build()
            .map_err(|e| BuilderError::Inner("llm_chain", Box::new(e)))?;

        let query_checker_chain = if self.use_query_checker {
            let chain = LLMChain::builder()
                .prompt(
                    self.query_checker_prompt
                        .unwrap_or_else(query_checker_prompt),
                )
                .llm(llm)
                .build()
                .map_err(|e| BuilderError::Inner("query_checker_chain", Box::new(e)))?;
            Some(chain)
        } else {
            None
        };

        Ok(SQLDatabaseChain {
            llm_chain,
            query_checker_chain,
            sql_parser: self
                .sql_parser
                .unwrap_or_else(|| Box::new(SqlQueryParser::default())),
            top_k: self.top_k.unwrap_or(DEFAULT_TOP_K),
            database,
            return_direct: self.return_direct,
        })
    }
}
