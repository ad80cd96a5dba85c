use std::borrow::Cow;

use async_trait::async_trait;

use crate::{
    chain::{Chain, ChainError, LLMChain},
    output_parser::OutputParser,
    schemas::{IntoWithUsage, TokenUsage, WithUsage},
    tools::SQLDatabase,
};

use super::{
    IntermediateStep, QueryCheckerInput, QueryCheckerInputCtor, SQLDatabaseChainBuilder,
    SqlChainInput, SqlChainInputCtor, SqlChainLLMChainInput, SqlChainLLMChainInputCtor,
    SqlChainOutput, QUERY_PREFIX_WITH, STOP_WORD,
};

/// SQLDatabaseChain lets you interact with a database in human language.
///
/// The model writes a query for the question, the query runs against the
/// database, and the model turns the result into an answer.
///
/// Example
/// ```rust,ignore
/// # async {
/// let db = SQLDatabase::from_uri("postgresql://localhost/shop", &[]).await?;
/// let chain = SQLDatabaseChain::builder()
///     .llm(OpenAI::default())
///     .top_k(4)
///     .database(db)
///     .use_query_checker(true)
///     .build()?;
///
/// let output = chain
///     .call_with_steps(&SqlChainInput::new("How many users signed up this week?"))
///     .await?;
/// println!("{}", output.content.result);
/// # };
/// ```
pub struct SQLDatabaseChain {
    pub(crate) llm_chain: LLMChain<SqlChainLLMChainInputCtor>,
    pub(crate) query_checker_chain: Option<LLMChain<QueryCheckerInputCtor>>,
    pub(crate) sql_parser: Box<dyn OutputParser>,
    pub(crate) top_k: usize,
    pub(crate) database: SQLDatabase,
    pub(crate) return_direct: bool,
}

impl SQLDatabaseChain {
    pub fn builder() -> SQLDatabaseChainBuilder {
        SQLDatabaseChainBuilder::new()
    }

    pub fn database(&self) -> &SQLDatabase {
        &self.database
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Runs the chain and returns the answer with every recorded step. On
    /// failure the error carries the steps completed so far.
    pub async fn call_with_steps(
        &self,
        input: &SqlChainInput<'_>,
    ) -> Result<WithUsage<SqlChainOutput>, ChainError> {
        let mut steps = Vec::new();
        let mut usages = Vec::new();

        match self.run(input, &mut steps, &mut usages).await {
            Ok(result) => Ok(SqlChainOutput {
                result,
                intermediate_steps: steps,
            }
            .with_usage(TokenUsage::merge_options(&usages))),
            Err(e) => Err(e.with_steps(steps)),
        }
    }

    async fn run(
        &self,
        input: &SqlChainInput<'_>,
        steps: &mut Vec<IntermediateStep>,
        usages: &mut Vec<Option<TokenUsage>>,
    ) -> Result<String, ChainError> {
        let mut llm_input = format!("{}{}", input.query, QUERY_PREFIX_WITH);
        let table_info = self.database.table_info(input.tables).await?;
        let dialect = self.database.dialect();

        steps.push(IntermediateStep::Generation {
            input: llm_input.clone(),
            top_k: self.top_k,
            dialect: dialect.to_string(),
            table_info: table_info.clone(),
        });

        let generated = self
            .llm_chain
            .call_with_reference(&self.llm_input(&llm_input, dialect, &table_info))
            .await?;
        usages.push(generated.usage);

        let mut sql_cmd = self.sql_parser.parse(&generated.content)?;
        steps.push(IntermediateStep::Sql {
            sql_cmd: sql_cmd.clone(),
        });

        if let Some(checker) = &self.query_checker_chain {
            let checked = checker
                .call_with_reference(&QueryCheckerInput {
                    query: &sql_cmd,
                    dialect,
                })
                .await?;
            usages.push(checked.usage);

            sql_cmd = self.sql_parser.parse(&checked.content)?;
            steps.push(IntermediateStep::CheckedSql {
                sql_cmd: sql_cmd.clone(),
            });
        }

        log::debug!("Generated SQL: {sql_cmd}");
        let result = self.database.query(&sql_cmd).await?;
        log::trace!("SQL result: {result}");
        steps.push(IntermediateStep::SqlResult {
            result: result.clone(),
        });

        if self.return_direct {
            return Ok(result);
        }

        llm_input.push_str(&format!("{sql_cmd}{STOP_WORD} {result}\nAnswer:"));
        let output = self
            .llm_chain
            .call_with_reference(&self.llm_input(&llm_input, dialect, &table_info))
            .await?;
        usages.push(output.usage);

        let answer = extract_answer(&output.content);
        steps.push(IntermediateStep::Answer {
            input: llm_input,
            answer: answer.clone(),
        });

        Ok(answer)
    }

    fn llm_input<'a>(
        &self,
        input: &'a str,
        dialect: &'a str,
        table_info: &'a str,
    ) -> SqlChainLLMChainInput<'a> {
        SqlChainLLMChainInput {
            input: Cow::Borrowed(input),
            top_k: self.top_k,
            dialect: Cow::Borrowed(dialect),
            tables_info: Cow::Borrowed(table_info),
        }
    }
}

/// Keeps the text up to the first blank line, after `Answer:` when present.
fn extract_answer(output: &str) -> String {
    let first_block = output.split("\n\n").next().unwrap_or("");
    let answer = match first_block.split_once("Answer:") {
        Some((_, after)) => after.split("Answer:").next().unwrap_or(after),
        None => first_block,
    };
    answer.trim().to_string()
}

#[async_trait]
impl Chain for SQLDatabaseChain {
    type InputCtor = SqlChainInputCtor;
    type Output = String;

    async fn call<'a>(
        &self,
        input: SqlChainInput<'a>,
    ) -> Result<WithUsage<Self::Output>, ChainError> {
        Ok(self.call_with_steps(&input).await?.map(|output| output.result))
    }
}
