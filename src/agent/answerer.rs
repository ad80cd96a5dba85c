use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::{
    chain::{IntermediateStep, SQLDatabaseChain, SqlChainInput},
    config::{DatabaseSettings, Settings},
    llm::{options::CallOptions, OpenAI, OpenAIBuilder, OpenAIConfig},
    tools::SQLDatabase,
};

use super::{prepare_agent_prompt, AskError};

pub const MISSING_INPUT: &str = "Please provide both a database URI and a question.";

/// Answer to one question, with the steps the query chain went through.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Answer {
    pub question: String,
    pub answer: String,
    pub intermediate_steps: Vec<IntermediateStep>,
}

/// Result of a form submission.
#[derive(Debug)]
pub enum Outcome {
    MissingInput,
    Answered(Answer),
    /// The error text, shown in place of an answer.
    Failed(String),
}

/// Answers natural-language questions about a PostgreSQL database. Every
/// question opens its own connection to the URI it comes with.
pub struct QuestionAnswerer {
    api_key: Option<SecretString>,
    api_base: Option<String>,
    model: String,
    request_timeout: Duration,
    database: DatabaseSettings,
}

impl QuestionAnswerer {
    pub fn new(settings: &Settings) -> Self {
        Self {
            api_key: settings
                .openai
                .api_key
                .as_deref()
                .map(str::trim)
                .filter(|key| !key.is_empty())
                .map(SecretString::from),
            api_base: settings.openai.api_base.clone(),
            model: settings.openai.model.clone(),
            request_timeout: Duration::from_secs(settings.openai.request_timeout_secs),
            database: settings.database.clone(),
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Form-level entry point: validates the inputs and turns failures into
    /// displayable text.
    pub async fn ask(&self, db_uri: &str, question: &str) -> Outcome {
        let (db_uri, question) = (db_uri.trim(), question.trim());
        if db_uri.is_empty() || question.is_empty() {
            return Outcome::MissingInput;
        }

        match self.process_question(db_uri, question).await {
            Ok(answer) => Outcome::Answered(answer),
            Err(e) => {
                log::warn!("Failed to answer question: {e}");
                Outcome::Failed(e.to_string())
            }
        }
    }

    pub async fn process_question(&self, db_uri: &str, question: &str) -> Result<Answer, AskError> {
        let llm = self.llm()?;

        let database = SQLDatabase::builder_from_uri(db_uri)
            .await?
            .include_tables(self.database.include_tables.iter().cloned())
            .sample_rows_in_table_info(self.database.sample_rows)
            .build()
            .await?;

        self.answer_with(llm, database, question).await
    }

    fn llm(&self) -> Result<OpenAI<OpenAIConfig>, AskError> {
        let api_key = self.api_key.as_ref().ok_or(AskError::MissingApiKey)?;
        log::info!("OpenAI API key set.");

        let mut config = OpenAIConfig::new().with_api_key(api_key.expose_secret());
        if let Some(api_base) = &self.api_base {
            config = config.with_api_base(api_base);
        }

        let http_client = reqwest::Client::builder()
            .timeout(self.request_timeout)
            .build()?;

        Ok(OpenAIBuilder::new(config)
            .with_model(&self.model)
            .with_http_client(http_client)
            .with_call_options(CallOptions::new().with_temperature(0.0))
            .build())
    }

    /// Runs the query chain for `question` against `database` and closes the
    /// database afterwards, whatever the outcome.
    async fn answer_with(
        &self,
        llm: OpenAI<OpenAIConfig>,
        database: SQLDatabase,
        question: &str,
    ) -> Result<Answer, AskError> {
        let chain = SQLDatabaseChain::builder()
            .llm(llm)
            .database(database)
            .top_k(self.database.top_k)
            .use_query_checker(self.database.use_query_checker)
            .build()?;

        let prompt = prepare_agent_prompt(question);
        let output = chain.call_with_steps(&SqlChainInput::new(&prompt)).await;
        chain.database().close().await;

        let output = output?;
        if let Some(usage) = &output.usage {
            log::debug!("Question answered using {usage}");
        }

        Ok(Answer {
            question: question.to_string(),
            answer: output.content.result,
            intermediate_steps: output.content.intermediate_steps,
        })
    }
}
