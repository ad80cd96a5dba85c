pub use async_openai::config::{Config, OpenAIConfig};

use async_openai::{types::CreateChatCompletionResponse, Client};
use async_trait::async_trait;

use crate::{
    llm::{options::CallOptions, LLMError, LLM},
    schemas::{IntoWithUsage, Message, WithUsage},
};

use super::{
    helper::{message_text, select_choice},
    request::OpenAIRequest,
    OpenAIBuilder,
};

#[derive(Clone)]
pub struct OpenAI<C: Config> {
    client: Client<C>,
    model: String,
    call_options: CallOptions,
}

impl<C: Config> OpenAI<C> {
    pub fn new(client: Client<C>, model: impl Into<String>, call_options: CallOptions) -> Self {
        Self {
            client,
            model: model.into(),
            call_options,
        }
    }

    pub fn builder() -> OpenAIBuilder<C>
    where
        C: Default,
    {
        OpenAIBuilder::default()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn call_options(&self) -> &CallOptions {
        &self.call_options
    }
}

impl Default for OpenAI<OpenAIConfig> {
    fn default() -> Self {
        OpenAIBuilder::default().build()
    }
}

#[async_trait]
impl<C: Config + Clone + Send + Sync + 'static> LLM for OpenAI<C> {
    async fn generate(&self, messages: Vec<Message>) -> Result<WithUsage<String>, LLMError> {
        let request =
            OpenAIRequest::new(&self.model, messages)?.with_options(self.call_options.clone());

        let response = self
            .client
            .chat()
            .create_byot::<_, CreateChatCompletionResponse>(request)
            .await?;

        let usage = response.usage.map(Into::into);
        let choice = select_choice(response.choices)
            .ok_or(LLMError::ContentNotFound("/choices".into()))?;
        let content = message_text(choice.message)?;

        log::trace!("LLM output: {content}");
        if let Some(usage) = &usage {
            log::trace!("Token usage: {usage}");
        }

        Ok(content.with_usage(usage))
    }

    fn add_call_options(&mut self, call_options: CallOptions) {
        self.call_options.merge_options(call_options)
    }
}

#[cfg(test)]
mod tests {
    use mockito::Matcher;
    use serde_json::json;

    use super::*;
    use crate::llm::OpenAIModel;

    fn completion_body(content: &str) -> String {
        json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "created": 1_700_000_000,
            "model": "gpt-4o-mini",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }],
            "usage": { "prompt_tokens": 12, "completion_tokens": 5, "total_tokens": 17 }
        })
        .to_string()
    }

    fn llm_for(server: &mockito::ServerGuard) -> OpenAI<OpenAIConfig> {
        OpenAIBuilder::new(
            OpenAIConfig::new()
                .with_api_key("test-key")
                .with_api_base(server.url()),
        )
        .with_call_options(CallOptions::new().with_temperature(0.0))
        .build()
    }

    #[tokio::test]
    async fn test_generate_posts_chat_completion() {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer test-key")
            .match_body(Matcher::PartialJson(json!({
                "model": "gpt-4o-mini",
                "temperature": 0.0,
                "stop": ["\nSQLResult:"],
                "messages": [{ "role": "user", "content": "How many users?" }]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(completion_body("SELECT COUNT(*) FROM users"))
            .create_async()
            .await;

        let mut llm = llm_for(&server);
        llm.add_call_options(CallOptions::new().with_stop_words(["\nSQLResult:"]));

        let result = llm
            .generate(vec![Message::new_human_message("How many users?")])
            .await
            .unwrap();

        assert_eq!(result.content, "SELECT COUNT(*) FROM users");
        let usage = result.usage.unwrap();
        assert_eq!(usage.prompt_tokens, 12);
        assert_eq!(usage.completion_tokens, 5);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_generate_surfaces_api_errors() {
        let mut server = mockito::Server::new_async().await;

        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(401)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "error": {
                        "message": "Incorrect API key provided",
                        "type": "invalid_request_error",
                        "param": null,
                        "code": "invalid_api_key"
                    }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let err = llm_for(&server).invoke("hi").await.unwrap_err();
        assert!(matches!(err, LLMError::OpenAIError(_)));
        assert!(err.to_string().contains("Incorrect API key provided"));
    }

    #[tokio::test]
    #[ignore]
    async fn test_invoke_live() {
        let llm = OpenAIBuilder::<OpenAIConfig>::default()
            .with_model(OpenAIModel::Gpt4oMini)
            .build();
        let response = llm.invoke("Reply with the single word: pong").await.unwrap();
        println!("{response}");
    }
}
