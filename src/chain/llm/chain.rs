use async_trait::async_trait;

use crate::{
    chain::{Chain, ChainError},
    llm::LLM,
    output_parser::OutputParser,
    schemas::{GetPrompt, InputCtor, IntoWithUsage, Prompt, WithUsage},
    template::{PromptTemplate, TemplateError},
};

use super::LLMChainBuilder;

/// Formats a prompt template, sends it to an LLM and parses the reply.
pub struct LLMChain<I: InputCtor> {
    pub(super) prompt: PromptTemplate,
    pub(super) llm: Box<dyn LLM>,
    pub(super) output_parser: Box<dyn OutputParser>,
    pub(super) _phantom: std::marker::PhantomData<I>,
}

impl<I: InputCtor> LLMChain<I> {
    pub fn builder() -> LLMChainBuilder<I> {
        LLMChainBuilder::new()
    }

    pub fn prompt(&self) -> &PromptTemplate {
        &self.prompt
    }

    pub(crate) async fn call_with_reference(
        &self,
        input: &I::Target<'_>,
    ) -> Result<WithUsage<String>, ChainError> {
        let prompt = self.prompt.format(input)?;
        let WithUsage { content, usage } = self.llm.generate(prompt.to_messages()).await?;

        log::trace!("\nLLM output:\n{content}");
        if let Some(usage) = &usage {
            log::trace!("\nToken usage:\n{usage}");
        }

        let content = self.output_parser.parse(&content)?;

        Ok(content.with_usage(usage))
    }
}

#[async_trait]
impl<I: InputCtor> Chain for LLMChain<I> {
    type InputCtor = I;
    type Output = String;

    async fn call<'a>(&self, input: I::Target<'a>) -> Result<WithUsage<String>, ChainError> {
        self.call_with_reference(&input).await
    }
}

impl<I: InputCtor> GetPrompt<&I::Target<'_>> for LLMChain<I> {
    fn get_prompt(&self, input: &I::Target<'_>) -> Result<Prompt, TemplateError> {
        self.prompt.format(input)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        llm::{fake::FakeLLM, options::CallOptions},
        output_parser::RegexParser,
        prompt_template,
        schemas::{ChainInput, Ctor, DefaultChainInput, DefaultChainInputCtor, Message, MessageType},
        template::MessageTemplate,
    };

    use super::*;

    #[derive(Clone, ChainInput, Ctor)]
    struct ProductInput<'a> {
        #[langchain(into = "text")]
        product: &'a str,
        #[langchain(into = "text")]
        limit: usize,
    }

    #[tokio::test]
    async fn test_call_formats_prompt_and_parses_output() {
        let llm = FakeLLM::new(["```sql\nSELECT name FROM products LIMIT 3\n```"]);

        let chain: LLMChain<ProductInputCtor> = LLMChain::builder()
            .prompt(prompt_template![
                Message::new_system_message("You write SQL."),
                MessageTemplate::from_jinja2(
                    MessageType::Human,
                    "List {{limit}} products like {{product}}"
                ),
            ])
            .llm(llm.clone())
            .output_parser(RegexParser::code_block())
            .options(CallOptions::new().with_temperature(0.0))
            .build()
            .unwrap();

        let result = chain
            .call(ProductInput {
                product: "sneakers",
                limit: 3,
            })
            .await
            .unwrap();

        assert_eq!(result.content, "SELECT name FROM products LIMIT 3");
        assert_eq!(result.usage.unwrap().total_tokens, 15);

        let calls = llm.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0].0,
            vec![
                Message::new_system_message("You write SQL."),
                Message::new_human_message("List 3 products like sneakers"),
            ]
        );
        assert_eq!(calls[0].1.temperature, Some(0.0));
    }

    #[tokio::test]
    async fn test_get_prompt_and_missing_variables() {
        let chain: LLMChain<DefaultChainInputCtor> = LLMChain::builder()
            .prompt(MessageTemplate::from_jinja2(
                MessageType::Human,
                "{{input}} in {{dialect}}",
            ))
            .llm(FakeLLM::new(["unused"]))
            .build()
            .unwrap();

        let err = chain
            .get_prompt(&DefaultChainInput::new("Count users"))
            .unwrap_err();
        assert!(matches!(err, TemplateError::MissingVariable(v) if v == "dialect"));

        let err = chain.invoke(DefaultChainInput::new("Count users")).await.unwrap_err();
        assert!(matches!(err, ChainError::PromptError(_)));
    }

    #[tokio::test]
    async fn test_llm_errors_propagate() {
        let chain: LLMChain<DefaultChainInputCtor> = LLMChain::builder()
            .prompt(MessageTemplate::from_jinja2(MessageType::Human, "{{input}}"))
            .llm(FakeLLM::new(Vec::<String>::new()).then_fail("rate limited"))
            .build()
            .unwrap();

        let err = chain.invoke(DefaultChainInput::new("hi")).await.unwrap_err();
        assert!(matches!(err, ChainError::LLMError(_)));
        assert!(err.to_string().contains("rate limited"));
    }
}
