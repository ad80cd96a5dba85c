use async_trait::async_trait;

use crate::schemas::{InputCtor, WithUsage};

use super::ChainError;

#[async_trait]
pub trait Chain: Sync + Send {
    type InputCtor: InputCtor;
    type Output: Send;

    /// Call the `Chain` and receive as output the result of the generation process along with
    /// additional information like token consumption.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let chain: LLMChain<DefaultChainInputCtor> = LLMChain::builder()
    ///     .prompt(prompt_template![
    ///         Message::new_system_message("You are a PostgreSQL expert."),
    ///         MessageTemplate::from_jinja2(MessageType::Human, "{{input}}"),
    ///     ])
    ///     .llm(OpenAI::default())
    ///     .build()?;
    ///
    /// let answer = chain.call(DefaultChainInput::new("What is a CTE?")).await?;
    /// println!("{}", answer.content);
    /// ```
    async fn call<'a>(
        &self,
        input: <Self::InputCtor as InputCtor>::Target<'a>,
    ) -> Result<WithUsage<Self::Output>, ChainError>;

    /// Like [`Chain::call`], discarding token usage.
    async fn invoke<'a>(
        &self,
        input: <Self::InputCtor as InputCtor>::Target<'a>,
    ) -> Result<Self::Output, ChainError> {
        Ok(self.call(input).await?.content)
    }
}
