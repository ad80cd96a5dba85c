use async_trait::async_trait;

use crate::{
    llm::{options::CallOptions, LLMError},
    schemas::{Message, WithUsage},
};

#[async_trait]
pub trait LLM: LLMClone + Sync + Send {
    async fn generate(&self, messages: Vec<Message>) -> Result<WithUsage<String>, LLMError>;

    async fn invoke(&self, prompt: &str) -> Result<String, LLMError> {
        let result = self
            .generate(vec![Message::new_human_message(prompt)])
            .await?
            .content;
        Ok(result)
    }

    /// This is useful when you want to create a chain and override
    /// LLM options
    fn add_call_options(&mut self, call_options: CallOptions);

    //This is usefull when using non chat models
    fn messages_to_string(&self, messages: &[Message]) -> String {
        messages
            .iter()
            .map(|m| m.to_string())
            .collect::<Vec<String>>()
            .join("\n")
    }
}

pub trait LLMClone {
    fn clone_box(&self) -> Box<dyn LLM>;
}

impl<T> LLMClone for T
where
    T: 'static + LLM + Clone,
{
    fn clone_box(&self) -> Box<dyn LLM> {
        Box::new(self.clone())
    }
}

impl Clone for Box<dyn LLM> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

impl<L> From<L> for Box<dyn LLM>
where
    L: 'static + LLM,
{
    fn from(llm: L) -> Self {
        Box::new(llm)
    }
}
