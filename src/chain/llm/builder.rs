use crate::{
    llm::{options::CallOptions, LLM},
    output_parser::{OutputParser, SimpleParser},
    schemas::{BuilderError, InputCtor},
    template::PromptTemplate,
};

use super::LLMChain;

pub struct LLMChainBuilder<I: InputCtor> {
    prompt: Option<PromptTemplate>,
    llm: Option<Box<dyn LLM>>,
    options: Option<CallOptions>,
    output_parser: Option<Box<dyn OutputParser>>,
    _phantom: std::marker::PhantomData<I>,
}

impl<I: InputCtor> LLMChainBuilder<I> {
    pub(super) fn new() -> Self {
        Self {
            prompt: None,
            llm: None,
            options: None,
            output_parser: None,
            _phantom: std::marker::PhantomData,
        }
    }

    pub fn prompt(mut self, prompt: impl Into<PromptTemplate>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn llm(mut self, llm: impl Into<Box<dyn LLM>>) -> Self {
        self.llm = Some(llm.into());
        self
    }

    /// Options merged into the LLM's own when the chain is built.
    pub fn options(mut self, options: CallOptions) -> Self {
        self.options = Some(options);
        self
    }

    pub fn output_parser(mut self, output_parser: impl OutputParser + 'static) -> Self {
        self.output_parser = Some(Box::new(output_parser));
        self
    }

    pub fn build(self) -> Result<LLMChain<I>, BuilderError> {
        let prompt = self.prompt.ok_or(BuilderError::MissingField("prompt"))?;
        let mut llm = self.llm.ok_or(BuilderError::MissingField("llm"))?;

        if let Some(options) = self.options {
            llm.add_call_options(options);
        }

        let chain = LLMChain {
            prompt,
            llm,
            output_parser: self
                .output_parser
                .unwrap_or_else(|| Box::new(SimpleParser::default())),
            _phantom: std::marker::PhantomData,
        };

        Ok(chain)
    }
}
