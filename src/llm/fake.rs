use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;

use crate::{
    llm::{options::CallOptions, LLMError, LLM},
    schemas::{IntoWithUsage, Message, TokenUsage, WithUsage},
};

/// Replays scripted responses in order and records every call it receives.
#[derive(Clone, Default)]
pub struct FakeLLM {
    responses: Arc<Mutex<VecDeque<Result<String, String>>>>,
    calls: Arc<Mutex<Vec<(Vec<Message>, CallOptions)>>>,
    call_options: CallOptions,
}

impl FakeLLM {
    pub fn new<S: Into<String>>(responses: impl IntoIterator<Item = S>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(
                responses.into_iter().map(|r| Ok(r.into())).collect(),
            )),
            ..Default::default()
        }
    }

    /// Queues a failing call after the scripted responses.
    pub fn then_fail(self, message: impl Into<String>) -> Self {
        self.responses.lock().unwrap().push_back(Err(message.into()));
        self
    }

    pub fn calls(&self) -> Vec<(Vec<Message>, CallOptions)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.calls()
            .iter()
            .map(|(messages, _)| self.messages_to_string(messages))
            .collect()
    }
}

#[async_trait]
impl LLM for FakeLLM {
    async fn generate(&self, messages: Vec<Message>) -> Result<WithUsage<String>, LLMError> {
        self.calls
            .lock()
            .unwrap()
            .push((messages, self.call_options.clone()));

        match self.responses.lock().unwrap().pop_front() {
            Some(Ok(response)) => Ok(response.with_usage(Some(TokenUsage::new(10, 5)))),
            Some(Err(message)) => Err(LLMError::OtherError(message)),
            None => Err(LLMError::OtherError("FakeLLM ran out of responses".into())),
        }
    }

    fn add_call_options(&mut self, call_options: CallOptions) {
        self.call_options.merge_options(call_options)
    }
}
