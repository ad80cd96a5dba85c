use async_openai::types::{ChatChoice, ChatCompletionResponseMessage, FinishReason};

use crate::llm::LLMError;

/// Picks the first choice that was not cut short by a length limit or the
/// content filter, falling back to the first choice overall.
pub fn select_choice(choices: Vec<ChatChoice>) -> Option<ChatChoice> {
    let rank = |c: &ChatChoice| match c.finish_reason {
        Some(FinishReason::ContentFilter) | Some(FinishReason::Length) => 1,
        _ => 0,
    };

    choices
        .into_iter()
        .min_by(|c1, c2| rank(c1).cmp(&rank(c2)).then_with(|| c1.index.cmp(&c2.index)))
}

pub fn message_text(message: ChatCompletionResponseMessage) -> Result<String, LLMError> {
    if let Some(content) = message.content {
        return Ok(content);
    }
    if let Some(refusal) = message.refusal {
        return Err(LLMError::Refused(refusal));
    }
    Err(LLMError::ContentNotFound("/choices/0/message/content".into()))
}
