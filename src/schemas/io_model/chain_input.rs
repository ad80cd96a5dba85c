pub use macros::ChainInput;
use std::{borrow::Cow, collections::HashMap};

use crate::schemas::{Ctor, Message};

pub type TextReplacements<'a> = HashMap<&'a str, Cow<'a, str>>;
pub type PlaceholderReplacements<'a> = HashMap<&'a str, Cow<'a, [Message]>>;

pub trait ChainInput: Send + Sync {
    fn text_replacements(&self) -> TextReplacements<'_>;
    fn placeholder_replacements(&self) -> PlaceholderReplacements<'_> {
        HashMap::new()
    }
}

impl ChainInput for HashMap<String, String> {
    fn text_replacements(&self) -> TextReplacements<'_> {
        self.iter()
            .map(|(k, v)| (k.as_str(), v.as_str().into()))
            .collect()
    }
}

impl ChainInput for HashMap<&str, &str> {
    fn text_replacements(&self) -> TextReplacements<'_> {
        self.iter().map(|(&k, &v)| (k, v.into())).collect()
    }
}

#[derive(Clone, Default, ChainInput, Ctor)]
pub struct DefaultChainInput<'a> {
    #[langchain(into = "text")]
    input: &'a str,
}

impl<'a> DefaultChainInput<'a> {
    pub fn new(input: &'a (impl AsRef<str> + ?Sized)) -> Self {
        Self {
            input: input.as_ref(),
        }
    }

    pub fn input(mut self, input: &'a str) -> Self {
        self.input = input;
        self
    }
}

impl<'a> From<&'a str> for DefaultChainInput<'a> {
    fn from(input: &'a str) -> Self {
        Self::new(input)
    }
}

impl std::fmt::Display for DefaultChainInput<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, ChainInput)]
    struct ReportInput<'a> {
        #[langchain(into = "text")]
        title: &'a str,
        #[langchain(into = "text")]
        #[serde(rename = "row_limit")]
        limit: usize,
        #[langchain(into = "text")]
        owner: Option<String>,
        #[langchain(into = "placeholder")]
        history: Vec<Message>,
        #[allow(dead_code)]
        ignored: &'a str,
    }

    #[test]
    fn test_derived_text_replacements() {
        let input = ReportInput {
            title: "Monthly sales",
            limit: 10,
            owner: None,
            history: vec![Message::new_human_message("hi")],
            ignored: "nope",
        };

        let replacements = input.text_replacements();
        assert_eq!(replacements.len(), 3);
        assert_eq!(replacements["title"], "Monthly sales");
        assert_eq!(replacements["row_limit"], "10");
        assert_eq!(replacements["owner"], "");
        assert!(!replacements.contains_key("ignored"));

        let placeholders = input.placeholder_replacements();
        assert_eq!(placeholders["history"].len(), 1);
    }

    #[test]
    fn test_default_chain_input() {
        let input = DefaultChainInput::new("Which shoes are blue?");
        assert_eq!(input.text_replacements()["input"], "Which shoes are blue?");
        assert_eq!(input.to_string(), "Which shoes are blue?");
    }
}
