use std::{collections::HashSet, sync::LazyLock};

use regex::{Captures, Regex};

use crate::{
    schemas::{Message, MessageType, TextReplacements},
    template::TemplateError,
};

static FSTRING_VARIABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(\w+)\}").expect("valid regex"));
static JINJA2_VARIABLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*(\w+)\s*\}\}").expect("valid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateFormat {
    FString,
    Jinja2,
}

impl TemplateFormat {
    fn pattern(self) -> &'static Regex {
        match self {
            TemplateFormat::FString => &FSTRING_VARIABLE,
            TemplateFormat::Jinja2 => &JINJA2_VARIABLE,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MessageTemplate {
    message_type: MessageType,
    template: String,
    variables: HashSet<String>,
    format: TemplateFormat,
}

impl MessageTemplate {
    pub fn new(
        message_type: MessageType,
        template: impl Into<String>,
        format: TemplateFormat,
    ) -> Self {
        let template = template.into();
        let variables = format
            .pattern()
            .captures_iter(&template)
            .map(|cap| cap[1].to_string())
            .collect();

        Self {
            message_type,
            template,
            variables,
            format,
        }
    }

    pub fn from_fstring(message_type: MessageType, content: impl Into<String>) -> Self {
        Self::new(message_type, content, TemplateFormat::FString)
    }

    pub fn from_jinja2(message_type: MessageType, content: impl Into<String>) -> Self {
        Self::new(message_type, content, TemplateFormat::Jinja2)
    }

    /// Substitutes every variable in a single pass, so values that happen to
    /// contain braces are inserted verbatim.
    pub fn format(&self, input: &TextReplacements) -> Result<Message, TemplateError> {
        self.validate_input(input)?;

        let content = self
            .format
            .pattern()
            .replace_all(&self.template, |caps: &Captures| {
                input
                    .get(&caps[1])
                    .map(|value| value.to_string())
                    .unwrap_or_else(|| caps[0].to_string())
            });

        Ok(Message::new(self.message_type.clone(), content))
    }

    /// Returns a list of required input variable names for the template.
    pub fn variables(&self) -> HashSet<&str> {
        self.variables.iter().map(String::as_str).collect()
    }

    pub fn message_type(&self) -> &MessageType {
        &self.message_type
    }

    pub fn validate_input(&self, input: &TextReplacements) -> Result<(), TemplateError> {
        let mut missing_variables = self
            .variables
            .iter()
            .filter(|v| !input.contains_key(v.as_str()))
            .map(String::as_str)
            .collect::<Vec<_>>();

        if !missing_variables.is_empty() {
            missing_variables.sort_unstable();
            return Err(TemplateError::MissingVariable(missing_variables.join(", ")));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_fstring_template() {
        let template = MessageTemplate::from_fstring(MessageType::Ai, "Hello {name}, how are you?");

        let input = HashMap::from([("name", "Alice".into())]);

        let message = template.format(&input).unwrap();
        assert_eq!(message.content, "Hello Alice, how are you?");
    }

    #[test]
    fn test_jinja2_template() {
        let template =
            MessageTemplate::from_jinja2(MessageType::Ai, "Hello {{name}}, how are you?");

        let input_variables = HashMap::from([("name", "Alice".into())]);

        let message = template.format(&input_variables).unwrap();
        assert_eq!(message.content, "Hello Alice, how are you?");
    }

    #[test]
    fn test_jinja2_template_duplicate() {
        let template = MessageTemplate::from_jinja2(
            MessageType::Ai,
            "Hello {{name}}, how are you? Nice to meet you {{name}}!",
        );

        let input_variables = HashMap::from([("name", "Alice".into())]);

        let message = template.format(&input_variables).unwrap();
        assert_eq!(
            message.content,
            "Hello Alice, how are you? Nice to meet you Alice!"
        );
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let template = MessageTemplate::from_jinja2(
            MessageType::Human,
            "{{input}}\nTables:\n{{table_info}}",
        );

        let input = HashMap::from([
            ("input", "What is {{table_info}}?".into()),
            ("table_info", "CREATE TABLE users (id INTEGER)".into()),
        ]);

        let message = template.format(&input).unwrap();
        assert_eq!(
            message.content,
            "What is {{table_info}}?\nTables:\nCREATE TABLE users (id INTEGER)"
        );
    }

    #[test]
    fn test_jinja2_braces_in_literal_text_are_kept() {
        let template = MessageTemplate::from_jinja2(
            MessageType::System,
            "SELECT '{1,2}'::int[] for {{dialect}}",
        );
        assert_eq!(template.variables(), HashSet::from(["dialect"]));

        let input = HashMap::from([("dialect", "postgresql".into())]);
        let message = template.format(&input).unwrap();
        assert_eq!(message.content, "SELECT '{1,2}'::int[] for postgresql");
    }

    #[test]
    fn test_missing_variables_are_reported() {
        let template = MessageTemplate::from_fstring(MessageType::Human, "{b} and {a}");

        let err = template.format(&HashMap::new()).unwrap_err();
        assert!(matches!(err, TemplateError::MissingVariable(v) if v == "a, b"));
    }
}
