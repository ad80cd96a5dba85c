use regex::Regex;

use super::{OutputParseError, OutputParser};

#[derive(Debug, Clone)]
pub struct RegexParser {
    re: Regex,
    trim: bool,
    fallback_to_input: bool,
}

impl RegexParser {
    pub fn new(re: Regex) -> Self {
        Self {
            re,
            trim: true,
            fallback_to_input: false,
        }
    }

    pub fn trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    /// Return the whole output instead of failing when nothing matches.
    pub fn fallback_to_input(mut self, fallback: bool) -> Self {
        self.fallback_to_input = fallback;
        self
    }

    pub fn code_block() -> Self {
        let re = Regex::new(r"```(?:\w+)?\s*([\s\S]+?)\s*```").expect("Static regex is valid");
        Self::new(re)
    }

    pub fn sanitize<'a>(&self, output: &'a str) -> Result<&'a str, OutputParseError> {
        let captured = match self.re.captures(output).and_then(|cap| cap.get(1)) {
            Some(m) => m.as_str(),
            None if self.fallback_to_input => output,
            None => return Err(OutputParseError::NoMatch(output.to_string())),
        };

        if self.trim {
            Ok(captured.trim())
        } else {
            Ok(captured)
        }
    }
}

impl OutputParser for RegexParser {
    fn parse(&self, output: &str) -> Result<String, OutputParseError> {
        self.sanitize(output).map(str::to_string)
    }
}
