use super::{OutputParseError, OutputParser};

/// Passes the model output through, trimmed by default.
#[derive(Debug, Clone)]
pub struct SimpleParser {
    trim: bool,
}

impl SimpleParser {
    pub fn trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }
}

impl Default for SimpleParser {
    fn default() -> Self {
        Self { trim: true }
    }
}

impl OutputParser for SimpleParser {
    fn parse(&self, output: &str) -> Result<String, OutputParseError> {
        if self.trim {
            Ok(output.trim().to_string())
        } else {
            Ok(output.to_string())
        }
    }
}
