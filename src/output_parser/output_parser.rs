use crate::output_parser::OutputParseError;

pub trait OutputParser: Send + Sync {
    fn parse(&self, output: &str) -> Result<String, OutputParseError>;
}
