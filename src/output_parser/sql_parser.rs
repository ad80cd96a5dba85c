use super::{OutputParseError, OutputParser, RegexParser};

const QUERY_MARKER: &str = "SQLQuery:";
const END_MARKERS: [&str; 2] = ["SQLResult:", "Answer:"];

/// Extracts the SQL statement from a model completion.
///
/// Accepts a bare statement, a fenced ```sql block, or text following a
/// `SQLQuery:` marker. Anything from `SQLResult:` or `Answer:` onwards is
/// dropped.
#[derive(Debug, Clone)]
pub struct SqlQueryParser {
    code_block: RegexParser,
}

impl Default for SqlQueryParser {
    fn default() -> Self {
        Self {
            code_block: RegexParser::code_block().fallback_to_input(true),
        }
    }
}

impl OutputParser for SqlQueryParser {
    fn parse(&self, output: &str) -> Result<String, OutputParseError> {
        let output = self.code_block.sanitize(output)?;

        let output = match output.find(QUERY_MARKER) {
            Some(start) => &output[start + QUERY_MARKER.len()..],
            None => output,
        };

        let end = END_MARKERS
            .iter()
            .filter_map(|marker| output.find(marker))
            .min()
            .unwrap_or(output.len());

        let sql = output[..end].trim();
        if sql.is_empty() {
            return Err(OutputParseError::Empty);
        }
        Ok(sql.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_statement() {
        let parser = SqlQueryParser::default();
        assert_eq!(
            parser.parse(" SELECT * FROM users LIMIT 5\n").unwrap(),
            "SELECT * FROM users LIMIT 5"
        );
    }

    #[test]
    fn test_marker_and_trailing_sections() {
        let parser = SqlQueryParser::default();
        let output = "SQLQuery: SELECT name FROM products WHERE price < 50\nSQLResult: [('Runner',)]\nAnswer: Runner";
        assert_eq!(
            parser.parse(output).unwrap(),
            "SELECT name FROM products WHERE price < 50"
        );
    }

    #[test]
    fn test_fenced_statement() {
        let parser = SqlQueryParser::default();
        let output = "```sql\nSELECT COUNT(*) FROM users;\n```";
        assert_eq!(parser.parse(output).unwrap(), "SELECT COUNT(*) FROM users;");
    }

    #[test]
    fn test_empty_output_is_an_error() {
        let parser = SqlQueryParser::default();
        assert!(matches!(
            parser.parse("SQLQuery:  \nSQLResult:"),
            Err(OutputParseError::Empty)
        ));
    }
}
