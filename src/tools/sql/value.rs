use std::fmt;

use rust_decimal::Decimal;

/// A single decoded cell of a query result.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Decimal(Decimal),
    Text(String),
    Json(serde_json::Value),
    Array(Vec<SqlValue>),
}

impl SqlValue {
    /// Renders the value the way it appears inside a result row, e.g.
    /// `'red'`, `None`, `Decimal('12.50')`.
    pub fn repr(&self) -> String {
        match self {
            SqlValue::Null => "None".into(),
            SqlValue::Bool(true) => "True".into(),
            SqlValue::Bool(false) => "False".into(),
            SqlValue::Int(v) => v.to_string(),
            SqlValue::Float(v) => format_float(*v),
            SqlValue::Decimal(v) => format!("Decimal('{v}')"),
            SqlValue::Text(s) => quote(s),
            SqlValue::Json(v) => v.to_string(),
            SqlValue::Array(items) => format!(
                "[{}]",
                items.iter().map(SqlValue::repr).collect::<Vec<_>>().join(", ")
            ),
        }
    }

    /// Shortens text longer than `max_len` at a word boundary and appends
    /// `...`. Other values and a `max_len` of zero are left untouched.
    pub fn truncated(self, max_len: usize) -> SqlValue {
        match self {
            SqlValue::Text(s) if max_len > 0 && s.chars().count() > max_len => {
                SqlValue::Text(truncate_word(&s, max_len))
            }
            other => other,
        }
    }
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Text(s) => write!(f, "{s}"),
            SqlValue::Decimal(v) => write!(f, "{v}"),
            other => write!(f, "{}", other.repr()),
        }
    }
}

/// Renders rows as a list of tuples: `[(1, 'red'), (2, None)]`.
/// An empty result renders as an empty string.
pub fn render_rows(rows: &[Vec<SqlValue>]) -> String {
    if rows.is_empty() {
        return String::new();
    }

    let rendered = rows
        .iter()
        .map(|row| {
            let cells = row.iter().map(SqlValue::repr).collect::<Vec<_>>();
            match cells.as_slice() {
                [single] => format!("({single},)"),
                _ => format!("({})", cells.join(", ")),
            }
        })
        .collect::<Vec<_>>();

    format!("[{}]", rendered.join(", "))
}

const TRUNCATION_SUFFIX: &str = "...";

fn truncate_word(content: &str, max_len: usize) -> String {
    let keep = max_len.saturating_sub(TRUNCATION_SUFFIX.len());
    let prefix: String = content.chars().take(keep).collect();
    let cut = match prefix.rsplit_once(' ') {
        Some((head, _)) => head,
        None => prefix.as_str(),
    };
    format!("{cut}{TRUNCATION_SUFFIX}")
}

fn quote(s: &str) -> String {
    if s.contains('\'') && !s.contains('"') {
        return format!("\"{}\"", s.replace('\\', "\\\\"));
    }
    format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'"))
}

fn format_float(v: f64) -> String {
    if v.is_nan() {
        "nan".into()
    } else if v.is_infinite() {
        if v > 0.0 {
            "inf".into()
        } else {
            "-inf".into()
        }
    } else {
        format!("{v:?}")
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_render_rows() {
        let rows = vec![
            vec![SqlValue::Int(1), SqlValue::Text("Trail Runner".into())],
            vec![SqlValue::Int(2), SqlValue::Null],
        ];
        assert_eq!(render_rows(&rows), "[(1, 'Trail Runner'), (2, None)]");
    }

    #[test]
    fn test_render_single_column_rows() {
        let rows = vec![vec![SqlValue::Int(42)]];
        assert_eq!(render_rows(&rows), "[(42,)]");
        assert_eq!(render_rows(&[]), "");
    }

    #[test]
    fn test_repr_of_values() {
        assert_eq!(SqlValue::Bool(true).repr(), "True");
        assert_eq!(SqlValue::Float(2.0).repr(), "2.0");
        assert_eq!(
            SqlValue::Decimal(Decimal::from_str("79.99").unwrap()).repr(),
            "Decimal('79.99')"
        );
        assert_eq!(SqlValue::Text("O'Neil".into()).repr(), "\"O'Neil\"");
        assert_eq!(
            SqlValue::Array(vec![
                SqlValue::Text("red".into()),
                SqlValue::Text("blue".into())
            ])
            .repr(),
            "['red', 'blue']"
        );
    }

    #[test]
    fn test_display_is_unquoted() {
        assert_eq!(SqlValue::Text("red".into()).to_string(), "red");
        assert_eq!(SqlValue::Null.to_string(), "None");
    }

    #[test]
    fn test_truncated_cuts_at_word_boundary() {
        let value = SqlValue::Text("comfortable running shoe".into()).truncated(15);
        assert_eq!(value, SqlValue::Text("comfortable...".into()));

        let short = SqlValue::Text("shoe".into()).truncated(15);
        assert_eq!(short, SqlValue::Text("shoe".into()));

        assert_eq!(SqlValue::Int(123456).truncated(2), SqlValue::Int(123456));
    }
}
