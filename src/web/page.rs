use html_escape::{encode_double_quoted_attribute, encode_text};
use indoc::formatdoc;

pub(super) const TITLE: &str = "AI Database Q&A Agent";

/// What to show under the form.
pub(super) enum Reply<'a> {
    None,
    Message(&'a str),
    Answer { question: &'a str, answer: &'a str },
}

pub(super) fn render(db_uri: &str, question: &str, reply: Reply<'_>) -> String {
    let reply = match reply {
        Reply::None => String::new(),
        Reply::Message(message) => format!("<p class=\"message\">{}</p>", encode_text(message)),
        Reply::Answer { question, answer } => formatdoc! {r#"
            <section class="reply">
              <h2>Question:</h2>
              <pre>{question}</pre>
              <h2>Answer:</h2>
              <pre>{answer}</pre>
            </section>"#,
            question = encode_text(question),
            answer = encode_text(answer),
        },
    };

    formatdoc! {r#"
        <!DOCTYPE html>
        <html lang="en">
        <head>
          <meta charset="utf-8">
          <title>{TITLE}</title>
        </head>
        <body>
          <h1>{TITLE}</h1>
          <form method="post" action="/">
            <label for="db_uri">Enter your database URI:</label>
            <input type="text" id="db_uri" name="db_uri" value="{db_uri}">
            <label for="question">Ask your question:</label>
            <textarea id="question" name="question">{question}</textarea>
            <button type="submit">Submit</button>
          </form>
          {reply}
        </body>
        </html>
    "#,
        db_uri = encode_double_quoted_attribute(db_uri),
        question = encode_text(question),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_form() {
        let html = render("", "", Reply::None);
        assert!(html.contains("<h1>AI Database Q&A Agent</h1>"));
        assert!(html.contains("Enter your database URI:"));
        assert!(html.contains("Ask your question:"));
        assert!(html.contains(">Submit</button>"));
        assert!(!html.contains("Answer:"));
    }

    #[test]
    fn test_user_text_is_escaped() {
        let html = render(
            "postgresql://u:p\"w@db/shop",
            "<b>shoes</b>",
            Reply::Answer {
                question: "<b>shoes</b>",
                answer: "<script>alert(1)</script>",
            },
        );

        assert!(html.contains("value=\"postgresql://u:p&quot;w@db/shop\""));
        assert!(html.contains("&lt;b&gt;shoes&lt;/b&gt;"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
    }
}
