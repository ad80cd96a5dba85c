use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form, Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::agent::{Outcome, QuestionAnswerer, MISSING_INPUT};

use super::page::{render, Reply};

/// Body of both the form submission and the JSON API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AskRequest {
    #[serde(default)]
    pub db_uri: String,
    #[serde(default)]
    pub question: String,
}

pub async fn index_handler() -> Html<String> {
    Html(render("", "", Reply::None))
}

pub async fn form_handler(
    State(answerer): State<Arc<QuestionAnswerer>>,
    Form(request): Form<AskRequest>,
) -> Html<String> {
    let outcome = answerer.ask(&request.db_uri, &request.question).await;

    let html = match &outcome {
        Outcome::MissingInput => render(
            &request.db_uri,
            &request.question,
            Reply::Message(MISSING_INPUT),
        ),
        Outcome::Answered(answer) => render(
            &request.db_uri,
            &request.question,
            Reply::Answer {
                question: &answer.question,
                answer: &answer.answer,
            },
        ),
        Outcome::Failed(error) => render(
            &request.db_uri,
            &request.question,
            Reply::Answer {
                question: &request.question,
                answer: error,
            },
        ),
    };

    Html(html)
}

pub async fn ask_handler(
    State(answerer): State<Arc<QuestionAnswerer>>,
    Json(request): Json<AskRequest>,
) -> Response {
    match answerer.ask(&request.db_uri, &request.question).await {
        Outcome::Answered(answer) => {
            tracing::info!(steps = answer.intermediate_steps.len(), "question answered");
            Json(answer).into_response()
        }
        Outcome::MissingInput => {
            (StatusCode::BAD_REQUEST, Json(json!({ "error": MISSING_INPUT }))).into_response()
        }
        Outcome::Failed(error) => {
            tracing::warn!(%error, "question failed");
            (StatusCode::BAD_GATEWAY, Json(json!({ "error": error }))).into_response()
        }
    }
}

pub async fn health_handler() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request},
        Router,
    };
    use tower::ServiceExt;

    use super::*;
    use crate::{
        agent::MISSING_API_KEY,
        config::Settings,
        web::create_router,
    };

    fn app() -> Router {
        let mut settings = Settings::default();
        settings.openai.api_key = None;
        create_router(Arc::new(QuestionAnswerer::new(&settings)))
    }

    async fn body_string(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn form(body: &str) -> Request<Body> {
        Request::post("/")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn json_request(body: serde_json::Value) -> Request<Body> {
        Request::post("/api/ask")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "ok");
    }

    #[tokio::test]
    async fn test_index_serves_form() {
        let response = app()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_string(response).await;
        assert!(html.contains("AI Database Q&A Agent"));
        assert!(html.contains("name=\"db_uri\""));
    }

    #[tokio::test]
    async fn test_form_missing_input() {
        let response = app().oneshot(form("db_uri=&question=Any+shoes%3F")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_string(response).await;
        assert!(html.contains(MISSING_INPUT));
        assert!(html.contains(">Any shoes?</textarea>"));
    }

    #[tokio::test]
    async fn test_form_shows_error_as_answer() {
        let response = app()
            .oneshot(form(
                "db_uri=postgresql%3A%2F%2Flocalhost%2Fshop&question=Any+%3Cred%3E+shoes%3F",
            ))
            .await
            .unwrap();

        let html = body_string(response).await;
        assert!(html.contains("<h2>Question:</h2>\n  <pre>Any &lt;red&gt; shoes?</pre>"));
        assert!(html.contains(MISSING_API_KEY));
    }

    #[tokio::test]
    async fn test_api_missing_input() {
        let response = app()
            .oneshot(json_request(json!({ "question": "Any shoes?" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["error"], MISSING_INPUT);
    }

    #[tokio::test]
    async fn test_api_failure() {
        let response = app()
            .oneshot(json_request(json!({
                "db_uri": "postgresql://localhost/shop",
                "question": "Any shoes?"
            })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(body["error"], MISSING_API_KEY);
    }
}
