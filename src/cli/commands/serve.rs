//! HTTP API server for integration with other systems.
//!
//! Exposes the router over REST: ask a question, or only classify it.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::error::TutorError;
use crate::router::{self, Category, RouterResult};
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// Shared application state.
struct AppState {
    router: router::Router,
}

/// Run the HTTP API server.
pub async fn run_serve(
    host: Option<String>,
    port: Option<u16>,
    settings: Settings,
) -> anyhow::Result<()> {
    if let Err(e) = preflight::check(Operation::Serve, &settings.llm) {
        Output::error(&format!("{}", e));
        Output::info("Run 'tutor doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let host = host.unwrap_or_else(|| settings.server.host.clone());
    let port = port.unwrap_or(settings.server.port);

    let tutor = router::Router::from_settings(&settings)?;
    let app = app(tutor);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    Output::header("Tutor API Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Health", "GET  /health");
    Output::kv("Ask", "POST /ask");
    Output::kv("Classify", "POST /classify");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the HTTP application around a tutor router.
pub fn app(tutor: router::Router) -> Router {
    let state = Arc::new(AppState { router: tutor });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/ask", post(ask))
        .route("/classify", post(classify))
        .layer(cors)
        .with_state(state)
}

// === Request/Response Types ===

#[derive(Deserialize)]
struct QuestionRequest {
    question: String,
}

#[derive(Serialize)]
struct ClassifyResponse {
    category: Category,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

fn bad_request(error: TutorError) -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
        .into_response()
}

// === Handlers ===

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn ask(
    State(state): State<Arc<AppState>>,
    Json(req): Json<QuestionRequest>,
) -> impl IntoResponse {
    let question = match router::validate_question(&req.question) {
        Ok(question) => question,
        Err(e) => return bad_request(e),
    };

    let result: RouterResult = state.router.route(question).await;
    Json(result).into_response()
}

async fn classify(
    State(state): State<Arc<AppState>>,
    Json(req): Json<QuestionRequest>,
) -> impl IntoResponse {
    let question = match router::validate_question(&req.question) {
        Ok(question) => question,
        Err(e) => return bad_request(e),
    };

    let category = state.router.classify(question).await;
    Json(ClassifyResponse { category }).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Prompts;
    use crate::llm::MockGenerator;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    fn test_app(classifier_reply: &str) -> Router {
        let generator = Arc::new(MockGenerator::with_fallback("It is 4."));
        let classifier = Arc::new(MockGenerator::with_fallback(classifier_reply));
        app(router::Router::new(
            generator,
            classifier,
            Arc::new(Prompts::default()),
        ))
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = test_app("general")
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_ask_returns_router_result() {
        let response = test_app("math")
            .oneshot(post_json("/ask", r#"{"question": "What is 2 + 2?"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["answer"], "It is 4.");
        assert_eq!(body["agent_used"], "Math Agent");
        assert_eq!(body["query_category"], "math");
        assert_eq!(body["tools_used"][0], "Calculator");
    }

    #[tokio::test]
    async fn test_blank_question_is_rejected() {
        let response = test_app("general")
            .oneshot(post_json("/ask", r#"{"question": "   "}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await["error"],
            "Invalid input: Question must not be empty"
        );
    }

    #[tokio::test]
    async fn test_classify() {
        let response = test_app("general")
            .oneshot(post_json("/classify", r#"{"question": "What is the speed of light?"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["category"], "physics");
    }
}
