pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::knowledge::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/tools", get(handlers::handle_list_tools))
        .route("/api/v1/tools/:name", post(handlers::handle_call_tool))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::knowledge::KnowledgeBase;

    fn app() -> Router {
        let knowledge = KnowledgeBase::from_value(json!({
            "resume": {
                "summary": "Compiler engineer",
                "skills": {"skill": ["Rust", "LLVM"]}
            }
        }));
        build_router(AppState {
            knowledge: Arc::new(knowledge),
        })
    }

    async fn call(request: Request<Body>) -> (StatusCode, Value) {
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = call(Request::get("/health").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["knowledge_root"], "resume");
    }

    #[tokio::test]
    async fn test_list_tools() {
        let (status, body) = call(Request::get("/api/v1/tools").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        let tools = body["tools"].as_array().unwrap();
        assert!(tools.iter().any(|t| t["name"] == "refine_all"));
        let lookup = tools.iter().find(|t| t["name"] == "lookup").unwrap();
        assert_eq!(lookup["arguments"], json!(["path"]));
        assert!(lookup.get("kind").is_none());
    }

    #[tokio::test]
    async fn test_call_tool_returns_text_result() {
        let (status, body) = call(post_json(
            "/api/v1/tools/lookup",
            json!({"path": "resume.skills"}),
        ))
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["tool"], "lookup");
        assert!(body["result"].as_str().unwrap().contains("LLVM"));
    }

    #[tokio::test]
    async fn test_call_tool_without_body() {
        let request = Request::post("/api/v1/tools/get_summary_section")
            .body(Body::empty())
            .unwrap();
        let (status, body) = call(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"], "Summary Section:\nCompiler engineer");
    }

    #[tokio::test]
    async fn test_non_string_argument_is_rejected() {
        let (status, body) = call(post_json("/api/v1/tools/lookup", json!({"path": 5}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_ARGUMENTS");
    }

    #[tokio::test]
    async fn test_malformed_body_is_rejected() {
        let request = Request::post("/api/v1/tools/get_summary_section")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, body) = call(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_ARGUMENTS");
    }

    #[tokio::test]
    async fn test_refine_all_returns_map_result() {
        let (status, body) = call(post_json(
            "/api/v1/tools/refine_all",
            json!({
                "job_description": "JD",
                "experience": "E",
                "projects": "P",
                "involvements": "I",
                "skills": "S",
                "summary": "M"
            }),
        ))
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["result"]["summary"].as_str().unwrap().contains("Current Summary:\nM"));
    }

    #[tokio::test]
    async fn test_unknown_tool_is_404() {
        let (status, body) = call(post_json("/api/v1/tools/calculator", json!({}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "UNKNOWN_TOOL");
    }

    #[tokio::test]
    async fn test_missing_argument_is_400() {
        let (status, body) = call(post_json("/api/v1/tools/lookup", json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "MISSING_ARGUMENT");
        assert!(body["error"]["message"].as_str().unwrap().contains("path"));
    }
}
