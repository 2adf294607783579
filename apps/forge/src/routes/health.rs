use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::knowledge::tools::TOOLS;
use crate::state::AppState;

/// GET /health
/// Reports the service version, the loaded knowledge base root, and the tool count.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "forge-tools",
        "knowledge_root": state.knowledge.root(),
        "tools": TOOLS.len()
    }))
}
