//! Axum route handlers for the knowledge tool server.

use std::collections::HashMap;

use axum::{
    body::Bytes,
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::errors::ForgeError;
use crate::knowledge::tools::{invoke, ToolOutput, ToolSpec, TOOLS};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ToolListResponse {
    pub tools: &'static [ToolSpec],
}

#[derive(Debug, Serialize)]
pub struct ToolCallResponse {
    pub tool: String,
    pub result: ToolOutput,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/tools
pub async fn handle_list_tools() -> Json<ToolListResponse> {
    Json(ToolListResponse { tools: TOOLS })
}

/// POST /api/v1/tools/:name
///
/// Body is a JSON object of string arguments. An empty body means no arguments;
/// anything else that is not such an object is rejected.
pub async fn handle_call_tool(
    State(state): State<AppState>,
    Path(name): Path<String>,
    body: Bytes,
) -> Result<Json<ToolCallResponse>, ForgeError> {
    let args = parse_arguments(&body)?;
    let result = invoke(&state.knowledge, &name, &args)?;

    Ok(Json(ToolCallResponse { tool: name, result }))
}

fn parse_arguments(body: &[u8]) -> Result<HashMap<String, String>, ForgeError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(HashMap::new());
    }
    serde_json::from_slice(body).map_err(|e| ForgeError::InvalidArguments(e.to_string()))
}
