use std::path::PathBuf;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Error taxonomy for document generation and the knowledge tools.
///
/// Each generated document fails independently: a `Shape` or `Compiler` error in the
/// resume never stops the cover letter. Implements `IntoResponse` so the tool server
/// handlers can return `Result<T, ForgeError>`.
#[derive(Debug, Error)]
pub enum ForgeError {
    /// The data file is missing or is not parseable YAML/JSON/XML.
    #[error("Failed to load {path}: {message}")]
    Load { path: PathBuf, message: String },

    /// The data parsed but a required field is absent or has the wrong type.
    #[error("Malformed {document} data: {message}")]
    Shape {
        document: &'static str,
        message: String,
    },

    /// The external compiler exited non-zero. `output` holds its captured streams.
    #[error("Compiler exited with {status} on pass {pass}:\n{output}")]
    Compiler {
        pass: u8,
        status: String,
        output: String,
    },

    /// The compiler reported success but the artifact is not on disk.
    #[error("Compiler finished but artifact was not produced: {0}")]
    ArtifactMissing(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Tool '{tool}' requires argument '{argument}'")]
    MissingArgument {
        tool: &'static str,
        argument: &'static str,
    },

    /// The request body is present but is not a JSON object of strings.
    #[error("Invalid tool arguments: {0}")]
    InvalidArguments(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ForgeError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ForgeError::UnknownTool(_) => (StatusCode::NOT_FOUND, "UNKNOWN_TOOL"),
            ForgeError::MissingArgument { .. } => (StatusCode::BAD_REQUEST, "MISSING_ARGUMENT"),
            ForgeError::InvalidArguments(_) => (StatusCode::BAD_REQUEST, "INVALID_ARGUMENTS"),
            ForgeError::Load { .. } | ForgeError::Shape { .. } => {
                tracing::error!("Knowledge base error: {self}");
                (StatusCode::UNPROCESSABLE_ENTITY, "DATA_ERROR")
            }
            ForgeError::Compiler { .. } | ForgeError::ArtifactMissing(_) => {
                tracing::error!("Compiler error: {self}");
                (StatusCode::INTERNAL_SERVER_ERROR, "COMPILER_ERROR")
            }
            ForgeError::Io(e) => {
                tracing::error!("I/O error: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR")
            }
            ForgeError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": self.to_string()
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_tool_maps_to_404() {
        let response = ForgeError::UnknownTool("nope".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_missing_argument_maps_to_400() {
        let response = ForgeError::MissingArgument {
            tool: "skills_tool",
            argument: "job_description",
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_invalid_arguments_maps_to_400() {
        let response = ForgeError::InvalidArguments("expected a string".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_compiler_error_message_carries_output() {
        let err = ForgeError::Compiler {
            pass: 1,
            status: "exit status: 1".to_string(),
            output: "! Undefined control sequence.".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("pass 1"));
        assert!(message.contains("Undefined control sequence"));
    }

    #[test]
    fn test_artifact_missing_is_distinct_from_compiler_error() {
        let err = ForgeError::ArtifactMissing(PathBuf::from("/tmp/out/resume.pdf"));
        assert!(err.to_string().contains("artifact was not produced"));
        assert!(!matches!(err, ForgeError::Compiler { .. }));
    }
}
