//! Record Loader: reads a YAML or JSON data file into a typed record.
//!
//! Loading runs in two steps so callers can tell the failure classes apart:
//! the text is first parsed into an untyped tree (`ForgeError::Load`), then the
//! tree is mapped onto the document's schema (`ForgeError::Shape`).

use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::errors::ForgeError;

/// Loads and types a data file. `document` names the record in error messages.
pub async fn load_record<T: DeserializeOwned>(
    path: &Path,
    document: &'static str,
) -> Result<T, ForgeError> {
    let tree = load_tree(path).await?;
    let record = shape_record(tree, document)?;
    info!("Loaded {document} data from {}", path.display());
    Ok(record)
}

/// Reads and parses a data file without applying any schema.
///
/// YAML is a superset of JSON, so `.json` files go through the same parser.
pub async fn load_tree(path: &Path) -> Result<serde_yaml::Value, ForgeError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ForgeError::Load {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    debug!("Read {} bytes from {}", text.len(), path.display());

    serde_yaml::from_str(&text).map_err(|e| ForgeError::Load {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Maps an untyped tree onto a schema.
pub fn shape_record<T: DeserializeOwned>(
    tree: serde_yaml::Value,
    document: &'static str,
) -> Result<T, ForgeError> {
    serde_yaml::from_value(tree).map_err(|e| ForgeError::Shape {
        document,
        message: e.to_string(),
    })
}
