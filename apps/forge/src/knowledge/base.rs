//! The loaded knowledge-base record and path lookups over it.
//!
//! Constructed once and passed explicitly to whoever needs it; there is no
//! process-wide cache.

use std::path::Path;

use serde_json::Value;
use tracing::{debug, info};

use crate::errors::ForgeError;
use crate::knowledge::xml::parse_xml;

/// Returned by [`KnowledgeBase::lookup`] when a path does not resolve.
pub const NOT_FOUND: &str = "NOT_FOUND";

/// Path token selecting the whole record.
pub const ALL: &str = "all";

#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    record: Value,
}

impl KnowledgeBase {
    /// Loads `.xml` through the XML converter and everything else (`.yml`, `.yaml`,
    /// `.json`) through the YAML parser.
    pub async fn load(path: &Path) -> Result<Self, ForgeError> {
        let load_error = |message: String| ForgeError::Load {
            path: path.to_path_buf(),
            message,
        };

        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| load_error(e.to_string()))?;

        let is_xml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("xml"));

        let record = if is_xml {
            parse_xml(&text).map_err(load_error)?
        } else {
            serde_yaml::from_str(&text).map_err(|e| load_error(e.to_string()))?
        };

        let kb = Self::from_value(record);
        info!(
            "Loaded knowledge base from {} (root: {})",
            path.display(),
            kb.root().unwrap_or("-")
        );
        Ok(kb)
    }

    pub fn from_value(record: Value) -> Self {
        Self { record }
    }

    /// The single top-level key, e.g. `resume` for an XML document rooted at `<resume>`.
    pub fn root(&self) -> Option<&str> {
        match &self.record {
            Value::Object(map) if map.len() == 1 => map.keys().next().map(String::as_str),
            _ => None,
        }
    }

    /// Resolves a dot path of object keys and list indices from the top of the record.
    pub fn resolve(&self, path: &str) -> Option<&Value> {
        let path = path.trim();
        if path.eq_ignore_ascii_case(ALL) {
            return Some(&self.record);
        }
        if path.is_empty() {
            return None;
        }
        path.split('.').try_fold(&self.record, |node, segment| match node {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
    }

    /// Serialized sub-tree at `path`, or [`NOT_FOUND`]. Never fails.
    pub fn lookup(&self, path: &str) -> String {
        match self.resolve(path) {
            Some(value) => to_text(value),
            None => {
                debug!("Lookup miss for '{path}'");
                NOT_FOUND.to_string()
            }
        }
    }

    /// A named top-level section, looked up under the root element when there is one.
    pub fn section(&self, name: &str) -> Option<&Value> {
        let name = name.trim().to_lowercase();
        if name == ALL {
            return Some(&self.record);
        }
        let scope = match self.root() {
            Some(root) => &self.record[root],
            None => &self.record,
        };
        scope.get(&name).or_else(|| self.record.get(&name))
    }

    /// Serialized section text, or `None` when the section is absent or empty.
    pub fn section_text(&self, name: &str) -> Option<String> {
        self.section(name)
            .filter(|value| !is_empty(value))
            .map(to_text)
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// YAML text for a sub-tree, without the trailing newline.
pub fn to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => serde_yaml::to_string(other)
            .unwrap_or_else(|_| other.to_string())
            .trim_end()
            .to_string(),
    }
}
