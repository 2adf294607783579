//! Scalar coercion for data-file fields.
//!
//! Phone numbers, postal codes, GPAs and years are often written as bare YAML
//! numbers. These helpers accept any scalar and keep its text form.

use serde::{de, Deserialize, Deserializer};
use serde_yaml::Value;

/// Deserializes a string, number or bool into its text form.
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    scalar_to_string(Value::deserialize(deserializer)?).map_err(de::Error::custom)
}

/// Like [`text`], for optional fields. An explicit `null` becomes `None`.
pub fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        other => scalar_to_string(other).map(Some).map_err(de::Error::custom),
    }
}

fn scalar_to_string(value: Value) -> Result<String, String> {
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Err("expected a text value, found null".to_string()),
        Value::Sequence(_) => Err("expected a text value, found a list".to_string()),
        Value::Mapping(_) => Err("expected a text value, found a mapping".to_string()),
        Value::Tagged(tagged) => scalar_to_string(tagged.value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Sample {
        #[serde(deserialize_with = "text")]
        phone: String,
        #[serde(default, deserialize_with = "optional_text")]
        gpa: Option<String>,
    }

    #[test]
    fn test_number_is_coerced_to_text() {
        let sample: Sample = serde_yaml::from_str("phone: 5551234\ngpa: 3.9").unwrap();
        assert_eq!(sample.phone, "5551234");
        assert_eq!(sample.gpa.as_deref(), Some("3.9"));
    }

    #[test]
    fn test_optional_absent_and_null_are_none() {
        let absent: Sample = serde_yaml::from_str("phone: '555'").unwrap();
        assert!(absent.gpa.is_none());
        let null: Sample = serde_yaml::from_str("phone: '555'\ngpa: null").unwrap();
        assert!(null.gpa.is_none());
    }

    #[test]
    fn test_list_is_rejected() {
        let result: Result<Sample, _> = serde_yaml::from_str("phone: [1, 2]");
        assert!(result.is_err());
    }
}
