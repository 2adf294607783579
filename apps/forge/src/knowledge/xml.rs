//! Converts a hierarchical XML knowledge base into the nested record model.
//!
//! Rules: an element with only text becomes a string; an element with children
//! becomes a map; repeated child names collect into a list; attributes become
//! `@name` keys; text mixed with children is kept under `#text`. The document
//! root is kept as the single top-level key.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::{Map, Value};

struct Frame {
    name: String,
    fields: Map<String, Value>,
    text: String,
}

impl Frame {
    fn open(start: &BytesStart<'_>) -> Result<Self, String> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut fields = Map::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| format!("bad attribute on <{name}>: {e}"))?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let raw = String::from_utf8_lossy(&attr.value).into_owned();
            let value = quick_xml::escape::unescape(&raw)
                .map_err(|e| format!("bad attribute value on <{name}>: {e}"))?
                .into_owned();
            fields.insert(format!("@{key}"), Value::String(value));
        }
        Ok(Self {
            name,
            fields,
            text: String::new(),
        })
    }

    fn close(self) -> (String, Value) {
        let text = self.text.trim();
        let value = if self.fields.is_empty() {
            Value::String(text.to_string())
        } else {
            let mut fields = self.fields;
            if !text.is_empty() {
                fields.insert("#text".to_string(), Value::String(text.to_string()));
            }
            Value::Object(fields)
        };
        (self.name, value)
    }
}

fn insert_child(fields: &mut Map<String, Value>, name: String, value: Value) {
    match fields.get_mut(&name) {
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            fields.insert(name, value);
        }
    }
}

/// Parses an XML document into `{root_name: value}`.
pub fn parse_xml(xml: &str) -> Result<Value, String> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();
    let mut root: Option<(String, Value)> = None;

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|e| format!("{e} at byte {}", reader.buffer_position()))?;

        match event {
            Event::Start(e) => stack.push(Frame::open(&e)?),
            Event::Empty(e) => {
                let (name, value) = Frame::open(&e)?.close();
                match stack.last_mut() {
                    Some(parent) => insert_child(&mut parent.fields, name, value),
                    None => root = Some((name, value)),
                }
            }
            Event::End(_) => {
                let frame = stack.pop().ok_or("closing tag without an open element")?;
                let (name, value) = frame.close();
                match stack.last_mut() {
                    Some(parent) => insert_child(&mut parent.fields, name, value),
                    None => root = Some((name, value)),
                }
            }
            Event::Text(e) => {
                if let Some(frame) = stack.last_mut() {
                    let text = e.xml_content().map_err(|e| e.to_string())?;
                    frame.text.push_str(&text);
                }
            }
            Event::CData(e) => {
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&String::from_utf8_lossy(&e));
                }
            }
            Event::GeneralRef(e) => {
                if let Some(frame) = stack.last_mut() {
                    let name = e.decode().map_err(|e| e.to_string())?;
                    let reference = format!("&{name};");
                    let resolved =
                        quick_xml::escape::unescape(&reference).map_err(|e| e.to_string())?;
                    frame.text.push_str(&resolved);
                }
            }
            Event::Eof => break,
            _ => {}
        }

        buf.clear();
    }

    if let Some(open) = stack.last() {
        return Err(format!("unclosed element <{}>", open.name));
    }

    let (name, value) = root.ok_or("document has no root element")?;
    let mut record = Map::new();
    record.insert(name, value);
    Ok(Value::Object(record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_elements_and_repeated_children() {
        let xml = r#"<?xml version="1.0"?>
<resume>
  <summary>Systems engineer</summary>
  <skills>
    <skill>Rust</skill>
    <skill>Go</skill>
  </skills>
</resume>"#;
        let value = parse_xml(xml).unwrap();
        assert_eq!(
            value,
            json!({
                "resume": {
                    "summary": "Systems engineer",
                    "skills": {"skill": ["Rust", "Go"]}
                }
            })
        );
    }

    #[test]
    fn test_attributes_and_mixed_text() {
        let xml = r#"<resume><award year="2024">Best Paper<venue>ICSE</venue></award></resume>"#;
        let value = parse_xml(xml).unwrap();
        assert_eq!(
            value["resume"]["award"],
            json!({"@year": "2024", "#text": "Best Paper", "venue": "ICSE"})
        );
    }

    #[test]
    fn test_entities_are_resolved_without_losing_spaces() {
        let xml = "<resume><company>Research &amp; Development &#169; Co</company></resume>";
        let value = parse_xml(xml).unwrap();
        assert_eq!(value["resume"]["company"], json!("Research & Development \u{a9} Co"));
    }

    #[test]
    fn test_empty_elements() {
        let xml = r#"<resume><research/><link href="https://a.b"/></resume>"#;
        let value = parse_xml(xml).unwrap();
        assert_eq!(value["resume"]["research"], json!(""));
        assert_eq!(value["resume"]["link"], json!({"@href": "https://a.b"}));
    }

    #[test]
    fn test_malformed_xml_is_an_error() {
        assert!(parse_xml("<resume><summary>oops</resume>").is_err());
        assert!(parse_xml("").is_err());
    }
}
