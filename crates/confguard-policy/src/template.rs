//! Message templates with `{{ field.path }}` interpolation.

use crate::path::{lookup, parse_path};
use serde_json::Value;

#[derive(Clone, Debug)]
enum Segment {
    Literal(String),
    Field(Vec<String>),
}

/// A compiled message template. Interpolation follows undefined propagation:
/// if any referenced field is missing (or null), the whole message is
/// undefined and the rule reports nothing for that input.
#[derive(Clone, Debug)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    pub fn compile(input: &str) -> Result<Self, String> {
        // Fast path: no template markers at all.
        if !input.contains("{{") {
            return Ok(Self {
                segments: vec![Segment::Literal(input.to_string())],
            });
        }

        let mut segments = Vec::new();
        let mut remaining = input;

        while let Some(start) = remaining.find("{{") {
            if start > 0 {
                segments.push(Segment::Literal(remaining[..start].to_string()));
            }

            let after_open = &remaining[start + 2..];
            let end = after_open
                .find("}}")
                .ok_or_else(|| "unclosed template expression: missing '}}'".to_string())?;

            let inner = after_open[..end].trim();
            if inner.is_empty() {
                return Err("empty template expression: '{{ }}'".to_string());
            }
            segments.push(Segment::Field(parse_path(inner)?));

            remaining = &after_open[end + 2..];
        }

        if !remaining.is_empty() {
            segments.push(Segment::Literal(remaining.to_string()));
        }

        Ok(Self { segments })
    }

    /// Render against a document. `None` means the message is undefined for
    /// this input.
    pub fn render(&self, input: &Value) -> Option<String> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field(path) => {
                    let value = lookup(input, path)?;
                    out.push_str(&render_value(value)?);
                }
            }
        }
        Some(out)
    }
}

fn render_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        composite => serde_json::to_string(composite).ok(),
    }
}
