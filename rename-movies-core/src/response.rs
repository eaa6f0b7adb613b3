//! Text extraction from Responses API payloads.
//!
//! A response can arrive as raw JSON (mapping-like access by key) or as the
//! typed structs below (attribute-like access by field). Both implement
//! [`ResponseNode`], and [`extract_output_text`] walks either one along
//! `output -> content -> type == "output_text" -> text`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Block type carrying model text.
pub const OUTPUT_TEXT: &str = "output_text";

/// A named field read from a response node.
pub enum Field<'a> {
    Text(&'a str),
    Nodes(Vec<&'a dyn ResponseNode>),
}

/// Uniform field access over response shapes.
pub trait ResponseNode {
    /// Look up `name`; `None` when absent or of an unusable type.
    fn field(&self, name: &str) -> Option<Field<'_>>;
}

impl ResponseNode for Value {
    fn field(&self, name: &str) -> Option<Field<'_>> {
        match self.as_object()?.get(name)? {
            Value::String(s) => Some(Field::Text(s)),
            Value::Array(items) => Some(Field::Nodes(
                items.iter().map(|v| v as &dyn ResponseNode).collect(),
            )),
            _ => None,
        }
    }
}

/// Typed view of a Responses API body, restricted to what is read here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseBody {
    #[serde(default)]
    pub output: Option<Vec<OutputItem>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputItem {
    #[serde(default)]
    pub content: Option<Vec<ContentBlock>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

impl ContentBlock {
    pub fn output_text(text: impl Into<String>) -> Self {
        Self {
            kind: Some(OUTPUT_TEXT.to_string()),
            text: Some(text.into()),
        }
    }
}

fn nodes<T: ResponseNode>(items: Option<&Vec<T>>) -> Option<Field<'_>> {
    items.map(|items| Field::Nodes(items.iter().map(|i| i as &dyn ResponseNode).collect()))
}

impl ResponseNode for ResponseBody {
    fn field(&self, name: &str) -> Option<Field<'_>> {
        match name {
            "output" => nodes(self.output.as_ref()),
            _ => None,
        }
    }
}

impl ResponseNode for OutputItem {
    fn field(&self, name: &str) -> Option<Field<'_>> {
        match name {
            "content" => nodes(self.content.as_ref()),
            _ => None,
        }
    }
}

impl ResponseNode for ContentBlock {
    fn field(&self, name: &str) -> Option<Field<'_>> {
        match name {
            "type" => self.kind.as_deref().map(Field::Text),
            "text" => self.text.as_deref().map(Field::Text),
            _ => None,
        }
    }
}

fn children<'a>(node: &'a dyn ResponseNode, name: &str) -> Vec<&'a dyn ResponseNode> {
    match node.field(name) {
        Some(Field::Nodes(nodes)) => nodes,
        _ => Vec::new(),
    }
}

fn text<'a>(node: &'a dyn ResponseNode, name: &str) -> Option<&'a str> {
    match node.field(name) {
        Some(Field::Text(text)) => Some(text),
        _ => None,
    }
}

/// Join every non-empty `output_text` block with newlines.
///
/// Returns an empty string when the response carries no such block.
pub fn extract_output_text(response: &dyn ResponseNode) -> String {
    let mut texts = Vec::new();

    for item in children(response, "output") {
        for block in children(item, "content") {
            if text(block, "type") != Some(OUTPUT_TEXT) {
                continue;
            }
            if let Some(value) = text(block, "text").filter(|t| !t.is_empty()) {
                texts.push(value);
            }
        }
    }

    texts.join("\n")
}
