//! Message segments in the OneBot array format.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Target kind of a `send_msg` request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    Private,
    Group,
}

/// One segment: `{"type": "text", "data": {"text": "hi"}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageSegment {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub data: Value,
}

impl MessageSegment {
    pub fn new(kind: impl Into<String>, data: Value) -> Self {
        Self {
            kind: kind.into(),
            data,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new("text", json!({ "text": text.into() }))
    }

    /// Mention a user; `"all"` mentions everyone
    pub fn at(target: impl ToString) -> Self {
        Self::new("at", json!({ "qq": target.to_string() }))
    }

    pub fn face(id: i32) -> Self {
        Self::new("face", json!({ "id": id.to_string() }))
    }

    pub fn image(file: impl Into<String>) -> Self {
        Self::new("image", json!({ "file": file.into() }))
    }

    pub fn reply(message_id: i64) -> Self {
        Self::new("reply", json!({ "id": message_id.to_string() }))
    }

    /// Text of a `text` segment
    pub fn as_text(&self) -> Option<&str> {
        if self.kind == "text" {
            self.data.get("text").and_then(Value::as_str)
        } else {
            None
        }
    }
}
