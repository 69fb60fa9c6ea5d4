//! Wire envelopes exchanged with the OneBot host.
//!
//! Request: `{"action": "...", "params": {...}, "echo": "<correlation id>"}`,
//! where `echo` is present only in call mode.
//!
//! Response: `{"status": "ok", "retcode": 0, "data": {...}, "echo": "..."}`.
//! The base pair (`retcode`, `status`) is read before anything else and
//! never fails: `-1` / `"failed"` stand in for missing or garbled values.

use crate::domain::correlation::CorrelationId;
use crate::domain::error::codes;
use crate::domain::fields::{lenient_i64, lenient_string, PermissiveFields};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Name of the correlation field, in both directions
pub const ECHO_FIELD: &str = "echo";

/// Outbound request envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestEnvelope {
    /// Operation tag, e.g. `send_msg`
    pub action: String,
    /// Operation-specific parameters
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub params: Value,
    /// Correlation field, call mode only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub echo: Option<CorrelationId>,
}

impl RequestEnvelope {
    pub fn new(action: impl Into<String>, params: Value) -> Self {
        Self {
            action: action.into(),
            params,
            echo: None,
        }
    }

    /// Build from a typed parameter struct
    pub fn with_params<P: Serialize>(
        action: impl Into<String>,
        params: &P,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self::new(action, serde_json::to_value(params)?))
    }

    /// Envelope without parameters
    pub fn bare(action: impl Into<String>) -> Self {
        Self::new(action, Value::Null)
    }

    pub fn with_echo(mut self, echo: CorrelationId) -> Self {
        self.echo = Some(echo);
        self
    }

    /// Serialise to a single-line JSON text frame
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse a text frame (used by peers and tests)
    pub fn decode(frame: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(frame)
    }
}

/// The `retcode`/`status` pair present on every response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseResult {
    pub retcode: i32,
    pub status: String,
}

impl BaseResult {
    /// Read the base pair from a raw response frame
    pub fn from_frame(frame: &Value) -> Self {
        let retcode = lenient_i64(frame.field("retcode"))
            .and_then(|n| i32::try_from(n).ok())
            .unwrap_or(codes::RETCODE_FAILED);
        let status = lenient_string(frame.field("status"))
            .unwrap_or_else(|| codes::STATUS_FAILED.to_string());
        Self { retcode, status }
    }

    /// Sentinel pair for local failures
    pub fn failed() -> Self {
        Self {
            retcode: codes::RETCODE_FAILED,
            status: codes::STATUS_FAILED.to_string(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.retcode == codes::RETCODE_OK
    }
}

/// Decoded inbound response
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseEnvelope {
    /// Correlation field, if present and well formed
    pub echo: Option<CorrelationId>,
    pub retcode: i32,
    pub status: String,
    /// Operation-specific payload (`data`), null when absent
    pub data: Value,
}

impl ResponseEnvelope {
    /// Decode a raw frame. Never fails; see the module docs for defaults.
    pub fn decode(frame: &Value) -> Self {
        let BaseResult { retcode, status } = BaseResult::from_frame(frame);
        Self {
            echo: extract_echo(frame),
            retcode,
            status,
            data: frame.field("data").clone(),
        }
    }

    /// Envelope standing in for a call that produced no response
    pub fn failed() -> Self {
        let BaseResult { retcode, status } = BaseResult::failed();
        Self {
            echo: None,
            retcode,
            status,
            data: Value::Null,
        }
    }

    /// Build a reply to `echo` (peer side)
    pub fn reply(echo: CorrelationId, retcode: i32, data: Value) -> Self {
        let status = if retcode == codes::RETCODE_OK {
            codes::STATUS_OK
        } else {
            codes::STATUS_FAILED
        };
        Self {
            echo: Some(echo),
            retcode,
            status: status.to_string(),
            data,
        }
    }

    pub fn base(&self) -> BaseResult {
        BaseResult {
            retcode: self.retcode,
            status: self.status.clone(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.retcode == codes::RETCODE_OK
    }

    /// True when the call succeeded and carried a payload
    pub fn has_data(&self) -> bool {
        self.is_ok() && !self.data.is_null()
    }

    /// Wire form of this response
    pub fn to_value(&self) -> Value {
        let mut frame = serde_json::Map::new();
        frame.insert("status".into(), Value::String(self.status.clone()));
        frame.insert("retcode".into(), Value::from(self.retcode));
        frame.insert("data".into(), self.data.clone());
        if let Some(echo) = self.echo {
            frame.insert(ECHO_FIELD.into(), Value::String(echo.to_string()));
        }
        Value::Object(frame)
    }
}

/// Read and parse the correlation field of a frame
pub fn extract_echo(frame: &Value) -> Option<CorrelationId> {
    frame
        .field(ECHO_FIELD)
        .as_str()
        .and_then(|s| CorrelationId::parse(s).ok())
}
