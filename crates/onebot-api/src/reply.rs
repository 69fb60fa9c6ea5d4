//! Typed result of a call-mode operation.

use onebot_core::ResponseEnvelope;
use serde_json::Value;

/// Base pair plus the decoded payload.
///
/// `data` is `Some` only when `retcode == 0` and the response carried a
/// payload. Missing connections and timeouts arrive here as `-1` /
/// `"failed"` with no data.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiReply<T> {
    pub retcode: i32,
    pub status: String,
    pub data: Option<T>,
}

impl<T> ApiReply<T> {
    /// Decode `response.data` with `decode` when the call succeeded
    pub fn from_response(response: ResponseEnvelope, decode: impl FnOnce(&Value) -> T) -> Self {
        let data = response.has_data().then(|| decode(&response.data));
        Self {
            retcode: response.retcode,
            status: response.status,
            data,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.retcode == onebot_core::codes::RETCODE_OK
    }

    /// The payload, discarding the base pair
    pub fn into_data(self) -> Option<T> {
        self.data
    }
}
