//! Typed OneBot operations.
//!
//! Call-mode operations return an [`ApiReply`](crate::ApiReply): a missing
//! connection or a timeout is reported through the `-1` / `"failed"` base
//! pair, never as an error. Fire-and-forget operations return `Ok(())`
//! once the frame is handed to the transport, or immediately when the
//! connection is gone.

mod account;
mod group;
mod media;
mod message;
mod moderation;

use crate::action::ApiAction;
use crate::error::ApiResult;
use onebot_core::{ApiCaller, CallError, ConnectionId, RequestEnvelope, ResponseEnvelope};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// Entry point for all typed operations
#[derive(Clone)]
pub struct OneBotApi {
    caller: Arc<ApiCaller>,
}

impl OneBotApi {
    pub fn new(caller: Arc<ApiCaller>) -> Self {
        Self { caller }
    }

    pub fn caller(&self) -> &Arc<ApiCaller> {
        &self.caller
    }

    /// Call mode with parameters
    async fn request<P: Serialize>(
        &self,
        connection: ConnectionId,
        action: ApiAction,
        params: &P,
    ) -> ResponseEnvelope {
        match RequestEnvelope::with_params(action.as_str(), params) {
            Ok(request) => self.dispatch(connection, action, request).await,
            Err(e) => {
                warn!(action = %action, error = %e, "Failed to encode request parameters");
                ResponseEnvelope::failed()
            }
        }
    }

    /// Call mode without parameters
    async fn request_bare(&self, connection: ConnectionId, action: ApiAction) -> ResponseEnvelope {
        self.dispatch(connection, action, RequestEnvelope::bare(action.as_str()))
            .await
    }

    async fn dispatch(
        &self,
        connection: ConnectionId,
        action: ApiAction,
        request: RequestEnvelope,
    ) -> ResponseEnvelope {
        debug_assert!(action.expects_reply(), "{action} is fire-and-forget");
        debug!(action = %action, "Sending {} request", action);
        let response = match self.caller.call(connection, request).await {
            Ok(response) => response,
            Err(e) => settle_failure(action, e),
        };
        debug!(
            action = %action,
            retcode = response.retcode,
            "Got {} response",
            action
        );
        response
    }

    /// Fire-and-forget
    async fn notify<P: Serialize>(
        &self,
        connection: ConnectionId,
        action: ApiAction,
        params: &P,
    ) -> ApiResult<()> {
        debug_assert!(!action.expects_reply(), "{action} waits for a reply");
        let request = RequestEnvelope::with_params(action.as_str(), params)?;
        debug!(action = %action, "Sending {} request", action);
        self.caller.send(connection, request).await;
        Ok(())
    }
}

/// Fold a call failure into the sentinel response
fn settle_failure(action: ApiAction, error: CallError) -> ResponseEnvelope {
    match &error {
        CallError::ConnectionNotFound(_) => {
            debug!(action = %action, error = %error, "API call failed")
        }
        _ => warn!(action = %action, error = %error, "API call failed"),
    }
    ResponseEnvelope::failed()
}
