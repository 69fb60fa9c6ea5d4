//! In-memory transport and a loopback reference peer.
//!
//! Used by the runtime's loopback session and by tests: requests written
//! to a [`ChannelTransport`] come out of an `mpsc` receiver, and
//! [`spawn_reference_peer`] turns them into response frames the way a
//! OneBot host would.

use crate::domain::envelope::{RequestEnvelope, ResponseEnvelope};
use crate::domain::error::codes;
use crate::ports::outbound::{TransportError, TransportHandle};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Transport writing text frames into a bounded channel
pub struct ChannelTransport(pub mpsc::Sender<String>);

#[async_trait]
impl TransportHandle for ChannelTransport {
    async fn send(&self, frame: String) -> Result<(), TransportError> {
        self.0.send(frame).await.map_err(|_| TransportError::Closed)
    }
}

/// Create a channel transport and the receiver its frames arrive on
pub fn channel_transport(buffer: usize) -> (Arc<ChannelTransport>, mpsc::Receiver<String>) {
    let (tx, rx) = mpsc::channel(buffer);
    (Arc::new(ChannelTransport(tx)), rx)
}

/// What the reference peer answers to one call-mode request
#[derive(Debug, Clone, PartialEq)]
pub struct PeerReply {
    pub retcode: i32,
    pub data: Value,
}

impl PeerReply {
    pub fn ok(data: Value) -> Self {
        Self {
            retcode: codes::RETCODE_OK,
            data,
        }
    }

    pub fn failed(retcode: i32) -> Self {
        Self {
            retcode,
            data: Value::Null,
        }
    }
}

/// Spawn a peer that decodes every outbound frame and, for call-mode
/// requests the handler answers, writes a matching response frame.
///
/// The handler sees fire-and-forget requests too; its answer to them is
/// discarded. Returning `None` leaves the caller waiting.
pub fn spawn_reference_peer<F>(
    mut outbound: mpsc::Receiver<String>,
    inbound: mpsc::Sender<String>,
    handler: F,
) -> JoinHandle<()>
where
    F: Fn(&RequestEnvelope) -> Option<PeerReply> + Send + 'static,
{
    tokio::spawn(async move {
        while let Some(frame) = outbound.recv().await {
            let request = match RequestEnvelope::decode(&frame) {
                Ok(request) => request,
                Err(e) => {
                    warn!(error = %e, "Reference peer received undecodable frame");
                    continue;
                }
            };

            let answer = handler(&request);
            let (Some(echo), Some(reply)) = (request.echo, answer) else {
                debug!(action = %request.action, "Reference peer sends no response");
                continue;
            };

            let response = ResponseEnvelope::reply(echo, reply.retcode, reply.data);
            if inbound.send(response.to_value().to_string()).await.is_err() {
                debug!("Inbound channel closed, stopping reference peer");
                break;
            }
        }
    })
}
