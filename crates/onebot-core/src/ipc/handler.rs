//! Outbound side: the two call shapes every API operation is built on.

use crate::adapters::pending::CorrelationBroker;
use crate::domain::connection::ConnectionId;
use crate::domain::envelope::{RequestEnvelope, ResponseEnvelope};
use crate::domain::error::{CallError, CallResult};
use crate::ports::outbound::ConnectionRegistry;
use std::sync::Arc;
use tracing::{debug, warn};

/// Sends requests over registered connections and, in call mode, waits
/// for the matching response through the broker.
pub struct ApiCaller {
    /// Broker correlating responses to calls
    broker: Arc<CorrelationBroker>,
    /// Live connections, owned by the transport layer
    connections: Arc<dyn ConnectionRegistry>,
}

impl ApiCaller {
    pub fn new(broker: Arc<CorrelationBroker>, connections: Arc<dyn ConnectionRegistry>) -> Self {
        Self {
            broker,
            connections,
        }
    }

    pub fn broker(&self) -> &Arc<CorrelationBroker> {
        &self.broker
    }

    /// Fire-and-forget: no correlation ID, no registration, no reply.
    ///
    /// A missing connection or a failed send is logged and otherwise ignored.
    pub async fn send(&self, connection: ConnectionId, mut request: RequestEnvelope) {
        request.echo = None;

        let Some(transport) = self.connections.lookup(&connection) else {
            debug!(
                connection = %connection,
                action = %request.action,
                "Connection not found, dropping request"
            );
            return;
        };

        let frame = match request.encode() {
            Ok(frame) => frame,
            Err(e) => {
                warn!(action = %request.action, error = %e, "Failed to encode request");
                return;
            }
        };

        match transport.send(frame).await {
            Ok(()) => debug!(connection = %connection, action = %request.action, "Sent request"),
            Err(e) => warn!(
                connection = %connection,
                action = %request.action,
                error = %e,
                "Failed to send request"
            ),
        }
    }

    /// Call mode: register, send, then wait for the matching response.
    ///
    /// A missing connection fails before anything is registered. A single
    /// attempt is made; there are no retries.
    pub async fn call(
        &self,
        connection: ConnectionId,
        mut request: RequestEnvelope,
    ) -> CallResult<ResponseEnvelope> {
        let Some(transport) = self.connections.lookup(&connection) else {
            debug!(
                connection = %connection,
                action = %request.action,
                "Connection not found"
            );
            return Err(CallError::ConnectionNotFound(connection));
        };

        let reply = self.broker.register(&request.action);
        let correlation_id = reply.correlation_id();
        request.echo = Some(correlation_id);

        // On any early return `reply` is dropped, which clears its entry
        let frame = request.encode()?;
        if let Err(e) = transport.send(frame).await {
            warn!(
                correlation_id = %correlation_id,
                connection = %connection,
                action = %request.action,
                error = %e,
                "Failed to send API request"
            );
            return Err(CallError::ConnectionNotFound(connection));
        }

        debug!(
            correlation_id = %correlation_id,
            connection = %connection,
            action = %request.action,
            "Sent API request"
        );

        let timeout = self.broker.default_timeout();
        let payload = self.broker.await_reply(reply, timeout).await?;
        let response = ResponseEnvelope::decode(&payload);

        debug!(
            correlation_id = %correlation_id,
            action = %request.action,
            retcode = response.retcode,
            status = %response.status,
            "Received API response"
        );

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::channel::{channel_transport, spawn_reference_peer, PeerReply};
    use crate::adapters::registry::InMemoryConnectionRegistry;
    use crate::ipc::dispatcher::{ResponseDispatcher, ResponseListener};
    use serde_json::json;
    use std::time::Duration;
    use tokio::sync::mpsc;

    /// Caller wired to a reference peer answering with `handler`
    fn loopback<F>(timeout: Duration, handler: F) -> (ApiCaller, ConnectionId)
    where
        F: Fn(&RequestEnvelope) -> Option<PeerReply> + Send + 'static,
    {
        let broker = Arc::new(CorrelationBroker::new(timeout));
        let registry = Arc::new(InMemoryConnectionRegistry::new());

        let (transport, outbound) = channel_transport(16);
        let (inbound_tx, inbound_rx) = mpsc::channel(16);
        let connection = registry.connect(transport);

        spawn_reference_peer(outbound, inbound_tx, handler);
        let dispatcher = Arc::new(ResponseDispatcher::new(Arc::clone(&broker)));
        tokio::spawn(ResponseListener::new(dispatcher, inbound_rx).run());

        (ApiCaller::new(broker, registry), connection)
    }

    #[tokio::test]
    async fn test_call_round_trip() {
        let (caller, connection) = loopback(Duration::from_secs(1), |request| {
            Some(PeerReply::ok(json!({ "echoed": request.params["text"] })))
        });

        let response = caller
            .call(
                connection,
                RequestEnvelope::new("echo_test", json!({"text": "hello"})),
            )
            .await
            .unwrap();

        assert!(response.is_ok());
        assert_eq!(response.data["echoed"], "hello");
        assert_eq!(caller.broker().pending_count(), 0);
    }

    #[tokio::test]
    async fn test_call_missing_connection_never_registers() {
        let (caller, _) = loopback(Duration::from_secs(1), |_| None);

        let err = caller
            .call(ConnectionId::new(), RequestEnvelope::bare("get_status"))
            .await
            .unwrap_err();

        assert!(matches!(err, CallError::ConnectionNotFound(_)));
        assert_eq!(caller.broker().pending_count(), 0);
        assert_eq!(caller.broker().snapshot().registered, 0);
    }

    #[tokio::test]
    async fn test_call_times_out_when_peer_is_silent() {
        let (caller, connection) = loopback(Duration::from_millis(30), |_| None);

        let err = caller
            .call(connection, RequestEnvelope::bare("get_status"))
            .await
            .unwrap_err();

        assert!(err.is_timeout());
        assert_eq!(caller.broker().pending_count(), 0);
    }

    #[tokio::test]
    async fn test_send_failure_clears_registration() {
        let broker = Arc::new(CorrelationBroker::new(Duration::from_secs(1)));
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let (transport, outbound) = channel_transport(1);
        let connection = registry.connect(transport);
        drop(outbound);

        let caller = ApiCaller::new(Arc::clone(&broker), registry);
        let err = caller
            .call(connection, RequestEnvelope::bare("get_status"))
            .await
            .unwrap_err();

        assert!(matches!(err, CallError::ConnectionNotFound(_)));
        assert_eq!(broker.pending_count(), 0);
    }

    #[tokio::test]
    async fn test_fire_and_forget_strips_echo_and_registers_nothing() {
        let broker = Arc::new(CorrelationBroker::new(Duration::from_secs(1)));
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let (transport, mut outbound) = channel_transport(4);
        let connection = registry.connect(transport);
        let caller = ApiCaller::new(Arc::clone(&broker), registry);

        let request = RequestEnvelope::new("delete_msg", json!({"message_id": 1}))
            .with_echo(crate::domain::correlation::CorrelationId::new());
        caller.send(connection, request).await;

        let sent = RequestEnvelope::decode(&outbound.recv().await.unwrap()).unwrap();
        assert_eq!(sent.action, "delete_msg");
        assert!(sent.echo.is_none());
        assert_eq!(broker.snapshot().registered, 0);
    }

    #[tokio::test]
    async fn test_fire_and_forget_missing_connection_is_silent() {
        let (caller, _) = loopback(Duration::from_secs(1), |_| None);
        caller
            .send(ConnectionId::new(), RequestEnvelope::bare("delete_msg"))
            .await;
        assert_eq!(caller.broker().pending_count(), 0);
    }
}
