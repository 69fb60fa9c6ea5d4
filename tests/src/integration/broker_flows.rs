//! # Broker Flows
//!
//! Call-mode requests over one shared connection, end to end:
//!
//! 1. **No cross-delivery**: many concurrent calls answered in random order
//! 2. **Timeout**: a silent host times the call out and leaves no entry behind
//! 3. **Late response**: a reply after the timeout is dropped quietly
//! 4. **Missing connection**: fails before anything is registered
//! 5. **Garbled base pair**: decodes to `-1` / `"failed"`
//! 6. **Events**: frames with `post_type` never reach the broker

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use futures::future::join_all;
    use rand::seq::SliceRandom;
    use serde_json::json;
    use tokio::sync::mpsc;

    use onebot_core::{
        channel_transport, ApiCaller, CallError, ConnectionId, CorrelationBroker,
        InMemoryConnectionRegistry, RequestEnvelope, ResponseDispatcher, ResponseEnvelope,
        ResponseListener,
    };

    use crate::fixtures::Harness;

    const CALLS: usize = 100;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_shuffled_responses_reach_their_own_callers() {
        let broker = Arc::new(CorrelationBroker::new(Duration::from_secs(10)));
        let registry = Arc::new(InMemoryConnectionRegistry::new());
        let (transport, mut outbound) = channel_transport(CALLS);
        let (inbound_tx, inbound_rx) = mpsc::channel(CALLS);
        let connection = registry.connect(transport);

        // Host that collects every request before answering them in random order
        let host = tokio::spawn(async move {
            let mut requests = Vec::with_capacity(CALLS);
            while requests.len() < CALLS {
                let frame = outbound.recv().await.unwrap();
                requests.push(RequestEnvelope::decode(&frame).unwrap());
            }
            requests.shuffle(&mut rand::thread_rng());
            for request in requests {
                let response =
                    ResponseEnvelope::reply(request.echo.unwrap(), 0, request.params.clone());
                inbound_tx
                    .send(response.to_value().to_string())
                    .await
                    .unwrap();
            }
        });

        let dispatcher = Arc::new(ResponseDispatcher::new(Arc::clone(&broker)));
        tokio::spawn(ResponseListener::new(dispatcher, inbound_rx).run());
        let caller = Arc::new(ApiCaller::new(Arc::clone(&broker), registry));

        let calls = (0..CALLS).map(|i| {
            let caller = Arc::clone(&caller);
            tokio::spawn(async move {
                let response = caller
                    .call(connection, RequestEnvelope::new("echo", json!({ "n": i })))
                    .await
                    .unwrap();
                (i, response)
            })
        });

        for result in join_all(calls).await {
            let (i, response) = result.unwrap();
            assert!(response.is_ok());
            assert_eq!(response.data, json!({ "n": i }));
        }

        host.await.unwrap();
        let stats = broker.snapshot();
        assert_eq!(stats.pending, 0);
        assert_eq!(stats.registered, CALLS as u64);
        assert_eq!(stats.resolved, CALLS as u64);
    }

    #[tokio::test]
    async fn test_silent_host_times_out_without_leaking() {
        let harness = Harness::start(Duration::from_millis(50), |_| None);

        let before = harness.broker.pending_count();
        let err = harness
            .caller
            .call(harness.connection, RequestEnvelope::bare("get_status"))
            .await
            .unwrap_err();

        assert!(err.is_timeout());
        assert_eq!(harness.broker.pending_count(), before);
        assert_eq!(harness.broker.snapshot().timeouts, 1);
        harness.shutdown().await;
    }

    #[tokio::test]
    async fn test_late_response_is_dropped() {
        let harness = Harness::echoing(Duration::from_millis(50));

        let reply = harness.broker.register("get_status");
        let id = reply.correlation_id();
        tokio::time::sleep(Duration::from_millis(60)).await;
        let err = harness
            .broker
            .await_reply(reply, Duration::from_millis(50))
            .await
            .unwrap_err();
        assert!(err.is_timeout());
        assert!(!harness.broker.is_pending(&id));

        harness
            .inbound
            .send(json!({"retcode": 0, "status": "ok", "echo": id.to_string()}).to_string())
            .await
            .unwrap();

        // The listener handles frames in order: once this call completes,
        // the late frame has been processed
        let response = harness
            .caller
            .call(harness.connection, RequestEnvelope::new("echo", json!({"x": 1})))
            .await
            .unwrap();
        assert_eq!(response.data["x"], 1);
        assert_eq!(harness.broker.snapshot().unmatched, 1);
        harness.shutdown().await;
    }

    #[tokio::test]
    async fn test_missing_connection_never_registers() {
        let harness = Harness::echoing(Duration::from_secs(1));

        let err = harness
            .caller
            .call(ConnectionId::new(), RequestEnvelope::bare("get_status"))
            .await
            .unwrap_err();

        assert!(matches!(err, CallError::ConnectionNotFound(_)));
        assert_eq!(harness.broker.pending_count(), 0);
        assert_eq!(harness.broker.snapshot().registered, 0);
        harness.shutdown().await;
    }

    #[tokio::test]
    async fn test_garbled_retcode_decodes_to_sentinel() {
        let harness = Harness::echoing(Duration::from_secs(1));

        let reply = harness.broker.register("get_status");
        let id = reply.correlation_id();
        harness
            .inbound
            .send(json!({"retcode": "not-a-number", "echo": id.to_string()}).to_string())
            .await
            .unwrap();

        let payload = harness
            .broker
            .await_reply(reply, Duration::from_secs(1))
            .await
            .unwrap();
        let response = ResponseEnvelope::decode(&payload);
        assert_eq!(response.retcode, -1);
        assert_eq!(response.status, "failed");
        assert_eq!(response.echo, Some(id));
        harness.shutdown().await;
    }

    #[tokio::test]
    async fn test_events_bypass_the_broker() {
        let mut harness = Harness::echoing(Duration::from_secs(1));

        let reply = harness.broker.register("get_status");
        let id = reply.correlation_id();
        // An event that happens to carry an echo field is still an event
        harness
            .inbound
            .send(
                json!({"post_type": "notice", "notice_type": "group_increase", "echo": id.to_string()})
                    .to_string(),
            )
            .await
            .unwrap();

        let event = harness.events.recv().await.unwrap();
        assert_eq!(event["notice_type"], "group_increase");
        assert!(harness.broker.is_pending(&id));

        drop(reply);
        assert_eq!(harness.broker.pending_count(), 0);
        harness.shutdown().await;
    }
}
