//! # API Flows
//!
//! Typed operations sharing one connection to a simulated host:
//! concurrent queries, fire-and-forget interleaved with calls, precondition
//! failures and sentinel replies for missing connections.

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use serde_json::json;

    use onebot_api::{ClientKind, GroupRequestType, MessageSegment};
    use onebot_core::{ConnectionId, PeerReply, RequestEnvelope};

    use crate::fixtures::Harness;

    fn host(request: &RequestEnvelope) -> Option<PeerReply> {
        let data = match request.action.as_str() {
            "get_login_info" => json!({"user_id": "10001", "nickname": "bot"}),
            "get_version_info" => json!({"go-cqhttp": "true", "version": "v1.0.0"}),
            "send_msg" => json!({"message_id": request.params["group_id"]}),
            "get_group_info" => json!({
                "group_id": request.params["group_id"],
                "group_name": "g",
                "member_count": 10,
                "max_member_count": 500
            }),
            "can_send_image" => json!({"yes": true}),
            _ => return Some(PeerReply::failed(1404)),
        };
        Some(PeerReply::ok(data))
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_typed_calls_share_one_connection() {
        let harness = Harness::start(Duration::from_secs(2), host);
        let api = &harness.api;
        let conn = harness.connection;

        let sends = (1..=20).map(|group_id| async move {
            let reply = api
                .send_group_message(conn, group_id, vec![MessageSegment::text("hi")])
                .await
                .unwrap();
            (group_id, reply)
        });
        let (sent, login, version, image) = tokio::join!(
            futures::future::join_all(sends),
            api.get_login_info(conn),
            api.get_version_info(conn),
            api.can_send_image(conn),
        );

        for (group_id, reply) in sent {
            assert_eq!(reply.data, Some(group_id));
        }
        assert_eq!(login.data.unwrap().user_id, 10001);
        assert_eq!(version.data.unwrap().client, ClientKind::GoCqhttp);
        assert_eq!(image.data, Some(true));
        assert_eq!(harness.broker.pending_count(), 0);
        harness.shutdown().await;
    }

    #[tokio::test]
    async fn test_host_failure_surfaces_retcode() {
        let harness = Harness::start(Duration::from_secs(1), host);

        let reply = harness.api.get_status(harness.connection).await;

        assert_eq!(reply.retcode, 1404);
        assert_eq!(reply.status, "failed");
        assert!(reply.data.is_none());
        harness.shutdown().await;
    }

    #[tokio::test]
    async fn test_fire_and_forget_interleaves_with_calls() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&seen);
        let harness = Harness::start(Duration::from_secs(1), move |request| {
            log.lock()
                .unwrap()
                .push((request.action.clone(), request.echo.is_some()));
            host(request)
        });
        let conn = harness.connection;

        harness.api.set_group_ban(conn, 1, 2, 60).await.unwrap();
        harness
            .api
            .set_group_add_request(conn, "flag", GroupRequestType::Invite, true, None)
            .await
            .unwrap();
        let group = harness.api.get_group_info(conn, 7, false).await;

        assert_eq!(group.data.unwrap().group_id, 7);
        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                ("set_group_ban".to_string(), false),
                ("set_group_add_request".to_string(), false),
                ("get_group_info".to_string(), true),
            ]
        );
        // Fire-and-forget answers are never produced, so nothing is unmatched
        assert_eq!(harness.broker.snapshot().unmatched, 0);
        harness.shutdown().await;
    }

    #[tokio::test]
    async fn test_invalid_arguments_never_reach_the_host() {
        let seen = Arc::new(Mutex::new(0usize));
        let count = Arc::clone(&seen);
        let harness = Harness::start(Duration::from_secs(1), move |request| {
            *count.lock().unwrap() += 1;
            host(request)
        });
        let conn = harness.connection;

        assert!(harness
            .api
            .send_private_message(conn, 1, Vec::new())
            .await
            .is_err());
        assert!(harness.api.get_forward_message(conn, "").await.is_err());
        assert!(harness
            .api
            .set_friend_add_request(conn, "", true, None)
            .await
            .is_err());
        assert!(harness.api.set_group_name(conn, 1, "").await.is_err());

        // A real call afterwards proves the host was idle before it
        assert!(harness.api.get_login_info(conn).await.is_ok());
        assert_eq!(*seen.lock().unwrap(), 1);
        assert_eq!(harness.broker.snapshot().registered, 1);
        harness.shutdown().await;
    }

    #[tokio::test]
    async fn test_missing_connection_yields_sentinels() {
        let harness = Harness::start(Duration::from_secs(1), host);
        let gone = ConnectionId::new();

        let login = harness.api.get_login_info(gone).await;
        assert_eq!((login.retcode, login.status.as_str()), (-1, "failed"));
        assert!(login.data.is_none());

        harness.api.delete_message(gone, 5).await.unwrap();
        assert_eq!(harness.broker.snapshot().registered, 0);
        harness.shutdown().await;
    }
}
