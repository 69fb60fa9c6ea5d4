//! In-process stand-in for a OneBot host.

use onebot_core::{PeerReply, RequestEnvelope};
use serde_json::json;

/// Retcode the simulated host uses for actions it does not know
pub const UNSUPPORTED_ACTION: i32 = 1404;

/// Canned answers for the actions the scripted session uses.
///
/// Fire-and-forget requests are never answered, whatever this returns.
pub fn simulated_host(request: &RequestEnvelope) -> Option<PeerReply> {
    let data = match request.action.as_str() {
        "get_login_info" => json!({"user_id": 10001, "nickname": "onebot-link"}),
        "get_version_info" => json!({
            "app_name": "go-cqhttp",
            "version": "v1.0.0",
            "go-cqhttp": true
        }),
        "send_msg" => json!({"message_id": 1}),
        "get_status" => json!({"online": true, "good": true}),
        "get_group_list" => json!([
            {"group_id": 100, "group_name": "loopback", "member_count": 1, "max_member_count": 200}
        ]),
        _ => return Some(PeerReply::failed(UNSUPPORTED_ACTION)),
    };
    Some(PeerReply::ok(data))
}
