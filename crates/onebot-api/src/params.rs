//! Request parameter payloads, serialised with the host's field names.

use crate::message::{MessageSegment, MessageType};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct SendMessageParams {
    pub message_type: MessageType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<i64>,
    pub message: Vec<MessageSegment>,
}

impl SendMessageParams {
    pub fn private(user_id: i64, message: Vec<MessageSegment>) -> Self {
        Self {
            message_type: MessageType::Private,
            user_id: Some(user_id),
            group_id: None,
            message,
        }
    }

    pub fn group(group_id: i64, message: Vec<MessageSegment>) -> Self {
        Self {
            message_type: MessageType::Group,
            user_id: None,
            group_id: Some(group_id),
            message,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ForwardMessageParams {
    pub message_id: String,
}

/// Used by `delete_msg` and `get_msg`
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MessageIdParams {
    pub message_id: i64,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct GroupIdParams {
    pub group_id: i64,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct GroupInfoParams {
    pub group_id: i64,
    pub no_cache: bool,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct GroupMemberInfoParams {
    pub group_id: i64,
    pub user_id: i64,
    pub no_cache: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageParams {
    /// Cached file name as reported in an image segment
    pub file: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FriendAddRequestParams {
    pub flag: String,
    pub approve: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
}

/// Join request or invitation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupRequestType {
    Add,
    Invite,
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupAddRequestParams {
    pub flag: String,
    pub sub_type: GroupRequestType,
    pub approve: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupCardParams {
    pub group_id: i64,
    pub user_id: i64,
    /// `None` clears the card
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<String>,
}

/// Special titles are always set without expiry
pub const PERMANENT_TITLE_DURATION: i64 = -1;

#[derive(Debug, Clone, Serialize)]
pub struct GroupSpecialTitleParams {
    pub group_id: i64,
    pub user_id: i64,
    pub special_title: String,
    pub duration: i64,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct GroupKickParams {
    pub group_id: i64,
    pub user_id: i64,
    pub reject_add_request: bool,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct GroupBanParams {
    pub group_id: i64,
    pub user_id: i64,
    /// Seconds; `0` lifts the ban
    pub duration: i64,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct GroupWholeBanParams {
    pub group_id: i64,
    pub enable: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupNameParams {
    pub group_id: i64,
    pub group_name: String,
}
