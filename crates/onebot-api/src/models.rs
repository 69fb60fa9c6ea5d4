//! Decoded response payloads.
//!
//! Every model is built from the response `data` with the permissive field
//! policy: missing or malformed numbers become `-1`, strings `""`, and
//! booleans `false`. Decoding never fails.

use onebot_core::PermissiveFields;
use serde::Serialize;
use serde_json::Value;

/// Decode every element of a JSON array; anything else is an empty list
pub fn list_from_data<T>(data: &Value, decode: impl Fn(&Value) -> T) -> Vec<T> {
    data.as_array()
        .map(|items| items.iter().map(decode).collect())
        .unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoginInfo {
    pub user_id: i64,
    pub nickname: String,
}

impl LoginInfo {
    pub fn from_data(data: &Value) -> Self {
        Self {
            user_id: data.i64_field("user_id"),
            nickname: data.str_field("nickname"),
        }
    }
}

/// Implementation behind the connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ClientKind {
    GoCqhttp,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VersionInfo {
    pub client: ClientKind,
    pub version: String,
}

impl VersionInfo {
    pub fn from_data(data: &Value) -> Self {
        let client = if data.bool_field("go-cqhttp") {
            ClientKind::GoCqhttp
        } else {
            ClientKind::Other
        };
        Self {
            client,
            version: data.str_field("version"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FriendInfo {
    pub user_id: i64,
    pub nickname: String,
    pub remark: String,
}

impl FriendInfo {
    pub fn from_data(data: &Value) -> Self {
        Self {
            user_id: data.i64_field("user_id"),
            nickname: data.str_field("nickname"),
            remark: data.str_field("remark"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupInfo {
    pub group_id: i64,
    pub group_name: String,
    pub member_count: i32,
    pub max_member_count: i32,
}

impl GroupInfo {
    pub fn from_data(data: &Value) -> Self {
        Self {
            group_id: data.i64_field("group_id"),
            group_name: data.str_field("group_name"),
            member_count: data.i32_field("member_count"),
            max_member_count: data.i32_field("max_member_count"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MemberRole {
    Owner,
    Admin,
    Member,
    Unknown,
}

impl MemberRole {
    fn parse(role: &str) -> Self {
        match role {
            "owner" => MemberRole::Owner,
            "admin" => MemberRole::Admin,
            "member" => MemberRole::Member,
            _ => MemberRole::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupMemberInfo {
    pub group_id: i64,
    pub user_id: i64,
    pub nickname: String,
    pub card: String,
    pub sex: String,
    pub age: i32,
    pub area: String,
    pub join_time: i64,
    pub last_sent_time: i64,
    pub level: String,
    pub role: MemberRole,
    pub unfriendly: bool,
    pub title: String,
    pub title_expire_time: i64,
    pub card_changeable: bool,
}

impl GroupMemberInfo {
    pub fn from_data(data: &Value) -> Self {
        Self {
            group_id: data.i64_field("group_id"),
            user_id: data.i64_field("user_id"),
            nickname: data.str_field("nickname"),
            card: data.str_field("card"),
            sex: data.str_field("sex"),
            age: data.i32_field("age"),
            area: data.str_field("area"),
            join_time: data.i64_field("join_time"),
            last_sent_time: data.i64_field("last_sent_time"),
            level: data.str_field("level"),
            role: MemberRole::parse(&data.str_field("role")),
            unfriendly: data.bool_field("unfriendly"),
            title: data.str_field("title"),
            title_expire_time: data.i64_field("title_expire_time"),
            card_changeable: data.bool_field("card_changeable"),
        }
    }
}

/// One node of a merged-forward message
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForwardNode {
    pub sender_id: i64,
    pub sender_name: String,
    pub time: i64,
    /// Raw message content, as sent by the host
    pub content: Value,
}

impl ForwardNode {
    pub fn from_data(data: &Value) -> Self {
        let sender = data.field("sender");
        Self {
            sender_id: sender.i64_field("user_id"),
            sender_name: sender.str_field("nickname"),
            time: data.i64_field("time"),
            content: data.field("content").clone(),
        }
    }

    /// Nodes live under `data.messages`; a bare array is accepted too
    pub fn list_from_data(data: &Value) -> Vec<Self> {
        let nodes = match data.get("messages") {
            Some(messages) => messages,
            None => data,
        };
        list_from_data(nodes, Self::from_data)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusInfo {
    pub online: bool,
    pub good: bool,
    /// Full payload, including implementation-specific fields
    pub raw: Value,
}

impl StatusInfo {
    pub fn from_data(data: &Value) -> Self {
        Self {
            online: data.bool_field("online"),
            good: data.bool_field("good"),
            raw: data.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageInfo {
    pub size: i32,
    pub filename: String,
    pub url: String,
}

impl ImageInfo {
    pub fn from_data(data: &Value) -> Self {
        Self {
            size: data.i32_field("size"),
            filename: data.str_field("filename"),
            url: data.str_field("url"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupMessageInfo {
    pub message_id: i64,
    pub real_id: i32,
    pub sender_id: i64,
    pub sender_name: String,
    pub time: i64,
    pub content: String,
}

impl GroupMessageInfo {
    pub fn from_data(data: &Value) -> Self {
        let sender = data.field("sender");
        Self {
            message_id: data.i64_field("message_id"),
            real_id: data.i32_field("real_id"),
            sender_id: sender.i64_field("user_id"),
            sender_name: sender.str_field("nickname"),
            time: data.i64_field("time"),
            content: data.str_field("content"),
        }
    }
}

/// Payload of `can_send_image` / `can_send_record`
pub fn capability_from_data(data: &Value) -> bool {
    data.bool_field("yes")
}

/// Payload of `send_msg`
pub fn message_id_from_data(data: &Value) -> i64 {
    data.i64_field("message_id")
}
