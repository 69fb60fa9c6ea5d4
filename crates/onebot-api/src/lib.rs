//! OneBot API - typed operations over a shared OneBot connection.
//!
//! Each operation builds its request envelope, goes through
//! [`onebot_core::ApiCaller`] and decodes the response payload with the
//! permissive field policy.
//!
//! ```ignore
//! let api = OneBotApi::new(caller);
//! let reply = api.get_login_info(connection).await;
//! if let Some(login) = reply.data {
//!     info!(user_id = login.user_id, "Logged in");
//! }
//! ```

#![warn(clippy::all)]
#![deny(unsafe_code)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod action;
pub mod error;
pub mod message;
pub mod models;
pub mod ops;
pub mod params;
pub mod reply;

pub use action::ApiAction;
pub use error::{ApiError, ApiResult};
pub use message::{MessageSegment, MessageType};
pub use models::{
    ClientKind, ForwardNode, FriendInfo, GroupInfo, GroupMemberInfo, GroupMessageInfo, ImageInfo,
    LoginInfo, MemberRole, StatusInfo, VersionInfo,
};
pub use ops::OneBotApi;
pub use params::GroupRequestType;
pub use reply::ApiReply;
