//! Action tags understood by the OneBot host.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiAction {
    // Call mode
    SendMsg,
    GetForwardMsg,
    GetLoginInfo,
    GetVersionInfo,
    GetFriendList,
    GetGroupList,
    GetGroupMemberList,
    GetGroupInfo,
    GetGroupMemberInfo,
    CanSendImage,
    CanSendRecord,
    GetStatus,
    GetImage,
    GetMsg,

    // Fire-and-forget
    DeleteMsg,
    SetFriendAddRequest,
    SetGroupAddRequest,
    SetGroupCard,
    SetGroupSpecialTitle,
    SetGroupKick,
    SetGroupBan,
    SetGroupWholeBan,
    SetGroupName,
}

impl ApiAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiAction::SendMsg => "send_msg",
            ApiAction::GetForwardMsg => "get_forward_msg",
            ApiAction::GetLoginInfo => "get_login_info",
            ApiAction::GetVersionInfo => "get_version_info",
            ApiAction::GetFriendList => "get_friend_list",
            ApiAction::GetGroupList => "get_group_list",
            ApiAction::GetGroupMemberList => "get_group_member_list",
            ApiAction::GetGroupInfo => "get_group_info",
            ApiAction::GetGroupMemberInfo => "get_group_member_info",
            ApiAction::CanSendImage => "can_send_image",
            ApiAction::CanSendRecord => "can_send_record",
            ApiAction::GetStatus => "get_status",
            ApiAction::GetImage => "get_image",
            ApiAction::GetMsg => "get_msg",
            ApiAction::DeleteMsg => "delete_msg",
            ApiAction::SetFriendAddRequest => "set_friend_add_request",
            ApiAction::SetGroupAddRequest => "set_group_add_request",
            ApiAction::SetGroupCard => "set_group_card",
            ApiAction::SetGroupSpecialTitle => "set_group_special_title",
            ApiAction::SetGroupKick => "set_group_kick",
            ApiAction::SetGroupBan => "set_group_ban",
            ApiAction::SetGroupWholeBan => "set_group_whole_ban",
            ApiAction::SetGroupName => "set_group_name",
        }
    }

    /// Whether this action is issued in call mode and waits for a reply
    pub fn expects_reply(&self) -> bool {
        !matches!(
            self,
            ApiAction::DeleteMsg
                | ApiAction::SetFriendAddRequest
                | ApiAction::SetGroupAddRequest
                | ApiAction::SetGroupCard
                | ApiAction::SetGroupSpecialTitle
                | ApiAction::SetGroupKick
                | ApiAction::SetGroupBan
                | ApiAction::SetGroupWholeBan
                | ApiAction::SetGroupName
        )
    }
}

impl fmt::Display for ApiAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
