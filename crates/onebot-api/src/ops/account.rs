use super::OneBotApi;
use crate::action::ApiAction;
use crate::error::{require_non_empty, ApiResult};
use crate::models::{
    capability_from_data, list_from_data, FriendInfo, LoginInfo, StatusInfo, VersionInfo,
};
use crate::params::FriendAddRequestParams;
use crate::reply::ApiReply;
use onebot_core::ConnectionId;

impl OneBotApi {
    pub async fn get_login_info(&self, connection: ConnectionId) -> ApiReply<LoginInfo> {
        let response = self
            .request_bare(connection, ApiAction::GetLoginInfo)
            .await;
        ApiReply::from_response(response, LoginInfo::from_data)
    }

    pub async fn get_version_info(&self, connection: ConnectionId) -> ApiReply<VersionInfo> {
        let response = self
            .request_bare(connection, ApiAction::GetVersionInfo)
            .await;
        ApiReply::from_response(response, VersionInfo::from_data)
    }

    pub async fn get_friend_list(&self, connection: ConnectionId) -> ApiReply<Vec<FriendInfo>> {
        let response = self
            .request_bare(connection, ApiAction::GetFriendList)
            .await;
        ApiReply::from_response(response, |data| {
            list_from_data(data, FriendInfo::from_data)
        })
    }

    pub async fn can_send_image(&self, connection: ConnectionId) -> ApiReply<bool> {
        let response = self
            .request_bare(connection, ApiAction::CanSendImage)
            .await;
        ApiReply::from_response(response, capability_from_data)
    }

    pub async fn can_send_record(&self, connection: ConnectionId) -> ApiReply<bool> {
        let response = self
            .request_bare(connection, ApiAction::CanSendRecord)
            .await;
        ApiReply::from_response(response, capability_from_data)
    }

    pub async fn get_status(&self, connection: ConnectionId) -> ApiReply<StatusInfo> {
        let response = self.request_bare(connection, ApiAction::GetStatus).await;
        ApiReply::from_response(response, StatusInfo::from_data)
    }

    /// Answer a friend request identified by `flag`
    pub async fn set_friend_add_request(
        &self,
        connection: ConnectionId,
        flag: &str,
        approve: bool,
        remark: Option<String>,
    ) -> ApiResult<()> {
        require_non_empty("flag", flag)?;
        let params = FriendAddRequestParams {
            flag: flag.to_string(),
            approve,
            remark,
        };
        self.notify(connection, ApiAction::SetFriendAddRequest, &params)
            .await
    }
}
