use super::OneBotApi;
use crate::action::ApiAction;
use crate::error::{require_non_empty, ApiResult};
use crate::models::{list_from_data, GroupInfo, GroupMemberInfo};
use crate::params::{
    GroupAddRequestParams, GroupCardParams, GroupIdParams, GroupInfoParams,
    GroupMemberInfoParams, GroupNameParams, GroupRequestType,
};
use crate::reply::ApiReply;
use onebot_core::ConnectionId;

impl OneBotApi {
    pub async fn get_group_list(&self, connection: ConnectionId) -> ApiReply<Vec<GroupInfo>> {
        let response = self
            .request_bare(connection, ApiAction::GetGroupList)
            .await;
        ApiReply::from_response(response, |data| list_from_data(data, GroupInfo::from_data))
    }

    pub async fn get_group_member_list(
        &self,
        connection: ConnectionId,
        group_id: i64,
    ) -> ApiReply<Vec<GroupMemberInfo>> {
        let response = self
            .request(
                connection,
                ApiAction::GetGroupMemberList,
                &GroupIdParams { group_id },
            )
            .await;
        ApiReply::from_response(response, |data| {
            list_from_data(data, GroupMemberInfo::from_data)
        })
    }

    pub async fn get_group_info(
        &self,
        connection: ConnectionId,
        group_id: i64,
        no_cache: bool,
    ) -> ApiReply<GroupInfo> {
        let params = GroupInfoParams { group_id, no_cache };
        let response = self
            .request(connection, ApiAction::GetGroupInfo, &params)
            .await;
        ApiReply::from_response(response, GroupInfo::from_data)
    }

    pub async fn get_group_member_info(
        &self,
        connection: ConnectionId,
        group_id: i64,
        user_id: i64,
        no_cache: bool,
    ) -> ApiReply<GroupMemberInfo> {
        let params = GroupMemberInfoParams {
            group_id,
            user_id,
            no_cache,
        };
        let response = self
            .request(connection, ApiAction::GetGroupMemberInfo, &params)
            .await;
        ApiReply::from_response(response, GroupMemberInfo::from_data)
    }

    /// Answer a join request or an invitation identified by `flag`
    pub async fn set_group_add_request(
        &self,
        connection: ConnectionId,
        flag: &str,
        request_type: GroupRequestType,
        approve: bool,
        reason: Option<String>,
    ) -> ApiResult<()> {
        require_non_empty("flag", flag)?;
        let params = GroupAddRequestParams {
            flag: flag.to_string(),
            sub_type: request_type,
            approve,
            reason,
        };
        self.notify(connection, ApiAction::SetGroupAddRequest, &params)
            .await
    }

    /// Set a member's group card; `None` clears it
    pub async fn set_group_card(
        &self,
        connection: ConnectionId,
        group_id: i64,
        user_id: i64,
        card: Option<String>,
    ) -> ApiResult<()> {
        let params = GroupCardParams {
            group_id,
            user_id,
            card,
        };
        self.notify(connection, ApiAction::SetGroupCard, &params)
            .await
    }

    pub async fn set_group_name(
        &self,
        connection: ConnectionId,
        group_id: i64,
        group_name: &str,
    ) -> ApiResult<()> {
        require_non_empty("group_name", group_name)?;
        let params = GroupNameParams {
            group_id,
            group_name: group_name.to_string(),
        };
        self.notify(connection, ApiAction::SetGroupName, &params)
            .await
    }
}
