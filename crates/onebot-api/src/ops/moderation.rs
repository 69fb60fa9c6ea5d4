use super::OneBotApi;
use crate::action::ApiAction;
use crate::error::ApiResult;
use crate::params::{
    GroupBanParams, GroupKickParams, GroupSpecialTitleParams, GroupWholeBanParams,
    PERMANENT_TITLE_DURATION,
};
use onebot_core::ConnectionId;

impl OneBotApi {
    /// Grant a permanent special title; an empty title removes it
    pub async fn set_group_special_title(
        &self,
        connection: ConnectionId,
        group_id: i64,
        user_id: i64,
        title: &str,
    ) -> ApiResult<()> {
        let params = GroupSpecialTitleParams {
            group_id,
            user_id,
            special_title: title.to_string(),
            duration: PERMANENT_TITLE_DURATION,
        };
        self.notify(connection, ApiAction::SetGroupSpecialTitle, &params)
            .await
    }

    pub async fn set_group_kick(
        &self,
        connection: ConnectionId,
        group_id: i64,
        user_id: i64,
        reject_add_request: bool,
    ) -> ApiResult<()> {
        let params = GroupKickParams {
            group_id,
            user_id,
            reject_add_request,
        };
        self.notify(connection, ApiAction::SetGroupKick, &params)
            .await
    }

    /// Mute a member for `duration` seconds; `0` lifts the mute
    pub async fn set_group_ban(
        &self,
        connection: ConnectionId,
        group_id: i64,
        user_id: i64,
        duration: i64,
    ) -> ApiResult<()> {
        let params = GroupBanParams {
            group_id,
            user_id,
            duration,
        };
        self.notify(connection, ApiAction::SetGroupBan, &params).await
    }

    pub async fn set_group_whole_ban(
        &self,
        connection: ConnectionId,
        group_id: i64,
        enable: bool,
    ) -> ApiResult<()> {
        self.notify(
            connection,
            ApiAction::SetGroupWholeBan,
            &GroupWholeBanParams { group_id, enable },
        )
        .await
    }
}
