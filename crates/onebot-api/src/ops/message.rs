use super::OneBotApi;
use crate::action::ApiAction;
use crate::error::{require_non_empty, ApiError, ApiResult};
use crate::message::MessageSegment;
use crate::models::{message_id_from_data, ForwardNode, GroupMessageInfo};
use crate::params::{ForwardMessageParams, MessageIdParams, SendMessageParams};
use crate::reply::ApiReply;
use onebot_core::ConnectionId;

impl OneBotApi {
    /// Send a private message; the reply carries the new message ID.
    pub async fn send_private_message(
        &self,
        connection: ConnectionId,
        user_id: i64,
        message: Vec<MessageSegment>,
    ) -> ApiResult<ApiReply<i64>> {
        if message.is_empty() {
            return Err(ApiError::InvalidArgument("message"));
        }
        let params = SendMessageParams::private(user_id, message);
        let response = self.request(connection, ApiAction::SendMsg, &params).await;
        Ok(ApiReply::from_response(response, message_id_from_data))
    }

    /// Send a group message; the reply carries the new message ID.
    pub async fn send_group_message(
        &self,
        connection: ConnectionId,
        group_id: i64,
        message: Vec<MessageSegment>,
    ) -> ApiResult<ApiReply<i64>> {
        if message.is_empty() {
            return Err(ApiError::InvalidArgument("message"));
        }
        let params = SendMessageParams::group(group_id, message);
        let response = self.request(connection, ApiAction::SendMsg, &params).await;
        Ok(ApiReply::from_response(response, message_id_from_data))
    }

    pub async fn get_forward_message(
        &self,
        connection: ConnectionId,
        forward_id: &str,
    ) -> ApiResult<ApiReply<Vec<ForwardNode>>> {
        require_non_empty("forward_id", forward_id)?;
        let params = ForwardMessageParams {
            message_id: forward_id.to_string(),
        };
        let response = self
            .request(connection, ApiAction::GetForwardMsg, &params)
            .await;
        Ok(ApiReply::from_response(response, ForwardNode::list_from_data))
    }

    pub async fn get_group_message(
        &self,
        connection: ConnectionId,
        message_id: i64,
    ) -> ApiReply<GroupMessageInfo> {
        let params = MessageIdParams { message_id };
        let response = self.request(connection, ApiAction::GetMsg, &params).await;
        ApiReply::from_response(response, GroupMessageInfo::from_data)
    }

    /// Recall a message
    pub async fn delete_message(&self, connection: ConnectionId, message_id: i64) -> ApiResult<()> {
        self.notify(connection, ApiAction::DeleteMsg, &MessageIdParams { message_id })
            .await
    }
}
