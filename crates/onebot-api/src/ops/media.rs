use super::OneBotApi;
use crate::action::ApiAction;
use crate::models::ImageInfo;
use crate::params::ImageParams;
use crate::reply::ApiReply;
use onebot_core::ConnectionId;

impl OneBotApi {
    /// Look up a cached image by the file name from its segment
    pub async fn get_image(&self, connection: ConnectionId, file: &str) -> ApiReply<ImageInfo> {
        let params = ImageParams {
            file: file.to_string(),
        };
        let response = self.request(connection, ApiAction::GetImage, &params).await;
        ApiReply::from_response(response, ImageInfo::from_data)
    }
}
