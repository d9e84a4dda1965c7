use axum::http::StatusCode;

use super::ApiSuccess;
use super::MessageData;

/// Public landing route.
pub async fn welcome() -> ApiSuccess<MessageData> {
    ApiSuccess::new(
        StatusCode::OK,
        MessageData::new("welcome to the authentication api"),
    )
}
