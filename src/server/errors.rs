use axum::{extract::rejection::JsonRejection, http::StatusCode, Json};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub fn invalid_request(message: impl Into<String>) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

/// Map a body-extraction failure onto the invalid-argument taxonomy. The
/// cloaking core only ever sees text; anything that is not a string payload
/// is rejected here and never reaches it.
pub fn bad_payload(rejection: JsonRejection) -> ApiError {
    invalid_request(format!("value must be a string: {}", rejection.body_text()))
}
