use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

use picklist_utils::{ErrorResponse, PickListError};

/// Handler error carrying the engine's error onto the wire.
#[derive(Debug)]
pub struct ApiError(pub PickListError);

impl From<PickListError> for ApiError {
    fn from(error: PickListError) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(ErrorResponse::from(self.0))).into_response()
    }
}
