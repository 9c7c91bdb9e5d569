use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::db::StoreError;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: &'static str,
}

impl AppError {
    pub fn new(status: StatusCode, message: &'static str) -> Self {
        Self { status, message }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::ListNotFound => AppError::new(StatusCode::NOT_FOUND, "Task list not found"),
            StoreError::TaskNotFound => AppError::new(StatusCode::NOT_FOUND, "Task not found"),
            StoreError::DuplicateListName => AppError::new(
                StatusCode::BAD_REQUEST,
                "Task list with this name already exists",
            ),
            StoreError::Db(db_err) => {
                tracing::error!("database error: {db_err}");
                AppError::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(_: JsonRejection) -> Self {
        AppError::new(StatusCode::BAD_REQUEST, "Invalid JSON body")
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.message.to_string(),
        });
        (self.status, body).into_response()
    }
}
