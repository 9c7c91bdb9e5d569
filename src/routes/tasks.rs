use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    routing::{post, put},
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{
    db::{entities::task, task_repo},
    error::AppError,
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct TaskUpdatedResponse {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub task_list_id: i32,
}

#[derive(Debug, Serialize)]
pub struct TaskToggledResponse {
    pub id: i32,
    pub completed: bool,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/tasks/{task_id}", put(update_task).delete(delete_task))
        .route("/api/tasks/{task_id}/toggle", post(toggle_task))
        .with_state(state)
}

async fn update_task(
    State(state): State<Arc<AppState>>,
    Path(task_id): Path<i32>,
    body: Result<Json<UpdateTaskRequest>, JsonRejection>,
) -> Result<Json<TaskUpdatedResponse>, AppError> {
    let Json(body) = body?;
    // Unknown id wins over a bad payload field.
    task_repo::find_task(&state.db, task_id).await?;

    let title = match body.title.as_deref() {
        Some(value) => Some(normalize_title(value)?.to_string()),
        None => None,
    };
    let description = body.description.as_deref().map(|value| value.trim().to_string());

    let item = task_repo::update_task(&state.db, task_id, title, description, body.completed).await?;
    Ok(Json(item.into()))
}

async fn delete_task(
    State(state): State<Arc<AppState>>,
    Path(task_id): Path<i32>,
) -> Result<Json<MessageResponse>, AppError> {
    task_repo::delete_task(&state.db, task_id).await?;
    Ok(Json(MessageResponse {
        message: "Task deleted successfully",
    }))
}

async fn toggle_task(
    State(state): State<Arc<AppState>>,
    Path(task_id): Path<i32>,
) -> Result<Json<TaskToggledResponse>, AppError> {
    let item = task_repo::toggle_task(&state.db, task_id).await?;
    Ok(Json(TaskToggledResponse {
        id: item.id,
        completed: item.completed,
        updated_at: item.updated_at,
    }))
}

pub(crate) fn normalize_title(title: &str) -> Result<&str, AppError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(AppError::new(
            StatusCode::BAD_REQUEST,
            "Task title cannot be empty",
        ));
    }
    Ok(trimmed)
}

pub(crate) fn require_title(title: Option<&str>) -> Result<&str, AppError> {
    let title = title.ok_or_else(|| {
        AppError::new(StatusCode::BAD_REQUEST, "Task title is required")
    })?;
    normalize_title(title)
}

impl From<task::Model> for TaskUpdatedResponse {
    fn from(model: task::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            completed: model.completed,
            created_at: model.created_at,
            updated_at: model.updated_at,
            task_list_id: model.task_list_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_title_trims() {
        assert_eq!(normalize_title("  Write spec  ").unwrap(), "Write spec");
    }

    #[test]
    fn normalize_title_rejects_whitespace() {
        let err = normalize_title("   ").unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Task title cannot be empty");
    }

    #[test]
    fn require_title_rejects_missing() {
        let err = require_title(None).unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Task title is required");
    }
}
