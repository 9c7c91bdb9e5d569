use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    routing::{get, post, put},
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{
    db::{
        entities::{task, task_list},
        task_repo,
    },
    error::AppError,
    state::AppState,
};

use super::tasks::{MessageResponse, require_title};

#[derive(Debug, Deserialize)]
pub struct CreateListRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TaskListResponse {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub created_at: NaiveDateTime,
    pub tasks: Vec<TaskResponse>,
}

#[derive(Debug, Serialize)]
pub struct TaskListUpdatedResponse {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Serialize)]
pub struct TaskResponse {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Serialize)]
pub struct TaskCreatedResponse {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub created_at: NaiveDateTime,
    pub task_list_id: i32,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/task-lists", get(list_task_lists).post(create_task_list))
        .route(
            "/api/task-lists/{list_id}",
            put(update_task_list).delete(delete_task_list),
        )
        .route("/api/task-lists/{list_id}/tasks", post(create_task))
        .with_state(state)
}

async fn list_task_lists(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TaskListResponse>>, AppError> {
    let lists = task_repo::list_all(&state.db).await?;
    Ok(Json(lists.into_iter().map(TaskListResponse::from).collect()))
}

async fn create_task_list(
    State(state): State<Arc<AppState>>,
    body: Result<Json<CreateListRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TaskListResponse>), AppError> {
    let Json(body) = body?;
    let name = require_name(body.name.as_deref())?;
    let description = body.description.as_deref().map(str::trim).unwrap_or("");

    let list = task_repo::create_list(&state.db, name, description).await?;
    Ok((
        StatusCode::CREATED,
        Json(TaskListResponse::from((list, Vec::new()))),
    ))
}

async fn update_task_list(
    State(state): State<Arc<AppState>>,
    Path(list_id): Path<i32>,
    body: Result<Json<CreateListRequest>, JsonRejection>,
) -> Result<Json<TaskListUpdatedResponse>, AppError> {
    let Json(body) = body?;
    // Unknown id wins over a bad payload field.
    task_repo::find_list(&state.db, list_id).await?;

    let name = require_name(body.name.as_deref())?;
    let description = body.description.as_deref().map(str::trim);

    let list = task_repo::update_list(&state.db, list_id, name, description).await?;
    Ok(Json(list.into()))
}

async fn delete_task_list(
    State(state): State<Arc<AppState>>,
    Path(list_id): Path<i32>,
) -> Result<Json<MessageResponse>, AppError> {
    task_repo::delete_list(&state.db, list_id).await?;
    Ok(Json(MessageResponse {
        message: "Task list deleted successfully",
    }))
}

async fn create_task(
    State(state): State<Arc<AppState>>,
    Path(list_id): Path<i32>,
    body: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TaskCreatedResponse>), AppError> {
    let Json(body) = body?;
    task_repo::find_list(&state.db, list_id).await?;

    let title = require_title(body.title.as_deref())?;
    let description = body.description.as_deref().map(str::trim).unwrap_or("");

    let item = task_repo::create_task(&state.db, list_id, title, description).await?;
    Ok((StatusCode::CREATED, Json(item.into())))
}

fn require_name(name: Option<&str>) -> Result<&str, AppError> {
    let name = name.ok_or_else(|| {
        AppError::new(StatusCode::BAD_REQUEST, "Task list name is required")
    })?;
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(AppError::new(
            StatusCode::BAD_REQUEST,
            "Task list name cannot be empty",
        ));
    }
    Ok(trimmed)
}

impl From<(task_list::Model, Vec<task::Model>)> for TaskListResponse {
    fn from((list, tasks): (task_list::Model, Vec<task::Model>)) -> Self {
        Self {
            id: list.id,
            name: list.name,
            description: list.description,
            created_at: list.created_at,
            tasks: tasks.into_iter().map(TaskResponse::from).collect(),
        }
    }
}

impl From<task_list::Model> for TaskListUpdatedResponse {
    fn from(model: task_list::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<task::Model> for TaskResponse {
    fn from(model: task::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            completed: model.completed,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<task::Model> for TaskCreatedResponse {
    fn from(model: task::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            completed: model.completed,
            created_at: model.created_at,
            task_list_id: model.task_list_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_name_trims() {
        assert_eq!(require_name(Some("  Work  ")).unwrap(), "Work");
    }

    #[test]
    fn require_name_rejects_missing() {
        let err = require_name(None).unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Task list name is required");
    }

    #[test]
    fn require_name_rejects_whitespace() {
        let err = require_name(Some("   ")).unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Task list name cannot be empty");
    }
}
