use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

pub mod health;
pub mod task_lists;
pub mod tasks;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(health::router())
        .merge(task_lists::router(state.clone()))
        .merge(tasks::router(state))
}
