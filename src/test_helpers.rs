use axum::Router;
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};

use crate::{routes::router, state::AppState};

pub fn mock_db() -> MockDatabase {
    MockDatabase::new(DatabaseBackend::Postgres)
}

pub fn test_router(db: DatabaseConnection) -> Router {
    router(AppState::new(db))
}
