use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("task list not found")]
    ListNotFound,

    #[error("task not found")]
    TaskNotFound,

    #[error("task list name already taken")]
    DuplicateListName,

    #[error(transparent)]
    Db(#[from] DbErr),
}
