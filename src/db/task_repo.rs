use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, SqlErr, TransactionError, TransactionTrait,
};

use super::entities::prelude::{Task, TaskList};
use super::entities::{task, task_list};
use super::error::StoreError;

pub async fn list_all(
    db: &DatabaseConnection,
) -> Result<Vec<(task_list::Model, Vec<task::Model>)>, StoreError> {
    let lists = TaskList::find()
        .order_by_asc(task_list::Column::Id)
        .all(db)
        .await?;
    let tasks = Task::find().order_by_asc(task::Column::Id).all(db).await?;

    let mut by_list: HashMap<i32, Vec<task::Model>> = HashMap::new();
    for item in tasks {
        by_list.entry(item.task_list_id).or_default().push(item);
    }

    Ok(lists
        .into_iter()
        .map(|list| {
            let tasks = by_list.remove(&list.id).unwrap_or_default();
            (list, tasks)
        })
        .collect())
}

pub async fn find_list(db: &DatabaseConnection, id: i32) -> Result<task_list::Model, StoreError> {
    TaskList::find_by_id(id)
        .one(db)
        .await?
        .ok_or(StoreError::ListNotFound)
}

pub async fn find_list_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<task_list::Model>, StoreError> {
    Ok(TaskList::find()
        .filter(task_list::Column::Name.eq(name))
        .one(db)
        .await?)
}

pub async fn create_list(
    db: &DatabaseConnection,
    name: &str,
    description: &str,
) -> Result<task_list::Model, StoreError> {
    if find_list_by_name(db, name).await?.is_some() {
        return Err(StoreError::DuplicateListName);
    }

    let now = Utc::now().naive_utc();
    let model = task_list::ActiveModel {
        name: Set(name.to_string()),
        description: Set(description.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    model.insert(db).await.map_err(map_unique_violation)
}

pub async fn update_list(
    db: &DatabaseConnection,
    id: i32,
    name: &str,
    description: Option<&str>,
) -> Result<task_list::Model, StoreError> {
    let list = find_list(db, id).await?;
    if let Some(existing) = find_list_by_name(db, name).await? {
        if existing.id != id {
            return Err(StoreError::DuplicateListName);
        }
    }

    let mut active: task_list::ActiveModel = list.into();
    active.name = Set(name.to_string());
    if let Some(description) = description {
        active.description = Set(description.to_string());
    }
    active.updated_at = Set(Utc::now().naive_utc());
    active.update(db).await.map_err(map_unique_violation)
}

// Child tasks go first, inside the same transaction, so the cascade is
// all-or-nothing.
pub async fn delete_list(db: &DatabaseConnection, id: i32) -> Result<(), StoreError> {
    let deleted = db
        .transaction::<_, bool, DbErr>(|txn| {
            Box::pin(async move {
                Task::delete_many()
                    .filter(task::Column::TaskListId.eq(id))
                    .exec(txn)
                    .await?;
                let result = TaskList::delete_by_id(id).exec(txn).await?;
                Ok(result.rows_affected > 0)
            })
        })
        .await
        .map_err(|err| match err {
            TransactionError::Connection(db_err) => StoreError::Db(db_err),
            TransactionError::Transaction(db_err) => StoreError::Db(db_err),
        })?;
    if !deleted {
        return Err(StoreError::ListNotFound);
    }
    Ok(())
}

pub async fn create_task(
    db: &DatabaseConnection,
    list_id: i32,
    title: &str,
    description: &str,
) -> Result<task::Model, StoreError> {
    let now = Utc::now().naive_utc();
    let model = task::ActiveModel {
        title: Set(title.to_string()),
        description: Set(description.to_string()),
        completed: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
        task_list_id: Set(list_id),
        ..Default::default()
    };
    Ok(model.insert(db).await?)
}

pub async fn find_task(db: &DatabaseConnection, id: i32) -> Result<task::Model, StoreError> {
    Task::find_by_id(id)
        .one(db)
        .await?
        .ok_or(StoreError::TaskNotFound)
}

pub async fn update_task(
    db: &DatabaseConnection,
    id: i32,
    title: Option<String>,
    description: Option<String>,
    completed: Option<bool>,
) -> Result<task::Model, StoreError> {
    let item = find_task(db, id).await?;
    let mut active: task::ActiveModel = item.into();
    if let Some(title) = title {
        active.title = Set(title);
    }
    if let Some(description) = description {
        active.description = Set(description);
    }
    if let Some(completed) = completed {
        active.completed = Set(completed);
    }
    active.updated_at = Set(Utc::now().naive_utc());
    Ok(active.update(db).await?)
}

pub async fn delete_task(db: &DatabaseConnection, id: i32) -> Result<(), StoreError> {
    let result = Task::delete_by_id(id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(StoreError::TaskNotFound);
    }
    Ok(())
}

pub async fn toggle_task(db: &DatabaseConnection, id: i32) -> Result<task::Model, StoreError> {
    let item = find_task(db, id).await?;
    let completed = !item.completed;
    let mut active: task::ActiveModel = item.into();
    active.completed = Set(completed);
    active.updated_at = Set(Utc::now().naive_utc());
    Ok(active.update(db).await?)
}

pub async fn count_tasks_for_list(db: &DatabaseConnection, list_id: i32) -> Result<u64, StoreError> {
    Ok(Task::find()
        .filter(task::Column::TaskListId.eq(list_id))
        .count(db)
        .await?)
}

fn map_unique_violation(err: DbErr) -> StoreError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => StoreError::DuplicateListName,
        _ => StoreError::Db(err),
    }
}
