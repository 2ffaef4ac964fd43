//! Storage initialization and maintenance.

mod common;

use common::{seed_project, seed_task, service};
use sea_orm::{ConnectionTrait, EntityTrait, Statement};
use venturist::storage::db::LocalStorage;

#[tokio::test]
async fn in_memory_storage_creates_schema() {
    let storage = LocalStorage::new(true).await.unwrap();

    let backend = storage.conn.get_database_backend();
    let rows = storage
        .conn
        .query_all(Statement::from_string(
            backend,
            "SELECT name FROM sqlite_master WHERE type = 'table'".to_string(),
        ))
        .await
        .unwrap();
    let names: Vec<String> = rows
        .iter()
        .map(|row| row.try_get_by_index::<String>(0).unwrap())
        .collect();

    for table in [
        "users",
        "teams",
        "team_members",
        "projects",
        "tasks",
        "subtasks",
        "notes",
    ] {
        assert!(names.iter().any(|n| n == table), "missing table {table}");
    }
}

#[tokio::test]
async fn fresh_database_has_no_data() {
    let storage = LocalStorage::new(true).await.unwrap();
    assert!(!storage.has_data().await.unwrap());
}

#[tokio::test]
async fn connect_accepts_explicit_memory_url() {
    let storage = LocalStorage::connect("sqlite::memory:").await;
    assert!(storage.is_ok());
}

#[tokio::test]
async fn clear_all_data_empties_every_table() {
    let (svc, storage) = service().await;
    let (project, user) = seed_project(&svc).await;
    seed_task(&svc, project, user, "Document the API").await;

    let storage = storage.lock().await;
    assert!(storage.has_data().await.unwrap());

    storage.clear_all_data().await.unwrap();
    assert!(!storage.has_data().await.unwrap());

    let remaining = venturist::entities::Task::find()
        .all(&storage.conn)
        .await
        .unwrap();
    assert!(remaining.is_empty());
}
