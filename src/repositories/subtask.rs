//! Subtask repository for database operations.

use anyhow::Result;
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, QueryTrait,
};
use uuid::Uuid;

use crate::entities::{subtask, task};

/// Repository for subtask-related database operations.
pub struct SubtaskRepository;

impl SubtaskRepository {
    /// Get a single subtask by id.
    pub async fn get_by_id<C>(conn: &C, id: &Uuid) -> Result<Option<subtask::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(subtask::Entity::find()
            .filter(subtask::Column::Id.eq(*id))
            .one(conn)
            .await?)
    }

    /// Get all subtasks for a task, oldest first.
    pub async fn get_for_task<C>(conn: &C, task_id: &Uuid) -> Result<Vec<subtask::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(subtask::Entity::find()
            .filter(subtask::Column::TaskId.eq(*task_id))
            .order_by_asc(subtask::Column::CreatedAt)
            .all(conn)
            .await?)
    }

    /// Count a task's subtasks with `completed = true`.
    ///
    /// Counter updates recompute from this instead of incrementing
    /// blindly, so prior drift self-heals on the next toggle.
    pub async fn count_completed<C>(conn: &C, task_id: &Uuid) -> Result<u64>
    where
        C: ConnectionTrait,
    {
        Ok(subtask::Entity::find()
            .filter(subtask::Column::TaskId.eq(*task_id))
            .filter(subtask::Column::Completed.eq(true))
            .count(conn)
            .await?)
    }

    /// Insert a subtask into the database.
    pub async fn insert<C>(conn: &C, subtask: subtask::ActiveModel) -> Result<subtask::Model>
    where
        C: ConnectionTrait,
    {
        use sea_orm::ActiveModelTrait;
        Ok(subtask.insert(conn).await?)
    }

    /// Update a subtask in the database.
    pub async fn update<C>(conn: &C, subtask: subtask::ActiveModel) -> Result<subtask::Model>
    where
        C: ConnectionTrait,
    {
        use sea_orm::ActiveModelTrait;
        Ok(subtask.update(conn).await?)
    }

    /// Delete all subtasks belonging to a task.
    pub async fn delete_for_task<C>(conn: &C, task_id: &Uuid) -> Result<()>
    where
        C: ConnectionTrait,
    {
        subtask::Entity::delete_many()
            .filter(subtask::Column::TaskId.eq(*task_id))
            .exec(conn)
            .await?;
        Ok(())
    }

    /// Delete all subtasks of every task in a project.
    pub async fn delete_for_project<C>(conn: &C, project_id: &Uuid) -> Result<()>
    where
        C: ConnectionTrait,
    {
        subtask::Entity::delete_many()
            .filter(
                subtask::Column::TaskId.in_subquery(
                    task::Entity::find()
                        .filter(task::Column::ProjectId.eq(*project_id))
                        .select_only()
                        .column(task::Column::Id)
                        .into_query(),
                ),
            )
            .exec(conn)
            .await?;
        Ok(())
    }
}
