//! Task repository for database operations.

use anyhow::Result;
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::entities::task;
use crate::filter::TaskQuery;

/// Repository for task-related database operations.
pub struct TaskRepository;

impl TaskRepository {
    /// Get a single task by id.
    pub async fn get_by_id<C>(conn: &C, id: &Uuid) -> Result<Option<task::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(task::Entity::find()
            .filter(task::Column::Id.eq(*id))
            .one(conn)
            .await?)
    }

    /// Get all tasks for a specific project.
    pub async fn get_for_project<C>(conn: &C, project_id: &Uuid) -> Result<Vec<task::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(task::Entity::find()
            .filter(task::Column::ProjectId.eq(*project_id))
            .order_by_asc(task::Column::CreatedAt)
            .all(conn)
            .await?)
    }

    /// Get one page of a project's tasks matching a [`TaskQuery`], plus
    /// the total page count.
    pub async fn get_filtered<C>(
        conn: &C,
        project_id: &Uuid,
        query: &TaskQuery,
    ) -> Result<(Vec<task::Model>, u64)>
    where
        C: ConnectionTrait,
    {
        let paginator = task::Entity::find()
            .filter(task::Column::ProjectId.eq(*project_id))
            .filter(query.condition())
            .order_by(query.sort.column(), query.order.clone())
            .paginate(conn, query.page_size());
        let pages = paginator.num_pages().await?;
        let rows = paginator.fetch_page(query.page_index()).await?;
        Ok((rows, pages))
    }

    /// Count tasks assigned to a user.
    pub async fn count_for_assignee<C>(conn: &C, user_id: &Uuid) -> Result<u64>
    where
        C: ConnectionTrait,
    {
        Ok(task::Entity::find()
            .filter(task::Column::AssignedTo.eq(*user_id))
            .count(conn)
            .await?)
    }

    /// Insert a task into the database.
    pub async fn insert<C>(conn: &C, task: task::ActiveModel) -> Result<task::Model>
    where
        C: ConnectionTrait,
    {
        use sea_orm::ActiveModelTrait;
        Ok(task.insert(conn).await?)
    }

    /// Update a task in the database.
    pub async fn update<C>(conn: &C, task: task::ActiveModel) -> Result<task::Model>
    where
        C: ConnectionTrait,
    {
        use sea_orm::ActiveModelTrait;
        Ok(task.update(conn).await?)
    }

    /// Delete a task from the database.
    pub async fn delete<C>(conn: &C, task: task::Model) -> Result<()>
    where
        C: ConnectionTrait,
    {
        use sea_orm::ModelTrait;
        task.delete(conn).await?;
        Ok(())
    }

    /// Delete all tasks belonging to a project.
    pub async fn delete_for_project<C>(conn: &C, project_id: &Uuid) -> Result<()>
    where
        C: ConnectionTrait,
    {
        task::Entity::delete_many()
            .filter(task::Column::ProjectId.eq(*project_id))
            .exec(conn)
            .await?;
        Ok(())
    }
}
