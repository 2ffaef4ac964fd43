//! Project repository for database operations.

use anyhow::Result;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::entities::project;

/// Repository for project-related database operations.
pub struct ProjectRepository;

impl ProjectRepository {
    /// Get a single project by id.
    pub async fn get_by_id<C>(conn: &C, id: &Uuid) -> Result<Option<project::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(project::Entity::find()
            .filter(project::Column::Id.eq(*id))
            .one(conn)
            .await?)
    }

    /// Get all projects for a team.
    pub async fn get_for_team<C>(conn: &C, team_id: &Uuid) -> Result<Vec<project::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(project::Entity::find()
            .filter(project::Column::TeamId.eq(*team_id))
            .order_by_asc(project::Column::CreatedAt)
            .all(conn)
            .await?)
    }

    /// Count projects for a team.
    pub async fn count_for_team<C>(conn: &C, team_id: &Uuid) -> Result<u64>
    where
        C: ConnectionTrait,
    {
        Ok(project::Entity::find()
            .filter(project::Column::TeamId.eq(*team_id))
            .count(conn)
            .await?)
    }

    /// Get one page of projects plus the total page count.
    ///
    /// `page` is zero-based.
    pub async fn get_page<C>(
        conn: &C,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<project::Model>, u64)>
    where
        C: ConnectionTrait,
    {
        let paginator = project::Entity::find()
            .order_by_asc(project::Column::CreatedAt)
            .paginate(conn, per_page.max(1));
        let pages = paginator.num_pages().await?;
        let rows = paginator.fetch_page(page).await?;
        Ok((rows, pages))
    }

    /// Insert a project into the database.
    pub async fn insert<C>(conn: &C, project: project::ActiveModel) -> Result<project::Model>
    where
        C: ConnectionTrait,
    {
        use sea_orm::ActiveModelTrait;
        Ok(project.insert(conn).await?)
    }

    /// Update a project in the database.
    pub async fn update<C>(conn: &C, project: project::ActiveModel) -> Result<project::Model>
    where
        C: ConnectionTrait,
    {
        use sea_orm::ActiveModelTrait;
        Ok(project.update(conn).await?)
    }

    /// Delete a project from the database.
    pub async fn delete<C>(conn: &C, project: project::Model) -> Result<()>
    where
        C: ConnectionTrait,
    {
        use sea_orm::ModelTrait;
        project.delete(conn).await?;
        Ok(())
    }
}
