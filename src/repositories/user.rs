//! User repository for database operations.

use anyhow::Result;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::entities::user;

/// Repository for user-related database operations.
pub struct UserRepository;

impl UserRepository {
    /// Get a single user by id.
    pub async fn get_by_id<C>(conn: &C, id: &Uuid) -> Result<Option<user::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(user::Entity::find()
            .filter(user::Column::Id.eq(*id))
            .one(conn)
            .await?)
    }

    /// Get a single user by email address.
    pub async fn get_by_email<C>(conn: &C, email: &str) -> Result<Option<user::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(conn)
            .await?)
    }

    /// Get all users with a given role.
    pub async fn get_by_role<C>(conn: &C, role: &str) -> Result<Vec<user::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(user::Entity::find()
            .filter(user::Column::Role.eq(role))
            .order_by_asc(user::Column::LastName)
            .all(conn)
            .await?)
    }

    /// Get one page of users plus the total page count.
    ///
    /// `page` is zero-based.
    pub async fn get_page<C>(conn: &C, page: u64, per_page: u64) -> Result<(Vec<user::Model>, u64)>
    where
        C: ConnectionTrait,
    {
        let paginator = user::Entity::find()
            .order_by_asc(user::Column::CreatedAt)
            .paginate(conn, per_page.max(1));
        let pages = paginator.num_pages().await?;
        let rows = paginator.fetch_page(page).await?;
        Ok((rows, pages))
    }

    /// Insert a user into the database.
    pub async fn insert<C>(conn: &C, user: user::ActiveModel) -> Result<user::Model>
    where
        C: ConnectionTrait,
    {
        use sea_orm::ActiveModelTrait;
        Ok(user.insert(conn).await?)
    }

    /// Update a user in the database.
    pub async fn update<C>(conn: &C, user: user::ActiveModel) -> Result<user::Model>
    where
        C: ConnectionTrait,
    {
        use sea_orm::ActiveModelTrait;
        Ok(user.update(conn).await?)
    }

    /// Delete a user from the database.
    pub async fn delete<C>(conn: &C, user: user::Model) -> Result<()>
    where
        C: ConnectionTrait,
    {
        use sea_orm::ModelTrait;
        user.delete(conn).await?;
        Ok(())
    }
}
