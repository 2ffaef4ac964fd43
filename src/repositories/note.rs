//! Note repository for database operations.

use anyhow::Result;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::entities::note;

/// Repository for note-related database operations.
pub struct NoteRepository;

impl NoteRepository {
    /// Get a single note by id.
    pub async fn get_by_id<C>(conn: &C, id: &Uuid) -> Result<Option<note::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(note::Entity::find()
            .filter(note::Column::Id.eq(*id))
            .one(conn)
            .await?)
    }

    /// Get all notes by an author, newest first.
    pub async fn get_for_author<C>(conn: &C, author_id: &Uuid) -> Result<Vec<note::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(note::Entity::find()
            .filter(note::Column::AuthorId.eq(*author_id))
            .order_by_desc(note::Column::CreatedAt)
            .all(conn)
            .await?)
    }

    /// Insert a note into the database.
    pub async fn insert<C>(conn: &C, note: note::ActiveModel) -> Result<note::Model>
    where
        C: ConnectionTrait,
    {
        use sea_orm::ActiveModelTrait;
        Ok(note.insert(conn).await?)
    }

    /// Update a note in the database.
    pub async fn update<C>(conn: &C, note: note::ActiveModel) -> Result<note::Model>
    where
        C: ConnectionTrait,
    {
        use sea_orm::ActiveModelTrait;
        Ok(note.update(conn).await?)
    }

    /// Delete a note from the database.
    pub async fn delete<C>(conn: &C, note: note::Model) -> Result<()>
    where
        C: ConnectionTrait,
    {
        use sea_orm::ModelTrait;
        note.delete(conn).await?;
        Ok(())
    }

    /// Delete all notes by an author.
    pub async fn delete_for_author<C>(conn: &C, author_id: &Uuid) -> Result<()>
    where
        C: ConnectionTrait,
    {
        note::Entity::delete_many()
            .filter(note::Column::AuthorId.eq(*author_id))
            .exec(conn)
            .await?;
        Ok(())
    }
}
