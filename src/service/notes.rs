//! Note operations.
//!
//! Notes hold a rich-text editor document serialized as JSON. Content
//! updates are validated with serde_json before touching storage; tags
//! are stored as a JSON array of names.

use anyhow::Result;
use sea_orm::ActiveValue::Set;
use uuid::Uuid;

use crate::constants::{
    MSG_AUTHOR_NOT_FOUND, MSG_CREATE_NOTE_FAILED, MSG_DELETE_NOTE_FAILED, MSG_EMPTY_NOTE_TITLE,
    MSG_INVALID_NOTE_CONTENT, MSG_NOTE_NOT_FOUND, MSG_UPDATE_NOTE_FAILED,
};
use crate::entities::note;
use crate::repositories::{NoteRepository, UserRepository};
use crate::service::{invalid, not_found, ActionResult, AppService, ServiceError};
use crate::utils::datetime;

/// A note with its tags decoded.
#[derive(Clone, Debug)]
pub struct NoteView {
    pub id: Uuid,
    pub title: String,
    pub content: Option<String>,
    pub tags: Vec<String>,
    pub created_at: String,
}

impl From<note::Model> for NoteView {
    fn from(model: note::Model) -> Self {
        let tags = serde_json::from_str(&model.tags).unwrap_or_default();
        Self {
            id: model.id,
            title: model.title,
            content: model.content,
            tags,
            created_at: model.created_at,
        }
    }
}

impl AppService {
    /// Create an empty note titled "Untitled" for an author.
    pub async fn create_note(&self, author_id: Uuid) -> ActionResult {
        match self.create_note_inner(author_id).await {
            Ok(id) => ActionResult::created("Note created successfully.", id),
            Err(err) => Self::failure("create note", MSG_CREATE_NOTE_FAILED, err),
        }
    }

    async fn create_note_inner(&self, author_id: Uuid) -> Result<Uuid, ServiceError> {
        let storage = self.storage().lock().await;
        UserRepository::get_by_id(&storage.conn, &author_id)
            .await?
            .ok_or_else(|| not_found(MSG_AUTHOR_NOT_FOUND))?;

        let created = NoteRepository::insert(
            &storage.conn,
            note::ActiveModel {
                id: Set(Uuid::new_v4()),
                title: Set("Untitled".to_string()),
                content: Set(None),
                tags: Set("[]".to_string()),
                author_id: Set(author_id),
                created_at: Set(datetime::now_rfc3339()),
            },
        )
        .await?;
        Ok(created.id)
    }

    /// Rename a note.
    pub async fn update_note_title(&self, note_id: Uuid, title: &str) -> ActionResult {
        match self.update_note_title_inner(note_id, title).await {
            Ok(()) => ActionResult::ok("Title updated successfully."),
            Err(err) => Self::failure("update note title", MSG_UPDATE_NOTE_FAILED, err),
        }
    }

    async fn update_note_title_inner(&self, note_id: Uuid, title: &str) -> Result<(), ServiceError> {
        if title.trim().is_empty() {
            return Err(invalid(MSG_EMPTY_NOTE_TITLE));
        }

        let storage = self.storage().lock().await;
        let note = NoteRepository::get_by_id(&storage.conn, &note_id)
            .await?
            .ok_or_else(|| not_found(MSG_NOTE_NOT_FOUND))?;

        let mut active: note::ActiveModel = note.into();
        active.title = Set(title.trim().to_string());
        NoteRepository::update(&storage.conn, active).await?;
        Ok(())
    }

    /// Replace a note's document content with a new JSON document.
    pub async fn update_note_content(&self, note_id: Uuid, content: &str) -> ActionResult {
        match self.update_note_content_inner(note_id, content).await {
            Ok(()) => ActionResult::ok("Content updated successfully."),
            Err(err) => Self::failure("update note content", MSG_UPDATE_NOTE_FAILED, err),
        }
    }

    async fn update_note_content_inner(
        &self,
        note_id: Uuid,
        content: &str,
    ) -> Result<(), ServiceError> {
        if serde_json::from_str::<serde_json::Value>(content).is_err() {
            return Err(invalid(MSG_INVALID_NOTE_CONTENT));
        }

        let storage = self.storage().lock().await;
        let note = NoteRepository::get_by_id(&storage.conn, &note_id)
            .await?
            .ok_or_else(|| not_found(MSG_NOTE_NOT_FOUND))?;

        let mut active: note::ActiveModel = note.into();
        active.content = Set(Some(content.to_string()));
        NoteRepository::update(&storage.conn, active).await?;
        Ok(())
    }

    /// Replace a note's tag list.
    pub async fn update_note_tags(&self, note_id: Uuid, tags: &[String]) -> ActionResult {
        match self.update_note_tags_inner(note_id, tags).await {
            Ok(()) => ActionResult::ok("Tags updated successfully."),
            Err(err) => Self::failure("update note tags", MSG_UPDATE_NOTE_FAILED, err),
        }
    }

    async fn update_note_tags_inner(
        &self,
        note_id: Uuid,
        tags: &[String],
    ) -> Result<(), ServiceError> {
        let storage = self.storage().lock().await;
        let note = NoteRepository::get_by_id(&storage.conn, &note_id)
            .await?
            .ok_or_else(|| not_found(MSG_NOTE_NOT_FOUND))?;

        let encoded = serde_json::to_string(tags).map_err(anyhow::Error::from)?;
        let mut active: note::ActiveModel = note.into();
        active.tags = Set(encoded);
        NoteRepository::update(&storage.conn, active).await?;
        Ok(())
    }

    /// Delete a note.
    pub async fn delete_note(&self, note_id: Uuid) -> ActionResult {
        match self.delete_note_inner(note_id).await {
            Ok(()) => ActionResult::ok("Note deleted successfully."),
            Err(err) => Self::failure("delete note", MSG_DELETE_NOTE_FAILED, err),
        }
    }

    async fn delete_note_inner(&self, note_id: Uuid) -> Result<(), ServiceError> {
        let storage = self.storage().lock().await;
        let note = NoteRepository::get_by_id(&storage.conn, &note_id)
            .await?
            .ok_or_else(|| not_found(MSG_NOTE_NOT_FOUND))?;
        NoteRepository::delete(&storage.conn, note).await?;
        Ok(())
    }

    /// Get a single note with decoded tags.
    pub async fn fetch_note(&self, note_id: Uuid) -> Result<NoteView, ServiceError> {
        let storage = self.storage().lock().await;
        let note = NoteRepository::get_by_id(&storage.conn, &note_id)
            .await?
            .ok_or_else(|| not_found(MSG_NOTE_NOT_FOUND))?;
        Ok(note.into())
    }

    /// Get all notes by an author, newest first.
    pub async fn fetch_notes(&self, author_id: Uuid) -> Result<Vec<NoteView>> {
        let storage = self.storage().lock().await;
        let notes = NoteRepository::get_for_author(&storage.conn, &author_id).await?;
        Ok(notes.into_iter().map(NoteView::from).collect())
    }
}
