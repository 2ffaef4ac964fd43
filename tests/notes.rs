//! Note CRUD and JSON content validation.

mod common;

use common::{seed_user, service};
use uuid::Uuid;

#[tokio::test]
async fn create_note_starts_untitled() {
    let (svc, _storage) = service().await;
    let author = seed_user(&svc, "ada@example.com").await;

    let result = svc.create_note(author).await;
    assert!(result.success);
    assert_eq!(result.message, "Note created successfully.");

    let note = svc.fetch_note(result.id.unwrap()).await.unwrap();
    assert_eq!(note.title, "Untitled");
    assert!(note.content.is_none());
    assert!(note.tags.is_empty());
}

#[tokio::test]
async fn create_note_requires_existing_author() {
    let (svc, _storage) = service().await;

    let result = svc.create_note(Uuid::new_v4()).await;
    assert!(!result.success);
    assert_eq!(result.message, "Author not found.");
}

#[tokio::test]
async fn title_and_content_updates() {
    let (svc, _storage) = service().await;
    let author = seed_user(&svc, "ada@example.com").await;
    let note = svc.create_note(author).await.id.unwrap();

    assert!(svc.update_note_title(note, "Meeting minutes").await.success);

    let document = r#"{"type":"doc","content":[{"type":"paragraph"}]}"#;
    assert!(svc.update_note_content(note, document).await.success);

    let view = svc.fetch_note(note).await.unwrap();
    assert_eq!(view.title, "Meeting minutes");
    assert_eq!(view.content.as_deref(), Some(document));
}

#[tokio::test]
async fn content_must_be_valid_json() {
    let (svc, _storage) = service().await;
    let author = seed_user(&svc, "ada@example.com").await;
    let note = svc.create_note(author).await.id.unwrap();

    let result = svc.update_note_content(note, "<p>not json</p>").await;
    assert!(!result.success);
    assert_eq!(result.message, "Note content must be a valid JSON document.");

    let view = svc.fetch_note(note).await.unwrap();
    assert!(view.content.is_none());
}

#[tokio::test]
async fn empty_title_is_rejected() {
    let (svc, _storage) = service().await;
    let author = seed_user(&svc, "ada@example.com").await;
    let note = svc.create_note(author).await.id.unwrap();

    let result = svc.update_note_title(note, "  ").await;
    assert!(!result.success);
    assert_eq!(result.message, "Note title cannot be empty.");
}

#[tokio::test]
async fn tags_round_trip() {
    let (svc, _storage) = service().await;
    let author = seed_user(&svc, "ada@example.com").await;
    let note = svc.create_note(author).await.id.unwrap();

    let tags = vec!["work".to_string(), "q3".to_string()];
    assert!(svc.update_note_tags(note, &tags).await.success);

    let view = svc.fetch_note(note).await.unwrap();
    assert_eq!(view.tags, tags);
}

#[tokio::test]
async fn fetch_notes_is_scoped_to_author() {
    let (svc, _storage) = service().await;
    let ada = seed_user(&svc, "ada@example.com").await;
    let grace = seed_user(&svc, "grace@example.com").await;

    svc.create_note(ada).await;
    svc.create_note(ada).await;
    svc.create_note(grace).await;

    assert_eq!(svc.fetch_notes(ada).await.unwrap().len(), 2);
    assert_eq!(svc.fetch_notes(grace).await.unwrap().len(), 1);
}

#[tokio::test]
async fn delete_note() {
    let (svc, _storage) = service().await;
    let author = seed_user(&svc, "ada@example.com").await;
    let note = svc.create_note(author).await.id.unwrap();

    let result = svc.delete_note(note).await;
    assert!(result.success);
    assert!(svc.fetch_note(note).await.is_err());

    let missing = svc.delete_note(note).await;
    assert!(!missing.success);
    assert_eq!(missing.message, "Note not found.");
}
