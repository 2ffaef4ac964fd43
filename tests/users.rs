//! Registration and OTP email verification.

mod common;

use std::sync::Arc;

use common::{seed_team, seed_user, service, RecordingMailer};
use sea_orm::ActiveValue::Set;
use venturist::repositories::UserRepository;
use venturist::service::users::{NewUser, UserUpdate};
use venturist::user;

#[tokio::test]
async fn register_sends_otp_mail() {
    let (svc, _storage) = service().await;
    let mailer = RecordingMailer::default();
    let svc = svc.with_mailer(Arc::new(mailer.clone()));

    let result = svc
        .register(NewUser {
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            email: "grace@example.com".to_string(),
            role: "Team Lead".to_string(),
        })
        .await;
    assert!(result.success);

    let sent = mailer.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, "grace@example.com");
    assert_eq!(sent[0].1, "Verify Your Account");

    let user = svc.fetch_user_by_email("grace@example.com").await.unwrap();
    assert!(!user.email_verified);
    assert!(user.otp_code.is_some());
}

#[tokio::test]
async fn register_rejects_duplicate_email() {
    let (svc, _storage) = service().await;
    seed_user(&svc, "dup@example.com").await;

    let result = svc
        .register(NewUser {
            first_name: "Other".to_string(),
            last_name: "Person".to_string(),
            email: "dup@example.com".to_string(),
            role: "Team Member".to_string(),
        })
        .await;
    assert!(!result.success);
    assert_eq!(result.message, "User already exists with this email.");
}

#[tokio::test]
async fn register_rejects_invalid_email() {
    let (svc, _storage) = service().await;

    let result = svc
        .register(NewUser {
            first_name: "No".to_string(),
            last_name: "Email".to_string(),
            email: "not-an-address".to_string(),
            role: "Team Member".to_string(),
        })
        .await;
    assert!(!result.success);
    assert_eq!(result.message, "A valid email address is required.");
}

#[tokio::test]
async fn correct_otp_verifies_email_once() {
    let (svc, _storage) = service().await;
    let mailer = RecordingMailer::default();
    let svc = svc.with_mailer(Arc::new(mailer.clone()));

    seed_user(&svc, "ada@example.com").await;
    let code = mailer.last_otp();

    let result = svc.verify_otp("ada@example.com", &code).await;
    assert!(result.success, "{}", result.message);

    let user = svc.fetch_user_by_email("ada@example.com").await.unwrap();
    assert!(user.email_verified);
    assert!(user.otp_code.is_none());
    assert!(user.otp_expires_at.is_none());

    // Single-use: the same code is rejected the second time.
    let replay = svc.verify_otp("ada@example.com", &code).await;
    assert!(!replay.success);
    assert_eq!(replay.message, "The OTP you have entered is incorrect.");
}

#[tokio::test]
async fn wrong_otp_is_rejected() {
    let (svc, _storage) = service().await;
    let mailer = RecordingMailer::default();
    let svc = svc.with_mailer(Arc::new(mailer.clone()));

    seed_user(&svc, "ada@example.com").await;

    let result = svc.verify_otp("ada@example.com", "000000").await;
    assert!(!result.success);
    assert_eq!(result.message, "The OTP you have entered is incorrect.");

    let user = svc.fetch_user_by_email("ada@example.com").await.unwrap();
    assert!(!user.email_verified);
}

#[tokio::test]
async fn expired_otp_is_rejected() {
    let (svc, storage) = service().await;
    let mailer = RecordingMailer::default();
    let svc = svc.with_mailer(Arc::new(mailer.clone()));

    let id = seed_user(&svc, "ada@example.com").await;
    let code = mailer.last_otp();

    // Backdate the expiry directly in storage.
    {
        let storage = storage.lock().await;
        let user = UserRepository::get_by_id(&storage.conn, &id)
            .await
            .unwrap()
            .unwrap();
        let mut active: user::ActiveModel = user.into();
        active.otp_expires_at = Set(Some("2000-01-01T00:00:00+00:00".to_string()));
        UserRepository::update(&storage.conn, active).await.unwrap();
    }

    let result = svc.verify_otp("ada@example.com", &code).await;
    assert!(!result.success);
    assert_eq!(result.message, "The OTP you have entered is expired.");
}

#[tokio::test]
async fn resend_overwrites_previous_code() {
    let (svc, _storage) = service().await;
    let mailer = RecordingMailer::default();
    let svc = svc.with_mailer(Arc::new(mailer.clone()));

    seed_user(&svc, "ada@example.com").await;
    let first = mailer.last_otp();

    let resend = svc.send_otp("ada@example.com").await;
    assert!(resend.success);
    assert_eq!(resend.message, "OTP has been sent to your email.");
    let second = mailer.last_otp();

    if first != second {
        // The old code must be dead after the resend.
        let stale = svc.verify_otp("ada@example.com", &first).await;
        assert!(!stale.success);
    }
    let fresh = svc.verify_otp("ada@example.com", &second).await;
    assert!(fresh.success);
}

#[tokio::test]
async fn otp_for_unknown_email_fails() {
    let (svc, _storage) = service().await;

    let result = svc.send_otp("ghost@example.com").await;
    assert!(!result.success);
    assert_eq!(result.message, "User not found.");
}

#[tokio::test]
async fn update_user_changes_profile_fields() {
    let (svc, _storage) = service().await;
    let id = seed_user(&svc, "ada@example.com").await;

    let result = svc
        .update_user(
            id,
            UserUpdate {
                first_name: Some("Augusta".to_string()),
                phone: Some("555-0100".to_string()),
                ..Default::default()
            },
        )
        .await;
    assert!(result.success);

    let user = svc.fetch_user(id).await.unwrap();
    assert_eq!(user.first_name, "Augusta");
    assert_eq!(user.phone.as_deref(), Some("555-0100"));
    assert_eq!(user.last_name, "Lovelace");
}

#[tokio::test]
async fn team_lead_cannot_be_deleted() {
    let (svc, _storage) = service().await;
    let lead = seed_user(&svc, "lead@example.com").await;
    seed_team(&svc, lead).await;

    let result = svc.delete_user(lead).await;
    assert!(!result.success);
    assert!(result.message.contains("team lead"));
    assert!(svc.fetch_user(lead).await.is_ok());
}

#[tokio::test]
async fn delete_user_removes_their_notes() {
    let (svc, _storage) = service().await;
    let id = seed_user(&svc, "ada@example.com").await;

    svc.create_note(id).await;
    svc.create_note(id).await;
    assert_eq!(svc.fetch_notes(id).await.unwrap().len(), 2);

    let result = svc.delete_user(id).await;
    assert!(result.success);
    assert!(svc.fetch_user(id).await.is_err());
    assert!(svc.fetch_notes(id).await.unwrap().is_empty());
}

#[tokio::test]
async fn fetch_users_paginates() {
    let (svc, _storage) = service().await;
    for i in 0..5 {
        seed_user(&svc, &format!("user{i}@example.com")).await;
    }

    let page = svc.fetch_users(1, 2).await.unwrap();
    assert_eq!(page.users.len(), 2);
    assert_eq!(page.total_pages, 3);

    let last = svc.fetch_users(3, 2).await.unwrap();
    assert_eq!(last.users.len(), 1);
}
