//! Shared fixtures for integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex as StdMutex};

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use venturist::config::Config;
use venturist::mailer::{Mailer, MailerError};
use venturist::service::tasks::NewTask;
use venturist::service::teams::NewTeam;
use venturist::service::users::NewUser;
use venturist::service::AppService;
use venturist::storage::LocalStorage;

/// Mailer that records every message instead of delivering it.
#[derive(Clone, Default)]
pub struct RecordingMailer {
    pub sent: Arc<StdMutex<Vec<(String, String, String)>>>,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailerError> {
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), subject.to_string(), body.to_string()));
        Ok(())
    }
}

impl RecordingMailer {
    /// Pull the OTP code out of the most recent mail body.
    pub fn last_otp(&self) -> String {
        let sent = self.sent.lock().unwrap();
        let (_, _, body) = sent.last().expect("no mail was sent");
        body.lines()
            .find_map(|line| line.strip_prefix("Your OTP code: "))
            .expect("mail body has no OTP line")
            .to_string()
    }
}

/// Service over a fresh in-memory database, plus the storage handle for
/// direct database access in tests.
pub async fn service() -> (AppService, Arc<Mutex<LocalStorage>>) {
    let storage = Arc::new(Mutex::new(
        LocalStorage::new(true).await.expect("in-memory storage"),
    ));
    let service = AppService::new(storage.clone(), &Config::default());
    (service, storage)
}

/// Register a user and return their id.
pub async fn seed_user(service: &AppService, email: &str) -> Uuid {
    let result = service
        .register(NewUser {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: email.to_string(),
            role: "Team Member".to_string(),
        })
        .await;
    assert!(result.success, "seed_user failed: {}", result.message);
    result.id.expect("register returns an id")
}

/// Create a team led by the given user and return its id.
pub async fn seed_team(service: &AppService, lead: Uuid) -> Uuid {
    let result = service
        .create_team(NewTeam {
            team_name: "Core".to_string(),
            description: None,
            team_lead: lead,
            members: vec![lead],
        })
        .await;
    assert!(result.success, "seed_team failed: {}", result.message);
    result.id.expect("create_team returns an id")
}

/// Create a user, team and project; return (project_id, user_id).
pub async fn seed_project(service: &AppService) -> (Uuid, Uuid) {
    let user = seed_user(service, "lead@example.com").await;
    let team = seed_team(service, user).await;
    let result = service
        .create_project(venturist::service::projects::NewProject {
            title: "Apollo".to_string(),
            due_date: None,
            budget: None,
            priority: "High".to_string(),
            team_id: team,
        })
        .await;
    assert!(result.success, "seed_project failed: {}", result.message);
    (result.id.expect("create_project returns an id"), user)
}

/// Create a task under the project and return its id.
pub async fn seed_task(service: &AppService, project: Uuid, assignee: Uuid, title: &str) -> Uuid {
    let result = service
        .create_task(
            project,
            NewTask {
                title: title.to_string(),
                description: None,
                due_date: None,
                priority: "Medium".to_string(),
                status: "In Progress".to_string(),
                assigned_to: assignee,
            },
        )
        .await;
    assert!(result.success, "seed_task failed: {}", result.message);
    result.id.expect("create_task returns an id")
}
