//! Service layer owning the application's business rules.
//!
//! This module provides the [`AppService`] struct, the single entry point
//! for all mutating operations on users, teams, projects, tasks, subtasks
//! and notes. It is the only code path allowed to write the aggregate
//! completion counters (`Task.completed_sub_tasks`,
//! `Project.completed_tasks`); every multi-step counter update runs
//! inside one database transaction so the counters can never be observed
//! half-updated.
//!
//! Failures never escape a mutating operation: they are caught at the
//! boundary and converted to an [`ActionResult`] carrying a
//! human-readable message. Storage failures are logged and surfaced with
//! a generic message; not-found and validation failures surface their
//! specific message.

pub mod notes;
pub mod projects;
pub mod tasks;
pub mod teams;
pub mod users;

use std::sync::Arc;

use log::error;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::config::{Config, OtpConfig};
use crate::mailer::{LogMailer, Mailer, MailerError};
use crate::storage::LocalStorage;

/// Internal failure taxonomy for service operations.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// A referenced record does not exist. Carries the user-facing message.
    #[error("{0}")]
    NotFound(String),

    /// Input rejected before any storage call. Carries the user-facing message.
    #[error("{0}")]
    Validation(String),

    /// The underlying store failed; details are logged, not shown.
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl From<sea_orm::DbErr> for ServiceError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Storage(err.into())
    }
}

impl From<MailerError> for ServiceError {
    fn from(err: MailerError) -> Self {
        Self::Storage(err.into())
    }
}

/// Outcome of a mutating operation, shaped for direct display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionResult {
    pub success: bool,
    pub message: String,
    /// Id of the record the operation created, when it created one.
    pub id: Option<Uuid>,
}

impl ActionResult {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            id: None,
        }
    }

    pub fn created(message: impl Into<String>, id: Uuid) -> Self {
        Self {
            success: true,
            message: message.into(),
            id: Some(id),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            id: None,
        }
    }
}

/// Service that owns business operations over local storage.
///
/// Clone-friendly: all state is behind `Arc`. The storage mutex
/// serializes mutating operations, which together with per-operation
/// transactions keeps the completion counters consistent.
#[derive(Clone)]
pub struct AppService {
    storage: Arc<Mutex<LocalStorage>>,
    mailer: Arc<dyn Mailer>,
    otp: OtpConfig,
}

impl AppService {
    /// Create a service over the given storage, using the configured OTP
    /// policy and the log-only mailer.
    pub fn new(storage: Arc<Mutex<LocalStorage>>, config: &Config) -> Self {
        Self {
            storage,
            mailer: Arc::new(LogMailer),
            otp: config.otp.clone(),
        }
    }

    /// Replace the mail transport (e.g. a real SMTP mailer, or a
    /// recording stub in tests).
    pub fn with_mailer(mut self, mailer: Arc<dyn Mailer>) -> Self {
        self.mailer = mailer;
        self
    }

    pub(crate) fn storage(&self) -> &Arc<Mutex<LocalStorage>> {
        &self.storage
    }

    pub(crate) fn mailer(&self) -> &Arc<dyn Mailer> {
        &self.mailer
    }

    pub(crate) fn otp_config(&self) -> &OtpConfig {
        &self.otp
    }

    /// Convert an internal failure into the caller-facing result.
    ///
    /// `generic` replaces the message for storage failures, whose details
    /// belong in the log, not in a toast.
    pub(crate) fn failure(operation: &str, generic: &str, err: ServiceError) -> ActionResult {
        match err {
            ServiceError::NotFound(message) | ServiceError::Validation(message) => {
                ActionResult::fail(message)
            }
            ServiceError::Storage(cause) => {
                error!("{operation} failed: {cause:#}");
                ActionResult::fail(generic)
            }
        }
    }
}

pub(crate) fn not_found(message: &str) -> ServiceError {
    ServiceError::NotFound(message.to_string())
}

pub(crate) fn invalid(message: &str) -> ServiceError {
    ServiceError::Validation(message.to_string())
}
