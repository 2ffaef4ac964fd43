//! Project operations.

use anyhow::Result;
use sea_orm::{ActiveValue::Set, TransactionTrait};
use uuid::Uuid;

use crate::constants::{
    MSG_CREATE_PROJECT_FAILED, MSG_DELETE_PROJECT_FAILED, MSG_EMPTY_PROJECT_TITLE,
    MSG_INVALID_DUE_DATE, MSG_PROJECT_NOT_FOUND, MSG_TEAM_NOT_FOUND, MSG_UPDATE_PROJECT_FAILED,
};
use crate::entities::project;
use crate::repositories::{ProjectRepository, SubtaskRepository, TaskRepository, TeamRepository};
use crate::service::{invalid, not_found, ActionResult, AppService, ServiceError};
use crate::utils::datetime;

/// Input for creating a project.
#[derive(Clone, Debug)]
pub struct NewProject {
    pub title: String,
    pub due_date: Option<String>,
    pub budget: Option<String>,
    pub priority: String,
    pub team_id: Uuid,
}

/// Field updates for a project; `None` leaves a field unchanged.
#[derive(Clone, Debug, Default)]
pub struct ProjectUpdate {
    pub title: Option<String>,
    pub due_date: Option<String>,
    pub budget: Option<String>,
    pub priority: Option<String>,
}

/// One page of projects.
#[derive(Clone, Debug)]
pub struct ProjectPage {
    pub projects: Vec<project::Model>,
    pub total_pages: u64,
}

impl AppService {
    /// Create a project for a team. The team lead becomes the project
    /// owner.
    pub async fn create_project(&self, input: NewProject) -> ActionResult {
        match self.create_project_inner(input).await {
            Ok(created) => ActionResult::created(
                format!("Project '{}' created successfully.", created.title),
                created.id,
            ),
            Err(err) => Self::failure("create project", MSG_CREATE_PROJECT_FAILED, err),
        }
    }

    async fn create_project_inner(
        &self,
        input: NewProject,
    ) -> Result<project::Model, ServiceError> {
        if input.title.trim().is_empty() {
            return Err(invalid(MSG_EMPTY_PROJECT_TITLE));
        }
        if let Some(due) = &input.due_date {
            if datetime::parse_date(due).is_err() {
                return Err(invalid(MSG_INVALID_DUE_DATE));
            }
        }

        let storage = self.storage().lock().await;
        let team = TeamRepository::get_by_id(&storage.conn, &input.team_id)
            .await?
            .ok_or_else(|| not_found(MSG_TEAM_NOT_FOUND))?;

        let created = ProjectRepository::insert(
            &storage.conn,
            project::ActiveModel {
                id: Set(Uuid::new_v4()),
                title: Set(input.title.trim().to_string()),
                due_date: Set(input.due_date),
                budget: Set(input.budget),
                priority: Set(input.priority),
                team_id: Set(team.id),
                user_id: Set(team.team_lead_id),
                total_tasks: Set(0),
                completed_tasks: Set(0),
                created_at: Set(datetime::now_rfc3339()),
            },
        )
        .await?;
        Ok(created)
    }

    /// Update a project's descriptive fields. Counters are untouched;
    /// only the propagation rules may write them.
    pub async fn update_project(&self, project_id: Uuid, update: ProjectUpdate) -> ActionResult {
        match self.update_project_inner(project_id, update).await {
            Ok(updated) => {
                ActionResult::ok(format!("Project '{}' updated successfully.", updated.title))
            }
            Err(err) => Self::failure("update project", MSG_UPDATE_PROJECT_FAILED, err),
        }
    }

    async fn update_project_inner(
        &self,
        project_id: Uuid,
        update: ProjectUpdate,
    ) -> Result<project::Model, ServiceError> {
        if let Some(title) = &update.title {
            if title.trim().is_empty() {
                return Err(invalid(MSG_EMPTY_PROJECT_TITLE));
            }
        }
        if let Some(due) = &update.due_date {
            if datetime::parse_date(due).is_err() {
                return Err(invalid(MSG_INVALID_DUE_DATE));
            }
        }

        let storage = self.storage().lock().await;
        let project = ProjectRepository::get_by_id(&storage.conn, &project_id)
            .await?
            .ok_or_else(|| not_found(MSG_PROJECT_NOT_FOUND))?;

        let mut active: project::ActiveModel = project.into();
        if let Some(title) = update.title {
            active.title = Set(title.trim().to_string());
        }
        if let Some(due_date) = update.due_date {
            active.due_date = Set(Some(due_date));
        }
        if let Some(budget) = update.budget {
            active.budget = Set(Some(budget));
        }
        if let Some(priority) = update.priority {
            active.priority = Set(priority);
        }

        let updated = ProjectRepository::update(&storage.conn, active).await?;
        Ok(updated)
    }

    /// Delete a project along with its tasks and their subtasks.
    pub async fn delete_project(&self, project_id: Uuid) -> ActionResult {
        match self.delete_project_inner(project_id).await {
            Ok(title) => ActionResult::ok(format!("Project '{title}' deleted successfully.")),
            Err(err) => Self::failure("delete project", MSG_DELETE_PROJECT_FAILED, err),
        }
    }

    async fn delete_project_inner(&self, project_id: Uuid) -> Result<String, ServiceError> {
        let storage = self.storage().lock().await;
        let txn = storage.conn.begin().await?;

        let project = ProjectRepository::get_by_id(&txn, &project_id)
            .await?
            .ok_or_else(|| not_found(MSG_PROJECT_NOT_FOUND))?;
        let title = project.title.clone();

        SubtaskRepository::delete_for_project(&txn, &project_id).await?;
        TaskRepository::delete_for_project(&txn, &project_id).await?;
        ProjectRepository::delete(&txn, project).await?;

        txn.commit().await?;
        Ok(title)
    }

    /// Get a single project.
    pub async fn fetch_project(&self, project_id: Uuid) -> Result<project::Model, ServiceError> {
        let storage = self.storage().lock().await;
        ProjectRepository::get_by_id(&storage.conn, &project_id)
            .await?
            .ok_or_else(|| not_found(MSG_PROJECT_NOT_FOUND))
    }

    /// Get one page of projects. `page` is 1-based.
    pub async fn fetch_projects(&self, page: u64, per_page: u64) -> Result<ProjectPage> {
        let storage = self.storage().lock().await;
        let (projects, total_pages) =
            ProjectRepository::get_page(&storage.conn, page.saturating_sub(1), per_page).await?;
        Ok(ProjectPage {
            projects,
            total_pages,
        })
    }
}
