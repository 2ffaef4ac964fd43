//! Task and subtask operations, including completion counter propagation.
//!
//! The counter rules: `Task.total_sub_tasks` / `completed_sub_tasks`
//! mirror the task's subtask set, and `Project.completed_tasks` counts
//! the project's tasks that are fully completed (all of at least one
//! subtask done). A toggle recomputes `completed_sub_tasks` from the
//! sibling set rather than incrementing blindly, then adjusts the
//! project counter only when the task crossed the fully-completed
//! boundary. Adding a subtask to a fully-completed task demotes it, so
//! the project counter drops immediately instead of waiting for the
//! next toggle.

use anyhow::Result;
use sea_orm::{ActiveValue::Set, ConnectionTrait, TransactionTrait};
use uuid::Uuid;

use crate::constants::{
    MSG_ASSIGNEE_NOT_FOUND, MSG_CREATE_SUBTASK_FAILED, MSG_CREATE_TASK_FAILED,
    MSG_DELETE_TASK_FAILED, MSG_EMPTY_SUBTASK_TITLE, MSG_EMPTY_TASK_TITLE, MSG_INVALID_DUE_DATE,
    MSG_PROJECT_NOT_FOUND, MSG_SUBTASK_NOT_FOUND, MSG_TASK_NOT_FOUND, MSG_TOGGLE_SUBTASK_FAILED,
};
use crate::entities::{project, subtask, task};
use crate::filter::TaskQuery;
use crate::progress::{completion_delta, Progress};
use crate::repositories::{ProjectRepository, SubtaskRepository, TaskRepository, UserRepository};
use crate::service::{invalid, not_found, ActionResult, AppService, ServiceError};
use crate::utils::datetime;

/// Input for creating a task.
#[derive(Clone, Debug)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub priority: String,
    pub status: String,
    pub assigned_to: Uuid,
}

impl AppService {
    /// Create a task under a project and bump the project's task count.
    pub async fn create_task(&self, project_id: Uuid, input: NewTask) -> ActionResult {
        match self.create_task_inner(project_id, input).await {
            Ok(created) => ActionResult::created(
                format!("Task '{}' created successfully.", created.title),
                created.id,
            ),
            Err(err) => Self::failure("create task", MSG_CREATE_TASK_FAILED, err),
        }
    }

    async fn create_task_inner(
        &self,
        project_id: Uuid,
        input: NewTask,
    ) -> Result<task::Model, ServiceError> {
        if input.title.trim().is_empty() {
            return Err(invalid(MSG_EMPTY_TASK_TITLE));
        }
        if let Some(due) = &input.due_date {
            if datetime::parse_date(due).is_err() {
                return Err(invalid(MSG_INVALID_DUE_DATE));
            }
        }

        let storage = self.storage().lock().await;
        let txn = storage.conn.begin().await?;

        let project = ProjectRepository::get_by_id(&txn, &project_id)
            .await?
            .ok_or_else(|| not_found(MSG_PROJECT_NOT_FOUND))?;
        UserRepository::get_by_id(&txn, &input.assigned_to)
            .await?
            .ok_or_else(|| not_found(MSG_ASSIGNEE_NOT_FOUND))?;

        let created = TaskRepository::insert(
            &txn,
            task::ActiveModel {
                id: Set(Uuid::new_v4()),
                title: Set(input.title.trim().to_string()),
                description: Set(input.description),
                due_date: Set(input.due_date),
                priority: Set(input.priority),
                status: Set(input.status),
                project_id: Set(project.id),
                assigned_to: Set(input.assigned_to),
                total_sub_tasks: Set(0),
                completed_sub_tasks: Set(0),
                created_at: Set(datetime::now_rfc3339()),
            },
        )
        .await?;

        apply_project_delta(&txn, &project_id, 1, 0).await?;

        txn.commit().await?;
        Ok(created)
    }

    /// Delete a task with its subtasks and settle the project counters.
    pub async fn delete_task(&self, task_id: Uuid) -> ActionResult {
        match self.delete_task_inner(task_id).await {
            Ok(title) => ActionResult::ok(format!("Task '{title}' was successfully deleted.")),
            Err(err) => Self::failure("delete task", MSG_DELETE_TASK_FAILED, err),
        }
    }

    async fn delete_task_inner(&self, task_id: Uuid) -> Result<String, ServiceError> {
        let storage = self.storage().lock().await;
        let txn = storage.conn.begin().await?;

        let task = TaskRepository::get_by_id(&txn, &task_id)
            .await?
            .ok_or_else(|| not_found(MSG_TASK_NOT_FOUND))?;

        // Captured before the delete: a fully-completed task leaving the
        // project takes one completed slot with it.
        let was_full = Progress::new(task.total_sub_tasks, task.completed_sub_tasks).is_full();
        let project_id = task.project_id;
        let title = task.title.clone();

        SubtaskRepository::delete_for_task(&txn, &task_id).await?;
        TaskRepository::delete(&txn, task).await?;
        apply_project_delta(&txn, &project_id, -1, if was_full { -1 } else { 0 }).await?;

        txn.commit().await?;
        Ok(title)
    }

    /// Add an incomplete subtask to a task.
    pub async fn add_subtask(&self, task_id: Uuid, title: &str) -> ActionResult {
        match self.add_subtask_inner(task_id, title).await {
            Ok(created) => ActionResult::created("Subtask added successfully.", created.id),
            Err(err) => Self::failure("add subtask", MSG_CREATE_SUBTASK_FAILED, err),
        }
    }

    async fn add_subtask_inner(
        &self,
        task_id: Uuid,
        title: &str,
    ) -> Result<subtask::Model, ServiceError> {
        if title.trim().is_empty() {
            return Err(invalid(MSG_EMPTY_SUBTASK_TITLE));
        }

        let storage = self.storage().lock().await;
        let txn = storage.conn.begin().await?;

        let task = TaskRepository::get_by_id(&txn, &task_id)
            .await?
            .ok_or_else(|| not_found(MSG_TASK_NOT_FOUND))?;

        let created = SubtaskRepository::insert(
            &txn,
            subtask::ActiveModel {
                id: Set(Uuid::new_v4()),
                title: Set(title.trim().to_string()),
                completed: Set(false),
                task_id: Set(task.id),
                created_at: Set(datetime::now_rfc3339()),
            },
        )
        .await?;

        let before = Progress::new(task.total_sub_tasks, task.completed_sub_tasks);
        let after = Progress::new(before.total + 1, before.completed);

        let project_id = task.project_id;
        let mut active: task::ActiveModel = task.into();
        active.total_sub_tasks = Set(after.total);
        TaskRepository::update(&txn, active).await?;

        // Growing the denominator demotes a fully-completed task.
        let delta = completion_delta(before, after);
        if delta != 0 {
            apply_project_delta(&txn, &project_id, 0, delta).await?;
        }

        txn.commit().await?;
        Ok(created)
    }

    /// Set a subtask's completion flag and propagate counter changes.
    pub async fn toggle_subtask(&self, subtask_id: Uuid, completed: bool) -> ActionResult {
        match self.toggle_subtask_inner(subtask_id, completed).await {
            Ok(()) => ActionResult::ok("Subtask updated successfully."),
            Err(err) => Self::failure("toggle subtask", MSG_TOGGLE_SUBTASK_FAILED, err),
        }
    }

    async fn toggle_subtask_inner(
        &self,
        subtask_id: Uuid,
        completed: bool,
    ) -> Result<(), ServiceError> {
        let storage = self.storage().lock().await;
        let txn = storage.conn.begin().await?;

        let subtask = SubtaskRepository::get_by_id(&txn, &subtask_id)
            .await?
            .ok_or_else(|| not_found(MSG_SUBTASK_NOT_FOUND))?;
        let task = TaskRepository::get_by_id(&txn, &subtask.task_id)
            .await?
            .ok_or_else(|| not_found(MSG_TASK_NOT_FOUND))?;

        let before = Progress::new(task.total_sub_tasks, task.completed_sub_tasks);

        let mut active_subtask: subtask::ActiveModel = subtask.into();
        active_subtask.completed = Set(completed);
        SubtaskRepository::update(&txn, active_subtask).await?;

        // Recompute from the sibling set so any prior drift self-heals.
        let done = SubtaskRepository::count_completed(&txn, &task.id).await?;
        let done = i32::try_from(done).unwrap_or(i32::MAX);
        let after = Progress::new(before.total, done);

        let project_id = task.project_id;
        let mut active_task: task::ActiveModel = task.into();
        active_task.completed_sub_tasks = Set(after.completed);
        TaskRepository::update(&txn, active_task).await?;

        let delta = completion_delta(before, after);
        if delta != 0 {
            apply_project_delta(&txn, &project_id, 0, delta).await?;
        }

        txn.commit().await?;
        Ok(())
    }

    /// Get a single task.
    pub async fn fetch_task(&self, task_id: Uuid) -> Result<task::Model, ServiceError> {
        let storage = self.storage().lock().await;
        TaskRepository::get_by_id(&storage.conn, &task_id)
            .await?
            .ok_or_else(|| not_found(MSG_TASK_NOT_FOUND))
    }

    /// Get all subtasks of a task, oldest first.
    pub async fn fetch_subtasks(&self, task_id: Uuid) -> Result<Vec<subtask::Model>> {
        let storage = self.storage().lock().await;
        SubtaskRepository::get_for_task(&storage.conn, &task_id).await
    }

    /// Get one page of a project's tasks matching a query, plus the
    /// total page count.
    pub async fn fetch_tasks(
        &self,
        project_id: Uuid,
        query: &TaskQuery,
    ) -> Result<(Vec<task::Model>, u64)> {
        let storage = self.storage().lock().await;
        TaskRepository::get_filtered(&storage.conn, &project_id, query).await
    }
}

/// Apply counter deltas to a project, clamping into valid ranges
/// (`total_tasks >= 0`, `0 <= completed_tasks <= total_tasks`).
async fn apply_project_delta<C>(
    conn: &C,
    project_id: &Uuid,
    total_delta: i32,
    completed_delta: i32,
) -> Result<(), ServiceError>
where
    C: ConnectionTrait,
{
    let project = ProjectRepository::get_by_id(conn, project_id)
        .await?
        .ok_or_else(|| not_found(MSG_PROJECT_NOT_FOUND))?;

    let total = (project.total_tasks + total_delta).max(0);
    let completed = (project.completed_tasks + completed_delta).clamp(0, total);

    let mut active: project::ActiveModel = project.into();
    active.total_tasks = Set(total);
    active.completed_tasks = Set(completed);
    ProjectRepository::update(conn, active).await?;
    Ok(())
}
