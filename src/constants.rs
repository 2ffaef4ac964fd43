//! Constants used throughout the application
//!
//! This module centralizes magic values and user-facing message strings
//! to improve maintainability and consistency.

// Storage defaults
pub const DEFAULT_DATABASE_URL: &str = "sqlite::memory:";
pub const DATABASE_FILE_NAME: &str = "venturist.db";

// Pagination
/// Default page size for table views
pub const DEFAULT_PAGE_SIZE: u64 = 10;
/// Maximum page size accepted from callers
pub const MAX_PAGE_SIZE: u64 = 100;

// OTP policy
/// Default lifetime of a one-time password in minutes
pub const OTP_DEFAULT_TTL_MINUTES: i64 = 5;
/// Upper bound on the configurable OTP lifetime (24 hours)
pub const OTP_MAX_TTL_MINUTES: i64 = 1440;
/// Number of digits in a one-time password
pub const OTP_DIGITS: u32 = 6;

// Not-found messages
pub const MSG_PROJECT_NOT_FOUND: &str = "Project not found.";
pub const MSG_TASK_NOT_FOUND: &str = "Task not found.";
pub const MSG_SUBTASK_NOT_FOUND: &str = "Subtask not found.";
pub const MSG_ASSIGNEE_NOT_FOUND: &str = "Assignee not found.";
pub const MSG_TEAM_NOT_FOUND: &str = "Team not found.";
pub const MSG_TEAM_LEAD_NOT_FOUND: &str = "Team lead not found.";
pub const MSG_TEAM_MEMBER_NOT_FOUND: &str = "Team member not found.";
pub const MSG_NOTE_NOT_FOUND: &str = "Note not found.";
pub const MSG_USER_NOT_FOUND: &str = "User not found.";
pub const MSG_AUTHOR_NOT_FOUND: &str = "Author not found.";

// Validation messages
pub const MSG_EMPTY_TASK_TITLE: &str = "Task title cannot be empty.";
pub const MSG_EMPTY_SUBTASK_TITLE: &str = "Subtask title cannot be empty.";
pub const MSG_EMPTY_PROJECT_TITLE: &str = "Project title cannot be empty.";
pub const MSG_EMPTY_TEAM_NAME: &str = "Team name cannot be empty.";
pub const MSG_EMPTY_NOTE_TITLE: &str = "Note title cannot be empty.";
pub const MSG_INVALID_EMAIL: &str = "A valid email address is required.";
pub const MSG_INVALID_DUE_DATE: &str = "Due date must be in YYYY-MM-DD format.";
pub const MSG_INVALID_NOTE_CONTENT: &str = "Note content must be a valid JSON document.";
pub const MSG_USER_EXISTS: &str = "User already exists with this email.";
pub const MSG_TEAM_HAS_PROJECTS: &str =
    "Cannot delete the team because it still has projects assigned.";
pub const MSG_USER_IS_TEAM_LEAD: &str =
    "Cannot delete the user because they are a team lead. Please reassign the team lead before deletion.";

// OTP messages
pub const MSG_OTP_SENT: &str = "OTP has been sent to your email.";
pub const MSG_OTP_INCORRECT: &str = "The OTP you have entered is incorrect.";
pub const MSG_OTP_EXPIRED: &str = "The OTP you have entered is expired.";
pub const MSG_EMAIL_VERIFIED: &str = "Email verified successfully.";

// Generic failure messages surfaced when the storage layer errors out
pub const MSG_CREATE_TASK_FAILED: &str = "Failed to create the task.";
pub const MSG_DELETE_TASK_FAILED: &str = "An error occurred while trying to delete the task.";
pub const MSG_CREATE_SUBTASK_FAILED: &str = "Failed to create the subtask.";
pub const MSG_TOGGLE_SUBTASK_FAILED: &str = "Failed to update the subtask.";
pub const MSG_CREATE_PROJECT_FAILED: &str = "Failed to create the project.";
pub const MSG_UPDATE_PROJECT_FAILED: &str = "Failed to update the project.";
pub const MSG_DELETE_PROJECT_FAILED: &str = "Failed to delete the project.";
pub const MSG_CREATE_TEAM_FAILED: &str = "Failed to create team.";
pub const MSG_UPDATE_TEAM_FAILED: &str = "Failed to update team.";
pub const MSG_DELETE_TEAM_FAILED: &str = "Failed to delete team.";
pub const MSG_CREATE_NOTE_FAILED: &str = "An error occurred while creating the note.";
pub const MSG_UPDATE_NOTE_FAILED: &str = "An error occurred while updating the note.";
pub const MSG_DELETE_NOTE_FAILED: &str = "Failed to delete note.";
pub const MSG_REGISTER_FAILED: &str = "Failed to register user.";
pub const MSG_UPDATE_USER_FAILED: &str = "Failed to update user.";
pub const MSG_DELETE_USER_FAILED: &str = "Failed to delete user.";
pub const MSG_SEND_OTP_FAILED: &str = "An unexpected error occurred. Please try again.";
pub const MSG_VERIFY_OTP_FAILED: &str = "An error occurred while verifying the OTP.";
