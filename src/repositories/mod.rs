//! Repository layer for database operations.
//!
//! This module provides repository structs that encapsulate database queries
//! and operations, following the Data Mapper pattern recommended by SeaORM.
//! Repositories keep entities as pure data models while providing reusable
//! database access methods.

pub mod note;
pub mod project;
pub mod subtask;
pub mod task;
pub mod team;
pub mod user;

pub use note::NoteRepository;
pub use project::ProjectRepository;
pub use subtask::SubtaskRepository;
pub use task::TaskRepository;
pub use team::TeamRepository;
pub use user::UserRepository;
