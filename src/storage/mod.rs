//! Local storage module for data persistence
//!
//! This module provides the SQLite-backed database connection used by the
//! repository and service layers:
//! - Users
//! - Teams and team membership
//! - Projects
//! - Tasks and subtasks
//! - Notes

pub mod db;

pub use db::LocalStorage;
