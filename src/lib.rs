//! Venturist - project, task and team management core
//!
//! This library provides the data layer and business rules for a project
//! management application: users, teams, projects, tasks with subtask
//! checklists, and rich-text notes. Completion is tracked with aggregate
//! counters (`Task.completed_sub_tasks`, `Project.completed_tasks`) that
//! the service layer keeps consistent as subtasks are added, toggled and
//! deleted.
//!
//! # Modules
//!
//! The library is organized into several key modules:
//!
//! * [`config`] - Application configuration management
//! * [`storage`] - SQLite database and data persistence
//! * [`service`] - Business operations and counter propagation
//! * [`progress`] - Task completion state machine
//! * [`filter`] - Typed task query filters, sorting and pagination
//! * [`mailer`] - Mail delivery abstraction used by OTP verification

/// Configuration module for managing application settings
pub mod config;

/// Application constants and default values
pub mod constants;

/// SeaORM entity models for database tables
pub mod entities;

/// Typed filter predicates for task queries
pub mod filter;

/// Logging setup for debugging and error tracking
pub mod logger;

/// Mail delivery abstraction for OTP codes
pub mod mailer;

/// Task completion state machine and transition rules
pub mod progress;

/// Repository layer for database operations
pub mod repositories;

/// Service layer owning business rules and counter propagation
pub mod service;

/// Local storage layer backed by SQLite
pub mod storage;

/// Utility functions for date/time handling and other helpers
pub mod utils;

// Re-export entity models for convenient access
pub use entities::{note, project, subtask, task, team, team_member, user};
