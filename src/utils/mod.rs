//! Utility functions and helpers.

pub mod datetime;
