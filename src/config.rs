//! Configuration management for Venturist
//!
//! This module handles loading, parsing, and validation of configuration files.

use crate::constants::{
    DEFAULT_DATABASE_URL, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, OTP_DEFAULT_TTL_MINUTES,
    OTP_MAX_TTL_MINUTES,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub otp: OtpConfig,
    pub pagination: PaginationConfig,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite connection URL (e.g. "sqlite:///var/lib/venturist/venturist.db?mode=rwc")
    pub url: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// Enable logging
    pub enabled: bool,
    /// Optional log file path; stderr only when unset
    pub file: Option<PathBuf>,
}

/// One-time password policy
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OtpConfig {
    /// Minutes an emailed verification code stays valid
    pub ttl_minutes: i64,
    /// Sender name used in verification mails
    pub sender: String,
}

/// Pagination defaults for table views
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    /// Rows per page when the caller does not specify a page size
    pub default_page_size: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
        }
    }
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            ttl_minutes: OTP_DEFAULT_TTL_MINUTES,
            sender: "Venturist".to_string(),
        }
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Config {
    /// Load configuration from file or return defaults
    pub fn load() -> Result<Self> {
        let config_path = Self::find_config_file()?;

        if let Some(path) = config_path {
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Find configuration file in order of precedence
    fn find_config_file() -> Result<Option<PathBuf>> {
        // 1. Check current directory
        let current_dir_config = PathBuf::from("venturist.toml");
        if current_dir_config.exists() {
            return Ok(Some(current_dir_config));
        }

        // 2. Check XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("venturist").join("config.toml");
            if xdg_config.exists() {
                return Ok(Some(xdg_config));
            }
        }

        Ok(None)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.database.url.trim().is_empty() {
            anyhow::bail!("database.url cannot be empty");
        }

        if self.otp.ttl_minutes < 1 || self.otp.ttl_minutes > OTP_MAX_TTL_MINUTES {
            anyhow::bail!(
                "otp.ttl_minutes must be between 1 and {}, got {}",
                OTP_MAX_TTL_MINUTES,
                self.otp.ttl_minutes
            );
        }

        if self.otp.sender.trim().is_empty() {
            anyhow::bail!("otp.sender cannot be empty");
        }

        if self.pagination.default_page_size < 1 || self.pagination.default_page_size > MAX_PAGE_SIZE
        {
            anyhow::bail!(
                "pagination.default_page_size must be between 1 and {}, got {}",
                MAX_PAGE_SIZE,
                self.pagination.default_page_size
            );
        }

        Ok(())
    }
}
