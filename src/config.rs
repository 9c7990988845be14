//! Configuration management and validation.
//!
//! Provides configuration structures for the upload service and the
//! `check` command, with defaults taken from [`crate::constants`] and
//! validation rules applied before anything starts.

use crate::constants::{DEFAULT_BIND_ADDRESS, DEFAULT_FILE_PATTERN, DEFAULT_MAX_BODY_BYTES};
use crate::error::{Result, ScreeningError};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::debug;

/// Settings of the HTTP upload service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServeConfig {
    /// Address and port to listen on
    pub bind: SocketAddr,

    /// Directory served under `/assets/`, if any
    pub assets_dir: Option<PathBuf>,

    /// Largest accepted upload body in bytes
    pub max_body_bytes: usize,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND_ADDRESS
                .parse()
                .unwrap_or_else(|_| SocketAddr::from(([127, 0, 0, 1], 9000))),
            assets_dir: None,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl ServeConfig {
    /// Validate settings before the listener is bound
    pub fn validate(&self) -> Result<()> {
        if self.max_body_bytes == 0 {
            return Err(ScreeningError::configuration(
                "max_body_bytes must be greater than 0",
            ));
        }

        if let Some(dir) = &self.assets_dir {
            if !dir.is_dir() {
                return Err(ScreeningError::configuration(format!(
                    "assets directory does not exist: {}",
                    dir.display()
                )));
            }
        }

        debug!("Serve configuration validated: {:?}", self);
        Ok(())
    }
}

/// Settings of the `check` command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckConfig {
    /// Files or directories to check
    pub paths: Vec<PathBuf>,

    /// File name glob applied while walking directories
    pub pattern: String,

    /// Stop at the first failing file
    pub fail_fast: bool,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            paths: Vec::new(),
            pattern: DEFAULT_FILE_PATTERN.to_string(),
            fail_fast: false,
        }
    }
}

impl CheckConfig {
    pub fn validate(&self) -> Result<()> {
        if self.paths.is_empty() {
            return Err(ScreeningError::configuration("at least one path is required"));
        }

        glob::Pattern::new(&self.pattern).map_err(|e| {
            ScreeningError::configuration(format!("invalid file pattern '{}': {}", self.pattern, e))
        })?;

        for path in &self.paths {
            if !path.exists() {
                return Err(ScreeningError::configuration(format!(
                    "path does not exist: {}",
                    path.display()
                )));
            }
        }

        Ok(())
    }

    /// Compiled file name pattern; call [`CheckConfig::validate`] first
    pub fn file_pattern(&self) -> Result<glob::Pattern> {
        glob::Pattern::new(&self.pattern).map_err(|e| {
            ScreeningError::configuration(format!("invalid file pattern '{}': {}", self.pattern, e))
        })
    }
}
