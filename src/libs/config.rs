//! Runtime configuration.
//!
//! Read from JSON; every field has a default so an empty object is a valid
//! configuration. `GCHAT_CURRENT_USER` and `GCHAT_LOG` override the file.

use crate::libs::core::directory::Directory;
use crate::libs::core::models::CallKind;
use crate::libs::media::capture::DEFAULT_AUDIO_MIME_TYPE;
use crate::libs::models::DirectorySeed;
use crate::ValidationError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_LOG_FILTER: &str = "info,gchat_lib=debug";
pub const CURRENT_USER_ENV: &str = "GCHAT_CURRENT_USER";
pub const LOG_FILTER_ENV: &str = "GCHAT_LOG";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChatConfig {
    /// Acting user for group exit. Unset means exits are refused.
    pub current_user: Option<String>,
    pub seed_sample_data: bool,
    pub seed: Option<DirectorySeed>,
    pub audio_mime_type: String,
    pub default_call_kind: CallKind,
    pub log_filter: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            current_user: None,
            seed_sample_data: true,
            seed: None,
            audio_mime_type: DEFAULT_AUDIO_MIME_TYPE.to_string(),
            default_call_kind: CallKind::Audio,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ChatConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn apply_env(mut self) -> Self {
        self.apply_overrides(
            std::env::var(CURRENT_USER_ENV).ok(),
            std::env::var(LOG_FILTER_ENV).ok(),
        );
        self
    }

    fn apply_overrides(&mut self, current_user: Option<String>, log_filter: Option<String>) {
        if let Some(user) = current_user.filter(|u| !u.trim().is_empty()) {
            self.current_user = Some(user.trim().to_string());
        }
        if let Some(filter) = log_filter.filter(|f| !f.trim().is_empty()) {
            self.log_filter = filter;
        }
    }

    /// Sample data first (when enabled), then the configured seed. Name clashes are rejected.
    pub fn build_directory(&self) -> Result<Directory, ValidationError> {
        let mut directory = if self.seed_sample_data {
            Directory::sample()
        } else {
            Directory::new()
        };
        if let Some(seed) = &self.seed {
            for user in &seed.users {
                directory.add_user(user.into())?;
            }
            for group in &seed.groups {
                directory.add_group(group.into())?;
            }
        }
        Ok(directory)
    }
}
