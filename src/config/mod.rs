use std::env;
use std::fmt;

use crate::workflows::collection::rewards::RewardConfig;

/// Top-level configuration for the workflow core, loaded from the
/// environment with sensible defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub upload: UploadConfig,
    pub rewards: RewardConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let user_folder =
            env::var("UPLOAD_USER_DIR").unwrap_or_else(|_| "uploads/user".to_string());
        let proof_folder =
            env::var("UPLOAD_PROOF_DIR").unwrap_or_else(|_| "uploads/proof".to_string());

        let mut rewards = RewardConfig::default();
        if let Ok(raw) = env::var("REWARD_BASE_POINTS") {
            rewards.base_points = raw
                .trim()
                .parse::<u32>()
                .map_err(|_| ConfigError::InvalidBasePoints)?;
        }

        Ok(Self {
            upload: UploadConfig {
                user_folder,
                proof_folder,
            },
            rewards,
        })
    }
}

/// Logical folders handed to the file-reference collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadConfig {
    pub user_folder: String,
    pub proof_folder: String,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            user_folder: "uploads/user".to_string(),
            proof_folder: "uploads/proof".to_string(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidBasePoints,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidBasePoints => {
                write!(f, "REWARD_BASE_POINTS must be a non-negative integer")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
