//! User configuration for moodmix
//!
//! This module handles user-configurable settings stored in settings.json.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::Paths;
use crate::models::DisplayLanguage;

/// Prefix every usable online API key carries
const API_KEY_PREFIX: &str = "sk-";

/// User configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserConfig {
    /// Ask the online model for tags before the local rules
    #[serde(default)]
    pub use_online_ai: bool,

    /// API key for the online model
    #[serde(default)]
    pub ai_api_key: String,

    /// Chat-completion endpoint
    #[serde(default = "default_ai_endpoint")]
    pub ai_endpoint: String,

    /// Model name sent with each request
    #[serde(default = "default_ai_model")]
    pub ai_model: String,

    /// Upper bound on one online extraction, in seconds
    #[serde(default = "default_ai_timeout_secs")]
    pub ai_timeout_secs: u64,

    #[serde(default = "default_ai_temperature")]
    pub ai_temperature: f32,

    #[serde(default = "default_ai_max_tokens")]
    pub ai_max_tokens: u32,

    /// Language for generated titles, descriptions and tag labels
    #[serde(default)]
    pub display_language: DisplayLanguage,

    /// Match size when the caller does not ask for one
    #[serde(default = "default_limit")]
    pub default_limit: usize,

    /// Hard ceiling on any match size
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,

    #[serde(default = "default_min_match_score")]
    pub min_match_score: u32,

    /// Shuffle songs sharing a score
    #[serde(default = "default_true")]
    pub shuffle_ties: bool,

    /// Length of generated playlists
    #[serde(default = "default_playlist_length")]
    pub playlist_length: usize,

    /// Share of a playlist one artist may fill
    #[serde(default = "default_diversity_factor")]
    pub diversity_factor: f64,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            use_online_ai: false,
            ai_api_key: String::new(),
            ai_endpoint: default_ai_endpoint(),
            ai_model: default_ai_model(),
            ai_timeout_secs: default_ai_timeout_secs(),
            ai_temperature: default_ai_temperature(),
            ai_max_tokens: default_ai_max_tokens(),
            display_language: DisplayLanguage::default(),
            default_limit: default_limit(),
            max_limit: default_max_limit(),
            min_match_score: default_min_match_score(),
            shuffle_ties: true,
            playlist_length: default_playlist_length(),
            diversity_factor: default_diversity_factor(),
        }
    }
}

impl UserConfig {
    /// Load configuration from file, writing defaults when it is missing
    pub fn load(paths: &Paths) -> Result<Self> {
        let settings_path = paths.settings_path();

        if settings_path.exists() {
            let content =
                std::fs::read_to_string(&settings_path).context("Failed to read settings file")?;
            let config: UserConfig =
                serde_json::from_str(&content).context("Failed to parse settings file")?;

            Ok(config)
        } else {
            let config = Self::default();
            config.save(paths)?;
            Ok(config)
        }
    }

    /// Save configuration to file
    pub fn save(&self, paths: &Paths) -> Result<()> {
        let settings_path = paths.settings_path();

        let content = serde_json::to_string_pretty(self).context("Failed to serialize settings")?;
        std::fs::write(&settings_path, content).context("Failed to write settings file")?;

        Ok(())
    }

    /// Whether the online tag source can be used
    pub fn online_ai_configured(&self) -> bool {
        self.use_online_ai && self.ai_api_key.starts_with(API_KEY_PREFIX)
    }

    pub fn ai_timeout(&self) -> Duration {
        Duration::from_secs(self.ai_timeout_secs)
    }
}

// Default value functions for serde

fn default_true() -> bool {
    true
}

fn default_ai_endpoint() -> String {
    "https://api.siliconflow.cn/v1/chat/completions".to_string()
}

fn default_ai_model() -> String {
    "Qwen/Qwen2.5-7B-Instruct".to_string()
}

fn default_ai_timeout_secs() -> u64 {
    10
}

fn default_ai_temperature() -> f32 {
    0.7
}

fn default_ai_max_tokens() -> u32 {
    200
}

fn default_limit() -> usize {
    20
}

fn default_max_limit() -> usize {
    50
}

fn default_min_match_score() -> u32 {
    1
}

fn default_playlist_length() -> usize {
    15
}

fn default_diversity_factor() -> f64 {
    0.3
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = UserConfig::default();
        assert!(!config.use_online_ai);
        assert!(config.shuffle_ties);
        assert_eq!(config.default_limit, 20);
        assert_eq!(config.max_limit, 50);
        assert_eq!(config.playlist_length, 15);
        assert_eq!(config.display_language, DisplayLanguage::Zh);
        assert_eq!(config.ai_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: UserConfig =
            serde_json::from_str(r#"{"useOnlineAi": true, "displayLanguage": "en"}"#).unwrap();
        assert!(config.use_online_ai);
        assert_eq!(config.display_language, DisplayLanguage::En);
        assert_eq!(config.ai_model, "Qwen/Qwen2.5-7B-Instruct");
        assert_eq!(config.min_match_score, 1);
    }

    #[test]
    fn test_online_requires_enabled_flag_and_key() {
        let mut config = UserConfig::default();
        config.ai_api_key = "sk-abc".to_string();
        assert!(!config.online_ai_configured());

        config.use_online_ai = true;
        assert!(config.online_ai_configured());

        config.ai_api_key = "abc".to_string();
        assert!(!config.online_ai_configured());
    }

    #[test]
    fn test_load_creates_and_reads_back() {
        let temp_dir = TempDir::new().unwrap();
        let paths = Paths::new(Some(temp_dir.path().to_path_buf())).unwrap();

        let config = UserConfig::load(&paths).unwrap();
        assert!(paths.settings_path().exists());
        assert_eq!(config, UserConfig::default());

        let mut changed = config.clone();
        changed.playlist_length = 8;
        changed.save(&paths).unwrap();

        let reloaded = UserConfig::load(&paths).unwrap();
        assert_eq!(reloaded.playlist_length, 8);
    }
}
