//! Path management for moodmix
//!
//! This module resolves the directory holding the settings file.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Filesystem locations used by the application
#[derive(Debug, Clone)]
pub struct Paths {
    /// Config directory path
    config_dir: PathBuf,
}

impl Paths {
    /// Resolve paths and create the config directory
    ///
    /// An explicit override wins; otherwise the platform config directory
    /// for `moodmix` is used, falling back to `./.moodmix`.
    pub fn new(config_override: Option<PathBuf>) -> Result<Self> {
        let config_dir = match config_override {
            Some(path) => path,
            None => directories::ProjectDirs::from("", "", "moodmix")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .unwrap_or_else(|| PathBuf::from(".moodmix")),
        };

        let paths = Self { config_dir };
        paths.create_directories()?;

        Ok(paths)
    }

    fn create_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.config_dir).with_context(|| {
            format!("Failed to create config directory {:?}", self.config_dir)
        })
    }

    /// Get the config directory
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Get the settings file path
    pub fn settings_path(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_paths_creation() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("nested").join("moodmix");

        let paths = Paths::new(Some(root.clone())).unwrap();

        assert!(paths.config_dir().exists());
        assert_eq!(paths.settings_path(), root.join("settings.json"));
    }
}
