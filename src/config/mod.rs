//! Configuration module for moodmix
//!
//! This module contains the user settings and path management.

mod paths;
mod user_config;

pub use paths::Paths;
pub use user_config::UserConfig;
