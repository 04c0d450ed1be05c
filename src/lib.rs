//! moodmix - mood and scene driven playlists for a small music catalog
//!
//! Free text is turned into vocabulary tags, songs are scored against those
//! tags and assembled into artist-diverse playlists. Listening history feeds
//! a separate preference scorer for personalized and daily recommendations.

pub mod config;
pub mod core;
pub mod models;
pub mod plugins;
pub mod stores;
pub mod utils;
