//! Playlist-shaped results handed back to callers
//!
//! Nothing here is persisted by the engine; callers store, render or play
//! these values as they see fit.

use serde::{Deserialize, Serialize};

use super::{ScoredSong, Song};

/// Where an extraction result came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionSource {
    Local,
    External,
}

impl ExtractionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionSource::Local => "local",
            ExtractionSource::External => "external",
        }
    }
}

/// Tags, title and description derived from a free-text request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    /// Unique tag strings in extraction order
    pub tags: Vec<String>,
    pub title: String,
    pub description: String,
    pub source: ExtractionSource,
    pub original_query: String,
}

/// How a match result was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    /// No tags were given, the catalog was sampled at random
    Random,
    /// At least one song overlapped the tags
    Tagged,
    /// Tags were given but nothing matched
    None,
}

/// Result of tag matching or smart playlist generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub songs: Vec<ScoredSong>,
    /// Matches above the minimum score before truncation
    pub total_matched: usize,
    pub tags: Vec<String>,
    pub match_type: MatchType,
}

impl MatchResult {
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }
}

/// Time-of-day flavoured recommendation list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyRecommendation {
    pub title: String,
    pub description: String,
    pub songs: Vec<ScoredSong>,
}

/// Songs similar to a reference song
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarResult {
    pub songs: Vec<ScoredSong>,
    pub total_matched: usize,
    pub based_on: Option<Song>,
}

/// Full output of the text-to-playlist pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedPlaylist {
    pub extraction: ExtractionResult,
    pub result: MatchResult,
    /// Assistant reply text for the chat surface
    pub reply: String,
}
