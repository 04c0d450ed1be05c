//! Core engine for moodmix

pub mod extractor;
pub mod generator;
pub mod intent;
pub mod matcher;
pub mod recipes;
pub mod rules;
pub mod search;

pub use extractor::{ExtractorStatus, TagExtractor};
pub use generator::PlaylistGenerator;
pub use intent::{analyze_intent, no_result_reply, playlist_reply};
pub use matcher::{MatchOptions, MatcherConfig, PlaylistOptions, SongMatcher};
pub use recipes::{PreferenceProfile, Recommender};
pub use search::{SearchResult, SongSearch};
