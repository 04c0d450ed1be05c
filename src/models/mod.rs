//! Data models for moodmix
//!
//! This module contains the core data structures shared by the catalog, the
//! matching engine and the recommenders.

mod enums;
mod playlist;
mod song;
mod tag;

pub use enums::{Daypart, Intent, IntentKind, SearchKind, TagMatchMode};
pub use playlist::{
    DailyRecommendation, ExtractionResult, ExtractionSource, GeneratedPlaylist, MatchResult,
    MatchType, SimilarResult,
};
pub use song::{ScoredSong, Song, SongTags};
pub use tag::{DisplayLanguage, Tag, TagDimension};
