//! Song model

use serde::{Deserialize, Serialize};

use super::{Tag, TagDimension};

/// Tag set of a song, one ordered list per dimension
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongTags {
    #[serde(default)]
    pub mood: Vec<Tag>,
    #[serde(default)]
    pub scene: Vec<Tag>,
    #[serde(default)]
    pub genre: Vec<Tag>,
    #[serde(default)]
    pub era: Vec<Tag>,
    #[serde(default)]
    pub language: Vec<Tag>,
    #[serde(default)]
    pub tempo: Vec<Tag>,
    #[serde(default)]
    pub vibe: Vec<Tag>,
}

impl SongTags {
    pub fn get(&self, dimension: TagDimension) -> &[Tag] {
        match dimension {
            TagDimension::Mood => &self.mood,
            TagDimension::Scene => &self.scene,
            TagDimension::Genre => &self.genre,
            TagDimension::Era => &self.era,
            TagDimension::Language => &self.language,
            TagDimension::Tempo => &self.tempo,
            TagDimension::Vibe => &self.vibe,
        }
    }

    pub fn get_mut(&mut self, dimension: TagDimension) -> &mut Vec<Tag> {
        match dimension {
            TagDimension::Mood => &mut self.mood,
            TagDimension::Scene => &mut self.scene,
            TagDimension::Genre => &mut self.genre,
            TagDimension::Era => &mut self.era,
            TagDimension::Language => &mut self.language,
            TagDimension::Tempo => &mut self.tempo,
            TagDimension::Vibe => &mut self.vibe,
        }
    }

    /// All tags flattened in dimension order
    pub fn iter(&self) -> impl Iterator<Item = Tag> + '_ {
        TagDimension::all()
            .into_iter()
            .flat_map(move |dimension| self.get(dimension).iter().copied())
    }

    /// Whether the tag appears in any dimension
    pub fn contains(&self, tag: Tag) -> bool {
        self.iter().any(|t| t == tag)
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

/// A catalog track
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    /// Stable unique identifier
    pub id: String,
    pub title: String,
    pub artist: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    /// Duration in seconds
    pub duration: u32,
    /// Opaque artwork handle
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub tags: SongTags,
}

/// A song with a per-request score attached
///
/// Depending on the producer the score is a tag match count, a similarity
/// score or a preference score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredSong {
    #[serde(flatten)]
    pub song: Song,
    pub score: u32,
}

impl ScoredSong {
    pub fn new(song: Song, score: u32) -> Self {
        Self { song, score }
    }

    pub fn id(&self) -> &str {
        &self.song.id
    }

    pub fn artist(&self) -> &str {
        &self.song.artist
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_and_contains() {
        let tags = SongTags {
            mood: vec![Tag::Happy],
            genre: vec![Tag::Pop, Tag::Ballad],
            vibe: vec![Tag::Happy],
            ..Default::default()
        };
        let flat: Vec<Tag> = tags.iter().collect();
        assert_eq!(flat, vec![Tag::Happy, Tag::Pop, Tag::Ballad, Tag::Happy]);
        assert!(tags.contains(Tag::Ballad));
        assert!(!tags.contains(Tag::Rock));
        assert!(!tags.is_empty());
        assert!(SongTags::default().is_empty());
    }

    #[test]
    fn test_missing_dimensions_default_to_empty() {
        let song: Song = serde_json::from_str(
            r#"{"id":"x","title":"t","artist":"a","duration":10,"tags":{"genre":["jazz"]}}"#,
        )
        .unwrap();
        assert_eq!(song.tags.genre, vec![Tag::Jazz]);
        assert!(song.tags.get(TagDimension::Mood).is_empty());
        assert_eq!(song.album, None);
    }
}
