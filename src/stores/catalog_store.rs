//! Catalog store - immutable in-memory song catalog with id lookups

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::{info, warn};

use crate::models::{Song, SongTags, Tag, TagDimension, TagMatchMode};

/// Bundled catalog fixture
const BUILTIN_CATALOG: &str = include_str!("../../assets/catalog.json");

/// Song as it appears on disk, tags not yet validated
#[derive(Debug, Deserialize)]
struct RawSong {
    id: String,
    title: String,
    artist: String,
    #[serde(default)]
    album: Option<String>,
    #[serde(default)]
    duration: u32,
    #[serde(default)]
    image: String,
    #[serde(default)]
    tags: HashMap<String, Vec<String>>,
}

/// Read-only song catalog
///
/// Built once and shared behind an `Arc`; nothing mutates it afterwards.
#[derive(Debug, Default)]
pub struct Catalog {
    /// Songs in load order
    songs: Vec<Song>,
    /// Position in `songs` by song id
    by_id: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog from already validated songs
    pub fn new(songs: Vec<Song>) -> Result<Self> {
        let mut by_id = HashMap::with_capacity(songs.len());

        for (idx, song) in songs.iter().enumerate() {
            if by_id.insert(song.id.clone(), idx).is_some() {
                bail!("Duplicate song id in catalog: {}", song.id);
            }
        }

        Ok(Self { songs, by_id })
    }

    /// Load the catalog bundled with the crate
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_CATALOG).context("Failed to load bundled catalog")
    }

    /// Load a catalog from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file {:?}", path))?;
        Self::from_json(&content).with_context(|| format!("Failed to load catalog {:?}", path))
    }

    /// Parse and validate a JSON array of songs
    ///
    /// Unknown tags and unknown dimensions are dropped with a warning. A known
    /// tag filed under a foreign dimension stays where it was declared so it
    /// still takes part in matching.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: Vec<RawSong> = serde_json::from_str(json).context("Failed to parse catalog JSON")?;

        let songs: Vec<Song> = raw.into_iter().map(validate_song).collect();
        let catalog = Self::new(songs)?;

        info!("Loaded {} songs into catalog", catalog.len());
        Ok(catalog)
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Song> {
        self.by_id.get(id).map(|&idx| &self.songs[idx])
    }

    /// Resolve a list of ids, skipping unknown ones
    pub fn resolve_ids<S: AsRef<str>>(&self, ids: &[S]) -> Vec<Song> {
        ids.iter()
            .filter_map(|id| {
                let song = self.get(id.as_ref());
                if song.is_none() {
                    warn!("Unknown song id skipped: {}", id.as_ref());
                }
                song.cloned()
            })
            .collect()
    }

    /// Distinct tags used anywhere in the catalog, in first-seen order
    pub fn all_tags(&self) -> Vec<Tag> {
        let mut seen = HashSet::new();
        self.songs
            .iter()
            .flat_map(|song| song.tags.iter())
            .filter(|tag| seen.insert(*tag))
            .collect()
    }

    /// Songs carrying any (or all) of the given tags
    ///
    /// An empty tag list selects the whole catalog.
    pub fn songs_by_tags(&self, tags: &[Tag], mode: TagMatchMode) -> Vec<&Song> {
        if tags.is_empty() {
            return self.songs.iter().collect();
        }

        self.songs
            .iter()
            .filter(|song| match mode {
                TagMatchMode::Any => tags.iter().any(|tag| song.tags.contains(*tag)),
                TagMatchMode::All => tags.iter().all(|tag| song.tags.contains(*tag)),
            })
            .collect()
    }
}

fn validate_song(raw: RawSong) -> Song {
    let mut tags = SongTags::default();

    for (dimension_name, values) in &raw.tags {
        let Some(dimension) = TagDimension::parse(dimension_name) else {
            warn!(
                "Song {}: unknown tag dimension '{}' ignored",
                raw.id, dimension_name
            );
            continue;
        };

        let list = tags.get_mut(dimension);
        for value in values {
            match Tag::parse(value) {
                Some(tag) => {
                    if tag.dimension() != dimension {
                        warn!(
                            "Song {}: tag '{}' belongs to {} but is listed under {}",
                            raw.id,
                            tag,
                            tag.dimension().as_str(),
                            dimension.as_str()
                        );
                    }
                    list.push(tag);
                }
                None => warn!("Song {}: unknown tag '{}' ignored", raw.id, value),
            }
        }
    }

    Song {
        id: raw.id,
        title: raw.title,
        artist: raw.artist,
        album: raw.album,
        duration: raw.duration,
        image: raw.image,
        tags,
    }
}
