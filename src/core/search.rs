//! Search functionality for catalog songs

use rand::seq::SliceRandom;
use rand::RngCore;
use serde::Serialize;
use std::sync::Arc;

use crate::models::{SearchKind, Song, Tag, TagDimension};
use crate::stores::Catalog;

/// Search result page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub songs: Vec<Song>,
    /// Matches before the limit was applied
    pub total_matched: usize,
    pub kind: SearchKind,
    pub query: String,
}

/// Substring and tag search over the catalog
pub struct SongSearch {
    catalog: Arc<Catalog>,
}

impl SongSearch {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    /// Songs whose artist contains the query
    pub fn by_artist(&self, name: &str, limit: usize) -> SearchResult {
        let needle = normalize(name);
        self.filter(SearchKind::Artist, name, limit, |song| {
            song.artist.to_lowercase().contains(&needle)
        })
    }

    /// Songs whose title contains the query
    pub fn by_title(&self, title: &str, limit: usize) -> SearchResult {
        let needle = normalize(title);
        self.filter(SearchKind::Title, title, limit, |song| {
            song.title.to_lowercase().contains(&needle)
        })
    }

    /// Songs whose title, artist or album contains the query
    pub fn search(&self, query: &str, limit: usize) -> SearchResult {
        let needle = normalize(query);
        self.filter(SearchKind::General, query, limit, |song| {
            song.title.to_lowercase().contains(&needle)
                || song.artist.to_lowercase().contains(&needle)
                || song
                    .album
                    .as_ref()
                    .is_some_and(|album| album.to_lowercase().contains(&needle))
        })
    }

    pub fn by_genre(&self, genre: &str, limit: usize) -> SearchResult {
        self.by_tag(SearchKind::Genre, TagDimension::Genre, genre, limit)
    }

    pub fn by_mood(&self, mood: &str, limit: usize) -> SearchResult {
        self.by_tag(SearchKind::Mood, TagDimension::Mood, mood, limit)
    }

    pub fn random(&self, limit: usize, rng: &mut dyn RngCore) -> SearchResult {
        let mut songs = self.catalog.songs().to_vec();
        songs.shuffle(rng);
        songs.truncate(limit);

        SearchResult {
            songs,
            total_matched: self.catalog.len(),
            kind: SearchKind::Random,
            query: String::new(),
        }
    }

    /// Dispatch on a search kind
    pub fn search_by(
        &self,
        kind: SearchKind,
        query: &str,
        limit: usize,
        rng: &mut dyn RngCore,
    ) -> SearchResult {
        match kind {
            SearchKind::General => self.search(query, limit),
            SearchKind::Artist => self.by_artist(query, limit),
            SearchKind::Title => self.by_title(query, limit),
            SearchKind::Genre => self.by_genre(query, limit),
            SearchKind::Mood => self.by_mood(query, limit),
            SearchKind::Random => self.random(limit, rng),
        }
    }

    /// Songs listing the tag under the given dimension; unknown tags match nothing
    fn by_tag(
        &self,
        kind: SearchKind,
        dimension: TagDimension,
        value: &str,
        limit: usize,
    ) -> SearchResult {
        let tag = Tag::parse(value);
        self.filter(kind, value, limit, |song| {
            tag.is_some_and(|tag| song.tags.get(dimension).contains(&tag))
        })
    }

    fn filter<F>(&self, kind: SearchKind, query: &str, limit: usize, predicate: F) -> SearchResult
    where
        F: Fn(&Song) -> bool,
    {
        let matched: Vec<&Song> = self
            .catalog
            .songs()
            .iter()
            .filter(|song| predicate(*song))
            .collect();

        SearchResult {
            total_matched: matched.len(),
            songs: matched.into_iter().take(limit).cloned().collect(),
            kind,
            query: query.to_string(),
        }
    }
}

fn normalize(query: &str) -> String {
    query.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn search() -> SongSearch {
        SongSearch::new(Arc::new(Catalog::builtin().unwrap()))
    }

    #[test]
    fn test_by_artist_counts_before_limit() {
        let result = search().by_artist(" 陈奕迅 ", 2);
        assert_eq!(result.total_matched, 4);
        assert_eq!(result.songs.len(), 2);
        assert_eq!(result.kind, SearchKind::Artist);
        assert_eq!(result.query, " 陈奕迅 ");
    }

    #[test]
    fn test_general_search_covers_album() {
        let s = search();
        assert_eq!(s.search("RIDE ON TIME", 20).total_matched, 1);

        let result = s.search("绅士", 20);
        let ids: Vec<&str> = result.songs.iter().map(|song| song.id.as_str()).collect();
        assert_eq!(ids, vec!["cpop-003", "cpop-004"]);
        assert_eq!(s.by_title("绅士", 20).total_matched, 1);
    }

    #[test]
    fn test_tag_searches() {
        let s = search();
        assert_eq!(s.by_genre("City-Pop", 20).total_matched, 3);
        assert_eq!(s.by_genre("edm", 20).songs[0].id, "edm-001");
        assert_eq!(s.by_mood("bogus", 20).total_matched, 0);
        // a mood is not a genre
        assert_eq!(s.by_genre("happy", 20).total_matched, 0);
    }

    #[test]
    fn test_random_and_dispatch() {
        let s = search();
        let mut rng = StdRng::seed_from_u64(11);
        let result = s.search_by(SearchKind::Random, "ignored", 5, &mut rng);
        assert_eq!(result.songs.len(), 5);
        assert_eq!(result.total_matched, 32);

        let result = s.search_by(SearchKind::Mood, "intense", 50, &mut rng);
        assert!(result.songs.iter().all(|song| song.tags.mood.contains(&Tag::Intense)));
    }
}
