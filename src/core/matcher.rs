//! Song matching engine
//!
//! Scores catalog songs against a tag list, keeps the best matches first and
//! shuffles songs that share a score. Smart playlists add an artist cap on
//! top of a generous match.

use rand::seq::SliceRandom;
use rand::RngCore;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::debug;

use crate::config::UserConfig;
use crate::models::{MatchResult, MatchType, ScoredSong, SimilarResult, Song, Tag};
use crate::stores::Catalog;

/// Candidate pool size used when building smart playlists
pub const PLAYLIST_CANDIDATE_LIMIT: usize = 50;

/// Points for a similar song by the same artist
const SAME_ARTIST_BONUS: u32 = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct MatcherConfig {
    pub default_limit: usize,
    /// Ceiling applied to every tagged match
    pub max_limit: usize,
    pub min_score: u32,
    pub shuffle_ties: bool,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            default_limit: 20,
            max_limit: 50,
            min_score: 1,
            shuffle_ties: true,
        }
    }
}

impl MatcherConfig {
    pub fn from_config(config: &UserConfig) -> Self {
        Self {
            default_limit: config.default_limit,
            max_limit: config.max_limit,
            min_score: config.min_match_score,
            shuffle_ties: config.shuffle_ties,
        }
    }
}

/// Per-call overrides, `None` falls back to the matcher config
#[derive(Debug, Clone, Default)]
pub struct MatchOptions {
    pub limit: Option<usize>,
    pub min_score: Option<u32>,
    pub shuffle_ties: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct PlaylistOptions {
    pub target_length: usize,
    pub diversity_factor: f64,
}

impl Default for PlaylistOptions {
    fn default() -> Self {
        Self {
            target_length: 15,
            diversity_factor: 0.3,
        }
    }
}

impl PlaylistOptions {
    pub fn from_config(config: &UserConfig) -> Self {
        Self {
            target_length: config.playlist_length,
            diversity_factor: config.diversity_factor,
        }
    }
}

/// Number of distinct query tags present anywhere in the song
pub fn score(tags: &[Tag], song: &Song) -> u32 {
    let distinct: HashSet<&Tag> = tags.iter().collect();
    distinct.into_iter().filter(|t| song.tags.contains(**t)).count() as u32
}

/// Parse query tag strings, dropping unknown tags and repeats
pub fn parse_query_tags<S: AsRef<str>>(tags: &[S]) -> Vec<Tag> {
    let mut seen = HashSet::new();
    tags.iter()
        .filter_map(|t| Tag::parse(t.as_ref()))
        .filter(|t| seen.insert(*t))
        .collect()
}

/// Select up to `target_length` songs with at most
/// `ceil(target_length * diversity_factor)` songs per artist, ignoring the
/// cap only when too few artists remain to reach the target
///
/// The output keeps the input order.
pub fn diversify(
    candidates: Vec<ScoredSong>,
    target_length: usize,
    diversity_factor: f64,
) -> Vec<ScoredSong> {
    let max_per_artist = (target_length as f64 * diversity_factor).ceil() as usize;
    let mut admitted = vec![false; candidates.len()];
    let mut artist_count: HashMap<&str, usize> = HashMap::new();
    let mut count = 0;

    for (idx, song) in candidates.iter().enumerate() {
        if count >= target_length {
            break;
        }
        let current = artist_count.entry(song.artist()).or_insert(0);
        if *current < max_per_artist {
            *current += 1;
            admitted[idx] = true;
            count += 1;
        }
    }

    // backfill without the cap
    for flag in admitted.iter_mut() {
        if count >= target_length {
            break;
        }
        if !*flag {
            *flag = true;
            count += 1;
        }
    }

    candidates
        .into_iter()
        .zip(admitted)
        .filter_map(|(song, keep)| keep.then_some(song))
        .collect()
}

/// Tag matcher over a shared catalog
pub struct SongMatcher {
    catalog: Arc<Catalog>,
    config: MatcherConfig,
}

impl SongMatcher {
    pub fn new(catalog: Arc<Catalog>, config: MatcherConfig) -> Self {
        Self { catalog, config }
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Every catalog song with its match score, in catalog order
    pub fn scored_songs(&self, tags: &[Tag]) -> Vec<ScoredSong> {
        self.catalog
            .songs()
            .iter()
            .map(|song| ScoredSong::new(song.clone(), score(tags, song)))
            .collect()
    }

    /// Match songs against tag strings
    ///
    /// No tags samples the catalog at random. Unknown tags never score.
    pub fn match_tags<S: AsRef<str>>(
        &self,
        tags: &[S],
        options: &MatchOptions,
        rng: &mut dyn RngCore,
    ) -> MatchResult {
        let limit = options.limit.unwrap_or(self.config.default_limit);
        let min_score = options.min_score.unwrap_or(self.config.min_score);
        let shuffle_ties = options.shuffle_ties.unwrap_or(self.config.shuffle_ties);
        let tag_strings: Vec<String> = tags.iter().map(|t| t.as_ref().to_string()).collect();

        if tags.is_empty() {
            let mut songs: Vec<ScoredSong> = self
                .catalog
                .songs()
                .iter()
                .map(|song| ScoredSong::new(song.clone(), 0))
                .collect();
            songs.shuffle(rng);
            songs.truncate(limit);

            debug!("No tags given, sampled {} songs at random", songs.len());
            return MatchResult {
                songs,
                total_matched: self.catalog.len(),
                tags: tag_strings,
                match_type: MatchType::Random,
            };
        }

        let query = parse_query_tags(tags);
        let mut scored: Vec<ScoredSong> = self
            .scored_songs(&query)
            .into_iter()
            .filter(|s| s.score >= min_score)
            .collect();

        // stable, so equal scores keep catalog order when not shuffled
        scored.sort_by(|a, b| b.score.cmp(&a.score));
        if shuffle_ties {
            shuffle_tie_groups(&mut scored, rng);
        }

        let total_matched = scored.len();
        let match_type = if total_matched > 0 {
            MatchType::Tagged
        } else {
            MatchType::None
        };
        scored.truncate(limit.min(self.config.max_limit));

        debug!(
            "Matched {} songs for {} tags ({:?})",
            total_matched,
            query.len(),
            match_type
        );

        MatchResult {
            songs: scored,
            total_matched,
            tags: tag_strings,
            match_type,
        }
    }

    /// Match generously, then cap how often one artist appears
    pub fn smart_playlist<S: AsRef<str>>(
        &self,
        tags: &[S],
        options: &PlaylistOptions,
        rng: &mut dyn RngCore,
    ) -> MatchResult {
        let match_options = MatchOptions {
            limit: Some(PLAYLIST_CANDIDATE_LIMIT),
            ..Default::default()
        };
        let mut result = self.match_tags(tags, &match_options, rng);

        if result.songs.len() <= options.target_length {
            return result;
        }

        result.songs = diversify(result.songs, options.target_length, options.diversity_factor);
        result
    }

    /// Songs sharing tags or the artist with `song`, best first
    pub fn similar(&self, song: &Song, limit: usize) -> SimilarResult {
        let reference: HashSet<Tag> = song.tags.iter().collect();

        let mut scored: Vec<ScoredSong> = self
            .catalog
            .songs()
            .iter()
            .filter(|candidate| candidate.id != song.id)
            .filter_map(|candidate| {
                let candidate_tags: HashSet<Tag> = candidate.tags.iter().collect();
                let mut similarity = reference.intersection(&candidate_tags).count() as u32;
                if candidate.artist == song.artist {
                    similarity += SAME_ARTIST_BONUS;
                }
                (similarity > 0).then(|| ScoredSong::new(candidate.clone(), similarity))
            })
            .collect();

        scored.sort_by(|a, b| b.score.cmp(&a.score));
        let total_matched = scored.len();
        scored.truncate(limit);

        SimilarResult {
            songs: scored,
            total_matched,
            based_on: Some(song.clone()),
        }
    }

    /// [`Self::similar`] for a song id, empty for unknown ids
    pub fn similar_by_id(&self, id: &str, limit: usize) -> SimilarResult {
        match self.catalog.get(id) {
            Some(song) => self.similar(song, limit),
            None => {
                debug!("Similar songs requested for unknown id {}", id);
                SimilarResult {
                    songs: Vec::new(),
                    total_matched: 0,
                    based_on: None,
                }
            }
        }
    }
}

/// Shuffle each run of equal scores in a score-sorted list
fn shuffle_tie_groups(songs: &mut [ScoredSong], rng: &mut dyn RngCore) {
    let mut start = 0;
    while start < songs.len() {
        let group_score = songs[start].score;
        let end = songs[start..]
            .iter()
            .position(|s| s.score != group_score)
            .map_or(songs.len(), |offset| start + offset);
        songs[start..end].shuffle(rng);
        start = end;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SongTags;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn song(id: &str, artist: &str, mood: &[Tag], scene: &[Tag]) -> Song {
        Song {
            id: id.to_string(),
            title: id.to_uppercase(),
            artist: artist.to_string(),
            album: None,
            duration: 200,
            image: String::new(),
            tags: SongTags {
                mood: mood.to_vec(),
                scene: scene.to_vec(),
                ..Default::default()
            },
        }
    }

    fn matcher(songs: Vec<Song>) -> SongMatcher {
        SongMatcher::new(Arc::new(Catalog::new(songs).unwrap()), MatcherConfig::default())
    }

    fn builtin_matcher() -> SongMatcher {
        SongMatcher::new(Arc::new(Catalog::builtin().unwrap()), MatcherConfig::default())
    }

    fn ids(songs: &[ScoredSong]) -> Vec<&str> {
        songs.iter().map(|s| s.id()).collect()
    }

    #[test]
    fn test_score_counts_distinct_query_tags() {
        let s = song("a", "x", &[Tag::Relaxing], &[Tag::Commute]);
        assert_eq!(score(&[Tag::Relaxing, Tag::Relaxing], &s), 1);
        assert_eq!(score(&[Tag::Relaxing, Tag::Commute, Tag::Jazz], &s), 2);
        assert_eq!(score(&[], &s), 0);
    }

    #[test]
    fn test_two_double_matches_then_singles() {
        let m = matcher(vec![
            song("single-1", "a", &[Tag::Relaxing], &[]),
            song("double-1", "b", &[Tag::Relaxing], &[Tag::Commute]),
            song("none", "c", &[Tag::Happy], &[]),
            song("single-2", "d", &[], &[Tag::Commute]),
            song("double-2", "e", &[Tag::Relaxing], &[Tag::Commute]),
            song("single-3", "f", &[Tag::Relaxing], &[Tag::Night]),
        ]);

        let result = m.match_tags(
            &["relaxing", "commute"],
            &MatchOptions::default(),
            &mut StdRng::seed_from_u64(3),
        );

        assert_eq!(result.songs.len(), 5);
        assert_eq!(result.total_matched, 5);
        assert_eq!(result.match_type, MatchType::Tagged);
        assert!(result.songs[..2].iter().all(|s| s.score == 2));
        assert!(result.songs[2..].iter().all(|s| s.score == 1));
        assert!(!ids(&result.songs).contains(&"none"));
    }

    #[test]
    fn test_unshuffled_ties_keep_catalog_order() {
        let m = matcher(vec![
            song("a", "x", &[Tag::Happy], &[]),
            song("b", "x", &[Tag::Happy], &[Tag::Party]),
            song("c", "x", &[Tag::Happy], &[]),
        ]);
        let options = MatchOptions {
            shuffle_ties: Some(false),
            ..Default::default()
        };
        let result = m.match_tags(&["party", "HAPPY"], &options, &mut StdRng::seed_from_u64(1));
        assert_eq!(ids(&result.songs), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_ordering_and_min_score_hold_for_any_seed() {
        let m = builtin_matcher();
        let tags = ["relaxing", "chill", "night", "mandarin", "bogus"];
        for seed in 0..20 {
            let result = m.match_tags(
                &tags,
                &MatchOptions {
                    min_score: Some(2),
                    ..Default::default()
                },
                &mut StdRng::seed_from_u64(seed),
            );
            assert!(result.songs.windows(2).all(|w| w[0].score >= w[1].score));
            assert!(result.songs.iter().all(|s| s.score >= 2 && s.score <= 4));
        }
    }

    #[test]
    fn test_empty_tags_sample_catalog() {
        let m = builtin_matcher();
        let empty: [&str; 0] = [];
        let result = m.match_tags(
            &empty,
            &MatchOptions {
                limit: Some(10),
                ..Default::default()
            },
            &mut StdRng::seed_from_u64(9),
        );
        assert_eq!(result.match_type, MatchType::Random);
        assert_eq!(result.songs.len(), 10);
        assert_eq!(result.total_matched, 32);
        let unique: HashSet<_> = ids(&result.songs).into_iter().collect();
        assert_eq!(unique.len(), 10);
    }

    #[test]
    fn test_unknown_tags_match_nothing() {
        let result = builtin_matcher().match_tags(
            &["not-a-tag"],
            &MatchOptions::default(),
            &mut rand::thread_rng(),
        );
        assert_eq!(result.match_type, MatchType::None);
        assert!(result.is_empty());
        assert_eq!(result.total_matched, 0);
    }

    #[test]
    fn test_limit_is_capped() {
        let m = builtin_matcher();
        let options = MatchOptions {
            limit: Some(500),
            ..Default::default()
        };
        let result = m.match_tags(&["mandarin", "english", "japanese", "instrumental"], &options, &mut rand::thread_rng());
        assert!(result.songs.len() <= 50);
    }

    #[test]
    fn test_diversify_caps_artists_then_backfills() {
        let candidates: Vec<ScoredSong> = (0..8)
            .map(|i| {
                let artist = if i < 6 { "prolific" } else { "other" };
                ScoredSong::new(song(&format!("s{}", i), artist, &[Tag::Happy], &[]), 10 - i)
            })
            .collect();

        // cap of 2 per artist, only two artists: capped walk admits 4
        let picked = diversify(candidates.clone(), 4, 0.5);
        assert_eq!(ids(&picked), vec!["s0", "s1", "s6", "s7"]);

        // cap of 1 leaves only 2 admitted, backfill fills in score order
        let picked = diversify(candidates, 5, 0.1);
        assert_eq!(ids(&picked), vec!["s0", "s1", "s2", "s3", "s6"]);
    }

    #[test]
    fn test_diversify_cap_is_exact_ceiling() {
        // 50 * 0.3 is exactly 15
        let candidates: Vec<ScoredSong> = (0..60)
            .map(|i| {
                let artist = if i < 20 { "prolific".to_string() } else { format!("a{}", i) };
                ScoredSong::new(song(&format!("s{}", i), &artist, &[Tag::Happy], &[]), 1)
            })
            .collect();

        let picked = diversify(candidates, 50, 0.3);
        assert_eq!(picked.len(), 50);
        assert_eq!(picked.iter().filter(|s| s.artist() == "prolific").count(), 15);
    }

    #[test]
    fn test_smart_playlist_keeps_short_match_unchanged() {
        let m = matcher(
            (0..5)
                .map(|i| song(&format!("s{}", i), "solo", &[Tag::Happy], &[Tag::Party]))
                .collect(),
        );
        let options = PlaylistOptions {
            target_length: 5,
            diversity_factor: 0.2,
        };
        let match_options = MatchOptions {
            limit: Some(PLAYLIST_CANDIDATE_LIMIT),
            ..Default::default()
        };

        let matched = m.match_tags(&["happy", "party"], &match_options, &mut StdRng::seed_from_u64(12));
        let playlist = m.smart_playlist(&["happy", "party"], &options, &mut StdRng::seed_from_u64(12));

        assert_eq!(playlist.songs.len(), 5);
        assert_eq!(ids(&playlist.songs), ids(&matched.songs));
        assert_eq!(playlist.total_matched, matched.total_matched);
    }

    #[test]
    fn test_smart_playlist_respects_artist_cap() {
        let m = builtin_matcher();
        let options = PlaylistOptions {
            target_length: 6,
            diversity_factor: 0.3,
        };
        let result = m.smart_playlist(&["mandarin", "pop", "ballad", "english"], &options, &mut StdRng::seed_from_u64(4));

        assert_eq!(result.songs.len(), 6);
        let mut per_artist: HashMap<&str, usize> = HashMap::new();
        for s in &result.songs {
            *per_artist.entry(s.artist()).or_default() += 1;
        }
        assert!(per_artist.values().all(|&n| n <= 2));
    }

    #[test]
    fn test_similar_excludes_self_and_zero_scores() {
        let m = matcher(vec![
            song("ref", "x", &[Tag::Happy, Tag::Happy], &[Tag::Party]),
            song("same-artist", "x", &[], &[]),
            song("two-tags", "y", &[Tag::Happy], &[Tag::Party]),
            song("unrelated", "z", &[Tag::Melancholic], &[]),
        ]);

        let result = m.similar_by_id("ref", 10);
        // equal scores keep catalog order
        assert_eq!(ids(&result.songs), vec!["same-artist", "two-tags"]);
        assert_eq!(result.songs[0].score, 2);
        assert_eq!(result.songs[1].score, 2);
        assert_eq!(result.based_on.unwrap().id, "ref");

        let missing = m.similar_by_id("nope", 10);
        assert!(missing.songs.is_empty());
        assert_eq!(missing.total_matched, 0);
    }
}
