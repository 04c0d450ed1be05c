//! Recommendation recipes built from listening history
//!
//! A [`PreferenceProfile`] tallies what a listener keeps coming back to;
//! the [`Recommender`] ranks songs they have not heard yet against it.

use rand::seq::SliceRandom;
use rand::RngCore;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::sync::Arc;
use tracing::debug;

use crate::models::{
    DailyRecommendation, Daypart, DisplayLanguage, ScoredSong, Song, Tag, TagDimension,
};
use crate::stores::Catalog;
use crate::utils::dates::current_hour;

const FAVORITE_WEIGHT: u32 = 2;
const RECENT_WEIGHT: u32 = 1;

const DAILY_POOL_SIZE: usize = 20;
const DAILY_MIN_SONGS: usize = 10;
const DAILY_MAX_SONGS: usize = 15;

/// Weighted counts that remember first-seen order
#[derive(Debug, Clone)]
pub struct Tally<K> {
    order: Vec<K>,
    weights: HashMap<K, u32>,
}

impl<K> Default for Tally<K> {
    fn default() -> Self {
        Self {
            order: Vec::new(),
            weights: HashMap::new(),
        }
    }
}

impl<K: Clone + Eq + Hash> Tally<K> {
    pub fn add(&mut self, key: K, weight: u32) {
        match self.weights.get_mut(&key) {
            Some(total) => *total += weight,
            None => {
                self.order.push(key.clone());
                self.weights.insert(key, weight);
            }
        }
    }

    pub fn weight(&self, key: &K) -> u32 {
        self.weights.get(key).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Heaviest `n` keys; equal weights keep first-seen order
    pub fn top(&self, n: usize) -> Vec<K> {
        let mut keys = self.order.clone();
        keys.sort_by(|a, b| self.weight(b).cmp(&self.weight(a)));
        keys.truncate(n);
        keys
    }
}

/// Tag and artist weights accumulated from favorites and recent plays
#[derive(Debug, Clone, Default)]
pub struct PreferenceProfile {
    pub genres: Tally<Tag>,
    pub moods: Tally<Tag>,
    pub eras: Tally<Tag>,
    pub languages: Tally<Tag>,
    pub tempos: Tally<Tag>,
    pub artists: Tally<String>,
}

impl PreferenceProfile {
    /// Favorites weigh twice as much as recent plays and are counted first
    pub fn build(recently_played: &[Song], favorites: &[Song]) -> Self {
        let mut profile = Self::default();

        let weighted = favorites
            .iter()
            .map(|song| (song, FAVORITE_WEIGHT))
            .chain(recently_played.iter().map(|song| (song, RECENT_WEIGHT)));

        for (song, weight) in weighted {
            for (dimension, tally) in [
                (TagDimension::Genre, &mut profile.genres),
                (TagDimension::Mood, &mut profile.moods),
                (TagDimension::Era, &mut profile.eras),
                (TagDimension::Language, &mut profile.languages),
                (TagDimension::Tempo, &mut profile.tempos),
            ] {
                for tag in song.tags.get(dimension) {
                    tally.add(*tag, weight);
                }
            }
            profile.artists.add(song.artist.clone(), weight);
        }

        profile
    }

    pub fn ranking(&self) -> PreferenceRanking {
        PreferenceRanking {
            genres: self.genres.top(5),
            moods: self.moods.top(5),
            artists: self.artists.top(10),
            eras: self.eras.top(3),
            languages: self.languages.top(3),
            tempos: self.tempos.top(2),
        }
    }
}

/// The top entries of a profile, ready for scoring
#[derive(Debug, Clone)]
pub struct PreferenceRanking {
    pub genres: Vec<Tag>,
    pub moods: Vec<Tag>,
    pub artists: Vec<String>,
    pub eras: Vec<Tag>,
    pub languages: Vec<Tag>,
    pub tempos: Vec<Tag>,
}

impl PreferenceRanking {
    pub fn score(&self, song: &Song) -> u32 {
        let hits = |tags: &[Tag], top: &[Tag], points: u32| -> u32 {
            tags.iter().filter(|t| top.contains(t)).count() as u32 * points
        };

        let mut score = hits(&song.tags.genre, &self.genres, 3)
            + hits(&song.tags.mood, &self.moods, 2)
            + hits(&song.tags.era, &self.eras, 1)
            + hits(&song.tags.language, &self.languages, 2)
            + hits(&song.tags.tempo, &self.tempos, 1);

        if self.artists.contains(&song.artist) {
            score += 4;
        }

        score
    }
}

/// Personalized, popular and daily recommendations
pub struct Recommender {
    catalog: Arc<Catalog>,
    language: DisplayLanguage,
}

impl Recommender {
    pub fn new(catalog: Arc<Catalog>, language: DisplayLanguage) -> Self {
        Self { catalog, language }
    }

    /// Random catalog sample, used when there is no history
    pub fn popular(&self, limit: usize, rng: &mut dyn RngCore) -> Vec<ScoredSong> {
        let mut songs: Vec<ScoredSong> = self
            .catalog
            .songs()
            .iter()
            .map(|song| ScoredSong::new(song.clone(), 0))
            .collect();
        songs.shuffle(rng);
        songs.truncate(limit);
        songs
    }

    /// Rank unheard songs against the listener's profile
    ///
    /// The best `2 * limit` are shuffled before truncating so the same top
    /// song does not lead every time.
    pub fn personalized(
        &self,
        recently_played: &[Song],
        favorites: &[Song],
        limit: usize,
        rng: &mut dyn RngCore,
    ) -> Vec<ScoredSong> {
        if recently_played.is_empty() && favorites.is_empty() {
            debug!("No listening history, falling back to popular songs");
            return self.popular(limit, rng);
        }

        let ranking = PreferenceProfile::build(recently_played, favorites).ranking();
        let heard: HashSet<&str> = recently_played
            .iter()
            .chain(favorites)
            .map(|song| song.id.as_str())
            .collect();

        let mut scored: Vec<ScoredSong> = self
            .catalog
            .songs()
            .iter()
            .filter(|song| !heard.contains(song.id.as_str()))
            .map(|song| ScoredSong::new(song.clone(), ranking.score(song)))
            .collect();

        scored.sort_by(|a, b| b.score.cmp(&a.score));
        scored.truncate(limit.saturating_mul(2));
        scored.shuffle(rng);
        scored.truncate(limit);

        debug!(
            "Personalized {} songs from {} heard",
            scored.len(),
            heard.len()
        );
        scored
    }

    /// Personalized picks filtered toward moods that suit the hour
    pub fn daily(
        &self,
        recently_played: &[Song],
        favorites: &[Song],
        hour: u32,
        rng: &mut dyn RngCore,
    ) -> DailyRecommendation {
        let daypart = Daypart::from_hour(hour);
        let pool = self.personalized(recently_played, favorites, DAILY_POOL_SIZE, rng);

        let (mut songs, rest): (Vec<ScoredSong>, Vec<ScoredSong>) = pool
            .into_iter()
            .partition(|s| daypart.moods().iter().any(|m| s.song.tags.mood.contains(m)));

        if songs.len() < DAILY_MIN_SONGS {
            let missing = DAILY_MIN_SONGS - songs.len();
            songs.extend(rest.into_iter().take(missing));
        }
        songs.truncate(DAILY_MAX_SONGS);

        debug!("Daily mix for {}: {} songs", daypart.as_str(), songs.len());

        DailyRecommendation {
            title: daypart.title(self.language).to_string(),
            description: daypart.description(self.language).to_string(),
            songs,
        }
    }

    /// [`Self::daily`] for the current local hour
    pub fn daily_now(
        &self,
        recently_played: &[Song],
        favorites: &[Song],
        rng: &mut dyn RngCore,
    ) -> DailyRecommendation {
        self.daily(recently_played, favorites, current_hour(), rng)
    }
}
