//! Text to playlist pipeline

use rand::RngCore;
use tracing::info;

use crate::core::extractor::TagExtractor;
use crate::core::intent::{no_result_reply, playlist_reply};
use crate::core::matcher::{PlaylistOptions, SongMatcher};
use crate::models::GeneratedPlaylist;
use crate::utils::dates::seconds_to_human_readable;

/// Extract tags, build a smart playlist and phrase a reply
pub struct PlaylistGenerator {
    extractor: TagExtractor,
    matcher: SongMatcher,
    options: PlaylistOptions,
}

impl PlaylistGenerator {
    pub fn new(extractor: TagExtractor, matcher: SongMatcher, options: PlaylistOptions) -> Self {
        Self {
            extractor,
            matcher,
            options,
        }
    }

    pub async fn generate(&self, input: &str, rng: &mut dyn RngCore) -> GeneratedPlaylist {
        let extraction = self.extractor.extract(input).await;
        let result = self
            .matcher
            .smart_playlist(&extraction.tags, &self.options, rng);

        let language = self.extractor.language();
        let reply = if result.is_empty() {
            no_result_reply(language, rng)
        } else {
            playlist_reply(
                result.songs.len(),
                &extraction.title,
                extraction.source,
                language,
                rng,
            )
        };

        let total_seconds: u64 = result.songs.iter().map(|s| s.song.duration as u64).sum();
        info!(
            "Generated \"{}\" with {} songs, {} ({} source)",
            extraction.title,
            result.songs.len(),
            seconds_to_human_readable(total_seconds),
            extraction.source.as_str()
        );

        GeneratedPlaylist {
            extraction,
            result,
            reply,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::matcher::MatcherConfig;
    use crate::models::{DisplayLanguage, MatchType};
    use crate::stores::Catalog;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    fn generator() -> PlaylistGenerator {
        let catalog = Arc::new(Catalog::builtin().unwrap());
        PlaylistGenerator::new(
            TagExtractor::local(DisplayLanguage::Zh),
            SongMatcher::new(catalog, MatcherConfig::default()),
            PlaylistOptions::default(),
        )
    }

    #[tokio::test]
    async fn test_city_pop_request() {
        let playlist = generator()
            .generate("80年代复古风格的City Pop", &mut StdRng::seed_from_u64(8))
            .await;

        assert_eq!(playlist.extraction.title, "80年代复古City Pop");
        assert_eq!(playlist.result.match_type, MatchType::Tagged);
        assert!(playlist.result.songs.len() <= 15);
        assert!(playlist.result.songs[0].song.tags.contains(crate::models::Tag::CityPop));
        assert!(playlist.reply.contains("80年代复古City Pop"));
    }

    #[tokio::test]
    async fn test_unrecognised_request_is_random() {
        let playlist = generator().generate("qwerty", &mut StdRng::seed_from_u64(8)).await;
        assert_eq!(playlist.result.match_type, MatchType::Random);
        assert!(!playlist.result.songs.is_empty());
    }
}
