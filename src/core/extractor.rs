//! Tag extraction
//!
//! Free text becomes a list of vocabulary tags, a playlist title and a short
//! description. An optional remote [`TagSource`] is asked first; any failure
//! or empty answer from it falls through to the local rules in
//! [`crate::core::rules`]. Extraction itself never fails.

use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::core::rules::{
    keyword_tags, match_scene_pattern, TITLE_GENRES, TITLE_MOODS, TITLE_SCENES,
};
use crate::models::{DisplayLanguage, ExtractionResult, ExtractionSource, Tag};
use crate::plugins::{TagSource, TagSourceError};

const DESCRIPTION_TAG_COUNT: usize = 4;
const DESCRIPTION_SEPARATOR: &str = " · ";

/// Which extraction path is active
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractorStatus {
    /// "online" when a remote source is configured, otherwise "local"
    pub mode: &'static str,
    pub provider: Option<String>,
    pub model: Option<String>,
}

/// Two-stage tag extractor
#[derive(Clone)]
pub struct TagExtractor {
    source: Option<Arc<dyn TagSource>>,
    timeout: Duration,
    language: DisplayLanguage,
}

impl TagExtractor {
    pub fn new(
        source: Option<Arc<dyn TagSource>>,
        timeout: Duration,
        language: DisplayLanguage,
    ) -> Self {
        Self {
            source,
            timeout,
            language,
        }
    }

    /// Extractor that only uses the local rules
    pub fn local(language: DisplayLanguage) -> Self {
        Self::new(None, Duration::ZERO, language)
    }

    pub fn language(&self) -> DisplayLanguage {
        self.language
    }

    pub fn status(&self) -> ExtractorStatus {
        match &self.source {
            Some(source) => ExtractorStatus {
                mode: "online",
                provider: Some(source.provider().to_string()),
                model: Some(source.model().to_string()),
            },
            None => ExtractorStatus {
                mode: "local",
                provider: None,
                model: None,
            },
        }
    }

    /// Extract tags, preferring the remote source when one is configured
    pub async fn extract(&self, input: &str) -> ExtractionResult {
        if let Some(source) = &self.source {
            if !input.trim().is_empty() {
                match self.extract_external(source.as_ref(), input).await {
                    Ok(result) => return result,
                    Err(e) => warn!("Online tag extraction failed, using local rules: {}", e),
                }
            }
        }

        self.extract_local(input)
    }

    async fn extract_external(
        &self,
        source: &dyn TagSource,
        input: &str,
    ) -> Result<ExtractionResult, TagSourceError> {
        debug!("Asking {} for tags", source.provider());

        let external = tokio::time::timeout(self.timeout, source.fetch_tags(input))
            .await
            .map_err(|_| TagSourceError::Timeout(self.timeout.as_secs()))??;

        let tags = normalize_tags(&external.tags);
        if tags.is_empty() {
            return Err(TagSourceError::EmptyTags);
        }

        let title = external
            .title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| generic_title(self.language).to_string());

        Ok(ExtractionResult {
            tags,
            title,
            description: external.description.unwrap_or_default(),
            source: ExtractionSource::External,
            original_query: input.to_string(),
        })
    }

    /// Extract tags with the scene patterns and the keyword table only
    pub fn extract_local(&self, input: &str) -> ExtractionResult {
        let normalized = input.trim().to_lowercase();
        let mut tags = TagSet::default();
        let mut pattern_title = None;

        if let Some(pattern) = match_scene_pattern(&normalized) {
            tags.extend(pattern.tags.iter().copied());
            pattern_title = Some(pattern.title(self.language));
        }
        tags.extend(keyword_tags(&normalized));

        let tags = tags.into_vec();
        let title = match pattern_title {
            Some(title) => title.to_string(),
            None => synthesize_title(&tags, self.language),
        };
        let description = describe(&tags, self.language);

        debug!(
            "Local extraction: {} tags, pattern {:?}",
            tags.len(),
            pattern_title
        );

        ExtractionResult {
            tags: tags.iter().map(|t| t.as_str().to_string()).collect(),
            title,
            description,
            source: ExtractionSource::Local,
            original_query: input.to_string(),
        }
    }
}

/// Insertion-ordered set of tags
#[derive(Default)]
struct TagSet {
    seen: HashSet<Tag>,
    order: Vec<Tag>,
}

impl TagSet {
    fn extend(&mut self, tags: impl IntoIterator<Item = Tag>) {
        for tag in tags {
            if self.seen.insert(tag) {
                self.order.push(tag);
            }
        }
    }

    fn into_vec(self) -> Vec<Tag> {
        self.order
    }
}

/// Trim, lowercase and de-duplicate tag strings, keeping first occurrences
fn normalize_tags(raw: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    raw.iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty() && seen.insert(t.clone()))
        .collect()
}

fn generic_title(language: DisplayLanguage) -> &'static str {
    match language {
        DisplayLanguage::Zh => "为你推荐",
        DisplayLanguage::En => "Recommended for You",
    }
}

fn generic_description(language: DisplayLanguage) -> &'static str {
    match language {
        DisplayLanguage::Zh => "根据你的喜好推荐",
        DisplayLanguage::En => "Based on your taste",
    }
}

/// Label of the first tag that belongs to `words`
fn first_in(tags: &[Tag], words: &[Tag], language: DisplayLanguage) -> Option<&'static str> {
    tags.iter()
        .find(|t| words.contains(t))
        .map(|t| t.label(language))
}

fn synthesize_title(tags: &[Tag], language: DisplayLanguage) -> String {
    if tags.is_empty() {
        return generic_title(language).to_string();
    }

    let scene = first_in(tags, TITLE_SCENES, language);
    let mood = first_in(tags, TITLE_MOODS, language);
    let genre = first_in(tags, TITLE_GENRES, language);

    match language {
        DisplayLanguage::Zh => match (scene, mood, genre) {
            (Some(s), Some(m), _) => format!("{}{}歌单", s, m),
            (None, Some(m), Some(g)) => format!("{}{}精选", m, g),
            (Some(s), None, _) => format!("{}音乐", s),
            (None, Some(m), None) => format!("{}时刻", m),
            (None, None, Some(g)) => format!("{}精选", g),
            (None, None, None) => "为你精选".to_string(),
        },
        DisplayLanguage::En => match (scene, mood, genre) {
            (Some(s), Some(m), _) => format!("{} {} Mix", s, m),
            (None, Some(m), Some(g)) => format!("{} {} Picks", m, g),
            (Some(s), None, _) => format!("{} Music", s),
            (None, Some(m), None) => format!("{} Moments", m),
            (None, None, Some(g)) => format!("{} Picks", g),
            (None, None, None) => "Picked for You".to_string(),
        },
    }
}

fn describe(tags: &[Tag], language: DisplayLanguage) -> String {
    if tags.is_empty() {
        return generic_description(language).to_string();
    }

    tags.iter()
        .take(DESCRIPTION_TAG_COUNT)
        .map(|t| t.label(language))
        .collect::<Vec<_>>()
        .join(DESCRIPTION_SEPARATOR)
}
