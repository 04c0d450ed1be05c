//! Tag vocabulary
//!
//! Every tag belongs to exactly one dimension and carries a display label in
//! Chinese and English.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Display language for tag labels and generated titles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayLanguage {
    #[default]
    Zh,
    En,
}

/// Tag dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagDimension {
    Mood,
    Scene,
    Genre,
    Era,
    Language,
    Tempo,
    Vibe,
}

impl TagDimension {
    pub fn all() -> [TagDimension; 7] {
        [
            TagDimension::Mood,
            TagDimension::Scene,
            TagDimension::Genre,
            TagDimension::Era,
            TagDimension::Language,
            TagDimension::Tempo,
            TagDimension::Vibe,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TagDimension::Mood => "mood",
            TagDimension::Scene => "scene",
            TagDimension::Genre => "genre",
            TagDimension::Era => "era",
            TagDimension::Language => "language",
            TagDimension::Tempo => "tempo",
            TagDimension::Vibe => "vibe",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "mood" => Some(TagDimension::Mood),
            "scene" => Some(TagDimension::Scene),
            "genre" => Some(TagDimension::Genre),
            "era" => Some(TagDimension::Era),
            "language" => Some(TagDimension::Language),
            "tempo" => Some(TagDimension::Tempo),
            "vibe" => Some(TagDimension::Vibe),
            _ => None,
        }
    }
}

/// A tag from the closed vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tag {
    // Mood
    Relaxing,
    Energetic,
    Melancholic,
    Happy,
    Romantic,
    Nostalgic,
    Peaceful,
    Intense,
    // Scene
    Commute,
    Subway,
    Workout,
    Study,
    Sleep,
    Party,
    Cafe,
    Rain,
    Night,
    Morning,
    Driving,
    Friday,
    Weekend,
    // Genre
    Pop,
    Rock,
    Jazz,
    Classical,
    Electronic,
    RnB,
    HipHop,
    Folk,
    CityPop,
    Ballad,
    Soul,
    Funk,
    Edm,
    Instrumental,
    // Era
    Eighties,
    Nineties,
    TwoThousands,
    TwentyTens,
    TwentyTwenties,
    Retro,
    Modern,
    // Language
    Mandarin,
    Cantonese,
    English,
    Japanese,
    Korean,
    // Tempo
    Slow,
    Medium,
    Fast,
    // Vibe
    Chill,
    Upbeat,
    Dreamy,
    Groovy,
    Soulful,
    Acoustic,
}

const ALL_TAGS: [Tag; 56] = [
    Tag::Relaxing,
    Tag::Energetic,
    Tag::Melancholic,
    Tag::Happy,
    Tag::Romantic,
    Tag::Nostalgic,
    Tag::Peaceful,
    Tag::Intense,
    Tag::Commute,
    Tag::Subway,
    Tag::Workout,
    Tag::Study,
    Tag::Sleep,
    Tag::Party,
    Tag::Cafe,
    Tag::Rain,
    Tag::Night,
    Tag::Morning,
    Tag::Driving,
    Tag::Friday,
    Tag::Weekend,
    Tag::Pop,
    Tag::Rock,
    Tag::Jazz,
    Tag::Classical,
    Tag::Electronic,
    Tag::RnB,
    Tag::HipHop,
    Tag::Folk,
    Tag::CityPop,
    Tag::Ballad,
    Tag::Soul,
    Tag::Funk,
    Tag::Edm,
    Tag::Instrumental,
    Tag::Eighties,
    Tag::Nineties,
    Tag::TwoThousands,
    Tag::TwentyTens,
    Tag::TwentyTwenties,
    Tag::Retro,
    Tag::Modern,
    Tag::Mandarin,
    Tag::Cantonese,
    Tag::English,
    Tag::Japanese,
    Tag::Korean,
    Tag::Slow,
    Tag::Medium,
    Tag::Fast,
    Tag::Chill,
    Tag::Upbeat,
    Tag::Dreamy,
    Tag::Groovy,
    Tag::Soulful,
    Tag::Acoustic,
];

impl Tag {
    /// The whole vocabulary, grouped by dimension
    pub fn all() -> &'static [Tag] {
        &ALL_TAGS
    }

    pub fn in_dimension(dimension: TagDimension) -> impl Iterator<Item = Tag> {
        ALL_TAGS
            .iter()
            .copied()
            .filter(move |tag| tag.dimension() == dimension)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::Relaxing => "relaxing",
            Tag::Energetic => "energetic",
            Tag::Melancholic => "melancholic",
            Tag::Happy => "happy",
            Tag::Romantic => "romantic",
            Tag::Nostalgic => "nostalgic",
            Tag::Peaceful => "peaceful",
            Tag::Intense => "intense",
            Tag::Commute => "commute",
            Tag::Subway => "subway",
            Tag::Workout => "workout",
            Tag::Study => "study",
            Tag::Sleep => "sleep",
            Tag::Party => "party",
            Tag::Cafe => "cafe",
            Tag::Rain => "rain",
            Tag::Night => "night",
            Tag::Morning => "morning",
            Tag::Driving => "driving",
            Tag::Friday => "friday",
            Tag::Weekend => "weekend",
            Tag::Pop => "pop",
            Tag::Rock => "rock",
            Tag::Jazz => "jazz",
            Tag::Classical => "classical",
            Tag::Electronic => "electronic",
            Tag::RnB => "r&b",
            Tag::HipHop => "hip-hop",
            Tag::Folk => "folk",
            Tag::CityPop => "city-pop",
            Tag::Ballad => "ballad",
            Tag::Soul => "soul",
            Tag::Funk => "funk",
            Tag::Edm => "edm",
            Tag::Instrumental => "instrumental",
            Tag::Eighties => "80s",
            Tag::Nineties => "90s",
            Tag::TwoThousands => "2000s",
            Tag::TwentyTens => "2010s",
            Tag::TwentyTwenties => "2020s",
            Tag::Retro => "retro",
            Tag::Modern => "modern",
            Tag::Mandarin => "mandarin",
            Tag::Cantonese => "cantonese",
            Tag::English => "english",
            Tag::Japanese => "japanese",
            Tag::Korean => "korean",
            Tag::Slow => "slow",
            Tag::Medium => "medium",
            Tag::Fast => "fast",
            Tag::Chill => "chill",
            Tag::Upbeat => "upbeat",
            Tag::Dreamy => "dreamy",
            Tag::Groovy => "groovy",
            Tag::Soulful => "soulful",
            Tag::Acoustic => "acoustic",
        }
    }

    /// Parse a tag string (case-insensitive, surrounding whitespace ignored)
    pub fn parse(s: &str) -> Option<Self> {
        let needle = s.trim().to_lowercase();
        ALL_TAGS.iter().copied().find(|tag| tag.as_str() == needle)
    }

    pub fn dimension(&self) -> TagDimension {
        use Tag::*;
        match self {
            Relaxing | Energetic | Melancholic | Happy | Romantic | Nostalgic | Peaceful
            | Intense => TagDimension::Mood,
            Commute | Subway | Workout | Study | Sleep | Party | Cafe | Rain | Night | Morning
            | Driving | Friday | Weekend => TagDimension::Scene,
            Pop | Rock | Jazz | Classical | Electronic | RnB | HipHop | Folk | CityPop | Ballad
            | Soul | Funk | Edm | Instrumental => TagDimension::Genre,
            Eighties | Nineties | TwoThousands | TwentyTens | TwentyTwenties | Retro | Modern => {
                TagDimension::Era
            }
            Mandarin | Cantonese | English | Japanese | Korean => TagDimension::Language,
            Slow | Medium | Fast => TagDimension::Tempo,
            Chill | Upbeat | Dreamy | Groovy | Soulful | Acoustic => TagDimension::Vibe,
        }
    }

    pub fn label(&self, language: DisplayLanguage) -> &'static str {
        let (zh, en) = self.labels();
        match language {
            DisplayLanguage::Zh => zh,
            DisplayLanguage::En => en,
        }
    }

    fn labels(&self) -> (&'static str, &'static str) {
        match self {
            Tag::Relaxing => ("放松", "Relaxing"),
            Tag::Energetic => ("活力", "Energetic"),
            Tag::Melancholic => ("忧郁", "Melancholic"),
            Tag::Happy => ("开心", "Happy"),
            Tag::Romantic => ("浪漫", "Romantic"),
            Tag::Nostalgic => ("怀旧", "Nostalgic"),
            Tag::Peaceful => ("平静", "Peaceful"),
            Tag::Intense => ("激烈", "Intense"),
            Tag::Commute => ("通勤", "Commute"),
            Tag::Subway => ("地铁", "Subway"),
            Tag::Workout => ("运动", "Workout"),
            Tag::Study => ("学习", "Study"),
            Tag::Sleep => ("睡眠", "Sleep"),
            Tag::Party => ("派对", "Party"),
            Tag::Cafe => ("咖啡厅", "Cafe"),
            Tag::Rain => ("雨天", "Rainy Day"),
            Tag::Night => ("夜晚", "Night"),
            Tag::Morning => ("早晨", "Morning"),
            Tag::Driving => ("开车", "Driving"),
            Tag::Friday => ("周五", "Friday"),
            Tag::Weekend => ("周末", "Weekend"),
            Tag::Pop => ("流行", "Pop"),
            Tag::Rock => ("摇滚", "Rock"),
            Tag::Jazz => ("爵士", "Jazz"),
            Tag::Classical => ("古典", "Classical"),
            Tag::Electronic => ("电子", "Electronic"),
            Tag::RnB => ("R&B", "R&B"),
            Tag::HipHop => ("嘻哈", "Hip-Hop"),
            Tag::Folk => ("民谣", "Folk"),
            Tag::CityPop => ("城市流行", "City Pop"),
            Tag::Ballad => ("抒情", "Ballad"),
            Tag::Soul => ("灵魂乐", "Soul"),
            Tag::Funk => ("放克", "Funk"),
            Tag::Edm => ("电子舞曲", "EDM"),
            Tag::Instrumental => ("纯音乐", "Instrumental"),
            Tag::Eighties => ("80年代", "80s"),
            Tag::Nineties => ("90年代", "90s"),
            Tag::TwoThousands => ("2000年代", "2000s"),
            Tag::TwentyTens => ("2010年代", "2010s"),
            Tag::TwentyTwenties => ("2020年代", "2020s"),
            Tag::Retro => ("复古", "Retro"),
            Tag::Modern => ("现代", "Modern"),
            Tag::Mandarin => ("国语", "Mandarin"),
            Tag::Cantonese => ("粤语", "Cantonese"),
            Tag::English => ("英语", "English"),
            Tag::Japanese => ("日语", "Japanese"),
            Tag::Korean => ("韩语", "Korean"),
            Tag::Slow => ("慢速", "Slow"),
            Tag::Medium => ("中速", "Medium"),
            Tag::Fast => ("快速", "Fast"),
            Tag::Chill => ("慵懒", "Chill"),
            Tag::Upbeat => ("欢快", "Upbeat"),
            Tag::Dreamy => ("梦幻", "Dreamy"),
            Tag::Groovy => ("律动", "Groovy"),
            Tag::Soulful => ("有灵魂", "Soulful"),
            Tag::Acoustic => ("原声", "Acoustic"),
        }
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Tag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Tag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Tag::parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("unknown tag: {}", raw)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_parse_roundtrips_every_tag() {
        for tag in Tag::all() {
            assert_eq!(Tag::parse(tag.as_str()), Some(*tag));
        }
        let unique: HashSet<_> = Tag::all().iter().map(|t| t.as_str()).collect();
        assert_eq!(unique.len(), Tag::all().len());
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(Tag::parse("  City-Pop "), Some(Tag::CityPop));
        assert_eq!(Tag::parse("R&B"), Some(Tag::RnB));
        assert_eq!(Tag::parse("vaporwave"), None);
        assert_eq!(Tag::parse(""), None);
    }

    #[test]
    fn test_dimensions() {
        assert_eq!(Tag::Friday.dimension(), TagDimension::Scene);
        assert_eq!(Tag::Instrumental.dimension(), TagDimension::Genre);
        assert_eq!(Tag::Eighties.dimension(), TagDimension::Era);
        assert_eq!(Tag::in_dimension(TagDimension::Tempo).count(), 3);
        let total: usize = TagDimension::all()
            .iter()
            .map(|d| Tag::in_dimension(*d).count())
            .sum();
        assert_eq!(total, Tag::all().len());
    }

    #[test]
    fn test_labels() {
        assert_eq!(Tag::Rain.label(DisplayLanguage::Zh), "雨天");
        assert_eq!(Tag::Rain.label(DisplayLanguage::En), "Rainy Day");
    }

    #[test]
    fn test_serde() {
        let json = serde_json::to_string(&vec![Tag::HipHop, Tag::Eighties]).unwrap();
        assert_eq!(json, r#"["hip-hop","80s"]"#);
        let back: Vec<Tag> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vec![Tag::HipHop, Tag::Eighties]);
        assert!(serde_json::from_str::<Tag>(r#""nope""#).is_err());
    }
}
