//! Enums for moodmix

use serde::{Deserialize, Serialize};

use super::{DisplayLanguage, Tag};

/// Time-of-day bucket used to flavour daily recommendations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Daypart {
    /// 06:00 - 08:59
    EarlyMorning,
    /// 09:00 - 11:59
    Morning,
    /// 12:00 - 13:59
    Noon,
    /// 14:00 - 17:59
    Afternoon,
    /// 18:00 - 21:59
    Evening,
    /// 22:00 - 05:59
    LateNight,
}

impl Daypart {
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            6..=8 => Daypart::EarlyMorning,
            9..=11 => Daypart::Morning,
            12..=13 => Daypart::Noon,
            14..=17 => Daypart::Afternoon,
            18..=21 => Daypart::Evening,
            _ => Daypart::LateNight,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Daypart::EarlyMorning => "earlymorning",
            Daypart::Morning => "morning",
            Daypart::Noon => "noon",
            Daypart::Afternoon => "afternoon",
            Daypart::Evening => "evening",
            Daypart::LateNight => "latenight",
        }
    }

    /// Moods that fit this part of the day
    pub fn moods(&self) -> &'static [Tag] {
        match self {
            Daypart::EarlyMorning => &[Tag::Happy, Tag::Energetic, Tag::Peaceful],
            Daypart::Morning => &[Tag::Peaceful, Tag::Relaxing],
            Daypart::Noon => &[Tag::Relaxing, Tag::Peaceful],
            Daypart::Afternoon => &[Tag::Energetic, Tag::Happy],
            Daypart::Evening => &[Tag::Romantic, Tag::Nostalgic, Tag::Melancholic],
            Daypart::LateNight => &[Tag::Peaceful, Tag::Melancholic],
        }
    }

    pub fn title(&self, language: DisplayLanguage) -> &'static str {
        match (self, language) {
            (Daypart::EarlyMorning, DisplayLanguage::Zh) => "清晨唤醒",
            (Daypart::Morning, DisplayLanguage::Zh) => "专注时刻",
            (Daypart::Noon, DisplayLanguage::Zh) => "午后小憩",
            (Daypart::Afternoon, DisplayLanguage::Zh) => "活力下午",
            (Daypart::Evening, DisplayLanguage::Zh) => "夜晚心情",
            (Daypart::LateNight, DisplayLanguage::Zh) => "深夜陪伴",
            (Daypart::EarlyMorning, DisplayLanguage::En) => "Wake-up Call",
            (Daypart::Morning, DisplayLanguage::En) => "Focus Time",
            (Daypart::Noon, DisplayLanguage::En) => "Midday Break",
            (Daypart::Afternoon, DisplayLanguage::En) => "Afternoon Boost",
            (Daypart::Evening, DisplayLanguage::En) => "Evening Mood",
            (Daypart::LateNight, DisplayLanguage::En) => "Late Night Company",
        }
    }

    pub fn description(&self, language: DisplayLanguage) -> &'static str {
        match (self, language) {
            (Daypart::EarlyMorning, DisplayLanguage::Zh) => "用音乐开启美好的一天",
            (Daypart::Morning, DisplayLanguage::Zh) => "让音乐陪伴你专注工作",
            (Daypart::Noon, DisplayLanguage::Zh) => "放松一下，享受午后时光",
            (Daypart::Afternoon, DisplayLanguage::Zh) => "充满活力的下午茶时间",
            (Daypart::Evening, DisplayLanguage::Zh) => "夜幕降临，让音乐温暖你",
            (Daypart::LateNight, DisplayLanguage::Zh) => "夜深了，让音乐陪伴你",
            (Daypart::EarlyMorning, DisplayLanguage::En) => "Start the day with good music",
            (Daypart::Morning, DisplayLanguage::En) => "Music to keep you focused",
            (Daypart::Noon, DisplayLanguage::En) => "Take a break and unwind",
            (Daypart::Afternoon, DisplayLanguage::En) => "An energetic afternoon tea",
            (Daypart::Evening, DisplayLanguage::En) => "Night falls, let the music warm you",
            (Daypart::LateNight, DisplayLanguage::En) => "It's late, the music is here with you",
        }
    }
}

/// Whether any or all query tags must be present
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagMatchMode {
    #[default]
    Any,
    All,
}

/// Kind of catalog search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchKind {
    #[default]
    General,
    Artist,
    Title,
    Genre,
    Mood,
    Random,
}

impl SearchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchKind::General => "general",
            SearchKind::Artist => "artist",
            SearchKind::Title => "title",
            SearchKind::Genre => "genre",
            SearchKind::Mood => "mood",
            SearchKind::Random => "random",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "general" | "all" => Some(SearchKind::General),
            "artist" => Some(SearchKind::Artist),
            "title" => Some(SearchKind::Title),
            "genre" => Some(SearchKind::Genre),
            "mood" => Some(SearchKind::Mood),
            "random" => Some(SearchKind::Random),
            _ => None,
        }
    }
}

/// What the user seems to want from a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntentKind {
    Recommend,
    Question,
    Greeting,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    pub kind: IntentKind,
    pub confidence: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_daypart_boundaries() {
        assert_eq!(Daypart::from_hour(5), Daypart::LateNight);
        assert_eq!(Daypart::from_hour(6), Daypart::EarlyMorning);
        assert_eq!(Daypart::from_hour(9), Daypart::Morning);
        assert_eq!(Daypart::from_hour(12), Daypart::Noon);
        assert_eq!(Daypart::from_hour(14), Daypart::Afternoon);
        assert_eq!(Daypart::from_hour(18), Daypart::Evening);
        assert_eq!(Daypart::from_hour(22), Daypart::LateNight);
        assert_eq!(Daypart::from_hour(0), Daypart::LateNight);
    }

    #[test]
    fn test_daypart_moods_are_moods() {
        for hour in 0..24 {
            for tag in Daypart::from_hour(hour).moods() {
                assert_eq!(tag.dimension(), crate::models::TagDimension::Mood);
            }
        }
        assert_eq!(Daypart::Noon.title(DisplayLanguage::Zh), "午后小憩");
    }

    #[test]
    fn test_search_kind_from_str() {
        assert_eq!(SearchKind::from_str("ALL"), Some(SearchKind::General));
        assert_eq!(SearchKind::from_str("mood"), Some(SearchKind::Mood));
        assert_eq!(SearchKind::from_str("lyrics"), None);
    }
}
