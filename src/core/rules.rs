//! Local extraction rules: scene patterns and the keyword table

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::{DisplayLanguage, Tag};
use Tag::*;

/// A common way of describing a listening situation
pub struct ScenePattern {
    pub regex: Regex,
    pub tags: &'static [Tag],
    title_zh: &'static str,
    title_en: &'static str,
}

impl ScenePattern {
    fn new(
        pattern: &str,
        tags: &'static [Tag],
        title_zh: &'static str,
        title_en: &'static str,
    ) -> Self {
        Self {
            regex: Regex::new(pattern).unwrap(),
            tags,
            title_zh,
            title_en,
        }
    }

    pub fn title(&self, language: DisplayLanguage) -> &'static str {
        match language {
            DisplayLanguage::Zh => self.title_zh,
            DisplayLanguage::En => self.title_en,
        }
    }
}

lazy_static! {
    /// Tested in order against lowercased input; the first hit wins
    pub static ref SCENE_PATTERNS: Vec<ScenePattern> = vec![
        ScenePattern::new(
            r"周五.*下班|下班.*周五",
            &[Friday, Commute, Relaxing, Chill],
            "周五下班放松时刻",
            "Friday Wind-down",
        ),
        ScenePattern::new(
            r"地铁.*累|累.*地铁|通勤.*疲惫",
            &[Commute, Relaxing, Peaceful, Slow],
            "通勤治愈歌单",
            "Soothing Commute",
        ),
        ScenePattern::new(
            r"深夜.*一个人|一个人.*深夜|独处.*夜",
            &[Night, Melancholic, Slow, Peaceful],
            "深夜独处时光",
            "Alone at Midnight",
        ),
        ScenePattern::new(
            r"雨天.*读书|读书.*雨天|下雨.*看书",
            &[Rain, Study, Peaceful, Acoustic],
            "雨天阅读时光",
            "Rainy Day Reading",
        ),
        ScenePattern::new(
            r"早晨.*起床|起床.*早晨|清晨",
            &[Morning, Peaceful, Happy, Upbeat],
            "元气早晨",
            "Bright Morning",
        ),
        ScenePattern::new(
            r"开车.*兜风|自驾|road\s*trip",
            &[Driving, Happy, Upbeat, Groovy],
            "公路旅行歌单",
            "Road Trip",
        ),
        ScenePattern::new(
            r"失恋|分手|心碎",
            &[Melancholic, Romantic, Ballad, Slow],
            "疗伤情歌",
            "Healing Love Songs",
        ),
        ScenePattern::new(
            r"80.*复古|复古.*80|city\s*pop",
            &[CityPop, Eighties, Retro, Groovy, Japanese],
            "80年代复古City Pop",
            "Retro 80s City Pop",
        ),
        ScenePattern::new(
            r"学习.*专注|专注.*学习|写作业",
            &[Study, Instrumental, Peaceful, Chill],
            "专注学习BGM",
            "Deep Focus",
        ),
        ScenePattern::new(
            r"睡前|助眠|入睡",
            &[Sleep, Slow, Peaceful, Instrumental],
            "睡前轻音乐",
            "Bedtime Calm",
        ),
        ScenePattern::new(
            r"健身.*运动|运动.*健身|跑步",
            &[Workout, Energetic, Fast, Upbeat],
            "燃脂运动歌单",
            "Workout Burn",
        ),
        ScenePattern::new(
            r"约会|恋爱|甜蜜",
            &[Romantic, Happy, Dreamy, Chill],
            "甜蜜约会歌单",
            "Date Night",
        ),
    ];
}

/// Keyword to tags table, every substring hit contributes its tags
pub const KEYWORD_TAGS: &[(&str, &[Tag])] = &[
    // mood
    ("放松", &[Relaxing, Peaceful, Chill]),
    ("轻松", &[Relaxing, Peaceful, Chill]),
    ("解压", &[Relaxing, Peaceful]),
    ("累", &[Relaxing, Peaceful, Slow]),
    ("疲惫", &[Relaxing, Peaceful, Slow]),
    ("治愈", &[Peaceful, Chill, Dreamy]),
    ("舒服", &[Relaxing, Chill, Peaceful]),
    ("安静", &[Peaceful, Slow, Acoustic]),
    ("平静", &[Peaceful, Slow]),
    ("开心", &[Happy, Upbeat, Energetic]),
    ("快乐", &[Happy, Upbeat]),
    ("高兴", &[Happy, Upbeat]),
    ("嗨", &[Energetic, Upbeat, Party]),
    ("兴奋", &[Energetic, Intense, Fast]),
    ("活力", &[Energetic, Upbeat, Fast]),
    ("伤感", &[Melancholic, Slow, Ballad]),
    ("难过", &[Melancholic, Slow]),
    ("悲伤", &[Melancholic, Slow, Ballad]),
    ("失恋", &[Melancholic, Romantic, Ballad]),
    ("分手", &[Melancholic, Romantic, Ballad]),
    ("想哭", &[Melancholic, Slow]),
    ("浪漫", &[Romantic, Dreamy, Slow]),
    ("甜蜜", &[Romantic, Happy]),
    ("恋爱", &[Romantic, Happy, Dreamy]),
    ("约会", &[Romantic, Chill, Cafe]),
    ("怀旧", &[Nostalgic, Retro]),
    ("回忆", &[Nostalgic, Dreamy]),
    ("青春", &[Nostalgic, Happy]),
    ("童年", &[Nostalgic, Peaceful]),
    // scene
    ("地铁", &[Commute, Chill]),
    ("通勤", &[Commute, Medium]),
    ("上班", &[Commute, Morning]),
    ("下班", &[Commute, Relaxing, Night]),
    ("公交", &[Commute, Chill]),
    ("运动", &[Workout, Energetic, Fast]),
    ("健身", &[Workout, Energetic, Fast]),
    ("跑步", &[Workout, Fast, Upbeat]),
    ("锻炼", &[Workout, Energetic]),
    ("学习", &[Study, Peaceful, Instrumental]),
    ("读书", &[Study, Peaceful, Slow]),
    ("工作", &[Study, Chill, Medium]),
    ("专注", &[Study, Instrumental, Peaceful]),
    ("睡觉", &[Sleep, Slow, Peaceful]),
    ("睡眠", &[Sleep, Slow, Peaceful]),
    ("助眠", &[Sleep, Slow, Peaceful, Instrumental]),
    ("晚安", &[Sleep, Slow, Peaceful]),
    ("派对", &[Party, Energetic, Fast]),
    ("聚会", &[Party, Happy, Upbeat]),
    ("蹦迪", &[Party, Electronic, Fast]),
    ("咖啡", &[Cafe, Chill, Acoustic]),
    ("咖啡厅", &[Cafe, Chill, Acoustic]),
    ("下午茶", &[Cafe, Peaceful, Slow]),
    ("雨天", &[Rain, Melancholic, Peaceful]),
    ("下雨", &[Rain, Melancholic, Dreamy]),
    ("阴天", &[Rain, Melancholic]),
    ("夜晚", &[Night, Chill, Dreamy]),
    ("深夜", &[Night, Slow, Peaceful]),
    ("凌晨", &[Night, Slow, Melancholic]),
    ("晚上", &[Night, Chill]),
    ("早晨", &[Morning, Peaceful, Happy]),
    ("早上", &[Morning, Peaceful]),
    ("起床", &[Morning, Upbeat]),
    ("开车", &[Driving, Medium, Groovy]),
    ("自驾", &[Driving, Happy, Upbeat]),
    ("兜风", &[Driving, Happy, Chill]),
    ("周五", &[Friday, Relaxing, Happy]),
    ("周末", &[Weekend, Chill, Happy]),
    ("假期", &[Weekend, Relaxing, Happy]),
    // genre
    ("流行", &[Pop]),
    ("摇滚", &[Rock, Energetic]),
    ("爵士", &[Jazz, Chill, Groovy]),
    ("古典", &[Classical, Peaceful, Instrumental]),
    ("电子", &[Electronic, Energetic]),
    ("嘻哈", &[HipHop, Groovy]),
    ("说唱", &[HipHop, Fast]),
    ("民谣", &[Folk, Acoustic]),
    ("抒情", &[Ballad, Slow]),
    ("情歌", &[Ballad, Romantic]),
    ("灵魂乐", &[Soul, Soulful, RnB]),
    ("r&b", &[RnB, Soulful, Groovy]),
    ("rnb", &[RnB, Soulful]),
    ("citypop", &[CityPop, Eighties, Retro, Groovy]),
    ("city pop", &[CityPop, Eighties, Retro, Groovy]),
    ("城市流行", &[CityPop, Eighties, Retro]),
    ("日系", &[Japanese, CityPop]),
    ("纯音乐", &[Instrumental, Peaceful]),
    ("钢琴", &[Instrumental, Classical, Peaceful]),
    ("轻音乐", &[Instrumental, Peaceful, Chill]),
    // era
    ("80年代", &[Eighties, Retro]),
    ("90年代", &[Nineties, Retro]),
    ("八十年代", &[Eighties, Retro]),
    ("九十年代", &[Nineties, Retro]),
    ("复古", &[Retro, Nostalgic]),
    ("老歌", &[Retro, Nostalgic]),
    ("经典", &[Retro, Nostalgic]),
    ("新歌", &[Modern, TwentyTwenties]),
    ("最新", &[Modern, TwentyTwenties]),
    // language
    ("中文", &[Mandarin]),
    ("国语", &[Mandarin]),
    ("华语", &[Mandarin]),
    ("粤语", &[Cantonese]),
    ("广东话", &[Cantonese]),
    ("英文", &[English]),
    ("英语", &[English]),
    ("日文", &[Japanese]),
    ("日语", &[Japanese]),
    ("韩文", &[Korean]),
    ("韩语", &[Korean]),
    // tempo
    ("慢歌", &[Slow, Ballad]),
    ("快歌", &[Fast, Upbeat]),
    ("节奏感", &[Groovy, Medium]),
    ("律动", &[Groovy, Medium]),
    // vibe
    ("慵懒", &[Chill, Slow]),
    ("欢快", &[Upbeat, Happy]),
    ("梦幻", &[Dreamy, Peaceful]),
    ("迷幻", &[Dreamy, Electronic]),
    ("有感觉", &[Soulful, Groovy]),
    ("原声", &[Acoustic]),
    ("不插电", &[Acoustic]),
];

/// Scene tags that can name a synthesized playlist title
pub const TITLE_SCENES: &[Tag] = &[
    Commute, Workout, Study, Sleep, Party, Cafe, Rain, Night, Morning, Driving,
];

/// Mood tags that can name a synthesized playlist title
pub const TITLE_MOODS: &[Tag] = &[
    Relaxing, Energetic, Melancholic, Happy, Romantic, Nostalgic, Peaceful,
];

/// Genre tags that can name a synthesized playlist title
pub const TITLE_GENRES: &[Tag] = &[CityPop, RnB, Rock, Jazz, Electronic, Folk, Ballad];

/// First scene pattern matching the normalized input
pub fn match_scene_pattern(normalized: &str) -> Option<&'static ScenePattern> {
    SCENE_PATTERNS
        .iter()
        .find(|pattern| pattern.regex.is_match(normalized))
}

/// Tags of every keyword contained in the normalized input, in table order
pub fn keyword_tags(normalized: &str) -> impl Iterator<Item = Tag> + '_ {
    KEYWORD_TAGS
        .iter()
        .filter(move |(keyword, _)| normalized.contains(&keyword.to_lowercase()))
        .flat_map(|(_, tags)| tags.iter().copied())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TagDimension;

    #[test]
    fn test_first_pattern_wins() {
        // matches both the breakup pattern and the date pattern
        let pattern = match_scene_pattern("失恋了还要去约会").unwrap();
        assert_eq!(pattern.title(DisplayLanguage::Zh), "疗伤情歌");
    }

    #[test]
    fn test_case_insensitive_patterns_rely_on_normalization() {
        assert!(match_scene_pattern("city pop please").is_some());
        assert!(match_scene_pattern("a road trip").is_some());
        assert!(match_scene_pattern("随便").is_none());
    }

    #[test]
    fn test_keyword_tags_collects_all_hits() {
        let tags: Vec<Tag> = keyword_tags("周末在咖啡厅").collect();
        assert!(tags.contains(&Weekend));
        assert!(tags.contains(&Cafe));
        assert!(tags.contains(&Acoustic));
        assert_eq!(keyword_tags("nothing").count(), 0);
    }

    #[test]
    fn test_title_words_stay_in_their_dimension() {
        assert!(TITLE_SCENES.iter().all(|t| t.dimension() == TagDimension::Scene));
        assert!(TITLE_MOODS.iter().all(|t| t.dimension() == TagDimension::Mood));
        assert!(TITLE_GENRES.iter().all(|t| t.dimension() == TagDimension::Genre));
        assert!(!TITLE_SCENES.contains(&Weekend));
        assert!(!TITLE_MOODS.contains(&Intense));
        assert!(!TITLE_GENRES.contains(&Pop));
    }

    #[test]
    fn test_keywords_are_lowercase() {
        for (keyword, tags) in KEYWORD_TAGS {
            assert_eq!(*keyword, keyword.to_lowercase());
            assert!(!tags.is_empty());
        }
    }
}
