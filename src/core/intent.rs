//! Chat intent detection and assistant reply text

use lazy_static::lazy_static;
use rand::seq::SliceRandom;
use rand::RngCore;
use regex::Regex;

use crate::models::{DisplayLanguage, ExtractionSource, Intent, IntentKind};

lazy_static! {
    static ref RECOMMEND_PATTERN: Regex =
        Regex::new(r"推荐|找|听|想要|来点|给我|播放|放|搜").unwrap();
    static ref QUESTION_PATTERN: Regex = Regex::new(r"什么|怎么|如何|为什么|是不是").unwrap();
    static ref GREETING_PATTERN: Regex = Regex::new(r"你好|嗨|hi|hello|早|晚").unwrap();
}

/// Guess what a chat message asks for; requests win over questions and greetings
pub fn analyze_intent(input: &str) -> Intent {
    let normalized = input.to_lowercase();

    let (kind, confidence) = if RECOMMEND_PATTERN.is_match(&normalized) {
        (IntentKind::Recommend, 0.9)
    } else if QUESTION_PATTERN.is_match(&normalized) {
        (IntentKind::Question, 0.8)
    } else if GREETING_PATTERN.is_match(&normalized) {
        (IntentKind::Greeting, 0.9)
    } else {
        (IntentKind::Recommend, 0.6)
    };

    Intent { kind, confidence }
}

/// Reply announcing a generated playlist
pub fn playlist_reply(
    song_count: usize,
    title: &str,
    source: ExtractionSource,
    language: DisplayLanguage,
    rng: &mut dyn RngCore,
) -> String {
    let emoji = match source {
        ExtractionSource::External => "🤖",
        ExtractionSource::Local => "🐱",
    };

    let templates: [String; 4] = match language {
        DisplayLanguage::Zh => [
            format!("喵~ 根据你的心情，我找到了 {song_count} 首歌！这个「{title}」应该很合你胃口 {emoji}🎵"),
            format!("呼噜呼噜~ 捕获到你的需求了！为你准备了 {song_count} 首歌的「{title}」{emoji}"),
            format!("喵呜！这 {song_count} 首歌组成的「{title}」，是本猫精心挑选的~ 🎶"),
            format!("找到啦！「{title}」共 {song_count} 首歌，快来听听看~ 🐾"),
        ],
        DisplayLanguage::En => [
            format!("Meow~ I found {song_count} songs for your mood! \"{title}\" should be just right {emoji}🎵"),
            format!("Purr~ Got it! Here are {song_count} songs in \"{title}\" {emoji}"),
            format!("Mrrow! These {song_count} songs make up \"{title}\", hand-picked by this cat~ 🎶"),
            format!("Found it! \"{title}\" has {song_count} songs, give it a listen~ 🐾"),
        ],
    };

    templates.choose(rng).cloned().unwrap_or_default()
}

/// Reply when nothing in the catalog matched
pub fn no_result_reply(language: DisplayLanguage, rng: &mut dyn RngCore) -> String {
    let templates: &[&str] = match language {
        DisplayLanguage::Zh => &[
            "喵...这个有点难倒我了，换个说法试试？比如告诉我你现在的心情或者想听什么风格的歌~",
            "呼噜...没找到完全匹配的歌，要不要换个方式描述？比如「下班想放松」或「想听复古的歌」",
            "喵呜~ 我的曲库里暂时没有完全符合的，试试其他关键词？比如情绪、场景或者风格~",
        ],
        DisplayLanguage::En => &[
            "Meow... that one stumped me. Try telling me how you feel or what style you want~",
            "Purr... nothing matched exactly. Maybe describe it another way, like \"unwind after work\" or \"something retro\"",
            "Mrrow~ my library has nothing quite like that yet. Try a mood, a scene or a genre~",
        ],
    };

    templates
        .choose(rng)
        .map(|reply| reply.to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_intent_priority() {
        assert_eq!(analyze_intent("给我来点爵士").kind, IntentKind::Recommend);
        // "听" outranks the question word
        assert_eq!(analyze_intent("听什么好").confidence, 0.9);
        assert_eq!(analyze_intent("这是什么歌").kind, IntentKind::Question);
        assert_eq!(analyze_intent("Hello there").kind, IntentKind::Greeting);

        let fallback = analyze_intent("jazz");
        assert_eq!(fallback.kind, IntentKind::Recommend);
        assert_eq!(fallback.confidence, 0.6);
    }

    #[test]
    fn test_playlist_reply_mentions_title_and_count() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..10 {
            let reply = playlist_reply(12, "通勤治愈歌单", ExtractionSource::Local, DisplayLanguage::Zh, &mut rng);
            assert!(reply.contains("12"));
            assert!(reply.contains("「通勤治愈歌单」"));
            assert!(!reply.contains("🤖"));
        }

        // an all-zero generator always picks the first template
        let reply = playlist_reply(3, "T", ExtractionSource::External, DisplayLanguage::Zh, &mut StepRng::new(0, 0));
        assert_eq!(reply, "喵~ 根据你的心情，我找到了 3 首歌！这个「T」应该很合你胃口 🤖🎵");

        let mut first = StdRng::seed_from_u64(0);
        let replies: Vec<String> = (0..40)
            .map(|_| playlist_reply(3, "T", ExtractionSource::External, DisplayLanguage::Zh, &mut first))
            .collect();
        assert!(replies.iter().any(|r| r.contains("🤖")));
    }

    #[test]
    fn test_no_result_reply() {
        let reply = no_result_reply(DisplayLanguage::Zh, &mut StepRng::new(0, 0));
        assert!(reply.starts_with("喵..."));

        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..10 {
            assert!(!no_result_reply(DisplayLanguage::En, &mut rng).is_empty());
        }
    }
}
