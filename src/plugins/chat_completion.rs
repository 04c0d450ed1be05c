//! Chat-completion tag source - asks a hosted language model for tags

use async_trait::async_trait;
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::{ExternalTags, TagSource, TagSourceError};
use crate::config::UserConfig;
use crate::models::{Tag, TagDimension};
use crate::utils::json::first_json_object;

const PROVIDER_NAME: &str = "SiliconFlow";

const PROMPT_EXAMPLES: &str = r#"用户：周五下班在地铁上，又累又想放松
返回：{"tags": ["relaxing", "commute", "peaceful", "chill", "night"], "title": "周五下班放松时刻", "description": "通勤 · 治愈 · 放松"}

用户：80年代复古风格的City Pop
返回：{"tags": ["city-pop", "80s", "retro", "groovy", "nostalgic"], "title": "霓虹City Pop", "description": "复古 · 80年代 · 律动"}"#;

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// OpenAI-compatible chat-completion endpoint used as a tag source
pub struct ChatCompletionTagSource {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    system_prompt: String,
}

impl ChatCompletionTagSource {
    pub fn new(
        endpoint: String,
        api_key: String,
        model: String,
        timeout: Duration,
    ) -> Result<Self, TagSourceError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            endpoint,
            api_key,
            model,
            temperature: 0.7,
            max_tokens: 200,
            system_prompt: build_system_prompt(),
        })
    }

    /// Build a source from the user configuration, `None` when online
    /// extraction is not configured
    pub fn from_config(config: &UserConfig) -> Result<Option<Self>, TagSourceError> {
        if !config.online_ai_configured() {
            return Ok(None);
        }

        let mut source = Self::new(
            config.ai_endpoint.clone(),
            config.ai_api_key.clone(),
            config.ai_model.clone(),
            config.ai_timeout(),
        )?;
        source.temperature = config.ai_temperature;
        source.max_tokens = config.ai_max_tokens;

        Ok(Some(source))
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }
}

#[async_trait]
impl TagSource for ChatCompletionTagSource {
    fn provider(&self) -> &str {
        PROVIDER_NAME
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn fetch_tags(&self, input: &str) -> Result<ExternalTags, TagSourceError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &self.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: input,
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        debug!("Requesting tags from {} ({})", PROVIDER_NAME, self.model);

        let response = self
            .client
            .post(&self.endpoint)
            .header(header::CONTENT_TYPE, "application/json")
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(TagSourceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        parse_completion(&body)
    }
}

/// Pull the tag payload out of a chat-completion response body
pub fn parse_completion(body: &str) -> Result<ExternalTags, TagSourceError> {
    let response: ChatResponse = serde_json::from_str(body)?;

    let content = response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or(TagSourceError::EmptyContent)?;

    debug!("Tag source replied: {}", content);

    let object = first_json_object(&content).ok_or(TagSourceError::NoJsonObject)?;
    let tags: ExternalTags = serde_json::from_str(object)?;

    if tags.tags.is_empty() {
        return Err(TagSourceError::EmptyTags);
    }

    Ok(tags)
}

/// Instruction describing the vocabulary and the expected reply format
pub fn build_system_prompt() -> String {
    let taxonomy: Vec<String> = TagDimension::all()
        .iter()
        .map(|dimension| {
            let tags: Vec<&str> = Tag::in_dimension(*dimension).map(|t| t.as_str()).collect();
            let label = match dimension {
                TagDimension::Mood => "情绪",
                TagDimension::Scene => "场景",
                TagDimension::Genre => "流派",
                TagDimension::Era => "年代",
                TagDimension::Language => "语言",
                TagDimension::Tempo => "节奏",
                TagDimension::Vibe => "氛围",
            };
            format!("{}({}): {}", label, dimension.as_str(), tags.join(", "))
        })
        .collect();

    format!(
        "你是一个音乐推荐助手。用户会用自然语言描述想听的音乐，请从描述中提取标签，用于在曲库中检索歌曲。\n\n\
         只能使用以下标签：\n\n{}\n\n\
         只返回如下 JSON，不要添加其他内容：\n\
         {{\"tags\": [\"tag1\", \"tag2\"], \"title\": \"歌单标题（简短有创意）\", \"description\": \"十字以内的描述\"}}\n\n\
         示例：\n{}",
        taxonomy.join("\n"),
        PROMPT_EXAMPLES,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completion(content: &str) -> String {
        serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": content}}]
        })
        .to_string()
    }

    #[test]
    fn test_parse_completion_with_prose() {
        let body = completion(
            "当然！\n{\"tags\": [\"city-pop\", \"80s\"], \"title\": \"霓虹\", \"description\": \"复古\"}\n祝你愉快",
        );
        let tags = parse_completion(&body).unwrap();
        assert_eq!(tags.tags, vec!["city-pop", "80s"]);
        assert_eq!(tags.title.as_deref(), Some("霓虹"));
    }

    #[test]
    fn test_parse_completion_missing_optional_fields() {
        let tags = parse_completion(&completion(r#"{"tags": ["jazz"]}"#)).unwrap();
        assert_eq!(tags.title, None);
        assert_eq!(tags.description, None);
    }

    #[test]
    fn test_parse_completion_failures() {
        assert!(matches!(
            parse_completion(r#"{"choices": []}"#),
            Err(TagSourceError::EmptyContent)
        ));
        assert!(matches!(
            parse_completion(&completion("I cannot help with that")),
            Err(TagSourceError::NoJsonObject)
        ));
        assert!(matches!(
            parse_completion(&completion(r#"{"tags": []}"#)),
            Err(TagSourceError::EmptyTags)
        ));
        assert!(matches!(
            parse_completion(&completion(r#"{"tags": "chill"}"#)),
            Err(TagSourceError::Json(_))
        ));
        assert!(matches!(
            parse_completion("<html>bad gateway</html>"),
            Err(TagSourceError::Json(_))
        ));
    }

    #[test]
    fn test_system_prompt_lists_vocabulary() {
        let prompt = build_system_prompt();
        for tag in Tag::all() {
            assert!(prompt.contains(tag.as_str()), "missing {}", tag);
        }
        assert!(prompt.contains("\"tags\""));
    }

    #[test]
    fn test_from_config_requires_key() {
        let mut config = UserConfig::default();
        assert!(ChatCompletionTagSource::from_config(&config).unwrap().is_none());

        config.use_online_ai = true;
        config.ai_api_key = "sk-test".to_string();
        let source = ChatCompletionTagSource::from_config(&config).unwrap().unwrap();
        assert_eq!(source.model(), config.ai_model);
        assert_eq!(source.provider(), "SiliconFlow");
    }
}
