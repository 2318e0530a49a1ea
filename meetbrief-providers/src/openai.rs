//! OpenAI-compatible chat completion for the analysis step.

use crate::prompt::{SYSTEM_PROMPT, build_user_message};
use crate::request::{Body, HttpRequest};
use anyhow::{Context, anyhow};
use meetbrief_core::analysis::AnalysisDocument;
use meetbrief_core::lang::TargetLanguage;
use meetbrief_core::transcript::MergedTranscript;
use serde::Deserialize;
use serde_json::json;

#[derive(Clone, PartialEq, Eq)]
pub struct OpenAiConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

impl std::fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .finish()
    }
}

pub fn build_analysis_request(
    cfg: &OpenAiConfig,
    transcript: &MergedTranscript,
    target: TargetLanguage,
) -> HttpRequest {
    let url = join_url(&cfg.base_url, "/chat/completions");

    let payload = json!({
        "model": cfg.model,
        "messages": [
            {"role": "system", "content": SYSTEM_PROMPT},
            {"role": "user", "content": build_user_message(transcript, target)},
        ],
        "temperature": 0.4,
        "max_tokens": 16384,
        "response_format": {"type": "json_object"},
    });

    HttpRequest {
        method: "POST".into(),
        url,
        headers: vec![
            ("Content-Type".into(), "application/json".into()),
            ("Authorization".into(), format!("Bearer {}", cfg.api_key)),
        ],
        body: Body::Json(payload.to_string()),
    }
}

fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{}/{}", base, path)
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Debug, Deserialize)]
struct Message {
    content: Option<String>,
}

pub fn parse_chat_content(body: &[u8]) -> anyhow::Result<String> {
    let resp: ChatResponse = serde_json::from_slice(body).context("decode chat JSON")?;
    let content = resp
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or_else(|| anyhow!("no content in chat completion response"))?;
    Ok(content)
}

/// Extracts the model's JSON document from a chat completion response.
///
/// Some models wrap the JSON in markdown fences even in json_object mode;
/// strip those before parsing.
pub fn parse_analysis_document(body: &[u8]) -> anyhow::Result<AnalysisDocument> {
    let content = parse_chat_content(body)?;
    let cleaned = strip_code_fences(&content);
    let doc: AnalysisDocument =
        serde_json::from_str(cleaned).context("decode analysis document JSON")?;
    Ok(doc)
}

fn strip_code_fences(content: &str) -> &str {
    let trimmed = content.trim();
    let without_open = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    without_open
        .strip_suffix("```")
        .unwrap_or(without_open)
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transcript() -> MergedTranscript {
        MergedTranscript {
            full_text: "hi".into(),
            speaker_segmented_text: "[00:00] **Speaker 1:**\nhi".into(),
            speaker_count: 1,
            detected_language: "en".into(),
            duration_seconds: 5.0,
        }
    }

    #[test]
    fn join_url_handles_trailing_slash() {
        assert_eq!(
            join_url("https://api.example.com/v1/", "/chat/completions"),
            "https://api.example.com/v1/chat/completions"
        );
        assert_eq!(
            join_url("https://api.example.com/v1", "chat/completions"),
            "https://api.example.com/v1/chat/completions"
        );
    }

    #[test]
    fn builds_json_object_request() {
        let cfg = OpenAiConfig {
            base_url: "https://api.example.com/v1".into(),
            api_key: "k".into(),
            model: "gpt-4o".into(),
        };
        let req = build_analysis_request(&cfg, &transcript(), TargetLanguage::Ru);
        assert!(req.url.ends_with("/chat/completions"));
        assert_eq!(req.header("authorization"), Some("Bearer k"));
        match &req.body {
            Body::Json(s) => {
                assert!(s.contains("\"json_object\""));
                assert!(s.contains("RUSSIAN"));
            }
            other => panic!("expected json body, got {other:?}"),
        }
    }

    #[test]
    fn parses_analysis_document_from_chat_content() {
        let body = br#"{"choices":[{"message":{"content":"{\"meeting_topic_short\":\"Budget sync\"}"}}]}"#;
        let doc = parse_analysis_document(body).unwrap();
        assert_eq!(doc.topic_short(), "Budget sync");
    }

    #[test]
    fn strips_markdown_fences() {
        assert_eq!(
            strip_code_fences("```json\n{\"a\":1}\n```"),
            "{\"a\":1}"
        );
        assert_eq!(strip_code_fences("{\"a\":1}"), "{\"a\":1}");
    }

    #[test]
    fn missing_content_is_an_error() {
        let body = br#"{"choices":[{"message":{}}]}"#;
        assert!(parse_analysis_document(body).is_err());
    }

    #[test]
    fn unparseable_content_is_an_error() {
        let body = br#"{"choices":[{"message":{"content":"the model rambled instead"}}]}"#;
        assert!(parse_analysis_document(body).is_err());
    }
}
