//! Deepgram speech-to-text: request building and response folding.
//!
//! The response's per-utterance diarization is folded into one
//! speaker-segmented text with inline `[MM:SS] **Speaker N:**` labels.
//! Speaker numbering restarts per request, so results from different sources
//! must be merged with that in mind (see the merge engine).

use crate::request::{Body, HttpRequest};
use anyhow::Context;
use meetbrief_core::timefmt::format_timestamp;
use meetbrief_core::transcript::TranscriptionResult;
use serde::Deserialize;

const LISTEN_URL: &str = "https://api.deepgram.com/v1/listen";

#[derive(Clone, PartialEq, Eq)]
pub struct DeepgramConfig {
    pub api_key: String,
    pub model: String,
    /// Optional vendor hint; language detection stays enabled regardless.
    pub language_hint: Option<String>,
}

impl std::fmt::Debug for DeepgramConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeepgramConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("language_hint", &self.language_hint)
            .finish()
    }
}

pub fn build_transcription_request(
    cfg: &DeepgramConfig,
    audio_bytes: Vec<u8>,
    mime_type: &str,
) -> HttpRequest {
    let mut url = format!(
        "{LISTEN_URL}?model={}&smart_format=true&diarize=true&punctuate=true&paragraphs=true&utterances=true&detect_language=true",
        cfg.model
    );
    if let Some(lang) = cfg.language_hint.as_deref().filter(|s| !s.trim().is_empty()) {
        url.push_str(&format!("&language={lang}"));
    }

    HttpRequest {
        method: "POST".into(),
        url,
        headers: vec![
            ("Authorization".into(), format!("Token {}", cfg.api_key)),
            ("Content-Type".into(), mime_type.into()),
            ("Accept".into(), "application/json".into()),
        ],
        body: Body::Bytes {
            content_type: mime_type.into(),
            bytes: audio_bytes,
        },
    }
}

#[derive(Debug, Deserialize)]
struct ListenResponse {
    #[serde(default)]
    results: Option<ListenResults>,
}

#[derive(Debug, Default, Deserialize)]
struct ListenResults {
    #[serde(default)]
    channels: Vec<Channel>,
    #[serde(default)]
    utterances: Vec<Utterance>,
}

#[derive(Debug, Default, Deserialize)]
struct Channel {
    #[serde(default)]
    alternatives: Vec<Alternative>,
    #[serde(default)]
    detected_language: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Alternative {
    #[serde(default)]
    transcript: String,
}

#[derive(Debug, Default, Deserialize)]
struct Utterance {
    #[serde(default)]
    speaker: u32,
    #[serde(default)]
    transcript: String,
    #[serde(default)]
    start: f64,
    #[serde(default)]
    end: f64,
}

pub fn parse_transcription_response(body: &[u8]) -> anyhow::Result<TranscriptionResult> {
    let resp: ListenResponse = serde_json::from_slice(body).context("decode Deepgram JSON")?;
    let results = resp.results.unwrap_or_default();

    let full_text = results
        .channels
        .first()
        .and_then(|c| c.alternatives.first())
        .map(|a| a.transcript.clone())
        .unwrap_or_default();

    let detected_language = results
        .channels
        .first()
        .and_then(|c| c.detected_language.clone())
        .unwrap_or_else(|| "unknown".into());

    let mut segmented = String::new();
    let mut current_speaker: Option<u32> = None;
    for u in &results.utterances {
        if current_speaker != Some(u.speaker) {
            segmented.push_str(&format!(
                "\n\n[{}] **Speaker {}:**\n",
                format_timestamp(u.start),
                u.speaker + 1
            ));
            current_speaker = Some(u.speaker);
        }
        segmented.push_str(&u.transcript);
        segmented.push(' ');
    }

    let mut speakers: Vec<u32> = results.utterances.iter().map(|u| u.speaker).collect();
    speakers.sort_unstable();
    speakers.dedup();
    let speaker_count = speakers.len().max(1) as u32;

    let duration_seconds = results
        .utterances
        .iter()
        .map(|u| u.end)
        .fold(0.0_f64, f64::max);

    Ok(TranscriptionResult {
        full_text,
        speaker_segmented_text: segmented.trim().to_string(),
        speaker_count,
        detected_language,
        duration_seconds,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> DeepgramConfig {
        DeepgramConfig {
            api_key: "dg-key".into(),
            model: "nova-2".into(),
            language_hint: Some("ru".into()),
        }
    }

    #[test]
    fn builds_listen_request_with_diarization() {
        let req = build_transcription_request(&cfg(), vec![1, 2, 3], "audio/mpeg");
        assert_eq!(req.method, "POST");
        assert!(req.url.starts_with(LISTEN_URL));
        assert!(req.url.contains("model=nova-2"));
        assert!(req.url.contains("diarize=true"));
        assert!(req.url.contains("utterances=true"));
        assert!(req.url.contains("detect_language=true"));
        assert!(req.url.contains("language=ru"));
        assert_eq!(req.header("authorization"), Some("Token dg-key"));
        match &req.body {
            Body::Bytes { content_type, bytes } => {
                assert_eq!(content_type, "audio/mpeg");
                assert_eq!(bytes.len(), 3);
            }
            other => panic!("expected bytes body, got {other:?}"),
        }
    }

    #[test]
    fn language_hint_is_optional() {
        let mut config = cfg();
        config.language_hint = None;
        let req = build_transcription_request(&config, vec![], "audio/mpeg");
        assert!(!req.url.contains("language="), "{}", req.url);
        // detect_language= is still present; only the hint is gone.
        assert!(req.url.contains("detect_language=true"));
    }

    #[test]
    fn folds_utterances_into_speaker_blocks() {
        let body = br#"{
            "results": {
                "channels": [{
                    "alternatives": [{"transcript": "hello there general"}],
                    "detected_language": "en"
                }],
                "utterances": [
                    {"speaker": 0, "transcript": "hello", "start": 0.0, "end": 2.0},
                    {"speaker": 0, "transcript": "there", "start": 2.0, "end": 3.5},
                    {"speaker": 1, "transcript": "general", "start": 3.5, "end": 61.0}
                ]
            }
        }"#;
        let result = parse_transcription_response(body).unwrap();
        assert_eq!(result.full_text, "hello there general");
        assert_eq!(result.detected_language, "en");
        assert_eq!(result.speaker_count, 2);
        assert_eq!(result.duration_seconds, 61.0);
        assert!(result.speaker_segmented_text.contains("[00:00] **Speaker 1:**"));
        assert!(result.speaker_segmented_text.contains("[00:03] **Speaker 2:**"));
        // Consecutive utterances of one speaker stay in one block.
        assert_eq!(result.speaker_segmented_text.matches("**Speaker 1:**").count(), 1);
    }

    #[test]
    fn empty_response_still_yields_one_speaker() {
        let result = parse_transcription_response(br#"{"results": {}}"#).unwrap();
        assert_eq!(result.speaker_count, 1);
        assert_eq!(result.detected_language, "unknown");
        assert_eq!(result.duration_seconds, 0.0);
        assert!(result.speaker_segmented_text.is_empty());
    }

    #[test]
    fn garbage_body_is_an_error() {
        assert!(parse_transcription_response(b"not json").is_err());
    }
}
