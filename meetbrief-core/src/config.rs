use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default split threshold for oversized audio, matching the transcription
/// vendor's practical upload limit.
pub const DEFAULT_MAX_AUDIO_CHUNK_BYTES: u64 = 90 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub transcription: TranscriptionSettings,
    pub analysis: AnalysisSettings,

    /// Language code for reports when the user does not pick one
    /// ("original" means: the language of the recording).
    pub default_report_language: String,

    /// Audio files above this size are split into chunks that are
    /// transcribed independently and merged.
    pub max_audio_chunk_bytes: u64,

    /// Extra fonts (e.g. a CJK family) for the PDF renderer.
    pub pdf_fonts_dir: Option<PathBuf>,

    // Secrets are stored outside this struct at rest (environment only).
    #[serde(default)]
    pub api_keys_present: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptionSettings {
    pub model: String,
    /// Hint passed to the vendor; detection stays enabled either way.
    pub language_hint: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSettings {
    pub base_url: String,
    pub model: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            transcription: TranscriptionSettings {
                model: "nova-2".into(),
                language_hint: None,
            },
            analysis: AnalysisSettings {
                base_url: "https://api.openai.com/v1".into(),
                model: "gpt-4o".into(),
            },
            default_report_language: "original".into(),
            max_audio_chunk_bytes: DEFAULT_MAX_AUDIO_CHUNK_BYTES,
            pdf_fonts_dir: None,
            api_keys_present: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips() {
        let cfg = AppConfig::default();
        let json = serde_json::to_string(&cfg).unwrap();
        let loaded: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, cfg);
        assert_eq!(loaded.transcription.model, "nova-2");
    }
}
