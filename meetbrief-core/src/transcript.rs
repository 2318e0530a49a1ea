use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Separator between the plain texts of two sources.
pub const FULL_TEXT_SEPARATOR: &str = "\n\n";

/// Separator between the diarized texts of two sources (also used between
/// chunks of one oversized recording, which merge by the same rules).
pub const CONTINUATION_SEPARATOR: &str = "\n\n--- (continuation) ---\n\n";

/// Output of one transcription call for one source (or one audio chunk).
///
/// Immutable once produced; the engine owns it until it is merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptionResult {
    pub full_text: String,
    /// Text with inline `[MM:SS] **Speaker N:**` labels.
    pub speaker_segmented_text: String,
    /// At least 1, and at least the number of distinct labels in
    /// `speaker_segmented_text`.
    pub speaker_count: u32,
    /// BCP-47-ish code, or `"unknown"`.
    pub detected_language: String,
    pub duration_seconds: f64,
}

/// The logical transcript of one session, possibly aggregating many sources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedTranscript {
    pub full_text: String,
    pub speaker_segmented_text: String,
    pub speaker_count: u32,
    pub detected_language: String,
    pub duration_seconds: f64,
}

// Chunks of one oversized recording are merged first, then treated as one
// per-source result for the cross-source merge.
impl From<MergedTranscript> for TranscriptionResult {
    fn from(merged: MergedTranscript) -> Self {
        Self {
            full_text: merged.full_text,
            speaker_segmented_text: merged.speaker_segmented_text,
            speaker_count: merged.speaker_count,
            detected_language: merged.detected_language,
            duration_seconds: merged.duration_seconds,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MergeError {
    // The caller is expected to take the "no usable sources" failure path
    // before ever merging; an empty merge is a programming error, not a
    // user-facing condition.
    #[error("cannot merge zero transcription results")]
    Empty,
}

/// Merges per-source transcription results, in arrival order, into one
/// transcript.
///
/// Speaker numbering is per-source-relative: "Speaker 1" from two different
/// sources is almost certainly two different people, and no reconciliation is
/// attempted. `speaker_count` is therefore the max over inputs, a conservative
/// bound, not a distinct-speaker count.
pub fn merge(results: &[TranscriptionResult]) -> Result<MergedTranscript, MergeError> {
    let first = results.first().ok_or(MergeError::Empty)?;

    if results.len() == 1 {
        // Identity: no separators, no information loss.
        return Ok(MergedTranscript {
            full_text: first.full_text.clone(),
            speaker_segmented_text: first.speaker_segmented_text.clone(),
            speaker_count: first.speaker_count,
            detected_language: first.detected_language.clone(),
            duration_seconds: first.duration_seconds,
        });
    }

    let full_text = results
        .iter()
        .map(|r| r.full_text.as_str())
        .collect::<Vec<_>>()
        .join(FULL_TEXT_SEPARATOR);

    let speaker_segmented_text = results
        .iter()
        .map(|r| r.speaker_segmented_text.as_str())
        .collect::<Vec<_>>()
        .join(CONTINUATION_SEPARATOR);

    Ok(MergedTranscript {
        full_text,
        speaker_segmented_text,
        speaker_count: results.iter().map(|r| r.speaker_count).max().unwrap_or(1),
        // First-source-wins; the merge is never re-detected.
        detected_language: first.detected_language.clone(),
        duration_seconds: results.iter().map(|r| r.duration_seconds).sum(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(text: &str, speakers: u32, duration: f64) -> TranscriptionResult {
        TranscriptionResult {
            full_text: text.into(),
            speaker_segmented_text: format!("[00:00] **Speaker 1:**\n{text}"),
            speaker_count: speakers,
            detected_language: "en".into(),
            duration_seconds: duration,
        }
    }

    #[test]
    fn merge_of_one_is_identity() {
        let r = result("hello world", 2, 61.5);
        let merged = merge(std::slice::from_ref(&r)).unwrap();
        assert_eq!(merged.full_text, r.full_text);
        assert_eq!(merged.speaker_segmented_text, r.speaker_segmented_text);
        assert_eq!(merged.speaker_count, r.speaker_count);
        assert_eq!(merged.detected_language, r.detected_language);
        assert_eq!(merged.duration_seconds, r.duration_seconds);
        assert!(!merged.full_text.contains(FULL_TEXT_SEPARATOR.trim()));
    }

    #[test]
    fn merge_sums_durations() {
        let results = vec![
            result("a", 1, 60.0),
            result("b", 1, 90.0),
            result("c", 1, 0.5),
        ];
        assert_eq!(merge(&results).unwrap().duration_seconds, 150.5);
    }

    #[test]
    fn merge_takes_max_speaker_count_not_sum() {
        let results = vec![result("a", 2, 1.0), result("b", 3, 1.0), result("c", 1, 1.0)];
        assert_eq!(merge(&results).unwrap().speaker_count, 3);
    }

    #[test]
    fn merge_preserves_arrival_order() {
        let a = result("first source", 1, 1.0);
        let b = result("second source", 1, 1.0);
        let merged = merge(&[a, b]).unwrap();

        let first = merged.full_text.find("first source").unwrap();
        let second = merged.full_text.find("second source").unwrap();
        assert!(first < second);
        assert!(merged.speaker_segmented_text.contains(CONTINUATION_SEPARATOR));
    }

    #[test]
    fn merge_keeps_first_language() {
        let mut a = result("a", 1, 1.0);
        a.detected_language = "ru".into();
        let mut b = result("b", 1, 1.0);
        b.detected_language = "en".into();
        assert_eq!(merge(&[a, b]).unwrap().detected_language, "ru");
    }

    #[test]
    fn merge_of_nothing_is_an_error() {
        assert_eq!(merge(&[]).unwrap_err(), MergeError::Empty);
    }
}
