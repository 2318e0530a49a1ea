//! Short chat-facing preview of a finished analysis.

use crate::analysis::AnalysisDocument;
use crate::timefmt::format_timestamp;
use crate::transcript::MergedTranscript;

/// Character budget for the executive-summary excerpt in the preview.
pub const SUMMARY_BUDGET: usize = 200;

/// Character budget for error excerpts surfaced to the chat transport.
pub const ERROR_EXCERPT_BUDGET: usize = 400;

/// Truncates to `max_chars`, appending an ellipsis when anything was cut.
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= max_chars {
        return trimmed.to_string();
    }
    let mut out: String = trimmed.chars().take(max_chars).collect();
    out.push('…');
    out
}

/// Builds the one-message summary shown in chat alongside the report files.
pub fn build_preview(doc: &AnalysisDocument, transcript: &MergedTranscript) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(doc.topic_short().to_string());

    let participants = doc
        .passport
        .as_ref()
        .and_then(|p| p.participants_count.clone())
        .unwrap_or_else(|| transcript.speaker_count.to_string());
    let mut facts = format!(
        "{} participants · {}",
        participants,
        format_timestamp(transcript.duration_seconds)
    );
    if let Some(tone) = doc.passport.as_ref().and_then(|p| p.tone.as_deref()) {
        facts.push_str(" · ");
        facts.push_str(tone);
    }
    lines.push(facts);

    lines.push(format!(
        "{} topics · {} decisions · {} action items",
        doc.topics.len(),
        doc.decisions.len(),
        doc.action_items.len()
    ));

    if let Some(summary) = doc.executive_summary.as_deref().filter(|s| !s.trim().is_empty()) {
        lines.push(truncate_with_ellipsis(summary, SUMMARY_BUDGET));
    }

    if let Some(first) = doc
        .decisions
        .first()
        .and_then(|d| d.decision.as_deref())
        .filter(|s| !s.trim().is_empty())
    {
        lines.push(format!("First decision: {first}"));
    }

    if let Some(insight) = doc
        .conclusion
        .as_ref()
        .and_then(|c| c.main_insight.as_deref())
        .filter(|s| !s.trim().is_empty())
    {
        lines.push(format!("Main insight: {insight}"));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transcript() -> MergedTranscript {
        MergedTranscript {
            full_text: "hello".into(),
            speaker_segmented_text: "[00:00] **Speaker 1:**\nhello".into(),
            speaker_count: 3,
            detected_language: "en".into(),
            duration_seconds: 150.0,
        }
    }

    #[test]
    fn preview_survives_an_empty_document() {
        let preview = build_preview(&AnalysisDocument::default(), &transcript());
        assert!(preview.starts_with("Meeting"));
        assert!(preview.contains("3 participants"));
        assert!(preview.contains("02:30"));
        assert!(preview.contains("0 topics · 0 decisions · 0 action items"));
    }

    #[test]
    fn long_summary_is_truncated_with_ellipsis() {
        let doc: AnalysisDocument = serde_json::from_str(&format!(
            r#"{{"executive_summary": "{}"}}"#,
            "word ".repeat(100)
        ))
        .unwrap();
        let preview = build_preview(&doc, &transcript());
        assert!(preview.contains('…'));
        let summary_line = preview
            .lines()
            .find(|l| l.starts_with("word"))
            .expect("summary line present");
        assert!(summary_line.chars().count() <= SUMMARY_BUDGET + 1);
    }

    #[test]
    fn first_decision_and_insight_are_listed() {
        let doc: AnalysisDocument = serde_json::from_str(
            r#"{
                "decisions": [{"decision": "ship friday"}, {"decision": "hire later"}],
                "conclusion": {"main_insight": "scope is the real problem"}
            }"#,
        )
        .unwrap();
        let preview = build_preview(&doc, &transcript());
        assert!(preview.contains("First decision: ship friday"));
        assert!(preview.contains("Main insight: scope is the real problem"));
        assert!(!preview.contains("hire later"));
    }

    #[test]
    fn truncation_is_noop_within_budget() {
        assert_eq!(truncate_with_ellipsis("short", 10), "short");
        assert_eq!(truncate_with_ellipsis("  padded  ", 10), "padded");
    }
}
