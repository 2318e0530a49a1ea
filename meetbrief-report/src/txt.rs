//! Plain-text report: a small header plus the verbatim diarized transcript.
//! Deliberately contains no analysis content.

use chrono::NaiveDate;
use meetbrief_core::analysis::AnalysisDocument;
use meetbrief_core::lang::{BRAND, TargetLanguage};

pub fn render_txt(
    doc: &AnalysisDocument,
    target: TargetLanguage,
    transcript_text: &str,
    date: NaiveDate,
) -> Vec<u8> {
    let ui = target.resolve(doc).ui();
    let rule = "=".repeat(50);

    let body = if transcript_text.trim().is_empty() {
        ui.transcript_unavailable
    } else {
        transcript_text
    };

    let mut out = String::new();
    out.push_str(&format!("{BRAND} — {}\n", ui.transcript));
    out.push_str(&rule);
    out.push('\n');
    out.push_str(&format!("{}: {}\n", ui.topic, doc.topic_short()));
    out.push_str(&format!("{}: {}\n", ui.date, date.format("%Y-%m-%d")));
    out.push_str(&rule);
    out.push_str("\n\n");
    out.push_str(body);
    out.push('\n');

    out.into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    #[test]
    fn empty_document_still_renders_header() {
        let bytes = render_txt(&AnalysisDocument::default(), TargetLanguage::En, "", date());
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with("MeetBrief"));
        assert!(text.contains("Meeting"));
        assert!(text.contains("2025-03-14"));
        assert!(text.contains("Transcript unavailable"));
    }

    #[test]
    fn transcript_is_verbatim_and_analysis_free() {
        let doc: AnalysisDocument = serde_json::from_str(
            r#"{"meeting_topic_short": "Budget", "executive_summary": "SECRET SUMMARY"}"#,
        )
        .unwrap();
        let transcript = "[00:05] **Speaker 1:**\nwe need <brackets> & ampersands kept as-is";
        let text =
            String::from_utf8(render_txt(&doc, TargetLanguage::En, transcript, date())).unwrap();
        assert!(text.contains(transcript));
        assert!(!text.contains("SECRET SUMMARY"));
    }

    #[test]
    fn header_labels_are_localized() {
        let text = String::from_utf8(render_txt(
            &AnalysisDocument::default(),
            TargetLanguage::Ru,
            "текст",
            date(),
        ))
        .unwrap();
        assert!(text.contains("Транскрипт"));
        assert!(text.contains("Дата"));
    }
}
