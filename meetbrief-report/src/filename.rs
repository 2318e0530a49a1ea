//! Report file naming: a slug of the meeting topic plus the generation date
//! and a fixed per-format suffix.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

const SLUG_MAX_CHARS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Pdf,
    Html,
    Txt,
}

impl ReportFormat {
    fn suffix(self) -> &'static str {
        match self {
            Self::Pdf => "report.pdf",
            Self::Html => "interactive.html",
            Self::Txt => "transcription.txt",
        }
    }
}

fn non_word_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // \w is unicode-aware, so Cyrillic/CJK topic titles keep their letters.
    RE.get_or_init(|| Regex::new(r"[^\w\s-]").expect("valid slug regex"))
}

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("valid whitespace regex"))
}

/// Strips markup-hostile characters, collapses spaces to `_`, caps length.
pub fn slugify(topic: &str) -> String {
    let cleaned = non_word_re().replace_all(topic, "");
    let underscored = whitespace_re().replace_all(cleaned.trim(), "_");
    let slug: String = underscored.chars().take(SLUG_MAX_CHARS).collect();
    if slug.is_empty() { "meeting".into() } else { slug }
}

pub fn report_file_name(topic: &str, date: NaiveDate, format: ReportFormat) -> String {
    format!(
        "{}_{}_{}",
        slugify(topic),
        date.format("%Y-%m-%d"),
        format.suffix()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    #[test]
    fn slug_strips_punctuation_and_joins_words() {
        assert_eq!(slugify("Q3 launch: budget & risks!"), "Q3_launch_budget_risks");
    }

    #[test]
    fn slug_keeps_cyrillic() {
        assert_eq!(slugify("Планы на квартал"), "Планы_на_квартал");
    }

    #[test]
    fn slug_caps_length() {
        let long = "word ".repeat(30);
        assert!(slugify(&long).chars().count() <= 50);
    }

    #[test]
    fn empty_topic_falls_back() {
        assert_eq!(slugify("!!!"), "meeting");
    }

    #[test]
    fn file_names_carry_date_and_suffix() {
        assert_eq!(
            report_file_name("Team sync", date(), ReportFormat::Pdf),
            "Team_sync_2025-03-14_report.pdf"
        );
        assert_eq!(
            report_file_name("Team sync", date(), ReportFormat::Html),
            "Team_sync_2025-03-14_interactive.html"
        );
        assert_eq!(
            report_file_name("Team sync", date(), ReportFormat::Txt),
            "Team_sync_2025-03-14_transcription.txt"
        );
    }
}
