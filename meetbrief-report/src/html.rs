//! Interactive HTML report: one self-contained document with a client-side
//! tab switcher and collapsible topics.
//!
//! All field values flow through minijinja with auto-escaping (the template
//! name ends in `.html`), so `&`, `<` and `>` can never reach the markup
//! unescaped. Glyph lookups are resolved here, through the explicit variant
//! enums, never by raw string dispatch.

use chrono::NaiveDate;
use meetbrief_core::analysis::{AnalysisDocument, DecisionStatus, Priority};
use meetbrief_core::lang::{BRAND, TargetLanguage, UiStrings};
use minijinja::Environment;
use serde::Serialize;
use std::sync::OnceLock;

use crate::error::RenderError;

const TEMPLATE: &str = include_str!("../templates/report.html");

pub fn status_glyph(status: DecisionStatus) -> &'static str {
    match status {
        DecisionStatus::Accepted => "✅",
        DecisionStatus::Pending => "⏳",
        DecisionStatus::Question => "❓",
        DecisionStatus::Unspecified => "•",
    }
}

pub fn priority_glyph(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "🔴",
        Priority::Medium => "🟡",
        Priority::Low => "🟢",
        Priority::Unspecified => "•",
    }
}

const DASH: &str = "—";

fn env() -> &'static Environment<'static> {
    static ENV: OnceLock<Environment<'static>> = OnceLock::new();
    ENV.get_or_init(|| {
        let mut env = Environment::new();
        env.add_template("report.html", TEMPLATE)
            .expect("report template parses");
        env
    })
}

#[derive(Serialize)]
struct HtmlContext<'a> {
    brand: &'static str,
    lang: &'static str,
    date: String,
    ui: &'static UiStrings,
    title: &'a str,
    passport: PassportView,
    executive_summary: String,
    topics: Vec<TopicView>,
    decisions: Vec<DecisionView>,
    action_items: Vec<ActionItemView>,
    open_questions: Vec<OpenQuestionView>,
    dynamics: Option<DynamicsView>,
    recommendations: Option<RecommendationsView>,
    uncertainties: Vec<UncertaintyView>,
    corrected_terms: Vec<CorrectedTermView>,
    glossary: Vec<GlossaryView>,
    show_clarifications: bool,
    show_glossary: bool,
    transcript_text: &'a str,
}

#[derive(Serialize, Default)]
struct PassportView {
    date: String,
    duration: String,
    participants: String,
    format: String,
    domain: String,
    tone: String,
    summary: String,
}

#[derive(Serialize)]
struct TopicView {
    index: usize,
    title: String,
    description: String,
    detailed_discussion: String,
    raised_by: String,
    key_points: Vec<String>,
    positions: Vec<PositionView>,
    outcome: String,
    quotes: Vec<String>,
    unresolved: Vec<String>,
}

#[derive(Serialize)]
struct PositionView {
    name: String,
    text: String,
}

#[derive(Serialize)]
struct DecisionView {
    icon: &'static str,
    decision: String,
    responsible: String,
}

#[derive(Serialize)]
struct ActionItemView {
    task: String,
    responsible: String,
    deadline: String,
}

#[derive(Serialize)]
struct OpenQuestionView {
    question: String,
    reason: String,
    impact: String,
}

#[derive(Serialize)]
struct DynamicsView {
    balance: Vec<BalanceBar>,
    interruptions: String,
    topic_initiators: String,
    emotional: Vec<EmotionalBlock>,
    unspoken: Vec<String>,
}

#[derive(Serialize)]
struct BalanceBar {
    speaker: String,
    label: String,
    width: u32,
}

#[derive(Serialize)]
struct EmotionalBlock {
    icon: &'static str,
    title: &'static str,
    items: Vec<String>,
}

#[derive(Serialize)]
struct RecommendationsView {
    strengths: Vec<String>,
    attention_points: Vec<String>,
    substantive: Vec<SubstantiveView>,
    process: Vec<ProcessView>,
    tools: Vec<String>,
    next_meeting: Vec<String>,
}

#[derive(Serialize)]
struct SubstantiveView {
    icon: &'static str,
    what: String,
    why: String,
    how: String,
}

#[derive(Serialize)]
struct ProcessView {
    what: String,
    how: String,
}

#[derive(Serialize)]
struct UncertaintyView {
    text: String,
    context: String,
    possible: String,
}

#[derive(Serialize)]
struct CorrectedTermView {
    original: String,
    corrected: String,
}

#[derive(Serialize)]
struct GlossaryView {
    term: String,
    definition: String,
}

fn or_empty(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn or_dash(value: &Option<String>) -> String {
    value
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(DASH)
        .to_string()
}

/// Pulls the leading digits out of a "45%"-style balance value for the bar
/// width; anything unparseable renders as an empty bar, not an error.
fn balance_width(value: &str) -> u32 {
    let digits: String = value.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse::<u32>().unwrap_or(0).min(100)
}

fn build_context<'a>(
    doc: &'a AnalysisDocument,
    target: TargetLanguage,
    transcript_text: &'a str,
    date: NaiveDate,
) -> HtmlContext<'a> {
    let lang = target.resolve(doc);
    let ui = lang.ui();

    let passport = doc
        .passport
        .as_ref()
        .map(|p| PassportView {
            date: or_empty(&p.date),
            duration: or_empty(&p.duration_estimate),
            participants: or_empty(&p.participants_count),
            format: or_empty(&p.format),
            domain: or_empty(&p.domain),
            tone: or_empty(&p.tone),
            summary: or_empty(&p.summary),
        })
        .unwrap_or_default();

    let topics = doc
        .topics
        .iter()
        .enumerate()
        .map(|(i, t)| TopicView {
            index: i + 1,
            title: or_empty(&t.title),
            description: or_empty(&t.description),
            detailed_discussion: or_empty(&t.detailed_discussion),
            raised_by: or_empty(&t.raised_by),
            key_points: t.key_points.clone(),
            positions: t
                .positions
                .iter()
                .map(|(name, position)| PositionView {
                    name: name.clone(),
                    text: position.summary(),
                })
                .collect(),
            outcome: or_empty(&t.outcome),
            quotes: t.quotes.clone(),
            unresolved: t.unresolved.clone(),
        })
        .collect();

    let decisions = doc
        .decisions
        .iter()
        .map(|d| DecisionView {
            icon: status_glyph(d.parsed_status()),
            decision: or_empty(&d.decision),
            responsible: or_dash(&d.responsible),
        })
        .collect();

    let action_items = doc
        .action_items
        .iter()
        .map(|a| ActionItemView {
            task: or_empty(&a.task),
            responsible: or_dash(&a.responsible),
            deadline: or_dash(&a.deadline),
        })
        .collect();

    let open_questions = doc
        .unresolved_questions
        .iter()
        .map(|q| OpenQuestionView {
            question: or_empty(&q.question),
            reason: or_empty(&q.reason),
            impact: or_empty(&q.impact),
        })
        .collect();

    let dynamics = doc.dynamics.as_ref().filter(|d| !d.is_empty()).map(|d| {
        let emotional = d
            .emotional_map
            .as_ref()
            .map(|em| {
                let blocks: [(&'static str, &'static str, &Vec<String>); 4] = [
                    ("🔥", ui.enthusiasm, &em.enthusiasm_moments),
                    ("⚡", ui.tension, &em.tension_moments),
                    ("🤔", ui.uncertainty_moments, &em.uncertainty_moments),
                    ("🔄", ui.turning_points, &em.turning_points),
                ];
                blocks
                    .into_iter()
                    .filter(|(_, _, items)| !items.is_empty())
                    .map(|(icon, title, items)| EmotionalBlock {
                        icon,
                        title,
                        items: items.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        DynamicsView {
            balance: d
                .participation_balance
                .iter()
                .map(|(speaker, value)| BalanceBar {
                    speaker: speaker.clone(),
                    label: value.clone(),
                    width: balance_width(value),
                })
                .collect(),
            interruptions: d
                .interaction_patterns
                .as_ref()
                .map(|ip| or_empty(&ip.interruptions))
                .unwrap_or_default(),
            topic_initiators: d
                .interaction_patterns
                .as_ref()
                .map(|ip| ip.topic_initiators.join(", "))
                .unwrap_or_default(),
            emotional,
            unspoken: d.unspoken.clone(),
        }
    });

    let recommendations = doc
        .expert_recommendations
        .as_ref()
        .filter(|r| !r.is_empty())
        .map(|r| RecommendationsView {
            strengths: r.strengths.clone(),
            attention_points: r.attention_points.clone(),
            substantive: r
                .substantive
                .iter()
                .map(|s| SubstantiveView {
                    icon: priority_glyph(s.parsed_priority()),
                    what: or_empty(&s.what),
                    why: or_empty(&s.why),
                    how: or_empty(&s.how),
                })
                .collect(),
            process: r
                .process
                .iter()
                .map(|p| ProcessView {
                    what: or_empty(&p.what),
                    how: or_empty(&p.how),
                })
                .collect(),
            tools: r.tools_and_methods.clone(),
            next_meeting: r.next_meeting_questions.clone(),
        });

    let uncertainties: Vec<UncertaintyView> = doc
        .uncertainties
        .iter()
        .map(|u| UncertaintyView {
            text: or_empty(&u.text),
            context: or_empty(&u.context),
            possible: or_empty(&u.possible_meaning),
        })
        .collect();

    let corrected_terms: Vec<CorrectedTermView> = doc
        .corrected_terms
        .iter()
        .map(|c| CorrectedTermView {
            original: or_empty(&c.original),
            corrected: or_empty(&c.corrected),
        })
        .collect();

    let glossary: Vec<GlossaryView> = doc
        .glossary
        .iter()
        .map(|g| GlossaryView {
            term: or_empty(&g.term),
            definition: or_empty(&g.definition),
        })
        .collect();

    HtmlContext {
        brand: BRAND,
        lang: lang.code(),
        date: date.format("%Y-%m-%d").to_string(),
        ui,
        title: doc.topic_short(),
        passport,
        executive_summary: or_empty(&doc.executive_summary),
        show_clarifications: !uncertainties.is_empty() || !corrected_terms.is_empty(),
        show_glossary: !glossary.is_empty(),
        topics,
        decisions,
        action_items,
        open_questions,
        dynamics,
        recommendations,
        uncertainties,
        corrected_terms,
        glossary,
        transcript_text,
    }
}

pub fn render_html(
    doc: &AnalysisDocument,
    target: TargetLanguage,
    transcript_text: &str,
    date: NaiveDate,
) -> Result<Vec<u8>, RenderError> {
    let ctx = build_context(doc, target, transcript_text, date);
    let rendered = env().get_template("report.html")?.render(&ctx)?;
    Ok(rendered.into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    fn render(doc: &AnalysisDocument) -> String {
        let bytes = render_html(doc, TargetLanguage::En, "raw transcript text", date()).unwrap();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn empty_document_renders_brand_and_footer() {
        let html = render(&AnalysisDocument::default());
        assert!(html.contains("MeetBrief"));
        assert!(html.contains("AI meeting analysis"));
        assert!(html.contains("raw transcript text"));
        assert!(html.contains("No specific decisions or tasks were recorded."));
    }

    #[test]
    fn decisions_heading_appears_only_with_decisions() {
        let empty = render(&AnalysisDocument::default());
        assert!(!empty.contains(">✅ DECISIONS<"));

        let doc: AnalysisDocument = serde_json::from_str(
            r#"{"decisions": [{"decision": "ship friday", "status": "accepted"}]}"#,
        )
        .unwrap();
        let html = render(&doc);
        assert!(html.contains("DECISIONS"));
        assert!(html.contains("ship friday"));
        assert!(html.contains("✅ <b>ship friday</b>"));
    }

    #[test]
    fn status_glyphs_cover_the_unrecognized_branch() {
        let doc: AnalysisDocument = serde_json::from_str(
            r#"{"decisions": [
                {"decision": "a", "status": "accepted"},
                {"decision": "b", "status": "pending"},
                {"decision": "c", "status": "who knows"}
            ]}"#,
        )
        .unwrap();
        let html = render(&doc);
        assert!(html.contains("✅ <b>a</b>"));
        assert!(html.contains("⏳ <b>b</b>"));
        assert!(html.contains("• <b>c</b>"));
    }

    #[test]
    fn field_values_are_escaped() {
        let doc: AnalysisDocument = serde_json::from_str(
            r#"{"meeting_topic_short": "<script>&test</script>",
                "topics": [{"title": "<script>&test</script>"}]}"#,
        )
        .unwrap();
        let bytes = render_html(
            &doc,
            TargetLanguage::En,
            "transcript with <tags> & ampersands",
            date(),
        )
        .unwrap();
        let html = String::from_utf8(bytes).unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;&amp;test"));
        assert!(html.contains("transcript with &lt;tags&gt; &amp; ampersands"));
    }

    #[test]
    fn missing_responsible_renders_a_dash() {
        let doc: AnalysisDocument =
            serde_json::from_str(r#"{"decisions": [{"decision": "ship"}]}"#).unwrap();
        let html = render(&doc);
        assert!(html.contains("Responsible: —"));
    }

    #[test]
    fn open_questions_render_with_reason_and_impact() {
        let doc: AnalysisDocument = serde_json::from_str(
            r#"{"unresolved_questions": [
                {"question": "who owns QA?", "reason": "ran out of time", "impact": "release risk"}
            ]}"#,
        )
        .unwrap();
        let html = render(&doc);
        assert!(html.contains("OPEN QUESTIONS"));
        assert!(html.contains("who owns QA?"));
        assert!(html.contains("Reason: ran out of time"));
        assert!(html.contains("Impact: release risk"));
    }

    #[test]
    fn participation_balance_turns_into_bars() {
        let doc: AnalysisDocument = serde_json::from_str(
            r#"{"dynamics": {"participation_balance": {"Speaker 1": "45%", "Speaker 2": "n/a"}}}"#,
        )
        .unwrap();
        let html = render(&doc);
        assert!(html.contains("width:45%"));
        assert!(html.contains("width:0%"));
    }

    #[test]
    fn glossary_tab_is_conditional() {
        let empty = render(&AnalysisDocument::default());
        assert!(!empty.contains("p-gl"));

        let doc: AnalysisDocument = serde_json::from_str(
            r#"{"glossary": [{"term": "MVP", "definition": "minimum viable product"}]}"#,
        )
        .unwrap();
        let html = render(&doc);
        assert!(html.contains("p-gl"));
        assert!(html.contains("MVP"));
    }

    #[test]
    fn localized_chrome_follows_target_language() {
        let bytes = render_html(&AnalysisDocument::default(), TargetLanguage::Ru, "", date()).unwrap();
        let html = String::from_utf8(bytes).unwrap();
        assert!(html.contains("ТЕМЫ ОБСУЖДЕНИЯ"));
        assert!(html.contains("lang=\"ru\""));
    }
}
