//! Builds the Typst markup source for the PDF report.
//!
//! The markup is assembled as a plain string so it can be tested without a
//! compiler pass: escaping, section omission and the keep-together topic
//! blocks are all properties of this source. Every document field value goes
//! through [`escape_typst`] before insertion.

use chrono::NaiveDate;
use meetbrief_core::analysis::{AnalysisDocument, DecisionStatus, Priority};
use meetbrief_core::lang::{BRAND, ReportLanguage, UiStrings};

/// Escapes Typst control characters (and the HTML-reserved `&`, `<`, `>`,
/// which are also Typst syntax) so field values render as literal text.
pub fn escape_typst(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' | '#' | '$' | '&' | '*' | '_' | '[' | ']' | '<' | '>' | '@' | '`' | '~' => {
                out.push('\\');
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }
    out
}

pub fn pdf_status_glyph(status: DecisionStatus) -> &'static str {
    match status {
        DecisionStatus::Accepted => "✓",
        DecisionStatus::Pending => "…",
        DecisionStatus::Question => "?",
        DecisionStatus::Unspecified => "–",
    }
}

pub fn pdf_priority_label(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "[!!!]",
        Priority::Medium => "[!!]",
        Priority::Low => "[!]",
        Priority::Unspecified => "[–]",
    }
}

const DASH: &str = "–";
const QUOTES_PER_TOPIC: usize = 2;

/// Font families the markup asks for; the compiler side decides what is
/// actually available and logs a fallback if the CJK family is missing.
#[derive(Debug, Clone)]
pub struct FontSelection {
    pub base: String,
    pub cjk: Option<String>,
}

impl Default for FontSelection {
    fn default() -> Self {
        Self {
            base: "Libertinus Serif".into(),
            cjk: None,
        }
    }
}

fn or_dash(value: &Option<String>) -> String {
    match value.as_deref().filter(|s| !s.trim().is_empty()) {
        Some(v) => escape_typst(v),
        None => DASH.into(),
    }
}

struct SourceBuilder {
    out: String,
    section: usize,
}

impl SourceBuilder {
    fn push(&mut self, fragment: &str) {
        self.out.push_str(fragment);
    }

    fn section_heading(&mut self, title: &str) {
        self.section += 1;
        self.out
            .push_str(&format!("= {}. {}\n\n", self.section, escape_typst(title)));
    }

    fn labeled_line(&mut self, label: &str, value: &str) {
        self.out.push_str(&format!(
            "#strong[{}:] {}\n\n",
            escape_typst(label),
            escape_typst(value)
        ));
    }

    fn bullet_list(&mut self, items: &[String]) {
        for item in items {
            self.out.push_str(&format!("- {}\n", escape_typst(item)));
        }
        if !items.is_empty() {
            self.out.push('\n');
        }
    }

    fn labeled_bullets(&mut self, label: &str, items: &[String]) {
        if items.is_empty() {
            return;
        }
        self.out
            .push_str(&format!("#strong[{}:]\n", escape_typst(label)));
        self.bullet_list(items);
    }
}

fn build_preamble(ui: &UiStrings, lang: ReportLanguage, fonts: &FontSelection, date: &str) -> String {
    let font_list = match &fonts.cjk {
        Some(cjk) => format!("(\"{}\", \"{}\")", fonts.base, cjk),
        None => format!("(\"{}\",)", fonts.base),
    };

    format!(
        r##"#let accent-color = rgb("#e94560")
#let dark-color = rgb("#1a1a2e")
#let blue-color = rgb("#16213e")
#let muted-color = rgb("#6c757d")
#let light-bg = rgb("#f8f9fa")
#let border-color = rgb("#dee2e6")

#set page(
  paper: "a4",
  margin: (top: 2.2cm, bottom: 2cm, left: 1.8cm, right: 1.8cm),
  header: [
    #text(size: 8pt, weight: "bold", fill: muted-color)[{brand}]
    #v(-0.5em)
    #line(length: 100%, stroke: 1.5pt + accent-color)
  ],
  footer: context [
    #line(length: 100%, stroke: 0.5pt + border-color)
    #v(-0.5em)
    #align(center)[
      #text(size: 7pt, fill: muted-color)[{page_label} #counter(page).display() | {generated}: {date}]
    ]
  ],
)

#set text(
  font: {font_list},
  size: 9.5pt,
  lang: "{lang}",
)

#set par(justify: true)

#show heading.where(level: 1): it => block(
  above: 1.4em,
  below: 0.8em,
  text(size: 12pt, weight: "bold", fill: accent-color, it.body)
)

#show heading.where(level: 2): it => block(
  above: 1.1em,
  below: 0.6em,
  text(size: 10.5pt, weight: "bold", fill: blue-color, it.body)
)

"##,
        brand = BRAND,
        page_label = escape_typst(ui.page),
        generated = escape_typst(ui.generated),
        date = date,
        font_list = font_list,
        lang = lang.code(),
    )
}

fn build_passport(b: &mut SourceBuilder, doc: &AnalysisDocument, ui: &UiStrings) {
    let passport = doc.passport.clone().unwrap_or_default();

    if let Some(summary) = passport.summary.as_deref().filter(|s| !s.trim().is_empty()) {
        b.push(&format!("#strong[{}]\n\n", escape_typst(summary)));
    }

    let cell = |label: &str, value: &Option<String>| {
        format!(
            "[#strong[{}]], [{}]",
            escape_typst(label),
            or_dash(value)
        )
    };

    b.push(&format!(
        "#table(\n  columns: (0.16fr, 0.34fr, 0.16fr, 0.34fr),\n  stroke: 0.5pt + border-color,\n  fill: light-bg,\n  inset: 6pt,\n  {}, {},\n  {}, {},\n  {}, {},\n)\n\n",
        cell(ui.date, &passport.date),
        cell(ui.duration, &passport.duration_estimate),
        cell(ui.participants, &passport.participants_count),
        cell(ui.format, &passport.format),
        cell(ui.domain, &passport.domain),
        cell(ui.tone, &passport.tone),
    ));
}

fn build_topics(b: &mut SourceBuilder, doc: &AnalysisDocument, ui: &UiStrings) {
    if doc.topics.is_empty() {
        return;
    }
    b.section_heading(ui.topics);

    for (i, topic) in doc.topics.iter().enumerate() {
        // One unbreakable block per topic so a topic is never split across a
        // page boundary.
        b.push("#block(breakable: false)[\n");
        b.push(&format!(
            "== {}. {}\n\n",
            i + 1,
            escape_typst(topic.title.as_deref().unwrap_or(""))
        ));

        if let Some(description) = topic.description.as_deref() {
            b.push(&format!("{}\n\n", escape_typst(description)));
        }
        if let Some(discussion) = topic.detailed_discussion.as_deref() {
            b.push(&format!("{}\n\n", escape_typst(discussion)));
        }

        b.bullet_list(&topic.key_points);

        for (name, position) in &topic.positions {
            let text = position.summary();
            if !text.is_empty() {
                b.push(&format!(
                    "- #strong[{}:] {}\n",
                    escape_typst(name),
                    escape_typst(&text)
                ));
            }
        }
        if !topic.positions.is_empty() {
            b.push("\n");
        }

        if let Some(outcome) = topic.outcome.as_deref() {
            b.labeled_line(ui.outcome, outcome);
        }

        for quote in topic.quotes.iter().take(QUOTES_PER_TOPIC) {
            b.push(&format!("#emph[«{}»]\n\n", escape_typst(quote)));
        }

        for open in &topic.unresolved {
            b.push(&format!("- ? {}\n", escape_typst(open)));
        }
        if !topic.unresolved.is_empty() {
            b.push("\n");
        }

        b.push("]\n\n");
    }
}

fn build_decisions(b: &mut SourceBuilder, doc: &AnalysisDocument, ui: &UiStrings) {
    if doc.decisions.is_empty() {
        return;
    }
    b.section_heading(ui.decisions);

    let mut rows = String::new();
    for d in &doc.decisions {
        rows.push_str(&format!(
            "  [{}], [{}], [{}], [{}],\n",
            pdf_status_glyph(d.parsed_status()),
            or_dash(&d.decision),
            or_dash(&d.responsible),
            or_dash(&d.status),
        ));
    }

    b.push(&format!(
        "#table(\n  columns: (0.06fr, 0.54fr, 0.22fr, 0.18fr),\n  stroke: 0.5pt + border-color,\n  inset: 5pt,\n  fill: (_, y) => if y == 0 {{ blue-color }} else {{ white }},\n  [], [#text(fill: white, weight: \"bold\")[{}]], [#text(fill: white, weight: \"bold\")[{}]], [#text(fill: white, weight: \"bold\")[{}]],\n{})\n\n",
        escape_typst(ui.decision),
        escape_typst(ui.responsible),
        escape_typst(ui.status),
        rows
    ));
}

fn build_open_questions(b: &mut SourceBuilder, doc: &AnalysisDocument, ui: &UiStrings) {
    if doc.unresolved_questions.is_empty() {
        return;
    }
    b.section_heading(ui.open_questions);

    for q in &doc.unresolved_questions {
        if let Some(question) = q.question.as_deref() {
            b.push(&format!("#strong[{}]\n\n", escape_typst(question)));
        }
        if let Some(reason) = q.reason.as_deref() {
            b.labeled_line(ui.reason, reason);
        }
        if let Some(impact) = q.impact.as_deref() {
            b.labeled_line(ui.impact, impact);
        }
    }
}

fn build_dynamics(b: &mut SourceBuilder, doc: &AnalysisDocument, ui: &UiStrings) {
    let Some(dynamics) = doc.dynamics.as_ref().filter(|d| !d.is_empty()) else {
        return;
    };
    b.section_heading(ui.dynamics);

    if !dynamics.participation_balance.is_empty() {
        let balance = dynamics
            .participation_balance
            .iter()
            .map(|(speaker, share)| format!("{}: {}", escape_typst(speaker), escape_typst(share)))
            .collect::<Vec<_>>()
            .join(" | ");
        b.push(&format!(
            "#strong[{}:] {}\n\n",
            escape_typst(ui.participation),
            balance
        ));
    }

    if let Some(patterns) = &dynamics.interaction_patterns {
        if let Some(interruptions) = patterns.interruptions.as_deref() {
            b.labeled_line(ui.interruptions, interruptions);
        }
        if !patterns.topic_initiators.is_empty() {
            b.labeled_line(ui.topic_initiators, &patterns.topic_initiators.join(", "));
        }
    }

    if let Some(emotional) = &dynamics.emotional_map {
        b.labeled_bullets(ui.enthusiasm, &emotional.enthusiasm_moments);
        b.labeled_bullets(ui.tension, &emotional.tension_moments);
        b.labeled_bullets(ui.turning_points, &emotional.turning_points);
    }

    b.labeled_bullets(ui.between_lines, &dynamics.unspoken);
}

fn build_goals(b: &mut SourceBuilder, doc: &AnalysisDocument, ui: &UiStrings) {
    let Some(goals) = doc.meeting_goals.as_ref() else {
        return;
    };
    if goals.explicit.is_empty() && goals.implicit.is_empty() && goals.recommendation.is_none() {
        return;
    }
    b.section_heading(ui.meeting_goals);
    b.labeled_bullets(ui.explicit_goals, &goals.explicit);
    b.labeled_bullets(ui.implicit_goals, &goals.implicit);
    if let Some(recommendation) = goals.recommendation.as_deref() {
        b.labeled_line(ui.recommendation, recommendation);
    }
}

fn build_recommendations(b: &mut SourceBuilder, doc: &AnalysisDocument, ui: &UiStrings) {
    let Some(recs) = doc.expert_recommendations.as_ref().filter(|r| !r.is_empty()) else {
        return;
    };
    b.section_heading(ui.recommendations);

    for strength in &recs.strengths {
        b.push(&format!("✓ {}\n\n", escape_typst(strength)));
    }
    for attention in &recs.attention_points {
        b.push(&format!("! {}\n\n", escape_typst(attention)));
    }

    if !recs.substantive.is_empty() {
        b.push(&format!("#strong[{}:]\n\n", escape_typst(ui.by_substance)));
        for (i, rec) in recs.substantive.iter().enumerate() {
            b.push("#block(breakable: false)[\n");
            b.push(&format!(
                "#strong[{} {} {}: {}]\n\n",
                escape_typst(pdf_priority_label(rec.parsed_priority())),
                escape_typst(ui.recommendation),
                i + 1,
                escape_typst(rec.what.as_deref().unwrap_or(""))
            ));
            if let Some(why) = rec.why.as_deref() {
                b.labeled_line(ui.why, why);
            }
            if let Some(how) = rec.how.as_deref() {
                b.labeled_line(ui.how, how);
            }
            b.push("]\n\n");
        }
    }

    if !recs.process.is_empty() {
        b.push(&format!("#strong[{}:]\n\n", escape_typst(ui.by_process)));
        for (i, rec) in recs.process.iter().enumerate() {
            b.push(&format!(
                "{}. #strong[{}]\n",
                i + 1,
                escape_typst(rec.what.as_deref().unwrap_or(""))
            ));
            if let Some(how) = rec.how.as_deref() {
                b.push(&format!("   {}\n", escape_typst(how)));
            }
        }
        b.push("\n");
    }

    b.labeled_bullets(ui.tools_methods, &recs.tools_and_methods);
    b.labeled_bullets(ui.benchmarks, &recs.benchmarks);
    b.labeled_bullets(ui.next_meeting, &recs.next_meeting_questions);
}

fn build_action_items(b: &mut SourceBuilder, doc: &AnalysisDocument, ui: &UiStrings) {
    if doc.action_items.is_empty() {
        return;
    }
    b.section_heading(ui.tasks);

    let mut rows = String::new();
    for item in &doc.action_items {
        rows.push_str(&format!(
            "  [{}], [{}], [{}],\n",
            or_dash(&item.task),
            or_dash(&item.responsible),
            or_dash(&item.deadline),
        ));
    }

    b.push(&format!(
        "#table(\n  columns: (0.55fr, 0.25fr, 0.20fr),\n  stroke: 0.5pt + border-color,\n  inset: 5pt,\n  fill: (_, y) => if y == 0 {{ blue-color }} else {{ white }},\n  [#text(fill: white, weight: \"bold\")[{}]], [#text(fill: white, weight: \"bold\")[{}]], [#text(fill: white, weight: \"bold\")[{}]],\n{})\n\n",
        escape_typst(ui.task),
        escape_typst(ui.responsible),
        escape_typst(ui.deadline),
        rows
    ));
}

fn build_swot(b: &mut SourceBuilder, doc: &AnalysisDocument, ui: &UiStrings) {
    let Some(swot) = doc.swot.as_ref().filter(|s| !s.is_empty()) else {
        return;
    };
    b.section_heading(ui.swot_title);

    let quadrant = |title: &str, items: &[String]| {
        let mut cell = format!("#strong[{}]\n\n", escape_typst(title));
        for item in items {
            cell.push_str(&format!("- {}\n", escape_typst(item)));
        }
        cell
    };

    b.push(&format!(
        "#table(\n  columns: (1fr, 1fr),\n  stroke: 0.5pt + border-color,\n  inset: 6pt,\n  [{}], [{}],\n  [{}], [{}],\n)\n\n",
        quadrant(ui.swot_strengths, &swot.strengths),
        quadrant(ui.swot_weaknesses, &swot.weaknesses),
        quadrant(ui.swot_opportunities, &swot.opportunities),
        quadrant(ui.swot_threats, &swot.threats),
    ));
}

fn build_risks(b: &mut SourceBuilder, doc: &AnalysisDocument, ui: &UiStrings) {
    if doc.risks.is_empty() {
        return;
    }
    b.section_heading(ui.risks_title);

    let mut rows = String::new();
    for risk in &doc.risks {
        rows.push_str(&format!(
            "  [{}], [{}], [{}], [{}],\n",
            or_dash(&risk.risk),
            or_dash(&risk.probability),
            or_dash(&risk.impact),
            or_dash(&risk.mitigation),
        ));
    }

    b.push(&format!(
        "#table(\n  columns: (0.30fr, 0.15fr, 0.15fr, 0.40fr),\n  stroke: 0.5pt + border-color,\n  inset: 5pt,\n  fill: (_, y) => if y == 0 {{ accent-color }} else {{ white }},\n  [#text(fill: white, weight: \"bold\")[{}]], [#text(fill: white, weight: \"bold\")[{}]], [#text(fill: white, weight: \"bold\")[{}]], [#text(fill: white, weight: \"bold\")[{}]],\n{})\n\n",
        escape_typst(ui.risk),
        escape_typst(ui.probability),
        escape_typst(ui.impact_label),
        escape_typst(ui.mitigation),
        rows
    ));
}

fn build_action_plan(b: &mut SourceBuilder, doc: &AnalysisDocument, ui: &UiStrings) {
    let Some(plan) = doc.action_plan.as_ref().filter(|p| !p.is_empty()) else {
        return;
    };
    b.section_heading(ui.action_plan_title);
    b.labeled_bullets(ui.urgent, &plan.urgent);
    b.labeled_bullets(ui.medium_term, &plan.medium_term);
    b.labeled_bullets(ui.long_term, &plan.long_term);
    b.labeled_bullets(ui.kpi, &plan.kpi);
}

fn build_conclusion(b: &mut SourceBuilder, doc: &AnalysisDocument, ui: &UiStrings) {
    let Some(conclusion) = doc.conclusion.as_ref().filter(|c| !c.is_empty()) else {
        return;
    };
    b.section_heading(ui.conclusion_title);
    if let Some(insight) = conclusion.main_insight.as_deref() {
        b.labeled_line(ui.main_insight, insight);
    }
    if let Some(recommendation) = conclusion.key_recommendation.as_deref() {
        b.labeled_line(ui.key_recommendation, recommendation);
    }
    if let Some(forecast) = conclusion.forecast.as_deref() {
        b.labeled_line(ui.forecast, forecast);
    }
}

fn build_uncertainties(b: &mut SourceBuilder, doc: &AnalysisDocument, ui: &UiStrings) {
    if doc.uncertainties.is_empty() {
        return;
    }
    b.section_heading(ui.uncertainties_title);
    for u in &doc.uncertainties {
        if let Some(text) = u.text.as_deref() {
            b.push(&format!("#strong[«{}»]\n\n", escape_typst(text)));
        }
        if let Some(context) = u.context.as_deref() {
            b.labeled_line(ui.context, context);
        }
        if let Some(meaning) = u.possible_meaning.as_deref() {
            b.labeled_line(ui.possibly, meaning);
        }
    }
}

fn build_corrections(b: &mut SourceBuilder, doc: &AnalysisDocument, ui: &UiStrings) {
    if doc.corrected_terms.is_empty() {
        return;
    }
    b.section_heading(ui.corrections_title);
    for c in &doc.corrected_terms {
        b.push(&format!(
            "«{}» → #strong[{}]\n\n",
            escape_typst(c.original.as_deref().unwrap_or("")),
            escape_typst(c.corrected.as_deref().unwrap_or(""))
        ));
    }
}

fn build_glossary(b: &mut SourceBuilder, doc: &AnalysisDocument, ui: &UiStrings) {
    if doc.glossary.is_empty() {
        return;
    }
    b.section_heading(ui.glossary_title);
    for g in &doc.glossary {
        b.push(&format!(
            "#strong[{}] – {}\n\n",
            escape_typst(g.term.as_deref().unwrap_or("")),
            escape_typst(g.definition.as_deref().unwrap_or(""))
        ));
    }
}

/// Assembles the full Typst source for one report.
pub fn build_typst_source(
    doc: &AnalysisDocument,
    lang: ReportLanguage,
    fonts: &FontSelection,
    date: NaiveDate,
) -> String {
    let ui = lang.ui();
    let date_str = date.format("%Y-%m-%d").to_string();

    let mut b = SourceBuilder {
        out: build_preamble(ui, lang, fonts, &date_str),
        section: 0,
    };

    b.push(&format!(
        "#text(size: 20pt, weight: \"bold\", fill: dark-color)[{}]\n\n",
        BRAND
    ));
    b.push(&format!(
        "#text(size: 10pt, fill: muted-color)[{} {}]\n\n#line(length: 100%, stroke: 0.5pt + border-color)\n\n",
        escape_typst(ui.report_from),
        date_str
    ));

    if let Some(summary) = doc.executive_summary.as_deref().filter(|s| !s.trim().is_empty()) {
        b.push(&format!(
            "#strong[{}:] {}\n\n",
            escape_typst(ui.executive_summary),
            escape_typst(summary)
        ));
    }

    build_passport(&mut b, doc, ui);
    build_goals(&mut b, doc, ui);
    build_topics(&mut b, doc, ui);
    build_decisions(&mut b, doc, ui);
    build_open_questions(&mut b, doc, ui);
    build_dynamics(&mut b, doc, ui);
    build_recommendations(&mut b, doc, ui);
    build_action_items(&mut b, doc, ui);
    build_swot(&mut b, doc, ui);
    build_risks(&mut b, doc, ui);
    build_action_plan(&mut b, doc, ui);
    build_conclusion(&mut b, doc, ui);
    build_uncertainties(&mut b, doc, ui);
    build_corrections(&mut b, doc, ui);
    build_glossary(&mut b, doc, ui);

    b.push(&format!(
        "#v(1em)\n#line(length: 100%, stroke: 0.5pt + border-color)\n#align(center)[#text(size: 7pt, fill: muted-color)[{} • {} • {}]]\n",
        BRAND,
        date_str,
        escape_typst(ui.footer)
    ));

    b.out
}

#[cfg(test)]
mod tests {
    use super::*;
    use meetbrief_core::lang::TargetLanguage;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    fn source(doc: &AnalysisDocument) -> String {
        let lang = TargetLanguage::En.resolve(doc);
        build_typst_source(doc, lang, &FontSelection::default(), date())
    }

    #[test]
    fn empty_document_yields_brand_header_and_footer() {
        let markup = source(&AnalysisDocument::default());
        assert!(markup.contains("MeetBrief"));
        assert!(markup.contains("#set page("));
        assert!(markup.contains("AI meeting analysis"));
        // Empty lists must be omitted entirely, not emitted as bare headings.
        assert!(!markup.contains("DECISIONS"));
        assert!(!markup.contains("GLOSSARY"));
    }

    #[test]
    fn decisions_section_appears_with_status_glyphs() {
        let doc: AnalysisDocument = serde_json::from_str(
            r#"{"decisions": [
                {"decision": "ship", "status": "accepted"},
                {"decision": "wait", "status": "pending"},
                {"decision": "huh", "status": "banana"}
            ]}"#,
        )
        .unwrap();
        let markup = source(&doc);
        assert!(markup.contains("DECISIONS"));
        assert!(markup.contains("[✓], [ship]"));
        assert!(markup.contains("[…], [wait]"));
        assert!(markup.contains("[–], [huh]"));
    }

    #[test]
    fn field_values_are_escaped_in_markup() {
        let doc: AnalysisDocument = serde_json::from_str(
            r#"{"executive_summary": "<script>&test</script> #import [x] _y_"}"#,
        )
        .unwrap();
        let markup = source(&doc);
        assert!(!markup.contains("<script>&test</script>"));
        assert!(markup.contains(r"\<script\>\&test\<\/script\>") || markup.contains(r"\<script\>\&test"));
        assert!(markup.contains(r"\#import"));
        assert!(markup.contains(r"\[x\]"));
        assert!(markup.contains(r"\_y\_"));
    }

    #[test]
    fn topics_are_keep_together_blocks_with_quote_cap() {
        let doc: AnalysisDocument = serde_json::from_str(
            r#"{"topics": [{
                "title": "Budget",
                "key_points": ["cut cloud spend"],
                "quotes": ["one", "two", "three"]
            }]}"#,
        )
        .unwrap();
        let markup = source(&doc);
        assert!(markup.contains("#block(breakable: false)["));
        assert!(markup.contains("- cut cloud spend"));
        assert!(markup.contains("«one»"));
        assert!(markup.contains("«two»"));
        assert!(!markup.contains("«three»"));
    }

    #[test]
    fn risk_without_mitigation_gets_a_dash_cell() {
        let doc: AnalysisDocument = serde_json::from_str(
            r#"{"risks": [{"risk": "churn", "probability": "высокая", "impact": "high"}]}"#,
        )
        .unwrap();
        let markup = source(&doc);
        assert!(markup.contains("[churn], [высокая], [high], [–],"));
    }

    #[test]
    fn cjk_font_is_listed_when_selected() {
        let fonts = FontSelection {
            base: "Libertinus Serif".into(),
            cjk: Some("Noto Sans SC".into()),
        };
        let doc = AnalysisDocument::default();
        let markup = build_typst_source(&doc, ReportLanguage::Zh, &fonts, date());
        assert!(markup.contains(r#"("Libertinus Serif", "Noto Sans SC")"#));
        assert!(markup.contains("lang: \"zh\""));
    }

    #[test]
    fn priority_labels_cover_unspecified() {
        let doc: AnalysisDocument = serde_json::from_str(
            r#"{"expert_recommendations": {"substantive": [
                {"what": "a", "priority": "high"},
                {"what": "b", "priority": "someday"}
            ]}}"#,
        )
        .unwrap();
        let markup = source(&doc);
        assert!(markup.contains(r"\[!!!\]"));
        assert!(markup.contains(r"\[–\]"));
    }
}
