//! Typed model of the analysis document returned by the language-model call.
//!
//! The schema is a contract with an external model, not something we control:
//! every block and field may be missing, and scalar leaves arrive as strings
//! or numbers depending on the model's mood. Each field is therefore optional
//! (or an empty-defaulted list), scalar leaves deserialize leniently, and
//! unknown fields are ignored. Structurally unparseable JSON is the caller's
//! analysis failure; absence never is.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisDocument {
    #[serde(default, deserialize_with = "de::opt_string")]
    pub meeting_topic_short: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub executive_summary: Option<String>,
    #[serde(default)]
    pub passport: Option<Passport>,
    #[serde(default)]
    pub meeting_goals: Option<MeetingGoals>,
    #[serde(default)]
    pub topics: Vec<Topic>,
    #[serde(default)]
    pub decisions: Vec<Decision>,
    #[serde(default)]
    pub action_items: Vec<ActionItem>,
    #[serde(default)]
    pub unresolved_questions: Vec<UnresolvedQuestion>,
    #[serde(default)]
    pub dynamics: Option<Dynamics>,
    #[serde(default)]
    pub swot: Option<Swot>,
    #[serde(default)]
    pub expert_recommendations: Option<ExpertRecommendations>,
    #[serde(default)]
    pub risks: Vec<Risk>,
    #[serde(default)]
    pub action_plan: Option<ActionPlan>,
    #[serde(default)]
    pub conclusion: Option<Conclusion>,
    #[serde(default)]
    pub uncertainties: Vec<Uncertainty>,
    #[serde(default)]
    pub corrected_terms: Vec<CorrectedTerm>,
    #[serde(default)]
    pub glossary: Vec<GlossaryEntry>,
}

impl AnalysisDocument {
    /// Short topic title with a safe default, used for headers and filenames.
    pub fn topic_short(&self) -> &str {
        self.meeting_topic_short
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or("Meeting")
    }

    /// A bounded sample of the document's own prose, for content-language
    /// detection when the report language is "same as the recording".
    /// Samples field values only; JSON keys would skew any script ratio.
    pub fn sample_text(&self, max_chars: usize) -> String {
        let mut sample = String::new();
        let mut push = |text: Option<&str>| {
            if sample.chars().count() >= max_chars {
                return;
            }
            if let Some(text) = text {
                sample.push_str(text);
                sample.push(' ');
            }
        };

        push(self.meeting_topic_short.as_deref());
        push(self.executive_summary.as_deref());
        if let Some(passport) = &self.passport {
            push(passport.summary.as_deref());
            push(passport.domain.as_deref());
        }
        for topic in &self.topics {
            push(topic.title.as_deref());
            push(topic.description.as_deref());
            push(topic.detailed_discussion.as_deref());
        }
        if let Some(conclusion) = &self.conclusion {
            push(conclusion.main_insight.as_deref());
        }

        sample.chars().take(max_chars).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Passport {
    #[serde(default, deserialize_with = "de::opt_string")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub duration_estimate: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub participants_count: Option<String>,
    #[serde(default, deserialize_with = "de::vec_string")]
    pub participants: Vec<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub format: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub domain: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub tone: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub complexity: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MeetingGoals {
    #[serde(default, deserialize_with = "de::vec_string")]
    pub explicit: Vec<String>,
    #[serde(default, deserialize_with = "de::vec_string")]
    pub implicit: Vec<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub recommendation: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    #[serde(default, deserialize_with = "de::opt_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub detailed_discussion: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub raised_by: Option<String>,
    #[serde(default, deserialize_with = "de::vec_string")]
    pub key_points: Vec<String>,
    #[serde(default)]
    pub positions: BTreeMap<String, Position>,
    #[serde(default, deserialize_with = "de::vec_string")]
    pub agreement_points: Vec<String>,
    #[serde(default, deserialize_with = "de::vec_string")]
    pub disagreement_points: Vec<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub outcome: Option<String>,
    #[serde(default, deserialize_with = "de::vec_string")]
    pub unresolved: Vec<String>,
    #[serde(default, deserialize_with = "de::vec_string")]
    pub quotes: Vec<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub expert_tip: Option<String>,
}

/// A participant's position on a topic. Models emit either a structured
/// object or a bare string; both land here.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Position {
    pub stance: Option<String>,
    pub true_interests: Option<String>,
    pub strengths: Option<String>,
    pub weaknesses: Option<String>,
}

impl Position {
    /// One-line rendering used by all three report formats.
    pub fn summary(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        if let Some(s) = self.stance.as_deref() {
            parts.push(s);
        }
        if let Some(s) = self.true_interests.as_deref() {
            parts.push(s);
        }
        parts.join(" — ").trim().to_string()
    }
}

impl<'de> Deserialize<'de> for Position {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(match value {
            serde_json::Value::Object(map) => Position {
                stance: de::coerce(map.get("stance").cloned()),
                true_interests: de::coerce(map.get("true_interests").cloned()),
                strengths: de::coerce(map.get("strengths").cloned()),
                weaknesses: de::coerce(map.get("weaknesses").cloned()),
            },
            other => Position {
                stance: de::coerce(Some(other)),
                ..Position::default()
            },
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    #[serde(default, deserialize_with = "de::opt_string")]
    pub decision: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub responsible: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub context: Option<String>,
}

impl Decision {
    pub fn parsed_status(&self) -> DecisionStatus {
        DecisionStatus::parse(self.status.as_deref())
    }
}

/// Decision status as an explicit variant set: an unrecognized or missing
/// value is a deliberate `Unspecified`, not a silent lookup miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionStatus {
    Accepted,
    Pending,
    Question,
    Unspecified,
}

impl DecisionStatus {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("accepted") => Self::Accepted,
            Some("pending") => Self::Pending,
            Some("question") => Self::Question,
            _ => Self::Unspecified,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionItem {
    #[serde(default, deserialize_with = "de::opt_string")]
    pub task: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub responsible: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub deadline: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnresolvedQuestion {
    #[serde(default, deserialize_with = "de::opt_string")]
    pub question: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub reason: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub impact: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dynamics {
    #[serde(default, deserialize_with = "de::map_string")]
    pub participation_balance: BTreeMap<String, String>,
    #[serde(default)]
    pub interaction_patterns: Option<InteractionPatterns>,
    #[serde(default)]
    pub emotional_map: Option<EmotionalMap>,
    #[serde(default, deserialize_with = "de::vec_string")]
    pub unspoken: Vec<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub hidden_dynamics: Option<String>,
}

impl Dynamics {
    /// A dynamics block with no content at all renders as an omitted section.
    pub fn is_empty(&self) -> bool {
        self.participation_balance.is_empty()
            && self.interaction_patterns.is_none()
            && self
                .emotional_map
                .as_ref()
                .map(EmotionalMap::is_empty)
                .unwrap_or(true)
            && self.unspoken.is_empty()
            && self.hidden_dynamics.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InteractionPatterns {
    #[serde(default, deserialize_with = "de::opt_string")]
    pub interruptions: Option<String>,
    #[serde(default, deserialize_with = "de::vec_string")]
    pub question_askers: Vec<String>,
    #[serde(default, deserialize_with = "de::vec_string")]
    pub topic_initiators: Vec<String>,
    #[serde(default, deserialize_with = "de::vec_string")]
    pub challengers: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmotionalMap {
    #[serde(default, deserialize_with = "de::vec_string")]
    pub enthusiasm_moments: Vec<String>,
    #[serde(default, deserialize_with = "de::vec_string")]
    pub tension_moments: Vec<String>,
    #[serde(default, deserialize_with = "de::vec_string")]
    pub uncertainty_moments: Vec<String>,
    #[serde(default, deserialize_with = "de::vec_string")]
    pub turning_points: Vec<String>,
}

impl EmotionalMap {
    pub fn is_empty(&self) -> bool {
        self.enthusiasm_moments.is_empty()
            && self.tension_moments.is_empty()
            && self.uncertainty_moments.is_empty()
            && self.turning_points.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Swot {
    #[serde(default, deserialize_with = "de::vec_string")]
    pub strengths: Vec<String>,
    #[serde(default, deserialize_with = "de::vec_string")]
    pub weaknesses: Vec<String>,
    #[serde(default, deserialize_with = "de::vec_string")]
    pub opportunities: Vec<String>,
    #[serde(default, deserialize_with = "de::vec_string")]
    pub threats: Vec<String>,
}

impl Swot {
    pub fn is_empty(&self) -> bool {
        self.strengths.is_empty()
            && self.weaknesses.is_empty()
            && self.opportunities.is_empty()
            && self.threats.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpertRecommendations {
    #[serde(default, deserialize_with = "de::vec_string")]
    pub strengths: Vec<String>,
    #[serde(default, deserialize_with = "de::vec_string")]
    pub attention_points: Vec<String>,
    #[serde(default)]
    pub substantive: Vec<SubstantiveRecommendation>,
    #[serde(default)]
    pub process: Vec<ProcessRecommendation>,
    #[serde(default, deserialize_with = "de::vec_string")]
    pub tools_and_methods: Vec<String>,
    #[serde(default, deserialize_with = "de::vec_string")]
    pub benchmarks: Vec<String>,
    #[serde(default, deserialize_with = "de::vec_string")]
    pub next_meeting_questions: Vec<String>,
}

impl ExpertRecommendations {
    pub fn is_empty(&self) -> bool {
        self.strengths.is_empty()
            && self.attention_points.is_empty()
            && self.substantive.is_empty()
            && self.process.is_empty()
            && self.tools_and_methods.is_empty()
            && self.benchmarks.is_empty()
            && self.next_meeting_questions.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubstantiveRecommendation {
    #[serde(default, deserialize_with = "de::opt_string")]
    pub what: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub why: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub how: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub priority: Option<String>,
}

impl SubstantiveRecommendation {
    pub fn parsed_priority(&self) -> Priority {
        Priority::parse(self.priority.as_deref())
    }
}

/// Recommendation priority with an explicit `Unspecified` branch for
/// unrecognized values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
    Unspecified,
}

impl Priority {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("high") => Self::High,
            Some("medium") => Self::Medium,
            Some("low") => Self::Low,
            _ => Self::Unspecified,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessRecommendation {
    #[serde(default, deserialize_with = "de::opt_string")]
    pub what: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub how: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Risk {
    #[serde(default, deserialize_with = "de::opt_string")]
    pub risk: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub probability: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub impact: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub mitigation: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionPlan {
    #[serde(default, deserialize_with = "de::vec_string")]
    pub urgent: Vec<String>,
    #[serde(default, deserialize_with = "de::vec_string")]
    pub medium_term: Vec<String>,
    #[serde(default, deserialize_with = "de::vec_string")]
    pub long_term: Vec<String>,
    #[serde(default, deserialize_with = "de::vec_string")]
    pub kpi: Vec<String>,
}

impl ActionPlan {
    pub fn is_empty(&self) -> bool {
        self.urgent.is_empty()
            && self.medium_term.is_empty()
            && self.long_term.is_empty()
            && self.kpi.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Conclusion {
    #[serde(default, deserialize_with = "de::opt_string")]
    pub main_insight: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub key_recommendation: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub forecast: Option<String>,
}

impl Conclusion {
    pub fn is_empty(&self) -> bool {
        self.main_insight.is_none() && self.key_recommendation.is_none() && self.forecast.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Uncertainty {
    #[serde(default, deserialize_with = "de::opt_string")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub context: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub possible_meaning: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorrectedTerm {
    #[serde(default, deserialize_with = "de::opt_string")]
    pub original: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub corrected: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub context: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlossaryEntry {
    #[serde(default, deserialize_with = "de::opt_string")]
    pub term: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub definition: Option<String>,
}

/// Lenient deserializers for scalar leaves: the model emits strings, numbers
/// and booleans interchangeably, and null/absent must both read as "absent".
mod de {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;
    use std::collections::BTreeMap;

    pub(super) fn coerce(value: Option<Value>) -> Option<String> {
        match value? {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(coerce(value))
    }

    pub fn vec_string<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(Value::Array(items)) => {
                items.into_iter().filter_map(|v| coerce(Some(v))).collect()
            }
            // A bare scalar where a list was expected becomes a singleton.
            Some(other) => coerce(Some(other)).into_iter().collect(),
            None => Vec::new(),
        })
    }

    pub fn map_string<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(Value::Object(map)) => map
                .into_iter()
                .filter_map(|(k, v)| coerce(Some(v)).map(|v| (k, v)))
                .collect(),
            _ => BTreeMap::new(),
        })
    }
}
