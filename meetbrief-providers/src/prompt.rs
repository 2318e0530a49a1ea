//! Prompt text for the analysis call. This is configuration, not logic:
//! the pipeline only relies on the JSON key names listed here matching the
//! typed document model.

use meetbrief_core::lang::TargetLanguage;
use meetbrief_core::timefmt::format_timestamp;
use meetbrief_core::transcript::MergedTranscript;

pub const SYSTEM_PROMPT: &str = r#"You are an expert meeting analyst. You receive a diarized meeting transcript and produce a thorough, structured analysis.

PRINCIPLES:
1. Use ONLY facts from the transcript. Mark interpretations with "possibly" / "judging by context".
2. Keep "Speaker 1, 2, 3..." labels unless real names were spoken.
3. Decisions are only what was actually agreed; proposals are not decisions.
4. Put transcription mishearings into "corrected_terms" and doubtful passages into "uncertainties".
5. Evaluate ideas, not people. Recommendations must be concrete and professional.

Respond STRICTLY as one JSON object with these keys:
{"meeting_topic_short":"3-5 words","executive_summary":"3-5 sentences","passport":{"date":"...","duration_estimate":"...","participants_count":0,"participants":["Speaker 1"],"format":"...","domain":"...","tone":"...","complexity":"...","summary":"1-2 sentences"},"meeting_goals":{"explicit":["..."],"implicit":["..."],"recommendation":"..."},"topics":[{"title":"...","description":"...","detailed_discussion":"...","raised_by":"...","key_points":["..."],"positions":{"Speaker 1":{"stance":"...","true_interests":"...","strengths":"...","weaknesses":"..."}},"agreement_points":["..."],"disagreement_points":["..."],"outcome":"...","unresolved":["..."],"quotes":["..."],"expert_tip":"..."}],"decisions":[{"decision":"...","responsible":"...","status":"accepted|pending","context":"..."}],"action_items":[{"task":"...","responsible":"...","deadline":"..."}],"unresolved_questions":[{"question":"...","reason":"...","impact":"..."}],"dynamics":{"participation_balance":{"Speaker 1":"45%"},"interaction_patterns":{"interruptions":"...","question_askers":["..."],"topic_initiators":["..."],"challengers":["..."]},"emotional_map":{"enthusiasm_moments":["..."],"tension_moments":["..."],"uncertainty_moments":["..."],"turning_points":["..."]},"unspoken":["..."],"hidden_dynamics":"..."},"swot":{"strengths":["..."],"weaknesses":["..."],"opportunities":["..."],"threats":["..."]},"expert_recommendations":{"strengths":["..."],"attention_points":["..."],"substantive":[{"what":"...","why":"...","how":"...","priority":"high|medium|low"}],"process":[{"what":"...","how":"..."}],"tools_and_methods":["..."],"benchmarks":["..."],"next_meeting_questions":["..."]},"risks":[{"risk":"...","probability":"...","impact":"...","mitigation":"..."}],"action_plan":{"urgent":["..."],"medium_term":["..."],"long_term":["..."],"kpi":["..."]},"conclusion":{"main_insight":"...","key_recommendation":"...","forecast":"..."},"uncertainties":[{"text":"...","context":"...","possible_meaning":"..."}],"corrected_terms":[{"original":"...","corrected":"...","context":"..."}],"glossary":[{"term":"...","definition":"..."}]}"#;

/// Per-language instruction prepended to the user message.
pub fn language_note(target: TargetLanguage) -> &'static str {
    match target {
        TargetLanguage::Ru => "Write the report in RUSSIAN.",
        TargetLanguage::En => "Write the report in ENGLISH.",
        TargetLanguage::Kk => "Write the report in KAZAKH.",
        TargetLanguage::Es => "Write the report in SPANISH.",
        TargetLanguage::Zh => "Write the report in CHINESE.",
        TargetLanguage::Original => "Write the report in the language of the conversation.",
    }
}

pub fn build_user_message(transcript: &MergedTranscript, target: TargetLanguage) -> String {
    format!(
        "{}\n\nParticipants: {}\nLanguage: {}\nDuration: {}\n\nTRANSCRIPT:\n\n{}",
        language_note(target),
        transcript.speaker_count,
        transcript.detected_language,
        format_timestamp(transcript.duration_seconds),
        transcript.speaker_segmented_text
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_carries_transcript_and_metadata() {
        let transcript = MergedTranscript {
            full_text: "hello".into(),
            speaker_segmented_text: "[00:00] **Speaker 1:**\nhello".into(),
            speaker_count: 2,
            detected_language: "en".into(),
            duration_seconds: 3723.0,
        };
        let msg = build_user_message(&transcript, TargetLanguage::Es);
        assert!(msg.starts_with("Write the report in SPANISH."));
        assert!(msg.contains("Participants: 2"));
        assert!(msg.contains("Duration: 01:02:03"));
        assert!(msg.contains("**Speaker 1:**"));
    }
}
