//! The consolidated escalation decision: answer from the catalog, delegate
//! to the search collaborator, or resolve a context follow-up.
//!
//! The original pipeline re-checked confidence in two places; here there is
//! exactly one rule order, and it is observable behavior. Do not reorder:
//! moving a rule changes which inputs delegate versus answer locally.

use crate::classifier::Classification;
use crate::rules::is_question;

/// Confidence below which a question is not trusted to a local answer.
pub const HIGH_CONFIDENCE: f32 = 0.8;
/// Confidence below which any prediction is treated as unclassified.
pub const LOW_CONFIDENCE: f32 = 0.4;

/// The intent tag that always delegates, whatever the confidence.
pub const GENERAL_KNOWLEDGE_TAG: &str = "general_knowledge";
/// The intent tag that arms the sticky follow-up context.
pub const WEATHER_TAG: &str = "weather";

/// Information-seeking phrases that route straight to the collaborator.
const SEARCH_PATTERNS: &[&str] = &[
    "how to",
    "what is",
    "who is",
    "when did",
    "where is",
    "why does",
    "explain",
    "tell me about",
    "can you tell me",
];

/// The fixed set of cities the weather follow-up recognizes.
const CITIES: &[&str] = &["bologna", "london", "new york", "paris", "tokyo"];

/// First known city named in the text, in list order.
pub fn city_mention(text: &str) -> Option<&'static str> {
    let lowered = text.to_lowercase();
    CITIES.iter().find(|city| lowered.contains(*city)).copied()
}

/// Outcome of the escalation decision for one turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnAction {
    /// Answer from the predicted tag's response set.
    AnswerLocal { tag: String },
    /// Route the raw input to the search collaborator.
    Delegate,
    /// Synthesize a weather sentence for the named city and clear the
    /// sticky context.
    ContextFollowup { city: &'static str },
}

#[derive(Clone, Copy, Debug, Default)]
pub struct EscalationPolicy;

impl EscalationPolicy {
    pub fn new() -> Self {
        Self
    }

    /// Decide a turn. Rules are evaluated in this exact order:
    /// 1. well-formed question with confidence below 0.8 → delegate;
    /// 2. general-knowledge tag → delegate unconditionally;
    /// 3. information-seeking phrase present → delegate;
    /// 4. sticky weather context and a known city named → follow-up;
    /// 5. confidence below 0.4 → delegate (effectively unclassified);
    /// 6. otherwise answer locally from the predicted tag.
    pub fn decide(
        &self,
        raw: &str,
        classification: &Classification,
        sticky_intent: Option<&str>,
    ) -> TurnAction {
        if is_question(raw) && classification.confidence < HIGH_CONFIDENCE {
            return TurnAction::Delegate;
        }

        if classification.tag.as_deref() == Some(GENERAL_KNOWLEDGE_TAG) {
            return TurnAction::Delegate;
        }

        let lowered = raw.to_lowercase();
        if SEARCH_PATTERNS.iter().any(|pattern| lowered.contains(pattern)) {
            return TurnAction::Delegate;
        }

        if sticky_intent == Some(WEATHER_TAG) {
            if let Some(city) = city_mention(raw) {
                return TurnAction::ContextFollowup { city };
            }
        }

        if classification.confidence < LOW_CONFIDENCE {
            return TurnAction::Delegate;
        }

        match &classification.tag {
            Some(tag) => TurnAction::AnswerLocal { tag: tag.clone() },
            None => TurnAction::Delegate,
        }
    }
}
