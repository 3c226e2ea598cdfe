//! Pre-classification lexical short-circuit layer.
//!
//! These rules run on the raw lowercased text, before any normalization, so
//! exact phrase semantics like "good morning" survive stopword removal and
//! stemming. All matches are case-insensitive substring tests against fixed
//! phrase lists; precedence is fixed and first match wins.

const EXIT_PHRASES: &[&str] = &["quit", "exit", "bye", "goodbye"];

const GREETINGS: &[&str] = &[
    "hello",
    "hi",
    "hey",
    "hola",
    "greetings",
    "good morning",
    "good afternoon",
    "good evening",
    "howdy",
    "sup",
    "yo",
    "what's up",
    "good day",
    "hello there",
    "hi there",
];

const THANKS: &[&str] = &["thank", "thanks", "appreciate", "grateful", "cheers"];

const GOODBYES: &[&str] =
    &["bye", "goodbye", "see you", "farewell", "later", "take care", "adios", "ciao", "so long"];

const QUESTION_MARKERS: &[&str] = &[
    "what", "who", "when", "where", "why", "how", "which", "?", "explain", "tell me", "can you",
    "could you", "would you",
];

/// Whether the raw input reads as a question: a question word, a question
/// mark, or a politeness-question phrase anywhere in the text.
pub fn is_question(text: &str) -> bool {
    let lowered = text.to_lowercase();
    QUESTION_MARKERS.iter().any(|marker| lowered.contains(marker))
}

/// Which lexical rule fired for a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuleVerdict {
    /// Entire trimmed input is an exit phrase. Conversation-terminating.
    Farewell,
    /// Empty or whitespace-only input.
    PromptForInput,
    Greeting,
    Thanks,
    Goodbye,
    /// Single token that is itself a question marker.
    ClarifyQuestion,
    /// Shorter than two tokens and not recognized as a question.
    ClarifyShort,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct RuleRouter;

impl RuleRouter {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate the cascade. `None` means no rule fired and the turn falls
    /// through to the classification pipeline.
    pub fn evaluate(&self, raw: &str) -> Option<RuleVerdict> {
        let trimmed = raw.trim();
        let lowered = trimmed.to_lowercase();

        if EXIT_PHRASES.contains(&lowered.as_str()) {
            return Some(RuleVerdict::Farewell);
        }
        if trimmed.is_empty() {
            return Some(RuleVerdict::PromptForInput);
        }
        if GREETINGS.iter().any(|phrase| lowered.contains(phrase)) {
            return Some(RuleVerdict::Greeting);
        }
        if THANKS.iter().any(|phrase| lowered.contains(phrase)) {
            return Some(RuleVerdict::Thanks);
        }
        if GOODBYES.iter().any(|phrase| lowered.contains(phrase)) {
            return Some(RuleVerdict::Goodbye);
        }

        let token_count = trimmed.split_whitespace().count();
        if token_count == 1 && is_question(trimmed) {
            return Some(RuleVerdict::ClarifyQuestion);
        }
        if token_count < 2 && !is_question(trimmed) {
            return Some(RuleVerdict::ClarifyShort);
        }

        None
    }
}
