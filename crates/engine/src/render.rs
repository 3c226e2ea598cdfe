//! Canned response selection and dynamic-marker substitution.
//!
//! Selection is uniformly random by design; reproducibility comes from
//! seeding the injected rng, not from special-casing the renderer.

use banter_core::IntentCatalog;
use chrono::Local;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

pub const FAREWELL: &str = "Goodbye! Have a great day!";
pub const PROMPT_FOR_INPUT: &str = "Please ask me something!";
pub const CLARIFY_QUESTION: &str =
    "Could you please provide more details about what you're looking for?";
pub const CLARIFY_SHORT: &str =
    "I'd love to help! Could you please provide more details or ask a complete question?";

pub const GREETING_REPLIES: &[&str] = &[
    "Hello! How can I help you today?",
    "Hi there! What can I do for you?",
    "Hey! Nice to meet you!",
    "Greetings! How may I assist you?",
    "Hello! I'm here to help.",
];

pub const THANKS_REPLIES: &[&str] = &[
    "You're welcome!",
    "Happy to help!",
    "Anytime!",
    "My pleasure!",
    "Glad I could assist you!",
];

pub const GOODBYE_REPLIES: &[&str] = &[
    "Goodbye! Have a great day!",
    "See you later!",
    "Take care!",
    "Farewell! Come back soon!",
    "Bye! It was nice chatting with you!",
];

const TIME_MARKER: &str = "{time}";

pub struct ResponseRenderer {
    rng: StdRng,
}

impl ResponseRenderer {
    pub fn new() -> Self {
        Self { rng: StdRng::from_entropy() }
    }

    /// Deterministic renderer for tests and reproducible sessions.
    pub fn with_seed(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    /// Pick one template from the tag's response set and substitute dynamic
    /// markers. `None` for a tag absent from the catalog; the caller treats
    /// that as a delegation fallthrough, never a fault.
    pub fn render_intent(&mut self, catalog: &IntentCatalog, tag: &str) -> Option<String> {
        let responses = catalog.responses(tag)?;
        let template = responses.choose(&mut self.rng)?;
        Some(self.substitute(template))
    }

    pub fn greeting(&mut self) -> String {
        self.pick(GREETING_REPLIES)
    }

    pub fn thanks(&mut self) -> String {
        self.pick(THANKS_REPLIES)
    }

    pub fn goodbye(&mut self) -> String {
        self.pick(GOODBYE_REPLIES)
    }

    /// The synthesized weather sentence for a context follow-up.
    pub fn weather_followup(&self, city: &str) -> String {
        format!(
            "The weather in {} is pleasant with mild temperatures. Perfect for outdoor activities!",
            title_case(city)
        )
    }

    fn pick(&mut self, replies: &[&str]) -> String {
        replies.choose(&mut self.rng).map(|r| (*r).to_string()).unwrap_or_default()
    }

    fn substitute(&self, template: &str) -> String {
        if template.contains(TIME_MARKER) {
            let now = Local::now().format("%H:%M:%S").to_string();
            template.replace(TIME_MARKER, &now)
        } else {
            template.to_string()
        }
    }
}

impl Default for ResponseRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use banter_core::{Intent, IntentCatalog};

    use super::{ResponseRenderer, GREETING_REPLIES};

    fn catalog() -> IntentCatalog {
        IntentCatalog::from_intents(vec![
            Intent {
                tag: "jokes".to_string(),
                patterns: Vec::new(),
                responses: vec!["A".to_string(), "B".to_string(), "C".to_string()],
            },
            Intent {
                tag: "time".to_string(),
                patterns: Vec::new(),
                responses: vec!["The current time is {time}.".to_string()],
            },
        ])
        .expect("catalog fixture")
    }

    #[test]
    fn renders_from_the_tag_response_set() {
        let mut renderer = ResponseRenderer::with_seed(7);
        let reply = renderer.render_intent(&catalog(), "jokes").expect("jokes is mapped");
        assert!(["A", "B", "C"].contains(&reply.as_str()));
    }

    #[test]
    fn seeded_selection_is_reproducible() {
        let catalog = catalog();
        let mut first = ResponseRenderer::with_seed(42);
        let mut second = ResponseRenderer::with_seed(42);
        for _ in 0..10 {
            assert_eq!(
                first.render_intent(&catalog, "jokes"),
                second.render_intent(&catalog, "jokes")
            );
        }
    }

    #[test]
    fn unmapped_tag_renders_as_none() {
        let mut renderer = ResponseRenderer::with_seed(1);
        assert!(renderer.render_intent(&catalog(), "general_knowledge").is_none());
    }

    #[test]
    fn time_marker_is_replaced_with_a_clock_value() {
        let mut renderer = ResponseRenderer::with_seed(1);
        let reply = renderer.render_intent(&catalog(), "time").expect("time is mapped");
        assert!(!reply.contains("{time}"));
        assert!(reply.starts_with("The current time is "));
        // HH:MM:SS
        let clock = reply.trim_start_matches("The current time is ").trim_end_matches('.');
        assert_eq!(clock.len(), 8);
        assert_eq!(clock.matches(':').count(), 2);
    }

    #[test]
    fn weather_followup_title_cases_the_city() {
        let renderer = ResponseRenderer::with_seed(1);
        let sentence = renderer.weather_followup("new york");
        assert!(sentence.contains("New York"));
        assert!(sentence.contains("pleasant"));
    }

    #[test]
    fn rule_branch_replies_come_from_the_fixed_sets() {
        let mut renderer = ResponseRenderer::with_seed(3);
        for _ in 0..20 {
            let reply = renderer.greeting();
            assert!(GREETING_REPLIES.contains(&reply.as_str()));
        }
    }
}
