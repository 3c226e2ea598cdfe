//! Turn orchestration: the sole public entry point any front end calls.
//!
//! `process_turn` is infallible by contract. Session context is mutated only
//! after the turn fully resolves; the delegation call is awaited before any
//! state changes, so a slow or failing collaborator can never leave the
//! context half-updated.

use banter_core::{IntentCatalog, ModelArtifacts, SessionContext, Vocabulary};
use tracing::{debug, info, warn};

use crate::classifier::{Classification, IntentClassifier};
use crate::features::encode;
use crate::normalize::normalize;
use crate::policy::{city_mention, EscalationPolicy, TurnAction, WEATHER_TAG};
use crate::render::{
    ResponseRenderer, CLARIFY_QUESTION, CLARIFY_SHORT, FAREWELL, PROMPT_FOR_INPUT,
};
use crate::rules::{RuleRouter, RuleVerdict};
use crate::search::SearchClient;

/// Apology surfaced when the delegation collaborator itself fails.
pub const DELEGATION_FAILURE_REPLY: &str =
    "Sorry, I encountered an error processing your message. Please try again.";

/// Hint emitted after a local weather answer arms the follow-up context.
const WEATHER_FOLLOWUP_HINT: &str = "Please tell me which city you're interested in";

/// Everything a front end needs from one resolved turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnReply {
    pub text: String,
    /// Set when the turn was an exit phrase; the conversation is over.
    pub end_of_conversation: bool,
    /// Optional prompt a front end may show after the reply (currently only
    /// the weather city hint).
    pub followup_hint: Option<String>,
}

impl TurnReply {
    fn plain(text: impl Into<String>) -> Self {
        Self { text: text.into(), end_of_conversation: false, followup_hint: None }
    }
}

/// The assembled decision pipeline. Holds only init-once, read-only state
/// (catalog, frozen artifacts) plus the renderer rng; per-conversation state
/// lives in the `SessionContext` passed into each turn, so one engine can
/// serve any number of independent conversations.
pub struct ChatEngine {
    catalog: IntentCatalog,
    vocabulary: Option<Vocabulary>,
    classifier: IntentClassifier,
    router: RuleRouter,
    policy: EscalationPolicy,
    renderer: ResponseRenderer,
    search: Box<dyn SearchClient>,
}

impl ChatEngine {
    /// Assemble an engine. `artifacts: None` builds the permanently degraded
    /// classifier: every turn that survives the rule router delegates.
    pub fn new(
        catalog: IntentCatalog,
        artifacts: Option<ModelArtifacts>,
        search: Box<dyn SearchClient>,
    ) -> Self {
        let (vocabulary, classifier) = match artifacts {
            Some(artifacts) => {
                let classifier = IntentClassifier::from_artifacts(&artifacts);
                (Some(artifacts.vocabulary), classifier)
            }
            None => (None, IntentClassifier::unavailable()),
        };

        Self {
            catalog,
            vocabulary,
            classifier,
            router: RuleRouter::new(),
            policy: EscalationPolicy::new(),
            renderer: ResponseRenderer::new(),
            search,
        }
    }

    /// Pin the renderer's randomness so response selection is reproducible.
    pub fn with_seeded_renderer(mut self, seed: u64) -> Self {
        self.renderer = ResponseRenderer::with_seed(seed);
        self
    }

    pub fn classifier_available(&self) -> bool {
        self.classifier.is_available()
    }

    /// Process one inbound message to completion. Never fails: internal
    /// errors resolve to safe text on the delegation path.
    pub async fn process_turn(&mut self, ctx: &mut SessionContext, raw: &str) -> TurnReply {
        if let Some(verdict) = self.router.evaluate(raw) {
            // An armed weather follow-up outranks the clarification rules:
            // a bare city name must reach the escalation policy.
            let followup_pending = matches!(
                verdict,
                RuleVerdict::ClarifyQuestion | RuleVerdict::ClarifyShort
            ) && ctx.sticky_intent() == Some(WEATHER_TAG)
                && city_mention(raw).is_some();

            if !followup_pending {
                return self.resolve_rule(ctx, raw, verdict);
            }
        }

        let classification = self.classify(raw);
        debug!(
            intent = classification.tag.as_deref().unwrap_or("<unavailable>"),
            confidence = classification.confidence,
            "classified input"
        );

        let action = self.policy.decide(raw, &classification, ctx.sticky_intent());
        self.resolve_action(ctx, raw, action).await
    }

    fn classify(&self, raw: &str) -> Classification {
        match &self.vocabulary {
            Some(vocabulary) => {
                let tokens = normalize(raw);
                let bag = encode(&tokens, vocabulary);
                self.classifier.classify(&bag)
            }
            None => Classification::unavailable(),
        }
    }

    fn resolve_rule(
        &mut self,
        ctx: &mut SessionContext,
        raw: &str,
        verdict: RuleVerdict,
    ) -> TurnReply {
        debug!(rule = ?verdict, "lexical rule short-circuited the turn");

        let reply = match verdict {
            RuleVerdict::Farewell => TurnReply {
                text: FAREWELL.to_string(),
                end_of_conversation: true,
                followup_hint: None,
            },
            // Whitespace-only turns leave the session context untouched.
            RuleVerdict::PromptForInput => return TurnReply::plain(PROMPT_FOR_INPUT),
            RuleVerdict::Greeting => TurnReply::plain(self.renderer.greeting()),
            RuleVerdict::Thanks => TurnReply::plain(self.renderer.thanks()),
            RuleVerdict::Goodbye => TurnReply::plain(self.renderer.goodbye()),
            RuleVerdict::ClarifyQuestion => TurnReply::plain(CLARIFY_QUESTION),
            RuleVerdict::ClarifyShort => TurnReply::plain(CLARIFY_SHORT),
        };

        ctx.record_turn(raw, reply.text.clone());
        reply
    }

    async fn resolve_action(
        &mut self,
        ctx: &mut SessionContext,
        raw: &str,
        action: TurnAction,
    ) -> TurnReply {
        match action {
            TurnAction::AnswerLocal { tag } => {
                match self.renderer.render_intent(&self.catalog, &tag) {
                    Some(text) => {
                        info!(intent = %tag, "answered locally from the intent catalog");
                        let mut reply = TurnReply::plain(text);
                        if tag == WEATHER_TAG {
                            ctx.set_sticky_intent(WEATHER_TAG);
                            reply.followup_hint = Some(WEATHER_FOLLOWUP_HINT.to_string());
                        }
                        ctx.record_turn(raw, reply.text.clone());
                        reply
                    }
                    // Predicted tag is not in the catalog. Unmapped tags
                    // fall through to delegation, never crash.
                    None => {
                        warn!(intent = %tag, "predicted tag missing from catalog, delegating");
                        self.delegate(ctx, raw).await
                    }
                }
            }
            TurnAction::ContextFollowup { city } => {
                let text = self.renderer.weather_followup(city);
                ctx.clear_sticky_intent();
                ctx.record_turn(raw, text.clone());
                TurnReply::plain(text)
            }
            TurnAction::Delegate => self.delegate(ctx, raw).await,
        }
    }

    async fn delegate(&mut self, ctx: &mut SessionContext, raw: &str) -> TurnReply {
        info!("delegating turn to the search collaborator");
        let text = match self.search.resolve(raw).await {
            Ok(answer) => answer,
            Err(error) => {
                warn!(%error, "search collaborator failed, surfacing apology");
                DELEGATION_FAILURE_REPLY.to_string()
            }
        };

        // Context is written only now, after the collaborator returned.
        ctx.record_turn(raw, text.clone());
        TurnReply::plain(text)
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;
    use async_trait::async_trait;
    use banter_core::{
        Intent, IntentCatalog, LabelEncoder, ModelArtifacts, ModelWeights, SessionContext,
        Vocabulary,
    };

    use super::{ChatEngine, DELEGATION_FAILURE_REPLY};
    use crate::search::SearchClient;

    struct StubSearch(&'static str);

    #[async_trait]
    impl SearchClient for StubSearch {
        async fn resolve(&self, _query: &str) -> anyhow::Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct FailingSearch;

    #[async_trait]
    impl SearchClient for FailingSearch {
        async fn resolve(&self, _query: &str) -> anyhow::Result<String> {
            Err(anyhow!("socket reset"))
        }
    }

    fn catalog() -> IntentCatalog {
        IntentCatalog::from_intents(vec![
            Intent {
                tag: "weather".to_string(),
                patterns: Vec::new(),
                responses: vec!["Looks sunny out there.".to_string()],
            },
            Intent {
                tag: "jokes".to_string(),
                patterns: Vec::new(),
                responses: vec!["Why did the crab never share? It was shellfish.".to_string()],
            },
        ])
        .expect("catalog fixture")
    }

    /// Two-class model over a two-token vocabulary: "weather" and "joke".
    /// Strong weights give near-1.0 confidence for a matching token.
    fn artifacts() -> ModelArtifacts {
        ModelArtifacts {
            vocabulary: Vocabulary::new(vec!["weather".to_string(), "joke".to_string()]),
            labels: LabelEncoder::new(vec!["weather".to_string(), "jokes".to_string()]),
            model: ModelWeights {
                weights: vec![vec![12.0, 0.0], vec![0.0, 12.0]],
                bias: vec![0.0, 0.0],
            },
        }
    }

    fn engine(search: Box<dyn SearchClient>) -> ChatEngine {
        ChatEngine::new(catalog(), Some(artifacts()), search).with_seeded_renderer(11)
    }

    #[tokio::test]
    async fn delegation_failure_surfaces_the_apology_not_an_error() {
        let mut engine = ChatEngine::new(catalog(), None, Box::new(FailingSearch));
        let mut ctx = SessionContext::new();
        let reply = engine.process_turn(&mut ctx, "nonsense gibberish input").await;
        assert_eq!(reply.text, DELEGATION_FAILURE_REPLY);
        assert!(!reply.end_of_conversation);
    }

    #[tokio::test]
    async fn local_weather_answer_arms_the_followup_hint() {
        let mut engine = engine(Box::new(StubSearch("searched")));
        let mut ctx = SessionContext::new();
        let reply = engine.process_turn(&mut ctx, "weather report for today please").await;
        assert_eq!(reply.text, "Looks sunny out there.");
        assert!(reply.followup_hint.is_some());
        assert_eq!(ctx.sticky_intent(), Some("weather"));
    }

    #[tokio::test]
    async fn bare_city_after_weather_bypasses_the_short_input_rule() {
        let mut engine = engine(Box::new(StubSearch("searched")));
        let mut ctx = SessionContext::new();
        engine.process_turn(&mut ctx, "weather report for today please").await;

        let reply = engine.process_turn(&mut ctx, "london").await;
        assert!(reply.text.contains("London"));
        assert!(ctx.sticky_intent().is_none());
    }

    #[tokio::test]
    async fn transcript_records_both_sides_after_resolution() {
        let mut engine = engine(Box::new(StubSearch("searched")));
        let mut ctx = SessionContext::new();
        engine.process_turn(&mut ctx, "joke please funny one").await;
        let transcript = ctx.transcript();
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript[0].user, "joke please funny one");
        assert!(!transcript[0].bot.is_empty());
    }
}
