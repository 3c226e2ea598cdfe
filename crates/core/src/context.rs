use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One resolved turn: what the user said and what the engine replied.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub user: String,
    pub bot: String,
    pub occurred_at: DateTime<Utc>,
}

/// Mutable per-conversation state. Exactly one of these exists per active
/// conversation; sharing an instance across conversations is a correctness
/// bug. Mutated only after a turn fully resolves.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionContext {
    pub session_id: Uuid,
    /// One-slot lookback used to interpret elliptical follow-ups (currently
    /// only `weather`). Set when a weather intent answers locally, cleared
    /// when a city follow-up consumes it.
    sticky_intent: Option<String>,
    transcript: Vec<TranscriptEntry>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self { session_id: Uuid::new_v4(), sticky_intent: None, transcript: Vec::new() }
    }

    pub fn sticky_intent(&self) -> Option<&str> {
        self.sticky_intent.as_deref()
    }

    pub fn set_sticky_intent(&mut self, tag: impl Into<String>) {
        self.sticky_intent = Some(tag.into());
    }

    pub fn clear_sticky_intent(&mut self) {
        self.sticky_intent = None;
    }

    pub fn record_turn(&mut self, user: impl Into<String>, bot: impl Into<String>) {
        self.transcript.push(TranscriptEntry {
            user: user.into(),
            bot: bot.into(),
            occurred_at: Utc::now(),
        });
    }

    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}
