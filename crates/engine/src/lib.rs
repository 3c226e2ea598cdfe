//! Turn Engine - rule-augmented intent classification and escalation
//!
//! This crate is the decision pipeline of the banter system:
//! - Short-circuits high-precision lexical patterns before any classification
//!   (`rules`)
//! - Normalizes free text and encodes it against the frozen vocabulary
//!   (`normalize`, `features`)
//! - Invokes the frozen classifier behind a black-box contract (`classifier`)
//! - Decides answer-locally vs delegate-to-search in one consolidated rule
//!   order (`policy`)
//! - Renders canned responses with dynamic markers (`render`)
//!
//! # Architecture
//!
//! Each turn runs the same constrained flow:
//! 1. **Rule Router** (`rules`) - exit/greeting/thanks/goodbye/short-input
//! 2. **Normalize + Encode** (`normalize`, `features`) - tokens → bag of words
//! 3. **Classify** (`classifier`) - bag of words → (tag, confidence)
//! 4. **Escalate** (`policy`) - one ordered decision, consulting the session
//!    context for weather follow-ups
//! 5. **Render or Delegate** (`render`, `search`) - reply text
//!
//! # Safety Principle
//!
//! `process_turn` is infallible. Startup validation is strict (a malformed
//! catalog never boots), but once serving, every internal failure is
//! translated into safe text on the delegation path.

pub mod bootstrap;
pub mod classifier;
pub mod features;
pub mod normalize;
pub mod policy;
pub mod render;
pub mod rules;
pub mod search;
pub mod turn;

pub use bootstrap::{bootstrap, bootstrap_offline, BootstrapError};
pub use classifier::{Classification, DenseSoftmaxModel, IntentClassifier, IntentModel};
pub use policy::{EscalationPolicy, TurnAction};
pub use rules::{RuleRouter, RuleVerdict};
pub use search::{SearchClient, UnavailableSearchClient};
pub use turn::{ChatEngine, TurnReply};
