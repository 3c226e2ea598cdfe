//! Delegation seam to the external information-retrieval collaborator.
//!
//! The engine calls exactly one operation and treats it as slow and fallible.
//! No retry logic lives here; if retries are desired they belong to the
//! collaborator implementation.

use anyhow::Result;
use async_trait::async_trait;

/// External search collaborator contract. `resolve` may block on real
/// network latency; the current turn waits for it and mutates no session
/// state until it returns.
#[async_trait]
pub trait SearchClient: Send + Sync {
    async fn resolve(&self, query: &str) -> Result<String>;
}

/// Collaborator used when no real search backend is wired in. Always returns
/// the degraded apology, keeping the engine on the safe-text path.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnavailableSearchClient;

pub const SEARCH_UNAVAILABLE_REPLY: &str =
    "Sorry, I couldn't look that up right now. Please try again later.";

#[async_trait]
impl SearchClient for UnavailableSearchClient {
    async fn resolve(&self, _query: &str) -> Result<String> {
        Ok(SEARCH_UNAVAILABLE_REPLY.to_string())
    }
}
