//! ConversationStore trait definition.
//!
//! The durable, per-owner, append-only turn log. Implementations live in
//! parley-infra (e.g., `SqliteConversationStore`); tests use in-memory
//! stand-ins. Uses native async fn in traits (RPITIT, Rust 2024 edition).

use parley_types::error::PersistenceError;
use parley_types::identity::Identity;
use parley_types::turn::{Turn, TurnId, TurnRole};

/// Durable append-only conversation history, keyed by identity.
///
/// Concurrency contract: per-record atomicity only. Two concurrent `append`
/// calls for the same owner may interleave, and `recent` may race with an
/// `append` (the read sees the old or new set, never a torn turn). No
/// cross-request serialization is provided or required.
pub trait ConversationStore: Send + Sync {
    /// Insert a new turn with a fresh monotonic id and current timestamp.
    ///
    /// Returns `None` without touching storage when `identity` is anonymous:
    /// guest turns are never persisted, so guest sessions stay stateless
    /// across requests.
    fn append(
        &self,
        identity: &Identity,
        role: TurnRole,
        content: &str,
    ) -> impl std::future::Future<Output = Result<Option<TurnId>, PersistenceError>> + Send;

    /// Up to `limit` most-recently-inserted turns for `identity`, in
    /// ascending insertion order.
    ///
    /// Empty for anonymous or unknown owners. Never returns more than
    /// `limit` entries and never reorders entries relative to insertion.
    fn recent(
        &self,
        identity: &Identity,
        limit: usize,
    ) -> impl std::future::Future<Output = Result<Vec<Turn>, PersistenceError>> + Send;

    /// Full history for replay/display, ascending order; empty for anonymous.
    fn all(
        &self,
        identity: &Identity,
    ) -> impl std::future::Future<Output = Result<Vec<Turn>, PersistenceError>> + Send;
}
