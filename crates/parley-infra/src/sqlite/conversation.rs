//! SQLite conversation store implementation.
//!
//! Implements `ConversationStore` from `parley-core` using sqlx with split
//! read/write pools: raw queries, a private Row struct for SQLite-to-domain
//! mapping, and rowid-backed monotonic turn ids.

use chrono::{DateTime, Utc};
use sqlx::Row;

use parley_core::conversation::store::ConversationStore;
use parley_types::error::PersistenceError;
use parley_types::identity::{Identity, UserId};
use parley_types::turn::{Turn, TurnId, TurnRole};

use super::pool::DatabasePool;

/// SQLite-backed implementation of `ConversationStore`.
pub struct SqliteConversationStore {
    pool: DatabasePool,
}

impl SqliteConversationStore {
    /// Create a new store backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain Turns.
struct TurnRow {
    id: i64,
    owner: String,
    role: String,
    content: String,
    created_at: String,
}

impl TurnRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            owner: row.try_get("owner")?,
            role: row.try_get("role")?,
            content: row.try_get("content")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_turn(self) -> Result<Turn, PersistenceError> {
        let owner: UserId = self
            .owner
            .parse()
            .map_err(|e| PersistenceError::Query(format!("invalid owner id: {e}")))?;
        let role: TurnRole = self
            .role
            .parse()
            .map_err(PersistenceError::Query)?;
        let created_at = parse_datetime(&self.created_at)?;

        Ok(Turn {
            id: TurnId(self.id),
            owner,
            role,
            content: self.content,
            created_at,
        })
    }
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, PersistenceError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| PersistenceError::Query(format!("invalid datetime: {e}")))
}

fn rows_into_turns(rows: Vec<sqlx::sqlite::SqliteRow>) -> Result<Vec<Turn>, PersistenceError> {
    let mut turns = Vec::with_capacity(rows.len());
    for row in &rows {
        let turn_row =
            TurnRow::from_row(row).map_err(|e| PersistenceError::Query(e.to_string()))?;
        turns.push(turn_row.into_turn()?);
    }
    Ok(turns)
}

impl ConversationStore for SqliteConversationStore {
    async fn append(
        &self,
        identity: &Identity,
        role: TurnRole,
        content: &str,
    ) -> Result<Option<TurnId>, PersistenceError> {
        // Anonymous turns are never persisted.
        let Some(owner) = identity.user_id() else {
            return Ok(None);
        };

        let result = sqlx::query(
            "INSERT INTO turns (owner, role, content, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(owner.to_string())
        .bind(role.to_string())
        .bind(content)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool.writer)
        .await
        .map_err(|e| PersistenceError::Query(e.to_string()))?;

        Ok(Some(TurnId(result.last_insert_rowid())))
    }

    async fn recent(
        &self,
        identity: &Identity,
        limit: usize,
    ) -> Result<Vec<Turn>, PersistenceError> {
        let Some(owner) = identity.user_id() else {
            return Ok(Vec::new());
        };

        // Take the newest `limit` rows, then flip back to insertion order.
        let rows = sqlx::query(
            r#"SELECT id, owner, role, content, created_at FROM (
                   SELECT id, owner, role, content, created_at
                   FROM turns WHERE owner = ? ORDER BY id DESC LIMIT ?
               ) ORDER BY id ASC"#,
        )
        .bind(owner.to_string())
        .bind(limit as i64)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| PersistenceError::Query(e.to_string()))?;

        rows_into_turns(rows)
    }

    async fn all(&self, identity: &Identity) -> Result<Vec<Turn>, PersistenceError> {
        let Some(owner) = identity.user_id() else {
            return Ok(Vec::new());
        };

        let rows = sqlx::query(
            "SELECT id, owner, role, content, created_at FROM turns WHERE owner = ? ORDER BY id ASC",
        )
        .bind(owner.to_string())
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| PersistenceError::Query(e.to_string()))?;

        rows_into_turns(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_store() -> SqliteConversationStore {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        // Leak tempdir so it lives for the test
        std::mem::forget(dir);
        SqliteConversationStore::new(DatabasePool::new(&url).await.unwrap())
    }

    fn user() -> Identity {
        Identity::User(UserId::new())
    }

    #[tokio::test]
    async fn test_append_and_all_roundtrip() {
        let store = test_store().await;
        let identity = user();

        let first = store
            .append(&identity, TurnRole::User, "hello")
            .await
            .unwrap()
            .unwrap();
        let second = store
            .append(&identity, TurnRole::Assistant, "hi there")
            .await
            .unwrap()
            .unwrap();
        assert!(first < second);

        let turns = store.all(&identity).await.unwrap();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].id, first);
        assert_eq!(turns[0].role, TurnRole::User);
        assert_eq!(turns[0].content, "hello");
        assert_eq!(turns[1].id, second);
        assert_eq!(turns[1].role, TurnRole::Assistant);
        assert_eq!(turns[1].content, "hi there");
        assert!(turns[0].created_at <= turns[1].created_at);
    }

    #[tokio::test]
    async fn test_anonymous_append_is_a_no_op() {
        let store = test_store().await;

        let id = store
            .append(&Identity::Anonymous, TurnRole::User, "hi")
            .await
            .unwrap();
        assert!(id.is_none());
        assert!(store.all(&Identity::Anonymous).await.unwrap().is_empty());
        assert!(store.recent(&Identity::Anonymous, 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_recent_returns_last_n_in_insertion_order() {
        let store = test_store().await;
        let identity = user();

        for i in 1..=7 {
            store
                .append(&identity, TurnRole::User, &format!("turn {i}"))
                .await
                .unwrap();
        }

        let recent = store.recent(&identity, 3).await.unwrap();
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].content, "turn 5");
        assert_eq!(recent[1].content, "turn 6");
        assert_eq!(recent[2].content, "turn 7");
        assert!(recent[0].id < recent[1].id && recent[1].id < recent[2].id);
    }

    #[tokio::test]
    async fn test_recent_with_limit_above_total() {
        let store = test_store().await;
        let identity = user();

        store.append(&identity, TurnRole::User, "only").await.unwrap();

        let recent = store.recent(&identity, 10).await.unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].content, "only");
    }

    #[tokio::test]
    async fn test_recent_for_unknown_owner_is_empty() {
        let store = test_store().await;
        assert!(store.recent(&user(), 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_owners_are_isolated() {
        let store = test_store().await;
        let alice = user();
        let bob = user();

        store.append(&alice, TurnRole::User, "from alice").await.unwrap();
        store.append(&bob, TurnRole::User, "from bob").await.unwrap();

        let alice_turns = store.all(&alice).await.unwrap();
        assert_eq!(alice_turns.len(), 1);
        assert_eq!(alice_turns[0].content, "from alice");

        let bob_turns = store.all(&bob).await.unwrap();
        assert_eq!(bob_turns.len(), 1);
        assert_eq!(bob_turns[0].content, "from bob");
    }

    #[tokio::test]
    async fn test_reads_are_idempotent() {
        let store = test_store().await;
        let identity = user();

        store.append(&identity, TurnRole::User, "a").await.unwrap();
        store.append(&identity, TurnRole::Assistant, "b").await.unwrap();

        let first = store.recent(&identity, 10).await.unwrap();
        let second = store.recent(&identity, 10).await.unwrap();
        assert_eq!(first.len(), second.len());
        for (x, y) in first.iter().zip(second.iter()) {
            assert_eq!(x.id, y.id);
            assert_eq!(x.content, y.content);
        }
    }

    #[tokio::test]
    async fn test_empty_assistant_content_is_allowed() {
        // Assistant turns may carry empty/error text; only user turns are
        // validated upstream.
        let store = test_store().await;
        let identity = user();

        store.append(&identity, TurnRole::Assistant, "").await.unwrap();
        let turns = store.all(&identity).await.unwrap();
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].content, "");
    }
}
