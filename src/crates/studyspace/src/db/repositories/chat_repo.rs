//! Chat history repository for database operations

use chrono::Utc;

use crate::db::connection::DatabasePool;
use crate::db::models::ChatSession;

/// Fields for saving a chat session.
#[derive(Debug, Clone)]
pub struct ChatSessionUpsert {
    pub session_id: String,
    pub title: String,
    pub messages: String,
    pub sources: String,
    pub settings: String,
}

/// Chat history repository, keyed by (user, session id)
pub struct ChatRepository;

impl ChatRepository {
    /// List a user's chat sessions, most recently active first
    pub async fn list_for_user(
        pool: &DatabasePool,
        user_id: i64,
    ) -> Result<Vec<ChatSession>, sqlx::Error> {
        sqlx::query_as::<_, ChatSession>(
            "SELECT * FROM chat_history
             WHERE user_id = ?
             ORDER BY last_message_at DESC, created_at DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Get a single session
    pub async fn get(
        pool: &DatabasePool,
        user_id: i64,
        session_id: &str,
    ) -> Result<Option<ChatSession>, sqlx::Error> {
        sqlx::query_as::<_, ChatSession>(
            "SELECT * FROM chat_history WHERE user_id = ? AND session_id = ?",
        )
        .bind(user_id)
        .bind(session_id)
        .fetch_optional(pool)
        .await
    }

    /// Insert or replace a session's history in one statement
    ///
    /// The (user_id, session_id) unique constraint drives the upsert;
    /// saving always bumps `last_message_at`.
    pub async fn upsert(
        pool: &DatabasePool,
        user_id: i64,
        save: &ChatSessionUpsert,
    ) -> Result<ChatSession, sqlx::Error> {
        let now = Utc::now().to_rfc3339();
        sqlx::query_as::<_, ChatSession>(
            "INSERT INTO chat_history
             (user_id, session_id, title, messages, sources, settings, is_active,
              last_message_at, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, 1, ?, ?, ?)
             ON CONFLICT (user_id, session_id) DO UPDATE SET
                 title = excluded.title,
                 messages = excluded.messages,
                 sources = excluded.sources,
                 settings = excluded.settings,
                 last_message_at = excluded.last_message_at,
                 updated_at = excluded.updated_at
             RETURNING *",
        )
        .bind(user_id)
        .bind(&save.session_id)
        .bind(&save.title)
        .bind(&save.messages)
        .bind(&save.sources)
        .bind(&save.settings)
        .bind(&now)
        .bind(&now)
        .bind(&now)
        .fetch_one(pool)
        .await
    }

    /// Delete a session
    ///
    /// # Returns
    /// True when a row was deleted
    pub async fn delete(
        pool: &DatabasePool,
        user_id: i64,
        session_id: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM chat_history WHERE user_id = ? AND session_id = ?")
            .bind(user_id)
            .bind(session_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::UserRepository;
    use crate::db::DatabaseConnection;

    async fn seeded_pool() -> (DatabaseConnection, i64) {
        let conn = DatabaseConnection::new("sqlite::memory:").await.unwrap();
        conn.run_migrations().await.unwrap();
        let user = UserRepository::create(conn.pool(), "alice", "a@example.com", "hash")
            .await
            .unwrap();
        (conn, user.id)
    }

    fn save(session_id: &str, messages: &str) -> ChatSessionUpsert {
        ChatSessionUpsert {
            session_id: session_id.to_string(),
            title: "New Chat".to_string(),
            messages: messages.to_string(),
            sources: "[]".to_string(),
            settings: "{}".to_string(),
        }
    }

    #[tokio::test]
    async fn test_upsert_creates_then_updates() {
        let (conn, user_id) = seeded_pool().await;

        let first = ChatRepository::upsert(conn.pool(), user_id, &save("s1", "[]"))
            .await
            .unwrap();
        assert_eq!(first.messages, "[]");

        let second = ChatRepository::upsert(
            conn.pool(),
            user_id,
            &save("s1", r#"[{"role":"user","text":"hi"}]"#),
        )
        .await
        .unwrap();
        assert_eq!(second.id, first.id);
        assert!(second.messages.contains("hi"));

        let sessions = ChatRepository::list_for_user(conn.pool(), user_id)
            .await
            .unwrap();
        assert_eq!(sessions.len(), 1);
    }

    #[tokio::test]
    async fn test_sessions_scoped_per_user() {
        let (conn, user_id) = seeded_pool().await;
        let bob = UserRepository::create(conn.pool(), "bob", "b@example.com", "hash")
            .await
            .unwrap();

        ChatRepository::upsert(conn.pool(), user_id, &save("shared-id", "[]"))
            .await
            .unwrap();
        ChatRepository::upsert(conn.pool(), bob.id, &save("shared-id", "[]"))
            .await
            .unwrap();

        let alice_sessions = ChatRepository::list_for_user(conn.pool(), user_id)
            .await
            .unwrap();
        assert_eq!(alice_sessions.len(), 1);

        assert!(ChatRepository::delete(conn.pool(), bob.id, "shared-id")
            .await
            .unwrap());
        let alice_after = ChatRepository::get(conn.pool(), user_id, "shared-id")
            .await
            .unwrap();
        assert!(alice_after.is_some());
    }

    #[tokio::test]
    async fn test_delete_missing_returns_false() {
        let (conn, user_id) = seeded_pool().await;
        assert!(!ChatRepository::delete(conn.pool(), user_id, "nope")
            .await
            .unwrap());
    }
}
