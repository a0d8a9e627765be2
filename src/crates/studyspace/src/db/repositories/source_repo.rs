//! Source repository for database operations

use chrono::Utc;

use crate::db::connection::DatabasePool;
use crate::db::models::Source;

/// Fields for inserting a new source.
#[derive(Debug, Clone, Default)]
pub struct NewSource {
    pub name: String,
    pub content: String,
    pub source_type: String,
    pub file_type: String,
    pub metadata: String,
    pub tags: String,
    pub is_active: bool,
}

/// Optional fields for [`SourceRepository::update`]; `None` keeps the
/// stored value.
#[derive(Debug, Clone, Default)]
pub struct SourceUpdate {
    pub name: Option<String>,
    pub content: Option<String>,
    pub is_active: Option<bool>,
    pub metadata: Option<String>,
    pub tags: Option<String>,
}

impl SourceUpdate {
    /// Check if any fields are being updated
    pub fn has_updates(&self) -> bool {
        self.name.is_some()
            || self.content.is_some()
            || self.is_active.is_some()
            || self.metadata.is_some()
            || self.tags.is_some()
    }
}

/// Source repository for managing source database operations
pub struct SourceRepository;

impl SourceRepository {
    /// Create a new source for a user
    ///
    /// # Arguments
    /// * `pool` - Database connection pool
    /// * `user_id` - Owning user
    /// * `source` - Source fields (content length becomes `size`)
    ///
    /// # Returns
    /// Created source or database error
    pub async fn create(
        pool: &DatabasePool,
        user_id: i64,
        source: &NewSource,
    ) -> Result<Source, sqlx::Error> {
        let now = Utc::now().to_rfc3339();
        sqlx::query_as::<_, Source>(
            "INSERT INTO sources
             (user_id, name, content, source_type, file_type, size, is_active, metadata, tags, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(user_id)
        .bind(&source.name)
        .bind(&source.content)
        .bind(&source.source_type)
        .bind(&source.file_type)
        .bind(source.content.len() as i64)
        .bind(source.is_active)
        .bind(&source.metadata)
        .bind(&source.tags)
        .bind(&now)
        .bind(&now)
        .fetch_one(pool)
        .await
    }

    /// List a user's sources, newest first
    pub async fn list_for_user(
        pool: &DatabasePool,
        user_id: i64,
    ) -> Result<Vec<Source>, sqlx::Error> {
        sqlx::query_as::<_, Source>(
            "SELECT * FROM sources WHERE user_id = ? ORDER BY created_at DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Get a source by id, scoped to its owner
    pub async fn get_for_user(
        pool: &DatabasePool,
        user_id: i64,
        id: i64,
    ) -> Result<Option<Source>, sqlx::Error> {
        sqlx::query_as::<_, Source>("SELECT * FROM sources WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Load several sources by id, preserving the requested order.
    /// Ids that don't exist (or belong to someone else) are skipped.
    pub async fn get_many_for_user(
        pool: &DatabasePool,
        user_id: i64,
        ids: &[i64],
    ) -> Result<Vec<Source>, sqlx::Error> {
        let mut sources = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(source) = Self::get_for_user(pool, user_id, *id).await? {
                sources.push(source);
            }
        }
        Ok(sources)
    }

    /// Apply a partial update; updating content also refreshes `size`
    pub async fn update(
        pool: &DatabasePool,
        user_id: i64,
        id: i64,
        update: &SourceUpdate,
    ) -> Result<Option<Source>, sqlx::Error> {
        let now = Utc::now().to_rfc3339();
        let size = update.content.as_ref().map(|content| content.len() as i64);
        sqlx::query_as::<_, Source>(
            "UPDATE sources SET
                 name = COALESCE(?, name),
                 content = COALESCE(?, content),
                 size = COALESCE(?, size),
                 is_active = COALESCE(?, is_active),
                 metadata = COALESCE(?, metadata),
                 tags = COALESCE(?, tags),
                 updated_at = ?
             WHERE id = ? AND user_id = ?
             RETURNING *",
        )
        .bind(update.name.as_deref())
        .bind(update.content.as_deref())
        .bind(size)
        .bind(update.is_active)
        .bind(update.metadata.as_deref())
        .bind(update.tags.as_deref())
        .bind(&now)
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
    }

    /// Delete a source, scoped to its owner
    ///
    /// # Returns
    /// True when a row was deleted
    pub async fn delete_for_user(
        pool: &DatabasePool,
        user_id: i64,
        id: i64,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sources WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Toggle the active flag on a set of sources in one statement
    pub async fn set_active_bulk(
        pool: &DatabasePool,
        user_id: i64,
        ids: &[i64],
        is_active: bool,
    ) -> Result<u64, sqlx::Error> {
        if ids.is_empty() {
            return Ok(0);
        }

        let placeholders = ids.iter().map(|_| "?").collect::<Vec<_>>().join(",");
        let sql = format!(
            "UPDATE sources SET is_active = ?, updated_at = ? WHERE user_id = ? AND id IN ({})",
            placeholders
        );

        let now = Utc::now().to_rfc3339();
        let mut query = sqlx::query(&sql).bind(is_active).bind(&now).bind(user_id);
        for id in ids {
            query = query.bind(id);
        }

        let result = query.execute(pool).await?;
        Ok(result.rows_affected())
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

    fn text_source(name: &str, content: &str) -> NewSource {
        NewSource {
            name: name.to_string(),
            content: content.to_string(),
            source_type: "text".to_string(),
            file_type: "txt".to_string(),
            metadata: "{}".to_string(),
            tags: "[]".to_string(),
            is_active: true,
        }
    }

    #[tokio::test]
    async fn test_create_sets_size() {
        let (conn, user_id) = seeded_pool().await;
        let source = SourceRepository::create(conn.pool(), user_id, &text_source("a.txt", "hello"))
            .await
            .unwrap();
        assert_eq!(source.size, 5);
        assert!(source.is_active);
    }

    #[tokio::test]
    async fn test_get_scoped_to_owner() {
        let (conn, user_id) = seeded_pool().await;
        let other = UserRepository::create(conn.pool(), "bob", "b@example.com", "hash")
            .await
            .unwrap();
        let source = SourceRepository::create(conn.pool(), user_id, &text_source("a.txt", "x"))
            .await
            .unwrap();

        let mine = SourceRepository::get_for_user(conn.pool(), user_id, source.id)
            .await
            .unwrap();
        assert!(mine.is_some());

        let theirs = SourceRepository::get_for_user(conn.pool(), other.id, source.id)
            .await
            .unwrap();
        assert!(theirs.is_none());
    }

    #[tokio::test]
    async fn test_update_content_refreshes_size() {
        let (conn, user_id) = seeded_pool().await;
        let source = SourceRepository::create(conn.pool(), user_id, &text_source("a.txt", "abc"))
            .await
            .unwrap();

        let update = SourceUpdate {
            content: Some("longer content".to_string()),
            ..SourceUpdate::default()
        };
        let updated = SourceRepository::update(conn.pool(), user_id, source.id, &update)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.content, "longer content");
        assert_eq!(updated.size, 14);
        assert_eq!(updated.name, "a.txt");
    }

    #[tokio::test]
    async fn test_bulk_active_toggle() {
        let (conn, user_id) = seeded_pool().await;
        let a = SourceRepository::create(conn.pool(), user_id, &text_source("a.txt", "x"))
            .await
            .unwrap();
        let b = SourceRepository::create(conn.pool(), user_id, &text_source("b.txt", "y"))
            .await
            .unwrap();

        let changed =
            SourceRepository::set_active_bulk(conn.pool(), user_id, &[a.id, b.id], false)
                .await
                .unwrap();
        assert_eq!(changed, 2);

        let sources = SourceRepository::list_for_user(conn.pool(), user_id)
            .await
            .unwrap();
        assert!(sources.iter().all(|s| !s.is_active));
    }

    #[tokio::test]
    async fn test_delete_reports_missing() {
        let (conn, user_id) = seeded_pool().await;
        let source = SourceRepository::create(conn.pool(), user_id, &text_source("a.txt", "x"))
            .await
            .unwrap();

        assert!(SourceRepository::delete_for_user(conn.pool(), user_id, source.id)
            .await
            .unwrap());
        assert!(!SourceRepository::delete_for_user(conn.pool(), user_id, source.id)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_get_many_preserves_order_and_skips_missing() {
        let (conn, user_id) = seeded_pool().await;
        let a = SourceRepository::create(conn.pool(), user_id, &text_source("a.txt", "x"))
            .await
            .unwrap();
        let b = SourceRepository::create(conn.pool(), user_id, &text_source("b.txt", "y"))
            .await
            .unwrap();

        let sources =
            SourceRepository::get_many_for_user(conn.pool(), user_id, &[b.id, 999, a.id])
                .await
                .unwrap();
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].id, b.id);
        assert_eq!(sources[1].id, a.id);
    }
}
