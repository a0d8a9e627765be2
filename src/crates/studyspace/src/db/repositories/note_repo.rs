//! Note repository for database operations

use chrono::Utc;

use crate::db::connection::DatabasePool;
use crate::db::models::{NewNote, Note};

/// Note repository for managing note database operations
pub struct NoteRepository;

impl NoteRepository {
    /// Create a new note
    ///
    /// # Arguments
    /// * `pool` - Database connection pool
    /// * `user_id` - Owning user
    /// * `note` - Note fields; `source_count` is derived from the ids
    ///
    /// # Returns
    /// Created note or database error
    pub async fn create(
        pool: &DatabasePool,
        user_id: i64,
        note: &NewNote,
    ) -> Result<Note, sqlx::Error> {
        let now = Utc::now().to_rfc3339();
        let sources = serde_json::to_string(&note.source_ids).unwrap_or_else(|_| "[]".to_string());
        let tags = serde_json::to_string(&note.tags).unwrap_or_else(|_| "[]".to_string());

        sqlx::query_as::<_, Note>(
            "INSERT INTO notes
             (user_id, title, content, note_type, source_count, sources,
              quiz_data, flashcard_data, mind_map_data, presentation_data,
              infographic_image_url, tags, color, is_pinned, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(user_id)
        .bind(&note.title)
        .bind(&note.content)
        .bind(&note.note_type)
        .bind(note.source_ids.len() as i64)
        .bind(&sources)
        .bind(note.quiz_data.as_deref())
        .bind(note.flashcard_data.as_deref())
        .bind(note.mind_map_data.as_deref())
        .bind(note.presentation_data.as_deref())
        .bind(note.infographic_image_url.as_deref())
        .bind(&tags)
        .bind(note.color.as_deref().unwrap_or("#3B82F6"))
        .bind(note.is_pinned)
        .bind(&now)
        .bind(&now)
        .fetch_one(pool)
        .await
    }

    /// List a user's notes, pinned first then newest, excluding archived
    pub async fn list_for_user(
        pool: &DatabasePool,
        user_id: i64,
    ) -> Result<Vec<Note>, sqlx::Error> {
        sqlx::query_as::<_, Note>(
            "SELECT * FROM notes
             WHERE user_id = ? AND is_archived = 0
             ORDER BY is_pinned DESC, created_at DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Get a note by id, scoped to its owner
    pub async fn get_for_user(
        pool: &DatabasePool,
        user_id: i64,
        id: i64,
    ) -> Result<Option<Note>, sqlx::Error> {
        sqlx::query_as::<_, Note>("SELECT * FROM notes WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a note, scoped to its owner
    ///
    /// # Returns
    /// True when a row was deleted
    pub async fn delete_for_user(
        pool: &DatabasePool,
        user_id: i64,
        id: i64,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notes WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
