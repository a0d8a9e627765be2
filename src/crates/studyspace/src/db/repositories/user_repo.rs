//! User repository for database operations

use chrono::Utc;

use crate::db::connection::DatabasePool;
use crate::db::models::user::DEFAULT_SETTINGS;
use crate::db::models::User;

/// Optional profile fields for [`UserRepository::update_profile`].
/// `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub username: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
    pub password_hash: Option<String>,
    pub settings: Option<String>,
}

impl ProfileUpdate {
    /// Check if any fields are being updated
    pub fn has_updates(&self) -> bool {
        self.username.is_some()
            || self.email.is_some()
            || self.avatar.is_some()
            || self.password_hash.is_some()
            || self.settings.is_some()
    }
}

/// User repository for managing user database operations
pub struct UserRepository;

impl UserRepository {
    /// Create a new user with a hashed password
    ///
    /// # Arguments
    /// * `pool` - Database connection pool
    /// * `username` - Unique login name
    /// * `email` - Unique email address
    /// * `password_hash` - bcrypt hash of the password
    ///
    /// # Returns
    /// Created user or database error
    pub async fn create(
        pool: &DatabasePool,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, sqlx::Error> {
        let now = Utc::now().to_rfc3339();
        sqlx::query_as::<_, User>(
            "INSERT INTO users (username, email, password, settings, created_at, last_login)
             VALUES (?, ?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .bind(DEFAULT_SETTINGS)
        .bind(&now)
        .bind(&now)
        .fetch_one(pool)
        .await
    }

    /// Get a user by id regardless of active flag
    pub async fn get_by_id(pool: &DatabasePool, id: i64) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Get an active user by id (used by the auth extractor)
    pub async fn get_active_by_id(
        pool: &DatabasePool,
        id: i64,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ? AND is_active = 1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an active user by login identity (username or email)
    pub async fn find_by_identity(
        pool: &DatabasePool,
        identity: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "SELECT * FROM users WHERE (username = ? OR email = ?) AND is_active = 1",
        )
        .bind(identity)
        .bind(identity)
        .fetch_optional(pool)
        .await
    }

    /// Find a user by exact username
    pub async fn find_by_username(
        pool: &DatabasePool,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    /// Check whether a username or email is already taken by another user
    ///
    /// # Arguments
    /// * `exclude_id` - User id allowed to hold the values (the updater)
    pub async fn identity_taken(
        pool: &DatabasePool,
        exclude_id: i64,
        username: Option<&str>,
        email: Option<&str>,
    ) -> Result<bool, sqlx::Error> {
        if username.is_none() && email.is_none() {
            return Ok(false);
        }

        let existing = sqlx::query_as::<_, User>(
            "SELECT * FROM users
             WHERE id != ? AND (username = COALESCE(?, '') OR email = COALESCE(?, ''))",
        )
        .bind(exclude_id)
        .bind(username)
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(existing.is_some())
    }

    /// Apply a partial profile update; `None` fields keep their value
    pub async fn update_profile(
        pool: &DatabasePool,
        id: i64,
        update: &ProfileUpdate,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET
                 username = COALESCE(?, username),
                 email = COALESCE(?, email),
                 avatar = COALESCE(?, avatar),
                 password = COALESCE(?, password),
                 settings = COALESCE(?, settings)
             WHERE id = ?
             RETURNING *",
        )
        .bind(update.username.as_deref())
        .bind(update.email.as_deref())
        .bind(update.avatar.as_deref())
        .bind(update.password_hash.as_deref())
        .bind(update.settings.as_deref())
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Stamp the last login time
    pub async fn touch_last_login(pool: &DatabasePool, id: i64) -> Result<(), sqlx::Error> {
        let now = Utc::now().to_rfc3339();
        sqlx::query("UPDATE users SET last_login = ? WHERE id = ?")
            .bind(&now)
            .bind(id)
            .execute(pool)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DatabaseConnection;

    async fn test_pool() -> DatabaseConnection {
        let conn = DatabaseConnection::new("sqlite::memory:").await.unwrap();
        conn.run_migrations().await.unwrap();
        conn
    }

    #[tokio::test]
    async fn test_create_and_find_user() {
        let conn = test_pool().await;
        let user = UserRepository::create(conn.pool(), "alice", "alice@example.com", "hash")
            .await
            .unwrap();

        assert_eq!(user.username, "alice");
        assert!(user.is_active);

        let by_name = UserRepository::find_by_identity(conn.pool(), "alice")
            .await
            .unwrap();
        assert!(by_name.is_some());

        let by_email = UserRepository::find_by_identity(conn.pool(), "alice@example.com")
            .await
            .unwrap();
        assert_eq!(by_email.unwrap().id, user.id);
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let conn = test_pool().await;
        UserRepository::create(conn.pool(), "alice", "a@example.com", "hash")
            .await
            .unwrap();
        let dup = UserRepository::create(conn.pool(), "alice", "b@example.com", "hash").await;
        assert!(dup.is_err());
    }

    #[tokio::test]
    async fn test_identity_taken() {
        let conn = test_pool().await;
        let alice = UserRepository::create(conn.pool(), "alice", "a@example.com", "hash")
            .await
            .unwrap();
        let bob = UserRepository::create(conn.pool(), "bob", "b@example.com", "hash")
            .await
            .unwrap();

        // Bob renaming to "alice" collides; keeping his own name does not.
        assert!(UserRepository::identity_taken(conn.pool(), bob.id, Some("alice"), None)
            .await
            .unwrap());
        assert!(!UserRepository::identity_taken(conn.pool(), bob.id, Some("bob"), None)
            .await
            .unwrap());
        assert!(!UserRepository::identity_taken(conn.pool(), alice.id, Some("alice"), None)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_update_profile_partial() {
        let conn = test_pool().await;
        let user = UserRepository::create(conn.pool(), "alice", "a@example.com", "hash")
            .await
            .unwrap();

        let update = ProfileUpdate {
            avatar: Some("data:image/png;base64,AAAA".to_string()),
            ..ProfileUpdate::default()
        };
        let updated = UserRepository::update_profile(conn.pool(), user.id, &update)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.avatar, "data:image/png;base64,AAAA");
        assert_eq!(updated.username, "alice");
        assert_eq!(updated.password, "hash");
    }

    #[tokio::test]
    async fn test_touch_last_login() {
        let conn = test_pool().await;
        let user = UserRepository::create(conn.pool(), "alice", "a@example.com", "hash")
            .await
            .unwrap();

        UserRepository::touch_last_login(conn.pool(), user.id)
            .await
            .unwrap();
        let reloaded = UserRepository::get_by_id(conn.pool(), user.id)
            .await
            .unwrap()
            .unwrap();
        assert!(reloaded.last_login.is_some());
    }
}
