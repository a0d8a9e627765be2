// Tests for the auth service: hashing, tokens, and the register/login flow.

use studyspace::db::repositories::UserRepository;
use studyspace::db::DatabaseConnection;
use studyspace::services::auth::{hash_password, verify_password, JwtManager};

const SECRET: &str = "integration-test-secret-32-chars-min";

async fn test_db() -> DatabaseConnection {
    let conn = DatabaseConnection::new("sqlite::memory:").await.unwrap();
    conn.run_migrations().await.unwrap();
    conn
}

#[test]
fn test_password_hash_round_trip() {
    let hash = hash_password("correct horse battery").unwrap();
    assert!(verify_password("correct horse battery", &hash).unwrap());
    assert!(!verify_password("wrong", &hash).unwrap());
}

#[test]
fn test_hashes_are_salted() {
    let a = hash_password("same password").unwrap();
    let b = hash_password("same password").unwrap();
    assert_ne!(a, b);
}

#[test]
fn test_jwt_round_trip() {
    let jwt = JwtManager::new(SECRET, 7).unwrap();
    let token = jwt.issue_token(1234).unwrap();
    assert_eq!(jwt.validate_token(&token).unwrap(), 1234);
}

#[test]
fn test_jwt_tampered_token_rejected() {
    let jwt = JwtManager::new(SECRET, 7).unwrap();
    let token = jwt.issue_token(1234).unwrap();
    let mut tampered = token.clone();
    tampered.push('x');
    assert!(jwt.validate_token(&tampered).is_err());
}

#[test]
fn test_jwt_manager_rejects_short_secret() {
    assert!(JwtManager::new("short", 7).is_err());
}

#[tokio::test]
async fn test_register_then_login_flow() {
    let conn = test_db().await;
    let pool = conn.pool();

    let hash = hash_password("secret123").unwrap();
    let created = UserRepository::create(pool, "alice", "alice@example.com", &hash)
        .await
        .unwrap();

    // Login by username and by email resolve to the same account.
    let by_username = UserRepository::find_by_identity(pool, "alice")
        .await
        .unwrap()
        .unwrap();
    let by_email = UserRepository::find_by_identity(pool, "alice@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_username.id, created.id);
    assert_eq!(by_email.id, created.id);

    assert!(verify_password("secret123", &by_username.password).unwrap());

    let jwt = JwtManager::new(SECRET, 7).unwrap();
    let token = jwt.issue_token(created.id).unwrap();
    let user_id = jwt.validate_token(&token).unwrap();

    let loaded = UserRepository::get_active_by_id(pool, user_id)
        .await
        .unwrap();
    assert!(loaded.is_some());
}

#[tokio::test]
async fn test_inactive_user_not_loadable() {
    let conn = test_db().await;
    let pool = conn.pool();

    let user = UserRepository::create(pool, "bob", "bob@example.com", "hash")
        .await
        .unwrap();

    sqlx::query("UPDATE users SET is_active = 0 WHERE id = ?")
        .bind(user.id)
        .execute(pool)
        .await
        .unwrap();

    let loaded = UserRepository::get_active_by_id(pool, user.id)
        .await
        .unwrap();
    assert!(loaded.is_none());

    let by_identity = UserRepository::find_by_identity(pool, "bob").await.unwrap();
    assert!(by_identity.is_none());
}
