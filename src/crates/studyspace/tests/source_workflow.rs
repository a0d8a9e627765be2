// Tests for the source upload workflow, including the PDF extraction path.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde_json::json;

use studyspace::db::repositories::{NewSource, SourceRepository, UserRepository};
use studyspace::db::DatabaseConnection;
use studyspace::services::extract;

async fn seeded() -> (DatabaseConnection, i64) {
    let conn = DatabaseConnection::new("sqlite::memory:").await.unwrap();
    conn.run_migrations().await.unwrap();
    let user = UserRepository::create(conn.pool(), "alice", "a@example.com", "hash")
        .await
        .unwrap();
    (conn, user.id)
}

#[test]
fn test_pdf_detection_matches_upload_names() {
    assert!(extract::looks_like_pdf("Lecture.pdf", "unknown"));
    assert!(extract::looks_like_pdf("Lecture.PDF", ""));
    assert!(extract::looks_like_pdf("whatever", "pdf"));
    assert!(!extract::looks_like_pdf("notes.md", "md"));
}

#[test]
fn test_failed_extraction_is_recorded_not_dropped() {
    // Valid base64 that is not a PDF: the failure must land in metadata.
    let bogus = BASE64.encode(b"plain text pretending to be a pdf");
    let metadata = extract::enrich_pdf_metadata("Lecture.pdf", &bogus, json!({}));

    let error = metadata
        .get("extraction_error")
        .and_then(|v| v.as_str())
        .expect("extraction_error should be recorded");
    assert!(!error.is_empty());
}

#[test]
fn test_invalid_base64_is_recorded() {
    let metadata = extract::enrich_pdf_metadata("Lecture.pdf", "not/base64!!", json!({}));
    assert!(metadata.get("extraction_error").is_some());
}

#[tokio::test]
async fn test_source_with_extracted_text_prefers_it_for_context() {
    let (conn, user_id) = seeded().await;

    let source = SourceRepository::create(
        conn.pool(),
        user_id,
        &NewSource {
            name: "Lecture.pdf".to_string(),
            content: "bm90IHJlYWwgcGRmIGJ5dGVz".to_string(),
            source_type: "file".to_string(),
            file_type: "pdf".to_string(),
            metadata: json!({"text": "The mitochondria is the powerhouse of the cell."})
                .to_string(),
            tags: "[]".to_string(),
            is_active: true,
        },
    )
    .await
    .unwrap();

    assert_eq!(
        source.usable_text(),
        "The mitochondria is the powerhouse of the cell."
    );
}

#[tokio::test]
async fn test_source_crud_lifecycle() {
    let (conn, user_id) = seeded().await;
    let pool = conn.pool();

    let created = SourceRepository::create(
        pool,
        user_id,
        &NewSource {
            name: "notes.txt".to_string(),
            content: "original".to_string(),
            source_type: "text".to_string(),
            file_type: "txt".to_string(),
            metadata: "{}".to_string(),
            tags: r#"["bio"]"#.to_string(),
            is_active: true,
        },
    )
    .await
    .unwrap();

    let listed = SourceRepository::list_for_user(pool, user_id).await.unwrap();
    assert_eq!(listed.len(), 1);

    let update = studyspace::db::repositories::SourceUpdate {
        is_active: Some(false),
        ..Default::default()
    };
    let updated = SourceRepository::update(pool, user_id, created.id, &update)
        .await
        .unwrap()
        .unwrap();
    assert!(!updated.is_active);

    assert!(SourceRepository::delete_for_user(pool, user_id, created.id)
        .await
        .unwrap());
    let listed = SourceRepository::list_for_user(pool, user_id).await.unwrap();
    assert!(listed.is_empty());
}
