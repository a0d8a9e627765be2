// Tests for the generation pipeline, driven with canned model payloads so
// no provider call is needed: parse/normalize, shuffle, and persistence.
//
// Covers the end-to-end shape: a PDF source with extracted text plus a
// 10-question quiz response becomes a quiz note with 4 options per
// question and an in-range correct index.

use serde_json::json;

use studio::prompts::GenerationOptions;
use studio::{MaterialPayload, QuizData, StudyMaterialType};
use studyspace::db::repositories::{NewSource, SourceRepository, UserRepository};
use studyspace::db::DatabaseConnection;
use studyspace::services::generation::{finalize_structured, persist_material};

async fn seeded() -> (DatabaseConnection, i64) {
    let conn = DatabaseConnection::new("sqlite::memory:").await.unwrap();
    conn.run_migrations().await.unwrap();
    let user = UserRepository::create(conn.pool(), "alice", "a@example.com", "hash")
        .await
        .unwrap();
    (conn, user.id)
}

fn canned_quiz_response(question_count: usize) -> String {
    let questions: Vec<serde_json::Value> = (0..question_count)
        .map(|i| {
            json!({
                "question": format!("Question {}?", i + 1),
                "options": ["alpha", "beta", "gamma", "delta"],
                "correctAnswerIndex": i % 4,
                "explanation": "because"
            })
        })
        .collect();
    json!({ "title": "Lecture quiz", "questions": questions }).to_string()
}

#[tokio::test]
async fn test_pdf_source_to_ten_question_quiz_note() {
    let (conn, user_id) = seeded().await;
    let pool = conn.pool();

    let source = SourceRepository::create(
        pool,
        user_id,
        &NewSource {
            name: "Lecture.pdf".to_string(),
            content: "ZmFrZSBwZGYgcGF5bG9hZA==".to_string(),
            source_type: "file".to_string(),
            file_type: "pdf".to_string(),
            metadata: json!({"text": "Cells divide by mitosis."}).to_string(),
            tags: "[]".to_string(),
            is_active: true,
        },
    )
    .await
    .unwrap();

    // The model response for a standard (10-question) quiz request.
    let payload = finalize_structured(
        StudyMaterialType::Quiz,
        &GenerationOptions::default(),
        &canned_quiz_response(10),
    )
    .unwrap();

    let note = persist_material(pool, user_id, &payload, vec![source.id])
        .await
        .unwrap();

    assert_eq!(note.note_type, "quiz");
    assert_eq!(note.source_count, 1);

    let quiz: QuizData = serde_json::from_str(note.quiz_data.as_deref().unwrap()).unwrap();
    assert_eq!(quiz.questions.len(), 10);
    for question in &quiz.questions {
        assert_eq!(question.options.len(), 4);
        assert!(question.correct_answer_index < 4);
    }
}

#[tokio::test]
async fn test_shuffled_quiz_keeps_correct_answer_text() {
    let (conn, user_id) = seeded().await;

    let raw = json!({
        "title": "Single",
        "questions": [{
            "question": "Pick gamma",
            "options": ["alpha", "beta", "gamma", "delta"],
            "correctAnswerIndex": 2,
            "explanation": ""
        }]
    })
    .to_string();

    let payload =
        finalize_structured(StudyMaterialType::Quiz, &GenerationOptions::default(), &raw).unwrap();
    let note = persist_material(conn.pool(), user_id, &payload, vec![])
        .await
        .unwrap();

    let quiz: QuizData = serde_json::from_str(note.quiz_data.as_deref().unwrap()).unwrap();
    let question = &quiz.questions[0];
    assert_eq!(question.options[question.correct_answer_index], "gamma");
}

#[tokio::test]
async fn test_flashcard_aliases_normalize_before_persisting() {
    let (conn, user_id) = seeded().await;

    let raw = r#"[{"front": "What is ATP?", "back": "Cell energy currency"}]"#;
    let payload = finalize_structured(
        StudyMaterialType::Flashcard,
        &GenerationOptions::default(),
        raw,
    )
    .unwrap();

    let note = persist_material(conn.pool(), user_id, &payload, vec![])
        .await
        .unwrap();

    assert_eq!(note.note_type, "flashcard");
    let deck: studio::FlashcardData =
        serde_json::from_str(note.flashcard_data.as_deref().unwrap()).unwrap();
    assert_eq!(deck.cards[0].question, "What is ATP?");
    assert_eq!(deck.cards[0].answer, "Cell energy currency");
}

#[tokio::test]
async fn test_summary_payload_persists_as_plain_text() {
    let (conn, user_id) = seeded().await;

    let payload = MaterialPayload::Summary("- point one\n- point two".to_string());
    let note = persist_material(conn.pool(), user_id, &payload, vec![1, 2, 3])
        .await
        .unwrap();

    assert_eq!(note.note_type, "summary");
    assert_eq!(note.content, "- point one\n- point two");
    assert_eq!(note.source_count, 3);
    assert!(note.quiz_data.is_none());
    assert!(note.flashcard_data.is_none());
}

#[test]
fn test_unusable_model_response_is_an_error() {
    let result = finalize_structured(
        StudyMaterialType::Quiz,
        &GenerationOptions::default(),
        "I'm sorry, I can't produce JSON today.",
    );
    assert!(result.is_err());
}
