//! Integration tests for Question API endpoints.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::api::{AppState, routes};
use crate::db::{Database, NewQuestion, QuestionRepository, SqliteDatabase};

/// Create a test app over an in-memory database holding the given questions
async fn test_app(questions: &[(&str, &str, i64)]) -> axum::Router {
    let db = SqliteDatabase::in_memory().await.unwrap();
    db.migrate().await.unwrap();
    for (question, answer, category) in questions {
        db.questions()
            .create(&NewQuestion {
                question: question.to_string(),
                answer: answer.to_string(),
                category: *category,
                difficulty: 1,
            })
            .await
            .unwrap();
    }
    routes::create_router(AppState::new(db, 10), false)
}

/// Helper to parse JSON response body
async fn json_body(response: axum::response::Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn twelve_question_app() -> axum::Router {
    let questions: Vec<(String, String, i64)> = (1..=12)
        .map(|i| (format!("Question number {}?", i), format!("{}", i), 1))
        .collect();
    let refs: Vec<(&str, &str, i64)> = questions
        .iter()
        .map(|(q, a, c)| (q.as_str(), a.as_str(), *c))
        .collect();
    test_app(&refs).await
}

// =============================================================================
// GET /questions - List Questions
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn list_questions_small_store_fits_first_page() {
    let app = test_app(&[
        ("What is the capital of France?", "Paris", 3),
        ("What is 2+2?", "4", 1),
    ])
    .await;

    let response = app.oneshot(get("/questions?page=1&per_page=10")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["questions"].as_array().unwrap().len(), 2);
    assert_eq!(body["total_questions"], 2);
    assert_eq!(body["categories"]["3"], "Geography");
}

#[tokio::test(flavor = "multi_thread")]
async fn list_questions_defaults_to_ten_per_page() {
    let app = twelve_question_app().await;

    let response = app.oneshot(get("/questions")).await.unwrap();
    let body = json_body(response).await;

    let questions = body["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 10);
    assert_eq!(questions[0]["id"], 1);
    assert_eq!(body["total_questions"], 12);
}

#[tokio::test(flavor = "multi_thread")]
async fn list_questions_second_page() {
    let app = twelve_question_app().await;

    let response = app.oneshot(get("/questions?page=2")).await.unwrap();
    let body = json_body(response).await;

    let ids: Vec<i64> = body["questions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![11, 12]);
}

#[tokio::test(flavor = "multi_thread")]
async fn list_questions_past_last_page_is_empty() {
    let app = test_app(&[("What is 2+2?", "4", 1)]).await;

    let response = app.oneshot(get("/questions?page=1000")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(
        body,
        json!({
            "success": true,
            "questions": [],
            "total_questions": 0,
            "categories": {}
        })
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn list_questions_honours_configured_page_size() {
    let db = SqliteDatabase::in_memory().await.unwrap();
    db.migrate().await.unwrap();
    for i in 0..5 {
        db.questions()
            .create(&NewQuestion {
                question: format!("Q{}?", i),
                answer: "x".to_string(),
                category: 2,
                difficulty: 3,
            })
            .await
            .unwrap();
    }
    let app = routes::create_router(AppState::new(db, 2), false);

    let body = json_body(app.oneshot(get("/questions")).await.unwrap()).await;
    assert_eq!(body["questions"].as_array().unwrap().len(), 2);
    assert_eq!(body["total_questions"], 5);
}

#[tokio::test(flavor = "multi_thread")]
async fn list_questions_rejects_invalid_page_parameters() {
    let app = test_app(&[("What is 2+2?", "4", 1)]).await;

    for uri in [
        "/questions?page=0",
        "/questions?per_page=0",
        "/questions?page=abc",
        "/questions?page=-1",
    ] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", uri);

        let body = json_body(response).await;
        assert_eq!(
            body,
            json!({"success": false, "error": 400, "message": "Bad Request"})
        );
    }
}

// =============================================================================
// POST /questions - Create Question
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn create_question_returns_new_id() {
    let app = test_app(&[("What is 2+2?", "4", 1)]).await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/questions",
            json!({
                "question": "Which planet is known as the Red Planet?",
                "answer": "Mars",
                "category": 1,
                "difficulty": 2
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({"success": true, "created": 2})
    );

    let body = json_body(app.oneshot(get("/categories/1/questions")).await.unwrap()).await;
    let created = &body["questions"][1];
    assert_eq!(created["answer"], "Mars");
    assert_eq!(created["difficulty"], 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn create_question_accepts_numeric_strings() {
    let app = test_app(&[]).await;

    let response = app
        .oneshot(post_json(
            "/questions",
            json!({
                "question": "Who wrote Hamlet?",
                "answer": "Shakespeare",
                "category": "2",
                "difficulty": "4"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["created"], 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn create_question_with_unknown_category_returns_422() {
    let app = test_app(&[]).await;

    for category in [json!("100"), json!(100), json!("abc")] {
        let response = app
            .clone()
            .oneshot(post_json(
                "/questions",
                json!({
                    "question": "Is this valid?",
                    "answer": "No",
                    "category": category,
                    "difficulty": 1
                }),
            ))
            .await
            .unwrap();

        assert_eq!(
            response.status(),
            StatusCode::UNPROCESSABLE_ENTITY,
            "category {}",
            category
        );
        assert_eq!(
            json_body(response).await,
            json!({"success": false, "error": 422, "message": "Unprocessable Entity"})
        );
    }

    let body = json_body(app.oneshot(get("/questions")).await.unwrap()).await;
    assert_eq!(body["total_questions"], 0, "nothing should be stored");
}

#[tokio::test(flavor = "multi_thread")]
async fn create_question_with_non_scalar_category_returns_422() {
    let app = test_app(&[]).await;

    for category in [json!([1]), json!({"id": 1})] {
        let response = app
            .clone()
            .oneshot(post_json(
                "/questions",
                json!({
                    "question": "Is this valid?",
                    "answer": "No",
                    "category": category,
                    "difficulty": 1
                }),
            ))
            .await
            .unwrap();

        assert_eq!(
            response.status(),
            StatusCode::UNPROCESSABLE_ENTITY,
            "category {}",
            category
        );
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn create_question_with_missing_field_returns_400() {
    let app = test_app(&[]).await;

    let complete = json!({
        "question": "What is 3+3?",
        "answer": "6",
        "category": 1,
        "difficulty": 1
    });

    for field in ["question", "answer", "category", "difficulty"] {
        let mut body = complete.clone();
        body.as_object_mut().unwrap().remove(field);

        let response = app
            .clone()
            .oneshot(post_json("/questions", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "missing {}", field);
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn create_question_with_malformed_body_returns_400() {
    let app = test_app(&[]).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/questions")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(post_json(
            "/questions",
            json!({"question": 5, "answer": "x", "category": 1, "difficulty": 1}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// DELETE /questions/{id}
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn delete_question_twice() {
    let app = test_app(&[("What is 2+2?", "4", 1)]).await;

    let response = app.clone().oneshot(delete("/questions/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({"success": true, "deleted": 1})
    );

    let response = app.oneshot(delete("/questions/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        json_body(response).await,
        json!({"success": false, "error": 404, "message": "Not Found"})
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_question_with_non_numeric_id_returns_404() {
    let app = test_app(&[]).await;

    let response = app.oneshot(delete("/questions/abc")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// POST /questions/search
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn search_questions_is_case_insensitive() {
    let app = test_app(&[
        ("What is the capital of France?", "Paris", 3),
        ("What is 2+2?", "4", 1),
    ])
    .await;

    for term in ["france", "FRANCE"] {
        let response = app
            .clone()
            .oneshot(post_json("/questions/search", json!({"searchTerm": term})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["total_questions"], 1);
        assert_eq!(body["questions"][0]["answer"], "Paris");
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn search_questions_without_matches() {
    let app = test_app(&[("What is 2+2?", "4", 1)]).await;

    let response = app
        .oneshot(post_json(
            "/questions/search",
            json!({"searchTerm": "no results"}),
        ))
        .await
        .unwrap();

    assert_eq!(
        json_body(response).await,
        json!({"success": true, "questions": [], "total_questions": 0})
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn search_questions_without_term_returns_400() {
    let app = test_app(&[]).await;

    let response = app
        .oneshot(post_json("/questions/search", json!({"term": "france"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
