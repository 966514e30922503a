pub mod category;
pub mod question;
pub mod quiz;

#[cfg(test)]
#[path = "category_test.rs"]
mod category_test;



#[cfg(test)]
pub(crate) mod test_server {
    use crate::api::{AppState, routes};
    use crate::db::{Database, NewQuestion, QuestionRepository, SqliteDatabase};
    use tokio::net::TcpListener;

    /// Spawn a test HTTP server over an in-memory database holding `questions`
    pub async fn spawn_test_server(
        questions: &[(&str, &str, i64)],
    ) -> (String, tokio::task::JoinHandle<()>) {
        let db = SqliteDatabase::in_memory()
            .await
            .expect("Failed to create test database");
        db.migrate().await.expect("Failed to run migrations");
        for (question, answer, category) in questions {
            db.questions()
                .create(&NewQuestion {
                    question: question.to_string(),
                    answer: answer.to_string(),
                    category: *category,
                    difficulty: 1,
                })
                .await
                .expect("Failed to seed question");
        }
        let app = routes::create_router(AppState::new(db, 10), false);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (url, handle)
    }
}
