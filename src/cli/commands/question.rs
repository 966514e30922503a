use crate::cli::api_client::ApiClient;
use crate::cli::error::CliResult;
use crate::cli::utils::{apply_table_style, truncate_with_ellipsis};
use serde::{Deserialize, Serialize};
use tabled::{Table, Tabled};

#[derive(Debug, Deserialize)]
struct QuestionPageResponse {
    questions: Vec<Question>,
    total_questions: usize,
}

#[derive(Debug, Deserialize)]
struct QuestionsResponse {
    questions: Vec<Question>,
}

#[derive(Debug, Deserialize)]
struct CreatedResponse {
    created: i64,
}

#[derive(Debug, Deserialize)]
struct DeletedResponse {
    deleted: i64,
}

#[derive(Debug, Serialize)]
pub struct CreateQuestionRequest {
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i64,
}

#[derive(Tabled)]
struct QuestionDisplay {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Question")]
    question: String,
    #[tabled(rename = "Answer")]
    answer: String,
    #[tabled(rename = "Category")]
    category: i64,
    #[tabled(rename = "Difficulty")]
    difficulty: i64,
}

impl From<&Question> for QuestionDisplay {
    fn from(q: &Question) -> Self {
        Self {
            id: q.id,
            question: truncate_with_ellipsis(&q.question, 60),
            answer: truncate_with_ellipsis(&q.answer, 30),
            category: q.category,
            difficulty: q.difficulty,
        }
    }
}

/// List one page of questions
pub async fn list_questions(
    api_client: &ApiClient,
    page: Option<u32>,
    per_page: Option<u32>,
    format: &str,
) -> CliResult<String> {
    let mut request = api_client.get("/questions");

    if let Some(p) = page {
        request = request.query(&[("page", p.to_string())]);
    }
    if let Some(n) = per_page {
        request = request.query(&[("per_page", n.to_string())]);
    }

    let response: QuestionPageResponse =
        ApiClient::handle_response(request.send().await?).await?;

    match format {
        "json" => Ok(serde_json::to_string_pretty(&response.questions)?),
        _ if response.questions.is_empty() => Ok(format_table(&response.questions)),
        _ => Ok(format!(
            "{}\n{} question(s) in total",
            format_table(&response.questions),
            response.total_questions
        )),
    }
}

/// Search questions by a case-insensitive substring
pub async fn search_questions(api_client: &ApiClient, term: &str, format: &str) -> CliResult<String> {
    let response = api_client
        .post("/questions/search")
        .json(&serde_json::json!({ "searchTerm": term }))
        .send()
        .await?;

    let body: QuestionsResponse = ApiClient::handle_response(response).await?;

    match format {
        "json" => Ok(serde_json::to_string_pretty(&body.questions)?),
        _ => Ok(format_table(&body.questions)),
    }
}

/// List every question of a category
pub async fn questions_by_category(
    api_client: &ApiClient,
    category_id: i64,
    format: &str,
) -> CliResult<String> {
    let response = api_client
        .get(&format!("/categories/{}/questions", category_id))
        .send()
        .await?;

    let body: QuestionsResponse = ApiClient::handle_response(response).await?;

    match format {
        "json" => Ok(serde_json::to_string_pretty(&body.questions)?),
        _ => Ok(format_table(&body.questions)),
    }
}

fn format_table(questions: &[Question]) -> String {
    if questions.is_empty() {
        return "No questions found.".to_string();
    }

    let rows: Vec<QuestionDisplay> = questions.iter().map(QuestionDisplay::from).collect();
    let mut table = Table::new(rows);
    apply_table_style(&mut table);
    table.to_string()
}

/// Create a new question
pub async fn create_question(
    api_client: &ApiClient,
    request: CreateQuestionRequest,
) -> CliResult<String> {
    let response = api_client.post("/questions").json(&request).send().await?;

    let body: CreatedResponse = ApiClient::handle_response(response).await?;
    Ok(format!("✓ Created question: {}", body.created))
}

/// Delete a question
pub async fn delete_question(api_client: &ApiClient, id: i64) -> CliResult<String> {
    let response = api_client
        .delete(&format!("/questions/{}", id))
        .send()
        .await?;

    let body: DeletedResponse = ApiClient::handle_response(response).await?;
    Ok(format!("✓ Deleted question: {}", body.deleted))
}
