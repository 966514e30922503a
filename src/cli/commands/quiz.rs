use std::io::{BufRead, Write};

use crate::cli::api_client::ApiClient;
use crate::cli::commands::category::fetch_categories;
use crate::cli::commands::question::Question;
use crate::cli::error::CliResult;
use crate::cli::utils::{answers_match, apply_table_style};
use serde::{Deserialize, Serialize};
use tabled::builder::Builder;

/// Category type the server treats as "every category but the given id"
const ALL: &str = "ALL";

#[derive(Debug, Clone, Serialize)]
pub struct QuizCategory {
    pub id: i64,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

#[derive(Debug, Serialize)]
struct QuizRequest<'a> {
    quiz_category: &'a QuizCategory,
    previous_questions: &'a [i64],
}

#[derive(Debug, Deserialize)]
struct QuizResponse {
    question: Option<Question>,
}

/// Build the quiz category sent to the server.
///
/// Without a category, or with `all`, the quiz spans every category; `id`
/// then names a category to leave out (0 leaves none out). A specific
/// category is sent with its type looked up from the server.
pub async fn resolve_category(
    api_client: &ApiClient,
    category: Option<i64>,
    all: bool,
) -> CliResult<QuizCategory> {
    match category {
        Some(id) if !all => {
            let categories = fetch_categories(api_client).await?;
            Ok(QuizCategory {
                id,
                kind: categories.get(&id).cloned(),
            })
        }
        _ => Ok(QuizCategory {
            id: category.unwrap_or(0),
            kind: Some(ALL.to_string()),
        }),
    }
}

/// Ask the server for a question not in `previous`
pub async fn fetch_next(
    api_client: &ApiClient,
    category: &QuizCategory,
    previous: &[i64],
) -> CliResult<Option<Question>> {
    let response = api_client
        .post("/quizzes")
        .json(&QuizRequest {
            quiz_category: category,
            previous_questions: previous,
        })
        .send()
        .await?;

    let body: QuizResponse = ApiClient::handle_response(response).await?;
    Ok(body.question)
}

/// Show the next quiz question
pub async fn next_question(
    api_client: &ApiClient,
    category: Option<i64>,
    all: bool,
    previous: &[i64],
    format: &str,
) -> CliResult<String> {
    let quiz_category = resolve_category(api_client, category, all).await?;
    let question = fetch_next(api_client, &quiz_category, previous).await?;

    match (format, question) {
        ("json", question) => Ok(serde_json::to_string_pretty(&question)?),
        (_, None) => Ok("No more questions.".to_string()),
        (_, Some(question)) => Ok(format_question_detail(&question)),
    }
}

fn format_question_detail(question: &Question) -> String {
    let mut builder = Builder::default();

    builder.push_record(["Question ID", &question.id.to_string()]);
    builder.push_record(["Question", &question.question]);
    builder.push_record(["Answer", &question.answer]);
    builder.push_record(["Category", &question.category.to_string()]);
    builder.push_record(["Difficulty", &question.difficulty.to_string()]);

    let mut table = builder.build();
    apply_table_style(&mut table);
    table.to_string()
}

/// Play an interactive quiz of up to `rounds` questions.
///
/// Reads one answer per line from `input`; end of input ends the game.
/// Returns the final score line.
pub async fn play<R: BufRead, W: Write>(
    api_client: &ApiClient,
    category: Option<i64>,
    rounds: usize,
    input: &mut R,
    output: &mut W,
) -> CliResult<String> {
    let quiz_category = resolve_category(api_client, category, false).await?;
    let mut previous: Vec<i64> = Vec::new();
    let mut score = 0;

    while previous.len() < rounds {
        let Some(question) = fetch_next(api_client, &quiz_category, &previous).await? else {
            writeln!(output, "No more questions.")?;
            break;
        };

        writeln!(output, "Question {}: {}", previous.len() + 1, question.question)?;
        write!(output, "> ")?;
        output.flush()?;

        let mut answer = String::new();
        if input.read_line(&mut answer)? == 0 {
            writeln!(output)?;
            break;
        }
        previous.push(question.id);

        if answers_match(&answer, &question.answer) {
            score += 1;
            writeln!(output, "✓ Correct!")?;
        } else {
            writeln!(output, "✗ The answer was: {}", question.answer)?;
        }
    }

    Ok(format!("Score: {}/{}", score, previous.len()))
}
