pub mod api_client;
mod commands;
pub mod error;
mod utils;

#[cfg(test)]
mod api_client_test;
#[cfg(test)]
mod utils_test;

use std::io;

use clap::{CommandFactory, Parser, Subcommand};

use crate::cli::commands::question::CreateQuestionRequest;
use crate::cli::error::CliResult;

#[derive(Parser)]
#[command(name = "trivia")]
#[command(author, version, about = "Trivia question bank CLI", long_about = None)]
pub struct Cli {
    /// Override the API URL (default: TRIVIA_API_URL env or http://localhost:5000)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List question categories
    Categories {
        /// Output format (table or json)
        #[arg(long, default_value = "table", value_parser = ["table", "json"])]
        format: String,
    },
    /// Question bank commands
    Questions {
        #[command(subcommand)]
        command: QuestionCommands,
    },
    /// Quiz commands
    Quiz {
        #[command(subcommand)]
        command: QuizCommands,
    },
}

#[derive(Subcommand)]
enum QuestionCommands {
    /// List one page of questions
    List {
        /// Page number (starting at 1)
        #[arg(long)]
        page: Option<u32>,
        /// Questions per page (server default when omitted)
        #[arg(long)]
        per_page: Option<u32>,
        /// Output format (table or json)
        #[arg(long, default_value = "table", value_parser = ["table", "json"])]
        format: String,
    },
    /// Search question text (case-insensitive)
    Search {
        /// Search term
        term: String,
        /// Output format (table or json)
        #[arg(long, default_value = "table", value_parser = ["table", "json"])]
        format: String,
    },
    /// List the questions of a category
    Category {
        /// Category ID
        id: i64,
        /// Output format (table or json)
        #[arg(long, default_value = "table", value_parser = ["table", "json"])]
        format: String,
    },
    /// Add a question
    Create {
        #[arg(long)]
        question: String,
        #[arg(long)]
        answer: String,
        /// Category ID
        #[arg(long)]
        category: i64,
        #[arg(long)]
        difficulty: i64,
    },
    /// Delete a question
    Delete {
        /// Question ID
        id: i64,
    },
}

#[derive(Subcommand)]
enum QuizCommands {
    /// Show the next unseen quiz question
    Next {
        /// Category ID; with --all, the category to leave out
        #[arg(long)]
        category: Option<i64>,
        /// Draw from every category
        #[arg(long)]
        all: bool,
        /// Already asked question IDs (comma-separated)
        #[arg(long)]
        previous: Option<String>,
        /// Output format (table or json)
        #[arg(long, default_value = "table", value_parser = ["table", "json"])]
        format: String,
    },
    /// Play an interactive quiz
    Play {
        /// Category ID (all categories when omitted)
        #[arg(long)]
        category: Option<i64>,
        /// Maximum number of questions
        #[arg(long, default_value = "5")]
        rounds: usize,
    },
}

async fn dispatch(api_client: &api_client::ApiClient, command: Commands) -> CliResult<String> {
    match command {
        Commands::Categories { format } => {
            commands::category::list_categories(api_client, &format).await
        }
        Commands::Questions { command } => match command {
            QuestionCommands::List {
                page,
                per_page,
                format,
            } => commands::question::list_questions(api_client, page, per_page, &format).await,
            QuestionCommands::Search { term, format } => {
                commands::question::search_questions(api_client, &term, &format).await
            }
            QuestionCommands::Category { id, format } => {
                commands::question::questions_by_category(api_client, id, &format).await
            }
            QuestionCommands::Create {
                question,
                answer,
                category,
                difficulty,
            } => {
                let request = CreateQuestionRequest {
                    question,
                    answer,
                    category,
                    difficulty,
                };
                commands::question::create_question(api_client, request).await
            }
            QuestionCommands::Delete { id } => {
                commands::question::delete_question(api_client, id).await
            }
        },
        Commands::Quiz { command } => match command {
            QuizCommands::Next {
                category,
                all,
                previous,
                format,
            } => {
                let previous = utils::parse_id_list(previous.as_deref())?;
                commands::quiz::next_question(api_client, category, all, &previous, &format).await
            }
            QuizCommands::Play { category, rounds } => {
                let stdin = io::stdin();
                let mut input = stdin.lock();
                let mut output = io::stdout();
                commands::quiz::play(api_client, category, rounds, &mut input, &mut output).await
            }
        },
    }
}

pub async fn run() -> miette::Result<()> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        // Show help when no command provided
        Cli::command().print_help().map_err(error::CliError::from)?;
        return Ok(());
    };

    let api_client = api_client::ApiClient::new(cli.api_url);
    let output = dispatch(&api_client, command).await?;
    println!("{}", output);
    Ok(())
}
