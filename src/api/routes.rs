//! API route configuration.

use axum::Router;
use axum::http::{Method, header};
use axum::routing::{delete, get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use super::handlers::{
    self, CategoriesResponse, CategoryQuestionsResponse, CreateQuestionRequest, CreatedResponse,
    DeletedResponse, ErrorResponse, HealthResponse, QuestionPageResponse, QuestionResponse,
    QuizCategoryRequest, QuizRequest, QuizResponse, SearchRequest, SearchResponse,
};
use super::state::AppState;
use crate::db::Database;

/// Build routes with generic database type.
///
/// This macro reduces boilerplate when registering handlers that are generic
/// over the Database trait. It applies the turbofish operator automatically.
macro_rules! routes {
    ($D:ty => {
        $($method:ident $path:literal => $($handler:ident)::+),* $(,)?
    }) => {{
        let router = Router::new();
        $(
            let router = router.route($path, $method($($handler)::+::<$D>));
        )*
        router
    }};
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Trivia API",
        version = "0.1.0",
        description = "Trivia question bank and quiz API",
        license(name = "GPL-2.0")
    ),
    paths(
        handlers::health,
        handlers::list_categories,
        handlers::questions_by_category,
        handlers::list_questions,
        handlers::create_question,
        handlers::delete_question,
        handlers::search_questions,
        handlers::select_quiz_question,
    ),
    components(
        schemas(
            HealthResponse,
            CategoriesResponse,
            CategoryQuestionsResponse,
            QuestionResponse,
            QuestionPageResponse,
            CreateQuestionRequest,
            CreatedResponse,
            DeletedResponse,
            SearchRequest,
            SearchResponse,
            QuizCategoryRequest,
            QuizRequest,
            QuizResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "system", description = "System health and status endpoints"),
        (name = "categories", description = "Category listing endpoints"),
        (name = "questions", description = "Question bank endpoints"),
        (name = "quizzes", description = "Quiz play endpoints")
    )
)]
pub struct ApiDoc;

/// CORS policy: any origin, the methods and headers browser clients use.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_methods([
            Method::GET,
            Method::PUT,
            Method::POST,
            Method::DELETE,
            Method::OPTIONS,
        ])
}

/// Create the API router.
///
/// The OpenAPI viewer is mounted at `/docs` only when `enable_docs` is set.
pub fn create_router<D: Database>(state: AppState<D>, enable_docs: bool) -> Router {
    // System routes (non-generic)
    let system_routes = Router::new().route("/health", get(handlers::health));

    // Category routes (generic over Database)
    let category_routes = routes!(D => {
        get "/categories" => handlers::list_categories,
        get "/categories/{id}/questions" => handlers::questions_by_category,
    });

    // Question routes (generic over Database)
    let question_routes = routes!(D => {
        get "/questions" => handlers::list_questions,
        post "/questions" => handlers::create_question,
        delete "/questions/{id}" => handlers::delete_question,
        post "/questions/search" => handlers::search_questions,
    });

    let quiz_routes = routes!(D => {
        post "/quizzes" => handlers::select_quiz_question,
    });

    let mut router = system_routes
        .merge(category_routes)
        .merge(question_routes)
        .merge(quiz_routes);

    if enable_docs {
        router = router.merge(Scalar::with_url("/docs", ApiDoc::openapi()));
    }

    router
        .fallback(handlers::not_found)
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .with_state(state)
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}
