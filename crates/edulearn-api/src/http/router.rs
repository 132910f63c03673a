//! Axum router configuration with middleware.
//!
//! Routes live under `/api/`. Each resource path is registered both with and
//! without its trailing slash so `/api/courses` and `/api/courses/` agree.
//! Middleware: CORS, tracing.

use axum::routing::{get, post, put, MethodRouter};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let routes: Vec<(&str, MethodRouter<AppState>)> = vec![
        // Catalog
        (
            "/courses",
            get(handlers::course::list_courses).post(handlers::course::create_course),
        ),
        (
            "/courses/{id}",
            get(handlers::course::get_course)
                .put(handlers::course::update_course)
                .delete(handlers::course::delete_course),
        ),
        ("/lessons", post(handlers::lesson::create_lesson)),
        (
            "/lessons/{id}",
            put(handlers::lesson::update_lesson).delete(handlers::lesson::delete_lesson),
        ),
        // Students
        ("/enroll", post(handlers::enroll::enroll)),
        ("/courses/{id}/students", get(handlers::course::course_students)),
        ("/courses/{id}/progress", get(handlers::course::course_progress)),
        ("/lessons/{id}/complete", post(handlers::lesson::complete_lesson)),
    ];

    let api_routes = routes
        .into_iter()
        .fold(Router::new(), |router, (path, handler)| {
            slashed(router, path, handler)
        });

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Register `handler` at `path` and at `path/`.
fn slashed(
    router: Router<AppState>,
    path: &str,
    handler: MethodRouter<AppState>,
) -> Router<AppState> {
    router
        .route(path, handler.clone())
        .route(&format!("{path}/"), handler)
}

/// GET /health - Simple health check endpoint (no auth required).
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
