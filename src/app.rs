use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/buckets", get(handlers::get_buckets))
        .route("/api/tags", get(handlers::get_tags))
        .route("/api/classify", get(handlers::classify_score))
        .route("/api/hint", post(handlers::hint))
        .route("/api/hint/cache/clear", post(handlers::clear_hint_cache))
        .route(
            "/api/users/:user/entries",
            get(handlers::list_entries).post(handlers::check_in),
        )
        .route("/api/users/:user/stats", get(handlers::get_stats))
        .route("/api/users/:user/hints", get(handlers::hint_history))
        .with_state(state)
}
