pub mod catalog;
pub mod favorites;
pub mod payments;
pub mod progress;
pub mod system;
pub mod user;

use axum::{
  Json, Router,
  http::StatusCode,
  routing::{get, post},
};
use serde_json::json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

pub use catalog::{
  create_course, create_course_type, create_lesson, get_lesson, list_course_types, list_courses,
  list_lessons,
};
pub use favorites::{delete_favorite, get_favorite, list_favorites, save_favorite};
pub use payments::payment_webhook;
pub use progress::{course_progress, delete_progress, get_progress, save_progress};
pub use system::{api_root, enter, set_onboarded};
pub use user::get_user;

/// Assemble the full API router. Shared between main and the HTTP tests.
pub fn router(state: AppState) -> Router {
  Router::new()
    .route("/api", get(api_root))
    // catalog
    .route("/api/courseTypes", get(list_course_types).post(create_course_type))
    .route("/api/courses", post(create_course))
    .route("/api/courses/{type_id}", get(list_courses))
    .route("/api/lessons", post(create_lesson))
    .route("/api/lessons/{course_id}", get(list_lessons))
    .route("/api/lesson/{lesson_id}", get(get_lesson))
    // users and entitlement
    .route("/api/enter", post(enter))
    .route("/api/onboarded", post(set_onboarded))
    .route("/api/user/{tlgid}", get(get_user))
    .route("/api/payment/webhook", post(payment_webhook))
    // progress
    .route("/api/progress", post(save_progress))
    .route("/api/progress/{tlgid}/{lesson_id}", get(get_progress).delete(delete_progress))
    .route("/api/progress/{tlgid}/course/{course_id}", get(course_progress))
    // favorites
    .route("/api/favorite", post(save_favorite))
    .route("/api/favorite/{tlgid}/{lesson_id}", get(get_favorite).delete(delete_favorite))
    .route("/api/favorites/{tlgid}", get(list_favorites))
    .fallback(not_found)
    // The mini-app is served from the platform's origin, not ours
    .layer(CorsLayer::permissive())
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
  (
    StatusCode::NOT_FOUND,
    Json(json!({"status": "error", "message": "Route not found"})),
  )
}
