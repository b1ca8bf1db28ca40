use axum::{
  Json,
  extract::{Path, State},
};
use serde_json::{Value, json};

use crate::db::{self, try_lock};
use crate::error::AppResult;
use crate::state::AppState;
use crate::validation;

pub async fn get_favorite(
  State(state): State<AppState>,
  Path((tlgid, lesson_id)): Path<(i64, i64)>,
) -> AppResult<Json<Value>> {
  let conn = try_lock(&state.pool)?;
  let is_favorite = db::get_favorite(&conn, tlgid, lesson_id)?;
  Ok(Json(json!({"isFavorite": is_favorite})))
}

pub async fn save_favorite(
  State(state): State<AppState>,
  Json(body): Json<Value>,
) -> AppResult<Json<Value>> {
  let tlgid = validation::require_tlgid(&body)?;
  let lesson_id = validation::require_i64(&body, "lessonId")?;

  let conn = try_lock(&state.pool)?;
  db::set_favorite(&conn, tlgid, lesson_id)?;
  Ok(Json(json!({"status": "ok"})))
}

pub async fn delete_favorite(
  State(state): State<AppState>,
  Path((tlgid, lesson_id)): Path<(i64, i64)>,
) -> AppResult<Json<Value>> {
  let conn = try_lock(&state.pool)?;
  db::clear_favorite(&conn, tlgid, lesson_id)?;
  Ok(Json(json!({"status": "deleted"})))
}

/// Every lesson the user has starred, for the favorites screen.
pub async fn list_favorites(
  State(state): State<AppState>,
  Path(tlgid): Path<i64>,
) -> AppResult<Json<Value>> {
  let conn = try_lock(&state.pool)?;
  let ids = db::list_favorites(&conn, tlgid)?;
  Ok(Json(json!({"favoriteLessonIds": ids})))
}
