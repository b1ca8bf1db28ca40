use axum::{
  Json,
  extract::{Path, State},
};
use serde_json::{Value, json};

use crate::db::{self, try_lock};
use crate::error::AppResult;
use crate::state::AppState;
use crate::validation;

pub async fn get_progress(
  State(state): State<AppState>,
  Path((tlgid, lesson_id)): Path<(i64, i64)>,
) -> AppResult<Json<Value>> {
  let conn = try_lock(&state.pool)?;
  let is_learned = db::get_learned(&conn, tlgid, lesson_id)?;
  Ok(Json(json!({"isLearned": is_learned})))
}

pub async fn save_progress(
  State(state): State<AppState>,
  Json(body): Json<Value>,
) -> AppResult<Json<Value>> {
  let tlgid = validation::require_tlgid(&body)?;
  let lesson_id = validation::require_i64(&body, "lessonId")?;

  let conn = try_lock(&state.pool)?;
  db::set_learned(&conn, tlgid, lesson_id)?;
  Ok(Json(json!({"status": "ok"})))
}

pub async fn delete_progress(
  State(state): State<AppState>,
  Path((tlgid, lesson_id)): Path<(i64, i64)>,
) -> AppResult<Json<Value>> {
  let conn = try_lock(&state.pool)?;
  db::clear_learned(&conn, tlgid, lesson_id)?;
  Ok(Json(json!({"status": "deleted"})))
}

/// Completed lessons of one course, for the course overview screen.
pub async fn course_progress(
  State(state): State<AppState>,
  Path((tlgid, course_id)): Path<(i64, i64)>,
) -> AppResult<Json<Value>> {
  let conn = try_lock(&state.pool)?;
  let ids = db::learned_lessons_in_course(&conn, tlgid, course_id)?;
  Ok(Json(json!({"learnedLessonIds": ids})))
}
