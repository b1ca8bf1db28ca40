use axum::{
  Json,
  extract::{Path, State},
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::db::{self, try_lock};
use crate::domain::{AccessTier, Course, CourseType, Lesson};
use crate::error::{ApiError, AppResult};
use crate::state::AppState;

pub async fn list_course_types(State(state): State<AppState>) -> AppResult<Json<Vec<CourseType>>> {
  let conn = try_lock(&state.pool)?;
  Ok(Json(db::list_course_types(&conn)?))
}

pub async fn list_courses(
  State(state): State<AppState>,
  Path(type_id): Path<i64>,
) -> AppResult<Json<Vec<Course>>> {
  let conn = try_lock(&state.pool)?;
  Ok(Json(db::list_courses_by_type(&conn, type_id)?))
}

pub async fn list_lessons(
  State(state): State<AppState>,
  Path(course_id): Path<i64>,
) -> AppResult<Json<Vec<Lesson>>> {
  let conn = try_lock(&state.pool)?;
  Ok(Json(db::list_lessons_by_course(&conn, course_id)?))
}

pub async fn get_lesson(
  State(state): State<AppState>,
  Path(lesson_id): Path<i64>,
) -> AppResult<Json<Lesson>> {
  let conn = try_lock(&state.pool)?;
  let lesson = db::get_lesson_by_id(&conn, lesson_id)?.ok_or(ApiError::NotFound("Lesson"))?;
  Ok(Json(lesson))
}

// Admin seed endpoints. Bodies are typed: this side of the API is driven by
// our own publishing tooling, not the duck-typed mini-app client.

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseType {
  pub name: String,
  pub description: Option<String>,
  pub color: Option<String>,
  #[serde(default)]
  pub order_number: i64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourse {
  pub type_id: i64,
  pub name: String,
  pub short_description: Option<String>,
  pub long_description: Option<String>,
  #[serde(default = "default_access")]
  pub access: AccessTier,
  #[serde(default)]
  pub order_number: i64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLesson {
  pub course_id: i64,
  pub name: String,
  pub short_description: Option<String>,
  pub long_description: Option<String>,
  pub url_to_file: Option<String>,
  #[serde(default)]
  pub order_number: i64,
  #[serde(default = "default_access")]
  pub access: AccessTier,
}

fn default_access() -> AccessTier {
  AccessTier::Payment
}

pub async fn create_course_type(
  State(state): State<AppState>,
  Json(body): Json<CreateCourseType>,
) -> AppResult<Json<Value>> {
  let conn = try_lock(&state.pool)?;
  let id = db::insert_course_type(
    &conn,
    &body.name,
    body.description.as_deref(),
    body.color.as_deref(),
    body.order_number,
  )?;
  Ok(Json(json!({"status": "done", "id": id})))
}

pub async fn create_course(
  State(state): State<AppState>,
  Json(body): Json<CreateCourse>,
) -> AppResult<Json<Value>> {
  let conn = try_lock(&state.pool)?;
  let id = db::insert_course(
    &conn,
    body.type_id,
    &body.name,
    body.short_description.as_deref(),
    body.long_description.as_deref(),
    body.access,
    body.order_number,
  )?;
  Ok(Json(json!({"status": "done", "id": id})))
}

pub async fn create_lesson(
  State(state): State<AppState>,
  Json(body): Json<CreateLesson>,
) -> AppResult<Json<Value>> {
  let conn = try_lock(&state.pool)?;
  let id = db::insert_lesson(
    &conn,
    body.course_id,
    &body.name,
    body.short_description.as_deref(),
    body.long_description.as_deref(),
    body.url_to_file.as_deref(),
    body.order_number,
    body.access,
  )?;
  Ok(Json(json!({"status": "done", "id": id})))
}
