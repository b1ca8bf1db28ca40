use axum::{
  Json,
  extract::{Path, State},
};
use serde_json::{Value, json};

use crate::db::{self, try_lock};
use crate::entitlement::format_paid_until;
use crate::error::{ApiError, AppResult};
use crate::state::AppState;

/// Entitlement check for the mini-app client.
///
/// Returns the stored flag as-is. The flag is not auto-cleared on expiry,
/// so the client is also given the formatted date to decide what to render.
pub async fn get_user(
  State(state): State<AppState>,
  Path(tlgid): Path<i64>,
) -> AppResult<Json<Value>> {
  let conn = try_lock(&state.pool)?;
  let user = db::get_user_by_tlgid(&conn, tlgid)?.ok_or(ApiError::NotFound("User"))?;

  Ok(Json(json!({
    "isPayed": user.is_payed,
    "payedUntil": user.payed_until.map(format_paid_until),
  })))
}
