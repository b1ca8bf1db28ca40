use axum::{Json, extract::State};
use chrono::Utc;
use serde_json::{Value, json};

use crate::db::{self, try_lock};
use crate::error::{ApiError, AppResult};
use crate::state::AppState;
use crate::validation;

pub async fn api_root() -> Json<Value> {
  Json(json!({
    "message": "Welcome to the API",
    "status": "Server is running",
  }))
}

/// User entry point, driving the absent -> onboarding -> active machine.
///
/// An unknown tlgid gets a fresh user record and the onboarding screen; a
/// known user who never finished onboarding gets the onboarding screen
/// again; everyone else goes to the index page.
pub async fn enter(State(state): State<AppState>, Json(body): Json<Value>) -> AppResult<Json<Value>> {
  let tlgid = validation::require_tlgid(&body)?;

  let conn = try_lock(&state.pool)?;
  let user = match db::get_user_by_tlgid(&conn, tlgid)? {
    Some(user) => user,
    None => {
      db::create_user(&conn, tlgid)?;
      tracing::info!(tlgid, "New user created, showing onboarding");
      return Ok(Json(json!({"userData": {"result": "showOnboarding"}})));
    }
  };
  drop(conn);

  if !user.is_onboarded {
    tracing::info!(tlgid, "Returning user has not finished onboarding");
    return Ok(Json(json!({"userData": {"result": "showOnboarding"}})));
  }

  // Lapsed subscription: nudge via the bot, without holding up this request
  if user.access_lapsed(Utc::now()) {
    state.notifier.spawn_payment_reminder(tlgid);
  }

  Ok(Json(json!({
    "userData": {
      "result": "showIndexPage",
      "tlgid": user.tlgid,
      "isOnboarded": user.is_onboarded,
      "isPayed": user.is_payed,
      "payedUntil": user.payed_until.map(crate::entitlement::format_paid_until),
    }
  })))
}

/// Flip the onboarding flag once the client reports the flow as finished.
pub async fn set_onboarded(
  State(state): State<AppState>,
  Json(body): Json<Value>,
) -> AppResult<Json<Value>> {
  let tlgid = validation::require_tlgid(&body)?;

  let conn = try_lock(&state.pool)?;
  if !db::set_onboarded(&conn, tlgid)? {
    return Err(ApiError::NotFound("User"));
  }

  Ok(Json(json!({"status": "ok"})))
}
