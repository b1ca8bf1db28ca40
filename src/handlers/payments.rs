use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::db::try_lock;
use crate::entitlement::{apply_payment, format_paid_until};
use crate::error::AppResult;
use crate::state::AppState;
use crate::validation;

/// Payment webhook intake.
///
/// The payment bot expects a 2xx with the new paid-until date and retries
/// on anything else, so validation failures and missing users must come
/// back as real error statuses, never swallowed.
pub async fn payment_webhook(
  State(state): State<AppState>,
  Json(body): Json<Value>,
) -> AppResult<Json<Value>> {
  let notice = validation::parse_payment_notice(&body)?;

  let conn = try_lock(&state.pool)?;
  let paid_until = apply_payment(&conn, &notice)?;
  drop(conn);

  tracing::info!(
    tlgid = notice.tlgid,
    sum = notice.sum,
    period_days = notice.period_days,
    "Payment applied"
  );

  Ok(Json(json!({
    "status": "ok",
    "payedUntil": format_paid_until(paid_until),
  })))
}
