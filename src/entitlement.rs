//! Entitlement reconciliation: payment events in, paid-until dates out.
//!
//! A payment always lands in the append-only ledger first. The user's paid
//! window then advances by `max(current, now) + period_days`, so remaining
//! paid time is never lost and back-to-back payments accumulate. The
//! entitlement flag is set on any successful payment and is never cleared
//! here on expiry.

use chrono::{DateTime, Utc};
use rusqlite::Connection;

use crate::db;
use crate::error::ApiError;
use crate::validation::PaymentNotice;

/// Display format the payment bot expects in the webhook response.
const PAID_UNTIL_FORMAT: &str = "%d.%m.%Y";

/// Apply one payment notification and return the new paid-until date.
///
/// The ledger row is written before the user lookup: a financial event must
/// not be dropped even when the user record is missing or inconsistent. In
/// that case the caller still gets [`ApiError::NotFound`] and the webhook
/// sender will retry against the (idempotent per delivery) user update.
pub fn apply_payment(conn: &Connection, notice: &PaymentNotice) -> Result<DateTime<Utc>, ApiError> {
  let now = Utc::now();

  db::insert_payment(conn, notice.tlgid, notice.sum, notice.period_days, now)?;

  match db::extend_paid_until(conn, notice.tlgid, notice.period_days, now)? {
    Some(until) => Ok(until),
    None => Err(ApiError::NotFound("User")),
  }
}

/// Format a paid-until instant as `DD.MM.YYYY` for display.
pub fn format_paid_until(until: DateTime<Utc>) -> String {
  until.format(PAID_UNTIL_FORMAT).to_string()
}
