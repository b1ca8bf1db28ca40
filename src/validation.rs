//! Boundary coercion for inbound JSON payloads.
//!
//! The mini-app client and the payment bot both send loosely typed JSON:
//! numeric fields arrive as numbers or as numeric strings depending on the
//! caller. Everything is coerced to strict types here, before any value
//! reaches the store or the reconciler.

use serde_json::Value;

use crate::error::ApiError;

/// Payment notification as delivered by the webhook caller.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentNotice {
  pub tlgid: i64,
  pub sum: f64,
  pub period_days: i64,
}

/// Extract the platform user id from a JSON body.
pub fn require_tlgid(body: &Value) -> Result<i64, ApiError> {
  require_i64(body, "tlgid")
}

/// Parse and validate a webhook payload into a [`PaymentNotice`].
pub fn parse_payment_notice(body: &Value) -> Result<PaymentNotice, ApiError> {
  let tlgid = require_i64(body, "tlgid")?;
  let sum = require_f64(body, "sum")?;
  let period_days = require_i64(body, "payedPeriodInDays")?;

  if period_days < 1 {
    return Err(ApiError::Validation(
      "field 'payedPeriodInDays' must be a positive number of days".to_string(),
    ));
  }

  Ok(PaymentNotice { tlgid, sum, period_days })
}

pub fn require_i64(body: &Value, field: &str) -> Result<i64, ApiError> {
  match body.get(field) {
    Some(Value::Number(n)) => n.as_i64().ok_or_else(|| not_an_integer(field)),
    Some(Value::String(s)) => s.trim().parse::<i64>().map_err(|_| not_an_integer(field)),
    Some(_) => Err(not_an_integer(field)),
    None => Err(missing(field)),
  }
}

pub fn require_f64(body: &Value, field: &str) -> Result<f64, ApiError> {
  match body.get(field) {
    Some(Value::Number(n)) => n.as_f64().ok_or_else(|| not_a_number(field)),
    Some(Value::String(s)) => s.trim().parse::<f64>().map_err(|_| not_a_number(field)),
    Some(_) => Err(not_a_number(field)),
    None => Err(missing(field)),
  }
}

fn missing(field: &str) -> ApiError {
  ApiError::Validation(format!("field '{}' is required", field))
}

fn not_an_integer(field: &str) -> ApiError {
  ApiError::Validation(format!("field '{}' must be an integer", field))
}

fn not_a_number(field: &str) -> ApiError {
  ApiError::Validation(format!("field '{}' must be a number", field))
}
