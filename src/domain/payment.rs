use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of the append-only payment ledger.
///
/// This is the audit trail for entitlement reconciliation: rows are inserted
/// once per webhook call and never updated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentEvent {
  pub id: i64,
  pub tlgid: i64,
  pub sum: f64,
  pub payed_period_days: i64,
  pub payment_date: DateTime<Utc>,
}
