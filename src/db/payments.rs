use chrono::{DateTime, Utc};
use rusqlite::{Connection, Result, params};

use crate::domain::PaymentEvent;

/// Append one payment event. The ledger is insert-only: no update or delete
/// functions exist for this table.
pub fn insert_payment(
  conn: &Connection,
  tlgid: i64,
  sum: f64,
  payed_period_days: i64,
  payment_date: DateTime<Utc>,
) -> Result<i64> {
  conn.execute(
    r#"
    INSERT INTO payments (tlgid, sum, payed_period_days, payment_date)
    VALUES (?1, ?2, ?3, ?4)
    "#,
    params![tlgid, sum, payed_period_days, payment_date.to_rfc3339()],
  )?;
  Ok(conn.last_insert_rowid())
}

pub fn list_payments_for_user(conn: &Connection, tlgid: i64) -> Result<Vec<PaymentEvent>> {
  let mut stmt = conn.prepare(
    r#"
    SELECT id, tlgid, sum, payed_period_days, payment_date
    FROM payments
    WHERE tlgid = ?1
    ORDER BY payment_date ASC
    "#,
  )?;

  let events = stmt
    .query_map(params![tlgid], |row| {
      let payment_date: String = row.get(4)?;
      Ok(PaymentEvent {
        id: row.get(0)?,
        tlgid: row.get(1)?,
        sum: row.get(2)?,
        payed_period_days: row.get(3)?,
        payment_date: DateTime::parse_from_rfc3339(&payment_date)
          .map(|dt| dt.with_timezone(&Utc))
          .unwrap_or_else(|_| Utc::now()),
      })
    })?
    .collect::<Result<Vec<_>>>()?;
  Ok(events)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testing::TestEnv;

  #[test]
  fn test_ledger_appends() {
    let env = TestEnv::new().unwrap();

    let now = Utc::now();
    insert_payment(&env.conn, 42, 500.0, 30, now).unwrap();
    insert_payment(&env.conn, 42, 250.0, 15, now).unwrap();
    insert_payment(&env.conn, 7, 100.0, 7, now).unwrap();

    let events = list_payments_for_user(&env.conn, 42).unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].sum, 500.0);
    assert_eq!(events[0].payed_period_days, 30);
    assert_eq!(events[1].payed_period_days, 15);
  }
}
