use chrono::{DateTime, Duration, Utc};
use rusqlite::{Connection, OptionalExtension, Result, params};

use crate::domain::User;

pub fn get_user_by_tlgid(conn: &Connection, tlgid: i64) -> Result<Option<User>> {
  conn
    .prepare(
      r#"
      SELECT id, tlgid, is_onboarded, is_payed, payed_until, created_at, updated_at
      FROM users WHERE tlgid = ?1
      "#,
    )?
    .query_row(params![tlgid], row_to_user)
    .optional()
}

/// Create a user record for a first-time visitor. Onboarding starts unfinished.
pub fn create_user(conn: &Connection, tlgid: i64) -> Result<User> {
  let now = Utc::now();
  conn.execute(
    r#"
    INSERT INTO users (tlgid, is_onboarded, is_payed, payed_until, created_at, updated_at)
    VALUES (?1, 0, 0, NULL, ?2, ?2)
    "#,
    params![tlgid, now.to_rfc3339()],
  )?;
  Ok(User {
    id: conn.last_insert_rowid(),
    tlgid,
    is_onboarded: false,
    is_payed: false,
    payed_until: None,
    created_at: now,
    updated_at: now,
  })
}

/// Mark the user as having finished onboarding. Returns false for an unknown tlgid.
pub fn set_onboarded(conn: &Connection, tlgid: i64) -> Result<bool> {
  let changed = conn.execute(
    "UPDATE users SET is_onboarded = 1, updated_at = ?1 WHERE tlgid = ?2",
    params![Utc::now().to_rfc3339(), tlgid],
  )?;
  Ok(changed > 0)
}

/// Extend the user's paid window by `period_days` and set the entitlement flag.
///
/// The new date is `max(payed_until, now) + period_days`: remaining paid time
/// is never lost, and back-to-back payments accumulate. Returns the new date,
/// or `None` when no user row exists for `tlgid`.
///
/// Callers reach this through the exclusive connection guard, so the
/// read-modify-write cannot interleave with a concurrent payment.
pub fn extend_paid_until(
  conn: &Connection,
  tlgid: i64,
  period_days: i64,
  now: DateTime<Utc>,
) -> Result<Option<DateTime<Utc>>> {
  let current: Option<Option<String>> = conn
    .query_row(
      "SELECT payed_until FROM users WHERE tlgid = ?1",
      params![tlgid],
      |row| row.get(0),
    )
    .optional()?;

  let Some(current) = current else {
    return Ok(None);
  };

  let base = current
    .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
    .map(|dt| dt.with_timezone(&Utc))
    .filter(|dt| *dt > now)
    .unwrap_or(now);
  let new_until = base + Duration::days(period_days);

  conn.execute(
    r#"
    UPDATE users SET is_payed = 1, payed_until = ?1, updated_at = ?2
    WHERE tlgid = ?3
    "#,
    params![new_until.to_rfc3339(), now.to_rfc3339(), tlgid],
  )?;
  Ok(Some(new_until))
}

fn row_to_user(row: &rusqlite::Row) -> Result<User> {
  let payed_until: Option<String> = row.get(4)?;
  let created_at: String = row.get(5)?;
  let updated_at: String = row.get(6)?;

  Ok(User {
    id: row.get(0)?,
    tlgid: row.get(1)?,
    is_onboarded: row.get(2)?,
    is_payed: row.get(3)?,
    payed_until: payed_until
      .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
      .map(|dt| dt.with_timezone(&Utc)),
    created_at: parse_ts(&created_at),
    updated_at: parse_ts(&updated_at),
  })
}

fn parse_ts(s: &str) -> DateTime<Utc> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .unwrap_or_else(|_| Utc::now())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testing::TestEnv;

  #[test]
  fn test_create_and_get_user() {
    let env = TestEnv::new().unwrap();

    assert!(get_user_by_tlgid(&env.conn, 777).unwrap().is_none());

    let user = create_user(&env.conn, 777).unwrap();
    assert!(!user.is_onboarded);
    assert!(!user.is_payed);
    assert!(user.payed_until.is_none());

    let loaded = get_user_by_tlgid(&env.conn, 777).unwrap().unwrap();
    assert_eq!(loaded.tlgid, 777);
    assert!(!loaded.is_onboarded);
  }

  #[test]
  fn test_set_onboarded() {
    let env = TestEnv::new().unwrap();
    create_user(&env.conn, 777).unwrap();

    assert!(set_onboarded(&env.conn, 777).unwrap());
    assert!(get_user_by_tlgid(&env.conn, 777).unwrap().unwrap().is_onboarded);

    // Unknown tlgid is reported, not an error
    assert!(!set_onboarded(&env.conn, 999).unwrap());
  }

  #[test]
  fn test_extend_from_nothing_starts_at_now() {
    let env = TestEnv::new().unwrap();
    create_user(&env.conn, 777).unwrap();

    let now = Utc::now();
    let until = extend_paid_until(&env.conn, 777, 30, now).unwrap().unwrap();
    assert_eq!(until, now + Duration::days(30));

    let user = get_user_by_tlgid(&env.conn, 777).unwrap().unwrap();
    assert!(user.is_payed);
  }

  #[test]
  fn test_extend_accumulates_on_active_window() {
    let env = TestEnv::new().unwrap();
    create_user(&env.conn, 777).unwrap();

    let now = Utc::now();
    extend_paid_until(&env.conn, 777, 30, now).unwrap();
    let until = extend_paid_until(&env.conn, 777, 15, now).unwrap().unwrap();
    assert_eq!(until, now + Duration::days(45));
  }

  #[test]
  fn test_extend_floors_at_now_after_expiry() {
    let env = TestEnv::new().unwrap();
    create_user(&env.conn, 777).unwrap();

    // Expired window: extension restarts from now, not from the stale date
    let past = Utc::now() - Duration::days(100);
    extend_paid_until(&env.conn, 777, 10, past).unwrap();

    let now = Utc::now();
    let until = extend_paid_until(&env.conn, 777, 30, now).unwrap().unwrap();
    assert_eq!(until, now + Duration::days(30));
  }

  #[test]
  fn test_extend_unknown_user() {
    let env = TestEnv::new().unwrap();
    assert!(extend_paid_until(&env.conn, 999, 30, Utc::now()).unwrap().is_none());
  }
}
