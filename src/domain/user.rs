use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A mini-app user, keyed by the messaging-platform id (`tlgid`).
///
/// `payed_until` only ever moves forward: payments extend it through
/// [`crate::db::users::extend_paid_until`], never overwrite it backward.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
  pub id: i64,
  pub tlgid: i64,
  pub is_onboarded: bool,
  pub is_payed: bool,
  pub payed_until: Option<DateTime<Utc>>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl User {
  /// True when the entitlement flag is set and the paid window covers `now`.
  ///
  /// The flag itself is never auto-cleared on expiry, so callers that care
  /// about actual access must go through this instead of `is_payed` alone.
  pub fn has_active_access(&self, now: DateTime<Utc>) -> bool {
    self.is_payed && self.payed_until.is_some_and(|until| until >= now)
  }

  /// Flag set but the paid window has lapsed.
  pub fn access_lapsed(&self, now: DateTime<Utc>) -> bool {
    self.is_payed && self.payed_until.is_some_and(|until| until < now)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::Duration;

  fn user(is_payed: bool, payed_until: Option<DateTime<Utc>>) -> User {
    let now = Utc::now();
    User {
      id: 1,
      tlgid: 42,
      is_onboarded: true,
      is_payed,
      payed_until,
      created_at: now,
      updated_at: now,
    }
  }

  #[test]
  fn test_active_access_needs_flag_and_future_date() {
    let now = Utc::now();

    assert!(user(true, Some(now + Duration::days(5))).has_active_access(now));
    assert!(!user(true, Some(now - Duration::days(5))).has_active_access(now));
    assert!(!user(true, None).has_active_access(now));
    assert!(!user(false, Some(now + Duration::days(5))).has_active_access(now));
  }

  #[test]
  fn test_lapsed_is_flag_with_past_date_only() {
    let now = Utc::now();

    assert!(user(true, Some(now - Duration::days(5))).access_lapsed(now));
    assert!(!user(true, Some(now + Duration::days(5))).access_lapsed(now));
    assert!(!user(false, Some(now - Duration::days(5))).access_lapsed(now));
    assert!(!user(true, None).access_lapsed(now));
  }
}
