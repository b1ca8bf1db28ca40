use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, Result, params};

/// Completion flag for one (user, lesson) key. Absence means false.
pub fn get_learned(conn: &Connection, tlgid: i64, lesson_id: i64) -> Result<bool> {
  let flag: Option<bool> = conn
    .query_row(
      "SELECT is_learned FROM user_progress WHERE tlgid = ?1 AND lesson_id = ?2",
      params![tlgid, lesson_id],
      |row| row.get(0),
    )
    .optional()?;
  Ok(flag.unwrap_or(false))
}

/// Mark a lesson learned. One conditional statement, so the at-most-one-row
/// invariant holds even under concurrent set/clear races.
pub fn set_learned(conn: &Connection, tlgid: i64, lesson_id: i64) -> Result<()> {
  conn.execute(
    r#"
    INSERT INTO user_progress (tlgid, lesson_id, is_learned, updated_at)
    VALUES (?1, ?2, 1, ?3)
    ON CONFLICT (tlgid, lesson_id) DO UPDATE SET is_learned = 1, updated_at = ?3
    "#,
    params![tlgid, lesson_id, Utc::now().to_rfc3339()],
  )?;
  Ok(())
}

/// Un-mark a lesson: the row is removed, absence is the canonical "false".
/// Clearing a key with no row is a no-op.
pub fn clear_learned(conn: &Connection, tlgid: i64, lesson_id: i64) -> Result<()> {
  conn.execute(
    "DELETE FROM user_progress WHERE tlgid = ?1 AND lesson_id = ?2",
    params![tlgid, lesson_id],
  )?;
  Ok(())
}

/// Lesson ids within a course that the user has completed.
pub fn learned_lessons_in_course(conn: &Connection, tlgid: i64, course_id: i64) -> Result<Vec<i64>> {
  let mut stmt = conn.prepare(
    r#"
    SELECT p.lesson_id
    FROM user_progress p
    JOIN lessons l ON l.id = p.lesson_id
    WHERE p.tlgid = ?1 AND l.course_id = ?2 AND p.is_learned = 1
    "#,
  )?;

  let ids = stmt
    .query_map(params![tlgid, course_id], |row| row.get(0))?
    .collect::<Result<Vec<_>>>()?;
  Ok(ids)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::db::catalog::{insert_course, insert_course_type, insert_lesson};
  use crate::domain::AccessTier;
  use crate::testing::TestEnv;

  #[test]
  fn test_absent_key_reads_false() {
    let env = TestEnv::new().unwrap();
    assert!(!get_learned(&env.conn, 1, 1).unwrap());
  }

  #[test]
  fn test_set_is_idempotent() {
    let env = TestEnv::new().unwrap();

    set_learned(&env.conn, 1, 10).unwrap();
    set_learned(&env.conn, 1, 10).unwrap();

    assert!(get_learned(&env.conn, 1, 10).unwrap());
    let rows: i64 = env
      .conn
      .query_row(
        "SELECT COUNT(*) FROM user_progress WHERE tlgid = 1 AND lesson_id = 10",
        [],
        |row| row.get(0),
      )
      .unwrap();
    assert_eq!(rows, 1);
  }

  #[test]
  fn test_clear_removes_row_and_tolerates_absence() {
    let env = TestEnv::new().unwrap();

    set_learned(&env.conn, 1, 10).unwrap();
    clear_learned(&env.conn, 1, 10).unwrap();
    assert!(!get_learned(&env.conn, 1, 10).unwrap());

    // no row, still fine
    clear_learned(&env.conn, 1, 10).unwrap();
  }

  #[test]
  fn test_learned_lessons_in_course() {
    let env = TestEnv::new().unwrap();

    let tid = insert_course_type(&env.conn, "Basics", None, None, 1).unwrap();
    let cid = insert_course(&env.conn, tid, "Starter", None, None, AccessTier::Free, 1).unwrap();
    let other = insert_course(&env.conn, tid, "Other", None, None, AccessTier::Free, 2).unwrap();
    let l1 = insert_lesson(&env.conn, cid, "One", None, None, None, 1, AccessTier::Free).unwrap();
    let l2 = insert_lesson(&env.conn, cid, "Two", None, None, None, 2, AccessTier::Free).unwrap();
    let l3 = insert_lesson(&env.conn, other, "Elsewhere", None, None, None, 1, AccessTier::Free).unwrap();

    set_learned(&env.conn, 1, l1).unwrap();
    set_learned(&env.conn, 1, l3).unwrap();
    set_learned(&env.conn, 2, l2).unwrap();

    let mut ids = learned_lessons_in_course(&env.conn, 1, cid).unwrap();
    ids.sort();
    assert_eq!(ids, vec![l1]);
  }
}
