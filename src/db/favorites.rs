use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, Result, params};

/// Favorite flag for one (user, lesson) key. Absence means false.
pub fn get_favorite(conn: &Connection, tlgid: i64, lesson_id: i64) -> Result<bool> {
  let flag: Option<bool> = conn
    .query_row(
      "SELECT is_favorite FROM user_favorites WHERE tlgid = ?1 AND lesson_id = ?2",
      params![tlgid, lesson_id],
      |row| row.get(0),
    )
    .optional()?;
  Ok(flag.unwrap_or(false))
}

/// Same upsert contract as user_progress: exactly one live row per key.
pub fn set_favorite(conn: &Connection, tlgid: i64, lesson_id: i64) -> Result<()> {
  conn.execute(
    r#"
    INSERT INTO user_favorites (tlgid, lesson_id, is_favorite, updated_at)
    VALUES (?1, ?2, 1, ?3)
    ON CONFLICT (tlgid, lesson_id) DO UPDATE SET is_favorite = 1, updated_at = ?3
    "#,
    params![tlgid, lesson_id, Utc::now().to_rfc3339()],
  )?;
  Ok(())
}

pub fn clear_favorite(conn: &Connection, tlgid: i64, lesson_id: i64) -> Result<()> {
  conn.execute(
    "DELETE FROM user_favorites WHERE tlgid = ?1 AND lesson_id = ?2",
    params![tlgid, lesson_id],
  )?;
  Ok(())
}

/// All lesson ids the user has marked favorite.
pub fn list_favorites(conn: &Connection, tlgid: i64) -> Result<Vec<i64>> {
  let mut stmt = conn.prepare(
    "SELECT lesson_id FROM user_favorites WHERE tlgid = ?1 AND is_favorite = 1",
  )?;

  let ids = stmt
    .query_map(params![tlgid], |row| row.get(0))?
    .collect::<Result<Vec<_>>>()?;
  Ok(ids)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testing::TestEnv;

  #[test]
  fn test_favorite_round_trip() {
    let env = TestEnv::new().unwrap();

    assert!(!get_favorite(&env.conn, 1, 5).unwrap());

    set_favorite(&env.conn, 1, 5).unwrap();
    set_favorite(&env.conn, 1, 5).unwrap();
    assert!(get_favorite(&env.conn, 1, 5).unwrap());

    let rows: i64 = env
      .conn
      .query_row("SELECT COUNT(*) FROM user_favorites", [], |row| row.get(0))
      .unwrap();
    assert_eq!(rows, 1);

    clear_favorite(&env.conn, 1, 5).unwrap();
    assert!(!get_favorite(&env.conn, 1, 5).unwrap());
    clear_favorite(&env.conn, 1, 5).unwrap();
  }

  #[test]
  fn test_list_favorites() {
    let env = TestEnv::new().unwrap();

    set_favorite(&env.conn, 1, 5).unwrap();
    set_favorite(&env.conn, 1, 9).unwrap();
    set_favorite(&env.conn, 2, 7).unwrap();

    let mut ids = list_favorites(&env.conn, 1).unwrap();
    ids.sort();
    assert_eq!(ids, vec![5, 9]);
  }
}
