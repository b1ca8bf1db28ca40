use rusqlite::{Connection, OptionalExtension, Result, params};

use crate::domain::{AccessTier, Course, CourseType, Lesson};

pub fn list_course_types(conn: &Connection) -> Result<Vec<CourseType>> {
  let mut stmt = conn.prepare(
    r#"
    SELECT id, name, description, color, order_number
    FROM course_types
    ORDER BY order_number ASC
    "#,
  )?;

  let types = stmt
    .query_map([], |row| {
      Ok(CourseType {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        color: row.get(3)?,
        order_number: row.get(4)?,
      })
    })?
    .collect::<Result<Vec<_>>>()?;
  Ok(types)
}

pub fn list_courses_by_type(conn: &Connection, type_id: i64) -> Result<Vec<Course>> {
  let mut stmt = conn.prepare(
    r#"
    SELECT id, type_id, name, short_description, long_description, access, order_number
    FROM courses
    WHERE type_id = ?1
    ORDER BY order_number ASC
    "#,
  )?;

  let courses = stmt
    .query_map(params![type_id], row_to_course)?
    .collect::<Result<Vec<_>>>()?;
  Ok(courses)
}

pub fn list_lessons_by_course(conn: &Connection, course_id: i64) -> Result<Vec<Lesson>> {
  let mut stmt = conn.prepare(
    r#"
    SELECT id, course_id, name, short_description, long_description, url_to_file,
           order_number, access
    FROM lessons
    WHERE course_id = ?1
    ORDER BY order_number ASC
    "#,
  )?;

  let lessons = stmt
    .query_map(params![course_id], row_to_lesson)?
    .collect::<Result<Vec<_>>>()?;
  Ok(lessons)
}

pub fn get_lesson_by_id(conn: &Connection, lesson_id: i64) -> Result<Option<Lesson>> {
  conn
    .prepare(
      r#"
      SELECT id, course_id, name, short_description, long_description, url_to_file,
             order_number, access
      FROM lessons WHERE id = ?1
      "#,
    )?
    .query_row(params![lesson_id], row_to_lesson)
    .optional()
}

// Admin seed inserts. The catalog is read-mostly: these only run from the
// admin endpoints when new content is published.

pub fn insert_course_type(
  conn: &Connection,
  name: &str,
  description: Option<&str>,
  color: Option<&str>,
  order_number: i64,
) -> Result<i64> {
  conn.execute(
    r#"
    INSERT INTO course_types (name, description, color, order_number)
    VALUES (?1, ?2, ?3, ?4)
    "#,
    params![name, description, color, order_number],
  )?;
  Ok(conn.last_insert_rowid())
}

pub fn insert_course(
  conn: &Connection,
  type_id: i64,
  name: &str,
  short_description: Option<&str>,
  long_description: Option<&str>,
  access: AccessTier,
  order_number: i64,
) -> Result<i64> {
  conn.execute(
    r#"
    INSERT INTO courses (type_id, name, short_description, long_description, access, order_number)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6)
    "#,
    params![type_id, name, short_description, long_description, access.as_str(), order_number],
  )?;
  Ok(conn.last_insert_rowid())
}

pub fn insert_lesson(
  conn: &Connection,
  course_id: i64,
  name: &str,
  short_description: Option<&str>,
  long_description: Option<&str>,
  url_to_file: Option<&str>,
  order_number: i64,
  access: AccessTier,
) -> Result<i64> {
  conn.execute(
    r#"
    INSERT INTO lessons (course_id, name, short_description, long_description, url_to_file,
                         order_number, access)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
    "#,
    params![
      course_id,
      name,
      short_description,
      long_description,
      url_to_file,
      order_number,
      access.as_str(),
    ],
  )?;
  Ok(conn.last_insert_rowid())
}

fn row_to_course(row: &rusqlite::Row) -> Result<Course> {
  let access: String = row.get(5)?;
  Ok(Course {
    id: row.get(0)?,
    type_id: row.get(1)?,
    name: row.get(2)?,
    short_description: row.get(3)?,
    long_description: row.get(4)?,
    access: AccessTier::from_str(&access).unwrap_or(AccessTier::Payment),
    order_number: row.get(6)?,
  })
}

fn row_to_lesson(row: &rusqlite::Row) -> Result<Lesson> {
  let access: String = row.get(7)?;
  Ok(Lesson {
    id: row.get(0)?,
    course_id: row.get(1)?,
    name: row.get(2)?,
    short_description: row.get(3)?,
    long_description: row.get(4)?,
    url_to_file: row.get(5)?,
    order_number: row.get(6)?,
    access: AccessTier::from_str(&access).unwrap_or(AccessTier::Payment),
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::testing::TestEnv;

  #[test]
  fn test_listings_sorted_by_order_number() {
    let env = TestEnv::new().unwrap();

    let tid = insert_course_type(&env.conn, "AI coding", None, Some("#ffaa00"), 2).unwrap();
    insert_course_type(&env.conn, "Basics", None, None, 1).unwrap();

    let types = list_course_types(&env.conn).unwrap();
    assert_eq!(types.len(), 2);
    assert_eq!(types[0].name, "Basics");
    assert_eq!(types[1].name, "AI coding");

    let c2 = insert_course(&env.conn, tid, "Advanced", None, None, AccessTier::Payment, 2).unwrap();
    let c1 = insert_course(&env.conn, tid, "Starter", None, None, AccessTier::Free, 1).unwrap();

    let courses = list_courses_by_type(&env.conn, tid).unwrap();
    assert_eq!(courses.iter().map(|c| c.id).collect::<Vec<_>>(), vec![c1, c2]);
    assert_eq!(courses[0].access, AccessTier::Free);
  }

  #[test]
  fn test_lesson_lookup() {
    let env = TestEnv::new().unwrap();

    let tid = insert_course_type(&env.conn, "Basics", None, None, 1).unwrap();
    let cid = insert_course(&env.conn, tid, "Starter", None, None, AccessTier::Free, 1).unwrap();
    let lid = insert_lesson(
      &env.conn,
      cid,
      "Setup",
      Some("short"),
      None,
      Some("https://video.example/abc"),
      1,
      AccessTier::Free,
    )
    .unwrap();

    let lesson = get_lesson_by_id(&env.conn, lid).unwrap().unwrap();
    assert_eq!(lesson.name, "Setup");
    assert_eq!(lesson.url_to_file.as_deref(), Some("https://video.example/abc"));

    assert!(get_lesson_by_id(&env.conn, lid + 100).unwrap().is_none());

    let lessons = list_lessons_by_course(&env.conn, cid).unwrap();
    assert_eq!(lessons.len(), 1);
  }
}
