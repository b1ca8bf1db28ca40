use rusqlite::{Connection, Result};

pub fn run_migrations(conn: &Connection) -> Result<()> {
  // Create tables with COMPLETE schema for new databases
  // Migrations below handle upgrades for existing databases
  conn.execute_batch(
    r#"
    CREATE TABLE IF NOT EXISTS users (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      tlgid INTEGER NOT NULL UNIQUE,
      is_onboarded INTEGER NOT NULL DEFAULT 0,
      is_payed INTEGER NOT NULL DEFAULT 0,
      payed_until TEXT,
      created_at TEXT NOT NULL,
      updated_at TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS course_types (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      name TEXT NOT NULL,
      description TEXT,
      color TEXT,
      order_number INTEGER NOT NULL DEFAULT 0
    );

    CREATE TABLE IF NOT EXISTS courses (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      type_id INTEGER NOT NULL,
      name TEXT NOT NULL,
      short_description TEXT,
      long_description TEXT,
      access TEXT NOT NULL DEFAULT 'payment',
      order_number INTEGER NOT NULL DEFAULT 0,
      FOREIGN KEY (type_id) REFERENCES course_types(id)
    );

    CREATE TABLE IF NOT EXISTS lessons (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      course_id INTEGER NOT NULL,
      name TEXT NOT NULL,
      short_description TEXT,
      long_description TEXT,
      url_to_file TEXT,
      order_number INTEGER NOT NULL DEFAULT 0,
      access TEXT NOT NULL DEFAULT 'payment',
      FOREIGN KEY (course_id) REFERENCES courses(id)
    );

    CREATE TABLE IF NOT EXISTS user_progress (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      tlgid INTEGER NOT NULL,
      lesson_id INTEGER NOT NULL,
      is_learned INTEGER NOT NULL DEFAULT 0,
      updated_at TEXT NOT NULL,
      UNIQUE (tlgid, lesson_id)
    );

    CREATE TABLE IF NOT EXISTS user_favorites (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      tlgid INTEGER NOT NULL,
      lesson_id INTEGER NOT NULL,
      is_favorite INTEGER NOT NULL DEFAULT 0,
      updated_at TEXT NOT NULL,
      UNIQUE (tlgid, lesson_id)
    );

    -- Append-only payment ledger: rows are never updated or deleted
    CREATE TABLE IF NOT EXISTS payments (
      id INTEGER PRIMARY KEY AUTOINCREMENT,
      tlgid INTEGER NOT NULL,
      sum REAL NOT NULL,
      payed_period_days INTEGER NOT NULL,
      payment_date TEXT NOT NULL
    );

    -- Indexes
    CREATE INDEX IF NOT EXISTS idx_courses_type_id ON courses(type_id);
    CREATE INDEX IF NOT EXISTS idx_lessons_course_id ON lessons(course_id);
    CREATE INDEX IF NOT EXISTS idx_user_progress_tlgid ON user_progress(tlgid);
    CREATE INDEX IF NOT EXISTS idx_user_favorites_tlgid ON user_favorites(tlgid);
    CREATE INDEX IF NOT EXISTS idx_payments_tlgid ON payments(tlgid);
    "#,
  )?;

  // ============================================================
  // MIGRATIONS FOR EXISTING DATABASES
  // These are no-ops for new databases (columns already exist)
  // ============================================================

  // Migration: course_types.color arrived after the first deploy
  add_column_if_missing(conn, "course_types", "color", "TEXT")?;

  // Migration: lessons gained a per-lesson access tier (was course-level only)
  add_column_if_missing(conn, "lessons", "access", "TEXT NOT NULL DEFAULT 'payment'")?;

  Ok(())
}

/// Check if a column exists in a table
fn column_exists(conn: &Connection, table: &str, column: &str) -> bool {
  conn
    .prepare(&format!("SELECT {} FROM {} LIMIT 1", column, table))
    .is_ok()
}

/// Add a column if it doesn't already exist
fn add_column_if_missing(conn: &Connection, table: &str, column: &str, column_def: &str) -> Result<()> {
  if !column_exists(conn, table, column) {
    conn.execute(
      &format!("ALTER TABLE {} ADD COLUMN {} {}", table, column, column_def),
      [],
    )?;
  }
  Ok(())
}
