use std::path::Path;

use rusqlite::Connection;
use tracing::{debug, info};

use crate::error::Result;
use crate::settings::{get_data_dir, DB_FILE};

pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS income (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    amount REAL NOT NULL,
    date TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS expenses (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    category TEXT NOT NULL,
    amount REAL NOT NULL,
    date TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS expense_limits (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    category TEXT NOT NULL UNIQUE,
    limit_amount REAL NOT NULL,
    limit_percentage REAL NOT NULL DEFAULT 0
);

CREATE INDEX IF NOT EXISTS idx_income_date ON income(date);
CREATE INDEX IF NOT EXISTS idx_expenses_date ON expenses(date);
";

pub fn get_connection(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open(db_path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;
    Ok(conn)
}

pub fn init_db(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

/// Open the configured database, creating the data dir and schema if needed.
pub fn open_default() -> Result<Connection> {
    let data_dir = get_data_dir();
    std::fs::create_dir_all(&data_dir)?;
    let db_path = data_dir.join(DB_FILE);
    debug!(path = %db_path.display(), "opening database");
    let conn = get_connection(&db_path)?;
    init_db(&conn)?;
    Ok(conn)
}

/// Create the schema at an explicit data dir (used by `init`).
pub fn init_at(data_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(data_dir)?;
    let conn = get_connection(&data_dir.join(DB_FILE))?;
    init_db(&conn)?;
    info!(dir = %data_dir.display(), "database initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_db() -> (tempfile::TempDir, Connection) {
        let dir = tempfile::tempdir().unwrap();
        let conn = get_connection(&dir.path().join("test.db")).unwrap();
        init_db(&conn).unwrap();
        (dir, conn)
    }

    #[test]
    fn test_init_db_creates_tables() {
        let (_dir, conn) = test_db();
        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<Vec<_>, _>>()
            .unwrap();
        for expected in &["income", "expenses", "expense_limits"] {
            assert!(tables.contains(&expected.to_string()), "missing table: {expected}");
        }
    }

    #[test]
    fn test_init_db_is_idempotent() {
        let (_dir, conn) = test_db();
        init_db(&conn).unwrap();
        init_db(&conn).unwrap();
    }

    #[test]
    fn test_limit_category_is_unique() {
        let (_dir, conn) = test_db();
        conn.execute(
            "INSERT INTO expense_limits (category, limit_amount) VALUES ('Food', 100.0)", [],
        ).unwrap();
        let dup = conn.execute(
            "INSERT INTO expense_limits (category, limit_amount) VALUES ('Food', 200.0)", [],
        );
        assert!(dup.is_err());
    }

    #[test]
    fn test_init_at_creates_db_file() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested").join("data");
        init_at(&nested).unwrap();
        assert!(nested.join(DB_FILE).exists());
    }
}
