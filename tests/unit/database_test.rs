//! Unit tests for the linkqr database layer (connection + migrations).

use linkqr::database::migrations::{get_schema_version, CURRENT_SCHEMA_VERSION};
use linkqr::database::Database;
use tempfile::TempDir;

#[test]
fn test_open_in_memory_succeeds() {
    let db = Database::open_in_memory();
    assert!(db.is_ok(), "open_in_memory should succeed");
}

#[test]
fn test_migrations_create_kv_store() {
    let db = Database::open_in_memory().expect("open_in_memory failed");
    let exists: bool = db
        .connection()
        .query_row(
            "SELECT COUNT(*) > 0 FROM sqlite_master WHERE type='table' AND name='kv_store'",
            [],
            |row| row.get(0),
        )
        .unwrap_or(false);
    assert!(exists, "kv_store should exist after migrations");
}

#[test]
fn test_schema_version_recorded() {
    let db = Database::open_in_memory().unwrap();
    assert_eq!(get_schema_version(db.connection()), CURRENT_SCHEMA_VERSION);
}

#[test]
fn test_migrations_are_idempotent() {
    let db = Database::open_in_memory().expect("open_in_memory failed");
    let result = linkqr::database::migrations::run_all(db.connection());
    assert!(result.is_ok(), "Running migrations twice should succeed");
    assert_eq!(get_schema_version(db.connection()), CURRENT_SCHEMA_VERSION);
}

#[test]
fn test_open_file_database_creates_parent_dirs() {
    let tmp = TempDir::new().unwrap();
    let db_path = tmp.path().join("nested").join("dir").join("linkqr.db");

    {
        let db = Database::open(&db_path).expect("open should create parent dirs");
        db.connection()
            .execute(
                "INSERT INTO kv_store (key, value, updated_at) VALUES ('k', 'v', 0)",
                [],
            )
            .unwrap();
    }

    assert!(db_path.exists());

    let reopened = Database::open(&db_path).unwrap();
    let value: String = reopened
        .connection()
        .query_row("SELECT value FROM kv_store WHERE key = 'k'", [], |row| row.get(0))
        .unwrap();
    assert_eq!(value, "v");
}

#[test]
fn test_open_under_a_file_fails() {
    let tmp = TempDir::new().unwrap();
    let blocker = tmp.path().join("not-a-dir");
    std::fs::write(&blocker, b"x").unwrap();

    assert!(Database::open(blocker.join("linkqr.db")).is_err());
}
