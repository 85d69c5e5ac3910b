use anyhow::Context;
use rusqlite::Connection;
use std::path::{Path, PathBuf};

pub const DB_FILE: &str = "students.db";

pub fn db_path(workspace: &Path) -> PathBuf {
    workspace.join(DB_FILE)
}

/// Creates the workspace directory and both tables. Safe to call on an
/// existing database; run once per process before serving.
pub fn init_db(workspace: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(workspace).with_context(|| {
        format!(
            "failed to create workspace {}",
            workspace.to_string_lossy()
        )
    })?;
    let conn = connect(workspace)?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS students (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT,
            roll TEXT,
            attendance REAL
        )",
        [],
    )?;

    // No FOREIGN KEY / UNIQUE here: marks ownership and roll uniqueness are
    // enforced by the store.
    conn.execute(
        "CREATE TABLE IF NOT EXISTS marks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            student_id INTEGER,
            english INTEGER,
            maths INTEGER,
            physics INTEGER,
            chemistry INTEGER,
            biology INTEGER,
            computer INTEGER,
            total INTEGER,
            result TEXT,
            grade TEXT
        )",
        [],
    )?;

    Ok(())
}

/// Opens a fresh connection. Handlers open one per request and drop it
/// before responding.
pub fn connect(workspace: &Path) -> anyhow::Result<Connection> {
    let path = db_path(workspace);
    let conn = Connection::open(&path)
        .with_context(|| format!("failed to open {}", path.to_string_lossy()))?;
    Ok(conn)
}
