#![allow(dead_code, unused_macros)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::Connection;

static SEQ: AtomicUsize = AtomicUsize::new(0);

pub fn temp_dir(prefix: &str) -> PathBuf {
    let p = std::env::temp_dir().join(format!(
        "{}-{}-{}",
        prefix,
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos(),
        SEQ.fetch_add(1, Ordering::SeqCst)
    ));
    std::fs::create_dir_all(&p).expect("create temp dir");
    p
}

/// Temp workspace with both tables created.
pub fn fresh_workspace(prefix: &str) -> PathBuf {
    let ws = temp_dir(prefix);
    gradebookd::db::init_db(&ws).expect("init db");
    ws
}

pub fn connect(workspace: &Path) -> Connection {
    gradebookd::db::connect(workspace).expect("connect")
}

pub fn count(conn: &Connection, sql: &str, id: i64) -> i64 {
    conn.query_row(sql, [id], |r| r.get(0)).expect("count query")
}

/// Column names as SQLite reports them for `table`.
pub fn column_names(conn: &Connection, table: &str) -> Vec<String> {
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info({table})"))
        .expect("prepare pragma");
    stmt.query_map([], |r| r.get::<_, String>(1))
        .expect("pragma rows")
        .collect::<Result<_, _>>()
        .expect("column name")
}

/// Initialized actix test service over the production route table.
macro_rules! test_app {
    ($workspace:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new(gradebookd::AppState::new(
                    $workspace.clone(),
                )))
                .configure(gradebookd::http::configure),
        )
        .await
    };
}
