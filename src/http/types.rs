use std::path::PathBuf;

use actix_web::web;
use rusqlite::Connection;

use super::error::AppError;
use crate::db;
use crate::store::StoreError;

/// Shared across workers. Holds no connection: each request opens its own.
#[derive(Debug, Clone)]
pub struct AppState {
    pub workspace: PathBuf,
}

impl AppState {
    pub fn new(workspace: PathBuf) -> Self {
        Self { workspace }
    }

    /// Runs `f` on the blocking pool with a connection scoped to this call.
    /// The connection is dropped before the result is handed back, on the
    /// error path too.
    pub async fn with_conn<T, F>(&self, f: F) -> Result<T, AppError>
    where
        F: FnOnce(&Connection) -> Result<T, StoreError> + Send + 'static,
        T: Send + 'static,
    {
        let workspace = self.workspace.clone();
        web::block(move || -> Result<T, AppError> {
            let conn = db::connect(&workspace).map_err(|e| AppError::db(format!("{e:#}")))?;
            Ok(f(&conn)?)
        })
        .await
        .map_err(|e| AppError::internal(format!("blocking task failed: {e}")))?
    }
}
