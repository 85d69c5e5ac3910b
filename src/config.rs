use anyhow::Context;
use std::path::PathBuf;

use crate::{db, import};

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Directory holding `students.db` and the optional `students.csv`.
    pub workspace: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup; unset keys fall back
    /// to the defaults.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("GRADEBOOK_HOST")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match lookup("GRADEBOOK_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("GRADEBOOK_PORT must be a valid port number, got {raw:?}"))?,
            None => DEFAULT_PORT,
        };
        let workspace = lookup("GRADEBOOK_WORKSPACE")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        Ok(Self {
            host,
            port,
            workspace,
        })
    }

    pub fn db_path(&self) -> PathBuf {
        db::db_path(&self.workspace)
    }

    pub fn import_path(&self) -> PathBuf {
        self.workspace.join(import::IMPORT_FILE)
    }
}
