//! One-time population of an empty store from `students.csv`.

use crate::calc::SubjectScores;
use crate::store::{self, StoreError};
use rusqlite::Connection;
use serde::Deserialize;
use std::fs::File;
use std::path::Path;
use thiserror::Error;
use tracing::info;

pub const IMPORT_FILE: &str = "students.csv";

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("bad row at line {line}: {source}")]
    Csv {
        line: u64,
        #[source]
        source: csv::Error,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("database error: {0}")]
    Db(#[from] rusqlite::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    StudentsPresent,
    NoImportFile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportOutcome {
    Skipped(SkipReason),
    Imported { students: usize, with_marks: usize },
}

/// Header names match the file exactly. Subject columns are optional, and
/// an empty cell counts as absent.
#[derive(Debug, Deserialize)]
struct ImportRow {
    name: String,
    roll: String,
    attendance: f64,
    #[serde(default)]
    english: Option<i64>,
    #[serde(default)]
    maths: Option<i64>,
    #[serde(default)]
    physics: Option<i64>,
    #[serde(default)]
    chemistry: Option<i64>,
    #[serde(default)]
    biology: Option<i64>,
    #[serde(default)]
    computer: Option<i64>,
}

impl ImportRow {
    fn scores(&self) -> Option<SubjectScores> {
        Some(SubjectScores::from_array([
            self.english?,
            self.maths?,
            self.physics?,
            self.chemistry?,
            self.biology?,
            self.computer?,
        ]))
    }
}

/// Imports `csv_path` when the students table is empty and the file exists.
///
/// Rows are not checked for duplicate rolls. Each row is committed on its
/// own, so rows before a failing one stay imported.
pub fn import_if_empty(conn: &Connection, csv_path: &Path) -> Result<ImportOutcome, ImportError> {
    if store::count_students(conn)? > 0 {
        info!(reason = "students_present", "import_skipped");
        return Ok(ImportOutcome::Skipped(SkipReason::StudentsPresent));
    }
    if !csv_path.is_file() {
        info!(reason = "no_import_file", "import_skipped");
        return Ok(ImportOutcome::Skipped(SkipReason::NoImportFile));
    }

    let file = File::open(csv_path).map_err(|source| ImportError::Io {
        path: csv_path.to_string_lossy().to_string(),
        source,
    })?;
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut students = 0usize;
    let mut with_marks = 0usize;
    for record in reader.deserialize::<ImportRow>() {
        let row = record.map_err(|source| ImportError::Csv {
            line: source.position().map(|p| p.line()).unwrap_or(0),
            source,
        })?;

        let tx = conn.unchecked_transaction()?;
        let student_id = store::insert_student(&tx, &row.name, &row.roll, row.attendance)?;
        if let Some(scores) = row.scores() {
            store::insert_marks(&tx, student_id, &scores)?;
            with_marks += 1;
        }
        tx.commit()?;
        students += 1;
    }

    info!(students, with_marks, path = %csv_path.to_string_lossy(), "import_completed");
    Ok(ImportOutcome::Imported {
        students,
        with_marks,
    })
}
