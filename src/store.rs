//! Student and marks records over the two-table schema created by `db::init_db`.
//!
//! Every function takes a plain `&Connection` so callers decide the
//! connection lifetime. Writes that must not interleave with another
//! writer run inside an `IMMEDIATE` transaction.

use crate::calc::{self, Grade, Outcome, SubjectScores};
use rusqlite::{Connection, OptionalExtension, Transaction, TransactionBehavior};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("roll number {roll} already exists")]
    DuplicateRoll { roll: String },
    #[error("student {id} not found")]
    StudentNotFound { id: i64 },
    #[error("{subject} score {value} for student {student_id} is out of range")]
    ScoreOutOfRange {
        student_id: i64,
        subject: &'static str,
        value: i64,
    },
    #[error("marks for student {student_id} are unreadable: {detail}")]
    CorruptMarks { student_id: i64, detail: String },
    #[error("database error: {0}")]
    Db(#[from] rusqlite::Error),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub roll: String,
    pub attendance: f64,
}

/// One line of the listing: the student plus the id of their marks row, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentRow {
    pub student: Student,
    pub mark_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marks {
    pub id: i64,
    pub student_id: i64,
    pub scores: SubjectScores,
    pub total: i64,
    pub result: Outcome,
    pub grade: Grade,
}

fn read_student(row: &rusqlite::Row<'_>) -> rusqlite::Result<Student> {
    Ok(Student {
        id: row.get(0)?,
        name: row.get(1)?,
        roll: row.get(2)?,
        attendance: row.get(3)?,
    })
}

fn read_student_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<StudentRow> {
    Ok(StudentRow {
        student: read_student(row)?,
        mark_id: row.get(4)?,
    })
}

/// Escapes LIKE wildcards so the term only ever matches literally.
fn like_pattern(term: &str) -> String {
    let mut out = String::with_capacity(term.len() + 2);
    out.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('%');
    out
}

/// Lists every student once, in id order. A non-empty `search` keeps rows
/// whose name or roll contains it (ASCII case-insensitive).
pub fn list_students(conn: &Connection, search: Option<&str>) -> Result<Vec<StudentRow>, StoreError> {
    let search = search.filter(|s| !s.is_empty());

    // GROUP BY keeps one row per student even if stray duplicate marks exist.
    let mut sql = String::from(
        "SELECT s.id, s.name, s.roll, s.attendance, MIN(m.id) AS mark_id
         FROM students s
         LEFT JOIN marks m ON s.id = m.student_id",
    );
    if search.is_some() {
        sql.push_str(" WHERE s.name LIKE ?1 ESCAPE '\\' OR s.roll LIKE ?1 ESCAPE '\\'");
    }
    sql.push_str(" GROUP BY s.id ORDER BY s.id");

    let mut stmt = conn.prepare(&sql)?;
    let rows = match search {
        Some(term) => stmt
            .query_map([like_pattern(term)], read_student_row)?
            .collect::<Result<Vec<_>, _>>()?,
        None => stmt
            .query_map([], read_student_row)?
            .collect::<Result<Vec<_>, _>>()?,
    };
    Ok(rows)
}

pub fn count_students(conn: &Connection) -> Result<i64, StoreError> {
    let n = conn.query_row("SELECT COUNT(*) FROM students", [], |r| r.get(0))?;
    Ok(n)
}

pub fn find_by_roll(conn: &Connection, roll: &str) -> Result<Option<Student>, StoreError> {
    let student = conn
        .query_row(
            "SELECT id, name, roll, attendance FROM students WHERE roll = ? ORDER BY id LIMIT 1",
            [roll],
            read_student,
        )
        .optional()?;
    Ok(student)
}

/// Inserts without the duplicate-roll check. Only the bulk importer uses
/// this directly; interactive creation goes through `create_student`.
pub fn insert_student(
    conn: &Connection,
    name: &str,
    roll: &str,
    attendance: f64,
) -> Result<i64, StoreError> {
    conn.execute(
        "INSERT INTO students (name, roll, attendance) VALUES (?, ?, ?)",
        (name, roll, attendance),
    )?;
    Ok(conn.last_insert_rowid())
}

/// Creates a student unless the roll is taken. The lookup and the insert
/// share one write transaction, so two writers cannot both pass the check.
pub fn create_student(
    conn: &Connection,
    name: &str,
    roll: &str,
    attendance: f64,
) -> Result<i64, StoreError> {
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;
    if find_by_roll(&tx, roll)?.is_some() {
        warn!(roll = %roll, "duplicate_roll_rejected");
        return Err(StoreError::DuplicateRoll {
            roll: roll.to_string(),
        });
    }
    let id = insert_student(&tx, name, roll, attendance)?;
    tx.commit()?;
    info!(student_id = id, "student_created");
    Ok(id)
}

pub fn get_student(conn: &Connection, id: i64) -> Result<Option<Student>, StoreError> {
    let student = conn
        .query_row(
            "SELECT id, name, roll, attendance FROM students WHERE id = ?",
            [id],
            read_student,
        )
        .optional()?;
    Ok(student)
}

pub fn require_student(conn: &Connection, id: i64) -> Result<Student, StoreError> {
    get_student(conn, id)?.ok_or(StoreError::StudentNotFound { id })
}

pub fn get_marks(conn: &Connection, student_id: i64) -> Result<Option<Marks>, StoreError> {
    let raw = conn
        .query_row(
            "SELECT id, english, maths, physics, chemistry, biology, computer, total, result, grade
             FROM marks
             WHERE student_id = ?
             ORDER BY id
             LIMIT 1",
            [student_id],
            |row| {
                let id: i64 = row.get(0)?;
                let scores = SubjectScores::from_array([
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                    row.get(4)?,
                    row.get(5)?,
                    row.get(6)?,
                ]);
                let total: i64 = row.get(7)?;
                let result: String = row.get(8)?;
                let grade: String = row.get(9)?;
                Ok((id, scores, total, result, grade))
            },
        )
        .optional()?;

    let Some((id, scores, total, result, grade)) = raw else {
        return Ok(None);
    };
    let result = Outcome::parse(&result).ok_or_else(|| StoreError::CorruptMarks {
        student_id,
        detail: format!("unknown result {result:?}"),
    })?;
    let grade = Grade::parse(&grade).ok_or_else(|| StoreError::CorruptMarks {
        student_id,
        detail: format!("unknown grade {grade:?}"),
    })?;

    Ok(Some(Marks {
        id,
        student_id,
        scores,
        total,
        result,
        grade,
    }))
}

fn derive_checked(student_id: i64, scores: &SubjectScores) -> Result<calc::Derived, StoreError> {
    let out_of_range = |(subject, value): (&'static str, i64)| StoreError::ScoreOutOfRange {
        student_id,
        subject,
        value,
    };
    if let Some(bad) = scores.out_of_range() {
        return Err(out_of_range(bad));
    }
    // In-range scores always have a total.
    calc::derive(scores).ok_or_else(|| out_of_range(("total", i64::MAX)))
}

/// Inserts a marks row with freshly derived total/result/grade.
pub fn insert_marks(
    conn: &Connection,
    student_id: i64,
    scores: &SubjectScores,
) -> Result<i64, StoreError> {
    let d = derive_checked(student_id, scores)?;
    let s = scores.as_array();
    conn.execute(
        "INSERT INTO marks
         (student_id, english, maths, physics, chemistry, biology, computer, total, result, grade)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        (
            student_id,
            s[0],
            s[1],
            s[2],
            s[3],
            s[4],
            s[5],
            d.total,
            d.result.as_str(),
            d.grade.as_str(),
        ),
    )?;
    Ok(conn.last_insert_rowid())
}

/// Overwrites the student's marks (all six scores plus derived fields),
/// inserting the row on first submission.
pub fn upsert_marks(
    conn: &Connection,
    student_id: i64,
    scores: &SubjectScores,
) -> Result<Marks, StoreError> {
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;
    require_student(&tx, student_id)?;

    let d = derive_checked(student_id, scores)?;
    let s = scores.as_array();
    let updated = tx.execute(
        "UPDATE marks SET
           english = ?, maths = ?, physics = ?, chemistry = ?, biology = ?, computer = ?,
           total = ?, result = ?, grade = ?
         WHERE student_id = ?",
        (
            s[0],
            s[1],
            s[2],
            s[3],
            s[4],
            s[5],
            d.total,
            d.result.as_str(),
            d.grade.as_str(),
            student_id,
        ),
    )?;
    if updated == 0 {
        insert_marks(&tx, student_id, scores)?;
    }
    tx.commit()?;

    info!(
        student_id,
        total = d.total,
        result = %d.result,
        grade = %d.grade,
        "marks_saved"
    );

    get_marks(conn, student_id)?.ok_or(StoreError::StudentNotFound { id: student_id })
}

/// Removes the marks row first, then the student, in one transaction.
pub fn delete_student(conn: &Connection, id: i64) -> Result<(), StoreError> {
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;
    tx.execute("DELETE FROM marks WHERE student_id = ?", [id])?;
    let deleted = tx.execute("DELETE FROM students WHERE id = ?", [id])?;
    if deleted == 0 {
        return Err(StoreError::StudentNotFound { id });
    }
    tx.commit()?;
    info!(student_id = id, "student_deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::like_pattern;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("ali"), "%ali%");
        assert_eq!(like_pattern("5%"), "%5\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
        assert_eq!(like_pattern("x\\y"), "%x\\\\y%");
    }
}
