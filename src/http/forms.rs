//! Form payloads as submitted by the browser, plus the string-to-number
//! coercion the handlers apply before touching the store.
//!
//! Fields arrive as text so that a non-numeric value becomes a 400 with a
//! readable message instead of an extractor failure.

use serde::Deserialize;

use super::error::AppError;
use crate::calc::{self, SubjectScores};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub search: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewStudentForm {
    pub name: String,
    pub roll: String,
    pub total_days: String,
    pub attended_days: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewStudent {
    pub name: String,
    pub roll: String,
    pub attendance: f64,
}

impl NewStudentForm {
    pub fn validate(&self) -> Result<NewStudent, AppError> {
        let total_days = parse_int("total_days", &self.total_days)?;
        let attended_days = parse_int("attended_days", &self.attended_days)?;
        if total_days == 0 {
            return Err(AppError::bad_request(
                "INVALID_TOTAL_DAYS",
                "total_days must not be zero".to_string(),
            ));
        }
        Ok(NewStudent {
            name: self.name.clone(),
            roll: self.roll.clone(),
            attendance: calc::attendance_percent(attended_days, total_days),
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MarksForm {
    pub english: String,
    pub maths: String,
    pub physics: String,
    pub chemistry: String,
    pub biology: String,
    pub computer: String,
}

impl MarksForm {
    pub fn to_scores(&self) -> Result<SubjectScores, AppError> {
        Ok(SubjectScores {
            english: parse_score("english", &self.english)?,
            maths: parse_score("maths", &self.maths)?,
            physics: parse_score("physics", &self.physics)?,
            chemistry: parse_score("chemistry", &self.chemistry)?,
            biology: parse_score("biology", &self.biology)?,
            computer: parse_score("computer", &self.computer)?,
        })
    }
}

pub fn parse_int(field: &str, raw: &str) -> Result<i64, AppError> {
    raw.trim().parse::<i64>().map_err(|_| {
        AppError::bad_request(
            "INVALID_NUMBER",
            format!("{field} must be a whole number, got {:?}", raw.trim()),
        )
    })
}

/// A whole number small enough that six of them still have a total.
pub fn parse_score(field: &str, raw: &str) -> Result<i64, AppError> {
    let v = parse_int(field, raw)?;
    if !calc::score_in_range(v) {
        return Err(AppError::bad_request(
            "INVALID_NUMBER",
            format!(
                "{field} must be between {} and {}, got {v}",
                -calc::SCORE_LIMIT,
                calc::SCORE_LIMIT
            ),
        ));
    }
    Ok(v)
}
