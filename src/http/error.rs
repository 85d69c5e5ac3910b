use actix_web::error::ResponseError;
use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use thiserror::Error;

use super::pages;
use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {detail}")]
    BadRequest { code: &'static str, detail: String },
    #[error("Not found: {detail}")]
    NotFound { code: &'static str, detail: String },
    #[error("Database error: {detail}")]
    Db { detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::BadRequest { code, .. } => *code,
            AppError::NotFound { code, .. } => *code,
            AppError::Db { .. } => "DB_ERROR",
            AppError::Internal { .. } => "INTERNAL",
        }
    }

    pub fn detail(&self) -> &str {
        match self {
            AppError::BadRequest { detail, .. } => detail,
            AppError::NotFound { detail, .. } => detail,
            AppError::Db { detail } => detail,
            AppError::Internal { detail } => detail,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Db { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn bad_request(code: &'static str, detail: String) -> Self {
        Self::BadRequest { code, detail }
    }

    pub fn not_found(code: &'static str, detail: String) -> Self {
        Self::NotFound { code, detail }
    }

    pub fn db(detail: String) -> Self {
        Self::Db { detail }
    }

    pub fn internal(detail: String) -> Self {
        Self::Internal { detail }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::StudentNotFound { id } => {
                AppError::not_found("STUDENT_NOT_FOUND", format!("No student with id {id}"))
            }
            // Handlers that accept new rolls intercept this before it gets here.
            StoreError::DuplicateRoll { roll } => AppError::bad_request(
                "DUPLICATE_ROLL",
                format!("Roll number {roll} already exists"),
            ),
            StoreError::ScoreOutOfRange { .. } => {
                AppError::bad_request("INVALID_NUMBER", e.to_string())
            }
            StoreError::CorruptMarks { .. } => AppError::internal(e.to_string()),
            StoreError::Db(db) => AppError::db(db.to_string()),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status();
        let html = pages::error_page(status.as_u16(), self.code(), self.detail());
        HttpResponse::build(status)
            .content_type(ContentType::html())
            .insert_header(("x-error-code", self.code()))
            .body(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_map_to_statuses() {
        let nf: AppError = StoreError::StudentNotFound { id: 7 }.into();
        assert_eq!(nf.status(), StatusCode::NOT_FOUND);
        assert_eq!(nf.code(), "STUDENT_NOT_FOUND");

        let range: AppError = StoreError::ScoreOutOfRange {
            student_id: 7,
            subject: "maths",
            value: i64::MAX,
        }
        .into();
        assert_eq!(range.status(), StatusCode::BAD_REQUEST);
        assert_eq!(range.code(), "INVALID_NUMBER");

        let db: AppError = StoreError::Db(rusqlite::Error::InvalidQuery).into();
        assert_eq!(db.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(db.code(), "DB_ERROR");
    }

    #[test]
    fn error_response_carries_code_header() {
        let resp = AppError::bad_request("INVALID_NUMBER", "english must be a whole number".into())
            .error_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            resp.headers()
                .get("x-error-code")
                .and_then(|v| v.to_str().ok()),
            Some("INVALID_NUMBER")
        );
    }
}
