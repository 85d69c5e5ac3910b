use actix_web::{web, HttpResponse};

use super::{html, redirect};
use crate::http::error::AppError;
use crate::http::forms::MarksForm;
use crate::http::pages;
use crate::http::types::AppState;
use crate::store;

pub async fn add_marks_form(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let (student, marks) = state
        .with_conn(move |conn| {
            let student = store::require_student(conn, id)?;
            let marks = store::get_marks(conn, id)?;
            Ok((student, marks))
        })
        .await?;
    Ok(html(pages::add_marks_page(&student, marks.as_ref())))
}

pub async fn add_marks(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    form: web::Form<MarksForm>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let scores = form.to_scores()?;
    state
        .with_conn(move |conn| store::upsert_marks(conn, id, &scores))
        .await?;
    Ok(redirect(&format!("/view/{id}")))
}
