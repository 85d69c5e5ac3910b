use actix_web::{web, HttpResponse};
use tracing::debug;

use super::{html, redirect};
use crate::http::error::AppError;
use crate::http::forms::{NewStudentForm, SearchQuery};
use crate::http::pages;
use crate::http::types::AppState;
use crate::store::{self, StoreError};

const DUPLICATE_ROLL_MESSAGE: &str = "Roll number already exists!";

pub async fn index(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse, AppError> {
    let search = query.into_inner().search.filter(|s| !s.is_empty());
    let term = search.clone();
    let rows = state
        .with_conn(move |conn| store::list_students(conn, term.as_deref()))
        .await?;
    debug!(count = rows.len(), "students_listed");
    Ok(html(pages::index_page(&rows, search.as_deref())))
}

pub async fn add_student_form() -> Result<HttpResponse, AppError> {
    Ok(html(pages::add_student_page(None, None)))
}

pub async fn add_student(
    state: web::Data<AppState>,
    form: web::Form<NewStudentForm>,
) -> Result<HttpResponse, AppError> {
    let form = form.into_inner();
    let student = form.validate()?;

    let created = state
        .with_conn(move |conn| {
            match store::create_student(conn, &student.name, &student.roll, student.attendance) {
                Ok(id) => Ok(Some(id)),
                Err(StoreError::DuplicateRoll { .. }) => Ok(None),
                Err(e) => Err(e),
            }
        })
        .await?;

    match created {
        Some(_) => Ok(redirect("/")),
        None => Ok(html(pages::add_student_page(
            Some(DUPLICATE_ROLL_MESSAGE),
            Some(&form),
        ))),
    }
}

pub async fn view_student(
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
    Ok(html(pages::view_page(&student, marks.as_ref())))
}

pub async fn delete_student(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    state
        .with_conn(move |conn| store::delete_student(conn, id))
        .await?;
    Ok(redirect("/"))
}
