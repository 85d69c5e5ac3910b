use actix_web::web;

use super::error::AppError;
use super::handlers::{health, marks, students};

/// Registers every route plus extractor configs that turn malformed
/// forms and non-numeric path ids into `AppError` pages.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::FormConfig::default().error_handler(|err, _req| {
        AppError::bad_request("INVALID_FORM", err.to_string()).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _req| {
        AppError::not_found("NOT_FOUND", err.to_string()).into()
    }))
    .route("/", web::get().to(students::index))
    .service(
        web::resource("/add_student")
            .route(web::get().to(students::add_student_form))
            .route(web::post().to(students::add_student)),
    )
    .service(
        web::resource("/add_marks/{student_id}")
            .route(web::get().to(marks::add_marks_form))
            .route(web::post().to(marks::add_marks)),
    )
    .route("/view/{student_id}", web::get().to(students::view_student))
    .route(
        "/delete_student/{student_id}",
        web::post().to(students::delete_student),
    )
    .route("/health", web::get().to(health::health));
}
