pub mod health;
pub mod marks;
pub mod students;

use actix_web::http::header::{self, ContentType};
use actix_web::HttpResponse;

pub(crate) fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(body)
}

pub(crate) fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}
