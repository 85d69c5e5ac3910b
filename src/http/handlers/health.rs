use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::http::error::AppError;
use crate::http::types::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: &'static str,
    app_version: &'static str,
    db: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    db_error: Option<String>,
    time: String,
}

pub async fn health(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let db_check = state
        .with_conn(|conn| {
            let one: i64 = conn.query_row("SELECT 1", [], |r| r.get(0))?;
            Ok(one)
        })
        .await;

    let (db, db_error) = match db_check {
        Ok(_) => ("ok", None),
        Err(e) => ("error", Some(e.to_string())),
    };

    Ok(HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        app_version: env!("CARGO_PKG_VERSION"),
        db,
        db_error,
        time: chrono::Utc::now().to_rfc3339(),
    }))
}
