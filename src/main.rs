use actix_web::{web, App, HttpServer};
use anyhow::Context;
use tracing::info;

use gradebookd::http::{self, AppState, StructuredLogger};
use gradebookd::{db, import, telemetry, AppConfig};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_tracing();

    let config = AppConfig::from_env()?;

    // Schema and one-time import both finish before the first request.
    db::init_db(&config.workspace)?;
    {
        let conn = db::connect(&config.workspace)?;
        let outcome = import::import_if_empty(&conn, &config.import_path())
            .context("bulk import failed")?;
        info!(?outcome, "import_checked");
    }

    let state = web::Data::new(AppState::new(config.workspace.clone()));
    info!(
        host = %config.host,
        port = config.port,
        db = %config.db_path().to_string_lossy(),
        "server_starting"
    );

    HttpServer::new(move || {
        App::new()
            .wrap(StructuredLogger)
            .app_data(state.clone())
            .configure(http::configure)
    })
    .bind((config.host.as_str(), config.port))
    .with_context(|| format!("failed to bind {}:{}", config.host, config.port))?
    .run()
    .await?;

    Ok(())
}
