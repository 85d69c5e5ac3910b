pub mod calc;
pub mod config;
pub mod db;
pub mod http;
pub mod import;
pub mod store;
pub mod telemetry;

pub use config::AppConfig;
pub use http::{AppError, AppState};
pub use store::StoreError;
