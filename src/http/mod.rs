pub mod error;
pub mod forms;
pub mod handlers;
pub mod logger;
pub mod pages;
pub mod router;
pub mod types;

pub use error::AppError;
pub use logger::StructuredLogger;
pub use router::configure;
pub use types::AppState;
