pub mod app;
pub mod catalog;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod error;
pub mod render;
pub mod session;
pub mod upload;

pub use catalog::{CategoryId, WasteCategory};
pub use config::Settings;
pub use error::AppError;
pub use session::{SessionManager, SessionManagerHandle, SessionState};
