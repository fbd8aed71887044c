use std::path::PathBuf;

use thiserror::Error;

// Main Application Error Type

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Could not load image from {0}")]
    UndecodableImage(PathBuf),
    #[error("Unknown waste category: {0}")]
    UnknownCategory(String),
    #[error("Configuration Error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
    #[error("Serialization Error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
    #[error("The session controller has shut down.")]
    SessionClosed,
    #[error("The session controller is not accepting commands right now.")]
    SessionBusy,
    #[error("UI Error: {0}")]
    Ui(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_read_error_names_the_path() {
        let err = AppError::FileRead {
            path: PathBuf::from("bottle.jpg"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(err.to_string(), "Failed to read bottle.jpg: missing");
    }
}
