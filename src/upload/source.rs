use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::error::AppError;

use super::UploadedImage;

/// Somewhere the bytes of a user-selected image come from.
#[async_trait]
pub trait UploadSource: Send + Sync {
    fn name(&self) -> String;

    async fn read(&self) -> Result<Vec<u8>, AppError>;

    /// Reads the source and wraps it as an upload. Nothing about the content is
    /// validated here.
    async fn load(&self) -> Result<UploadedImage, AppError> {
        let bytes = self.read().await?;
        debug!("Read {} bytes from {}", bytes.len(), self.name());
        Ok(UploadedImage::from_bytes(self.name(), bytes))
    }
}

/// A file picked from the local file system.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl UploadSource for FileSource {
    fn name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    async fn read(&self) -> Result<Vec<u8>, AppError> {
        tokio::fs::read(&self.path)
            .await
            .map_err(|source| AppError::FileRead {
                path: self.path.clone(),
                source,
            })
    }
}

/// Bytes handed over by the window system, e.g. a drag and drop without a path.
#[derive(Debug, Clone)]
pub struct DroppedBytes {
    name: String,
    bytes: Arc<[u8]>,
}

impl DroppedBytes {
    pub fn new(name: impl Into<String>, bytes: Arc<[u8]>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

#[async_trait]
impl UploadSource for DroppedBytes {
    fn name(&self) -> String {
        self.name.clone()
    }

    async fn read(&self) -> Result<Vec<u8>, AppError> {
        Ok(self.bytes.to_vec())
    }
}
