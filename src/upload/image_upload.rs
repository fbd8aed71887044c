use std::fmt;
use std::io::Cursor;
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::{ImageFormat, ImageReader};
use uuid::Uuid;

const FALLBACK_MIME: &str = "application/octet-stream";

/// A user upload held in memory. The content is taken as-is; dimensions are
/// only known when the bytes decode as an image.
#[derive(Clone)]
pub struct UploadedImage {
    id: Uuid,
    file_name: String,
    bytes: Arc<[u8]>,
    mime: String,
    dimensions: Option<(u32, u32)>,
}

impl UploadedImage {
    pub fn from_bytes(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let format = image::guess_format(&bytes)
            .ok()
            .or_else(|| ImageFormat::from_path(&file_name).ok());
        let mime = format
            .map(|format| format.to_mime_type().to_string())
            .unwrap_or_else(|| FALLBACK_MIME.to_string());
        let dimensions = ImageReader::new(Cursor::new(&bytes))
            .with_guessed_format()
            .ok()
            .and_then(|reader| reader.into_dimensions().ok());

        Self {
            id: Uuid::new_v4(),
            file_name,
            bytes: Arc::from(bytes),
            mime,
            dimensions,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn bytes(&self) -> &Arc<[u8]> {
        &self.bytes
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.dimensions
    }

    pub fn is_image(&self) -> bool {
        self.dimensions.is_some()
    }

    /// `data:` URL carrying the whole upload, base64 encoded.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, STANDARD.encode(&self.bytes))
    }

    /// Key the UI texture cache stores this upload under.
    pub fn texture_uri(&self) -> String {
        format!("bytes://upload-{}/{}", self.id, self.file_name)
    }
}

impl fmt::Debug for UploadedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadedImage")
            .field("id", &self.id)
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .field("mime", &self.mime)
            .field("dimensions", &self.dimensions)
            .finish()
    }
}
