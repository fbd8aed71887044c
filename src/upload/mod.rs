pub mod image_upload;
pub mod source;

pub use image_upload::UploadedImage;
pub use source::{DroppedBytes, FileSource, UploadSource};
