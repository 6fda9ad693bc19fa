pub mod camera;

use std::path::Path;
use std::sync::Arc;

use image::ImageFormat;
use tracing::info;

use crate::error::AppError;
use crate::models::{MediaType, UploadedImage};

pub use camera::{CameraDevice, CameraStream, SyntheticCamera};

/// Upload size ceiling. Payloads at or above this are rejected.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Normalize a raw payload from any input channel (file picker, drag-drop,
/// camera snapshot) into an [`UploadedImage`].
///
/// The media type is sniffed from the payload, not taken from the file
/// extension. Rejections are non-fatal and leave the caller's state
/// unchanged.
pub fn accept_upload(file_name: &str, bytes: Vec<u8>) -> Result<UploadedImage, AppError> {
    if bytes.len() >= MAX_UPLOAD_BYTES {
        return Err(AppError::FileTooLarge { size: bytes.len() });
    }

    let media_type = sniff_media_type(&bytes)?;
    info!(
        file_name,
        size = bytes.len(),
        mime = media_type.mime(),
        "accepted upload"
    );

    Ok(UploadedImage {
        file_name: file_name.to_string(),
        media_type,
        bytes: Arc::from(bytes),
    })
}

/// Read a file from disk and run it through the same validation as any other
/// upload channel. Used by the CLI and by drag-and-drop.
pub async fn accept_upload_path(path: &Path) -> Result<UploadedImage, AppError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| AppError::InvalidFileType {
            found: format!("unreadable file: {e}"),
        })?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());
    accept_upload(&file_name, bytes)
}

fn sniff_media_type(bytes: &[u8]) -> Result<MediaType, AppError> {
    match image::guess_format(bytes) {
        Ok(ImageFormat::Jpeg) => Ok(MediaType::Jpeg),
        Ok(ImageFormat::Png) => Ok(MediaType::Png),
        Ok(ImageFormat::WebP) => Ok(MediaType::Webp),
        Ok(other) => Err(AppError::InvalidFileType {
            found: format!("{other:?}"),
        }),
        Err(_) => Err(AppError::InvalidFileType {
            found: "unrecognized data".to_string(),
        }),
    }
}
