//! Upload validation and camera stream lifecycle tests.

mod common;

use notecheck::capture::{self, CameraStream, MAX_UPLOAD_BYTES, SyntheticCamera};
use notecheck::error::AppError;
use notecheck::models::MediaType;

use common::*;

#[test]
fn valid_png_is_accepted() {
    let image = capture::accept_upload("note.png", png_bytes(32, 32)).unwrap();
    assert_eq!(image.media_type, MediaType::Png);
    assert!(!image.is_empty());
}

#[test]
fn gif_is_rejected_as_invalid_file_type() {
    let err = capture::accept_upload("anim.gif", gif_bytes()).unwrap_err();
    assert!(matches!(err, AppError::InvalidFileType { .. }));
}

#[test]
fn payload_at_ceiling_is_rejected_as_too_large() {
    let bytes = oversized_png_bytes();
    assert_eq!(bytes.len(), MAX_UPLOAD_BYTES);
    let err = capture::accept_upload("huge.png", bytes).unwrap_err();
    assert!(matches!(err, AppError::FileTooLarge { .. }));
}

#[tokio::test]
async fn upload_from_path_goes_through_validation() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let path = dir.path().join("note.png");
    tokio::fs::write(&path, png_bytes(16, 16)).await?;

    let image = capture::accept_upload_path(&path).await?;
    assert_eq!(image.media_type, MediaType::Png);
    assert_eq!(image.file_name, "note.png");

    Ok(())
}

#[tokio::test]
async fn missing_path_is_rejected_not_fatal() {
    let err = capture::accept_upload_path(std::path::Path::new("/does/not/exist.png"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidFileType { .. }));
}

#[test]
fn camera_snapshot_is_a_valid_jpeg_upload() {
    let stream = CameraStream::acquire(SyntheticCamera::new()).unwrap();
    let image = stream.snapshot().unwrap();

    assert_eq!(image.media_type, MediaType::Jpeg);
    assert_eq!(image.file_name, "camera-capture.jpg");
    assert!(image.len() < MAX_UPLOAD_BYTES);
    assert!(image.preview_data_uri().starts_with("data:image/jpeg;base64,"));
}
