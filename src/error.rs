use thiserror::Error;

/// Errors surfaced to the user as transient notices.
///
/// Every variant is recovered at the point of occurrence; none is fatal and
/// none is retried automatically. The user re-triggers the action instead.
#[derive(Error, Debug, Clone)]
pub enum AppError {
    #[error("unsupported image type ({found}): please upload a JPEG, PNG, or WebP image")]
    InvalidFileType { found: String },
    #[error("file is too large ({size} bytes): please upload an image smaller than 10 MiB")]
    FileTooLarge { size: usize },
    #[error("could not access camera: {0}")]
    CameraAccessDenied(String),
    #[error("failed to analyze currency: {0}")]
    Analysis(String),
}
