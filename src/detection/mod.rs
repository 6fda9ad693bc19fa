pub mod mock;
pub mod random;

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::{DetectionResult, UploadedImage};

pub use mock::MockAnalyzer;
pub use random::{RandomSource, SeededRandom, ThreadRandom};

/// Contract of the detection service: image in, verdict out, may fail.
///
/// The mock implementation draws random outcomes; a production backend would
/// implement this with an HTTP/RPC call carrying the image payload and
/// returning the same [`DetectionResult`] shape, without changing callers.
#[async_trait]
pub trait Analyzer: Send + Sync {
    async fn analyze(&self, image: &UploadedImage) -> Result<DetectionResult, AppError>;
}
