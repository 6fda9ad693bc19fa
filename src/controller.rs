use tracing::{debug, info, warn};

use crate::error::AppError;
use crate::models::{DetectionResult, Status, UploadedImage};

/// Identifies one analysis request. Results arriving with a stale token
/// (after a reset or a new upload) are silently discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

/// Outcome of asking the controller to start an analysis.
#[derive(Debug)]
pub enum AnalysisRequest {
    /// Analysis may proceed: the caller drives the detection service with
    /// this image and reports back through [`Controller::finish_analysis`].
    Started {
        image: UploadedImage,
        token: RequestToken,
    },
    /// No image uploaded yet. Not a crash; a notice was recorded.
    NoImage,
    /// An analysis is already outstanding. At most one runs at a time.
    AlreadyRunning,
}

/// Page-level state machine driving which view renders.
///
/// Owns the uploaded image, the latest result, and the status flag. Single
/// writer: views never mutate state, they send operations here.
#[derive(Debug, Default)]
pub struct Controller {
    status: Status,
    image: Option<UploadedImage>,
    result: Option<DetectionResult>,
    notice: Option<String>,
    next_token: u64,
    outstanding: Option<RequestToken>,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn image(&self) -> Option<&UploadedImage> {
        self.image.as_ref()
    }

    pub fn result(&self) -> Option<&DetectionResult> {
        self.result.as_ref()
    }

    /// Transient user-visible notice, if any.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Mark a file dialog or read as in flight.
    pub fn begin_upload(&mut self) {
        if self.status != Status::Processing {
            self.status = Status::Uploading;
        }
    }

    /// The in-flight upload was cancelled; fall back to idle.
    pub fn upload_cancelled(&mut self) {
        if self.status == Status::Uploading {
            self.status = Status::Idle;
        }
    }

    /// Store a freshly captured image. Any prior result is cleared and any
    /// outstanding analysis is invalidated; its late result will be dropped.
    pub fn upload_image(&mut self, image: UploadedImage) {
        info!(file_name = %image.file_name, size = image.len(), "image uploaded");
        self.image = Some(image);
        self.result = None;
        self.notice = None;
        self.outstanding = None;
        self.status = Status::Idle;
    }

    /// Record a failed upload. The previously held image and result are
    /// untouched; only a notice is surfaced.
    pub fn upload_failed(&mut self, notice: impl Into<String>) {
        let notice = notice.into();
        warn!(%notice, "upload rejected");
        self.notice = Some(notice);
        if self.status == Status::Uploading {
            self.status = Status::Idle;
        }
    }

    /// Try to start an analysis. Refuses re-entry while one is outstanding
    /// and warns (without any state transition) when no image is present.
    pub fn begin_analysis(&mut self) -> AnalysisRequest {
        if self.status == Status::Processing {
            warn!("analysis already in progress, ignoring request");
            return AnalysisRequest::AlreadyRunning;
        }
        let Some(image) = self.image.clone() else {
            warn!("analysis requested with no image uploaded");
            self.notice = Some("Please upload an image first".to_string());
            return AnalysisRequest::NoImage;
        };

        self.next_token += 1;
        let token = RequestToken(self.next_token);
        self.outstanding = Some(token);
        self.result = None;
        self.notice = None;
        self.status = Status::Processing;
        debug!(token = token.0, "analysis started");
        AnalysisRequest::Started { image, token }
    }

    /// Apply a finished analysis. Ignored unless `token` matches the
    /// outstanding request, so late results from before a reset or re-upload
    /// cannot clobber newer state.
    pub fn finish_analysis(
        &mut self,
        token: RequestToken,
        outcome: Result<DetectionResult, AppError>,
    ) {
        if self.outstanding != Some(token) {
            debug!(token = token.0, "discarding stale analysis result");
            return;
        }
        self.outstanding = None;

        match outcome {
            Ok(result) => {
                debug!(token = token.0, is_genuine = result.is_genuine, "analysis succeeded");
                self.result = Some(result);
                self.status = Status::Success;
            }
            Err(err) => {
                warn!(token = token.0, error = %err, "analysis failed");
                self.notice = Some(format!("Analysis failed: {err}. Please try again."));
                self.status = Status::Error;
            }
        }
    }

    /// Clear everything and return to idle.
    pub fn reset(&mut self) {
        info!("controller reset");
        self.image = None;
        self.result = None;
        self.notice = None;
        self.outstanding = None;
        self.status = Status::Idle;
    }
}
