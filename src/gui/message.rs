use std::path::PathBuf;

use crate::controller::RequestToken;
use crate::error::AppError;
use crate::gui::screens::{
    ScreenMessage, loading_page::LoadingPageScreen, results_page::ResultsPageScreen,
    upload_page::UploadPageScreen,
};
use crate::models::DetectionResult;

#[derive(Debug, Clone)]
pub enum Message {
    UploadPage(ScreenMessage<UploadPageScreen>),
    LoadingPage(ScreenMessage<LoadingPageScreen>),
    ResultsPage(ScreenMessage<ResultsPageScreen>),
    /// A file was dropped onto the window.
    FileDropped(PathBuf),
    /// The detection service resolved for the given request.
    AnalysisFinished(RequestToken, Result<DetectionResult, AppError>),
}
