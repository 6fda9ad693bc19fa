pub mod loading_page;
pub mod results_page;
pub mod upload_page;

use std::path::PathBuf;

use iced::{Element, Task};

use crate::controller::AnalysisRequest;
use crate::gui::{AppState, Message};
use crate::models::Status;

#[derive(Debug)]
pub enum ScreenMessage<S: Screen> {
    ScreenMessage(S::Message),
    ParentMessage(S::ParentMessage),
}

// Manual impl so screens themselves need not be Clone (the upload screen
// owns a live camera stream).
impl<S: Screen> Clone for ScreenMessage<S> {
    fn clone(&self) -> Self {
        match self {
            ScreenMessage::ScreenMessage(m) => ScreenMessage::ScreenMessage(m.clone()),
            ScreenMessage::ParentMessage(m) => ScreenMessage::ParentMessage(m.clone()),
        }
    }
}

pub trait Screen: Sized {
    type Message: std::fmt::Debug + Clone + Send;
    type ParentMessage: std::fmt::Debug + Clone + Send;

    fn view<'a>(&'a self, state: &'a AppState) -> Element<'a, ScreenMessage<Self>>;
    fn update(
        &mut self,
        message: Self::Message,
        state: &mut AppState,
    ) -> Task<ScreenMessage<Self>>;
}

#[derive(Debug)]
pub enum ScreenData {
    UploadPage(upload_page::UploadPageScreen),
    LoadingPage(loading_page::LoadingPageScreen),
    ResultsPage(results_page::ResultsPageScreen),
}

impl Default for ScreenData {
    fn default() -> Self {
        ScreenData::UploadPage(upload_page::UploadPageScreen::default())
    }
}

impl ScreenData {
    /// The screen the controller's status calls for.
    pub fn for_status(status: Status) -> Self {
        match status {
            Status::Idle | Status::Uploading | Status::Error => {
                ScreenData::UploadPage(upload_page::UploadPageScreen::default())
            }
            Status::Processing => ScreenData::LoadingPage(loading_page::LoadingPageScreen),
            Status::Success => ScreenData::ResultsPage(results_page::ResultsPageScreen),
        }
    }

    /// Whether the current screen already renders the given status. Keeps
    /// screen-local state (camera, drag hint) alive across status changes
    /// that stay on the same screen.
    pub fn renders(&self, status: Status) -> bool {
        matches!(
            (self, status),
            (
                ScreenData::UploadPage(_),
                Status::Idle | Status::Uploading | Status::Error
            ) | (ScreenData::LoadingPage(_), Status::Processing)
                | (ScreenData::ResultsPage(_), Status::Success)
        )
    }

    pub fn view<'a>(&'a self, state: &'a AppState) -> Element<'a, Message> {
        match self {
            ScreenData::UploadPage(screen) => screen.view(state).map(Message::UploadPage),
            ScreenData::LoadingPage(screen) => screen.view(state).map(Message::LoadingPage),
            ScreenData::ResultsPage(screen) => screen.view(state).map(Message::ResultsPage),
        }
    }

    pub fn update(&mut self, message: Message, state: &mut AppState) -> Task<Message> {
        match (self, message) {
            (_, Message::AnalysisFinished(token, outcome)) => {
                state.controller.finish_analysis(token, outcome);
                Task::none()
            }
            (screen, Message::FileDropped(path)) => {
                // No new uploads while an analysis is outstanding.
                if matches!(screen, ScreenData::LoadingPage(_)) {
                    return Task::none();
                }
                state.controller.begin_upload();
                Task::perform(read_dropped_file(path), |outcome| {
                    Message::UploadPage(ScreenMessage::ScreenMessage(
                        upload_page::UploadPageMessage::FileRead(outcome),
                    ))
                })
            }
            (
                _,
                Message::UploadPage(ScreenMessage::ParentMessage(
                    upload_page::ParentMessage::AnalyzeRequested,
                )),
            ) => {
                let analyzer = state.analyzer.clone();
                match state.controller.begin_analysis() {
                    AnalysisRequest::Started { image, token } => Task::perform(
                        async move { analyzer.analyze(&image).await },
                        move |outcome| Message::AnalysisFinished(token, outcome),
                    ),
                    // The controller refused and already logged why.
                    AnalysisRequest::NoImage | AnalysisRequest::AlreadyRunning => Task::none(),
                }
            }
            (
                _,
                Message::ResultsPage(ScreenMessage::ParentMessage(
                    results_page::ParentMessage::ResetRequested,
                )),
            ) => {
                state.controller.reset();
                Task::none()
            }
            (ScreenData::UploadPage(screen), Message::UploadPage(ScreenMessage::ScreenMessage(msg))) => {
                screen.update(msg, state).map(Message::UploadPage)
            }
            (ScreenData::LoadingPage(screen), Message::LoadingPage(ScreenMessage::ScreenMessage(msg))) => {
                screen.update(msg, state).map(Message::LoadingPage)
            }
            (ScreenData::ResultsPage(screen), Message::ResultsPage(ScreenMessage::ScreenMessage(msg))) => {
                screen.update(msg, state).map(Message::ResultsPage)
            }
            // Message for a screen that is no longer active.
            _ => Task::none(),
        }
    }
}

async fn read_dropped_file(path: PathBuf) -> Result<(String, Vec<u8>), String> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "dropped-file".to_string());
    match tokio::fs::read(&path).await {
        Ok(bytes) => Ok((file_name, bytes)),
        Err(e) => Err(format!("Could not read {file_name}: {e}")),
    }
}
