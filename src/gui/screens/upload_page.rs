use iced::{
    Alignment::Center,
    Element, Length, Task,
    widget::{button, column, container, image as image_widget, row, text},
};
use rfd::AsyncFileDialog;

use crate::capture::{self, CameraStream, SyntheticCamera};
use crate::gui::{
    AppState,
    screens::{Screen, ScreenMessage},
};

/// Upload screen: file picker, drag-and-drop hint, camera snapshot, preview,
/// and the Analyze action. All durable state lives in the controller; only
/// the live camera stream is screen-local so teardown drops it.
#[derive(Debug, Default)]
pub struct UploadPageScreen {
    camera: Option<CameraStream<SyntheticCamera>>,
}

#[derive(Debug, Clone)]
pub enum UploadPageMessage {
    ChooseFile,
    DialogCancelled,
    FileRead(Result<(String, Vec<u8>), String>),
    OpenCamera,
    CancelCamera,
    Capture,
    ClearImage,
    Analyze,
    DismissNotice,
}

#[derive(Debug, Clone)]
pub enum ParentMessage {
    AnalyzeRequested,
}

impl Screen for UploadPageScreen {
    type Message = UploadPageMessage;
    type ParentMessage = ParentMessage;

    fn view<'a>(&'a self, state: &'a AppState) -> Element<'a, ScreenMessage<Self>> {
        let heading = column![
            text("Fake Currency Detection").size(32),
            text("Upload an image of a currency note to check its authenticity."),
        ]
        .spacing(8)
        .align_x(Center);

        let body: Element<'_, ScreenMessage<Self>> = if self.camera.is_some() {
            column![
                text("Camera active").size(20),
                text("Hold the note steady inside the frame."),
                row![
                    button("Capture")
                        .on_press(ScreenMessage::ScreenMessage(UploadPageMessage::Capture)),
                    button("Cancel")
                        .on_press(ScreenMessage::ScreenMessage(UploadPageMessage::CancelCamera)),
                ]
                .spacing(20),
            ]
            .spacing(20)
            .align_x(Center)
            .into()
        } else if let Some(image) = state.controller.image() {
            let handle = image_widget::Handle::from_bytes(image.bytes.to_vec());
            column![
                image_widget(handle).width(Length::Fixed(360.0)),
                text(&image.file_name),
                row![
                    button("Analyze Currency")
                        .on_press(ScreenMessage::ScreenMessage(UploadPageMessage::Analyze)),
                    button("Clear")
                        .on_press(ScreenMessage::ScreenMessage(UploadPageMessage::ClearImage)),
                ]
                .spacing(20),
            ]
            .spacing(20)
            .align_x(Center)
            .into()
        } else {
            column![
                text("Upload Currency Image").size(20),
                text("Drag & drop an image here, choose a file, or take a photo."),
                text("JPEG, PNG, or WebP, smaller than 10 MiB."),
                row![
                    button("Choose File")
                        .on_press(ScreenMessage::ScreenMessage(UploadPageMessage::ChooseFile)),
                    button("Camera")
                        .on_press(ScreenMessage::ScreenMessage(UploadPageMessage::OpenCamera)),
                ]
                .spacing(20),
            ]
            .spacing(20)
            .align_x(Center)
            .into()
        };

        let mut content = column![heading, body].spacing(30).padding(20).align_x(Center);

        if let Some(notice) = state.controller.notice() {
            content = content.push(
                row![
                    text(notice),
                    button("Dismiss")
                        .on_press(ScreenMessage::ScreenMessage(UploadPageMessage::DismissNotice)),
                ]
                .spacing(20)
                .align_y(Center),
            );
        }

        container(content)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into()
    }

    fn update(
        &mut self,
        message: Self::Message,
        state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        match message {
            UploadPageMessage::ChooseFile => {
                state.controller.begin_upload();
                Task::perform(
                    async {
                        let handle = AsyncFileDialog::new()
                            .set_title("Choose a currency note image")
                            .add_filter("Images", &["jpg", "jpeg", "png", "webp"])
                            .pick_file()
                            .await;
                        match handle {
                            Some(file) => Some((file.file_name(), file.read().await)),
                            None => None,
                        }
                    },
                    |picked| match picked {
                        Some((name, bytes)) => ScreenMessage::ScreenMessage(
                            UploadPageMessage::FileRead(Ok((name, bytes))),
                        ),
                        None => {
                            ScreenMessage::ScreenMessage(UploadPageMessage::DialogCancelled)
                        }
                    },
                )
            }
            UploadPageMessage::DialogCancelled => {
                state.controller.upload_cancelled();
                Task::none()
            }
            UploadPageMessage::FileRead(Ok((name, bytes))) => {
                match capture::accept_upload(&name, bytes) {
                    Ok(image) => state.controller.upload_image(image),
                    Err(err) => state.controller.upload_failed(err.to_string()),
                }
                Task::none()
            }
            UploadPageMessage::FileRead(Err(notice)) => {
                state.controller.upload_failed(notice);
                Task::none()
            }
            UploadPageMessage::OpenCamera => {
                match CameraStream::acquire(SyntheticCamera::new()) {
                    Ok(stream) => self.camera = Some(stream),
                    Err(err) => state.controller.upload_failed(err.to_string()),
                }
                Task::none()
            }
            UploadPageMessage::CancelCamera => {
                if let Some(stream) = self.camera.take() {
                    stream.cancel();
                }
                Task::none()
            }
            UploadPageMessage::Capture => {
                if let Some(stream) = self.camera.take() {
                    match stream.snapshot() {
                        Ok(image) => state.controller.upload_image(image),
                        Err(err) => state.controller.upload_failed(err.to_string()),
                    }
                }
                Task::none()
            }
            UploadPageMessage::ClearImage => {
                state.controller.reset();
                Task::none()
            }
            UploadPageMessage::Analyze => {
                Task::done(ScreenMessage::ParentMessage(ParentMessage::AnalyzeRequested))
            }
            UploadPageMessage::DismissNotice => {
                state.controller.dismiss_notice();
                Task::none()
            }
        }
    }
}
