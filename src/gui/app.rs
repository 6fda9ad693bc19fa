use iced::{Element, Subscription, Task, Theme};

use crate::gui::screens::ScreenData;
use crate::gui::{AppState, Message};

/// Top-level iced application. The controller decides which screen renders;
/// `sync_screen` keeps the active screen in step with its status after every
/// update, which also tears down screen-local resources (the camera stream)
/// when a screen is replaced.
pub struct NoteCheckApp {
    state: AppState,
    screen: ScreenData,
}

impl NoteCheckApp {
    fn new() -> (Self, Task<Message>) {
        (
            Self {
                state: AppState::default(),
                screen: ScreenData::default(),
            },
            Task::none(),
        )
    }

    fn title(&self) -> String {
        "NoteCheck - Fake Currency Detection".to_string()
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        let task = self.screen.update(message, &mut self.state);
        self.sync_screen();
        task
    }

    fn view(&self) -> Element<'_, Message> {
        self.screen.view(&self.state)
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn subscription(&self) -> Subscription<Message> {
        iced::event::listen_with(|event, _status, _window| match event {
            iced::Event::Window(iced::window::Event::FileDropped(path)) => {
                Some(Message::FileDropped(path))
            }
            _ => None,
        })
    }

    fn sync_screen(&mut self) {
        let status = self.state.controller.status();
        if !self.screen.renders(status) {
            self.screen = ScreenData::for_status(status);
        }
    }
}

pub fn run() -> iced::Result {
    iced::application(NoteCheckApp::new, NoteCheckApp::update, NoteCheckApp::view)
        .title(NoteCheckApp::title)
        .theme(NoteCheckApp::theme)
        .subscription(NoteCheckApp::subscription)
        .run()
}
