use iced::{
    Alignment::Center,
    Element, Length, Task,
    widget::{button, column, container, image as image_widget, row, text},
};

use crate::gui::{
    AppState,
    screens::{Screen, ScreenMessage},
};
use crate::models::DetectionResult;

/// Stateless results card: verdict, overall confidence, and the per-feature
/// breakdown, read straight from the controller.
#[derive(Debug)]
pub struct ResultsPageScreen;

#[derive(Debug, Clone)]
pub enum ResultsPageMessage {
    AnalyzeAnother,
}

#[derive(Debug, Clone)]
pub enum ParentMessage {
    ResetRequested,
}

impl Screen for ResultsPageScreen {
    type Message = ResultsPageMessage;
    type ParentMessage = ParentMessage;

    fn view<'a>(&'a self, state: &'a AppState) -> Element<'a, ScreenMessage<Self>> {
        let Some(result) = state.controller.result() else {
            // Only reachable if the status flag and result drift apart.
            return container(text("No result available."))
                .center_x(Length::Fill)
                .center_y(Length::Fill)
                .into();
        };

        let verdict = if result.is_genuine {
            "Currency appears genuine"
        } else {
            "Potential counterfeit detected"
        };
        let badge = if result.is_genuine { "GENUINE" } else { "FAKE" };

        let mut content = column![
            text("Results").size(32),
            text(format!("{badge} - {verdict}")).size(20),
            text(format!(
                "Confidence: {:.0}%",
                result.confidence * 100.0
            )),
        ]
        .spacing(12)
        .align_x(Center);

        if let Some(message) = &result.message {
            content = content.push(text(message));
        }

        if let Some(image) = state.controller.image() {
            let handle = image_widget::Handle::from_bytes(image.bytes.to_vec());
            content = content.push(image_widget(handle).width(Length::Fixed(280.0)));
        }

        content = content.push(feature_analysis(result));
        content = content.push(
            button("Analyze Another").on_press(ScreenMessage::ParentMessage(
                ParentMessage::ResetRequested,
            )),
        );

        container(content.padding(20))
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into()
    }

    fn update(
        &mut self,
        message: Self::Message,
        _state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        match message {
            ResultsPageMessage::AnalyzeAnother => {
                Task::done(ScreenMessage::ParentMessage(ParentMessage::ResetRequested))
            }
        }
    }
}

fn feature_analysis(result: &DetectionResult) -> Element<'_, ScreenMessage<ResultsPageScreen>> {
    let mut rows = column![text("FEATURE ANALYSIS").size(14)].spacing(6);

    let Some(features) = &result.features else {
        return rows.push(text("No feature breakdown available.")).into();
    };

    if let Some(check) = &features.watermark {
        rows = rows.push(feature_row("Watermark", check.detected, check.confidence, None));
    }
    if let Some(check) = &features.serial_number {
        rows = rows.push(feature_row(
            "Serial Number",
            check.detected,
            check.confidence,
            check.value.as_deref(),
        ));
    }
    if let Some(check) = &features.security_thread {
        rows = rows.push(feature_row(
            "Security Thread",
            check.detected,
            check.confidence,
            None,
        ));
    }
    if let Some(check) = &features.microprinting {
        rows = rows.push(feature_row(
            "Microprinting",
            check.detected,
            check.confidence,
            None,
        ));
    }

    rows.into()
}

fn feature_row<'a>(
    name: &'a str,
    detected: bool,
    confidence: f64,
    value: Option<&'a str>,
) -> Element<'a, ScreenMessage<ResultsPageScreen>> {
    let mark = if detected { "[x]" } else { "[ ]" };
    let mut line = row![
        text(format!("{mark} {name}")),
        text(format!("{:.0}%", confidence * 100.0)),
    ]
    .spacing(20);

    if let Some(value) = value {
        line = line.push(text(value));
    }

    line.into()
}
