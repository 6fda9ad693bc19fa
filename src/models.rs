use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};

/// Outcome of a single currency analysis.
///
/// Serializes to the camelCase JSON shape a production detection backend
/// would return, so the mock service and a real one stay interchangeable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionResult {
    pub is_genuine: bool,
    /// Overall certainty, in [0, 1].
    pub confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<DetectionFeatures>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Per-feature security check signals. Features are independent signals,
/// not a strict AND: a genuine verdict does not force every `detected`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionFeatures {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watermark: Option<FeatureCheck>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<SerialNumberCheck>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_thread: Option<FeatureCheck>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub microprinting: Option<FeatureCheck>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureCheck {
    pub detected: bool,
    pub confidence: f64,
}

/// Serial number check; `value` carries the extracted code when one was read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerialNumberCheck {
    pub detected: bool,
    pub confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl DetectionResult {
    /// True when the overall confidence and every present feature confidence
    /// lie in [0, 1].
    pub fn confidences_in_bounds(&self) -> bool {
        let in_bounds = |c: f64| (0.0..=1.0).contains(&c);
        if !in_bounds(self.confidence) {
            return false;
        }
        let Some(features) = &self.features else {
            return true;
        };
        features
            .watermark
            .iter()
            .chain(&features.security_thread)
            .chain(&features.microprinting)
            .all(|f| in_bounds(f.confidence))
            && features
                .serial_number
                .as_ref()
                .is_none_or(|s| in_bounds(s.confidence))
    }
}

/// Media types accepted for upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Jpeg,
    Png,
    Webp,
}

impl MediaType {
    pub fn mime(&self) -> &'static str {
        match self {
            MediaType::Jpeg => "image/jpeg",
            MediaType::Png => "image/png",
            MediaType::Webp => "image/webp",
        }
    }
}

/// An image collected from the file picker, drag-and-drop, or a camera
/// snapshot. Held by the controller until reset or replaced; never persisted.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub file_name: String,
    pub media_type: MediaType,
    /// Raw encoded payload, shared cheaply between the controller and the
    /// analysis call.
    pub bytes: Arc<[u8]>,
}

impl UploadedImage {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Renderable preview of the payload as a data URI.
    pub fn preview_data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.media_type.mime(),
            BASE64.encode(&self.bytes)
        )
    }
}

/// Phase of the upload/analyze/result lifecycle. Written only by the
/// controller; views read it to decide what to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    Uploading,
    Processing,
    Success,
    Error,
}
