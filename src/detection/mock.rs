use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::detection::random::{RandomSource, ThreadRandom};
use crate::detection::Analyzer;
use crate::error::AppError;
use crate::models::{
    DetectionFeatures, DetectionResult, FeatureCheck, SerialNumberCheck, UploadedImage,
};

/// Simulated round-trip latency of the mock backend.
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(2000);

pub const GENUINE_MESSAGE: &str = "Currency note appears to be genuine.";
pub const COUNTERFEIT_MESSAGE: &str = "Analysis indicates this may be a counterfeit note.";

/// Mock detection service: suspends for a simulated latency, then fabricates
/// a verdict from random draws. Stateless beyond its configuration; no
/// caching, no retry.
pub struct MockAnalyzer {
    random: Arc<dyn RandomSource>,
    latency: Duration,
}

impl MockAnalyzer {
    pub fn new() -> Self {
        Self {
            random: Arc::new(ThreadRandom),
            latency: DEFAULT_LATENCY,
        }
    }

    pub fn with_random(mut self, random: Arc<dyn RandomSource>) -> Self {
        self.random = random;
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Fabricate a verdict. A genuine draw biases features toward detected
    /// and populates the serial number value; it does not force every
    /// feature, so the signals stay independent.
    fn draw_result(&self) -> DetectionResult {
        let r = &self.random;
        let is_genuine = r.draw() > 0.5;

        let confidence = round2(0.7 + r.draw() * 0.3);
        let watermark_conf = round2(0.65 + r.draw() * 0.35);
        let serial_conf = round2(0.6 + r.draw() * 0.4);
        let thread_conf = round2(0.7 + r.draw() * 0.3);
        let microprint_conf = round2(0.75 + r.draw() * 0.25);

        // Synthetic alphanumeric code, extracted only from genuine notes.
        let serial_value =
            is_genuine.then(|| format!("AX{}", (r.draw() * 10_000_000.0).floor() as u64));

        DetectionResult {
            is_genuine,
            confidence,
            features: Some(DetectionFeatures {
                watermark: Some(FeatureCheck {
                    detected: is_genuine || r.draw() > 0.7,
                    confidence: watermark_conf,
                }),
                serial_number: Some(SerialNumberCheck {
                    detected: r.draw() > 0.2,
                    confidence: serial_conf,
                    value: serial_value,
                }),
                security_thread: Some(FeatureCheck {
                    detected: is_genuine || r.draw() > 0.8,
                    confidence: thread_conf,
                }),
                microprinting: Some(FeatureCheck {
                    detected: if is_genuine {
                        r.draw() > 0.1
                    } else {
                        r.draw() > 0.9
                    },
                    confidence: microprint_conf,
                }),
            }),
            message: Some(
                if is_genuine {
                    GENUINE_MESSAGE
                } else {
                    COUNTERFEIT_MESSAGE
                }
                .to_string(),
            ),
        }
    }
}

impl Default for MockAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Analyzer for MockAnalyzer {
    async fn analyze(&self, image: &UploadedImage) -> Result<DetectionResult, AppError> {
        if image.is_empty() {
            return Err(AppError::Analysis("empty image payload".to_string()));
        }

        debug!(
            file_name = %image.file_name,
            size = image.len(),
            "starting mock analysis"
        );
        tokio::time::sleep(self.latency).await;

        let result = self.draw_result();
        debug!(
            is_genuine = result.is_genuine,
            confidence = result.confidence,
            "mock analysis finished"
        );
        Ok(result)
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::detection::SeededRandom;
    use crate::models::MediaType;

    /// Replays a fixed sequence of draws, cycling when exhausted.
    struct ScriptedRandom {
        values: Vec<f64>,
        next: Mutex<usize>,
    }

    impl ScriptedRandom {
        fn new(values: Vec<f64>) -> Self {
            Self {
                values,
                next: Mutex::new(0),
            }
        }
    }

    impl RandomSource for ScriptedRandom {
        fn draw(&self) -> f64 {
            let mut next = self.next.lock().unwrap();
            let value = self.values[*next % self.values.len()];
            *next += 1;
            value
        }
    }

    fn test_image() -> UploadedImage {
        UploadedImage {
            file_name: "note.png".to_string(),
            media_type: MediaType::Png,
            bytes: std::sync::Arc::from(vec![0u8; 64]),
        }
    }

    fn instant_analyzer(random: Arc<dyn RandomSource>) -> MockAnalyzer {
        MockAnalyzer::new()
            .with_random(random)
            .with_latency(Duration::ZERO)
    }

    #[tokio::test]
    async fn confidences_stay_in_bounds() {
        let analyzer = instant_analyzer(Arc::new(ThreadRandom));
        let image = test_image();
        for _ in 0..200 {
            let result = analyzer.analyze(&image).await.unwrap();
            assert!(result.confidences_in_bounds(), "{result:?}");
            assert!(result.confidence >= 0.7);
        }
    }

    #[tokio::test]
    async fn serial_value_present_iff_genuine() {
        let analyzer = instant_analyzer(Arc::new(ThreadRandom));
        let image = test_image();
        for _ in 0..200 {
            let result = analyzer.analyze(&image).await.unwrap();
            let serial = result.features.unwrap().serial_number.unwrap();
            assert_eq!(serial.value.is_some(), result.is_genuine);
            if let Some(value) = serial.value {
                assert!(value.starts_with("AX"));
                assert!(value[2..].chars().all(|c| c.is_ascii_digit()));
            }
        }
    }

    #[tokio::test]
    async fn message_is_keyed_by_verdict() {
        let genuine = instant_analyzer(Arc::new(ScriptedRandom::new(vec![0.9])));
        let result = genuine.analyze(&test_image()).await.unwrap();
        assert!(result.is_genuine);
        assert_eq!(result.message.as_deref(), Some(GENUINE_MESSAGE));

        let fake = instant_analyzer(Arc::new(ScriptedRandom::new(vec![0.1])));
        let result = fake.analyze(&test_image()).await.unwrap();
        assert!(!result.is_genuine);
        assert_eq!(result.message.as_deref(), Some(COUNTERFEIT_MESSAGE));
    }

    #[tokio::test]
    async fn genuine_forces_watermark_and_thread_detected() {
        // All draws low: a counterfeit note with every bias draw failing.
        let fake = instant_analyzer(Arc::new(ScriptedRandom::new(vec![0.0])));
        let result = fake.analyze(&test_image()).await.unwrap();
        let features = result.features.unwrap();
        assert!(!features.watermark.unwrap().detected);
        assert!(!features.security_thread.unwrap().detected);

        // Genuine draw first, then low draws: watermark and thread still hold.
        let genuine = instant_analyzer(Arc::new(ScriptedRandom::new(vec![
            0.9, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
        ])));
        let result = genuine.analyze(&test_image()).await.unwrap();
        let features = result.features.unwrap();
        assert!(features.watermark.unwrap().detected);
        assert!(features.security_thread.unwrap().detected);
        // Independent signal: microprinting may still miss on a genuine note.
        assert!(!features.microprinting.unwrap().detected);
    }

    #[tokio::test]
    async fn equal_seeds_yield_identical_results() {
        let image = test_image();
        let a = instant_analyzer(Arc::new(SeededRandom::new(7)));
        let b = instant_analyzer(Arc::new(SeededRandom::new(7)));
        let result_a = a.analyze(&image).await.unwrap();
        let result_b = b.analyze(&image).await.unwrap();
        assert_eq!(result_a, result_b);
    }

    #[tokio::test]
    async fn confidences_are_rounded_to_two_decimals() {
        let analyzer = instant_analyzer(Arc::new(ScriptedRandom::new(vec![0.123_456_789])));
        let result = analyzer.analyze(&test_image()).await.unwrap();
        let rounded = (result.confidence * 100.0).round() / 100.0;
        assert_eq!(result.confidence, rounded);
    }

    #[tokio::test]
    async fn empty_payload_is_an_analysis_error() {
        let analyzer = instant_analyzer(Arc::new(ThreadRandom));
        let image = UploadedImage {
            bytes: std::sync::Arc::from(Vec::new()),
            ..test_image()
        };
        let err = analyzer.analyze(&image).await.unwrap_err();
        assert!(matches!(err, AppError::Analysis(_)));
    }
}
