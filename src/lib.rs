pub mod capture;
pub mod controller;
pub mod detection;
pub mod error;
pub mod models;

pub use controller::{AnalysisRequest, Controller, RequestToken};
pub use detection::{Analyzer, MockAnalyzer, RandomSource, SeededRandom, ThreadRandom};
pub use error::AppError;
pub use models::{
    DetectionFeatures, DetectionResult, FeatureCheck, MediaType, SerialNumberCheck, Status,
    UploadedImage,
};

#[cfg(feature = "gui")]
pub mod gui;
