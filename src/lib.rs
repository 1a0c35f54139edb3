pub mod annotate;
pub mod config;
pub mod detection;
pub mod error;
pub mod models;
pub mod persist;
pub mod placement;
pub mod session;
pub mod view;

pub use config::AppConfig;
pub use detection::{CONFIDENCE_THRESHOLDS, Detector, MultiThresholdDetector, YoloDetector};
pub use error::{DetectError, DetectResult};
pub use models::{DetectionBox, DetectionClass, DisplayBox};
pub use persist::{ResultPersister, SavedResults};
pub use placement::PlacementBoard;
pub use session::{DetectionSession, SaveOutcome};

#[cfg(feature = "gui")]
pub mod gui;
