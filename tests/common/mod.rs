mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from doorwin for tests
pub use doorwin::{
    DetectError, DetectResult, DetectionBox, DetectionClass, DetectionSession, Detector,
    MultiThresholdDetector, ResultPersister, SaveOutcome,
};
