use crate::models::DetectionBox;

/// IoU above which two same-class boxes from one pass are considered duplicates
pub const DEFAULT_IOU_THRESHOLD: f32 = 0.7;

/// Class-aware non-maximum suppression within a single inference pass.
///
/// Returns the survivors ordered by descending confidence.
pub fn non_max_suppression(mut boxes: Vec<DetectionBox>, iou_threshold: f32) -> Vec<DetectionBox> {
    boxes.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

    let mut kept: Vec<DetectionBox> = Vec::with_capacity(boxes.len());
    for candidate in boxes {
        let suppressed = kept
            .iter()
            .any(|k| k.class == candidate.class && k.iou(&candidate) > iou_threshold);
        if !suppressed {
            kept.push(candidate);
        }
    }

    kept
}
