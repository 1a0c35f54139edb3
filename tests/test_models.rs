mod common;

use common::*;

#[test]
fn test_class_ids_map_to_names() {
    assert_eq!(DetectionClass::from_id(0), Some(DetectionClass::Door));
    assert_eq!(DetectionClass::from_id(1), Some(DetectionClass::Window));
    assert_eq!(DetectionClass::from_id(0).map(|c| c.name()), Some("door"));
    assert_eq!(DetectionClass::from_id(1).map(|c| c.name()), Some("window"));
}

#[test]
fn test_unknown_class_id_is_rejected() {
    assert_eq!(DetectionClass::from_id(2), None);
    assert_eq!(DetectionClass::from_id(usize::MAX), None);
}

#[test]
fn test_class_name_round_trip() {
    for class in [DetectionClass::Door, DetectionClass::Window] {
        assert_eq!(DetectionClass::from_name(class.name()), Some(class));
        assert_eq!(DetectionClass::from_id(class.id()), Some(class));
    }
    assert_eq!(DetectionClass::from_name("roof"), None);
}

#[test]
fn test_degenerate_boxes_are_rejected() {
    assert!(DetectionBox::new(10, 10, 10, 20, 0.5, DetectionClass::Door).is_none());
    assert!(DetectionBox::new(10, 20, 30, 20, 0.5, DetectionClass::Door).is_none());
    assert!(DetectionBox::new(30, 10, 10, 20, 0.5, DetectionClass::Door).is_none());
    assert!(DetectionBox::new(10, 10, 11, 11, 0.5, DetectionClass::Door).is_some());
}

#[test]
fn test_confidence_is_clamped() {
    let b = DetectionBox::new(0, 0, 5, 5, 1.7, DetectionClass::Window).unwrap();
    assert_eq!(b.confidence, 1.0);
    let b = DetectionBox::new(0, 0, 5, 5, -0.2, DetectionClass::Window).unwrap();
    assert_eq!(b.confidence, 0.0);
}

#[test]
fn test_label_and_coordinate_line() {
    let b = door(12, 34, 56, 78, 0.876);
    assert_eq!(b.label(), "door 0.88");
    assert_eq!(b.coordinate_line(), "x1:12 y1:34 x2:56 y2:78 door");

    let w = window(1, 2, 3, 4, 0.5);
    assert_eq!(w.label(), "window 0.50");
    assert_eq!(w.coordinate_line(), "x1:1 y1:2 x2:3 y2:4 window");
}

#[test]
fn test_iou() {
    let a = door(0, 0, 10, 10, 0.9);
    assert!((a.iou(&a) - 1.0).abs() < 1e-6);

    let b = door(5, 0, 15, 10, 0.9);
    // overlap 50, union 150
    assert!((a.iou(&b) - 1.0 / 3.0).abs() < 1e-6);

    let c = door(20, 20, 30, 30, 0.9);
    assert_eq!(a.iou(&c), 0.0);
}
