mod common;

use common::*;
use doorwin::DisplayBox;
use doorwin::view::{self, MAX_DISPLAY_SIDE, MIN_DISPLAY_SIDE, Size, ZoomDirection};

#[test]
fn test_fit_scale_scenario() {
    let scale = view::scale_factor(Size::new(800, 600), Size::new(400, 300));
    assert_eq!(scale, 0.5);

    let shown = view::to_display(&door(100, 100, 200, 200, 0.9), scale);
    assert_eq!(
        shown,
        DisplayBox {
            x1: 50,
            y1: 50,
            x2: 100,
            y2: 100
        }
    );
}

#[test]
fn test_scale_uses_tighter_axis() {
    // width ratio 2.0, height ratio 0.5
    let scale = view::scale_factor(Size::new(100, 400), Size::new(200, 200));
    assert_eq!(scale, 0.5);
}

#[test]
fn test_zero_viewport_does_not_scale() {
    assert_eq!(view::scale_factor(Size::new(800, 600), Size::new(0, 0)), 1.0);
    assert_eq!(view::scale_factor(Size::new(800, 600), Size::new(0, 300)), 1.0);
    assert_eq!(view::scale_factor(Size::new(800, 600), Size::new(400, 0)), 1.0);
    assert_eq!(view::scale_factor(Size::new(0, 0), Size::new(400, 300)), 1.0);
}

#[test]
fn test_display_truncates_toward_zero() {
    let shown = view::to_display(&door(3, 5, 7, 9, 0.5), 0.5);
    assert_eq!(
        shown,
        DisplayBox {
            x1: 1,
            y1: 2,
            x2: 3,
            y2: 4
        }
    );
}

#[test]
fn test_scaling_is_approximately_invertible() {
    let original = window(123, 457, 789, 1011, 0.7);

    for scale in [0.25_f32, 0.5, 0.9, 1.1, 2.0, 3.3] {
        let there = view::to_display(&original, scale);
        let back_x1 = (there.x1 as f32 / scale) as i32;
        let back_y1 = (there.y1 as f32 / scale) as i32;
        let back_x2 = (there.x2 as f32 / scale) as i32;
        let back_y2 = (there.y2 as f32 / scale) as i32;

        // at most one display pixel is lost to truncation
        let tolerance = (1.0 / scale).ceil() as i32;
        assert!((back_x1 - original.x1).abs() <= tolerance, "scale {scale}");
        assert!((back_y1 - original.y1).abs() <= tolerance, "scale {scale}");
        assert!((back_x2 - original.x2).abs() <= tolerance, "scale {scale}");
        assert!((back_y2 - original.y2).abs() <= tolerance, "scale {scale}");
    }
}

#[test]
fn test_zoom_steps() {
    let image = Size::new(800, 600);
    assert!((view::zoom(1.0, ZoomDirection::In, image) - 1.1).abs() < 1e-6);
    assert!((view::zoom(1.0, ZoomDirection::Out, image) - 0.9).abs() < 1e-6);
    assert!((view::zoom(0.5, ZoomDirection::In, image) - 0.55).abs() < 1e-6);
}

#[test]
fn test_repeated_zoom_in_keeps_canvas_bounded() {
    let image = Size::new(4032, 3024);
    let mut scale = view::scale_factor(image, Size::new(720, 600));

    for _ in 0..200 {
        scale = view::zoom(scale, ZoomDirection::In, image);
    }

    let canvas = view::display_size(image, scale);
    assert!(canvas.longest_side() <= MAX_DISPLAY_SIDE, "{canvas:?}");
    assert!(canvas.longest_side() >= MAX_DISPLAY_SIDE - 1, "{canvas:?}");
    let rgba_bytes = canvas.width as u64 * canvas.height as u64 * 4;
    assert!(rgba_bytes < 1 << 30, "{rgba_bytes}");
}

#[test]
fn test_repeated_zoom_out_keeps_canvas_visible() {
    let image = Size::new(4032, 3024);
    let mut scale = view::scale_factor(image, Size::new(720, 600));

    for _ in 0..400 {
        scale = view::zoom(scale, ZoomDirection::Out, image);
    }

    assert!(scale > 0.0);
    let canvas = view::display_size(image, scale);
    assert!(canvas.longest_side() >= MIN_DISPLAY_SIDE - 1, "{canvas:?}");
    assert!(canvas.longest_side() <= MIN_DISPLAY_SIDE, "{canvas:?}");
}

#[test]
fn test_zoom_out_never_enlarges_huge_image() {
    // fit scale is about 0.036
    let image = Size::new(20000, 15000);
    let fit = view::scale_factor(image, Size::new(720, 600));

    let out = view::zoom(fit, ZoomDirection::Out, image);
    assert!(out < fit);
    assert!((out - fit * 0.9).abs() < 1e-6);
}

#[test]
fn test_zoom_never_moves_backwards_outside_bounds() {
    // 8 px image shown at 1.0 is already below the minimum canvas size
    let tiny = Size::new(8, 8);
    assert_eq!(view::zoom(1.0, ZoomDirection::Out, tiny), 1.0);
    assert!(view::zoom(1.0, ZoomDirection::In, tiny) > 1.0);

    let (lo, hi) = view::scale_bounds(Size::new(1000, 500));
    assert!((lo - 0.016).abs() < 1e-6);
    assert!((hi - 8.192).abs() < 1e-6);
}

#[test]
fn test_display_size() {
    assert_eq!(view::display_size(Size::new(800, 600), 0.5), Size::new(400, 300));
    assert_eq!(view::display_size(Size::new(3, 3), 0.05), Size::new(1, 1));
}

#[test]
fn test_wheel_direction() {
    assert_eq!(view::wheel_zoom(1.0), Some(ZoomDirection::In));
    assert_eq!(view::wheel_zoom(-0.5), Some(ZoomDirection::Out));
    assert_eq!(view::wheel_zoom(0.0), None);
}
