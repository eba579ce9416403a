// Host-side tests for pure input functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod input {
    include!("../src/input.rs");
}

use input::*;

#[test]
fn drag_reports_deltas_for_its_pointer() {
    let mut drag = DragState::default();
    assert_eq!(drag.moved_to(1, 5.0, 5.0), None);

    drag.begin(1, 10.0, 20.0);
    assert_eq!(drag.moved_to(1, 15.0, 18.0), Some((5.0, -2.0)));
    assert_eq!(drag.moved_to(1, 15.0, 18.0), Some((0.0, 0.0)));
    assert_eq!(drag.moved_to(2, 50.0, 50.0), None);

    assert!(!drag.end(2));
    assert!(drag.active);
    assert!(drag.end(1));
    assert_eq!(drag.moved_to(1, 0.0, 0.0), None);
}

#[test]
fn wheel_modes_convert_to_pixels() {
    assert_eq!(WheelMode::from_dom(0), WheelMode::Pixel);
    assert_eq!(WheelMode::from_dom(1), WheelMode::Line);
    assert_eq!(WheelMode::from_dom(2), WheelMode::Page);
    assert_eq!(WheelMode::from_dom(9), WheelMode::Pixel);

    assert_eq!(wheel_delta_px(-3.0, WheelMode::Pixel), -3.0);
    assert_eq!(wheel_delta_px(3.0, WheelMode::Line), 48.0);
    assert_eq!(wheel_delta_px(-1.0, WheelMode::Page), -800.0);
}

#[test]
fn backing_size_caps_pixel_ratio() {
    assert_eq!(backing_size(800.0, 600.0, 1.0, 2.0), (800, 600));
    assert_eq!(backing_size(800.0, 600.0, 3.0, 2.0), (1600, 1200));
    assert_eq!(backing_size(100.0, 50.0, 1.5, 2.0), (150, 75));
}

#[test]
fn backing_size_survives_bad_input() {
    assert_eq!(backing_size(0.0, 0.0, 1.0, 2.0), (1, 1));
    assert_eq!(backing_size(-10.0, 20.0, 1.0, 2.0), (1, 20));
    assert_eq!(backing_size(100.0, 100.0, f64::NAN, 2.0), (100, 100));
    assert_eq!(backing_size(100.0, 100.0, 0.0, 2.0), (100, 100));
}

#[test]
fn keys_map_to_actions() {
    assert_eq!(key_action("h"), Some(KeyAction::ToggleOverlay));
    assert_eq!(key_action("H"), Some(KeyAction::ToggleOverlay));
    assert_eq!(key_action("Escape"), Some(KeyAction::Stop));
    assert_eq!(key_action("escape"), None);
    assert_eq!(key_action(" "), None);
}
