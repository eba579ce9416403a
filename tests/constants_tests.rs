// Host-side tests for the browser-side constants.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
fn element_ids_are_distinct() {
    let ids = [
        AUDIO_ELEMENT_ID,
        START_BUTTON_ID,
        CANVAS_ID,
        STATS_ELEMENT_ID,
        OVERLAY_ID,
        STATUS_ELEMENT_ID,
    ];
    for (i, a) in ids.iter().enumerate() {
        assert!(!a.is_empty());
        for b in &ids[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn wheel_units_are_ordered() {
    assert!(WHEEL_LINE_PX > 1.0);
    assert!(WHEEL_PAGE_PX > WHEEL_LINE_PX);
}

#[test]
fn keys_do_not_collide() {
    assert_ne!(KEY_TOGGLE_OVERLAY, KEY_STOP);
}
