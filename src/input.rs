// Pointer/wheel bookkeeping for the orbit camera. No web-sys here: the event
// handlers translate DOM events into these calls, and host tests include this
// file directly.

use crate::constants::{KEY_STOP, KEY_TOGGLE_OVERLAY, WHEEL_LINE_PX, WHEEL_PAGE_PX};

#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct DragState {
    pub active: bool,
    pub pointer_id: i32,
    pub last_x: f32,
    pub last_y: f32,
}

impl DragState {
    pub fn begin(&mut self, pointer_id: i32, x: f32, y: f32) {
        self.active = true;
        self.pointer_id = pointer_id;
        self.last_x = x;
        self.last_y = y;
    }

    /// Pixel delta since the previous move of the same pointer.
    pub fn moved_to(&mut self, pointer_id: i32, x: f32, y: f32) -> Option<(f32, f32)> {
        if !self.active || pointer_id != self.pointer_id {
            return None;
        }
        let delta = (x - self.last_x, y - self.last_y);
        self.last_x = x;
        self.last_y = y;
        Some(delta)
    }

    pub fn end(&mut self, pointer_id: i32) -> bool {
        if self.active && pointer_id == self.pointer_id {
            self.active = false;
            return true;
        }
        false
    }
}

/// WheelEvent.deltaMode values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WheelMode {
    Pixel,
    Line,
    Page,
}

impl WheelMode {
    pub fn from_dom(mode: u32) -> Self {
        match mode {
            1 => WheelMode::Line,
            2 => WheelMode::Page,
            _ => WheelMode::Pixel,
        }
    }
}

/// Wheel delta in pixels; only the sign matters to the dolly step.
#[inline]
pub fn wheel_delta_px(delta_y: f64, mode: WheelMode) -> f32 {
    let d = delta_y as f32;
    match mode {
        WheelMode::Pixel => d,
        WheelMode::Line => d * WHEEL_LINE_PX,
        WheelMode::Page => d * WHEEL_PAGE_PX,
    }
}

/// Canvas backing size for a CSS size and device pixel ratio; the ratio is
/// capped and both sides stay at least one pixel.
#[inline]
pub fn backing_size(css_w: f64, css_h: f64, dpr: f64, max_ratio: f64) -> (u32, u32) {
    let ratio = if dpr.is_finite() && dpr > 0.0 {
        dpr.min(max_ratio)
    } else {
        1.0
    };
    let w = (css_w.max(0.0) * ratio) as u32;
    let h = (css_h.max(0.0) * ratio) as u32;
    (w.max(1), h.max(1))
}

/// Global keyboard shortcuts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    ToggleOverlay,
    Stop,
}

#[inline]
pub fn key_action(key: &str) -> Option<KeyAction> {
    if key.eq_ignore_ascii_case(KEY_TOGGLE_OVERLAY) {
        Some(KeyAction::ToggleOverlay)
    } else if key == KEY_STOP {
        Some(KeyAction::Stop)
    } else {
        None
    }
}
