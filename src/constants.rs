// DOM contract and browser-side tuning.
// Kept free of web-sys types so host tests can `include!` this file.

// Element ids
pub const AUDIO_ELEMENT_ID: &str = "audio";
pub const START_BUTTON_ID: &str = "start-button";
pub const CANVAS_ID: &str = "app-canvas";
pub const STATS_ELEMENT_ID: &str = "stats";
pub const OVERLAY_ID: &str = "start-overlay";
pub const STATUS_ELEMENT_ID: &str = "status";

// CSS class toggled on the overlay
pub const HIDDEN_CLASS: &str = "hidden";

// Wheel deltas arrive in pixels, lines or pages depending on the device.
pub const WHEEL_LINE_PX: f32 = 16.0;
pub const WHEEL_PAGE_PX: f32 = 800.0;

// Keyboard
pub const KEY_TOGGLE_OVERLAY: &str = "h";
pub const KEY_STOP: &str = "Escape";
