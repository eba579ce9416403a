// Shared visual/audio tuning constants used by both web and native frontends.

// Grid sizing
pub const DEFAULT_GRID_DIMENSION: u32 = 256;
pub const GRID_PERF_WARN_DIMENSION: u32 = 512; // above this, warn about frame rate
pub const MAX_GRID_DIMENSION: u32 = 1024; // soft cap, larger requests are clamped

// World-space layout
pub const CELL_SPACING_DIVISOR: f32 = 4.0; // (offset - x) / 4
pub const SPHERE_SCALE: f32 = 0.02; // per-instance uniform scale of the unit sphere
pub const SPHERE_WIDTH_SEGMENTS: u32 = 8;
pub const SPHERE_HEIGHT_SEGMENTS: u32 = 4;

// Color of every instance before the first frame is mapped
pub const INITIAL_INSTANCE_COLOR: [f32; 3] = [1.0, 1.0, 1.0];

// Camera
pub const CAMERA_FOV_DEG: f32 = 64.0;
pub const CAMERA_NEAR: f32 = 1.0;
pub const CAMERA_FAR: f32 = 90.0;
pub const CAMERA_START_EYE: [f32; 3] = [20.0, 10.0, 0.0];

// Orbit controls
pub const ORBIT_DAMPING_FACTOR: f32 = 0.05;
pub const ORBIT_ROTATE_SPEED: f32 = 0.25;
pub const ORBIT_ZOOM_SPEED: f32 = 1.0;
pub const ORBIT_MIN_DISTANCE: f32 = 0.0;
pub const ORBIT_MAX_DISTANCE: f32 = 50.0;
pub const ORBIT_POLAR_EPSILON: f32 = 1e-6;

// Analyser
pub const ANALYSER_FFT_SIZE: u32 = 1024;
pub const ANALYSER_MAX_FFT_SIZE: u32 = 32768;
pub const ANALYSER_SMOOTHING: f32 = 0.8;
pub const ANALYSER_MIN_DB: f32 = -100.0;
pub const ANALYSER_MAX_DB: f32 = -30.0;

// Post-processing
pub const BLOOM_STRENGTH: f32 = 1.5;
pub const BLOOM_THRESHOLD: f32 = 0.0;
pub const BLOOM_RADIUS: f32 = 0.0;

// Rendering
pub const MAX_PIXEL_RATIO: f64 = 2.0;

// Stats
pub const STATS_WINDOW_FRAMES: usize = 60;
pub const STATS_REPORT_INTERVAL_MS: u64 = 500;
