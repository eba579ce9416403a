//! Startup configuration.
//!
//! The two shipped looks of the demo differ only in constants and in how
//! playback is triggered, so they are expressed as [`Preset`]s feeding one
//! [`VizConfig`]. Query-string parsing never fails: anything unusable falls
//! back to the preset defaults.

use crate::constants::*;
use std::num::IntErrorKind;

/// How the Idle → Running transition is triggered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerMode {
    /// Start playback and analysis as soon as the page is ready.
    AutoStart,
    /// Wait for a click on the start control.
    ClickToStart,
}

impl TriggerMode {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "auto" | "autostart" => Some(TriggerMode::AutoStart),
            "click" | "button" => Some(TriggerMode::ClickToStart),
            _ => None,
        }
    }
}

/// Constants of `HSL(hue_base + v*hue_scale, saturation, lightness_base + v*lightness_scale)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HslParams {
    pub hue_base: f32,
    pub hue_scale: f32,
    pub saturation: f32,
    pub lightness_base: f32,
    pub lightness_scale: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnalyserParams {
    pub fft_size: u32,
    pub smoothing: f32,
    pub min_db: f32,
    pub max_db: f32,
}

impl Default for AnalyserParams {
    fn default() -> Self {
        Self {
            fft_size: ANALYSER_FFT_SIZE,
            smoothing: ANALYSER_SMOOTHING,
            min_db: ANALYSER_MIN_DB,
            max_db: ANALYSER_MAX_DB,
        }
    }
}

impl AnalyserParams {
    /// FFT size that yields at least `amount` bins, never below the base size.
    pub fn fft_size_for(&self, amount: u32) -> u32 {
        let needed = amount
            .saturating_mul(2)
            .checked_next_power_of_two()
            .unwrap_or(ANALYSER_MAX_FFT_SIZE);
        self.fft_size.max(needed).min(ANALYSER_MAX_FFT_SIZE)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BloomParams {
    pub strength: f32,
    pub threshold: f32,
    pub radius: f32,
}

impl Default for BloomParams {
    fn default() -> Self {
        Self {
            strength: BLOOM_STRENGTH,
            threshold: BLOOM_THRESHOLD,
            radius: BLOOM_RADIUS,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Preset {
    /// Blue-to-white palette, auto-start.
    Ocean,
    /// Magenta-to-amber palette, click to start.
    Ember,
}

impl Preset {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "ocean" => Some(Preset::Ocean),
            "ember" => Some(Preset::Ember),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Preset::Ocean => "ocean",
            Preset::Ember => "ember",
        }
    }

    pub fn height_scale(self) -> f32 {
        match self {
            Preset::Ocean => 32.0,
            Preset::Ember => 28.0,
        }
    }

    pub fn hsl(self) -> HslParams {
        match self {
            Preset::Ocean => HslParams {
                hue_base: 0.65,
                hue_scale: 1.0 / 2048.0,
                saturation: 1.0,
                lightness_base: -0.7,
                lightness_scale: 1.0 / 128.0,
            },
            Preset::Ember => HslParams {
                hue_base: -0.2,
                hue_scale: 1.0 / 640.0,
                saturation: 0.8,
                lightness_base: -0.7,
                lightness_scale: 1.0 / 128.0,
            },
        }
    }

    pub fn trigger(self) -> TriggerMode {
        match self {
            Preset::Ocean => TriggerMode::AutoStart,
            Preset::Ember => TriggerMode::ClickToStart,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct VizConfig {
    pub preset: Preset,
    pub amount: u32,
    pub height_scale: f32,
    pub hsl: HslParams,
    pub trigger: TriggerMode,
    pub sphere_scale: f32,
    pub analyser: AnalyserParams,
    pub bloom: BloomParams,
}

impl Default for VizConfig {
    fn default() -> Self {
        Self::from_preset(Preset::Ocean)
    }
}

impl VizConfig {
    pub fn from_preset(preset: Preset) -> Self {
        Self {
            preset,
            amount: DEFAULT_GRID_DIMENSION,
            height_scale: preset.height_scale(),
            hsl: preset.hsl(),
            trigger: preset.trigger(),
            sphere_scale: SPHERE_SCALE,
            analyser: AnalyserParams::default(),
            bloom: BloomParams::default(),
        }
    }

    /// Build a config from a page query string such as `?512` or
    /// `?512&preset=ember&start=click`.
    pub fn from_query(query: &str) -> Self {
        let q = QueryParams::parse(query);
        let preset = q
            .preset
            .as_deref()
            .and_then(|p| {
                let parsed = Preset::from_name(p);
                if parsed.is_none() {
                    log::warn!("unknown preset '{}', using ocean", p);
                }
                parsed
            })
            .unwrap_or(Preset::Ocean);
        let mut cfg = Self::from_preset(preset).with_amount(q.amount);
        if let Some(t) = q.start.as_deref().and_then(TriggerMode::from_name) {
            cfg.trigger = t;
        }
        cfg
    }

    /// Apply a requested grid dimension, falling back/clamping as needed.
    pub fn with_amount(mut self, requested: Option<i64>) -> Self {
        self.amount = resolve_grid_dimension(requested);
        self
    }

    pub fn count(&self) -> usize {
        let a = self.amount as usize;
        a * a
    }

    /// Height divisor, guarded against zero/negative tuning values.
    pub fn effective_height_scale(&self) -> f32 {
        if self.height_scale.is_finite() && self.height_scale > 0.0 {
            self.height_scale
        } else {
            Preset::Ocean.height_scale()
        }
    }
}

/// Resolve the grid dimension: default when absent or non-positive, soft cap
/// when very large.
pub fn resolve_grid_dimension(requested: Option<i64>) -> u32 {
    let Some(n) = requested.filter(|n| *n > 0) else {
        return DEFAULT_GRID_DIMENSION;
    };
    if n > MAX_GRID_DIMENSION as i64 {
        log::warn!(
            "grid dimension {} exceeds soft cap, clamping to {}",
            n,
            MAX_GRID_DIMENSION
        );
        return MAX_GRID_DIMENSION;
    }
    let n = n as u32;
    if n > GRID_PERF_WARN_DIMENSION {
        log::warn!(
            "grid dimension {} ({} instances) may degrade frame rate",
            n,
            n as u64 * n as u64
        );
    }
    n
}

/// Loose query-string reader.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryParams {
    pub amount: Option<i64>,
    pub preset: Option<String>,
    pub start: Option<String>,
}

impl QueryParams {
    pub fn parse(query: &str) -> Self {
        let body = query.strip_prefix('?').unwrap_or(query);
        let mut out = QueryParams {
            // The bare leading integer (`?512`) wins, read the way parseInt does.
            amount: parse_leading_int(body),
            ..Default::default()
        };
        for part in body.split('&') {
            let Some((key, value)) = part.split_once('=') else {
                continue;
            };
            match key.trim() {
                "amount" | "n" => {
                    if out.amount.is_none() {
                        out.amount = parse_leading_int(value);
                    }
                }
                "preset" => out.preset = Some(value.to_string()),
                "start" | "trigger" => out.start = Some(value.to_string()),
                other => log::debug!("ignoring query key '{}'", other),
            }
        }
        out
    }
}

/// Leading-integer parse: optional whitespace and sign, then digits; stops at
/// the first non-digit. `None` when no digit is present; overflow saturates
/// so oversized requests still reach the soft cap.
pub fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits: &str = {
        let end = rest
            .as_bytes()
            .iter()
            .position(|b| !b.is_ascii_digit())
            .unwrap_or(rest.len());
        &rest[..end]
    };
    if digits.is_empty() {
        return None;
    }
    let value = match digits.parse::<i64>() {
        Ok(v) => v,
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => i64::MAX,
        Err(_) => return None,
    };
    Some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_int_matches_parse_int_semantics() {
        assert_eq!(parse_leading_int("512"), Some(512));
        assert_eq!(parse_leading_int("  64abc"), Some(64));
        assert_eq!(parse_leading_int("-3"), Some(-3));
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("+"), None);
    }

    #[test]
    fn leading_int_saturates_on_overflow() {
        assert_eq!(parse_leading_int("99999999999999999999"), Some(i64::MAX));
        assert_eq!(parse_leading_int("-99999999999999999999x"), Some(-i64::MAX));
    }

    #[test]
    fn fft_size_grows_with_amount() {
        let a = AnalyserParams::default();
        assert_eq!(a.fft_size_for(256), 1024);
        assert_eq!(a.fft_size_for(512), 1024);
        assert_eq!(a.fft_size_for(1000), 2048);
        assert_eq!(a.fft_size_for(u32::MAX / 4), ANALYSER_MAX_FFT_SIZE);
    }
}
