use crate::constants::{STATS_REPORT_INTERVAL_MS, STATS_WINDOW_FRAMES};
use instant::Instant;
use std::collections::VecDeque;
use std::time::Duration;

#[inline]
fn elapsed_between(earlier: Instant, later: Instant) -> Duration {
    if later > earlier {
        later.duration_since(earlier)
    } else {
        Duration::ZERO
    }
}

/// Rolling frame-time statistics (fps / ms panel).
#[derive(Clone, Debug)]
pub struct FrameStats {
    last: Option<Instant>,
    intervals: VecDeque<f32>,
    frames: u64,
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameStats {
    pub fn new() -> Self {
        Self {
            last: None,
            intervals: VecDeque::with_capacity(STATS_WINDOW_FRAMES),
            frames: 0,
        }
    }

    /// Record a frame at `now` and return the time since the previous one
    /// (zero for the first frame).
    pub fn record(&mut self, now: Instant) -> Duration {
        let dt = self
            .last
            .map(|prev| elapsed_between(prev, now))
            .unwrap_or_default();
        if self.last.is_some() {
            if self.intervals.len() == STATS_WINDOW_FRAMES {
                self.intervals.pop_front();
            }
            self.intervals.push_back(dt.as_secs_f32() * 1000.0);
        }
        self.last = Some(now);
        self.frames += 1;
        dt
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Mean frame time over the window, in milliseconds.
    pub fn mean_ms(&self) -> f32 {
        if self.intervals.is_empty() {
            return 0.0;
        }
        self.intervals.iter().sum::<f32>() / self.intervals.len() as f32
    }

    pub fn fps(&self) -> f32 {
        let ms = self.mean_ms();
        if ms > 0.0 {
            1000.0 / ms
        } else {
            0.0
        }
    }

    pub fn summary(&self) -> String {
        format!("{:.0} FPS · {:.1} ms", self.fps(), self.mean_ms())
    }
}

/// Lets a HUD refresh at most once per report interval.
#[derive(Clone, Debug, Default)]
pub struct ReportThrottle {
    last_report: Option<Instant>,
}

impl ReportThrottle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ready(&mut self, now: Instant) -> bool {
        let due = self
            .last_report
            .map(|t| elapsed_between(t, now) >= Duration::from_millis(STATS_REPORT_INTERVAL_MS))
            .unwrap_or(true);
        if due {
            self.last_report = Some(now);
        }
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steady_frames_report_expected_fps() {
        let mut s = FrameStats::new();
        let t0 = Instant::now();
        assert_eq!(s.record(t0), Duration::ZERO);
        for i in 1..=10u64 {
            s.record(t0 + Duration::from_millis(20 * i));
        }
        assert!((s.mean_ms() - 20.0).abs() < 0.01);
        assert!((s.fps() - 50.0).abs() < 0.1);
        assert_eq!(s.frames(), 11);
    }

    #[test]
    fn report_is_throttled() {
        let mut throttle = ReportThrottle::new();
        let t0 = Instant::now();
        assert!(throttle.ready(t0));
        assert!(!throttle.ready(t0 + Duration::from_millis(100)));
        assert!(throttle.ready(t0 + Duration::from_millis(600)));
    }
}
