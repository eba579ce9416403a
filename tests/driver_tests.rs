// Host-side tests for the frame driver, stepped synchronously with fakes.

use instant::Instant;
use sonogrid_core::*;
use std::time::Duration;

struct FixedSource {
    bins: Vec<u8>,
}

impl SpectrumSource for FixedSource {
    fn bin_count(&self) -> usize {
        self.bins.len()
    }

    fn read_bytes(&mut self, out: &mut [u8]) {
        let n = out.len().min(self.bins.len());
        out[..n].copy_from_slice(&self.bins[..n]);
    }
}

#[derive(Default)]
struct RecordingSink {
    renders: usize,
    uploads: usize,
    heights: Vec<f32>,
    fail: bool,
}

impl RenderSink for RecordingSink {
    fn render(&mut self, frame: FrameView<'_>) -> VizResult<()> {
        self.renders += 1;
        if frame.instances.take_dirty().any() {
            self.uploads += 1;
        }
        self.heights = frame
            .instances
            .as_slice()
            .iter()
            .map(|r| r.position[1])
            .collect();
        if self.fail {
            return Err(VizError::Render("surface lost".into()));
        }
        Ok(())
    }
}

#[derive(Default)]
struct CountingScheduler {
    requests: usize,
    cancels: usize,
}

impl FrameScheduler for CountingScheduler {
    fn request_frame(&mut self) {
        self.requests += 1;
    }

    fn cancel(&mut self) {
        self.cancels += 1;
    }
}

type TestDriver = FrameDriver<FixedSource, RecordingSink, CountingScheduler>;

fn driver(amount: i64) -> TestDriver {
    let config = VizConfig::default().with_amount(Some(amount));
    FrameDriver::new(config, RecordingSink::default(), CountingScheduler::default())
}

fn source(bins: &[u8]) -> FixedSource {
    FixedSource {
        bins: bins.to_vec(),
    }
}

#[test]
fn idle_ticks_are_skipped() {
    let mut d = driver(2);
    assert_eq!(d.state(), DriverState::Idle);
    assert_eq!(d.tick(Instant::now()).unwrap(), TickOutcome::Skipped);
    assert_eq!(d.sink().renders, 0);
}

#[test]
fn present_draws_the_flat_grid() {
    let mut d = driver(2);
    assert!(d.present().is_ok());
    assert_eq!(d.sink().renders, 1);
    assert_eq!(d.sink().uploads, 1);
    assert_eq!(d.sink().heights, vec![0.0; 4]);
    assert_eq!(d.scheduler().requests, 0);
}

#[test]
fn start_requests_the_first_frame() {
    let mut d = driver(2);
    d.start(source(&[32, 64])).unwrap();
    assert_eq!(d.state(), DriverState::Running);
    assert_eq!(d.scheduler().requests, 1);
}

#[test]
fn each_tick_commits_once_and_reschedules() {
    let mut d = driver(2);
    d.start(source(&[32, 64])).unwrap();
    let t0 = Instant::now();
    for i in 0..3u64 {
        let out = d.tick(t0 + Duration::from_millis(16 * i)).unwrap();
        assert_eq!(out, TickOutcome::Rendered);
    }
    assert_eq!(d.context().instances.commits(), 3);
    assert_eq!(d.sink().renders, 3);
    assert_eq!(d.sink().uploads, 3);
    assert_eq!(d.scheduler().requests, 4);
    assert_eq!(d.context().stats.frames(), 3);
}

#[test]
fn spectrum_scrolls_through_the_grid() {
    let mut d = driver(2);
    d.start(source(&[32, 64])).unwrap();
    let now = Instant::now();

    d.tick(now).unwrap();
    assert_eq!(d.context().buffer.to_vec(), vec![0, 0, 32, 64]);
    assert_eq!(d.sink().heights, vec![0.0, 0.0, 1.0, 2.0]);

    d.tick(now).unwrap();
    assert_eq!(d.context().buffer.to_vec(), vec![32, 64, 32, 64]);
    assert_eq!(d.sink().heights, vec![1.0, 2.0, 1.0, 2.0]);
}

#[test]
fn short_spectrum_is_zero_filled() {
    let mut d = driver(4);
    d.start(source(&[200])).unwrap();
    d.tick(Instant::now()).unwrap();
    assert_eq!(d.context().window(), &[200, 0, 0, 0]);
    assert_eq!(d.context().buffer.len(), 16);
}

#[test]
fn second_start_is_rejected() {
    let mut d = driver(2);
    d.start(source(&[1, 2])).unwrap();
    let err = d.start(source(&[3, 4])).unwrap_err();
    assert!(matches!(err, VizError::AlreadyStarted));
    assert_eq!(d.scheduler().requests, 1);
}

#[test]
fn stop_cancels_and_is_terminal() {
    let mut d = driver(2);
    d.start(source(&[1, 2])).unwrap();
    d.tick(Instant::now()).unwrap();
    d.stop();
    d.stop();
    assert_eq!(d.state(), DriverState::Stopped);
    assert_eq!(d.scheduler().cancels, 1);

    let renders = d.sink().renders;
    assert_eq!(d.tick(Instant::now()).unwrap(), TickOutcome::Skipped);
    assert_eq!(d.sink().renders, renders);

    let err = d.start(source(&[1, 2])).unwrap_err();
    assert!(matches!(err, VizError::Stopped));
}

#[test]
fn render_failure_still_reschedules() {
    let mut d = driver(2);
    d.sink_mut().fail = true;
    d.start(source(&[1, 2])).unwrap();
    assert!(d.tick(Instant::now()).is_err());
    assert_eq!(d.scheduler().requests, 2);
    assert_eq!(d.state(), DriverState::Running);
}

#[test]
fn resize_updates_camera_aspect_only() {
    let mut d = driver(2);
    d.resize(1600, 800);
    assert_eq!(d.context().controls.camera().aspect, 2.0);
    assert_eq!(d.context().layout.count(), 4);
}

#[test]
fn idle_driver_waits_for_a_later_start() {
    let mut d = driver(2);
    // a refused playback never calls start; presenting keeps the static grid
    d.present().unwrap();
    d.present().unwrap();
    assert_eq!(d.state(), DriverState::Idle);
    assert_eq!(d.tick(Instant::now()).unwrap(), TickOutcome::Skipped);

    d.start(source(&[8, 8])).unwrap();
    assert_eq!(d.state(), DriverState::Running);
}
