//! Frame driver: the per-refresh loop tying sampler, scroll buffer, grid
//! mapper and instance store together.
//!
//! Initialization order is fixed by [`VizContext::new`]: layout → buffer →
//! mapper → instance store → camera controls → stats. [`FrameDriver::new`] is
//! the single construction site; platform pieces (spectrum source, renderer,
//! frame scheduler) are injected so tests can step frames synchronously.

use crate::camera::Camera;
use crate::config::VizConfig;
use crate::error::{VizError, VizResult};
use crate::grid::{GridLayout, GridMapper};
use crate::instances::InstanceStore;
use crate::orbit::OrbitControls;
use crate::scroll::ScrollBuffer;
use crate::stats::FrameStats;
use instant::Instant;

/// Platform audio analysis capability.
pub trait SpectrumSource {
    /// Number of frequency bins available per frame.
    fn bin_count(&self) -> usize;
    /// Fill `out` with the current byte magnitudes (0..=255), lowest bin first.
    fn read_bytes(&mut self, out: &mut [u8]);
}

/// "Schedule the next tick" capability (requestAnimationFrame, winit redraw).
pub trait FrameScheduler {
    fn request_frame(&mut self);
    fn cancel(&mut self);
}

/// What the renderer sees each frame.
pub struct FrameView<'a> {
    pub camera: &'a Camera,
    /// The renderer uploads when `take_dirty()` reports changes.
    pub instances: &'a mut InstanceStore,
    pub stats: &'a FrameStats,
    pub state: DriverState,
}

/// Rendering engine + post-processing, opaque to the driver.
pub trait RenderSink {
    fn render(&mut self, frame: FrameView<'_>) -> VizResult<()>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
    /// No audio attached; the grid stays at its initial zero height.
    Idle,
    /// Audio attached, one tick per display refresh.
    Running,
    /// Loop cancelled; terminal.
    Stopped,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Rendered,
    Skipped,
}

/// Everything the frame loop mutates, owned by the driver.
#[derive(Clone, Debug)]
pub struct VizContext {
    pub layout: GridLayout,
    pub buffer: ScrollBuffer,
    pub mapper: GridMapper,
    pub instances: InstanceStore,
    pub controls: OrbitControls,
    pub stats: FrameStats,
    window: Vec<u8>,
}

impl VizContext {
    pub fn new(config: &VizConfig) -> Self {
        let layout = GridLayout::new(config.amount);
        let buffer = ScrollBuffer::new(layout.count());
        let mapper = GridMapper::new(config);
        let instances = InstanceStore::new(&layout, config.sphere_scale);
        Self {
            layout,
            buffer,
            mapper,
            instances,
            controls: OrbitControls::default(),
            stats: FrameStats::new(),
            window: vec![0; layout.amount() as usize],
        }
    }

    /// Pull one window of `amount` magnitudes; bins the source lacks read as 0.
    pub fn sample<S: SpectrumSource + ?Sized>(&mut self, source: &mut S) {
        self.window.fill(0);
        let n = source.bin_count().min(self.window.len());
        source.read_bytes(&mut self.window[..n]);
    }

    /// The window read by the last [`VizContext::sample`].
    pub fn window(&self) -> &[u8] {
        &self.window
    }

    pub fn scroll(&mut self) {
        self.buffer.push_window(&self.window);
    }

    /// Map every cell and write it, then raise the upload flags once.
    pub fn update_instances(&mut self) {
        for (i, cell) in self.mapper.map(&self.layout, &self.buffer) {
            self.instances.apply(i, cell.position, cell.color);
        }
        self.instances.commit();
    }
}

pub struct FrameDriver<S, R, Q> {
    config: VizConfig,
    ctx: VizContext,
    state: DriverState,
    source: Option<S>,
    sink: R,
    scheduler: Q,
}

impl<S, R, Q> FrameDriver<S, R, Q>
where
    S: SpectrumSource,
    R: RenderSink,
    Q: FrameScheduler,
{
    pub fn new(config: VizConfig, sink: R, scheduler: Q) -> Self {
        let ctx = VizContext::new(&config);
        log::info!(
            "[driver] preset={} amount={} instances={} height_scale={} trigger={:?}",
            config.preset.name(),
            config.amount,
            ctx.layout.count(),
            config.effective_height_scale(),
            config.trigger
        );
        Self {
            config,
            ctx,
            state: DriverState::Idle,
            source: None,
            sink,
            scheduler,
        }
    }

    pub fn config(&self) -> &VizConfig {
        &self.config
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn context(&self) -> &VizContext {
        &self.ctx
    }

    pub fn controls_mut(&mut self) -> &mut OrbitControls {
        &mut self.ctx.controls
    }

    pub fn sink(&self) -> &R {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut R {
        &mut self.sink
    }

    pub fn scheduler(&self) -> &Q {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut Q {
        &mut self.scheduler
    }

    /// Attach the audio source and enter Running. One-shot.
    pub fn start(&mut self, source: S) -> VizResult<()> {
        match self.state {
            DriverState::Idle => {
                log::info!("[driver] starting, {} bins available", source.bin_count());
                if source.bin_count() < self.ctx.layout.amount() as usize {
                    log::warn!(
                        "[driver] source has {} bins, grid needs {}; missing bins read as 0",
                        source.bin_count(),
                        self.ctx.layout.amount()
                    );
                }
                self.source = Some(source);
                self.state = DriverState::Running;
                self.scheduler.request_frame();
                Ok(())
            }
            DriverState::Running => Err(VizError::AlreadyStarted),
            DriverState::Stopped => Err(VizError::Stopped),
        }
    }

    /// Cancel the frame loop and release the source.
    pub fn stop(&mut self) {
        if self.state == DriverState::Stopped {
            return;
        }
        self.scheduler.cancel();
        self.source = None;
        self.state = DriverState::Stopped;
        log::info!("[driver] stopped after {} frames", self.ctx.stats.frames());
    }

    /// New surface size: camera aspect only, the cell layout is fixed.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.ctx.controls.camera_mut().set_viewport(width, height);
    }

    /// Draw the current instance state without sampling audio. Returns true
    /// while the camera is still settling, so callers can keep presenting.
    pub fn present(&mut self) -> VizResult<bool> {
        let moving = self.ctx.controls.update();
        self.render_current()?;
        Ok(moving)
    }

    /// One Running frame: controls → sample → scroll → map → commit → render →
    /// schedule next. Does nothing outside Running.
    pub fn tick(&mut self, now: Instant) -> VizResult<TickOutcome> {
        if self.state != DriverState::Running {
            return Ok(TickOutcome::Skipped);
        }
        let Some(source) = self.source.as_mut() else {
            return Ok(TickOutcome::Skipped);
        };
        self.ctx.stats.record(now);
        self.ctx.controls.update();
        self.ctx.sample(source);
        self.ctx.scroll();
        self.ctx.update_instances();
        let rendered = self.render_current();
        self.scheduler.request_frame();
        rendered.map(|_| TickOutcome::Rendered)
    }

    fn render_current(&mut self) -> VizResult<()> {
        self.sink.render(FrameView {
            camera: self.ctx.controls.camera(),
            instances: &mut self.ctx.instances,
            stats: &self.ctx.stats,
            state: self.state,
        })
    }
}
