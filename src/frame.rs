use crate::audio::MediaAnalyser;
use crate::overlay;
use crate::render;
use instant::Instant;
use sonogrid_core::{
    BloomParams, DriverState, FrameDriver, FrameScheduler, FrameView, RenderSink, ReportThrottle,
    SphereMesh, VizError, VizResult,
};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub type WebDriver = FrameDriver<MediaAnalyser, WebSink, RafScheduler>;

/// requestAnimationFrame-backed scheduler. At most one frame is pending.
#[derive(Default)]
pub struct RafScheduler {
    callback: Option<Closure<dyn FnMut()>>,
    pending: Option<i32>,
    cancelled: bool,
}

impl RafScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn install(&mut self, callback: Closure<dyn FnMut()>) {
        self.callback = Some(callback);
    }

    /// Called at the top of the RAF callback: the pending request is spent.
    fn fired(&mut self) {
        self.pending = None;
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) {
        if self.cancelled || self.pending.is_some() {
            return;
        }
        let (Some(window), Some(cb)) = (web::window(), self.callback.as_ref()) else {
            log::debug!("[frame] no window or callback; frame not scheduled");
            return;
        };
        match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
            Ok(id) => self.pending = Some(id),
            Err(e) => log::error!("[frame] requestAnimationFrame failed: {:?}", e),
        }
    }

    fn cancel(&mut self) {
        self.cancelled = true;
        if let (Some(id), Some(window)) = (self.pending.take(), web::window()) {
            _ = window.cancel_animation_frame(id);
        }
    }
}

/// Renderer side of the driver: GPU upload + draw, plus the stats HUD.
/// A failed WebGPU init leaves `gpu` empty and every frame becomes a no-op.
pub struct WebSink {
    gpu: Option<render::GpuState<'static>>,
    canvas: web::HtmlCanvasElement,
    document: web::Document,
    throttle: ReportThrottle,
}

impl WebSink {
    pub fn new(
        gpu: Option<render::GpuState<'static>>,
        canvas: web::HtmlCanvasElement,
        document: web::Document,
    ) -> Self {
        Self {
            gpu,
            canvas,
            document,
            throttle: ReportThrottle::new(),
        }
    }

    pub fn has_gpu(&self) -> bool {
        self.gpu.is_some()
    }
}

impl RenderSink for WebSink {
    fn render(&mut self, frame: FrameView<'_>) -> VizResult<()> {
        let Some(gpu) = self.gpu.as_mut() else {
            return Ok(());
        };
        gpu.resize_if_needed(self.canvas.width(), self.canvas.height());
        if frame.instances.take_dirty().any() {
            gpu.upload_instances(frame.instances.as_bytes());
        }
        gpu.set_camera(frame.camera);
        gpu.render()
            .map_err(|e| VizError::Render(format!("{:?}", e)))?;
        if frame.state == DriverState::Running && self.throttle.ready(Instant::now()) {
            overlay::update_stats(&self.document, &frame.stats.summary());
        }
        Ok(())
    }
}

pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    mesh: &SphereMesh,
    instance_count: usize,
    bloom: BloomParams,
) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas, mesh, instance_count, bloom).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

/// Create the RAF callback and hand it to the driver's scheduler. The
/// callback holds the driver weakly so the scheduler can own it.
pub fn install_loop(driver: &Rc<RefCell<WebDriver>>) {
    let weak: Weak<RefCell<WebDriver>> = Rc::downgrade(driver);
    let tick = Closure::wrap(Box::new(move || {
        let Some(driver) = weak.upgrade() else {
            return;
        };
        let Ok(mut d) = driver.try_borrow_mut() else {
            log::warn!("[frame] driver busy; frame dropped");
            return;
        };
        d.scheduler_mut().fired();
        let result = match d.state() {
            // Idle frames only run while the camera settles after input.
            DriverState::Idle => match d.present() {
                Ok(true) => {
                    d.scheduler_mut().request_frame();
                    Ok(())
                }
                other => other.map(|_| ()),
            },
            _ => d.tick(Instant::now()).map(|_| ()),
        };
        if let Err(e) = result {
            log::error!("render error: {}", e);
        }
    }) as Box<dyn FnMut()>);
    driver.borrow_mut().scheduler_mut().install(tick);
}

/// Redraw outside the loop (resize, camera drag) while no audio is driving it.
pub fn present_if_idle(driver: &Rc<RefCell<WebDriver>>) {
    let Ok(mut d) = driver.try_borrow_mut() else {
        return;
    };
    if d.state() == DriverState::Idle {
        d.scheduler_mut().request_frame();
    }
}
