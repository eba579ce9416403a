use clap::Parser;
use instant::Instant;
use sonogrid_core::{
    DriverState, FrameDriver, FrameScheduler, Preset, SphereMesh, TriggerMode, VizConfig, VizError,
    SPHERE_HEIGHT_SEGMENTS, SPHERE_WIDTH_SEGMENTS,
};
use winit::{
    event::*,
    event_loop::EventLoop,
    keyboard::{Key, NamedKey},
    window::WindowBuilder,
};

mod analyser;
mod capture;
mod gpu;

use capture::CaptureSource;
use gpu::GpuState;

// winit reports wheel lines; the orbit dolly works in DOM-style pixels.
const WHEEL_LINE_PX: f32 = 16.0;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "sonogrid")]
#[command(about = "Audio-reactive instanced sphere grid", long_about = None)]
struct Cli {
    /// Grid dimension (cells per side); defaults to 256
    #[arg(long, value_name = "N")]
    amount: Option<i64>,

    /// Visual preset: ocean (default) or ember
    #[arg(long, value_name = "PRESET", default_value = "ocean")]
    preset: String,

    /// Wait for Space or a click before capturing audio
    #[arg(long)]
    click_to_start: bool,

    /// Input device name (see --list-devices); default input otherwise
    #[arg(long, value_name = "NAME")]
    device: Option<String>,

    /// Print available input devices and exit
    #[arg(long)]
    list_devices: bool,
}

impl Cli {
    fn viz_config(&self) -> VizConfig {
        let preset = Preset::from_name(&self.preset).unwrap_or_else(|| {
            log::warn!("Unknown preset '{}', using ocean", self.preset);
            Preset::Ocean
        });
        let mut config = VizConfig::from_preset(preset).with_amount(self.amount);
        if self.click_to_start {
            config.trigger = TriggerMode::ClickToStart;
        }
        config
    }
}

/// Redraw requests stand in for requestAnimationFrame.
struct RedrawScheduler<'w> {
    window: &'w winit::window::Window,
    cancelled: bool,
}

impl FrameScheduler for RedrawScheduler<'_> {
    fn request_frame(&mut self) {
        if !self.cancelled {
            self.window.request_redraw();
        }
    }

    fn cancel(&mut self) {
        self.cancelled = true;
    }
}

type NativeDriver<'w> = FrameDriver<CaptureSource, GpuState<'w>, RedrawScheduler<'w>>;

fn start_capture(driver: &mut NativeDriver<'_>, device: Option<&str>) {
    if driver.state() != DriverState::Idle {
        return;
    }
    let amount = driver.context().layout.amount();
    match CaptureSource::open(device, &driver.config().analyser, amount) {
        Ok(source) => {
            if let Err(e) = driver.start(source) {
                log::error!("[start] {e}");
            }
        }
        Err(e) => log::error!("[start] {}", VizError::AudioUnavailable(format!("{e:#}"))),
    }
}

#[derive(Default)]
struct Pointer {
    dragging: bool,
    last: Option<(f32, f32)>,
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    if cli.list_devices {
        for name in capture::list_input_devices()? {
            println!("{name}");
        }
        return Ok(());
    }
    let config = cli.viz_config();
    let trigger = config.trigger;

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("sonogrid")
        .build(&event_loop)?;

    let mesh = SphereMesh::uv_sphere(1.0, SPHERE_WIDTH_SEGMENTS, SPHERE_HEIGHT_SEGMENTS);
    let gpu = pollster::block_on(GpuState::new(&window, &mesh, config.count()))?;
    let scheduler = RedrawScheduler {
        window: &window,
        cancelled: false,
    };
    let mut driver: NativeDriver<'_> = FrameDriver::new(config, gpu, scheduler);
    let size = window.inner_size();
    driver.resize(size.width, size.height);

    match trigger {
        TriggerMode::AutoStart => start_capture(&mut driver, cli.device.as_deref()),
        TriggerMode::ClickToStart => log::info!("press Space or click to start"),
    }
    window.request_redraw();

    let device = cli.device.clone();
    let window = &window;
    let mut pointer = Pointer::default();
    event_loop.run(move |event, elwt| {
        let Event::WindowEvent { event, .. } = event else {
            return;
        };
        match event {
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::Resized(size) => {
                driver.sink_mut().resize(size);
                driver.resize(size.width, size.height);
                window.request_redraw();
            }
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                match event.logical_key {
                    Key::Named(NamedKey::Escape) => {
                        driver.stop();
                        elwt.exit();
                    }
                    Key::Named(NamedKey::Space) if trigger == TriggerMode::ClickToStart => {
                        start_capture(&mut driver, device.as_deref())
                    }
                    _ => {}
                }
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                pointer.dragging = state == ElementState::Pressed;
                if pointer.dragging && trigger == TriggerMode::ClickToStart {
                    start_capture(&mut driver, device.as_deref());
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let now = (position.x as f32, position.y as f32);
                if let (true, Some(last)) = (pointer.dragging, pointer.last) {
                    let height = window.inner_size().height.max(1) as f32;
                    driver
                        .controls_mut()
                        .rotate_by_pixels(now.0 - last.0, now.1 - last.1, height);
                    window.request_redraw();
                }
                pointer.last = Some(now);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                // DOM convention: positive deltaY scrolls down / away.
                let dy = match delta {
                    MouseScrollDelta::LineDelta(_, y) => -y * WHEEL_LINE_PX,
                    MouseScrollDelta::PixelDelta(p) => -p.y as f32,
                };
                driver.controls_mut().dolly_by_wheel(dy);
                window.request_redraw();
            }
            WindowEvent::RedrawRequested => {
                let result = match driver.state() {
                    DriverState::Idle => driver.present().map(|moving| {
                        if moving {
                            window.request_redraw();
                        }
                    }),
                    DriverState::Running => driver.tick(Instant::now()).map(|_| ()),
                    DriverState::Stopped => Ok(()),
                };
                if let Err(e) = result {
                    log::error!("render error: {e}");
                }
            }
            _ => {}
        }
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_maps_to_config() {
        let cli = Cli::parse_from(["sonogrid", "--amount", "64", "--preset", "ember"]);
        let config = cli.viz_config();
        assert_eq!(config.amount, 64);
        assert_eq!(config.preset, Preset::Ember);
        assert_eq!(config.trigger, TriggerMode::ClickToStart);
    }

    #[test]
    fn click_flag_overrides_auto_start() {
        let cli = Cli::parse_from(["sonogrid", "--click-to-start"]);
        let config = cli.viz_config();
        assert_eq!(config.preset, Preset::Ocean);
        assert_eq!(config.amount, 256);
        assert_eq!(config.trigger, TriggerMode::ClickToStart);
    }

    #[test]
    fn unknown_preset_falls_back() {
        let cli = Cli::parse_from(["sonogrid", "--preset", "lava", "--amount", "0"]);
        let config = cli.viz_config();
        assert_eq!(config.preset, Preset::Ocean);
        assert_eq!(config.amount, 256);
    }
}
