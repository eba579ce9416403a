#![cfg(target_arch = "wasm32")]
use sonogrid_core::{
    SphereMesh, TriggerMode, VizConfig, SPHERE_HEIGHT_SEGMENTS, SPHERE_WIDTH_SEGMENTS,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod overlay;
mod playback;
mod render;
mod trigger;

use constants::CANVAS_ID;
use frame::{RafScheduler, WebDriver, WebSink};
use playback::PlaybackStarter;

/// Keep the backing store and camera aspect in step with the viewport.
fn wire_canvas_resize(canvas: &web::HtmlCanvasElement, driver: &Rc<RefCell<WebDriver>>) {
    let canvas_resize = canvas.clone();
    let driver_resize = driver.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        let (w, h) = dom::sync_canvas_backing_size(&canvas_resize);
        if let Ok(mut d) = driver_resize.try_borrow_mut() {
            d.resize(w, h);
        }
        frame::present_if_idle(&driver_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("sonogrid-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
            if let Some(document) = dom::window_document() {
                overlay::show_error(&document, &format!("{e}"));
            }
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let config = VizConfig::from_query(&dom::query_string());

    let canvas_el = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{CANVAS_ID}"))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    let (width, height) = dom::sync_canvas_backing_size(&canvas);

    let mesh = SphereMesh::uv_sphere(1.0, SPHERE_WIDTH_SEGMENTS, SPHERE_HEIGHT_SEGMENTS);
    let gpu = frame::init_gpu(&canvas, &mesh, config.count(), config.bloom).await;
    let sink = WebSink::new(gpu, canvas.clone(), document.clone());
    if !sink.has_gpu() {
        overlay::show_error(&document, "WebGPU unavailable; visualization disabled");
    }

    let trigger = config.trigger;
    let driver = Rc::new(RefCell::new(WebDriver::new(
        config,
        sink,
        RafScheduler::new(),
    )));
    driver.borrow_mut().resize(width, height);
    frame::install_loop(&driver);
    // Static flat grid until audio arrives.
    frame::present_if_idle(&driver);

    wire_canvas_resize(&canvas, &driver);
    events::wire_orbit_controls(&canvas, &driver);
    events::wire_global_keydown(&document, driver.clone());
    let starter = PlaybackStarter::new(&document, &driver);
    match trigger {
        TriggerMode::AutoStart => starter.auto_start(),
        TriggerMode::ClickToStart => starter.wait_for_click(),
    }
    Ok(())
}
