use crate::frame::{self, WebDriver};
use crate::input::{self, DragState, WheelMode};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
struct OrbitWiring {
    canvas: web::HtmlCanvasElement,
    driver: Rc<RefCell<WebDriver>>,
    drag: Rc<RefCell<DragState>>,
}

/// Drag to orbit, wheel to dolly. Redraws on demand while the driver is idle;
/// when running, the next tick picks the change up.
pub fn wire_orbit_controls(canvas: &web::HtmlCanvasElement, driver: &Rc<RefCell<WebDriver>>) {
    let w = OrbitWiring {
        canvas: canvas.clone(),
        driver: driver.clone(),
        drag: Rc::new(RefCell::new(DragState::default())),
    };
    wire_pointerdown(&w);
    wire_pointermove(&w);
    wire_pointerup(&w, "pointerup");
    wire_pointerup(&w, "pointercancel");
    wire_wheel(&w);
}

fn listen<E: wasm_bindgen::convert::FromWasmAbi + 'static>(
    canvas: &web::HtmlCanvasElement,
    event: &str,
    handler: impl FnMut(E) + 'static,
) {
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    _ = canvas.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerdown(w: &OrbitWiring) {
    let w2 = w.clone();
    listen(&w.canvas, "pointerdown", move |ev: web::PointerEvent| {
        if ev.button() != 0 {
            return;
        }
        let id = ev.pointer_id();
        w2.drag
            .borrow_mut()
            .begin(id, ev.client_x() as f32, ev.client_y() as f32);
        _ = w2.canvas.set_pointer_capture(id);
    });
}

fn wire_pointermove(w: &OrbitWiring) {
    let w2 = w.clone();
    listen(&w.canvas, "pointermove", move |ev: web::PointerEvent| {
        let delta = w2.drag.borrow_mut().moved_to(
            ev.pointer_id(),
            ev.client_x() as f32,
            ev.client_y() as f32,
        );
        let Some((dx, dy)) = delta else {
            return;
        };
        let height = w2.canvas.client_height().max(1) as f32;
        if let Ok(mut d) = w2.driver.try_borrow_mut() {
            d.controls_mut().rotate_by_pixels(dx, dy, height);
        }
        frame::present_if_idle(&w2.driver);
    });
}

fn wire_pointerup(w: &OrbitWiring, event: &str) {
    let w2 = w.clone();
    listen(&w.canvas, event, move |ev: web::PointerEvent| {
        let id = ev.pointer_id();
        if w2.drag.borrow_mut().end(id) {
            _ = w2.canvas.release_pointer_capture(id);
        }
    });
}

fn wire_wheel(w: &OrbitWiring) {
    let w2 = w.clone();
    listen(&w.canvas, "wheel", move |ev: web::WheelEvent| {
        ev.prevent_default();
        let px = input::wheel_delta_px(ev.delta_y(), WheelMode::from_dom(ev.delta_mode()));
        if let Ok(mut d) = w2.driver.try_borrow_mut() {
            d.controls_mut().dolly_by_wheel(px);
        }
        frame::present_if_idle(&w2.driver);
    });
}
