use crate::frame::WebDriver;
use crate::input::{key_action, KeyAction};
use crate::overlay;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn handle_global_keydown(
    ev: &web::KeyboardEvent,
    document: &web::Document,
    driver: &Rc<RefCell<WebDriver>>,
) {
    match key_action(&ev.key()) {
        // toggles visibility only; the driver state is untouched
        Some(KeyAction::ToggleOverlay) => {
            overlay::toggle(document);
            ev.prevent_default();
        }
        Some(KeyAction::Stop) => {
            let Ok(mut d) = driver.try_borrow_mut() else {
                return;
            };
            d.stop();
            overlay::set_status(document, "Stopped");
            ev.prevent_default();
        }
        None => {}
    }
}

pub fn wire_global_keydown(document: &web::Document, driver: Rc<RefCell<WebDriver>>) {
    if let Some(window) = web::window() {
        let doc = document.clone();
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                handle_global_keydown(&ev, &doc, &driver);
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
