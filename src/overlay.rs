use crate::constants::{HIDDEN_CLASS, OVERLAY_ID, STATS_ELEMENT_ID, STATUS_ELEMENT_ID};
use crate::dom;
use web_sys as web;

#[inline]
pub fn show(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(OVERLAY_ID) {
        _ = el.class_list().remove_1(HIDDEN_CLASS);
        // fallback for pages without the CSS class
        _ = el.set_attribute("style", "");
    }
}

#[inline]
pub fn hide(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(OVERLAY_ID) {
        _ = el.class_list().add_1(HIDDEN_CLASS);
        _ = el.set_attribute("style", "display:none");
    }
}

#[inline]
pub fn is_hidden(document: &web::Document) -> bool {
    if let Some(el) = document.get_element_by_id(OVERLAY_ID) {
        if el.class_list().contains(HIDDEN_CLASS) {
            return true;
        }
        return el
            .get_attribute("style")
            .map(|s| s.contains("display:none"))
            .unwrap_or(false);
    }
    false
}

#[inline]
pub fn toggle(document: &web::Document) {
    if is_hidden(document) {
        show(document);
    } else {
        hide(document);
    }
}

/// Status line inside the overlay (e.g. "click to start").
pub fn set_status(document: &web::Document, text: &str) {
    dom::set_text(document, STATUS_ELEMENT_ID, text);
}

/// Surface a fatal feature error to the user; the overlay is forced visible.
pub fn show_error(document: &web::Document, message: &str) {
    set_status(document, message);
    if let Some(el) = document.get_element_by_id(STATUS_ELEMENT_ID) {
        _ = el.class_list().add_1("error");
    }
    show(document);
}

/// fps / ms readout; silently skipped when the page has no `#stats`.
pub fn update_stats(document: &web::Document, summary: &str) {
    dom::set_text(document, STATS_ELEMENT_ID, summary);
}
