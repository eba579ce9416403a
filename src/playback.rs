use crate::audio::MediaAnalyser;
use crate::constants::{AUDIO_ELEMENT_ID, START_BUTTON_ID};
use crate::frame::WebDriver;
use crate::trigger::StartGate;
use crate::{dom, overlay};
use sonogrid_core::{AnalyserParams, DriverState, VizError, VizResult};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

/// Idle → Running transition for the page.
///
/// The driver only starts once `play()` has resolved. A refused autoplay
/// leaves it Idle, keeps the attached source, and falls back to the start
/// button.
#[derive(Clone)]
pub struct PlaybackStarter {
    document: web::Document,
    driver: Rc<RefCell<WebDriver>>,
    gate: Rc<RefCell<StartGate<MediaAnalyser>>>,
}

impl PlaybackStarter {
    pub fn new(document: &web::Document, driver: &Rc<RefCell<WebDriver>>) -> Self {
        Self {
            document: document.clone(),
            driver: driver.clone(),
            gate: Rc::new(RefCell::new(StartGate::new())),
        }
    }

    pub fn auto_start(&self) {
        self.trigger();
    }

    pub fn wait_for_click(&self) {
        overlay::set_status(&self.document, "Click to start");
        overlay::show(&self.document);
        self.wire_click();
    }

    fn wire_click(&self) {
        if !self.gate.borrow_mut().claim_click_listener() {
            return;
        }
        let this = self.clone();
        let wired = dom::add_click_listener(&self.document, START_BUTTON_ID, move || {
            this.trigger();
        });
        if !wired {
            log::error!("missing #{START_BUTTON_ID}; playback cannot be started");
            overlay::show_error(&self.document, "Start button missing");
        }
    }

    fn trigger(&self) {
        let this = self.clone();
        spawn_local(async move {
            match this.start().await {
                Ok(()) => overlay::hide(&this.document),
                Err(VizError::AlreadyStarted) => log::debug!("[start] already started"),
                Err(e) => this.report_failure(&e),
            }
        });
    }

    fn report_failure(&self, e: &VizError) {
        log::error!("[start] {e}");
        match e {
            VizError::AudioUnavailable(_) => {
                overlay::show_error(&self.document, &format!("{e}. Click to start"));
                self.wire_click();
            }
            _ => overlay::show_error(&self.document, &e.to_string()),
        }
    }

    async fn start(&self) -> VizResult<()> {
        let (params, amount) = {
            let d = self.driver.borrow();
            match d.state() {
                DriverState::Idle => {}
                DriverState::Running => return Err(VizError::AlreadyStarted),
                DriverState::Stopped => return Err(VizError::Stopped),
            }
            (d.config().analyser, d.context().layout.amount())
        };
        let parked = self
            .gate
            .borrow_mut()
            .begin()
            .map_err(|_| VizError::AlreadyStarted)?;
        let source = self.attach_and_play(parked, &params, amount).await?;
        self.driver.borrow_mut().start(source)
    }

    async fn attach_and_play(
        &self,
        parked: Option<MediaAnalyser>,
        params: &AnalyserParams,
        amount: u32,
    ) -> VizResult<MediaAnalyser> {
        let source = match parked {
            Some(source) => source,
            None => match MediaAnalyser::attach(&self.document, AUDIO_ELEMENT_ID, params, amount)
            {
                Ok(source) => source,
                Err(e) => {
                    self.gate.borrow_mut().abort();
                    return Err(e);
                }
            },
        };
        match source.play().await {
            Ok(()) => {
                self.gate.borrow_mut().finish();
                Ok(source)
            }
            Err(e) => {
                self.gate.borrow_mut().park(source);
                Err(e)
            }
        }
    }
}
