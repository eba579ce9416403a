// Bookkeeping for the Idle → Running trigger. No web-sys here so host tests
// can include this file; `playback.rs` drives it with the real audio source.

/// A start attempt could not begin because another one is still awaiting
/// playback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StartBusy;

/// One start attempt at a time. A source whose playback was refused is parked
/// and reused by the next attempt, because a media element can feed only one
/// source node.
#[derive(Debug)]
pub struct StartGate<S> {
    parked: Option<S>,
    in_flight: bool,
    click_wired: bool,
}

impl<S> Default for StartGate<S> {
    fn default() -> Self {
        Self {
            parked: None,
            in_flight: false,
            click_wired: false,
        }
    }
}

impl<S> StartGate<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin an attempt. Yields the parked source, if any; `None` means the
    /// caller attaches a fresh one.
    pub fn begin(&mut self) -> Result<Option<S>, StartBusy> {
        if self.in_flight {
            return Err(StartBusy);
        }
        self.in_flight = true;
        Ok(self.parked.take())
    }

    /// Playback resolved; the source now belongs to the driver.
    pub fn finish(&mut self) {
        self.in_flight = false;
    }

    /// Playback was refused; keep the source for the next attempt.
    pub fn park(&mut self, source: S) {
        self.in_flight = false;
        self.parked = Some(source);
    }

    /// Attaching failed before any source existed.
    pub fn abort(&mut self) {
        self.in_flight = false;
    }

    /// True exactly once: the start button listener is wired the first time
    /// either the click trigger or a refused autoplay asks for it.
    pub fn claim_click_listener(&mut self) -> bool {
        !std::mem::replace(&mut self.click_wired, true)
    }
}
