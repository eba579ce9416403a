use sonogrid_core::{AnalyserParams, SpectrumSource, VizError, VizResult};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

/// Message of a thrown JS value (`Error`/`DOMException`), else its debug form.
fn js_message(e: &JsValue) -> String {
    e.dyn_ref::<js_sys::Error>()
        .map(|err| format!("{}: {}", String::from(err.name()), String::from(err.message())))
        .unwrap_or_else(|| format!("{:?}", e))
}

fn unavailable(what: &str, e: &JsValue) -> VizError {
    VizError::AudioUnavailable(format!("{what}: {}", js_message(e)))
}

/// `<audio>` element routed through an AnalyserNode to the speakers.
///
/// Graph: media element → analyser → destination. The analyser only observes;
/// playback is unchanged.
pub struct MediaAnalyser {
    audio_ctx: web::AudioContext,
    element: web::HtmlMediaElement,
    analyser: web::AnalyserNode,
    bins: usize,
}

impl MediaAnalyser {
    pub fn attach(
        document: &web::Document,
        element_id: &str,
        params: &AnalyserParams,
        amount: u32,
    ) -> VizResult<Self> {
        let element = document
            .get_element_by_id(element_id)
            .ok_or_else(|| VizError::AudioUnavailable(format!("missing #{element_id}")))?
            .dyn_into::<web::HtmlMediaElement>()
            .map_err(|_| {
                VizError::AudioUnavailable(format!("#{element_id} is not a media element"))
            })?;

        let audio_ctx = web::AudioContext::new().map_err(|e| unavailable("AudioContext", &e))?;
        let source = audio_ctx
            .create_media_element_source(&element)
            .map_err(|e| unavailable("media element source", &e))?;
        let analyser = audio_ctx
            .create_analyser()
            .map_err(|e| unavailable("AnalyserNode", &e))?;

        let fft_size = params.fft_size_for(amount);
        analyser.set_fft_size(fft_size);
        analyser.set_smoothing_time_constant(params.smoothing as f64);
        // Set max first: min must stay below max at every step.
        analyser.set_max_decibels(params.max_db as f64);
        analyser.set_min_decibels(params.min_db as f64);

        source
            .connect_with_audio_node(&analyser)
            .map_err(|e| unavailable("connect source", &e))?;
        analyser
            .connect_with_audio_node(&audio_ctx.destination())
            .map_err(|e| unavailable("connect analyser", &e))?;

        let bins = analyser.frequency_bin_count() as usize;
        log::info!(
            "[audio] analyser fft={} bins={} smoothing={} dB=[{}, {}]",
            fft_size,
            bins,
            params.smoothing,
            params.min_db,
            params.max_db
        );
        Ok(Self {
            audio_ctx,
            element,
            analyser,
            bins,
        })
    }

    /// Resume the context and start playback. Resolves once the element is
    /// playing; a refused `play()` (autoplay policy, unplayable source) comes
    /// back as `AudioUnavailable`.
    pub async fn play(&self) -> VizResult<()> {
        // Without a user gesture resume() stays pending, so it is not awaited.
        match self.audio_ctx.resume() {
            Ok(resume) => spawn_local(async move {
                if let Err(e) = JsFuture::from(resume).await {
                    log::warn!("[audio] resume rejected: {}", js_message(&e));
                }
            }),
            Err(e) => log::warn!("[audio] resume failed: {}", js_message(&e)),
        }
        let promise = self.element.play().map_err(|e| unavailable("play", &e))?;
        JsFuture::from(promise)
            .await
            .map_err(|e| unavailable("play", &e))?;
        log::info!("[audio] playing");
        Ok(())
    }

    pub fn pause(&self) {
        _ = self.element.pause();
        _ = self.audio_ctx.suspend();
    }
}

impl SpectrumSource for MediaAnalyser {
    fn bin_count(&self) -> usize {
        self.bins
    }

    fn read_bytes(&mut self, out: &mut [u8]) {
        // Copies min(out.len(), bins) values; the rest of `out` is untouched.
        self.analyser.get_byte_frequency_data(out);
    }
}

impl Drop for MediaAnalyser {
    fn drop(&mut self) {
        self.pause();
    }
}
