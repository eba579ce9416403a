use thiserror::Error;

/// Failures surfaced by the frame driver and its collaborators.
///
/// None of these are fatal to the host: a failed start leaves the static grid
/// on screen, a failed render is logged and the loop continues.
#[derive(Debug, Error)]
pub enum VizError {
    #[error("visualization already started; playback trigger is one-shot")]
    AlreadyStarted,
    #[error("visualization has been stopped")]
    Stopped,
    #[error("audio source unavailable: {0}")]
    AudioUnavailable(String),
    #[error("render failed: {0}")]
    Render(String),
}

pub type VizResult<T> = Result<T, VizError>;
