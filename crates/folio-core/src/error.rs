use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Layout error: {0}")]
    Layout(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Conditions the engine recovers from on its own.
///
/// These never propagate to a caller. They are logged where they occur and
/// the engine continues with a safe fallback.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Degradation {
    #[error("no element with id '{0}'")]
    MissingTarget(String),

    #[error("{0} unavailable, falling back to native scrolling")]
    UnavailablePrimitive(&'static str),

    #[error("track width {track}px does not exceed viewport width {viewport}px, travel clamped to zero")]
    DegenerateLayout { track: f64, viewport: f64 },

    #[error("trigger geometry is stale, recomputing")]
    StaleGeometry,

    #[error("pin region has {0} panel(s), snapping needs at least two")]
    TooFewPanels(usize),
}
