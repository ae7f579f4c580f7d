//! Duration helpers for the scroll configuration

use std::time::Duration;

pub use crate::config::{EasingType, ScrollConfig};

/// Frame interval used when the configured rate is unusable
const FALLBACK_FRAME: Duration = Duration::from_millis(16);

pub trait ScrollConfigExt {
    /// How long one wheel gesture keeps the page gliding
    fn inertia_duration(&self) -> Duration;

    /// Interval between animation frames
    fn frame_interval(&self) -> Duration;

    /// False when smooth scrolling is switched off or has no duration, in
    /// which case every move is applied at once
    fn is_smooth(&self) -> bool;
}

impl ScrollConfigExt for ScrollConfig {
    fn inertia_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }

    fn frame_interval(&self) -> Duration {
        match self.animation_fps {
            0 => FALLBACK_FRAME,
            fps => Duration::from_secs(1) / fps,
        }
    }

    fn is_smooth(&self) -> bool {
        self.smooth_enabled && self.animation_duration_ms > 0
    }
}
