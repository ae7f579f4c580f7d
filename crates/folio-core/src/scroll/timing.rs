//! Frame-time calculations for scroll animations
//!
//! Timestamps are offsets from page start supplied by the host frame loop,
//! never read from a clock here.

use std::time::Duration;

/// Calculate animation progress (0.0 to 1.0) at `now` for an animation
/// that started at `start`
#[inline]
pub fn progress(start: Duration, now: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    let elapsed = now.saturating_sub(start);
    let ratio = elapsed.as_secs_f64() / duration.as_secs_f64();
    ratio.clamp(0.0, 1.0)
}

/// Check if animation is complete
#[inline]
pub fn is_complete(start: Duration, now: Duration, duration: Duration) -> bool {
    now.saturating_sub(start) >= duration
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress() {
        let start = Duration::from_millis(1000);
        let duration = Duration::from_millis(200);
        assert_eq!(progress(start, start, duration), 0.0);
        assert!((progress(start, Duration::from_millis(1100), duration) - 0.5).abs() < 1e-9);
        assert_eq!(progress(start, Duration::from_millis(5000), duration), 1.0);
        // A timestamp before the start counts as not started
        assert_eq!(progress(start, Duration::from_millis(10), duration), 0.0);
    }

    #[test]
    fn test_progress_zero_duration() {
        let start = Duration::from_millis(5);
        assert!((progress(start, start, Duration::ZERO) - 1.0).abs() < 0.001);
        assert!(is_complete(start, start, Duration::ZERO));
    }
}
