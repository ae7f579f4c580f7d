//! Easing curves for programmatic scrolls
//!
//! Page scrolling and navigation decelerate exponentially; snapping between
//! gallery panels eases in and out so the short hop reads as a settle.

pub use crate::config::EasingType;

pub trait EasingCurve {
    /// Eased fraction for linear progress `t`, both in [0, 1]
    fn ease(&self, t: f64) -> f64;

    /// Position between `from` and `to` after linear progress `t`
    fn interpolate(&self, from: f64, to: f64, t: f64) -> f64 {
        from + (to - from) * self.ease(t)
    }
}

impl EasingCurve for EasingType {
    fn ease(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            // Step: hold until the end
            EasingType::None => t.floor(),
            EasingType::Linear => t,
            EasingType::Cubic => out_pow(t, 3),
            EasingType::Quintic => out_pow(t, 5),
            EasingType::Expo => expo_out(t),
            EasingType::QuadInOut => quad_in_out(t),
        }
    }
}

/// 1 - (1 - t)^n
fn out_pow(t: f64, n: i32) -> f64 {
    1.0 - (1.0 - t).powi(n)
}

/// Reaches 1 slightly before t = 1 and stays there, so the tail of a long
/// scroll does not crawl
fn expo_out(t: f64) -> f64 {
    if t == 0.0 {
        return 0.0;
    }
    (1.001 - 2f64.powf(-10.0 * t)).min(1.0)
}

fn quad_in_out(t: f64) -> f64 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (2.0 - 2.0 * t).powi(2) / 2.0
    }
}
