//! Smooth scrolling for the page
//!
//! Owns the virtual scroll position. Wheel input is turned into an inertial
//! animation and programmatic `scroll_to` requests animate toward a target
//! with a caller-chosen duration and easing. Everything advances on `tick`.
//!
//! ## Atoms
//! - `easing` - Curves for page scrolls and panel snaps
//! - `timing` - Progress of an animation at a frame timestamp
//! - `config` - Durations derived from [`ScrollConfig`]
//!
//! ## Controller
//! - `animation` - [`SmoothScrollController`] combining the atoms
//!
//! # Usage
//!
//! ```ignore
//! use std::time::Duration;
//! use folio_core::scroll::{ScrollToOptions, SmoothScrollController};
//!
//! let mut controller = SmoothScrollController::default();
//! controller.set_max_scroll(4000.0);
//!
//! let id = controller.scroll_to(1800.0, ScrollToOptions::default());
//!
//! // Once per animation frame
//! let frame = controller.tick(Duration::from_millis(16));
//! for (finished, outcome) in frame.finished {
//!     // `id` shows up here when the animation ends or is overridden
//! }
//! ```

pub mod config;
pub mod easing;
pub mod timing;

pub mod animation;

pub use animation::{ScrollFrame, ScrollId, ScrollOutcome, ScrollToOptions, SmoothScrollController};
pub use config::{ScrollConfig, ScrollConfigExt};
pub use easing::{EasingCurve, EasingType};
