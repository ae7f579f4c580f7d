//! Scroll-position triggers
//!
//! A trigger watches one region of the page and reports when the virtual
//! scroll position enters or leaves the window derived from that region.
//!
//! - `window` - Edge placement and window measurement
//! - `registry` - [`ScrollTriggerRegistry`], the registration table

pub mod registry;
pub mod window;

pub use registry::{
    ScrollTriggerRegistry, TriggerEvent, TriggerEventKind, TriggerHandle, TriggerState,
};
pub use window::{Edge, TriggerEnd, TriggerSpec, Window, Zone};
