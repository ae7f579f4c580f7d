pub mod config;
pub mod engine;
pub mod error;
pub mod layout;
pub mod pin;
pub mod router;
pub mod script;
pub mod scroll;
pub mod spy;
pub mod trigger;

pub use config::{AppConfig, EasingType, ScrollConfig};
pub use engine::{EngineEvent, ScrollEngine, ScrollReason};
pub use error::{Degradation, Error, Result};
pub use layout::{Geometry, PageLayout, Rect, Viewport};
