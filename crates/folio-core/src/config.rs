use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub navigation: NavigationConfig,
    #[serde(default)]
    pub pin: PinConfig,
    #[serde(default)]
    pub spy: SpyConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            scroll: ScrollConfig::default(),
            navigation: NavigationConfig::default(),
            pin: PinConfig::default(),
            spy: SpyConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Page layout file used when no `--layout` is given
    #[serde(default)]
    pub layout_path: Option<PathBuf>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            layout_path: None,
        }
    }
}

/// Easing curve applied to scroll animations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    /// Jump at the end of the animation
    None,
    Linear,
    Cubic,
    Quintic,
    /// Exponential ease-out, the curve used for page scrolling
    #[default]
    Expo,
    /// Quadratic ease-in-out, used for snapping
    QuadInOut,
}

/// Smooth scroll controller settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Animate wheel input and programmatic scrolls.
    /// When false every scroll is applied instantly.
    #[serde(default = "default_true")]
    pub smooth_enabled: bool,
    /// Duration of the inertial animation started by wheel input
    #[serde(default = "default_scroll_duration")]
    pub animation_duration_ms: u64,
    #[serde(default)]
    pub easing: EasingType,
    #[serde(default = "default_wheel_multiplier")]
    pub wheel_multiplier: f64,
    #[serde(default = "default_touch_multiplier")]
    pub touch_multiplier: f64,
    /// Frame rate used while an animation is in flight
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            smooth_enabled: default_true(),
            animation_duration_ms: default_scroll_duration(),
            easing: EasingType::default(),
            wheel_multiplier: default_wheel_multiplier(),
            touch_multiplier: default_touch_multiplier(),
            animation_fps: default_animation_fps(),
        }
    }
}

/// In-page navigation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationConfig {
    #[serde(default = "default_nav_duration")]
    pub duration_ms: u64,
    /// Added to the target's top edge
    #[serde(default)]
    pub offset_px: f64,
    #[serde(default)]
    pub easing: EasingType,
    /// Delay between a navigation finishing and the pin region being resumed
    #[serde(default = "default_settle_delay")]
    pub settle_delay_ms: u64,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_nav_duration(),
            offset_px: 0.0,
            easing: EasingType::default(),
            settle_delay_ms: default_settle_delay(),
        }
    }
}

/// Horizontal pin region settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PinConfig {
    /// Narrowest viewport that pins the region
    #[serde(default = "default_min_width")]
    pub min_width_px: f64,
    #[serde(default = "default_true")]
    pub snap_enabled: bool,
    /// Quiet period after the last input before snapping
    #[serde(default = "default_snap_delay")]
    pub snap_delay_ms: u64,
    #[serde(default = "default_snap_min_duration")]
    pub snap_min_duration_ms: u64,
    #[serde(default = "default_snap_max_duration")]
    pub snap_max_duration_ms: u64,
    #[serde(default = "default_snap_easing")]
    pub snap_easing: EasingType,
    /// Time constant of the rendered translation lag (0 = none)
    #[serde(default = "default_scrub")]
    pub scrub_ms: u64,
}

impl Default for PinConfig {
    fn default() -> Self {
        Self {
            min_width_px: default_min_width(),
            snap_enabled: default_true(),
            snap_delay_ms: default_snap_delay(),
            snap_min_duration_ms: default_snap_min_duration(),
            snap_max_duration_ms: default_snap_max_duration(),
            snap_easing: default_snap_easing(),
            scrub_ms: default_scrub(),
        }
    }
}

/// Scroll spy trigger placement.
///
/// A section becomes active when its top edge passes `start_viewport_ratio`
/// of the viewport height and stays active until its bottom edge passes
/// `end_viewport_ratio`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpyConfig {
    #[serde(default = "default_spy_ratio")]
    pub start_viewport_ratio: f64,
    #[serde(default = "default_spy_ratio")]
    pub end_viewport_ratio: f64,
}

impl Default for SpyConfig {
    fn default() -> Self {
        Self {
            start_viewport_ratio: default_spy_ratio(),
            end_viewport_ratio: default_spy_ratio(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds while idle
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Pixels represented by one terminal column
    #[serde(default = "default_cell_width")]
    pub cell_width_px: f64,
    /// Pixels represented by one terminal row
    #[serde(default = "default_cell_height")]
    pub cell_height_px: f64,
    /// Pixels scrolled per mouse wheel notch or j/k press
    #[serde(default = "default_wheel_step")]
    pub wheel_step_px: f64,
    /// "dark" or "light"
    #[serde(default = "default_theme")]
    pub theme: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            cell_width_px: default_cell_width(),
            cell_height_px: default_cell_height(),
            wheel_step_px: default_wheel_step(),
            theme: default_theme(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_scroll_duration() -> u64 {
    1200
}

fn default_wheel_multiplier() -> f64 {
    1.0
}

fn default_touch_multiplier() -> f64 {
    2.0
}

fn default_animation_fps() -> u32 {
    60
}

fn default_nav_duration() -> u64 {
    1500
}

fn default_settle_delay() -> u64 {
    200
}

fn default_min_width() -> f64 {
    901.0 // (min-width: 901px)
}

fn default_snap_delay() -> u64 {
    50
}

fn default_snap_min_duration() -> u64 {
    100
}

fn default_snap_max_duration() -> u64 {
    200
}

fn default_snap_easing() -> EasingType {
    EasingType::QuadInOut
}

fn default_scrub() -> u64 {
    1000
}

fn default_spy_ratio() -> f64 {
    0.6
}

fn default_tick_rate() -> u64 {
    100
}

fn default_cell_width() -> f64 {
    10.0
}

fn default_cell_height() -> f64 {
    20.0
}

fn default_wheel_step() -> f64 {
    120.0
}

fn default_theme() -> String {
    "dark".to_string()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific file, falling back to defaults when it is absent
    pub fn load_from(path: &std::path::Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to the default location
    pub fn save(&self) -> crate::Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &std::path::Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Get the configuration file path
    /// Always uses ~/.config/folio/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("folio")
            .join("config.toml")
    }
}
