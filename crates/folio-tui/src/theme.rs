use ratatui::style::Color;

/// Which palette is in use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Dark,
    Light,
}

impl ThemeMode {
    /// Unknown names fall back to dark
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "light" => Self::Light,
            _ => Self::Dark,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

/// Runtime theme with configurable colors
#[derive(Debug, Clone)]
pub struct Theme {
    pub mode: ThemeMode,

    // Background colors
    pub bg0: Color,
    pub bg1: Color,
    pub bg2: Color,

    // Foreground colors
    pub fg0: Color,
    pub fg1: Color,
    pub grey: Color,

    // Semantic colors
    pub accent: Color,
    /// Active navigation link
    pub active: Color,
    /// Pinned section and track
    pub pin: Color,
    pub suspended: Color,
    pub viewport: Color,
    /// Alternating section fills
    pub section_a: Color,
    pub section_b: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
        }
    }

    pub fn from_name(name: &str) -> Self {
        Self::for_mode(ThemeMode::from_name(name))
    }

    pub fn dark() -> Self {
        Self {
            mode: ThemeMode::Dark,
            bg0: Color::Rgb(0x28, 0x28, 0x28),
            bg1: Color::Rgb(0x32, 0x30, 0x2f),
            bg2: Color::Rgb(0x45, 0x40, 0x3d),
            fg0: Color::Rgb(0xd4, 0xbe, 0x98),
            fg1: Color::Rgb(0xdd, 0xc7, 0xa1),
            grey: Color::Rgb(0x92, 0x83, 0x74),
            accent: Color::Rgb(0x89, 0xb4, 0x82),
            active: Color::Rgb(0xd8, 0xa6, 0x57),
            pin: Color::Rgb(0xd3, 0x86, 0x9b),
            suspended: Color::Rgb(0xe7, 0x8a, 0x4e),
            viewport: Color::Rgb(0x7d, 0xae, 0xa3),
            section_a: Color::Rgb(0x32, 0x30, 0x2f),
            section_b: Color::Rgb(0x3c, 0x38, 0x36),
        }
    }

    pub fn light() -> Self {
        Self {
            mode: ThemeMode::Light,
            bg0: Color::Rgb(0xfb, 0xf1, 0xc7),
            bg1: Color::Rgb(0xf4, 0xe8, 0xbe),
            bg2: Color::Rgb(0xeb, 0xdb, 0xb2),
            fg0: Color::Rgb(0x65, 0x47, 0x35),
            fg1: Color::Rgb(0x4f, 0x38, 0x29),
            grey: Color::Rgb(0x92, 0x83, 0x74),
            accent: Color::Rgb(0x6c, 0x78, 0x2e),
            active: Color::Rgb(0xb4, 0x71, 0x09),
            pin: Color::Rgb(0x94, 0x5e, 0x80),
            suspended: Color::Rgb(0xc3, 0x5e, 0x0a),
            viewport: Color::Rgb(0x45, 0x70, 0x7a),
            section_a: Color::Rgb(0xf4, 0xe8, 0xbe),
            section_b: Color::Rgb(0xeb, 0xdb, 0xb2),
        }
    }

    /// The other palette
    pub fn toggled(&self) -> Self {
        Self::for_mode(self.mode.toggled())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_round_trips() {
        let theme = Theme::from_name("dark");
        assert_eq!(theme.toggled().mode, ThemeMode::Light);
        assert_eq!(theme.toggled().toggled().mode, ThemeMode::Dark);
        assert_eq!(Theme::from_name("LIGHT").mode, ThemeMode::Light);
        assert_eq!(Theme::from_name("solarized").mode, ThemeMode::Dark);
    }
}
