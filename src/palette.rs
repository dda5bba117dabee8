//! Colours and themes shared by the canvas scenes.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Theme {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    /// Class name applied to the document root.
    pub fn class(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn from_class(class: &str) -> Option<Theme> {
        match class {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(self, a: f64) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    pub fn scale_alpha(self, k: f64) -> Self {
        self.with_alpha(self.a * k)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

const GOLD: Rgba = Rgba::new(184, 147, 74, 1.0);
const SKY: Rgba = Rgba::new(140, 187, 255, 1.0);
const AZURE: Rgba = Rgba::new(100, 150, 255, 1.0);
const CYAN: Rgba = Rgba::new(0, 217, 255, 1.0);
const TEAL: Rgba = Rgba::new(0, 150, 200, 1.0);

/// Cursor accent, identical in both themes.
pub const CURSOR: Rgba = Rgba::new(0, 170, 255, 1.0);

/// Per-theme colour set. Alphas are baked in where the scenes use them as-is;
/// glyph colours are multiplied by a per-glyph brightness at draw time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub background: Rgba,
    pub rain_gold: Rgba,
    pub rain_blue: Rgba,
    pub head_glow_gold: Rgba,
    pub head_glow_blue: Rgba,
    pub waves: [Rgba; 3],
    pub glow: [Rgba; 3],
    pub spokes: [Rgba; 3],
    pub grid: Rgba,
    pub snippet: Rgba,
}

const DARK: Palette = Palette {
    background: Rgba::new(2, 2, 2, 1.0),
    rain_gold: GOLD.const_alpha(0.7),
    rain_blue: SKY.const_alpha(0.6),
    head_glow_gold: GOLD.const_alpha(0.8),
    head_glow_blue: SKY.const_alpha(0.8),
    waves: [GOLD.const_alpha(0.15), SKY.const_alpha(0.12), GOLD.const_alpha(0.1)],
    glow: [SKY.const_alpha(0.08), GOLD.const_alpha(0.05), SKY.const_alpha(0.0)],
    spokes: [SKY.const_alpha(0.2), GOLD.const_alpha(0.15), SKY.const_alpha(0.0)],
    grid: SKY.const_alpha(0.02),
    snippet: CYAN.const_alpha(0.15),
};

const LIGHT: Palette = Palette {
    background: Rgba::new(250, 250, 250, 1.0),
    rain_gold: GOLD.const_alpha(0.5),
    rain_blue: AZURE.const_alpha(0.5),
    head_glow_gold: GOLD.const_alpha(0.6),
    head_glow_blue: AZURE.const_alpha(0.6),
    waves: [GOLD.const_alpha(0.25), SKY.const_alpha(0.2), GOLD.const_alpha(0.15)],
    glow: [SKY.const_alpha(0.15), GOLD.const_alpha(0.1), SKY.const_alpha(0.0)],
    spokes: [SKY.const_alpha(0.2), GOLD.const_alpha(0.15), SKY.const_alpha(0.0)],
    grid: AZURE.const_alpha(0.05),
    snippet: TEAL.const_alpha(0.25),
};

impl Rgba {
    const fn const_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }
}

impl Palette {
    pub fn for_theme(theme: Theme) -> &'static Palette {
        match theme {
            Theme::Dark => &DARK,
            Theme::Light => &LIGHT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn css_form() {
        assert_eq!(Rgba::new(2, 2, 2, 1.0).to_string(), "rgba(2, 2, 2, 1)");
        assert_eq!(GOLD.with_alpha(0.25).to_string(), "rgba(184, 147, 74, 0.25)");
    }

    #[test]
    fn alpha_is_clamped() {
        assert_eq!(SKY.with_alpha(3.0).a, 1.0);
        assert_eq!(SKY.scale_alpha(-1.0).a, 0.0);
    }

    #[test]
    fn themes_toggle_and_pick_backgrounds() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Palette::for_theme(Theme::Dark).background, Rgba::new(2, 2, 2, 1.0));
        assert_eq!(Palette::for_theme(Theme::Light).background, Rgba::new(250, 250, 250, 1.0));
    }
}
