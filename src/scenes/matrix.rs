use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::host::Size;
use crate::palette::Palette;
use crate::render::{Align, Surface, TextStyle};

pub const MATRIX_GLYPHS: &str = "01アイウエオカキクケコサシスセソタチツテトナニヌネノハヒフヘホマミムメモヤユヨラリルレロワヲンABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789<>{}[]()+-*/=";

const HEAD_FLICKER: f64 = 0.05;
const HEAD_GLOW_BLUR: f64 = 15.0;

/// Column density and glyph size, chosen only by the small-viewport flag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RainMetrics {
    pub columns: usize,
    pub glyph_height: f64,
    pub font_px: f64,
}

impl RainMetrics {
    pub fn for_viewport(small: bool) -> Self {
        if small {
            Self {
                columns: 50,
                glyph_height: 14.0,
                font_px: 10.0,
            }
        } else {
            Self {
                columns: 80,
                glyph_height: 16.0,
                font_px: 12.0,
            }
        }
    }
}

#[derive(Clone, Debug)]
struct Column {
    x: f64,
    y: f64,
    speed: f64,
    glyphs: Vec<char>,
    head: usize,
}

impl Column {
    fn span(&self, glyph_height: f64) -> f64 {
        self.glyphs.len() as f64 * glyph_height
    }
}

/// Falling glyph columns. Columns are recycled in place when they leave the
/// surface, so the column count only changes on reseed.
pub struct MatrixRain {
    rng: SmallRng,
    alphabet: Vec<char>,
    metrics: RainMetrics,
    columns: Vec<Column>,
    height: f64,
}

impl MatrixRain {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            alphabet: MATRIX_GLYPHS.chars().collect(),
            metrics: RainMetrics::for_viewport(false),
            columns: Vec::new(),
            height: 0.0,
        }
    }

    pub fn reseed(&mut self, size: Size) {
        let metrics = RainMetrics::for_viewport(size.is_small());
        let count = metrics.columns;
        let spacing = size.width / count as f64;
        let min_glyphs = ((size.height * 2.0) / metrics.glyph_height).ceil().max(0.0) as usize;

        self.columns.clear();
        for i in 0..count {
            let extra = self.rng.gen_range(10..20);
            let glyphs = (0..min_glyphs + extra)
                .map(|_| self.alphabet[self.rng.gen_range(0..self.alphabet.len())])
                .collect();
            self.columns.push(Column {
                x: i as f64 * spacing + self.rng.gen::<f64>() * spacing,
                y: (i as f64 / count as f64) * -size.height * 0.5,
                speed: self.rng.gen::<f64>() * 2.5 + 1.5,
                glyphs,
                head: 0,
            });
        }
        self.metrics = metrics;
        self.height = size.height;
    }

    pub fn advance(&mut self) {
        let gh = self.metrics.glyph_height;
        let height = self.height;
        for column in &mut self.columns {
            column.y += column.speed;
            let span = column.span(gh);
            if column.y > height {
                column.y = -span + (column.y - height);
                column.head = 0;
            }
            if column.y < -span - height {
                column.y = -span * 0.5;
            }
            if self.rng.gen_bool(HEAD_FLICKER) {
                column.head = (column.head + 1) % column.glyphs.len().max(1);
            }
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface, palette: &Palette) {
        let gh = self.metrics.glyph_height;
        surface.set_font(self.metrics.font_px, Align::Center);
        let mut buf = [0u8; 4];
        for (ci, column) in self.columns.iter().enumerate() {
            let gold = ci % 3 == 0;
            let (base, glow) = if gold {
                (palette.rain_gold, palette.head_glow_gold)
            } else {
                (palette.rain_blue, palette.head_glow_blue)
            };
            let len = column.glyphs.len() as f64;
            for (gi, glyph) in column.glyphs.iter().enumerate() {
                let gy = column.y + gi as f64 * gh;
                if gy <= -gh * 2.0 || gy >= self.height + gh * 2.0 {
                    continue;
                }
                let is_head = gi == column.head;
                let brightness = if is_head {
                    1.0
                } else {
                    (1.0 - (gi as f64 / len) * 0.7).max(0.3) * 0.8
                };
                let style = TextStyle {
                    color: base.scale_alpha(brightness),
                    rotation: 0.0,
                    glow: is_head.then_some((HEAD_GLOW_BLUR, glow)),
                };
                surface.fill_text(glyph.encode_utf8(&mut buf), column.x, gy, &style);
            }
        }
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Glyphs carried by each column.
    pub fn glyph_counts(&self) -> Vec<usize> {
        self.columns.iter().map(|c| c.glyphs.len()).collect()
    }

    /// Top edge of each column.
    pub fn column_tops(&self) -> Vec<f64> {
        self.columns.iter().map(|c| c.y).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RecordingSurface;

    #[test]
    fn density_depends_only_on_small_flag() {
        for width in [320.0, 500.0, 767.9] {
            let mut rain = MatrixRain::new(1);
            rain.reseed(Size::new(width, 700.0));
            assert_eq!(rain.column_count(), 50, "width {width}");
        }
        for width in [768.0, 1280.0, 3840.0] {
            let mut rain = MatrixRain::new(1);
            rain.reseed(Size::new(width, 700.0));
            assert_eq!(rain.column_count(), 80, "width {width}");
        }
    }

    #[test]
    fn columns_carry_enough_glyphs_to_cover_twice() {
        let mut rain = MatrixRain::new(3);
        rain.reseed(Size::new(1280.0, 800.0));
        let min = (1600.0f64 / 16.0).ceil() as usize;
        for n in rain.glyph_counts() {
            assert!(n >= min + 10 && n < min + 20, "{n}");
        }
    }

    #[test]
    fn columns_recycle_without_changing_count() {
        let mut rain = MatrixRain::new(9);
        rain.reseed(Size::new(1000.0, 300.0));
        for _ in 0..2_000 {
            rain.advance();
        }
        assert_eq!(rain.column_count(), 80);
        assert!(rain.column_tops().iter().all(|&y| y <= 300.0));
    }

    #[test]
    fn draws_only_near_visible_glyphs() {
        let mut rain = MatrixRain::new(5);
        rain.reseed(Size::new(800.0, 200.0));
        let mut surface = RecordingSurface::new(Size::new(800.0, 200.0));
        rain.draw(&mut surface, Palette::for_theme(crate::palette::Theme::Dark));
        let drawn = surface.text_count();
        let total: usize = rain.glyph_counts().iter().sum();
        assert!(drawn > 0 && drawn < total);
    }
}
