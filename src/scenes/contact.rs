use crate::host::Size;
use crate::render::{Align, Backdrop, FrameCtx, LoopConfig, Scene, Surface, TextStyle};

pub const CODE_SNIPPETS: [&str; 36] = [
    "function()", "{}", "</>", "let", "const", "0101", "if()", "return;", "=>",
    "async", "await", "class", "import", "export", "interface", "type", "const", "var",
    "() =>", "[]", "{}", "null", "undefined", "true", "false", "this", "super",
    "try", "catch", "finally", "throw", "new", "typeof", "instanceof", "void", "delete",
];

/// Used when the contact section's height cannot be measured.
pub const FALLBACK_HEIGHT: f64 = 800.0;

const FONT_PX: f64 = 12.0;
const RISE_SPEED: f64 = 150.0;
const ROW_GAP: f64 = 60.0;
const OVERSCAN: f64 = 150.0;
const SWAY: f64 = 30.0;

/// Code tokens rising through the contact section. Positions are a pure
/// function of time, so there is no per-token state.
#[derive(Default)]
pub struct ContactScene;

impl ContactScene {
    pub fn new() -> Self {
        Self
    }

    /// Position of token `index` at scene time `t`.
    pub fn token_position(size: Size, index: usize, t: f64) -> (f64, f64) {
        let i = index as f64;
        let x = size.width / CODE_SNIPPETS.len() as f64 * i + (t + i).sin() * SWAY;
        let y = size.height - (t * RISE_SPEED + i * ROW_GAP).rem_euclid(size.height + OVERSCAN);
        (x, y)
    }
}

impl Scene for ContactScene {
    fn config(&self) -> LoopConfig {
        LoopConfig {
            fade_alpha: 0.01,
            time_step: 0.02,
            backdrop: Backdrop::Tinted,
        }
    }

    fn reseed(&mut self, _size: Size) {}

    fn draw(&mut self, surface: &mut dyn Surface, frame: &FrameCtx) {
        surface.set_font(FONT_PX, Align::Center);
        for (index, code) in CODE_SNIPPETS.iter().enumerate() {
            let (x, y) = Self::token_position(frame.size, index, frame.time);
            let style = TextStyle {
                color: frame.palette.snippet,
                rotation: (frame.time + index as f64) * 0.01,
                glow: None,
            };
            surface.fill_text(code, x, y, &style);
        }
    }

    fn element_count(&self) -> usize {
        CODE_SNIPPETS.len()
    }
}
