//! Sine bands, pointer spokes and the background grid of the hero.

use std::f64::consts::TAU;

use crate::host::Size;
use crate::palette::Palette;
use crate::render::{Paint, Point, Surface};

const WAVE_SEGMENTS: usize = 200;
const SPOKES: usize = 8;
const GLOW_RADIUS: f64 = 150.0;
const INFLUENCE_RANGE: f64 = 400.0;
pub const GRID_STEP: f64 = 150.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wave {
    pub amplitude: f64,
    pub frequency: f64,
    pub speed: f64,
    /// Baseline as a fraction of surface height.
    pub baseline: f64,
}

pub const HERO_WAVES: [Wave; 3] = [
    Wave { amplitude: 60.0, frequency: 0.002, speed: 0.5, baseline: 0.3 },
    Wave { amplitude: 80.0, frequency: 0.0015, speed: 0.3, baseline: 0.5 },
    Wave { amplitude: 50.0, frequency: 0.0025, speed: 0.4, baseline: 0.7 },
];

impl Wave {
    pub fn y_at(&self, x: f64, time: f64, height: f64) -> f64 {
        height * self.baseline + (x * self.frequency + time * self.speed).sin() * self.amplitude
    }

    fn outline(&self, size: Size, time: f64) -> Vec<Point> {
        (0..=WAVE_SEGMENTS)
            .map(|i| {
                let x = i as f64 / WAVE_SEGMENTS as f64 * size.width;
                (x, self.y_at(x, time, size.height))
            })
            .collect()
    }
}

pub fn draw_waves(surface: &mut dyn Surface, size: Size, time: f64, palette: &Palette) {
    for (wave, &color) in HERO_WAVES.iter().zip(palette.waves.iter()) {
        let base = size.height * wave.baseline;
        let mut points = wave.outline(size, time);

        let stroke = Paint::Linear {
            from: (0.0, base - wave.amplitude),
            to: (0.0, base + wave.amplitude),
            stops: vec![(0.0, color), (0.5, color.scale_alpha(5.0 / 3.0)), (1.0, color)],
        };
        surface.stroke_polyline(&points, 2.0, &stroke);

        points.push((size.width, size.height));
        points.push((0.0, size.height));
        let fill = Paint::Linear {
            from: (0.0, base - wave.amplitude * 2.0),
            to: (0.0, base + wave.amplitude * 2.0),
            stops: vec![(0.0, color.scale_alpha(1.0 / 3.0)), (1.0, color.with_alpha(0.0))],
        };
        surface.fill_polygon(&points, &fill);
    }
}

/// How strongly the pointer bends the spokes: 1 at the centre, 0 beyond
/// 400 px.
pub fn pointer_influence(center: Point, pointer: Point) -> f64 {
    let dx = pointer.0 - center.0;
    let dy = pointer.1 - center.1;
    (1.0 - (dx * dx + dy * dy).sqrt() / INFLUENCE_RANGE).max(0.0)
}

pub fn draw_pointer_glow(
    surface: &mut dyn Surface,
    size: Size,
    pointer: Point,
    time: f64,
    palette: &Palette,
) {
    let center = (size.width / 2.0, size.height / 2.0);
    let length = size.min_side() * 0.4;
    let influence = pointer_influence(center, pointer);
    let offset = (
        (pointer.0 - center.0) * influence * 0.3,
        (pointer.1 - center.1) * influence * 0.3,
    );

    for i in 0..SPOKES {
        let angle = i as f64 / SPOKES as f64 * TAU + time * 0.2;
        let end = (
            center.0 + angle.cos() * length + offset.0,
            center.1 + angle.sin() * length + offset.1,
        );
        let paint = Paint::Linear {
            from: center,
            to: end,
            stops: vec![
                (0.0, palette.spokes[0]),
                (0.5, palette.spokes[1]),
                (1.0, palette.spokes[2]),
            ],
        };
        surface.stroke_polyline(&[center, end], 1.0, &paint);
    }

    let glow = Paint::Radial {
        center: pointer,
        radius: GLOW_RADIUS,
        stops: vec![
            (0.0, palette.glow[0]),
            (0.5, palette.glow[1]),
            (1.0, palette.glow[2]),
        ],
    };
    surface.fill_circle(pointer, GLOW_RADIUS, &glow);
}

pub fn draw_grid(surface: &mut dyn Surface, size: Size, palette: &Palette) {
    let paint = Paint::Solid(palette.grid);
    let mut x = 0.0;
    while x < size.width {
        surface.stroke_polyline(&[(x, 0.0), (x, size.height)], 0.5, &paint);
        x += GRID_STEP;
    }
    let mut y = 0.0;
    while y < size.height {
        surface.stroke_polyline(&[(0.0, y), (size.width, y)], 0.5, &paint);
        y += GRID_STEP;
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use super::*;
    use crate::palette::Theme;
    use crate::render::{DrawOp, RecordingSurface};

    #[test]
    fn waves_oscillate_around_baseline() {
        let wave = HERO_WAVES[1];
        let quarter = PI / 2.0 / wave.frequency;
        assert!((wave.y_at(0.0, 0.0, 1000.0) - 500.0).abs() < 1e-9);
        assert!((wave.y_at(quarter, 0.0, 1000.0) - 580.0).abs() < 1e-9);
    }

    #[test]
    fn influence_fades_with_distance() {
        assert_eq!(pointer_influence((0.0, 0.0), (0.0, 0.0)), 1.0);
        assert!((pointer_influence((0.0, 0.0), (200.0, 0.0)) - 0.5).abs() < 1e-9);
        assert_eq!(pointer_influence((0.0, 0.0), (0.0, 900.0)), 0.0);
    }

    #[test]
    fn grid_line_count() {
        let mut surface = RecordingSurface::new(Size::new(600.0, 300.0));
        draw_grid(&mut surface, Size::new(600.0, 300.0), Palette::for_theme(Theme::Light));
        // x = 0,150,300,450 and y = 0,150
        assert_eq!(surface.ops().len(), 6);
    }

    #[test]
    fn waves_stroke_then_fill() {
        let size = Size::new(400.0, 400.0);
        let mut surface = RecordingSurface::new(size);
        draw_waves(&mut surface, size, 1.0, Palette::for_theme(Theme::Dark));
        let ops = surface.ops();
        assert_eq!(ops.len(), 6);
        match (&ops[0], &ops[1]) {
            (DrawOp::Polyline { points, .. }, DrawOp::Polygon { points: poly, .. }) => {
                assert_eq!(points.len(), WAVE_SEGMENTS + 1);
                assert_eq!(poly.len(), WAVE_SEGMENTS + 3);
            }
            other => panic!("unexpected ops {other:?}"),
        }
    }
}
