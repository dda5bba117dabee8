//! Scenes driven by [`crate::render::FrameLoop`].

pub mod contact;
pub mod hero;
pub mod matrix;
pub mod waves;

pub use contact::ContactScene;
pub use hero::HeroScene;
pub use matrix::{MatrixRain, RainMetrics};
