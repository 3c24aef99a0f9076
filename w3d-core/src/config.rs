/// Tunable defaults for the interpreter and rasterizer
use crate::screen::Color;

/// Framebuffer width in pixels
pub const DEFAULT_WIDTH: usize = 500;
/// Framebuffer height in pixels
pub const DEFAULT_HEIGHT: usize = 500;

/// Segments per circle and per parametric curve (a step of 0.01)
pub const CURVE_SEGMENTS: usize = 100;
/// Latitude and longitude divisions of a sphere
pub const SPHERE_RESOLUTION: usize = 10;
/// Tube and ring divisions of a torus
pub const TORUS_RESOLUTION: usize = 10;

/// Lines starting with this character are ignored
pub const COMMENT_MARKER: char = '#';
/// Script name that selects standard input instead of a file
pub const STDIN_SENTINEL: &str = "stdin";

/// Color used by every geometry command
pub const DRAW_COLOR: Color = Color::new(0, 255, 0);
/// Color the framebuffer is cleared to
pub const BACKGROUND: Color = Color::new(0, 0, 0);

/// Interpreter configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub width: usize,
    pub height: usize,
    pub curve_segments: usize,
    pub sphere_resolution: usize,
    pub torus_resolution: usize,
    pub draw_color: Color,
    pub background: Color,
}

impl Config {
    /// Default configuration with a custom framebuffer size
    pub fn with_size(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            curve_segments: CURVE_SEGMENTS,
            sphere_resolution: SPHERE_RESOLUTION,
            torus_resolution: TORUS_RESOLUTION,
            draw_color: DRAW_COLOR,
            background: BACKGROUND,
        }
    }
}
