/// RGB framebuffer with a depth buffer, and the presentation seam
use std::path::Path;

use crate::error::RenderError;

/// 24-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Scale every channel by `factor` (clamped to `[0, 1]`)
    pub fn shade(self, factor: f64) -> Self {
        let factor = factor.clamp(0.0, 1.0);
        let channel = |c: u8| (c as f64 * factor).round() as u8;
        Self::new(channel(self.r), channel(self.g), channel(self.b))
    }

    /// Perceived brightness in `[0, 1]`
    pub fn luminance(self) -> f64 {
        (0.2126 * self.r as f64 + 0.7152 * self.g as f64 + 0.0722 * self.b as f64) / 255.0
    }
}

/// Framebuffer with the origin at the bottom-left corner.
///
/// Pixels are stored top row first so the buffer can be handed to image
/// encoders and canvases unchanged.
pub struct Screen {
    width: usize,
    height: usize,
    background: Color,
    pixels: Vec<Color>,
    depth_buffer: Vec<f64>,
}

impl Screen {
    pub fn new(width: usize, height: usize, background: Color) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            background,
            pixels: vec![background; size],
            depth_buffer: vec![f64::NEG_INFINITY; size],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn clear(&mut self) {
        self.pixels.fill(self.background);
        self.depth_buffer.fill(f64::NEG_INFINITY);
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        let row = self.height - 1 - y as usize;
        Some(row * self.width + x as usize)
    }

    /// Set a pixel; points outside the screen are dropped
    pub fn plot(&mut self, x: i64, y: i64, color: Color) {
        if let Some(idx) = self.index(x, y) {
            self.pixels[idx] = color;
        }
    }

    /// Set a pixel if `depth` is nearer the viewer (larger z) than what is there
    pub fn plot_depth(&mut self, x: i64, y: i64, depth: f64, color: Color) {
        if let Some(idx) = self.index(x, y) {
            if depth > self.depth_buffer[idx] {
                self.depth_buffer[idx] = depth;
                self.pixels[idx] = color;
            }
        }
    }

    /// Color at `(x, y)` in screen coordinates (y up)
    pub fn pixel(&self, x: i64, y: i64) -> Option<Color> {
        self.index(x, y).map(|idx| self.pixels[idx])
    }

    /// Rows from the top of the screen down
    pub fn rows(&self) -> impl Iterator<Item = &[Color]> {
        self.pixels.chunks_exact(self.width.max(1))
    }

    /// Number of pixels differing from the background
    pub fn lit_pixels(&self) -> usize {
        self.pixels.iter().filter(|&&c| c != self.background).count()
    }

    pub fn to_rgb(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| [c.r, c.g, c.b]).collect()
    }

    pub fn to_rgba(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|c| [c.r, c.g, c.b, 255])
            .collect()
    }

    /// Write the framebuffer to `path`; the extension picks the format
    pub fn save(&self, path: &Path) -> Result<(), RenderError> {
        image::save_buffer(
            path,
            &self.to_rgb(),
            self.width as u32,
            self.height as u32,
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|source| RenderError::Save {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Shows a framebuffer to the user
pub trait Presenter {
    fn present(&mut self, screen: &Screen) -> Result<(), RenderError>;
}

/// Presenter for runs without a display; it only logs
#[derive(Debug, Default)]
pub struct HeadlessPresenter {
    presented: usize,
}

impl HeadlessPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times `display` was requested
    pub fn presented(&self) -> usize {
        self.presented
    }
}

impl Presenter for HeadlessPresenter {
    fn present(&mut self, screen: &Screen) -> Result<(), RenderError> {
        self.presented += 1;
        log::info!(
            "display requested ({}x{}, {} lit pixels)",
            screen.width(),
            screen.height(),
            screen.lit_pixels()
        );
        Ok(())
    }
}
