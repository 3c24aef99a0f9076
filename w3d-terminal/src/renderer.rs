/// ASCII down-sampler for showing a framebuffer in a terminal
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;
use w3d_core::Screen;

/// Character luminosity ramp for shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Terminal-sized character image of a framebuffer
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    char_buffer: Vec<char>,
    color_buffer: Vec<Color>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            char_buffer: vec![' '; size],
            color_buffer: vec![Color::Reset; size],
        }
    }

    pub fn clear(&mut self) {
        self.char_buffer.fill(' ');
        self.color_buffer.fill(Color::Reset);
    }

    /// Sample `screen` into the character grid.
    ///
    /// Each cell covers a block of pixels and shows the brightest lit pixel
    /// in it, so thin lines survive the down-sampling.
    pub fn rasterize(&mut self, screen: &Screen) {
        self.clear();
        if self.width == 0 || self.height == 0 {
            return;
        }

        let background = screen.background();
        for (row, pixels) in screen.rows().enumerate() {
            let cy = row * self.height / screen.height();
            for (col, &pixel) in pixels.iter().enumerate() {
                if pixel == background {
                    continue;
                }
                let cx = col * self.width / screen.width();
                let idx = cy * self.width + cx;

                let level = pixel.luminance();
                let char_index = ((level * (LUMINOSITY_RAMP.len() - 1) as f64).ceil() as usize)
                    .clamp(1, LUMINOSITY_RAMP.len() - 1);
                let current = LUMINOSITY_RAMP
                    .iter()
                    .position(|&c| c == self.char_buffer[idx])
                    .unwrap_or(0);
                if char_index >= current {
                    self.char_buffer[idx] = LUMINOSITY_RAMP[char_index];
                    self.color_buffer[idx] = Color::Rgb {
                        r: pixel.r,
                        g: pixel.g,
                        b: pixel.b,
                    };
                }
            }
        }
    }

    /// Character at a cell, row 0 being the top of the terminal
    pub fn cell(&self, col: usize, row: usize) -> Option<char> {
        if col >= self.width || row >= self.height {
            return None;
        }
        Some(self.char_buffer[row * self.width + col])
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let idx = y * self.width + x;
                writer.queue(SetForegroundColor(self.color_buffer[idx]))?;
                writer.queue(Print(self.char_buffer[idx]))?;
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}
