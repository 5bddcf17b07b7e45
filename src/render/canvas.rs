//! Pixel canvas with rectangle fills and a built-in 5x7 bitmap font

use anyhow::{Context, Result};
use image::{Rgb, RgbImage};
use std::path::Path;

pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
pub const GRID_GRAY: Rgb<u8> = Rgb([220, 220, 220]);

/// Glyph cell size in font units (before scaling)
pub const GLYPH_WIDTH: u32 = 5;
pub const GLYPH_HEIGHT: u32 = 7;
const GLYPH_ADVANCE: u32 = GLYPH_WIDTH + 1;

/// RGB drawing surface backed by an `image::RgbImage`.
pub struct Canvas {
    image: RgbImage,
}

impl Canvas {
    pub fn new(width: u32, height: u32, background: Rgb<u8>) -> Self {
        Self {
            image: RgbImage::from_pixel(width, height, background),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgb<u8> {
        *self.image.get_pixel(x, y)
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }

    /// Set one pixel, silently clipping anything outside the canvas.
    fn put(&mut self, x: i64, y: i64, color: Rgb<u8>) {
        if x >= 0 && y >= 0 && (x as u32) < self.width() && (y as u32) < self.height() {
            self.image.put_pixel(x as u32, y as u32, color);
        }
    }

    pub fn fill_rect(&mut self, x: i64, y: i64, width: u32, height: u32, color: Rgb<u8>) {
        for dy in 0..height as i64 {
            for dx in 0..width as i64 {
                self.put(x + dx, y + dy, color);
            }
        }
    }

    pub fn hline(&mut self, x0: i64, x1: i64, y: i64, color: Rgb<u8>) {
        for x in x0.min(x1)..=x0.max(x1) {
            self.put(x, y, color);
        }
    }

    pub fn vline(&mut self, x: i64, y0: i64, y1: i64, color: Rgb<u8>) {
        for y in y0.min(y1)..=y0.max(y1) {
            self.put(x, y, color);
        }
    }

    /// Width in pixels of `text` at the given scale.
    pub fn text_width(text: &str, scale: u32) -> u32 {
        let chars = text.chars().count() as u32;
        if chars == 0 {
            0
        } else {
            (chars * GLYPH_ADVANCE - 1) * scale
        }
    }

    /// Draw `text` with its top-left corner at (x, y).
    pub fn draw_text(&mut self, x: i64, y: i64, text: &str, scale: u32, color: Rgb<u8>) {
        let scale = scale.max(1) as i64;
        for (i, ch) in text.chars().enumerate() {
            let origin = x + i as i64 * GLYPH_ADVANCE as i64 * scale;
            for (row, bits) in glyph(ch).iter().enumerate() {
                for column in 0..GLYPH_WIDTH {
                    if bits & (1 << (GLYPH_WIDTH - 1 - column)) != 0 {
                        let px = origin + column as i64 * scale;
                        let py = y + row as i64 * scale;
                        self.fill_rect(px, py, scale as u32, scale as u32, color);
                    }
                }
            }
        }
    }

    /// Draw `text` horizontally centered on `center_x`.
    pub fn draw_text_centered(
        &mut self,
        center_x: i64,
        y: i64,
        text: &str,
        scale: u32,
        color: Rgb<u8>,
    ) {
        let half = Self::text_width(text, scale) as i64 / 2;
        self.draw_text(center_x - half, y, text, scale, color);
    }

    /// Draw `text` ending at `right_x`.
    pub fn draw_text_right(&mut self, right_x: i64, y: i64, text: &str, scale: u32, color: Rgb<u8>) {
        let width = Self::text_width(text, scale) as i64;
        self.draw_text(right_x - width, y, text, scale, color);
    }

    /// Draw `text` rotated 90 degrees counter-clockwise, reading bottom to top
    /// and starting at (x, bottom_y).
    pub fn draw_text_vertical(
        &mut self,
        x: i64,
        bottom_y: i64,
        text: &str,
        scale: u32,
        color: Rgb<u8>,
    ) {
        let scale = scale.max(1) as i64;
        for (i, ch) in text.chars().enumerate() {
            let origin = bottom_y - i as i64 * GLYPH_ADVANCE as i64 * scale;
            for (row, bits) in glyph(ch).iter().enumerate() {
                for column in 0..GLYPH_WIDTH {
                    if bits & (1 << (GLYPH_WIDTH - 1 - column)) != 0 {
                        let px = x + row as i64 * scale;
                        let py = origin - column as i64 * scale;
                        self.fill_rect(px, py, scale as u32, scale as u32, color);
                    }
                }
            }
        }
    }

    /// Encode the canvas as PNG (format chosen from the extension).
    pub fn save(&self, path: &Path) -> Result<()> {
        self.image
            .save(path)
            .with_context(|| format!("Failed to write image: {}", path.display()))
    }
}

/// Row bitmaps for one character, most significant of the 5 bits leftmost.
/// Unknown characters render as a hollow box.
fn glyph(ch: char) -> [u8; 7] {
    match ch.to_ascii_lowercase() {
        ' ' => [0; 7],
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        '-' => [0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000],
        '.' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b01100, 0b01100],
        '=' => [0b00000, 0b00000, 0b11111, 0b00000, 0b11111, 0b00000, 0b00000],
        '_' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b11111],
        'a' => [0b00000, 0b00000, 0b01110, 0b00001, 0b01111, 0b10001, 0b01111],
        'b' => [0b10000, 0b10000, 0b10110, 0b11001, 0b10001, 0b10001, 0b11110],
        'c' => [0b00000, 0b00000, 0b01110, 0b10000, 0b10000, 0b10001, 0b01110],
        'd' => [0b00001, 0b00001, 0b01101, 0b10011, 0b10001, 0b10001, 0b01111],
        'e' => [0b00000, 0b00000, 0b01110, 0b10001, 0b11111, 0b10000, 0b01110],
        'f' => [0b00110, 0b01001, 0b01000, 0b11100, 0b01000, 0b01000, 0b01000],
        'g' => [0b00000, 0b01111, 0b10001, 0b10001, 0b01111, 0b00001, 0b01110],
        'h' => [0b10000, 0b10000, 0b10110, 0b11001, 0b10001, 0b10001, 0b10001],
        'i' => [0b00100, 0b00000, 0b01100, 0b00100, 0b00100, 0b00100, 0b01110],
        'j' => [0b00010, 0b00000, 0b00110, 0b00010, 0b00010, 0b10010, 0b01100],
        'k' => [0b10000, 0b10000, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010],
        'l' => [0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'm' => [0b00000, 0b00000, 0b11010, 0b10101, 0b10101, 0b10001, 0b10001],
        'n' => [0b00000, 0b00000, 0b10110, 0b11001, 0b10001, 0b10001, 0b10001],
        'o' => [0b00000, 0b00000, 0b01110, 0b10001, 0b10001, 0b10001, 0b01110],
        'p' => [0b00000, 0b00000, 0b11110, 0b10001, 0b11110, 0b10000, 0b10000],
        'q' => [0b00000, 0b00000, 0b01101, 0b10011, 0b01111, 0b00001, 0b00001],
        'r' => [0b00000, 0b00000, 0b10110, 0b11001, 0b10000, 0b10000, 0b10000],
        's' => [0b00000, 0b00000, 0b01110, 0b10000, 0b01110, 0b00001, 0b11110],
        't' => [0b01000, 0b01000, 0b11100, 0b01000, 0b01000, 0b01001, 0b00110],
        'u' => [0b00000, 0b00000, 0b10001, 0b10001, 0b10001, 0b10011, 0b01101],
        'v' => [0b00000, 0b00000, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'w' => [0b00000, 0b00000, 0b10001, 0b10001, 0b10101, 0b10101, 0b01010],
        'x' => [0b00000, 0b00000, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001],
        'y' => [0b00000, 0b00000, 0b10001, 0b10001, 0b01111, 0b00001, 0b01110],
        'z' => [0b00000, 0b00000, 0b11111, 0b00010, 0b00100, 0b01000, 0b11111],
        _ => [0b11111, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11111],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_width() {
        assert_eq!(Canvas::text_width("", 1), 0);
        assert_eq!(Canvas::text_width("a", 1), 5);
        assert_eq!(Canvas::text_width("0.5", 2), 34);
    }

    #[test]
    fn test_fill_rect_clips_to_canvas() {
        let mut canvas = Canvas::new(4, 4, WHITE);
        canvas.fill_rect(-2, -2, 4, 4, BLACK);
        assert_eq!(canvas.pixel(0, 0), BLACK);
        assert_eq!(canvas.pixel(1, 1), BLACK);
        assert_eq!(canvas.pixel(2, 2), WHITE);
    }

    #[test]
    fn test_draw_text_sets_pixels() {
        let mut canvas = Canvas::new(10, 10, WHITE);
        canvas.draw_text(0, 0, "-", 1, BLACK);
        // middle row of '-' is fully lit
        assert_eq!(canvas.pixel(0, 3), BLACK);
        assert_eq!(canvas.pixel(4, 3), BLACK);
        assert_eq!(canvas.pixel(0, 0), WHITE);
    }
}
