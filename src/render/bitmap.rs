//! Owned palette-indexed pixel storage.

use std::path::Path;

use super::scanline::{self, SpanTarget};
use super::Surface;
use crate::error::LoadError;
use crate::math::vec2::Vec2;
use crate::palette::{Color, Palette, TRANSPARENT};

/// A palette-indexed image.
///
/// Used both as the render target and as a quad texture. Pixels are stored
/// row-major, one [`Color`] per pixel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    pixels: Vec<Color>,
    width: u32,
    height: u32,
}

impl Image {
    /// Creates a fully transparent image.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![TRANSPARENT; (width as usize) * (height as usize)],
            width,
            height,
        }
    }

    /// Wraps existing row-major pixel data.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Color>) -> Result<Self, LoadError> {
        if pixels.len() != (width as usize) * (height as usize) {
            return Err(LoadError::InvalidDimensions {
                width,
                height,
                len: pixels.len(),
            });
        }
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// Load an image file (PNG, JPG, BMP...) and quantize it to `palette`.
    ///
    /// Pixels with zero alpha become transparent.
    pub fn from_file<P: AsRef<Path>>(path: P, palette: &Palette) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let img = image::open(path)?.to_rgba8();
        let (width, height) = img.dimensions();

        let pixels: Vec<Color> = img
            .pixels()
            .map(|p| {
                let [r, g, b, a] = p.0;
                let argb = ((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32);
                palette.nearest(argb)
            })
            .collect();

        log::debug!(
            "loaded texture {} ({}x{}, quantized to {} colors)",
            path.display(),
            width,
            height,
            palette.len()
        );

        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Sets every pixel to `color`.
    pub fn fill(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// Converts to ARGB8888 bytes (little-endian `u32` per pixel) for display.
    pub fn to_argb_bytes(&self, palette: &Palette) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|&color| palette.argb(color).to_le_bytes())
            .collect()
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }
}

impl SpanTarget for Image {
    fn rows(&self) -> i32 {
        self.height as i32
    }

    #[inline]
    fn fill_span(&mut self, y: i32, x_start: i32, x_end: i32, color: Color) {
        if y < 0 || y >= self.height as i32 {
            return;
        }
        let x_start = x_start.max(0);
        let x_end = x_end.min(self.width as i32 - 1);
        if x_start > x_end {
            return;
        }
        let row = y as usize * self.width as usize;
        self.pixels[row + x_start as usize..=row + x_end as usize].fill(color);
    }
}

impl Surface for Image {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn get_pixel(&self, x: i32, y: i32) -> Color {
        self.index(x, y).map_or(TRANSPARENT, |i| self.pixels[i])
    }

    #[inline]
    fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    fn fill_triangle(&mut self, p0: Vec2, p1: Vec2, p2: Vec2, color: Color) {
        scanline::fill_triangle(p0, p1, p2, self, color);
    }
}
