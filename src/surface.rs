// src/surface.rs

//! Pixel surface model shared by the compositor and the display layer.
//!
//! A `PixelSurface` never owns its storage. Tests lend it a `Vec<u32>`,
//! the Wayland presenter lends it the mmap'd shared-memory region.

use std::fmt;

/// Dimensions of a pixel surface, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Extent {
    pub width: u32,
    pub height: u32,
}

impl Extent {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of pixels covered by this extent.
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl fmt::Display for Extent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Errors raised when building a surface over caller-provided storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    /// The pixel slice does not hold exactly `width * height` cells.
    LengthMismatch { extent: Extent, len: usize },
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceError::LengthMismatch { extent, len } => write!(
                f,
                "surface {} needs {} pixels, got {}",
                extent,
                extent.area(),
                len
            ),
        }
    }
}

impl std::error::Error for SurfaceError {}

/// A mutable, linearly addressed grid of packed 32-bit pixels.
///
/// Pixel `(x, y)` lives at index `x + y * extent.width`.
#[derive(Debug)]
pub struct PixelSurface<'a> {
    pixels: &'a mut [u32],
    extent: Extent,
}

impl<'a> PixelSurface<'a> {
    pub fn new(pixels: &'a mut [u32], extent: Extent) -> Result<Self, SurfaceError> {
        if pixels.len() != extent.area() {
            return Err(SurfaceError::LengthMismatch {
                extent,
                len: pixels.len(),
            });
        }
        Ok(Self { pixels, extent })
    }

    pub fn extent(&self) -> Extent {
        self.extent
    }

    pub fn pixels(&self) -> &[u32] {
        &*self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [u32] {
        &mut *self.pixels
    }

    /// Returns the pixel at `(x, y)`, or `None` outside the surface.
    pub fn get(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.extent.width || y >= self.extent.height {
            return None;
        }
        self.pixels
            .get(x as usize + y as usize * self.extent.width as usize)
            .copied()
    }

    pub fn fill(&mut self, color: u32) {
        self.pixels.fill(color);
    }
}
