// src/display/presenter.rs

//! The seam between the frame loop and whatever shows the pixels.

use crate::surface::{Extent, PixelSurface};
use anyhow::Result;

/// A region of the surface that changed since the last present, in
/// surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Damage {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Damage {
    /// Damage covering the whole surface.
    pub fn full(extent: Extent) -> Self {
        Self {
            x: 0,
            y: 0,
            width: i32::try_from(extent.width).unwrap_or(i32::MAX),
            height: i32::try_from(extent.height).unwrap_or(i32::MAX),
        }
    }
}

/// Owns a presentable pixel buffer and the connection that displays it.
///
/// The frame loop calls `surface()` to draw, then `present()` to hand the
/// frame over. `present()` also processes pending shell events, which is
/// how `should_close()` and `extent()` change.
pub trait Presenter {
    /// Current window size. The next `surface()` matches it.
    fn extent(&self) -> Extent;

    /// Borrows the writable buffer, reallocating it first if the window
    /// size changed.
    fn surface(&mut self) -> Result<PixelSurface<'_>>;

    /// Displays the buffer and marks `damage` as changed, then blocks
    /// until pending events are processed.
    fn present(&mut self, damage: Damage) -> Result<()>;

    fn should_close(&self) -> bool;
}
