// src/lib.rs

//! rectpaint: a minimal Wayland client that repaints a shared-memory
//! buffer with a gradient and a batch of solid rectangles.

pub mod color;
pub mod compositor;
pub mod config;
pub mod display;
pub mod frame_loop;
pub mod surface;

pub use compositor::{draw_frame, Rect};
pub use surface::{Extent, PixelSurface, SurfaceError};
