// src/display/mock.rs

use crate::display::events::{ShellEvent, ShellReply, WindowState};
use crate::display::presenter::{Damage, Presenter};
use crate::surface::{Extent, PixelSurface};
use anyhow::Result;
use std::collections::VecDeque;

/// In-memory presenter for tests.
///
/// Events pushed with `push_event` are delivered during the next
/// `present()`, the way a roundtrip delivers them on a real connection.
pub struct MockPresenter {
    window: WindowState,
    pixels: Vec<u32>,
    pixels_extent: Extent,
    pending: VecDeque<ShellEvent>,
    presented: Vec<Damage>,
    frames: Vec<Vec<u32>>,
    replies: Vec<ShellReply>,
}

impl MockPresenter {
    pub fn new(extent: Extent) -> Self {
        Self {
            window: WindowState::new(extent),
            pixels: vec![0; extent.area()],
            pixels_extent: extent,
            pending: VecDeque::new(),
            presented: Vec::new(),
            frames: Vec::new(),
            replies: Vec::new(),
        }
    }

    pub fn push_event(&mut self, event: ShellEvent) {
        self.pending.push_back(event);
    }

    pub fn window(&self) -> &WindowState {
        &self.window
    }

    /// Damage passed to each `present()` call, in order.
    pub fn presented(&self) -> &[Damage] {
        &self.presented
    }

    /// Snapshot of the buffer at each `present()` call.
    pub fn frames(&self) -> &[Vec<u32>] {
        &self.frames
    }

    pub fn replies(&self) -> &[ShellReply] {
        &self.replies
    }
}

impl Presenter for MockPresenter {
    fn extent(&self) -> Extent {
        self.window.extent
    }

    fn surface(&mut self) -> Result<PixelSurface<'_>> {
        if self.pixels_extent != self.window.extent {
            self.pixels_extent = self.window.extent;
            self.pixels = vec![0; self.pixels_extent.area()];
        }
        Ok(PixelSurface::new(&mut self.pixels, self.pixels_extent)?)
    }

    fn present(&mut self, damage: Damage) -> Result<()> {
        self.presented.push(damage);
        self.frames.push(self.pixels.clone());
        while let Some(event) = self.pending.pop_front() {
            let reply = self.window.handle(event);
            self.replies.push(reply);
        }
        Ok(())
    }

    fn should_close(&self) -> bool {
        self.window.should_close
    }
}
