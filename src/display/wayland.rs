// src/display/wayland.rs

//! `Presenter` backed by a live Wayland session.

use crate::display::presenter::{Damage, Presenter};
use crate::display::session::DisplaySession;
use crate::display::shm::ShmBuffer;
use crate::surface::{Extent, PixelSurface};
use anyhow::{anyhow, Context, Result};
use log::info;

pub struct WaylandPresenter {
    // Dropped before the session so the buffer is destroyed on a live connection.
    buffer: Option<ShmBuffer>,
    session: DisplaySession,
}

impl WaylandPresenter {
    pub fn new(session: DisplaySession) -> Self {
        Self {
            buffer: None,
            session,
        }
    }
}

impl Presenter for WaylandPresenter {
    fn extent(&self) -> Extent {
        self.session.window().extent
    }

    fn surface(&mut self) -> Result<PixelSurface<'_>> {
        let extent = self.extent();
        if self.buffer.as_ref().map(ShmBuffer::extent) != Some(extent) {
            info!("Allocating {} frame buffer", extent);
            self.buffer = None;
            let buffer = self
                .session
                .allocate_buffer(extent)
                .with_context(|| format!("Failed to allocate {} shm buffer", extent))?;
            self.buffer = Some(buffer);
        }
        self.buffer
            .as_mut()
            .ok_or_else(|| anyhow!("No frame buffer allocated"))?
            .surface()
    }

    fn present(&mut self, damage: Damage) -> Result<()> {
        let buffer = self
            .buffer
            .as_ref()
            .ok_or_else(|| anyhow!("present() called before surface()"))?;
        self.session.present(buffer, damage)
    }

    fn should_close(&self) -> bool {
        self.session.window().should_close
    }
}
