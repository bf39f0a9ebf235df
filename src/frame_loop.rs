// src/frame_loop.rs

//! The presentation loop: paint, draw rects, present, pace, repeat.

use crate::color::Gradient;
use crate::compositor::{draw_frame, Rect};
use crate::config::Config;
use crate::display::presenter::{Damage, Presenter};
use anyhow::{Context, Result};
use log::{debug, info, trace};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    Running,
    Shutdown,
}

pub struct FrameLoop {
    rects: Vec<Rect>,
    background: Option<Gradient>,
    interval: Duration,
    max_frames: Option<u64>,
    frames: u64,
}

impl FrameLoop {
    pub fn new(config: &Config) -> Self {
        Self {
            rects: config.rects(),
            background: config.gradient(),
            interval: config.frame.interval(),
            max_frames: config.frame.max_frames,
            frames: 0,
        }
    }

    /// Frames presented so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Draws and presents one frame, unless the window has been closed.
    pub fn run_frame<P: Presenter>(&mut self, presenter: &mut P) -> Result<FrameStatus> {
        if presenter.should_close() {
            info!("Window closed after {} frames", self.frames);
            return Ok(FrameStatus::Shutdown);
        }

        let extent = {
            let mut surface = presenter
                .surface()
                .context("Failed to acquire a surface to draw into")?;
            if let Some(gradient) = self.background.as_mut() {
                gradient.paint(&mut surface);
            }
            draw_frame(&mut surface, &self.rects);
            surface.extent()
        };

        presenter
            .present(Damage::full(extent))
            .with_context(|| format!("Failed to present frame {}", self.frames))?;
        self.frames += 1;
        trace!("Presented frame {} at {}", self.frames, extent);

        match self.max_frames {
            Some(max) if self.frames >= max => {
                info!("Frame budget of {} reached", max);
                Ok(FrameStatus::Shutdown)
            }
            _ => Ok(FrameStatus::Running),
        }
    }

    /// Runs until the window closes or the frame budget is spent. Returns
    /// the number of frames presented.
    pub fn run<P: Presenter>(&mut self, presenter: &mut P) -> Result<u64> {
        debug!(
            "Frame loop: {} rects, interval {:?}, budget {:?}",
            self.rects.len(),
            self.interval,
            self.max_frames
        );
        while self.run_frame(presenter)? == FrameStatus::Running {
            std::thread::sleep(self.interval);
        }
        Ok(self.frames)
    }
}

#[cfg(test)]
mod tests;
