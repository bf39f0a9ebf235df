// src/display/events.rs

//! Shell events and the window state they drive.
//!
//! The Wayland `Dispatch` impls only translate protocol events into
//! [`ShellEvent`] and carry out the [`ShellReply`] that
//! [`WindowState::handle`] returns. All the decisions live here, where
//! they can be exercised without a compositor.

use crate::surface::Extent;
use bitflags::bitflags;
use log::{debug, info, trace};

bitflags! {
    /// Toplevel states reported alongside a configure.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct WindowStates: u32 {
        const MAXIMIZED = 1 << 0;
        const FULLSCREEN = 1 << 1;
        const RESIZING = 1 << 2;
        const ACTIVATED = 1 << 3;
    }
}

impl WindowStates {
    /// Decodes the `xdg_toplevel.configure` state array: native-endian u32
    /// values where 1..=4 are maximized, fullscreen, resizing, activated.
    /// Unknown values and trailing bytes are ignored.
    pub fn from_wire(raw: &[u8]) -> Self {
        raw.chunks_exact(4)
            .map(|chunk| u32::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .fold(WindowStates::empty(), |states, value| {
                states
                    | match value {
                        1 => WindowStates::MAXIMIZED,
                        2 => WindowStates::FULLSCREEN,
                        3 => WindowStates::RESIZING,
                        4 => WindowStates::ACTIVATED,
                        _ => WindowStates::empty(),
                    }
            })
    }
}

/// Events the shell delivers to the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellEvent {
    /// `xdg_wm_base.ping`; must be answered with a pong.
    Ping { serial: u32 },
    /// `xdg_toplevel.configure`. A zero axis leaves the choice to the client.
    Configure {
        width: u32,
        height: u32,
        states: WindowStates,
    },
    /// `xdg_surface.configure`; must be acknowledged.
    SurfaceConfigure { serial: u32 },
    /// `xdg_toplevel.close`.
    Close,
}

/// What the protocol layer has to send back after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellReply {
    Pong(u32),
    AckConfigure(u32),
    Nothing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowState {
    pub extent: Extent,
    pub states: WindowStates,
    /// Set once the first surface configure has been acknowledged.
    pub configured: bool,
    pub should_close: bool,
}

impl WindowState {
    pub fn new(initial: Extent) -> Self {
        Self {
            extent: initial,
            states: WindowStates::empty(),
            configured: false,
            should_close: false,
        }
    }

    pub fn handle(&mut self, event: ShellEvent) -> ShellReply {
        match event {
            ShellEvent::Ping { serial } => {
                trace!("Shell ping {}", serial);
                ShellReply::Pong(serial)
            }
            ShellEvent::Configure {
                width,
                height,
                states,
            } => {
                let mut extent = self.extent;
                if width != 0 {
                    extent.width = width;
                }
                if height != 0 {
                    extent.height = height;
                }
                if extent != self.extent {
                    info!("Window resized {} -> {}", self.extent, extent);
                }
                debug!("configure: {}x{} states={:?}", width, height, states);
                self.extent = extent;
                self.states = states;
                ShellReply::Nothing
            }
            ShellEvent::SurfaceConfigure { serial } => {
                if !self.configured {
                    info!("Surface configured at {}", self.extent);
                }
                self.configured = true;
                ShellReply::AckConfigure(serial)
            }
            ShellEvent::Close => {
                info!("Close requested by compositor");
                self.should_close = true;
                ShellReply::Nothing
            }
        }
    }
}
