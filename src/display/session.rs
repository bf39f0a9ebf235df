// src/display/session.rs

//! Wayland connection, globals and the toplevel window.

use crate::config::WindowConfig;
use crate::display::events::{ShellEvent, ShellReply, WindowState, WindowStates};
use crate::display::presenter::Damage;
use crate::display::shm::ShmBuffer;
use crate::surface::Extent;
use anyhow::{anyhow, Context, Result};
use log::{debug, error, info, trace};
use wayland_client::{
    protocol::{wl_buffer, wl_compositor, wl_registry, wl_shm, wl_shm_pool, wl_surface},
    Connection, Dispatch, EventQueue, QueueHandle,
};
use wayland_protocols::xdg::shell::client::{xdg_surface, xdg_toplevel, xdg_wm_base};

/// State the event queue dispatches into.
pub struct SessionState {
    pub compositor: Option<wl_compositor::WlCompositor>,
    pub shm: Option<wl_shm::WlShm>,
    pub wm_base: Option<xdg_wm_base::XdgWmBase>,
    pub window: WindowState,
}

impl SessionState {
    fn new(initial: Extent) -> Self {
        Self {
            compositor: None,
            shm: None,
            wm_base: None,
            window: WindowState::new(initial),
        }
    }
}

/// Everything needed to talk to the compositor for one window.
///
/// Owned by `main` for the lifetime of the process; there are no global
/// protocol handles.
pub struct DisplaySession {
    conn: Connection,
    queue: EventQueue<SessionState>,
    qh: QueueHandle<SessionState>,
    state: SessionState,
    shm: wl_shm::WlShm,
    surface: wl_surface::WlSurface,
    xdg_surface: xdg_surface::XdgSurface,
    toplevel: xdg_toplevel::XdgToplevel,
}

impl DisplaySession {
    /// Connects to `$WAYLAND_DISPLAY`, binds the required globals and maps
    /// a toplevel window. Returns once the first configure is acknowledged.
    pub fn connect(window: &WindowConfig) -> Result<Self> {
        let conn = Connection::connect_to_env().context("Can't connect to Wayland display")?;
        info!("Connected to display");

        let mut queue = conn.new_event_queue::<SessionState>();
        let qh = queue.handle();
        let mut state = SessionState::new(window.extent());

        let _registry = conn.display().get_registry(&qh, ());
        queue
            .roundtrip(&mut state)
            .context("Failed initial Wayland roundtrip")?;

        let compositor = state
            .compositor
            .clone()
            .ok_or_else(|| anyhow!("Can't find wl_compositor"))?;
        let wm_base = state
            .wm_base
            .clone()
            .ok_or_else(|| anyhow!("Can't find xdg_wm_base"))?;
        let shm = state
            .shm
            .clone()
            .ok_or_else(|| anyhow!("Can't find wl_shm"))?;
        info!("Found compositor, wm base and shm");

        let surface = compositor.create_surface(&qh, ());
        let xdg_surface = wm_base.get_xdg_surface(&surface, &qh, ());
        let toplevel = xdg_surface.get_toplevel(&qh, ());
        toplevel.set_title(window.title.clone());
        toplevel.set_app_id(window.app_id.clone());
        surface.commit();

        while !state.window.configured {
            queue
                .blocking_dispatch(&mut state)
                .context("Failed waiting for the initial configure")?;
        }
        info!("Toplevel window mapped at {}", state.window.extent);

        Ok(Self {
            conn,
            queue,
            qh,
            state,
            shm,
            surface,
            xdg_surface,
            toplevel,
        })
    }

    pub fn window(&self) -> &WindowState {
        &self.state.window
    }

    /// Allocates a shared-memory buffer for `extent`.
    pub fn allocate_buffer(&self, extent: Extent) -> Result<ShmBuffer> {
        ShmBuffer::allocate(&self.shm, &self.qh, extent)
    }

    /// Attaches `buffer`, damages, commits, then roundtrips so pending shell
    /// events are handled before the next frame.
    pub fn present(&mut self, buffer: &ShmBuffer, damage: Damage) -> Result<()> {
        trace!("attach + damage {:?} + commit", damage);
        self.surface.attach(Some(buffer.wl_buffer()), 0, 0);
        self.surface.damage(damage.x, damage.y, damage.width, damage.height);
        self.surface.commit();
        self.queue
            .roundtrip(&mut self.state)
            .context("Wayland roundtrip failed")?;
        Ok(())
    }
}

impl Drop for DisplaySession {
    fn drop(&mut self) {
        debug!("DisplaySession: destroying window");
        self.toplevel.destroy();
        self.xdg_surface.destroy();
        self.surface.destroy();
        if let Err(e) = self.conn.flush() {
            error!("DisplaySession: flush on drop failed: {}", e);
        }
    }
}

// --- Dispatch Implementations ---

impl Dispatch<wl_registry::WlRegistry, ()> for SessionState {
    fn event(
        state: &mut Self,
        registry: &wl_registry::WlRegistry,
        event: wl_registry::Event,
        _: &(),
        _: &Connection,
        qh: &QueueHandle<Self>,
    ) {
        match event {
            wl_registry::Event::Global {
                name,
                interface,
                version,
            } => {
                trace!(
                    "Wayland global: name={}, interface={}, version={}",
                    name,
                    interface,
                    version
                );
                let version = 1.min(version);
                match interface.as_str() {
                    "wl_compositor" => {
                        let compositor = registry
                            .bind::<wl_compositor::WlCompositor, _, _>(name, version, qh, ());
                        state.compositor = Some(compositor);
                    }
                    "wl_shm" => {
                        let shm = registry.bind::<wl_shm::WlShm, _, _>(name, version, qh, ());
                        state.shm = Some(shm);
                    }
                    "xdg_wm_base" => {
                        let wm_base =
                            registry.bind::<xdg_wm_base::XdgWmBase, _, _>(name, version, qh, ());
                        state.wm_base = Some(wm_base);
                    }
                    _ => {}
                }
            }
            wl_registry::Event::GlobalRemove { name } => {
                debug!("Wayland global removed: name={}", name);
            }
            _ => {}
        }
    }
}

impl Dispatch<xdg_wm_base::XdgWmBase, ()> for SessionState {
    fn event(
        state: &mut Self,
        wm_base: &xdg_wm_base::XdgWmBase,
        event: xdg_wm_base::Event,
        _: &(),
        _: &Connection,
        _: &QueueHandle<Self>,
    ) {
        if let xdg_wm_base::Event::Ping { serial } = event {
            if let ShellReply::Pong(serial) = state.window.handle(ShellEvent::Ping { serial }) {
                wm_base.pong(serial);
            }
        }
    }
}

impl Dispatch<xdg_surface::XdgSurface, ()> for SessionState {
    fn event(
        state: &mut Self,
        xdg_surface: &xdg_surface::XdgSurface,
        event: xdg_surface::Event,
        _: &(),
        _: &Connection,
        _: &QueueHandle<Self>,
    ) {
        if let xdg_surface::Event::Configure { serial } = event {
            if let ShellReply::AckConfigure(serial) =
                state.window.handle(ShellEvent::SurfaceConfigure { serial })
            {
                xdg_surface.ack_configure(serial);
            }
        }
    }
}

impl Dispatch<xdg_toplevel::XdgToplevel, ()> for SessionState {
    fn event(
        state: &mut Self,
        _: &xdg_toplevel::XdgToplevel,
        event: xdg_toplevel::Event,
        _: &(),
        _: &Connection,
        _: &QueueHandle<Self>,
    ) {
        let shell_event = match event {
            xdg_toplevel::Event::Configure {
                width,
                height,
                states,
            } => ShellEvent::Configure {
                width: u32::try_from(width).unwrap_or(0),
                height: u32::try_from(height).unwrap_or(0),
                states: WindowStates::from_wire(&states),
            },
            xdg_toplevel::Event::Close => ShellEvent::Close,
            _ => return,
        };
        state.window.handle(shell_event);
    }
}

impl Dispatch<wl_compositor::WlCompositor, ()> for SessionState {
    fn event(
        _: &mut Self,
        _: &wl_compositor::WlCompositor,
        _: wl_compositor::Event,
        _: &(),
        _: &Connection,
        _: &QueueHandle<Self>,
    ) {
    }
}

impl Dispatch<wl_surface::WlSurface, ()> for SessionState {
    fn event(
        _: &mut Self,
        _: &wl_surface::WlSurface,
        _: wl_surface::Event,
        _: &(),
        _: &Connection,
        _: &QueueHandle<Self>,
    ) {
    }
}

impl Dispatch<wl_shm::WlShm, ()> for SessionState {
    fn event(
        _: &mut Self,
        _: &wl_shm::WlShm,
        event: wl_shm::Event,
        _: &(),
        _: &Connection,
        _: &QueueHandle<Self>,
    ) {
        if let wl_shm::Event::Format { format } = event {
            trace!("wl_shm format: {:?}", format);
        }
    }
}

impl Dispatch<wl_shm_pool::WlShmPool, ()> for SessionState {
    fn event(
        _: &mut Self,
        _: &wl_shm_pool::WlShmPool,
        _: wl_shm_pool::Event,
        _: &(),
        _: &Connection,
        _: &QueueHandle<Self>,
    ) {
    }
}

impl Dispatch<wl_buffer::WlBuffer, ()> for SessionState {
    fn event(
        _: &mut Self,
        _: &wl_buffer::WlBuffer,
        event: wl_buffer::Event,
        _: &(),
        _: &Connection,
        _: &QueueHandle<Self>,
    ) {
        if let wl_buffer::Event::Release = event {
            trace!("wl_buffer released");
        }
    }
}
