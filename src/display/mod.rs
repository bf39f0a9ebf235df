// src/display/mod.rs
//! Display collaborator: the Wayland window the frames end up in.
//!
//! - `events`: shell events and the window state they drive
//! - `session`: connection, globals, toplevel window
//! - `shm`: shared-memory pixel buffers
//! - `presenter`: the trait the frame loop draws through
//! - `wayland` / `mock`: live and in-memory presenters

pub mod events;
pub mod mock;
pub mod presenter;
pub mod session;
pub mod shm;
pub mod wayland;

pub use events::{ShellEvent, ShellReply, WindowState, WindowStates};
pub use mock::MockPresenter;
pub use presenter::{Damage, Presenter};
pub use session::DisplaySession;
pub use shm::ShmBuffer;
pub use wayland::WaylandPresenter;
