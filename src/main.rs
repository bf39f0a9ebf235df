// src/main.rs

use rectpaint::{
    config::CONFIG,
    display::{DisplaySession, WaylandPresenter},
    frame_loop::FrameLoop,
};

use anyhow::Context;
use log::info;

/// Main entry point for `rectpaint`.
fn main() -> anyhow::Result<()> {
    // Default filter is "info" if RUST_LOG is not set.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    info!("Starting rectpaint...");

    let config = &*CONFIG;
    info!(
        "Window '{}' {}, {} rects, frame interval {:?}",
        config.window.title,
        config.window.extent(),
        config.rects.0.len(),
        config.frame.interval()
    );

    // Any failure here (no display, missing globals) is fatal.
    let session =
        DisplaySession::connect(&config.window).context("Failed to set up the Wayland window")?;
    let mut presenter = WaylandPresenter::new(session);

    info!("Starting frame loop...");
    let mut frame_loop = FrameLoop::new(config);
    let frames = frame_loop.run(&mut presenter)?;

    info!("rectpaint exited after {} frames.", frames);
    Ok(())
}
