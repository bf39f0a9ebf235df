// src/config.rs

//! Configuration for the rectpaint client.
//!
//! Every struct deserializes from JSON with `#[serde(default)]`, so a config
//! file only needs the keys it wants to change. Defaults reproduce the
//! stock window: a 300x600 toplevel repainted every 100ms with the orange
//! gradient and one magenta rectangle.

use crate::color::{Color, Gradient};
use crate::compositor::Rect;
use crate::surface::Extent;
use anyhow::{Context, Result};
use log::{info, warn};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Environment variable naming a JSON config file.
pub const CONFIG_ENV_VAR: &str = "RECTPAINT_CONFIG";

/// Process-wide configuration, loaded on first access.
pub static CONFIG: Lazy<Config> = Lazy::new(Config::load_or_default);

// --- Top-Level Configuration Structure ---

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub frame: FrameConfig,
    pub background: BackgroundConfig,
    /// Rectangles painted every frame, in order.
    pub rects: RectList,
}

impl Config {
    /// Reads and parses a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Loads from `$RECTPAINT_CONFIG` when set, falling back to defaults.
    ///
    /// A broken config file is logged and ignored rather than aborting startup.
    pub fn load_or_default() -> Self {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => match Config::load(Path::new(&path)) {
                Ok(config) => {
                    info!("Loaded config from {}", Path::new(&path).display());
                    config
                }
                Err(e) => {
                    warn!("{:#}. Using default configuration.", e);
                    Config::default()
                }
            },
            None => Config::default(),
        }
    }

    /// The rectangles as the compositor consumes them.
    pub fn rects(&self) -> Vec<Rect> {
        self.rects.0.iter().map(RectConfig::to_rect).collect()
    }

    /// The background painter, if the background is enabled.
    pub fn gradient(&self) -> Option<Gradient> {
        self.background.enabled.then(|| {
            let [r, g, b] = self.background.seed;
            Gradient::new(r, g, b)
        })
    }
}

// --- Window Configuration ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Used until the compositor suggests a size of its own.
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub app_id: String,
}

impl WindowConfig {
    pub fn extent(&self) -> Extent {
        Extent::new(self.width, self.height)
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            width: 300,
            height: 600,
            title: "rectpaint".to_string(),
            app_id: "rectpaint".to_string(),
        }
    }
}

// --- Frame Pacing ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FrameConfig {
    /// Fixed delay between presented frames, in milliseconds.
    pub interval_ms: u64,
    /// Stop after this many frames. `None` runs until the window is closed.
    pub max_frames: Option<u64>,
}

impl FrameConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Default for FrameConfig {
    fn default() -> Self {
        FrameConfig {
            interval_ms: 100,
            max_frames: None,
        }
    }
}

// --- Background ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BackgroundConfig {
    pub enabled: bool,
    /// Starting `[r, g, b]` of the gradient.
    pub seed: [u8; 3],
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        let (r, g, b) = Gradient::default().channels();
        BackgroundConfig {
            enabled: true,
            seed: [r, g, b],
        }
    }
}

// --- Rectangles ---

/// One rectangle as written in a config file.
///
/// `width` and `height` are end coordinates, exactly as the compositor
/// reads them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RectConfig {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub color: Color,
}

impl RectConfig {
    pub fn to_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height, self.color.to_xrgb())
    }
}

/// Wrapper so an absent `rects` key yields the stock rectangle while an
/// explicit `[]` yields none.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct RectList(pub Vec<RectConfig>);

impl Default for RectList {
    fn default() -> Self {
        RectList(vec![RectConfig {
            x: 20,
            y: 20,
            width: 100,
            height: 200,
            color: Color::Packed(0xff00ff),
        }])
    }
}
