// src/color.rs

//! Packed XRGB8888 colours and the animated gradient background.

use crate::surface::PixelSurface;
use serde::{Deserialize, Serialize};

/// Packs 8-bit channels into `0x00RRGGBB`.
pub const fn pack_xrgb(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

/// Splits a packed `0x??RRGGBB` value into its channels. The X byte is dropped.
pub const fn unpack_xrgb(pixel: u32) -> (u8, u8, u8) {
    ((pixel >> 16) as u8, (pixel >> 8) as u8, pixel as u8)
}

/// Colours a config file may name instead of writing out a packed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NamedColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

impl NamedColor {
    /// The packed `0x00RRGGBB` value drawn for this name.
    pub const fn to_xrgb(self) -> u32 {
        match self {
            NamedColor::Black => pack_xrgb(0, 0, 0),
            NamedColor::Red => pack_xrgb(205, 0, 0),
            NamedColor::Green => pack_xrgb(0, 205, 0),
            NamedColor::Yellow => pack_xrgb(205, 205, 0),
            NamedColor::Blue => pack_xrgb(0, 0, 238),
            NamedColor::Magenta => pack_xrgb(205, 0, 205),
            NamedColor::Cyan => pack_xrgb(0, 205, 205),
            NamedColor::White => pack_xrgb(229, 229, 229),
            NamedColor::BrightBlack => pack_xrgb(127, 127, 127),
            NamedColor::BrightRed => pack_xrgb(255, 0, 0),
            NamedColor::BrightGreen => pack_xrgb(0, 255, 0),
            NamedColor::BrightYellow => pack_xrgb(255, 255, 0),
            NamedColor::BrightBlue => pack_xrgb(92, 92, 255),
            NamedColor::BrightMagenta => pack_xrgb(255, 0, 255),
            NamedColor::BrightCyan => pack_xrgb(0, 255, 255),
            NamedColor::BrightWhite => pack_xrgb(255, 255, 255),
        }
    }
}

/// A colour as written in configuration.
///
/// Untagged so a config file may say `16711935`, `"BrightMagenta"` or
/// `[255, 0, 255]` for the same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Color {
    /// Already packed as `0x00RRGGBB`.
    Packed(u32),
    Named(NamedColor),
    Rgb(u8, u8, u8),
}

impl Color {
    pub const fn to_xrgb(self) -> u32 {
        match self {
            Color::Packed(pixel) => pixel,
            Color::Named(named) => named.to_xrgb(),
            Color::Rgb(r, g, b) => pack_xrgb(r, g, b),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::Packed(0)
    }
}

impl From<u32> for Color {
    fn from(pixel: u32) -> Self {
        Color::Packed(pixel)
    }
}

/// Per-pixel colour ramp painted under the rectangles every frame.
///
/// Each pixel takes the current `(r, g, b)`; a channel sitting at `0xff` is
/// then reset to zero and all three channels step by one. The state carries
/// over between frames, so the pattern drifts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gradient {
    r: u8,
    g: u8,
    b: u8,
}

impl Gradient {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn channels(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    pub fn paint(&mut self, surface: &mut PixelSurface<'_>) {
        for pixel in surface.pixels_mut() {
            *pixel = pack_xrgb(self.r, self.g, self.b);
            self.step();
        }
    }

    fn step(&mut self) {
        for channel in [&mut self.r, &mut self.g, &mut self.b] {
            if *channel == 0xff {
                *channel = 0;
            }
            *channel += 1;
        }
    }
}

impl Default for Gradient {
    fn default() -> Self {
        Gradient::new(0xff, 0x99, 0x00)
    }
}
