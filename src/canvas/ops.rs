//! # Drawing Calls
//!
//! Inspectable record of the 2D-context calls issued against a surface.
//!
//! ```text
//! OverlayRenderer → DrawContext calls → DrawOp (recorded) / pixels (raster)
//! ```
//!
//! Each variant is one atomic call, so tests can assert on the exact
//! sequence (e.g. "cleared, never stroked").

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An RGBA stroke colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const TRANSPARENT: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Error returned when a colour string is not `#RGB`, `#RRGGBB` or `#RRGGBBAA`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid colour '{0}'")]
pub struct ParseColorError(pub String);

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseColorError(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(err)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }

        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
        let nibble = |i: usize| {
            u8::from_str_radix(&hex[i..i + 1], 16)
                .map(|n| n * 17)
                .map_err(|_| err())
        };

        match hex.len() {
            3 => Ok(Self::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
            6 => Ok(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Self {
                r: byte(0)?,
                g: byte(2)?,
                b: byte(4)?,
                a: byte(6)?,
            }),
            _ => Err(err()),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(
                f,
                "#{:02X}{:02X}{:02X}{:02X}",
                self.r, self.g, self.b, self.a
            )
        }
    }
}

/// A single call made against a surface or its 2D context.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Backing store resized (content and context state reset).
    Resize { width: u32, height: u32 },
    SetStrokeStyle(Color),
    SetLineWidth(f32),
    ClearRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    BeginPath,
    MoveTo { x: f32, y: f32 },
    LineTo { x: f32, y: f32 },
    ClosePath,
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    Stroke,
}

impl DrawOp {
    /// Whether this call changes pixels (as opposed to path/state bookkeeping).
    pub fn is_paint(&self) -> bool {
        matches!(self, DrawOp::ClearRect { .. } | DrawOp::Stroke)
    }
}
