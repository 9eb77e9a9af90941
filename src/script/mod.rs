//! Drawing-script output.
//!
//! Renders layout [`Record`](crate::tape::Record)s as statements of a
//! line-oriented CAD scripting language (EAGLE `.scr` style). Each statement
//! ends with `;` and sits on its own line.
//!
//! # Statement Set
//!
//! ```text
//! GRID mm 1;                       // once per document
//! LAYER 51;                        // switch drawing layer
//! CHANGE WIDTH 0;                  // stroke width for following circles
//! RECT (0 0) (8 44);               // two opposite corners
//! CIRCLE (1.75 2) (2.5 2);         // centre, then a point on the circle
//! ```
//!
//! # Number Format
//!
//! Coordinates are rounded to a fixed number of decimals (4 by default) and
//! trailing zeros are stripped, so output is identical across platforms.

pub mod writer;

pub use writer::{plan_tape, render_document, write_document, ScriptWriter};

use std::fmt::Write as _;
use std::io;

use thiserror::Error;

use crate::tape::{DrawingLayer, Point, Rect};

/// Default number of decimals for coordinates.
pub const DEFAULT_DECIMALS: u8 = 4;

/// Largest supported number of decimals.
pub const MAX_DECIMALS: u8 = 9;

/// Errors that can occur while writing a script.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// Writing to the output sink failed.
    #[error("failed to write drawing script: {0}")]
    Io(#[from] io::Error),
}

/// Fixed-precision number formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberFormat {
    decimals: u8,
}

impl NumberFormat {
    /// Creates a format with the given number of decimals, clamped to
    /// [`MAX_DECIMALS`].
    #[must_use]
    pub fn new(decimals: u8) -> Self {
        Self {
            decimals: decimals.min(MAX_DECIMALS),
        }
    }

    /// Returns the number of decimals.
    #[must_use]
    pub const fn decimals(&self) -> u8 {
        self.decimals
    }

    /// Formats a value: fixed decimals, then trailing zeros and point removed.
    #[must_use]
    pub fn format(&self, value: f64) -> String {
        let mut text = format!("{value:.prec$}", prec = usize::from(self.decimals));
        if text.contains('.') {
            let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
            text.truncate(trimmed);
        }
        if text == "-0" {
            text = "0".to_string();
        }
        text
    }

    fn point(&self, point: Point) -> String {
        format!("({} {})", self.format(point.x), self.format(point.y))
    }
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self::new(DEFAULT_DECIMALS)
    }
}

/// A single drawing-script statement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Statement {
    /// `GRID mm 1;`
    Grid,
    /// `LAYER <id>;`
    Layer(DrawingLayer),
    /// `CHANGE WIDTH <w>;`
    ChangeWidth(f64),
    /// `RECT (<x1> <y1>) (<x2> <y2>);`
    Rect(Rect),
    /// `CIRCLE (<cx> <cy>) (<rx> <ry>);`
    Circle {
        /// Circle centre.
        centre: Point,
        /// A point on the circle.
        edge: Point,
    },
}

impl Statement {
    /// Renders the statement, including its terminating `;`.
    #[must_use]
    pub fn render(&self, format: &NumberFormat) -> String {
        let mut line = String::new();
        // Writing into a String cannot fail
        let _ = match self {
            Self::Grid => write!(line, "GRID mm 1;"),
            Self::Layer(layer) => write!(line, "LAYER {layer};"),
            Self::ChangeWidth(width) => write!(line, "CHANGE WIDTH {};", format.format(*width)),
            Self::Rect(rect) => write!(
                line,
                "RECT {} {};",
                format.point(rect.min),
                format.point(rect.max)
            ),
            Self::Circle { centre, edge } => write!(
                line,
                "CIRCLE {} {};",
                format.point(*centre),
                format.point(*edge)
            ),
        };
        line
    }
}
