//! Drawing records produced by the layout engine.
//!
//! A record is one drawing primitive (rectangle or circle) tagged with the
//! drawing layer it belongs on. Records carry no identity beyond their
//! position in the emitted sequence.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A 2D point in drawing coordinates (mm).
///
/// X runs across the tape, Y along the feed direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate (mm).
    pub x: f64,
    /// Y coordinate (mm).
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle given by two opposite corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// First corner.
    pub min: Point,
    /// Opposite corner.
    pub max: Point,
}

impl Rect {
    /// Creates a rectangle from two corners.
    #[must_use]
    pub const fn from_corners(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Creates a rectangle centred on `centre` with the given half-extents.
    #[must_use]
    pub fn centred(centre: Point, half_x: f64, half_y: f64) -> Self {
        Self {
            min: Point::new(centre.x - half_x, centre.y - half_y),
            max: Point::new(centre.x + half_x, centre.y + half_y),
        }
    }

    /// Returns the centre point.
    #[must_use]
    pub fn centre(&self) -> Point {
        Point::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    /// Returns the extent along X.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Returns the extent along Y.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}

/// A circle with a stroke width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    /// Centre point.
    pub centre: Point,
    /// Radius (mm).
    pub radius: f64,
    /// Outline stroke width (mm). Zero draws a filled circle.
    pub width: f64,
}

impl Circle {
    /// Creates a circle with zero stroke width.
    #[must_use]
    pub const fn filled(centre: Point, radius: f64) -> Self {
        Self {
            centre,
            radius,
            width: 0.0,
        }
    }

    /// Returns the point on the circle used to encode its radius.
    ///
    /// The radius is expressed as an offset from the centre along X.
    #[must_use]
    pub fn radius_point(&self) -> Point {
        Point::new(self.centre.x + self.radius, self.centre.y)
    }
}

/// A drawing primitive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    /// Rectangle.
    Rect(Rect),
    /// Circle.
    Circle(Circle),
}

/// A numbered drawing layer in the target CAD tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DrawingLayer(pub u8);

impl DrawingLayer {
    /// Documentation layer, used for the tape body.
    pub const DOCUMENTATION: Self = Self(51);
    /// Holes layer, used for sprocket holes.
    pub const HOLES: Self = Self(45);

    /// Returns the layer number.
    #[must_use]
    pub const fn id(self) -> u8 {
        self.0
    }
}

impl fmt::Display for DrawingLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Layer assignment for the three emission passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerMap {
    /// Layer for the tape outline.
    pub tape_body: DrawingLayer,
    /// Layer for sprocket holes.
    pub holes: DrawingLayer,
    /// Layer for parts. `None` keeps whatever layer the hole pass left active.
    pub parts: Option<DrawingLayer>,
}

impl LayerMap {
    /// Returns the layer part records are drawn on.
    #[must_use]
    pub fn part_layer(&self) -> DrawingLayer {
        self.parts.unwrap_or(self.holes)
    }
}

impl Default for LayerMap {
    fn default() -> Self {
        Self {
            tape_body: DrawingLayer::DOCUMENTATION,
            holes: DrawingLayer::HOLES,
            parts: None,
        }
    }
}

/// Which pass produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// Tape body outline.
    Outline,
    /// Sprocket hole.
    Hole,
    /// Seated part.
    Part,
}

/// One emitted drawing record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Pass that produced this record.
    pub kind: RecordKind,
    /// Layer the shape is drawn on.
    pub layer: DrawingLayer,
    /// The shape itself.
    pub shape: Shape,
}

impl Record {
    /// Creates a rectangle record.
    #[must_use]
    pub const fn rect(kind: RecordKind, layer: DrawingLayer, rect: Rect) -> Self {
        Self {
            kind,
            layer,
            shape: Shape::Rect(rect),
        }
    }

    /// Creates a circle record.
    #[must_use]
    pub const fn circle(kind: RecordKind, layer: DrawingLayer, circle: Circle) -> Self {
        Self {
            kind,
            layer,
            shape: Shape::Circle(circle),
        }
    }

    /// Returns the rectangle, if this record is one.
    #[must_use]
    pub const fn as_rect(&self) -> Option<&Rect> {
        match &self.shape {
            Shape::Rect(rect) => Some(rect),
            Shape::Circle(_) => None,
        }
    }

    /// Returns the circle, if this record is one.
    #[must_use]
    pub const fn as_circle(&self) -> Option<&Circle> {
        match &self.shape {
            Shape::Circle(circle) => Some(circle),
            Shape::Rect(_) => None,
        }
    }
}
