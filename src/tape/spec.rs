//! Tape parameters.

use serde::{Deserialize, Serialize};

use crate::tape::error::{TapeError, TapeResult};
use crate::tape::record::Point;

/// Largest pocket count a single tape may draw.
///
/// A million pockets is several hundred metres of tape, well past any real
/// reel, and keeps the record count far from `usize` overflow.
pub const MAX_PART_COUNT: usize = 1_000_000;

/// Physical parameters of one carrier tape run, in millimetres.
///
/// X runs across the tape (from its reference edge), Y along the feed
/// direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TapeSpec {
    /// X placement of the tape in the output drawing (mm).
    pub origin_x: f64,

    /// Y placement of the tape in the output drawing (mm).
    pub origin_y: f64,

    /// Width of the tape body, across the feed direction (mm).
    pub tape_width: f64,

    /// Pocket-to-pocket spacing along the feed direction (mm).
    pub tape_pitch: f64,

    /// Distance from the reference edge to the sprocket-hole centre line (mm).
    pub hole_edge_distance: f64,

    /// Sprocket hole diameter (mm).
    pub hole_diameter: f64,

    /// Distance from the sprocket-hole centre line to the pocket centre line (mm).
    pub part_hole_offset: f64,

    /// Part footprint extent along the feed direction (mm).
    pub part_width: f64,

    /// Part footprint extent across the feed direction (mm).
    pub part_height: f64,

    /// Number of pockets to draw.
    pub part_count: usize,
}

impl TapeSpec {
    /// Validates all dimensional fields.
    ///
    /// Every field must be finite, and every length other than the origin
    /// must be non-negative. `part_count` may not exceed [`MAX_PART_COUNT`],
    /// and every coordinate the layout derives from the fields must also be
    /// finite.
    ///
    /// # Errors
    ///
    /// Returns [`TapeError::InvalidParameter`] naming the first offending field.
    pub fn validate(&self) -> TapeResult<()> {
        check_finite("origin_x", self.origin_x)?;
        check_finite("origin_y", self.origin_y)?;

        for (name, value) in self.lengths() {
            check_finite(name, value)?;
            if value < 0.0 {
                return Err(TapeError::invalid_parameter(
                    name,
                    format!("must be non-negative, got {value}"),
                ));
            }
        }

        if self.part_count > MAX_PART_COUNT {
            return Err(TapeError::invalid_parameter(
                "part_count",
                format!("must be at most {MAX_PART_COUNT}, got {}", self.part_count),
            ));
        }

        for (name, value) in self.extremes() {
            if !value.is_finite() {
                return Err(TapeError::invalid_parameter(
                    name,
                    "places the drawing outside the representable range",
                ));
            }
        }

        Ok(())
    }

    /// Centre of the sprocket hole in pitch interval `index`.
    #[must_use]
    pub fn hole_centre(&self, index: usize) -> Point {
        Point::new(
            self.origin_x + self.hole_edge_distance,
            self.origin_y + self.pitch_offset(index) + self.tape_pitch / 2.0,
        )
    }

    /// Centre of the part seated in pitch interval `index`.
    #[must_use]
    pub fn part_centre(&self, index: usize) -> Point {
        Point::new(
            self.origin_x + self.hole_edge_distance + self.part_hole_offset,
            self.origin_y + self.pitch_offset(index) + self.tape_pitch,
        )
    }

    /// Returns a copy placed at a different origin.
    #[must_use]
    pub fn at(mut self, origin_x: f64, origin_y: f64) -> Self {
        self.origin_x = origin_x;
        self.origin_y = origin_y;
        self
    }

    /// Returns a copy with a different pocket count.
    #[must_use]
    pub fn with_part_count(mut self, part_count: usize) -> Self {
        self.part_count = part_count;
        self
    }

    /// Length of the drawn tape along the feed direction.
    ///
    /// One pitch of margin follows the last pocket.
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // counts past 2^52 fail validation anyway
    pub fn run_length(&self) -> f64 {
        self.tape_pitch * (self.part_count as f64 + 1.0)
    }

    /// Feed offset of the start of pitch interval `index`.
    #[allow(clippy::cast_precision_loss)] // bounded by MAX_PART_COUNT
    fn pitch_offset(&self, index: usize) -> f64 {
        self.tape_pitch * index as f64
    }

    /// Outermost coordinates of the drawing, each tagged with the field that
    /// pushes it out.
    fn extremes(&self) -> Vec<(&'static str, f64)> {
        let hole = self.hole_centre(0);
        let mut extremes = vec![
            ("hole_edge_distance", hole.x),
            ("hole_diameter", hole.x + self.hole_diameter / 2.0),
            ("tape_width", self.origin_x + self.tape_width),
            ("tape_pitch", self.origin_y + self.run_length()),
        ];

        if let Some(last_index) = self.part_count.checked_sub(1) {
            let first = self.part_centre(0);
            let last = self.part_centre(last_index);
            extremes.extend([
                ("part_hole_offset", first.x),
                ("part_height", first.x - self.part_height / 2.0),
                ("part_height", first.x + self.part_height / 2.0),
                ("tape_pitch", last.y),
                ("part_width", first.y - self.part_width / 2.0),
                ("part_width", last.y + self.part_width / 2.0),
            ]);
        }

        extremes
    }

    fn lengths(&self) -> [(&'static str, f64); 7] {
        [
            ("tape_width", self.tape_width),
            ("tape_pitch", self.tape_pitch),
            ("hole_edge_distance", self.hole_edge_distance),
            ("hole_diameter", self.hole_diameter),
            ("part_hole_offset", self.part_hole_offset),
            ("part_width", self.part_width),
            ("part_height", self.part_height),
        ]
    }
}

fn check_finite(name: &str, value: f64) -> TapeResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(TapeError::invalid_parameter(
            name,
            format!("must be finite, got {value}"),
        ))
    }
}

/// Converts a numeric pocket count from untyped input into a `usize`.
///
/// # Errors
///
/// Returns [`TapeError::InvalidParameter`] for `part_count` if the value is
/// negative, fractional, non-finite, or above [`MAX_PART_COUNT`].
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn part_count_from_f64(value: f64) -> TapeResult<usize> {
    if !value.is_finite() {
        return Err(TapeError::invalid_parameter(
            "part_count",
            format!("must be finite, got {value}"),
        ));
    }
    if value < 0.0 {
        return Err(TapeError::invalid_parameter(
            "part_count",
            format!("must be non-negative, got {value}"),
        ));
    }
    if value.fract() != 0.0 {
        return Err(TapeError::invalid_parameter(
            "part_count",
            format!("must be a whole number, got {value}"),
        ));
    }
    if value > MAX_PART_COUNT as f64 {
        return Err(TapeError::invalid_parameter(
            "part_count",
            format!("must be at most {MAX_PART_COUNT}, got {value}"),
        ));
    }
    Ok(value as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> TapeSpec {
        TapeSpec {
            origin_x: 0.0,
            origin_y: 0.0,
            tape_width: 8.0,
            tape_pitch: 4.0,
            hole_edge_distance: 1.75,
            hole_diameter: 1.5,
            part_hole_offset: 3.5,
            part_width: 2.032,
            part_height: 1.27,
            part_count: 10,
        }
    }

    #[test]
    fn valid_spec_passes() {
        assert!(spec().validate().is_ok());
    }

    #[test]
    fn negative_origin_is_allowed() {
        assert!(spec().at(-10.0, -5.0).validate().is_ok());
    }

    #[test]
    fn reject_negative_length() {
        let mut s = spec();
        s.hole_diameter = -1.5;
        let err = s.validate().unwrap_err();
        assert_eq!(err.parameter(), Some("hole_diameter"));
    }

    #[test]
    fn reject_non_finite() {
        let mut s = spec();
        s.tape_pitch = f64::NAN;
        assert_eq!(s.validate().unwrap_err().parameter(), Some("tape_pitch"));

        let mut s = spec();
        s.origin_y = f64::INFINITY;
        assert_eq!(s.validate().unwrap_err().parameter(), Some("origin_y"));
    }

    #[test]
    fn run_length_adds_one_pitch() {
        assert!((spec().run_length() - 44.0).abs() < f64::EPSILON);
        assert!((spec().with_part_count(0).run_length() - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn part_count_conversion() {
        assert_eq!(part_count_from_f64(0.0), Ok(0));
        assert_eq!(part_count_from_f64(12.0), Ok(12));

        assert_eq!(part_count_from_f64(1e6), Ok(MAX_PART_COUNT));

        for bad in [-1.0, 2.5, f64::NAN, f64::INFINITY, 1e20, 4e9, 1_000_001.0] {
            let err = part_count_from_f64(bad).unwrap_err();
            assert_eq!(err.parameter(), Some("part_count"), "value {bad}");
        }
    }

    #[test]
    fn reject_part_count_above_limit() {
        assert!(spec().with_part_count(MAX_PART_COUNT).validate().is_ok());

        for count in [MAX_PART_COUNT + 1, usize::MAX / 2 + 1, usize::MAX] {
            let err = spec().with_part_count(count).validate().unwrap_err();
            assert_eq!(err.parameter(), Some("part_count"), "count {count}");
        }
    }

    #[test]
    fn reject_overflowing_outline() {
        let mut s = spec().with_part_count(1);
        s.origin_x = 1e308;
        s.tape_width = 1e308;
        assert_eq!(s.validate().unwrap_err().parameter(), Some("tape_width"));

        let mut s = spec();
        s.origin_y = 1e308;
        s.tape_pitch = 1e308;
        assert_eq!(s.validate().unwrap_err().parameter(), Some("tape_pitch"));
    }

    #[test]
    fn reject_overflowing_part() {
        let mut s = spec();
        s.origin_x = 1e308;
        s.part_hole_offset = 1e308;
        s.tape_width = 0.0;
        assert_eq!(
            s.validate().unwrap_err().parameter(),
            Some("part_hole_offset")
        );

        let mut s = spec();
        s.origin_y = -1e308;
        s.part_width = 1.7e308;
        assert_eq!(s.validate().unwrap_err().parameter(), Some("part_width"));
    }

    #[test]
    fn outline_only_ignores_part_extent() {
        let mut s = spec().with_part_count(0);
        s.part_width = 1.7e308;
        s.origin_y = -1e308;
        assert!(s.validate().is_ok());
    }

    #[test]
    fn centres_follow_pitch() {
        let s = spec();
        assert_eq!(s.hole_centre(0), Point::new(1.75, 2.0));
        assert_eq!(s.hole_centre(9), Point::new(1.75, 38.0));
        assert_eq!(s.part_centre(0), Point::new(5.25, 4.0));
        assert_eq!(s.part_centre(9), Point::new(5.25, 40.0));
    }
}
