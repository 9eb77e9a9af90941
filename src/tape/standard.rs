//! EIA-481 embossed carrier tape dimensions.
//!
//! EIA-481 tapes share a common sprocket-hole geometry (1.5 mm holes on a
//! 4 mm pitch, 1.75 mm from the reference edge). The distance from the hole
//! row to the pocket centre line grows with the tape width.

use crate::tape::error::{TapeError, TapeResult};
use crate::tape::spec::TapeSpec;
use crate::units::Length;

/// Sprocket hole diameter (mm).
pub const SPROCKET_HOLE_DIAMETER_MM: f64 = 1.5;

/// Sprocket hole pitch (mm).
pub const SPROCKET_HOLE_PITCH_MM: f64 = 4.0;

/// Tape reference edge to sprocket-hole centre (mm).
pub const HOLE_EDGE_DISTANCE_MM: f64 = 1.75;

/// Hole row to pocket centre line, by tape width: `(width_mm, offset_mm)`.
const POCKET_OFFSETS: [(f64, f64); 7] = [
    (8.0, 3.5),
    (12.0, 5.5),
    (16.0, 7.5),
    (24.0, 11.5),
    (32.0, 14.2),
    (44.0, 20.2),
    (56.0, 26.2),
];

/// Returns the hole-to-pocket offset for a standard tape width.
#[must_use]
pub fn pocket_offset(tape_width_mm: f64) -> Option<f64> {
    POCKET_OFFSETS
        .iter()
        .find(|(width, _)| (width - tape_width_mm).abs() < 1e-6)
        .map(|&(_, offset)| offset)
}

/// Infers the tape width from the hole-to-pocket offset.
///
/// For 8 to 24 mm tapes the pocket offset plus 0.5 mm is half the tape width.
#[must_use]
pub fn tape_width_for_offset(part_hole_offset_mm: f64) -> f64 {
    (part_hole_offset_mm + 0.5).round() * 2.0
}

/// Decodes an imperial chip size code into `(length, width)`.
///
/// The first two digits are the body length and the last two the body width,
/// both in hundredths of an inch: `0805` is 0.08 in × 0.05 in.
///
/// # Errors
///
/// Returns [`TapeError::InvalidChipCode`] if the code is not four ASCII digits.
pub fn chip_code_size(code: &str) -> TapeResult<(Length, Length)> {
    let code = code.trim();
    if code.len() != 4 || !code.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TapeError::invalid_chip_code(code));
    }

    let hundredths = |digits: &str| -> TapeResult<Length> {
        digits
            .parse::<u8>()
            .map(|v| Length::inches(f64::from(v) / 100.0))
            .map_err(|_| TapeError::invalid_chip_code(code))
    };

    Ok((hundredths(&code[..2])?, hundredths(&code[2..])?))
}

impl TapeSpec {
    /// Creates a spec for a standard EIA-481 tape at the drawing origin.
    ///
    /// Hole edge distance, hole diameter and pocket offset come from the
    /// standard for `tape_width`.
    ///
    /// # Errors
    ///
    /// Returns [`TapeError::UnsupportedTapeWidth`] if `tape_width` is not a
    /// standard width.
    pub fn eia481(
        tape_width: f64,
        tape_pitch: f64,
        part_width: f64,
        part_height: f64,
        part_count: usize,
    ) -> TapeResult<Self> {
        let part_hole_offset =
            pocket_offset(tape_width).ok_or_else(|| TapeError::unsupported_width(tape_width))?;

        Ok(Self {
            origin_x: 0.0,
            origin_y: 0.0,
            tape_width,
            tape_pitch,
            hole_edge_distance: HOLE_EDGE_DISTANCE_MM,
            hole_diameter: SPROCKET_HOLE_DIAMETER_MM,
            part_hole_offset,
            part_width,
            part_height,
            part_count,
        })
    }
}
