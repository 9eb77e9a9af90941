//! Job files: several tapes rendered into one drawing.
//!
//! A job is a JSON document listing tapes. Lengths may be plain numbers
//! (millimetres) or strings with units (`"0.08in"`); they are converted to
//! millimetres before any [`TapeSpec`] is built.
//!
//! ```json
//! {
//!     "gap": "2mm",
//!     "tapes": [
//!         { "name": "R0805", "tape_width": 8, "tape_pitch": 4, "part": "0805", "part_count": 10 },
//!         { "tape_width": 12, "tape_pitch": 8, "part_width": "0.2in", "part_height": "0.1in", "part_count": 5 }
//!     ]
//! }
//! ```
//!
//! # Defaults
//!
//! - Hole edge distance and hole diameter: EIA-481 values.
//! - Pocket offset: EIA-481 value for the tape width.
//! - Tape width: inferred from `part_hole_offset` when only the offset is
//!   given.
//! - Part size: decoded from `part` (an imperial chip code) unless
//!   `part_width`/`part_height` are given.
//! - Placement: tapes without `origin_x` are laid out left to right, each
//!   `gap` after the previous tape's right edge.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::JobError;
use crate::script::render_document;
use crate::tape::standard::{self, HOLE_EDGE_DISTANCE_MM, SPROCKET_HOLE_DIAMETER_MM};
use crate::tape::{generate_with_layers, part_count_from_f64, Record, TapeError, TapeSpec};
use crate::units::Length;

/// Default spacing between auto-placed tapes (mm).
pub const DEFAULT_GAP_MM: f64 = 2.0;

/// A job document.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Job {
    /// Optional JSON schema reference (ignored during parsing).
    #[serde(rename = "$schema", default)]
    _schema: Option<String>,

    /// Spacing between auto-placed tapes.
    #[serde(default = "default_gap")]
    pub gap: Length,

    /// Tapes in drawing order.
    pub tapes: Vec<TapeEntry>,
}

fn default_gap() -> Length {
    Length::mm(DEFAULT_GAP_MM)
}

/// One tape as written in a job file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TapeEntry {
    /// Label used in log output and error messages.
    #[serde(default)]
    pub name: Option<String>,

    /// Explicit X placement. Omit for left-to-right auto placement.
    #[serde(default)]
    pub origin_x: Option<Length>,

    /// Y placement (default 0).
    #[serde(default)]
    pub origin_y: Option<Length>,

    /// Tape body width. May be omitted when `part_hole_offset` is given.
    #[serde(default)]
    pub tape_width: Option<Length>,

    /// Pocket pitch.
    pub tape_pitch: Length,

    /// Reference edge to hole centre line (default 1.75 mm).
    #[serde(default)]
    pub hole_edge_distance: Option<Length>,

    /// Sprocket hole diameter (default 1.5 mm).
    #[serde(default)]
    pub hole_diameter: Option<Length>,

    /// Hole centre line to pocket centre line (default per tape width).
    #[serde(default)]
    pub part_hole_offset: Option<Length>,

    /// Imperial chip code such as `0805`.
    #[serde(default)]
    pub part: Option<String>,

    /// Part extent along the feed direction.
    #[serde(default)]
    pub part_width: Option<Length>,

    /// Part extent across the feed direction.
    #[serde(default)]
    pub part_height: Option<Length>,

    /// Number of pockets. Must be a whole, non-negative number.
    pub part_count: f64,
}

/// A tape entry resolved to millimetres and placed.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTape {
    /// Tape label.
    pub name: String,
    /// Layout parameters.
    pub spec: TapeSpec,
}

impl TapeEntry {
    /// Returns the label for messages.
    #[must_use]
    pub fn label(&self) -> String {
        self.name.clone().unwrap_or_else(|| "unnamed".to_string())
    }

    /// Resolves this entry into a validated [`TapeSpec`].
    ///
    /// `auto_origin_x` is used when the entry has no explicit `origin_x`.
    ///
    /// # Errors
    ///
    /// Returns an error if a required value is missing or the resulting spec
    /// is invalid.
    pub fn resolve(&self, index: usize, auto_origin_x: f64) -> Result<TapeSpec, JobError> {
        let tape_err = |source: TapeError| JobError::Tape {
            index,
            name: self.label(),
            source,
        };

        let (tape_width, part_hole_offset) = match (self.tape_width, self.part_hole_offset) {
            (Some(width), Some(offset)) => (width.to_mm(), offset.to_mm()),
            (Some(width), None) => {
                let width = width.to_mm();
                let offset = standard::pocket_offset(width)
                    .ok_or_else(|| tape_err(TapeError::unsupported_width(width)))?;
                (width, offset)
            }
            (None, Some(offset)) => {
                let offset = offset.to_mm();
                (standard::tape_width_for_offset(offset), offset)
            }
            (None, None) => {
                return Err(self.missing(index, "tape_width (or part_hole_offset)"));
            }
        };

        let chip = self
            .part
            .as_deref()
            .map(standard::chip_code_size)
            .transpose()
            .map_err(tape_err)?;

        let part_width = self
            .part_width
            .or_else(|| chip.map(|(length, _)| length))
            .ok_or_else(|| self.missing(index, "part_width (or a part code)"))?;
        let part_height = self
            .part_height
            .or_else(|| chip.map(|(_, width)| width))
            .ok_or_else(|| self.missing(index, "part_height (or a part code)"))?;

        let spec = TapeSpec {
            origin_x: self.origin_x.map_or(auto_origin_x, Length::to_mm),
            origin_y: self.origin_y.map_or(0.0, Length::to_mm),
            tape_width,
            tape_pitch: self.tape_pitch.to_mm(),
            hole_edge_distance: self
                .hole_edge_distance
                .map_or(HOLE_EDGE_DISTANCE_MM, Length::to_mm),
            hole_diameter: self
                .hole_diameter
                .map_or(SPROCKET_HOLE_DIAMETER_MM, Length::to_mm),
            part_hole_offset,
            part_width: part_width.to_mm(),
            part_height: part_height.to_mm(),
            part_count: part_count_from_f64(self.part_count).map_err(tape_err)?,
        };

        spec.validate().map_err(tape_err)?;
        Ok(spec)
    }

    fn missing(&self, index: usize, field: &str) -> JobError {
        JobError::MissingField {
            index,
            name: self.label(),
            field: field.to_string(),
        }
    }
}

impl Job {
    /// Parses a job from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`JobError::ParseError`] for malformed JSON, unknown fields or
    /// bad length strings.
    pub fn from_json(text: &str) -> Result<Self, JobError> {
        serde_json::from_str(text).map_err(|source| JobError::ParseError { source })
    }

    /// Resolves every tape, placing auto-placed tapes left to right.
    ///
    /// # Errors
    ///
    /// Returns the first tape's error, or [`JobError::Empty`] when the job has
    /// no tapes.
    pub fn resolve(&self) -> Result<Vec<ResolvedTape>, JobError> {
        if self.tapes.is_empty() {
            return Err(JobError::Empty);
        }

        let gap = self.gap.to_mm();
        if !gap.is_finite() || gap < 0.0 {
            return Err(JobError::InvalidGap {
                message: format!("must be a non-negative length, got {}", self.gap),
            });
        }

        let mut cursor = 0.0;
        let mut resolved = Vec::with_capacity(self.tapes.len());
        for (index, entry) in self.tapes.iter().enumerate() {
            let spec = entry.resolve(index, cursor)?;
            cursor = spec.origin_x + spec.tape_width + gap;
            debug!(
                index,
                name = %entry.label(),
                origin_x = spec.origin_x,
                "Resolved tape"
            );
            resolved.push(ResolvedTape {
                name: entry.label(),
                spec,
            });
        }
        Ok(resolved)
    }

    /// Generates the drawing records of every tape.
    ///
    /// Every tape is resolved and generated before anything is returned, so
    /// an invalid tape yields no records at all.
    ///
    /// # Errors
    ///
    /// Returns the first resolution or layout error.
    pub fn layout(&self, config: &Config) -> Result<Vec<Vec<Record>>, JobError> {
        let layers = config.layer_map();
        let tapes = self.resolve()?;

        let records = tapes
            .iter()
            .enumerate()
            .map(|(index, tape)| {
                generate_with_layers(&tape.spec, &layers).map_err(|source| JobError::Tape {
                    index,
                    name: tape.name.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            tapes = tapes.len(),
            records = records.iter().map(Vec::len).sum::<usize>(),
            "Laid out job"
        );
        Ok(records)
    }

    /// Renders the job as a drawing script.
    ///
    /// # Errors
    ///
    /// Returns the first resolution or layout error.
    pub fn render(&self, config: &Config) -> Result<String, JobError> {
        let records = self.layout(config)?;
        Ok(render_document(&records, config.number_format()))
    }
}

/// Loads a job from a file, or from stdin when `path` is `None` or `-`.
///
/// # Errors
///
/// Returns an error if the input cannot be read or parsed.
pub fn load_job(path: Option<&Path>) -> Result<Job, JobError> {
    let text = match path {
        Some(p) if p != Path::new("-") => {
            std::fs::read_to_string(p).map_err(|source| JobError::ReadError {
                path: p.to_path_buf(),
                source,
            })?
        }
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .map_err(|source| JobError::ReadError {
                    path: "-".into(),
                    source,
                })?;
            text
        }
    };

    Job::from_json(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(json: &str) -> TapeEntry {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn resolve_with_chip_code_and_defaults() {
        let e = entry(r#"{ "tape_width": 8, "tape_pitch": 4, "part": "0805", "part_count": 10 }"#);
        let spec = e.resolve(0, 0.0).unwrap();
        assert!((spec.hole_edge_distance - 1.75).abs() < f64::EPSILON);
        assert!((spec.hole_diameter - 1.5).abs() < f64::EPSILON);
        assert!((spec.part_hole_offset - 3.5).abs() < f64::EPSILON);
        assert!((spec.part_width - 2.032).abs() < 1e-9);
        assert!((spec.part_height - 1.27).abs() < 1e-9);
        assert_eq!(spec.part_count, 10);
    }

    #[test]
    fn explicit_size_overrides_chip_code() {
        let e = entry(
            r#"{ "tape_width": 8, "tape_pitch": 4, "part": "0805",
                 "part_height": "1mm", "part_count": 1 }"#,
        );
        let spec = e.resolve(0, 0.0).unwrap();
        assert!((spec.part_width - 2.032).abs() < 1e-9);
        assert!((spec.part_height - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_part_size() {
        let e = entry(r#"{ "tape_width": 8, "tape_pitch": 4, "part_count": 1 }"#);
        assert!(matches!(
            e.resolve(3, 0.0),
            Err(JobError::MissingField { index: 3, .. })
        ));
    }

    #[test]
    fn odd_width_needs_explicit_offset() {
        let e = entry(
            r#"{ "tape_width": 10, "tape_pitch": 4, "part": "0603", "part_count": 1 }"#,
        );
        let err = e.resolve(0, 0.0).unwrap_err();
        assert!(matches!(
            err.tape_error(),
            Some(TapeError::UnsupportedTapeWidth { .. })
        ));

        let e = entry(
            r#"{ "tape_width": 10, "tape_pitch": 4, "part_hole_offset": 4.5,
                 "part": "0603", "part_count": 1 }"#,
        );
        assert!(e.resolve(0, 0.0).is_ok());
    }

    #[test]
    fn bad_part_count_is_invalid_parameter() {
        for count in ["-1", "2.5"] {
            let e = entry(&format!(
                r#"{{ "tape_width": 8, "tape_pitch": 4, "part": "0805", "part_count": {count} }}"#
            ));
            let err = e.resolve(0, 0.0).unwrap_err();
            assert_eq!(
                err.tape_error().and_then(TapeError::parameter),
                Some("part_count")
            );
        }
    }

    #[test]
    fn auto_placement_left_to_right() {
        let job = Job::from_json(
            r#"{
                "gap": "1mm",
                "tapes": [
                    { "tape_width": 8, "tape_pitch": 4, "part": "0805", "part_count": 1 },
                    { "tape_width": 12, "tape_pitch": 8, "part": "1206", "part_count": 1 },
                    { "tape_width": 8, "tape_pitch": 4, "part": "0402", "part_count": 1, "origin_x": 100 },
                    { "tape_width": 8, "tape_pitch": 2, "part": "0201", "part_count": 1 }
                ]
            }"#,
        )
        .unwrap();

        let xs: Vec<f64> = job.resolve().unwrap().iter().map(|t| t.spec.origin_x).collect();
        assert_eq!(xs, vec![0.0, 9.0, 100.0, 109.0]);
    }

    #[test]
    fn empty_job_is_an_error() {
        let job = Job::from_json(r#"{ "tapes": [] }"#).unwrap();
        assert!(matches!(job.resolve(), Err(JobError::Empty)));
    }

    #[test]
    fn negative_gap_is_an_error() {
        let job = Job::from_json(
            r#"{ "gap": -1, "tapes": [ { "tape_width": 8, "tape_pitch": 4, "part": "0805", "part_count": 1 } ] }"#,
        )
        .unwrap();
        assert!(matches!(job.resolve(), Err(JobError::InvalidGap { .. })));
    }

    #[test]
    fn unknown_field_is_rejected() {
        let result = Job::from_json(
            r#"{ "tapes": [ { "tape_width": 8, "tape_pitch": 4, "part_count": 1, "colour": "red" } ] }"#,
        );
        assert!(matches!(result, Err(JobError::ParseError { .. })));
    }

    #[test]
    fn tape_width_inferred_from_offset() {
        let e = entry(r#"{ "part_hole_offset": 5.5, "tape_pitch": 4, "part": "0603", "part_count": 1 }"#);
        let spec = e.resolve(0, 0.0).unwrap();
        assert!((spec.tape_width - 12.0).abs() < f64::EPSILON);
        assert!((spec.part_hole_offset - 5.5).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_width_and_offset() {
        let e = entry(r#"{ "tape_pitch": 4, "part": "0603", "part_count": 1 }"#);
        assert!(matches!(
            e.resolve(0, 0.0),
            Err(JobError::MissingField { index: 0, .. })
        ));
    }

    #[test]
    fn huge_part_count_is_rejected_before_layout() {
        let e = entry(r#"{ "tape_width": 8, "tape_pitch": 4, "part": "0805", "part_count": 4000000000 }"#);
        let err = e.resolve(0, 0.0).unwrap_err();
        assert_eq!(
            err.tape_error().and_then(TapeError::parameter),
            Some("part_count")
        );
    }

    #[test]
    fn render_is_all_or_nothing() {
        let job = Job::from_json(
            r#"{ "tapes": [
                { "tape_width": 8, "tape_pitch": 4, "part": "0805", "part_count": 3 },
                { "tape_width": 8, "tape_pitch": -4, "part": "0805", "part_count": 3 }
            ] }"#,
        )
        .unwrap();
        let err = job.render(&Config::default()).unwrap_err();
        assert!(matches!(err, JobError::Tape { index: 1, .. }));
        assert!(matches!(
            job.layout(&Config::default()),
            Err(JobError::Tape { index: 1, .. })
        ));
    }
}
