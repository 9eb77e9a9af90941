//! Tape layout generation.
//!
//! Produces the drawing records for one tape run in three passes:
//!
//! 1. **Outline**: one rectangle covering the tape body for the whole run
//! 2. **Holes**: one circle per pocket, centred half a pitch into each interval
//! 3. **Parts**: one rectangle per pocket, one full pitch into each interval
//!
//! The passes never interleave. Renderers switch drawing layers between
//! passes and rely on the grouping to avoid redundant switches.

use tracing::debug;

use crate::tape::error::{TapeError, TapeResult};
use crate::tape::record::{Circle, LayerMap, Point, Record, RecordKind, Rect};
use crate::tape::spec::TapeSpec;

/// Generates the drawing records for a tape using the default layers.
///
/// # Errors
///
/// Returns [`TapeError::InvalidParameter`](crate::tape::TapeError::InvalidParameter)
/// if `spec` fails validation. Nothing is generated in that case.
///
/// # Example
///
/// ```
/// use tape_layout::tape::{generate, TapeSpec};
///
/// let spec = TapeSpec::eia481(8.0, 4.0, 2.032, 1.27, 10).unwrap();
/// let records = generate(&spec).unwrap();
/// assert_eq!(records.len(), 21);
/// ```
pub fn generate(spec: &TapeSpec) -> TapeResult<Vec<Record>> {
    generate_with_layers(spec, &LayerMap::default())
}

/// Generates the drawing records for a tape on the given layers.
///
/// # Errors
///
/// Returns [`TapeError::InvalidParameter`](crate::tape::TapeError::InvalidParameter)
/// if `spec` fails validation.
pub fn generate_with_layers(spec: &TapeSpec, layers: &LayerMap) -> TapeResult<Vec<Record>> {
    spec.validate()?;

    let capacity = spec
        .part_count
        .checked_mul(2)
        .and_then(|n| n.checked_add(1))
        .ok_or_else(|| TapeError::invalid_parameter("part_count", "too many records"))?;
    let mut records = Vec::with_capacity(capacity);
    records.push(outline(spec, layers));
    records.extend(holes(spec, layers));
    records.extend(parts(spec, layers));

    debug!(
        origin_x = spec.origin_x,
        part_count = spec.part_count,
        records = records.len(),
        "Generated tape layout"
    );

    Ok(records)
}

fn outline(spec: &TapeSpec, layers: &LayerMap) -> Record {
    let rect = Rect::from_corners(
        Point::new(spec.origin_x, spec.origin_y),
        Point::new(
            spec.origin_x + spec.tape_width,
            spec.origin_y + spec.run_length(),
        ),
    );
    Record::rect(RecordKind::Outline, layers.tape_body, rect)
}

fn holes<'a>(spec: &'a TapeSpec, layers: &'a LayerMap) -> impl Iterator<Item = Record> + 'a {
    let radius = spec.hole_diameter / 2.0;

    (0..spec.part_count).map(move |i| {
        Record::circle(
            RecordKind::Hole,
            layers.holes,
            Circle::filled(spec.hole_centre(i), radius),
        )
    })
}

fn parts<'a>(spec: &'a TapeSpec, layers: &'a LayerMap) -> impl Iterator<Item = Record> + 'a {
    let half_across = spec.part_height / 2.0;
    let half_along = spec.part_width / 2.0;
    let layer = layers.part_layer();

    (0..spec.part_count).map(move |i| {
        Record::rect(
            RecordKind::Part,
            layer,
            Rect::centred(spec.part_centre(i), half_across, half_along),
        )
    })
}
