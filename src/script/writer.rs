//! Statement writer for tape layouts.
//!
//! Tracks the active layer and stroke width so that `LAYER` and
//! `CHANGE WIDTH` are only emitted when a record needs a different one. The
//! state resets at the start of every tape, so each tape's statements are
//! self-contained.

use std::io::Write;

use tracing::{debug, trace};

use super::{NumberFormat, ScriptError, Statement};
use crate::tape::{DrawingLayer, Record, Shape};

/// Active drawing state while planning statements.
#[derive(Debug, Default)]
struct PenState {
    layer: Option<DrawingLayer>,
    width: Option<f64>,
}

/// Converts one tape's records into statements.
///
/// Layer and width switches are inserted only where the active state changes.
#[must_use]
pub fn plan_tape(records: &[Record]) -> Vec<Statement> {
    let mut pen = PenState::default();
    let mut statements = Vec::with_capacity(records.len() + 3);

    for record in records {
        if pen.layer != Some(record.layer) {
            statements.push(Statement::Layer(record.layer));
            pen.layer = Some(record.layer);
        }

        match record.shape {
            Shape::Rect(rect) => statements.push(Statement::Rect(rect)),
            Shape::Circle(circle) => {
                #[allow(clippy::float_cmp)] // widths are copied, never computed
                let width_changed = pen.width != Some(circle.width);
                if width_changed {
                    statements.push(Statement::ChangeWidth(circle.width));
                    pen.width = Some(circle.width);
                }
                statements.push(Statement::Circle {
                    centre: circle.centre,
                    edge: circle.radius_point(),
                });
            }
        }
    }

    statements
}

/// Writes drawing-script statements to a sink.
#[derive(Debug)]
pub struct ScriptWriter<W: Write> {
    out: W,
    format: NumberFormat,
    statements: usize,
}

impl<W: Write> ScriptWriter<W> {
    /// Creates a writer.
    pub const fn new(out: W, format: NumberFormat) -> Self {
        Self {
            out,
            format,
            statements: 0,
        }
    }

    /// Writes the document header (`GRID mm 1;`).
    ///
    /// # Errors
    ///
    /// Returns an error if the sink fails.
    pub fn write_header(&mut self) -> Result<(), ScriptError> {
        self.write_statement(&Statement::Grid)
    }

    /// Writes the statements for one tape.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink fails.
    pub fn write_tape(&mut self, records: &[Record]) -> Result<(), ScriptError> {
        let statements = plan_tape(records);
        debug!(
            records = records.len(),
            statements = statements.len(),
            "Writing tape"
        );
        for statement in &statements {
            self.write_statement(statement)?;
        }
        Ok(())
    }

    /// Returns the number of statements written so far.
    #[must_use]
    pub const fn statement_count(&self) -> usize {
        self.statements
    }

    /// Flushes and returns the underlying sink.
    ///
    /// # Errors
    ///
    /// Returns an error if flushing fails.
    pub fn finish(mut self) -> Result<W, ScriptError> {
        self.out.flush()?;
        Ok(self.out)
    }

    fn write_statement(&mut self, statement: &Statement) -> Result<(), ScriptError> {
        let line = statement.render(&self.format);
        trace!(%line, "Statement");
        writeln!(self.out, "{line}")?;
        self.statements += 1;
        Ok(())
    }
}

/// Writes a complete document to `out`: the header followed by every tape
/// in order.
///
/// # Errors
///
/// Returns an error if the sink fails.
pub fn write_document<W: Write>(
    out: W,
    tapes: &[Vec<Record>],
    format: NumberFormat,
) -> Result<W, ScriptError> {
    let mut writer = ScriptWriter::new(out, format);
    writer.write_header()?;
    for records in tapes {
        writer.write_tape(records)?;
    }
    debug!(
        tapes = tapes.len(),
        statements = writer.statement_count(),
        "Wrote document"
    );
    writer.finish()
}

/// Renders a complete document into a string.
#[must_use]
pub fn render_document(tapes: &[Vec<Record>], format: NumberFormat) -> String {
    // Writing into a Vec cannot fail.
    let bytes = write_document(Vec::new(), tapes, format).unwrap_or_default();
    String::from_utf8_lossy(&bytes).into_owned()
}
