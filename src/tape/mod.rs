//! Carrier tape layout.
//!
//! Computes the geometry of a component-carrier tape run (tape body, sprocket
//! holes, seated parts) as an ordered list of drawing [`Record`]s.
//!
//! All inputs are millimetres. Convert other units with [`crate::units`]
//! before building a [`TapeSpec`].
//!
//! # Example
//!
//! ```
//! use tape_layout::tape::{generate, RecordKind, TapeSpec};
//!
//! let spec = TapeSpec::eia481(8.0, 4.0, 2.032, 1.27, 3).unwrap();
//! let records = generate(&spec).unwrap();
//!
//! let kinds: Vec<_> = records.iter().map(|r| r.kind).collect();
//! assert_eq!(kinds[0], RecordKind::Outline);
//! assert_eq!(&kinds[1..4], &[RecordKind::Hole; 3]);
//! assert_eq!(&kinds[4..], &[RecordKind::Part; 3]);
//! ```

pub mod error;
pub mod layout;
pub mod record;
pub mod spec;
pub mod standard;

pub use error::{TapeError, TapeResult};
pub use layout::{generate, generate_with_layers};
pub use record::{Circle, DrawingLayer, LayerMap, Point, Record, RecordKind, Rect, Shape};
pub use spec::{part_count_from_f64, TapeSpec, MAX_PART_COUNT};
