//! tape-layout: tape-and-reel layout generator
//!
//! Computes the geometry of component-carrier tapes (tape body, sprocket
//! holes, seated parts) and emits it as a line-oriented CAD drawing script.
//!
//! # Architecture
//!
//! - **Layout**: a pure function from [`tape::TapeSpec`] to an ordered list
//!   of drawing records (outline, then holes, then parts)
//! - **Script**: a separate serializer that renders records as statements
//! - **Jobs**: JSON documents describing several tapes side by side
//!
//! # Modules
//!
//! - [`config`]: Configuration loading and validation
//! - [`error`]: Error types for configuration and job files
//! - [`job`]: Job file loading, tape placement and rendering
//! - [`script`]: Drawing-script statements and writer
//! - [`tape`]: Tape parameters, EIA-481 data and layout generation
//! - [`units`]: Length units and conversion
//!
//! # Example
//!
//! ```
//! use tape_layout::script::{render_document, NumberFormat};
//! use tape_layout::tape::{generate, TapeSpec};
//!
//! let spec = TapeSpec::eia481(8.0, 4.0, 2.032, 1.27, 1).unwrap();
//! let records = generate(&spec).unwrap();
//! let script = render_document(&[records], NumberFormat::default());
//!
//! assert!(script.starts_with("GRID mm 1;\nLAYER 51;\nRECT (0 0) (8 8);\n"));
//! ```

pub mod config;
pub mod error;
pub mod job;
pub mod script;
pub mod tape;
pub mod units;
