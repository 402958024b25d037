//! Fixed-width row formatter for character LCD readouts
//!
//! This crate turns a handful of labeled readings into the raw character
//! cells of a text LCD (4 rows of 20 characters by default):
//!
//! - `RowValue` / `RowDefinition` for the typed readings (float, int, bool)
//! - `RowFormatter` which holds the row definitions and a persistent buffer
//! - `DisplayBuffer`, the `LINES` x `CHARS` grid of single-byte cells
//! - `FormatConfig` for label width, float precision, row placement and
//!   residue handling
//!
//! # Rendering
//!
//! Each set row becomes `"<label> <value> <unit>"`, with the label cut to
//! `label_width` characters. Text that does not fit in `CHARS` cells is
//! truncated, never written past the row. Rendering overwrites the buffer
//! in place; with the default `ResiduePolicy::Retain` cells beyond the new
//! text keep whatever the previous render left there.
//!
//! ```
//! use readout_core::LcdFormatter;
//!
//! let mut lcd = LcdFormatter::new();
//! lcd.set_row(0, "distance", 123, "km").unwrap();
//! lcd.set_row(1, "distance", 7.89f32, "km").unwrap();
//! lcd.render();
//!
//! assert_eq!(lcd.buffer().line_text(0), Some("dista 123 km"));
//! assert_eq!(lcd.buffer().line_text(1), Some("dista 7.89 km"));
//! ```
//!
//! # Concurrency
//!
//! There is no internal locking. Share a formatter between tasks by putting
//! the whole instance behind one mutex.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod buffer;
pub mod config;
pub mod error;
pub mod formatter;
pub mod row;
pub mod writer;

// Re-export key types
pub use buffer::DisplayBuffer;
pub use config::{FormatConfig, ResiduePolicy, RowPlacement};
pub use error::FormatError;
pub use formatter::{format_row, RowFormatter};
pub use row::{RowDefinition, RowKind, RowValue, LABEL_CAPACITY, UNIT_CAPACITY};
pub use writer::RowWriter;

/// Number of character rows on a standard 4x20 LCD
pub const LINES: usize = 4;

/// Number of character columns on a standard 4x20 LCD
pub const CHARS: usize = 20;

/// Formatter for the standard 4x20 geometry
pub type LcdFormatter = RowFormatter<LINES, CHARS>;

/// Buffer for the standard 4x20 geometry
pub type LcdBuffer = DisplayBuffer<LINES, CHARS>;
