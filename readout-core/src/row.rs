//! Row definitions
//!
//! A row is one labeled reading destined for one line of the display.

use heapless::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum stored label length in bytes
pub const LABEL_CAPACITY: usize = 16;

/// Maximum stored unit length in bytes
pub const UNIT_CAPACITY: usize = 8;

/// Which kind of value a row holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RowKind {
    Float,
    Int,
    Bool,
}

/// A typed reading
///
/// Kind and payload live in one enum, so they cannot disagree.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RowValue {
    /// Rendered with `FormatConfig::float_precision` decimals
    Float(f32),
    /// Rendered as a plain decimal integer
    Int(i32),
    /// Rendered as `0` or `1`
    Bool(bool),
}

impl RowValue {
    /// Get the kind tag of this value
    pub const fn kind(&self) -> RowKind {
        match self {
            Self::Float(_) => RowKind::Float,
            Self::Int(_) => RowKind::Int,
            Self::Bool(_) => RowKind::Bool,
        }
    }
}

impl From<f32> for RowValue {
    fn from(value: f32) -> Self {
        Self::Float(value)
    }
}

impl From<i32> for RowValue {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for RowValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// One labeled value with its unit
///
/// Label and unit are owned copies, so callers may drop their strings
/// right after `set_row`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RowDefinition {
    /// Full label; the formatter prints only a prefix of it
    pub label: String<LABEL_CAPACITY>,
    /// Reading
    pub value: RowValue,
    /// Unit suffix
    pub unit: String<UNIT_CAPACITY>,
}

impl RowDefinition {
    /// Create a row definition
    ///
    /// Labels and units longer than their capacity are cut at the last
    /// character boundary that fits.
    pub fn new(label: &str, value: impl Into<RowValue>, unit: &str) -> Self {
        Self {
            label: bounded(label),
            value: value.into(),
            unit: bounded(unit),
        }
    }

    /// Get the kind of value stored in this row
    pub const fn kind(&self) -> RowKind {
        self.value.kind()
    }
}

/// Copy as many whole characters of `text` as fit into a `String<N>`
fn bounded<const N: usize>(text: &str) -> String<N> {
    let mut out = String::new();
    for c in text.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}
