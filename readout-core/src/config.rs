//! Formatter configuration
//!
//! Controls how rows are laid out in the buffer. The defaults reproduce the
//! classic behavior: 5-character labels, 2 decimals, unset rows compacted
//! away and stale cells left in place.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default label prefix length in characters
pub const DEFAULT_LABEL_WIDTH: usize = 5;

/// Default number of decimals for float readings
pub const DEFAULT_FLOAT_PRECISION: usize = 2;

/// Where a set row lands in the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RowPlacement {
    /// Set rows fill buffer rows 0, 1, 2... in order; unset rows leave no gap
    #[default]
    Compact,
    /// Row N always renders into buffer row N
    ByIndex,
}

/// What happens to cells the current render does not write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ResiduePolicy {
    /// Keep bytes from earlier renders
    #[default]
    Retain,
    /// Zero the whole buffer before rendering
    Clear,
}

/// Formatter configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FormatConfig {
    /// Number of label characters printed before the value
    pub label_width: usize,
    /// Decimal places for float readings
    pub float_precision: usize,
    /// Row placement strategy
    pub placement: RowPlacement,
    /// Stale cell handling
    pub residue: ResiduePolicy,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            label_width: DEFAULT_LABEL_WIDTH,
            float_precision: DEFAULT_FLOAT_PRECISION,
            placement: RowPlacement::Compact,
            residue: ResiduePolicy::Retain,
        }
    }
}
