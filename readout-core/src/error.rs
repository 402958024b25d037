//! Formatter errors

use core::fmt;

/// Errors reported by the row formatter
///
/// Truncation of over-long rows is not an error; it is the normal overflow
/// policy and is never reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FormatError {
    /// Row index is outside `[0, lines)`
    OutOfRange {
        /// Requested row index
        index: usize,
        /// Number of rows the formatter holds
        lines: usize,
    },
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { index, lines } => {
                write!(f, "row index {} out of range (display has {} rows)", index, lines)
            }
        }
    }
}

impl core::error::Error for FormatError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_message() {
        let err = FormatError::OutOfRange { index: 4, lines: 4 };
        assert_eq!(
            err.to_string(),
            "row index 4 out of range (display has 4 rows)"
        );
    }
}
