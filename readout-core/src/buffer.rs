//! Display buffer
//!
//! Raw character cells for a text LCD, `LINES` rows of `CHARS` bytes.
//! Rows are not NUL-terminated; a zero byte is simply an unwritten cell.

use core::fmt;

/// Character cell grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayBuffer<const LINES: usize, const CHARS: usize> {
    cells: [[u8; CHARS]; LINES],
}

impl<const LINES: usize, const CHARS: usize> Default for DisplayBuffer<LINES, CHARS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const LINES: usize, const CHARS: usize> DisplayBuffer<LINES, CHARS> {
    /// Create a zeroed buffer
    pub const fn new() -> Self {
        Self {
            cells: [[0; CHARS]; LINES],
        }
    }

    /// Zero every cell
    pub fn clear(&mut self) {
        for row in &mut self.cells {
            row.fill(0);
        }
    }

    /// Get the cells of a specific row
    pub fn row(&self, row: usize) -> Option<&[u8; CHARS]> {
        self.cells.get(row)
    }

    pub(crate) fn row_mut(&mut self, row: usize) -> Option<&mut [u8; CHARS]> {
        self.cells.get_mut(row)
    }

    /// Get all rows as an iterator
    pub fn rows(&self) -> impl Iterator<Item = &[u8; CHARS]> {
        self.cells.iter()
    }

    /// Get the text of a row up to the first unwritten cell
    ///
    /// Stops early at the first byte that is not valid UTF-8.
    pub fn line_text(&self, row: usize) -> Option<&str> {
        let cells = self.cells.get(row)?;
        let end = cells.iter().position(|&b| b == 0).unwrap_or(CHARS);
        let bytes = &cells[..end];
        match core::str::from_utf8(bytes) {
            Ok(text) => Some(text),
            Err(e) => core::str::from_utf8(&bytes[..e.valid_up_to()]).ok(),
        }
    }

    /// Get the raw cell grid
    pub fn as_array(&self) -> &[[u8; CHARS]; LINES] {
        &self.cells
    }

    /// Get number of rows
    pub const fn lines(&self) -> usize {
        LINES
    }

    /// Get number of columns
    pub const fn chars(&self) -> usize {
        CHARS
    }
}

impl<const LINES: usize, const CHARS: usize> From<DisplayBuffer<LINES, CHARS>>
    for [[u8; CHARS]; LINES]
{
    fn from(buffer: DisplayBuffer<LINES, CHARS>) -> Self {
        buffer.cells
    }
}

/// One line per row, decoded as UTF-8 and padded to `CHARS` characters
///
/// Unwritten cells are shown as spaces and stray bytes as U+FFFD.
impl<const LINES: usize, const CHARS: usize> fmt::Display for DisplayBuffer<LINES, CHARS> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            let mut width = 0;
            for chunk in row.utf8_chunks() {
                for c in chunk.valid().chars() {
                    let c = if c == '\0' { ' ' } else { c };
                    fmt::Write::write_char(f, c)?;
                    width += 1;
                }
                if !chunk.invalid().is_empty() {
                    fmt::Write::write_char(f, char::REPLACEMENT_CHARACTER)?;
                    width += 1;
                }
            }
            for _ in width..CHARS {
                f.write_str(" ")?;
            }
        }
        Ok(())
    }
}

#[cfg(feature = "defmt")]
impl<const LINES: usize, const CHARS: usize> defmt::Format for DisplayBuffer<LINES, CHARS> {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "DisplayBuffer[");
        for i in 0..LINES {
            if i > 0 {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "{}", self.line_text(i).unwrap_or(""));
        }
        defmt::write!(f, "]");
    }
}
