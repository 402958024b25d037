//! Bounded row writer
//!
//! `core::fmt::Write` sink over a fixed slice of character cells. Bytes
//! that do not fit are dropped; overflow is never an error.

use core::fmt;

/// Truncating writer into one row of cells
///
/// Only the cells actually written are touched. Nothing is padded and no
/// terminator is appended.
#[derive(Debug)]
pub struct RowWriter<'a> {
    cells: &'a mut [u8],
    len: usize,
    truncated: bool,
}

impl<'a> RowWriter<'a> {
    /// Create a writer starting at the first cell
    pub fn new(cells: &'a mut [u8]) -> Self {
        Self {
            cells,
            len: 0,
            truncated: false,
        }
    }

    /// Number of cells written so far
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if nothing has been written
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Check if any output was dropped for lack of room
    pub fn truncated(&self) -> bool {
        self.truncated
    }
}

impl fmt::Write for RowWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let bytes = s.as_bytes();
        let room = self.cells.len() - self.len;
        let take = bytes.len().min(room);

        self.cells[self.len..self.len + take].copy_from_slice(&bytes[..take]);
        self.len += take;
        if take < bytes.len() {
            self.truncated = true;
        }
        Ok(())
    }
}
