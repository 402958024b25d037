//! Row buffer formatter
//!
//! Holds up to `LINES` row definitions and renders them into a persistent
//! `DisplayBuffer`. Rendering never writes more than `CHARS` bytes into a
//! row; longer text is truncated silently.

use core::fmt::{self, Write};

use crate::buffer::DisplayBuffer;
use crate::config::{FormatConfig, ResiduePolicy, RowPlacement};
use crate::error::FormatError;
use crate::row::{RowDefinition, RowValue};
use crate::writer::RowWriter;

/// Render one row definition into a row of cells
///
/// Writes `"<label> <value> <unit>"` with the label cut to
/// `config.label_width` characters. Cells past the text are left as they
/// were. Returns the number of cells written.
///
/// Float precision is capped at the row width; digits past it could never
/// be shown anyway.
pub fn format_row(
    row: &RowDefinition,
    config: &FormatConfig,
    cells: &mut [u8],
) -> Result<usize, fmt::Error> {
    let precision = config.float_precision.min(cells.len());
    let mut writer = RowWriter::new(cells);
    writer.write_str(label_prefix(&row.label, config.label_width))?;

    match row.value {
        RowValue::Float(v) => write!(writer, " {:.*} ", precision, v)?,
        RowValue::Int(v) => write!(writer, " {} ", v)?,
        RowValue::Bool(v) => write!(writer, " {} ", u8::from(v))?,
    }

    writer.write_str(&row.unit)?;
    if writer.truncated() {
        trace!("row text cut to {} cells", writer.len());
    }
    Ok(writer.len())
}

/// First `width` characters of `label`
fn label_prefix(label: &str, width: usize) -> &str {
    match label.char_indices().nth(width) {
        Some((end, _)) => &label[..end],
        None => label,
    }
}

/// Fixed-size formatter for labeled readings
///
/// Rows start unset. `set_row` overwrites a row at any time; `render`
/// rewrites the buffer from the rows that are set.
#[derive(Debug, Clone)]
pub struct RowFormatter<const LINES: usize, const CHARS: usize> {
    /// Row definitions, `None` while unset
    rows: [Option<RowDefinition>; LINES],
    /// Rendered character cells
    buffer: DisplayBuffer<LINES, CHARS>,
    /// Layout options
    config: FormatConfig,
    /// Rows written by the last render
    rendered: usize,
}

impl<const LINES: usize, const CHARS: usize> Default for RowFormatter<LINES, CHARS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const LINES: usize, const CHARS: usize> RowFormatter<LINES, CHARS> {
    /// Create a formatter with the default configuration
    pub fn new() -> Self {
        Self::with_config(FormatConfig::default())
    }

    /// Create a formatter with an explicit configuration
    pub fn with_config(config: FormatConfig) -> Self {
        Self {
            rows: core::array::from_fn(|_| None),
            buffer: DisplayBuffer::new(),
            config,
            rendered: 0,
        }
    }

    /// Get the current configuration
    pub fn config(&self) -> &FormatConfig {
        &self.config
    }

    /// Replace the configuration
    ///
    /// Takes effect on the next render; the buffer is left untouched.
    pub fn set_config(&mut self, config: FormatConfig) {
        self.config = config;
    }

    /// Set the content of a specific row
    ///
    /// # Arguments
    /// - `index`: Row number, must be below `LINES`
    /// - `label`: Reading name, only a prefix is printed
    /// - `value`: `f32`, `i32` or `bool` reading
    /// - `unit`: Unit suffix
    pub fn set_row(
        &mut self,
        index: usize,
        label: &str,
        value: impl Into<RowValue>,
        unit: &str,
    ) -> Result<(), FormatError> {
        let slot = self.slot_mut(index)?;
        let row = RowDefinition::new(label, value, unit);
        trace!("row {} set ({:?})", index, row.kind());
        *slot = Some(row);
        Ok(())
    }

    /// Return a row to the unset state
    ///
    /// Its last rendered cells stay in the buffer until overwritten.
    pub fn clear_row(&mut self, index: usize) -> Result<(), FormatError> {
        *self.slot_mut(index)? = None;
        trace!("row {} cleared", index);
        Ok(())
    }

    /// Get the definition of a specific row, `None` while unset
    pub fn row(&self, index: usize) -> Result<Option<&RowDefinition>, FormatError> {
        self.rows
            .get(index)
            .map(Option::as_ref)
            .ok_or(FormatError::OutOfRange {
                index,
                lines: LINES,
            })
    }

    /// Render every set row into the buffer
    ///
    /// Rows are visited in ascending order. Unset rows are skipped. Where a
    /// set row lands depends on `FormatConfig::placement`, and whether
    /// untouched cells are zeroed first depends on `FormatConfig::residue`.
    pub fn render(&mut self) {
        if self.config.residue == ResiduePolicy::Clear {
            self.buffer.clear();
        }

        let mut next = 0;
        for (index, row) in self.rows.iter().enumerate() {
            let Some(row) = row else {
                continue;
            };

            let target = match self.config.placement {
                RowPlacement::Compact => next,
                RowPlacement::ByIndex => index,
            };
            let Some(cells) = self.buffer.row_mut(target) else {
                continue;
            };

            if format_row(row, &self.config, cells).is_err() {
                warn!("row {} failed to format, blanking", index);
                cells.fill(0);
            }
            next += 1;
        }

        self.rendered = next;
        debug!("rendered {} of {} rows", next, LINES);
    }

    /// Number of rows written by the last render
    pub fn rendered_rows(&self) -> usize {
        self.rendered
    }

    /// Get the current buffer
    pub fn buffer(&self) -> &DisplayBuffer<LINES, CHARS> {
        &self.buffer
    }

    /// Get a copy of the current buffer
    pub fn snapshot(&self) -> DisplayBuffer<LINES, CHARS> {
        self.buffer
    }

    fn slot_mut(&mut self, index: usize) -> Result<&mut Option<RowDefinition>, FormatError> {
        self.rows.get_mut(index).ok_or(FormatError::OutOfRange {
            index,
            lines: LINES,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LcdFormatter, CHARS, LINES};
    use proptest::prelude::*;

    fn sample() -> LcdFormatter {
        let mut lcd = LcdFormatter::new();
        lcd.set_row(0, "distance", 123, "km").unwrap();
        lcd.set_row(1, "distance", 7.89f32, "km").unwrap();
        lcd.set_row(2, "distance", true, "km").unwrap();
        lcd
    }

    fn padded(text: &str) -> [u8; CHARS] {
        let mut row = [0u8; CHARS];
        row[..text.len()].copy_from_slice(text.as_bytes());
        row
    }

    #[test]
    fn test_render_sample_rows() {
        let mut lcd = sample();
        lcd.render();

        let buffer = lcd.snapshot();
        assert_eq!(buffer.row(0), Some(&padded("dista 123 km")));
        assert_eq!(buffer.row(1), Some(&padded("dista 7.89 km")));
        assert_eq!(buffer.row(2), Some(&padded("dista 1 km")));
        assert_eq!(buffer.row(3), Some(&[0u8; CHARS]));
        assert_eq!(lcd.rendered_rows(), 3);
    }

    #[test]
    fn test_bool_false_renders_zero() {
        let mut lcd = LcdFormatter::new();
        lcd.set_row(0, "pump", false, "").unwrap();
        lcd.render();

        assert_eq!(lcd.buffer().line_text(0), Some("pump 0 "));
    }

    #[test]
    fn test_negative_values() {
        let mut lcd = LcdFormatter::new();
        lcd.set_row(0, "temp", -12, "C").unwrap();
        lcd.set_row(1, "temp", -0.5f32, "C").unwrap();
        lcd.render();

        assert_eq!(lcd.buffer().line_text(0), Some("temp -12 C"));
        assert_eq!(lcd.buffer().line_text(1), Some("temp -0.50 C"));
    }

    #[test]
    fn test_render_before_any_row() {
        let mut lcd = LcdFormatter::new();
        lcd.render();

        assert_eq!(lcd.snapshot(), DisplayBuffer::new());
        assert_eq!(lcd.rendered_rows(), 0);
    }

    #[test]
    fn test_set_row_out_of_range() {
        let mut lcd = sample();
        lcd.render();
        let before = lcd.snapshot();

        assert_eq!(
            lcd.set_row(LINES, "x", 1, "y"),
            Err(FormatError::OutOfRange { index: 4, lines: 4 })
        );
        assert_eq!(
            lcd.clear_row(usize::MAX),
            Err(FormatError::OutOfRange {
                index: usize::MAX,
                lines: 4
            })
        );
        assert!(lcd.row(LINES).is_err());

        lcd.render();
        assert_eq!(lcd.snapshot(), before);
    }

    #[test]
    fn test_set_row_overwrites() {
        let mut lcd = sample();
        lcd.set_row(1, "speed", 42, "kmh").unwrap();

        let row = lcd.row(1).unwrap().unwrap();
        assert_eq!(row.label.as_str(), "speed");
        assert_eq!(row.value, RowValue::Int(42));
        assert_eq!(row.unit.as_str(), "kmh");
        assert!(lcd.row(3).unwrap().is_none());
    }

    #[test]
    fn test_truncates_long_row() {
        let mut lcd = LcdFormatter::new();
        lcd.set_row(0, "temperature", i32::MIN, "degC").unwrap();
        lcd.set_row(1, "x", 0, "").unwrap();
        lcd.render();

        // "tempe -2147483648 degC" is 22 bytes
        assert_eq!(lcd.buffer().row(0), Some(b"tempe -2147483648 de"));
        assert_eq!(lcd.buffer().line_text(1), Some("x 0 "));
    }

    #[test]
    fn test_float_precision_and_label_width() {
        let config = FormatConfig {
            label_width: 3,
            float_precision: 0,
            ..FormatConfig::default()
        };
        let mut lcd = LcdFormatter::with_config(config);
        lcd.set_row(0, "voltage", 11.6f32, "V").unwrap();
        lcd.render();

        assert_eq!(lcd.buffer().line_text(0), Some("vol 12 V"));
    }

    #[test]
    fn test_label_width_counts_characters() {
        let mut lcd = LcdFormatter::new();
        lcd.set_row(0, "ñandúes", 3, "").unwrap();
        lcd.render();

        assert_eq!(lcd.buffer().line_text(0), Some("ñandú 3 "));
    }

    #[test]
    fn test_compact_skips_unset_rows() {
        let mut lcd = LcdFormatter::new();
        lcd.set_row(1, "rpm", 900, "").unwrap();
        lcd.set_row(3, "oil", 92, "C").unwrap();
        lcd.render();

        assert_eq!(lcd.buffer().line_text(0), Some("rpm 900 "));
        assert_eq!(lcd.buffer().line_text(1), Some("oil 92 C"));
        assert_eq!(lcd.buffer().line_text(2), Some(""));
        assert_eq!(lcd.buffer().line_text(3), Some(""));
        assert_eq!(lcd.rendered_rows(), 2);
    }

    #[test]
    fn test_by_index_keeps_positions() {
        let config = FormatConfig {
            placement: RowPlacement::ByIndex,
            ..FormatConfig::default()
        };
        let mut lcd = LcdFormatter::with_config(config);
        lcd.set_row(1, "rpm", 900, "").unwrap();
        lcd.set_row(3, "oil", 92, "C").unwrap();
        lcd.render();

        assert_eq!(lcd.buffer().line_text(0), Some(""));
        assert_eq!(lcd.buffer().line_text(1), Some("rpm 900 "));
        assert_eq!(lcd.buffer().line_text(2), Some(""));
        assert_eq!(lcd.buffer().line_text(3), Some("oil 92 C"));
        assert_eq!(lcd.rendered_rows(), 2);
    }

    #[test]
    fn test_retain_leaves_stale_rows() {
        let mut lcd = sample();
        lcd.render();
        let first = lcd.snapshot();

        lcd.clear_row(2).unwrap();
        lcd.render();

        assert_eq!(lcd.rendered_rows(), 2);
        assert_eq!(lcd.buffer().row(2), first.row(2));
        assert_eq!(lcd.buffer().line_text(2), Some("dista 1 km"));
    }

    #[test]
    fn test_retain_leaves_stale_tail() {
        let mut lcd = LcdFormatter::new();
        lcd.set_row(0, "distance", 12345, "km").unwrap();
        lcd.render();
        lcd.set_row(0, "distance", 1, "km").unwrap();
        lcd.render();

        assert_eq!(lcd.buffer().line_text(0), Some("dista 1 km5 km"));
    }

    #[test]
    fn test_clear_zeroes_outside_set_rows() {
        let config = FormatConfig {
            residue: ResiduePolicy::Clear,
            ..FormatConfig::default()
        };
        let mut lcd = LcdFormatter::with_config(config);
        lcd.set_row(0, "distance", 12345, "km").unwrap();
        lcd.set_row(1, "distance", 2, "km").unwrap();
        lcd.render();

        lcd.set_row(0, "distance", 1, "km").unwrap();
        lcd.clear_row(1).unwrap();
        lcd.render();

        assert_eq!(lcd.buffer().row(0), Some(&padded("dista 1 km")));
        assert_eq!(lcd.buffer().row(1), Some(&[0u8; CHARS]));
        assert_eq!(lcd.rendered_rows(), 1);
    }

    #[test]
    fn test_set_config_applies_on_next_render() {
        let mut lcd = sample();
        lcd.render();
        let before = lcd.snapshot();

        lcd.set_config(FormatConfig {
            residue: ResiduePolicy::Clear,
            placement: RowPlacement::ByIndex,
            ..FormatConfig::default()
        });
        assert_eq!(lcd.snapshot(), before);
        assert_eq!(lcd.config().placement, RowPlacement::ByIndex);

        lcd.clear_row(0).unwrap();
        lcd.render();
        assert_eq!(lcd.buffer().line_text(0), Some(""));
        assert_eq!(lcd.buffer().line_text(1), Some("dista 7.89 km"));
    }

    #[test]
    fn test_other_geometry() {
        let mut lcd = RowFormatter::<2, 8>::new();
        lcd.set_row(0, "distance", 123, "km").unwrap();
        lcd.set_row(1, "on", true, "").unwrap();
        lcd.render();

        assert_eq!(lcd.buffer().row(0), Some(b"dista 12"));
        assert_eq!(lcd.buffer().line_text(1), Some("on 1 "));
        assert!(lcd.set_row(2, "x", 0, "").is_err());
    }

    #[test]
    fn test_huge_float_precision_is_truncated() {
        let mut lcd = LcdFormatter::with_config(FormatConfig {
            float_precision: usize::MAX,
            ..FormatConfig::default()
        });
        lcd.set_row(0, "v", 1.5f32, "V").unwrap();
        lcd.render();

        let expected = format!("v {:.20} V", 1.5f32);
        assert_eq!(lcd.buffer().row(0).unwrap(), &expected.as_bytes()[..CHARS]);
        assert_eq!(lcd.buffer().line_text(0), Some("v 1.5000000000000000"));
    }

    #[test]
    fn test_format_row_reports_length() {
        let row = RowDefinition::new("distance", 7.89f32, "km");
        let mut cells = [b'.'; 16];
        let len = format_row(&row, &FormatConfig::default(), &mut cells).unwrap();

        assert_eq!(len, 13);
        assert_eq!(&cells, b"dista 7.89 km...");
    }

    fn value_strategy() -> impl Strategy<Value = RowValue> {
        prop_oneof![
            (-1.0e6f32..1.0e6f32).prop_map(RowValue::Float),
            any::<i32>().prop_map(RowValue::Int),
            any::<bool>().prop_map(RowValue::Bool),
        ]
    }

    fn expected_text(label: &str, value: RowValue, unit: &str) -> String {
        let label: String = label.chars().take(5).collect();
        match value {
            RowValue::Float(v) => format!("{} {:.2} {}", label, v, unit),
            RowValue::Int(v) => format!("{} {} {}", label, v, unit),
            RowValue::Bool(v) => format!("{} {} {}", label, v as u8, unit),
        }
    }

    proptest! {
        #[test]
        fn prop_row_matches_format_and_truncates(
            index in 0usize..LINES,
            label in "[a-z]{0,16}",
            value in value_strategy(),
            unit in "[a-zA-Z%]{0,8}"
        ) {
            let mut lcd = LcdFormatter::with_config(FormatConfig {
                placement: RowPlacement::ByIndex,
                ..FormatConfig::default()
            });
            lcd.set_row(index, &label, value, &unit).unwrap();
            lcd.render();

            let expected = expected_text(&label, value, &unit);
            let shown = expected.len().min(CHARS);
            let row = lcd.buffer().row(index).unwrap();

            prop_assert_eq!(&row[..shown], &expected.as_bytes()[..shown]);
            prop_assert!(row[shown..].iter().all(|&b| b == 0));
            for other in (0..LINES).filter(|&i| i != index) {
                prop_assert_eq!(lcd.buffer().row(other).unwrap(), &[0u8; CHARS]);
            }
        }

        #[test]
        fn prop_render_is_idempotent(
            rows in proptest::collection::vec(
                proptest::option::of(("[a-z]{0,12}", value_strategy(), "[a-z]{0,4}")),
                LINES,
            )
        ) {
            let mut lcd = LcdFormatter::new();
            for (index, row) in rows.iter().enumerate() {
                if let Some((label, value, unit)) = row {
                    lcd.set_row(index, label, *value, unit).unwrap();
                }
            }

            lcd.render();
            let first = lcd.snapshot();
            lcd.render();

            prop_assert_eq!(lcd.snapshot(), first);
            prop_assert_eq!(lcd.rendered_rows(), rows.iter().flatten().count());
        }

        #[test]
        fn prop_out_of_range_never_writes(index in LINES..10_000usize, value in any::<i32>()) {
            let mut lcd = sample();
            lcd.render();
            let before = lcd.snapshot();

            prop_assert_eq!(
                lcd.set_row(index, "overflow", value, "x"),
                Err(FormatError::OutOfRange { index, lines: LINES })
            );
            lcd.render();
            prop_assert_eq!(lcd.snapshot(), before);
        }
    }
}
