//! Readout demo
//!
//! Fills a 4x20 formatter with sample readings, renders once and prints the
//! resulting cell grid. Pass a TOML file to override the format options or
//! the readings:
//!
//! ```toml
//! [format]
//! label_width = 5
//! float_precision = 2
//! placement = "by_index"   # or "compact"
//! residue = "clear"        # or "retain"
//!
//! [[rows]]
//! index = 0
//! label = "distance"
//! value = 123
//! unit = "km"
//! ```

use std::error::Error;
use std::{env, fs};

use log::{debug, info};
use readout_core::{FormatConfig, LcdBuffer, LcdFormatter, RowValue, CHARS};
use serde::Deserialize;

/// Reading as written in the config file
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
enum Reading {
    Bool(bool),
    Int(i32),
    Float(f32),
}

impl From<Reading> for RowValue {
    fn from(reading: Reading) -> Self {
        match reading {
            Reading::Bool(v) => RowValue::Bool(v),
            Reading::Int(v) => RowValue::Int(v),
            Reading::Float(v) => RowValue::Float(v),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct RowEntry {
    index: usize,
    label: String,
    value: Reading,
    #[serde(default)]
    unit: String,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct DemoConfig {
    format: FormatConfig,
    rows: Vec<RowEntry>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        let row = |index, value| RowEntry {
            index,
            label: "distance".into(),
            value,
            unit: "km".into(),
        };
        Self {
            format: FormatConfig::default(),
            rows: vec![
                row(0, Reading::Int(123)),
                row(1, Reading::Float(7.89)),
                row(2, Reading::Bool(true)),
            ],
        }
    }
}

fn load_config() -> Result<DemoConfig, Box<dyn Error>> {
    match env::args().nth(1) {
        Some(path) => {
            info!("Loading configuration from {}", path);
            let text = fs::read_to_string(&path)?;
            Ok(toml::from_str(&text)?)
        }
        None => {
            info!("No configuration given, using sample readings");
            Ok(DemoConfig::default())
        }
    }
}

/// Grid framed by a dashed rule above and below, one rule per `CHARS` cells
fn framed(buffer: &LcdBuffer) -> String {
    let rule = "-".repeat(CHARS);
    format!("{}\n{}\n{}", rule, buffer, rule)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let config = load_config()?;
    debug!("Format options: {:?}", config.format);

    let mut lcd = LcdFormatter::with_config(config.format);
    for entry in &config.rows {
        lcd.set_row(entry.index, &entry.label, entry.value, &entry.unit)?;
    }
    lcd.render();
    info!("Rendered {} rows", lcd.rendered_rows());

    println!("{}", framed(lcd.buffer()));

    Ok(())
}
