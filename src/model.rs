use anyhow::{Result, bail};
use chrono::NaiveDateTime;

/// `chrono` format of the timestamp column, used for parsing and printing.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M";

const TIMESTAMP_LAYOUT: &str = "YYYY-MM-DDThh:mm";

/// One timestamped numeric data point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub timestamp: NaiveDateTime,
    pub value: f64,
}

impl Measurement {
    pub fn new(timestamp: NaiveDateTime, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// Parse a timestamp in the fixed `YYYY-MM-DDThh:mm` layout.
///
/// Every component must be zero-padded to its full width; `chrono` alone
/// would also accept shorter or signed fields, so the layout is checked first.
pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime> {
    let fits_layout = s.len() == TIMESTAMP_LAYOUT.len()
        && s.bytes().enumerate().all(|(idx, byte)| match idx {
            4 | 7 => byte == b'-',
            10 => byte == b'T',
            13 => byte == b':',
            _ => byte.is_ascii_digit(),
        });
    if !fits_layout {
        bail!("timestamp must have the layout {TIMESTAMP_LAYOUT}, but is {s:?}");
    }

    Ok(NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)?)
}
