use crate::model::{Measurement, parse_timestamp};
use anyhow::{Context, Result, bail};
use std::io::BufRead;

/// Read all measurements from a line-oriented reader, in input order.
///
/// Each non-blank line must hold a timestamp and a number separated by
/// whitespace. The first malformed line aborts reading with an error that
/// quotes the line; blank lines are skipped.
pub fn read_measurements<R: BufRead>(reader: R) -> Result<Vec<Measurement>> {
    let mut msrs = Vec::new();

    for line in reader.lines() {
        let line = line.context("Could not read a line")?;
        if line.trim().is_empty() {
            continue;
        }
        msrs.push(parse_line(&line)?);
    }

    Ok(msrs)
}

fn parse_line(line: &str) -> Result<Measurement> {
    let fields: Vec<_> = line.split_whitespace().collect();
    let &[timestamp, value] = fields.as_slice() else {
        bail!("Did not find exactly two columns in line '{line}'");
    };

    let timestamp =
        parse_timestamp(timestamp).with_context(|| format!("Invalid timestamp in line '{line}'"))?;
    let value: f64 = value
        .parse()
        .with_context(|| format!("Invalid number in line '{line}'"))?;

    Ok(Measurement::new(timestamp, value))
}

#[cfg(test)]
mod tests {
    use crate::model::TIMESTAMP_FORMAT;

    use super::*;

    fn read_str(input: &str) -> Result<Vec<Measurement>> {
        read_measurements(input.as_bytes())
    }

    fn error_message(input: &str) -> String {
        format!("{:#}", read_str(input).unwrap_err())
    }

    #[test]
    fn test_read_in_input_order() {
        let msrs = read_str("2023-01-02T00:00 2\n2023-01-01T00:00 1.5\n2023-01-03T00:00 -3e2\n")
            .unwrap();
        let timestamps: Vec<_> = msrs
            .iter()
            .map(|msr| msr.timestamp.format(TIMESTAMP_FORMAT).to_string())
            .collect();
        let values: Vec<_> = msrs.iter().map(|msr| msr.value).collect();
        assert_eq!(
            timestamps,
            ["2023-01-02T00:00", "2023-01-01T00:00", "2023-01-03T00:00"]
        );
        assert_eq!(values, [2.0, 1.5, -300.0]);
    }

    #[test]
    fn test_read_empty() {
        assert!(read_str("").unwrap().is_empty());
        assert!(read_str("\n  \n\t\n").unwrap().is_empty());
    }

    #[test]
    fn test_read_skips_blank_lines_and_carriage_returns() {
        let msrs = read_str("2023-01-01T00:00\t1\r\n\r\n   2023-01-01T01:00    2  \r\n").unwrap();
        assert_eq!(msrs.len(), 2);
        assert_eq!(msrs[1].value, 2.0);
    }

    #[test]
    fn test_read_non_finite_values() {
        let msrs = read_str("2023-01-01T00:00 inf\n2023-01-01T01:00 NaN\n").unwrap();
        assert_eq!(msrs[0].value, f64::INFINITY);
        assert!(msrs[1].value.is_nan());
    }

    #[test]
    fn test_reject_one_column() {
        assert_eq!(
            error_message("2023-01-01T00:00 1\n2023-01-01T01:00\n"),
            "Did not find exactly two columns in line '2023-01-01T01:00'"
        );
    }

    #[test]
    fn test_reject_three_columns() {
        assert_eq!(
            error_message("2023-01-01T00:00 1 2\n"),
            "Did not find exactly two columns in line '2023-01-01T00:00 1 2'"
        );
    }

    #[test]
    fn test_reject_invalid_timestamp() {
        let message = error_message("2023-02-30T00:00 1\n");
        assert!(
            message.starts_with("Invalid timestamp in line '2023-02-30T00:00 1': "),
            "{message}"
        );
    }

    #[test]
    fn test_reject_invalid_number() {
        let message = error_message("2023-01-01T00:00 1\n2023-01-01T01:00 one\n");
        assert!(
            message.starts_with("Invalid number in line '2023-01-01T01:00 one': "),
            "{message}"
        );
    }

    #[test]
    fn test_reject_unreadable_stream() {
        let message = format!(
            "{:#}",
            read_measurements(&b"2023-01-01T00:00 \xff\n"[..]).unwrap_err()
        );
        assert!(message.starts_with("Could not read a line: "), "{message}");
    }
}
