use crate::model::{Measurement, TIMESTAMP_FORMAT};
use crate::stats::{Window, windowed_mean};
use anyhow::{Context, Result};
use chrono::TimeDelta;
use std::io::Write;

/// Windowed averager.
///
/// Computes, for every measurement, the mean of all measurements inside
/// the window centered on its timestamp.
pub struct Analyzer {
    window: Window,
}

impl Analyzer {
    pub fn new(window_size: TimeDelta) -> Self {
        Self {
            window: Window::new(window_size),
        }
    }

    /// Windowed means of `msrs`, in the same order as `msrs`.
    pub fn averages(&self, msrs: &[Measurement]) -> Vec<f64> {
        let by_time = sort_by_time(msrs);
        msrs.iter()
            .map(|msr| windowed_mean(&by_time, msr, &self.window))
            .collect()
    }

    /// Write one `<timestamp> <value> <average>` line per measurement.
    pub fn write_report<W: Write>(&self, msrs: &[Measurement], writer: &mut W) -> Result<()> {
        for (msr, avg) in msrs.iter().zip(self.averages(msrs)) {
            writeln!(
                writer,
                "{} {} {}",
                msr.timestamp.format(TIMESTAMP_FORMAT),
                msr.value,
                avg
            )
            .context("failed to write line")?;
        }
        Ok(())
    }
}

/// Stable-sorted copy of `msrs`: equal timestamps keep their input order.
fn sort_by_time(msrs: &[Measurement]) -> Vec<Measurement> {
    let mut by_time = msrs.to_vec();
    by_time.sort_by_key(|msr| msr.timestamp);
    by_time
}
