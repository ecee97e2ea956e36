use crate::model::Measurement;
use chrono::{NaiveDateTime, TimeDelta};

/// Symmetric averaging window of a given total size.
///
/// The window around an instant `t` is the half-open interval
/// `(t - size / 2, t + size / 2]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Window {
    half: TimeDelta,
}

impl Window {
    pub fn new(size: TimeDelta) -> Self {
        Self { half: size / 2 }
    }

    /// Exclusive lower and inclusive upper bound of the window around `t`,
    /// saturated at the representable range.
    pub fn bounds(&self, t: NaiveDateTime) -> (NaiveDateTime, NaiveDateTime) {
        let since = t
            .checked_sub_signed(self.half)
            .unwrap_or(NaiveDateTime::MIN);
        let until = t
            .checked_add_signed(self.half)
            .unwrap_or(NaiveDateTime::MAX);
        (since, until)
    }
}

/// Arithmetic mean of the values, `NaN` if there are none.
pub fn compute_mean<I: IntoIterator<Item = f64>>(vals: I) -> f64 {
    let (sum, n_vals) = vals
        .into_iter()
        .fold((0.0, 0usize), |(sum, n_vals), val| (sum + val, n_vals + 1));
    sum / n_vals as f64
}

/// Indices delimiting the measurements of `by_time` that fall in `(since, until]`.
///
/// `by_time` must be sorted ascending by timestamp.
pub fn window_range(
    by_time: &[Measurement],
    since: NaiveDateTime,
    until: NaiveDateTime,
) -> (usize, usize) {
    let start = by_time.partition_point(|msr| msr.timestamp <= since);
    let end = by_time.partition_point(|msr| msr.timestamp <= until);
    (start, end.max(start))
}

/// Mean of `msr` and every measurement of `by_time` inside its window.
///
/// For a positive half window, `msr` lies inside its own window. For a
/// zero one the window is empty and `msr` is counted on its own, so that
/// neighbours sharing its timestamp stay excluded.
pub fn windowed_mean(by_time: &[Measurement], msr: &Measurement, window: &Window) -> f64 {
    let (since, until) = window.bounds(msr.timestamp);
    let (start, end) = window_range(by_time, since, until);
    log::debug!(
        "window ({since}, {until}] of {} holds {} measurements",
        msr.timestamp,
        end - start
    );

    let own_val = (since >= msr.timestamp).then_some(msr.value);
    compute_mean(by_time[start..end].iter().map(|p| p.value).chain(own_val))
}
