// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Helper functions around time.

use hifitime::{Duration, Epoch};

use crate::constants::SECONDS_PER_DAY;

const MINUTES_PER_DAY: f64 = 1440.0;

/// Spectrometer timestamps are MJDs in UTC.
pub fn mjd_to_epoch(mjd: f64) -> Epoch {
    Epoch::from_mjd_utc(mjd)
}

/// Format an MJD as a UTC time of day, e.g. "22:00:19". MJDs read from disk
/// are rarely an exact number of seconds, so the time is rounded to the
/// nearest second first.
pub fn format_utc_hms(mjd: f64) -> String {
    let e = mjd_to_epoch(mjd).round(Duration::from_seconds(1.0));
    let (_, _, _, hour, minute, second, _) = e.to_gregorian_utc();
    format!("{hour:02}:{minute:02}:{second:02}")
}

/// Get the MJDs of every whole multiple of `interval_minutes` (counted from
/// midnight) that lie within `[start_mjd, end_mjd]`.
pub fn minute_ticks(start_mjd: f64, end_mjd: f64, interval_minutes: u32) -> Vec<f64> {
    if interval_minutes == 0 || start_mjd.is_nan() || end_mjd.is_nan() || start_mjd > end_mjd {
        return vec![];
    }
    let interval = i64::from(interval_minutes);
    // Work in integer minutes so that the ticks land exactly on the minute.
    let first = (start_mjd * MINUTES_PER_DAY / interval as f64).ceil() as i64 * interval;
    let last = (end_mjd * MINUTES_PER_DAY).floor() as i64;
    (first..=last)
        .step_by(interval as usize)
        .map(|m| m as f64 / MINUTES_PER_DAY)
        .collect()
}

/// The number of seconds between two MJDs.
pub(crate) fn mjd_span_seconds(start_mjd: f64, end_mjd: f64) -> f64 {
    (end_mjd - start_mjd) * SECONDS_PER_DAY
}
