// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Useful constants.

The spectrometer samples at a fixed rate, so all durations used to address
the data can be expressed as sample counts.
 */

/// The spectrometer's sampling rate \[Hz\].
pub const SAMPLE_RATE_HZ: u32 = 50;

/// The length of a subsequence window \[seconds\].
pub const WINDOW_SECONDS: u32 = 10 * 60;

/// The number of samples in a subsequence window.
pub const SUBSEQUENCE_LENGTH: usize = (WINDOW_SECONDS * SAMPLE_RATE_HZ) as usize;

/// The bit of the `features` array that is set during a Tsys measurement.
pub const TSYS_FLAG_BIT: u32 = 13;

/// If the first and last Tsys-flagged samples are further apart than this
/// many samples, everything outside of them is also discarded.
pub const TSYS_SPAN_THRESHOLD: usize = 5000;

/// Where observations live, grouped into per-month directories.
pub const DEFAULT_DATA_DIR: &str = "/mn/stornext/d16/cmbco/comap/pathfinder/ovro";

/// Where plots are written by default.
pub const DEFAULT_OUTPUT_DIR: &str = "figures";

/// The number of seconds in a day.
pub(crate) const SECONDS_PER_DAY: f64 = 86400.0;
