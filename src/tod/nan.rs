// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Patching of NaN samples.

use ndarray::prelude::*;

/// Set every channel that is entirely NaN to zero. Returns the number of
/// channels that were zeroed.
///
/// `tod` has dimensions \[feed, sideband, sample\].
pub fn zero_fill_dead_channels(tod: &mut Array3<f64>) -> usize {
    let mut num_zeroed = 0;
    for mut lane in tod.lanes_mut(Axis(2)) {
        if lane.iter().all(|v| v.is_nan()) {
            lane.fill(0.0);
            num_zeroed += 1;
        }
    }
    num_zeroed
}

/// Replace NaNs along the sample axis of each channel by linearly
/// interpolating between the nearest valid samples either side. NaNs without
/// a valid neighbour on one side take the value of the nearest valid sample.
/// A channel without any valid samples is set to zero. Returns the number of
/// samples that were replaced.
pub fn interpolate_nans(tod: &mut Array3<f64>) -> usize {
    tod.lanes_mut(Axis(2))
        .into_iter()
        .map(interpolate_lane)
        .sum()
}

fn interpolate_lane(mut lane: ArrayViewMut1<f64>) -> usize {
    let n = lane.len();
    let mut num_replaced = 0;
    let mut prev_valid: Option<usize> = None;
    let mut i = 0;
    while i < n {
        if !lane[i].is_nan() {
            prev_valid = Some(i);
            i += 1;
            continue;
        }

        // Find the end of this run of NaNs.
        let run_start = i;
        while i < n && lane[i].is_nan() {
            i += 1;
        }
        let next_valid = if i < n { Some(i) } else { None };
        for j in run_start..i {
            lane[j] = match (prev_valid, next_valid) {
                (Some(p), Some(q)) => {
                    let frac = (j - p) as f64 / (q - p) as f64;
                    lane[p] + (lane[q] - lane[p]) * frac
                }
                (Some(p), None) => lane[p],
                (None, Some(q)) => lane[q],
                (None, None) => 0.0,
            };
        }
        num_replaced += i - run_start;
    }

    num_replaced
}
