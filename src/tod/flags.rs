// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Removal of Tsys measurements from the sample axis.

use ndarray::prelude::*;

/// Get a mask of samples to keep (`true`) given the per-sample `features`
/// bitmask. Samples with `bit` set are Tsys measurements and are always
/// discarded. Observations usually start and end with a Tsys measurement; if
/// the first and last flagged samples are more than `span_threshold` samples
/// apart, everything before the first and from the last onwards is discarded
/// as well.
pub fn tsys_mask(features: ArrayView1<u32>, bit: u32, span_threshold: usize) -> Vec<bool> {
    let flag = 1_u32 << bit;
    let mut mask: Vec<bool> = features.iter().map(|&f| f & flag == 0).collect();

    let first = mask.iter().position(|&keep| !keep);
    let last = mask.iter().rposition(|&keep| !keep);
    if let (Some(first), Some(last)) = (first, last) {
        if last - first > span_threshold {
            mask[..first].fill(false);
            mask[last..].fill(false);
        }
    }

    mask
}

/// The indices of the samples to keep.
pub(crate) fn kept_indices(mask: &[bool]) -> Vec<usize> {
    mask.iter()
        .enumerate()
        .filter(|(_, &keep)| keep)
        .map(|(i, _)| i)
        .collect()
}
