// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Subsequences of an observation's sample axis.

use std::ops::Range;

use log::warn;

use super::SubsequenceError;
use crate::constants::SUBSEQUENCE_LENGTH;

/// A contiguous part of an observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subsequence {
    /// The nth fixed-length window (starting from 1).
    Window(usize),

    /// Explicit sample indices; `end` is exclusive.
    Indices { start: usize, end: usize },
}

impl Subsequence {
    /// The number used to identify this subsequence in output filenames. For
    /// explicit indices, this is the window that `end` falls into.
    pub fn label(&self) -> usize {
        match self {
            Subsequence::Window(n) => *n,
            Subsequence::Indices { end, .. } => end / SUBSEQUENCE_LENGTH,
        }
    }

    /// Get the sample range of this subsequence within an observation of
    /// `num_samples` samples. Ranges that run off the end of the data are
    /// truncated.
    pub fn resolve(&self, num_samples: usize) -> Result<Range<usize>, SubsequenceError> {
        let (start, end) = match *self {
            Subsequence::Window(0) => return Err(SubsequenceError::ZeroWindow),
            Subsequence::Window(n) => match SUBSEQUENCE_LENGTH.checked_mul(n - 1) {
                Some(start) => (start, start.saturating_add(SUBSEQUENCE_LENGTH)),
                None => {
                    return Err(SubsequenceError::WindowBeyondData {
                        window: n,
                        num_samples,
                    })
                }
            },
            Subsequence::Indices { start, end } => {
                if start >= end {
                    return Err(SubsequenceError::EmptyRange { start, end });
                }
                (start, end)
            }
        };
        if start >= num_samples {
            return Err(SubsequenceError::StartBeyondData { start, num_samples });
        }
        if end > num_samples {
            warn!("Subsequence {start}..{end} runs past the end of the data; truncating to {start}..{num_samples}");
        }

        Ok(start..end.min(num_samples))
    }
}
