// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

#[derive(Error, Debug)]
pub(crate) enum PlotArgsError {
    #[cfg(not(feature = "plotting"))]
    #[error("todplot was not compiled with the \"plotting\" feature.\nYou need to compile todplot with this feature to make plots; only --dry-run is available.")]
    NoPlottingFeature,

    #[error("No observation was supplied! Specify one with --data")]
    NoObservation,

    #[error("No subsequence was supplied! Specify one with --subseq or --indices")]
    NoSubsequence,

    #[error("Both a subsequence window and subsequence indices were supplied; only one may be used")]
    BothSubsequences,

    #[error("Subsequence indices must be a START and END pair, but {0} values were supplied")]
    IndicesCount(usize),
}
