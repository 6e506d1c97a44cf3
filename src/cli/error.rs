// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error type for all todplot-related errors. This should be the *only* error
//! enum that is publicly visible.

use thiserror::Error;

use super::plot::PlotArgsError;
#[cfg(feature = "plotting")]
use crate::plotting::DrawError;
use crate::tod::{ObsFilenameError, SubsequenceError, TodError, TodReadError};

/// The *only* publicly visible error from todplot.
#[derive(Error, Debug)]
pub enum TodplotError {
    /// An error related to the arguments of a plotting subcommand.
    #[error("{0}")]
    Plot(String),

    /// An error related to observation filenames and where they live.
    #[error("{0}\n\nObservations are expected at <data-dir>/<YYYY-MM>/<filename>; check --data and --data-dir")]
    ObsPath(String),

    /// An error related to the contents of a level-1 file.
    #[error("{0}")]
    Observation(String),

    /// An HDF5 error. Because these are usually quite spartan, a suggestion is
    /// provided here.
    #[error("HDF5 error: {0}\n\nIf you don't know what this means, try turning up verbosity (-v or -vv)")]
    Hdf5(String),

    /// An error related to selecting a subsequence.
    #[error("{0}\n\nEach subsequence window is 10 minutes of data; windows are numbered from 1")]
    Subsequence(String),

    /// An error while drawing a plot.
    #[error("{0}")]
    Draw(String),

    /// An error related to argument files.
    #[error("{0}")]
    ArgFile(String),

    /// A generic error that can't be clarified further, e.g. IO errors.
    #[error("{0}")]
    Generic(String),
}

// When changing the error propagation below, ensure `Self::from(e)` uses the
// correct `e`!

impl From<PlotArgsError> for TodplotError {
    fn from(e: PlotArgsError) -> Self {
        Self::Plot(e.to_string())
    }
}

impl From<TodError> for TodplotError {
    fn from(e: TodError) -> Self {
        match e {
            TodError::Filename(e) => Self::from(e),
            TodError::Read(e) => Self::from(e),
            TodError::NoSamplesAfterMask { .. } => Self::Observation(e.to_string()),
        }
    }
}

impl From<ObsFilenameError> for TodplotError {
    fn from(e: ObsFilenameError) -> Self {
        Self::ObsPath(e.to_string())
    }
}

impl From<TodReadError> for TodplotError {
    fn from(e: TodReadError) -> Self {
        let s = e.to_string();
        match e {
            TodReadError::FileNotFound(_) => Self::ObsPath(s),
            TodReadError::MissingDataset { .. }
            | TodReadError::BadRank { .. }
            | TodReadError::BadShape { .. }
            | TodReadError::AttrNotString { .. }
            | TodReadError::Shape(_) => Self::Observation(s),
            TodReadError::Hdf5(_) => Self::Hdf5(s),
        }
    }
}

impl From<SubsequenceError> for TodplotError {
    fn from(e: SubsequenceError) -> Self {
        Self::Subsequence(e.to_string())
    }
}

#[cfg(feature = "plotting")]
impl From<DrawError> for TodplotError {
    fn from(e: DrawError) -> Self {
        let s = e.to_string();
        match e {
            DrawError::NoSuchChannel { .. } => Self::Plot(s),
            DrawError::Plotters(_) => Self::Draw(s),
            DrawError::IO(e) => Self::from(e),
        }
    }
}

impl From<std::io::Error> for TodplotError {
    fn from(e: std::io::Error) -> Self {
        Self::Generic(e.to_string())
    }
}
