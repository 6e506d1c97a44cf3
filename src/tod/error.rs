// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors associated with reading and preparing observations.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TodError {
    #[error(transparent)]
    Filename(#[from] ObsFilenameError),

    #[error(transparent)]
    Read(#[from] TodReadError),

    #[error("All {num_samples} samples of obsid {obsid} were removed by the Tsys mask")]
    NoSamplesAfterMask { obsid: u32, num_samples: usize },
}

#[derive(Error, Debug)]
pub enum ObsFilenameError {
    #[error("'{0}' doesn't look like an observation filename (expected e.g. comap-0007343-2019-08-07-220019.hd5)")]
    Unrecognised(String),

    #[error("The obsid in '{0}' is too large")]
    ObsidTooLarge(String),
}

#[derive(Error, Debug)]
pub enum TodReadError {
    #[error("Observation file '{0}' does not exist")]
    FileNotFound(PathBuf),

    #[error("'{file}' has no '{dataset}' dataset; not sufficient information in the level 1 file")]
    MissingDataset {
        file: PathBuf,
        dataset: &'static str,
    },

    #[error("Expected dataset '{dataset}' to have {expected} dimensions, but it has {actual}")]
    BadRank {
        dataset: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Based on the dimensions of the power data, expected '{dataset}' to have shape {expected:?}, but it has {actual:?}")]
    BadShape {
        dataset: &'static str,
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    #[error("The '{attr}' attribute isn't a string (its type is {desc})")]
    AttrNotString { attr: &'static str, desc: String },

    #[error(transparent)]
    Hdf5(#[from] hdf5::Error),

    #[error(transparent)]
    Shape(#[from] ndarray::ShapeError),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SubsequenceError {
    #[error("Subsequence windows are numbered from 1")]
    ZeroWindow,

    #[error("The subsequence start index ({start}) must be smaller than its end index ({end})")]
    EmptyRange { start: usize, end: usize },

    #[error("Subsequence window {window} starts beyond the end of the observation, which only has {num_samples} samples")]
    WindowBeyondData { window: usize, num_samples: usize },

    #[error("The subsequence starts at sample {start}, but the observation only has {num_samples} samples")]
    StartBeyondData { start: usize, num_samples: usize },
}
