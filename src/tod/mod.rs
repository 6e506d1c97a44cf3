// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Time-ordered data from the spectrometer.
//!
//! An [`Observation`] is what's left of a level-1 file after Tsys
//! measurements have been removed and NaNs have been patched. The power,
//! time and pointing arrays always share the same sample axis.

mod error;
mod filename;
pub(crate) mod flags;
pub(crate) mod nan;
pub(crate) mod read;
mod subseq;

pub use error::{ObsFilenameError, SubsequenceError, TodError, TodReadError};
pub use filename::ObsFilename;
pub use read::{read_raw, RawObservation};
pub use subseq::Subsequence;

use std::{ops::Range, path::Path};

use hifitime::Epoch;
use log::{debug, info, trace};
use ndarray::prelude::*;

use crate::{
    constants::{TSYS_FLAG_BIT, TSYS_SPAN_THRESHOLD},
    time::mjd_to_epoch,
};

#[derive(Debug, Clone)]
pub struct Observation {
    pub obsid: u32,

    /// The name of the observed target.
    pub source: Option<String>,

    /// The physical feed numbers, in the same order as the first axis of
    /// `tod`, `el` and `az`.
    pub feeds: Vec<u32>,

    /// Power with dimensions \[feed, sideband, sample\].
    pub tod: Array3<f64>,

    /// UTC MJD of each sample.
    pub mjd: Array1<f64>,

    /// Elevation \[degrees\] with dimensions \[feed, sample\].
    pub el: Array2<f64>,

    /// Azimuth \[degrees\] with dimensions \[feed, sample\].
    pub az: Array2<f64>,
}

impl Observation {
    /// Read an observation from `<data_dir>/<month>/<filename>` and prepare it
    /// for plotting.
    pub fn load(filename: &str, data_dir: &Path) -> Result<Observation, TodError> {
        let obs_filename = ObsFilename::parse(filename)?;
        let path = obs_filename.path_in(data_dir);
        let raw = read_raw(&path)?;
        Observation::from_raw(obs_filename.obsid(), raw)
    }

    /// Remove Tsys measurements and patch NaNs.
    pub fn from_raw(obsid: u32, raw: RawObservation) -> Result<Observation, TodError> {
        let RawObservation {
            mut tod,
            mut el,
            mut az,
            features,
            mut mjd,
            feeds,
            source,
        } = raw;

        let num_samples = mjd.len();
        let mask = flags::tsys_mask(features.view(), TSYS_FLAG_BIT, TSYS_SPAN_THRESHOLD);
        let keep = flags::kept_indices(&mask);
        if keep.is_empty() {
            return Err(TodError::NoSamplesAfterMask { obsid, num_samples });
        }
        if keep.len() != num_samples {
            debug!(
                "Removing {} Tsys samples from obsid {obsid}",
                num_samples - keep.len()
            );
            tod = tod.select(Axis(2), &keep);
            el = el.select(Axis(1), &keep);
            az = az.select(Axis(1), &keep);
            mjd = mjd.select(Axis(0), &keep);
        }

        let num_dead = nan::zero_fill_dead_channels(&mut tod);
        if num_dead > 0 {
            debug!("{num_dead} channels are entirely NaN; setting them to 0");
        }
        let num_interpolated = nan::interpolate_nans(&mut tod);
        trace!("Interpolated over {num_interpolated} NaN samples");

        Ok(Observation {
            obsid,
            source,
            feeds,
            tod,
            mjd,
            el,
            az,
        })
    }

    pub fn num_feeds(&self) -> usize {
        self.tod.len_of(Axis(0))
    }

    pub fn num_sidebands(&self) -> usize {
        self.tod.len_of(Axis(1))
    }

    pub fn num_samples(&self) -> usize {
        self.tod.len_of(Axis(2))
    }

    pub fn start_epoch(&self) -> Option<Epoch> {
        self.mjd.first().map(|&m| mjd_to_epoch(m))
    }

    pub fn end_epoch(&self) -> Option<Epoch> {
        self.mjd.last().map(|&m| mjd_to_epoch(m))
    }

    /// A channel is considered dead if its samples sum to zero (this is the
    /// case for channels that were entirely NaN).
    pub fn is_dead_channel(&self, feed: usize, sideband: usize) -> bool {
        self.tod.slice(s![feed, sideband, ..]).sum() == 0.0
    }

    /// Keep only the samples in `range`, for every array indexed by sample.
    pub fn crop(self, range: Range<usize>) -> Observation {
        let Observation {
            obsid,
            source,
            feeds,
            tod,
            mjd,
            el,
            az,
        } = self;
        Observation {
            obsid,
            source,
            feeds,
            tod: tod.slice(s![.., .., range.clone()]).to_owned(),
            mjd: mjd.slice(s![range.clone()]).to_owned(),
            el: el.slice(s![.., range.clone()]).to_owned(),
            az: az.slice(s![.., range]).to_owned(),
        }
    }

    /// Crop to a subsequence; see [`Subsequence::resolve`].
    pub fn subsequence(self, subseq: Subsequence) -> Result<Observation, SubsequenceError> {
        let range = subseq.resolve(self.num_samples())?;
        info!(
            "Using samples {}..{} (subsequence {})",
            range.start,
            range.end,
            subseq.label()
        );
        Ok(self.crop(range))
    }
}
