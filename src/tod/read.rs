// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Code to read spectrometer level-1 HDF5 files.

use std::path::Path;

use hdf5::{
    types::{FixedAscii, FixedUnicode, TypeDescriptor, VarLenAscii, VarLenUnicode},
    H5Type,
};
use log::{debug, trace};
use ndarray::prelude::*;

use super::TodReadError;

pub(crate) const BAND_AVERAGE: &str = "spectrometer/band_average";
pub(crate) const PIXEL_EL: &str = "spectrometer/pixel_pointing/pixel_el";
pub(crate) const PIXEL_AZ: &str = "spectrometer/pixel_pointing/pixel_az";
pub(crate) const FEATURES: &str = "spectrometer/features";
pub(crate) const MJD: &str = "spectrometer/MJD";
pub(crate) const FEEDS: &str = "spectrometer/feeds";
pub(crate) const COMAP_GROUP: &str = "comap";
pub(crate) const SOURCE_ATTR: &str = "source";

/// Everything we need out of a level-1 file, before any flagging has been
/// done.
#[derive(Debug, Clone)]
pub struct RawObservation {
    /// Band-averaged power. The dimensions are \[feed, sideband, sample\].
    pub tod: Array3<f64>,

    /// Elevation of each feed \[degrees\]. The dimensions are \[feed,
    /// sample\].
    pub el: Array2<f64>,

    /// Azimuth of each feed \[degrees\]. The dimensions are \[feed, sample\].
    pub az: Array2<f64>,

    /// Bitmask of instrument features active at each sample.
    pub features: Array1<u32>,

    /// The timestamp of each sample (UTC MJD).
    pub mjd: Array1<f64>,

    /// The physical feed numbers.
    pub feeds: Vec<u32>,

    /// The name of the observed target, if the file has it.
    pub source: Option<String>,
}

/// Read the power, pointing, flag and time information from a level-1 file.
/// The file is closed before returning.
pub fn read_raw(path: &Path) -> Result<RawObservation, TodReadError> {
    if !path.exists() {
        return Err(TodReadError::FileNotFound(path.to_path_buf()));
    }
    debug!("Reading {}", path.display());
    let file = hdf5::File::open(path)?;

    let tod = {
        let (shape, data) = read_dataset::<f64>(&file, path, BAND_AVERAGE, 3)?;
        Array3::from_shape_vec((shape[0], shape[1], shape[2]), data)?
    };
    let (num_feeds, _, num_samples) = tod.dim();
    trace!("{BAND_AVERAGE} has shape {:?}", tod.dim());

    let el = read_pointing(&file, path, PIXEL_EL, (num_feeds, num_samples))?;
    let az = read_pointing(&file, path, PIXEL_AZ, (num_feeds, num_samples))?;

    let features = {
        let (shape, data) = read_dataset::<u32>(&file, path, FEATURES, 1)?;
        check_shape(FEATURES, &[num_samples], &shape)?;
        Array1::from(data)
    };
    let mjd = {
        let (shape, data) = read_dataset::<f64>(&file, path, MJD, 1)?;
        check_shape(MJD, &[num_samples], &shape)?;
        Array1::from(data)
    };
    let feeds = {
        let (shape, data) = read_dataset::<u32>(&file, path, FEEDS, 1)?;
        check_shape(FEEDS, &[num_feeds], &shape)?;
        data
    };
    let source = read_source(&file)?;

    Ok(RawObservation {
        tod,
        el,
        az,
        features,
        mjd,
        feeds,
        source,
    })
}

fn read_dataset<T: H5Type>(
    file: &hdf5::File,
    path: &Path,
    dataset: &'static str,
    rank: usize,
) -> Result<(Vec<usize>, Vec<T>), TodReadError> {
    if !file.link_exists(dataset) {
        return Err(TodReadError::MissingDataset {
            file: path.to_path_buf(),
            dataset,
        });
    }
    let ds = file.dataset(dataset)?;
    let shape = ds.shape();
    if shape.len() != rank {
        return Err(TodReadError::BadRank {
            dataset,
            expected: rank,
            actual: shape.len(),
        });
    }
    let data = ds.read_raw::<T>()?;
    Ok((shape, data))
}

fn read_pointing(
    file: &hdf5::File,
    path: &Path,
    dataset: &'static str,
    dim: (usize, usize),
) -> Result<Array2<f64>, TodReadError> {
    let (shape, data) = read_dataset::<f64>(file, path, dataset, 2)?;
    check_shape(dataset, &[dim.0, dim.1], &shape)?;
    Ok(Array2::from_shape_vec(dim, data)?)
}

fn check_shape(
    dataset: &'static str,
    expected: &[usize],
    actual: &[usize],
) -> Result<(), TodReadError> {
    if expected != actual {
        return Err(TodReadError::BadShape {
            dataset,
            expected: expected.to_vec(),
            actual: actual.to_vec(),
        });
    }
    Ok(())
}

/// The target name is stored as a string attribute, but the flavour of string
/// depends on what wrote the file.
fn read_source(file: &hdf5::File) -> Result<Option<String>, TodReadError> {
    if !file.link_exists(COMAP_GROUP) {
        return Ok(None);
    }
    let group = file.group(COMAP_GROUP)?;
    if !group.attr_names()?.iter().any(|n| n == SOURCE_ATTR) {
        return Ok(None);
    }
    let attr = group.attr(SOURCE_ATTR)?;
    let source = match attr.dtype()?.to_descriptor()? {
        TypeDescriptor::VarLenUnicode => attr.read_scalar::<VarLenUnicode>()?.as_str().to_string(),
        TypeDescriptor::VarLenAscii => attr.read_scalar::<VarLenAscii>()?.as_str().to_string(),
        TypeDescriptor::FixedAscii(_) => attr.read_scalar::<FixedAscii<256>>()?.as_str().to_string(),
        TypeDescriptor::FixedUnicode(_) => {
            attr.read_scalar::<FixedUnicode<256>>()?.as_str().to_string()
        }
        desc => {
            return Err(TodReadError::AttrNotString {
                attr: SOURCE_ATTR,
                desc: format!("{desc:?}"),
            })
        }
    };

    Ok(Some(source.trim_end_matches('\0').trim().to_string()))
}
