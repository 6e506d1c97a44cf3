// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Integration tests.
//!
//! Some help for laying out these tests was taken from:
//! https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html

mod arg_files;
mod dry_run;
mod errors;
mod plots;

use std::{path::Path, process::Output, str::from_utf8};

use assert_cmd::{output::OutputError, Command};
use hdf5::types::VarLenUnicode;
use ndarray::prelude::*;

const OBS_NAME: &str = "comap-0007343-2019-08-07-220019.hd5";
const NUM_FEEDS: usize = 3;
const NUM_SIDEBANDS: usize = 2;
/// Long enough for one full subsequence window and part of a second.
const NUM_SAMPLES: usize = 40000;
/// Tsys measurements at the start and end of the observation.
const NUM_TSYS_SAMPLES: usize = 100;
const TSYS: u32 = 1 << 13;

fn todplot() -> Command {
    Command::cargo_bin("todplot").unwrap()
}

fn get_cmd_output(result: Result<Output, OutputError>) -> (String, String) {
    let output = match result {
        Ok(o) => o,
        Err(o) => o.as_output().unwrap().clone(),
    };
    (
        from_utf8(&output.stdout).unwrap().to_string(),
        from_utf8(&output.stderr).unwrap().to_string(),
    )
}

/// Write a synthetic level-1 file into its month directory under `data_dir`.
/// The last channel of the last feed is all NaN.
fn write_observation(data_dir: &Path) {
    let month_dir = data_dir.join("2019-08");
    std::fs::create_dir_all(&month_dir).unwrap();
    let file = hdf5::File::create(month_dir.join(OBS_NAME)).unwrap();

    let mut tod = Array3::from_shape_fn((NUM_FEEDS, NUM_SIDEBANDS, NUM_SAMPLES), |(f, s, i)| {
        100.0 + 10.0 * f as f64 + s as f64 + (i as f64 * 1e-3).sin()
    });
    tod.slice_mut(s![NUM_FEEDS - 1, NUM_SIDEBANDS - 1, ..])
        .fill(f64::NAN);
    let el = Array2::from_shape_fn((NUM_FEEDS, NUM_SAMPLES), |(_, i)| {
        40.0 + 5.0 * (i as f64 * 1e-4).sin()
    });
    let az = Array2::from_shape_fn((NUM_FEEDS, NUM_SAMPLES), |(_, i)| {
        150.0 + 60.0 * (i as f64 * 3e-4).sin()
    });
    let mut features = Array1::<u32>::zeros(NUM_SAMPLES);
    features
        .slice_mut(s![..NUM_TSYS_SAMPLES])
        .fill(TSYS);
    features
        .slice_mut(s![NUM_SAMPLES - NUM_TSYS_SAMPLES..])
        .fill(TSYS);
    let mjd = Array1::from_shape_fn(NUM_SAMPLES, |i| 58702.9168 + i as f64 / 50.0 / 86400.0);
    let feeds = Array1::from(vec![1_u32, 2, 20]);

    let spectrometer = file.create_group("spectrometer").unwrap();
    spectrometer.new_dataset_builder()
        .with_data(&tod)
        .create("band_average")
        .unwrap();
    spectrometer.new_dataset_builder()
        .with_data(&features)
        .create("features")
        .unwrap();
    spectrometer.new_dataset_builder().with_data(&mjd).create("MJD").unwrap();
    spectrometer.new_dataset_builder()
        .with_data(&feeds)
        .create("feeds")
        .unwrap();
    let pointing = spectrometer.create_group("pixel_pointing").unwrap();
    pointing
        .new_dataset_builder()
        .with_data(&el)
        .create("pixel_el")
        .unwrap();
    pointing
        .new_dataset_builder()
        .with_data(&az)
        .create("pixel_az")
        .unwrap();

    let comap = file.create_group("comap").unwrap();
    let source: VarLenUnicode = "co2".parse().unwrap();
    comap
        .new_attr::<VarLenUnicode>()
        .create("source")
        .unwrap()
        .write_scalar(&source)
        .unwrap();
}
