// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Each subcommand draws its plot into the output directory without writing
//! to stderr.

#![cfg(feature = "plotting")]

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::{get_cmd_output, todplot, write_observation, OBS_NAME};

/// Run a plotting subcommand against the synthetic observation, and return
/// the output directory's path.
fn plot(tmp_dir: &Path, args: &[&str]) -> PathBuf {
    write_observation(tmp_dir);
    let output_dir = tmp_dir.join("figures");

    #[rustfmt::skip]
    let cmd = todplot()
        .args(args)
        .args([
            "--data", OBS_NAME,
            "--data-dir", &format!("{}", tmp_dir.display()),
            "--output-dir", &format!("{}", output_dir.display()),
        ])
        .ok();
    assert!(cmd.is_ok(), "{} failed: {}", args[0], cmd.err().unwrap());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty(), "stderr wasn't empty: {stderr}");
    output_dir
}

#[test]
fn test_whole_tod_plot() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let output_dir = plot(tmp_dir.path(), &["whole-tod"]);
    assert!(output_dir.join("7343_whole_tod.png").exists());
}

#[test]
fn test_subsequence_plot() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let output_dir = plot(tmp_dir.path(), &["subsequence", "--subseq", "1"]);
    assert!(output_dir.join("7343_subseq_1_scaled.png").exists());
}

#[test]
fn test_az_el_removal_plot() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let output_dir = plot(tmp_dir.path(), &["az-el-removal", "--subseq", "1"]);
    assert!(output_dir.join("7343_subseq_1_0_0_remove_az_el.png").exists());
}

#[test]
fn test_scaled_plot() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    let output_dir = plot(tmp_dir.path(), &["scaled", "--subseq", "1"]);
    assert!(output_dir.join("7343_subseq_1_scaled_same_y.png").exists());
}
