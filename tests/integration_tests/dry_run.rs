// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Each subcommand reads the observation but doesn't plot when given
//! --dry-run. Successful commands write nothing to stderr.

use tempfile::TempDir;

use crate::{get_cmd_output, todplot, write_observation, OBS_NAME};

#[test]
fn test_whole_tod_dry_run() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    write_observation(tmp_dir.path());
    let output_dir = tmp_dir.path().join("figures");

    #[rustfmt::skip]
    let cmd = todplot()
        .args([
            "whole-tod",
            "--data", OBS_NAME,
            "--data-dir", &format!("{}", tmp_dir.path().display()),
            "--output-dir", &format!("{}", output_dir.display()),
            "--dry-run",
        ])
        .ok();
    assert!(cmd.is_ok(), "whole-tod failed: {}", cmd.err().unwrap());
    let (stdout, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty(), "stderr wasn't empty: {stderr}");
    assert!(stdout.contains("Obsid 7343 (co2)"), "{stdout}");
    assert!(stdout.contains("39800 samples"), "{stdout}");
    assert!(stdout.contains("1 dead channels"), "{stdout}");
    assert!(stdout.contains("Dry run"), "{stdout}");
    // Nothing was plotted.
    assert!(!output_dir.exists());
}

#[test]
fn test_subsequence_dry_run_clamps_window() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    write_observation(tmp_dir.path());

    #[rustfmt::skip]
    let cmd = todplot()
        .args([
            "subsequence",
            "--data", OBS_NAME,
            "--data-dir", &format!("{}", tmp_dir.path().display()),
            "--subseq", "2",
            "--dry-run",
        ])
        .ok();
    assert!(cmd.is_ok(), "subsequence failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("Using samples 30000..39800 (subsequence 2)"), "{stdout}");
}

#[test]
fn test_scaled_dry_run_with_indices() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    write_observation(tmp_dir.path());

    #[rustfmt::skip]
    let cmd = todplot()
        .args([
            "scaled",
            "--data", OBS_NAME,
            "--data-dir", &format!("{}", tmp_dir.path().display()),
            "--indices", "1000", "31000",
            "--dry-run",
        ])
        .ok();
    assert!(cmd.is_ok(), "scaled failed: {}", cmd.err().unwrap());
    let (stdout, stderr) = get_cmd_output(cmd);
    assert!(stderr.is_empty(), "stderr wasn't empty: {stderr}");
    assert!(stdout.contains("Using samples 1000..31000 (subsequence 1)"), "{stdout}");
}

#[test]
fn test_az_el_removal_dry_run_warns_about_dead_channel() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    write_observation(tmp_dir.path());

    #[rustfmt::skip]
    let cmd = todplot()
        .args([
            "az-el-removal",
            "--data", OBS_NAME,
            "--data-dir", &format!("{}", tmp_dir.path().display()),
            "--subseq", "1",
            "--feed", "2",
            "--sideband", "1",
            "--dry-run",
        ])
        .ok();
    assert!(cmd.is_ok(), "az-el-removal failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("Feed index 2, sideband 1 is dead"), "{stdout}");
}
