// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Failing commands report a human-readable error and exit with 1.

use tempfile::TempDir;

use crate::{get_cmd_output, todplot, write_observation, OBS_NAME};

#[test]
fn test_help() {
    let cmd = todplot().arg("--help").ok();
    assert!(cmd.is_ok());
    let (stdout, _) = get_cmd_output(cmd);
    for sub_command in ["whole-tod", "subsequence", "az-el-removal", "scaled"] {
        assert!(stdout.contains(sub_command), "{stdout}");
    }
}

#[test]
fn test_no_observation() {
    let cmd = todplot().args(["whole-tod", "--dry-run"]).ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.starts_with("Error: No observation was supplied"), "{stderr}");
}

#[test]
fn test_bad_observation_filename() {
    let cmd = todplot()
        .args(["whole-tod", "--data", "tod.hd5", "--dry-run"])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("doesn't look like an observation filename"), "{stderr}");
}

#[test]
fn test_missing_observation_file() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");

    #[rustfmt::skip]
    let cmd = todplot()
        .args([
            "whole-tod",
            "--data", OBS_NAME,
            "--data-dir", &format!("{}", tmp_dir.path().display()),
            "--dry-run",
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("does not exist"), "{stderr}");
}

#[test]
fn test_subsequence_beyond_data() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    write_observation(tmp_dir.path());

    #[rustfmt::skip]
    let cmd = todplot()
        .args([
            "subsequence",
            "--data", OBS_NAME,
            "--data-dir", &format!("{}", tmp_dir.path().display()),
            "--subseq", "3",
            "--dry-run",
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.contains("only has 39800 samples"), "{stderr}");
}

#[test]
fn test_both_subsequence_selections_rejected() {
    #[rustfmt::skip]
    let cmd = todplot()
        .args([
            "subsequence",
            "--data", OBS_NAME,
            "--subseq", "1",
            "--indices", "0", "100",
            "--dry-run",
        ])
        .ok();
    // clap refuses the conflicting arguments itself.
    assert!(cmd.is_err());
}

#[test]
fn test_huge_subsequence_window() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    write_observation(tmp_dir.path());

    #[rustfmt::skip]
    let cmd = todplot()
        .args([
            "subsequence",
            "--data", OBS_NAME,
            "--data-dir", &format!("{}", tmp_dir.path().display()),
            "--subseq", &usize::MAX.to_string(),
            "--dry-run",
        ])
        .ok();
    assert!(cmd.is_err());
    let (_, stderr) = get_cmd_output(cmd);
    assert!(stderr.starts_with("Error: Subsequence window"), "{stderr}");
}
