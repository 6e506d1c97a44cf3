// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Arguments supplied through files.

use std::io::Write;

use indoc::formatdoc;
use tempfile::TempDir;

use crate::{get_cmd_output, todplot, write_observation, OBS_NAME};

#[test]
fn test_toml_arg_file() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    write_observation(tmp_dir.path());
    let arg_file = tmp_dir.path().join("args.toml");
    let mut f = std::fs::File::create(&arg_file).unwrap();
    write!(
        f,
        "{}",
        formatdoc! {r#"
            [observation]
            data = "{OBS_NAME}"
            data_dir = "{}"

            [subsequence]
            subseq = 1
        "#, tmp_dir.path().display()}
    )
    .unwrap();
    drop(f);

    let cmd = todplot()
        .args(["subsequence", &format!("{}", arg_file.display()), "--dry-run"])
        .ok();
    assert!(cmd.is_ok(), "subsequence failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("Using samples 0..30000 (subsequence 1)"), "{stdout}");
}

#[test]
fn test_save_toml_round_trip() {
    let tmp_dir = TempDir::new().expect("couldn't make tmp dir");
    write_observation(tmp_dir.path());
    let saved = tmp_dir.path().join("saved.toml");

    #[rustfmt::skip]
    let cmd = todplot()
        .args([
            "az-el-removal",
            "--data", OBS_NAME,
            "--data-dir", &format!("{}", tmp_dir.path().display()),
            "--indices", "500", "1500",
            "--feed", "1",
            "--save-toml", &format!("{}", saved.display()),
            "--dry-run",
        ])
        .ok();
    assert!(cmd.is_ok(), "az-el-removal failed: {}", cmd.err().unwrap());
    let contents = std::fs::read_to_string(&saved).unwrap();
    assert!(contents.contains("feed = 1"), "{contents}");
    assert!(contents.contains(OBS_NAME), "{contents}");

    // The saved file reproduces the run.
    let cmd = todplot()
        .args(["az-el-removal", &format!("{}", saved.display()), "--dry-run"])
        .ok();
    assert!(cmd.is_ok(), "az-el-removal failed: {}", cmd.err().unwrap());
    let (stdout, _) = get_cmd_output(cmd);
    assert!(stdout.contains("Using samples 500..1500 (subsequence 0)"), "{stdout}");
}
