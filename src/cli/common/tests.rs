// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Tests against the shared command-line arguments.

use super::*;

#[test]
fn observation_defaults() {
    let params = ObservationArgs {
        data: Some("comap-0007343-2019-08-07-220019.hd5".to_string()),
        ..Default::default()
    }
    .parse()
    .unwrap();
    assert_eq!(params.filename, "comap-0007343-2019-08-07-220019.hd5");
    assert_eq!(params.data_dir, PathBuf::from(DEFAULT_DATA_DIR));
    assert_eq!(params.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
}

#[test]
fn observation_is_required() {
    let result = ObservationArgs {
        data_dir: Some(PathBuf::from("/data")),
        ..Default::default()
    }
    .parse();
    assert!(matches!(result, Err(TodplotError::Plot(_))));
}

#[test]
fn cli_observation_args_take_precedence() {
    let cli = ObservationArgs {
        data: Some("a.hd5".to_string()),
        data_dir: None,
        output_dir: Some(PathBuf::from("cli_out")),
    };
    let file = ObservationArgs {
        data: Some("b.hd5".to_string()),
        data_dir: Some(PathBuf::from("/file/data")),
        output_dir: Some(PathBuf::from("file_out")),
    };
    assert_eq!(
        cli.merge(file),
        ObservationArgs {
            data: Some("a.hd5".to_string()),
            data_dir: Some(PathBuf::from("/file/data")),
            output_dir: Some(PathBuf::from("cli_out")),
        }
    );
}

#[test]
fn subsequence_selection() {
    let window = SubsequenceArgs {
        subseq: Some(2),
        indices: None,
    };
    assert_eq!(window.parse().unwrap(), Subsequence::Window(2));

    let indices = SubsequenceArgs {
        subseq: None,
        indices: Some(vec![100, 2000]),
    };
    assert_eq!(
        indices.parse().unwrap(),
        Subsequence::Indices {
            start: 100,
            end: 2000
        }
    );
}

#[test]
fn bad_subsequence_selections() {
    for args in [
        SubsequenceArgs::default(),
        SubsequenceArgs {
            subseq: Some(1),
            indices: Some(vec![0, 10]),
        },
        SubsequenceArgs {
            subseq: None,
            indices: Some(vec![0, 10, 20]),
        },
    ] {
        assert!(matches!(args.parse(), Err(TodplotError::Plot(_))));
    }
}

#[test]
fn subsequence_merged_as_a_whole() {
    let cli = SubsequenceArgs {
        subseq: Some(3),
        indices: None,
    };
    let file = SubsequenceArgs {
        subseq: None,
        indices: Some(vec![0, 10]),
    };
    assert_eq!(cli.clone().merge(file.clone()), cli);
    assert_eq!(SubsequenceArgs::default().merge(file.clone()), file);
}
