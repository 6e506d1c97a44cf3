// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Observation filenames. These encode the obsid and the observation date,
//! and observations are stored in per-month directories, e.g.
//! `<data dir>/2019-08/comap-0007343-2019-08-07-220019.hd5`.

use std::path::{Path, PathBuf};

use regex::Regex;

use super::ObsFilenameError;

lazy_static::lazy_static! {
    static ref OBS_FILENAME_REGEX: Regex =
        Regex::new(r"^[A-Za-z]+-(\d+)-(\d{4}-\d{2})-\d{2}-\d{6}\.hd5$").unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObsFilename {
    name: String,
    obsid: u32,
    month: String,
}

impl ObsFilename {
    /// Parse an observation filename. Only the final path component of
    /// `name` is considered, so paths are accepted too.
    pub fn parse(name: &str) -> Result<ObsFilename, ObsFilenameError> {
        let name = Path::new(name)
            .file_name()
            .and_then(|s| s.to_str())
            .ok_or_else(|| ObsFilenameError::Unrecognised(name.to_string()))?;
        let caps = OBS_FILENAME_REGEX
            .captures(name)
            .ok_or_else(|| ObsFilenameError::Unrecognised(name.to_string()))?;
        let obsid = caps[1]
            .parse()
            .map_err(|_| ObsFilenameError::ObsidTooLarge(name.to_string()))?;

        Ok(ObsFilename {
            name: name.to_string(),
            obsid,
            month: caps[2].to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn obsid(&self) -> u32 {
        self.obsid
    }

    /// The "YYYY-MM" directory the observation lives in.
    pub fn month(&self) -> &str {
        &self.month
    }

    pub fn path_in(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.month).join(&self.name)
    }
}
