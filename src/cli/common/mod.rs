// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Common arguments for command-line interfaces. Every `todplot` subcommand
//! reads a single observation, and most of them then select a subsequence of
//! it, so those arguments are shared here.

mod printers;
#[cfg(test)]
mod tests;

pub(super) use printers::InfoPrinter;
pub(crate) use printers::{display_warnings, Warn};

use std::path::PathBuf;

use clap::Parser;
use itertools::Itertools;
use log::debug;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

use super::{plot::PlotArgsError, TodplotError};
use crate::{
    constants::{DEFAULT_DATA_DIR, DEFAULT_OUTPUT_DIR},
    time::mjd_span_seconds,
    Observation, Subsequence,
};

lazy_static::lazy_static! {
    pub(super) static ref ARG_FILE_TYPES_COMMA_SEPARATED: String = ArgFileTypes::iter().join(", ");

    pub(super) static ref ARG_FILE_HELP: String =
        format!("All arguments may be specified in a file. Any CLI arguments override arguments set in the file. Supported formats: {}", *ARG_FILE_TYPES_COMMA_SEPARATED);

    static ref DATA_DIR_HELP: String =
        format!("The directory containing the per-month observation directories. Default: {DEFAULT_DATA_DIR}");

    static ref OUTPUT_DIR_HELP: String =
        format!("The directory to write plots into. It is created if it doesn't exist. Default: {DEFAULT_OUTPUT_DIR}");
}

#[derive(Debug, Display, EnumIter, EnumString)]
pub(super) enum ArgFileTypes {
    #[strum(serialize = "toml")]
    Toml,
    #[strum(serialize = "json")]
    Json,
}

macro_rules! unpack_arg_file {
    ($arg_file:expr) => ({
        use std::{fs::File, io::Read, str::FromStr};

        use crate::cli::common::{ArgFileTypes, ARG_FILE_TYPES_COMMA_SEPARATED};

        debug!("Attempting to parse argument file {}", $arg_file.display());

        let mut contents = String::new();
        let arg_file_type = $arg_file
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .and_then(|e| ArgFileTypes::from_str(&e).ok());

        match arg_file_type {
            Some(ArgFileTypes::Toml) => {
                debug!("Parsing toml file...");
                let mut fh = File::open(&$arg_file)?;
                fh.read_to_string(&mut contents)?;
                match toml::from_str(&contents) {
                    Ok(p) => p,
                    Err(err) => {
                        return Err(TodplotError::ArgFile(format!(
                            "Couldn't decode toml structure from {:?}:\n{err}",
                            $arg_file
                        )))
                    }
                }
            }
            Some(ArgFileTypes::Json) => {
                debug!("Parsing json file...");
                let mut fh = File::open(&$arg_file)?;
                fh.read_to_string(&mut contents)?;
                match serde_json::from_str(&contents) {
                    Ok(p) => p,
                    Err(err) => {
                        return Err(TodplotError::ArgFile(format!(
                            "Couldn't decode json structure from {:?}:\n{err}",
                            $arg_file
                        )))
                    }
                }
            }

            _ => {
                return Err(TodplotError::ArgFile(format!(
                    "Argument file '{:?}' doesn't have a recognised file extension! Valid extensions are: {}", $arg_file, *ARG_FILE_TYPES_COMMA_SEPARATED)
                ))
            }
        }
    });
}

/// Which observation to read, where to find it, and where its plots go.
#[derive(Parser, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub(super) struct ObservationArgs {
    /// The level-1 file of the observation, e.g.
    /// comap-0007343-2019-08-07-220019.hd5. The file is looked for in the
    /// month directory of the data directory.
    #[clap(short, long, help_heading = "INPUT DATA")]
    pub(super) data: Option<String>,

    #[clap(long, help = DATA_DIR_HELP.as_str(), help_heading = "INPUT DATA")]
    pub(super) data_dir: Option<PathBuf>,

    #[clap(short, long, help = OUTPUT_DIR_HELP.as_str(), help_heading = "OUTPUT FILES")]
    pub(super) output_dir: Option<PathBuf>,
}

/// Parsed [`ObservationArgs`].
#[derive(Debug, Clone, PartialEq)]
pub(super) struct ObservationParams {
    pub(super) filename: String,
    pub(super) data_dir: PathBuf,
    pub(super) output_dir: PathBuf,
}

impl ObservationArgs {
    pub(super) fn merge(self, other: Self) -> Self {
        Self {
            data: self.data.or(other.data),
            data_dir: self.data_dir.or(other.data_dir),
            output_dir: self.output_dir.or(other.output_dir),
        }
    }

    pub(super) fn parse(self) -> Result<ObservationParams, TodplotError> {
        let Self {
            data,
            data_dir,
            output_dir,
        } = self;

        let filename = data.ok_or(PlotArgsError::NoObservation)?;
        Ok(ObservationParams {
            filename,
            data_dir: data_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
            output_dir: output_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
        })
    }
}

impl ObservationParams {
    /// Read the observation and report on what was read.
    pub(super) fn load(&self) -> Result<Observation, TodplotError> {
        let obs = Observation::load(&self.filename, &self.data_dir)?;

        let mut printer = InfoPrinter::new(
            match obs.source.as_deref() {
                Some(source) => format!("Obsid {} ({source})", obs.obsid),
                None => format!("Obsid {}", obs.obsid),
            }
            .into(),
        );
        printer.push_line(format!("File: {}", self.filename).into());
        printer.push_line(
            format!(
                "{} feeds × {} sidebands, {} samples after removing Tsys measurements",
                obs.num_feeds(),
                obs.num_sidebands(),
                obs.num_samples()
            )
            .into(),
        );
        printer.push_line(format!("Feeds: [{}]", obs.feeds.iter().join(", ")).into());
        if let (Some(start), Some(end)) = (obs.start_epoch(), obs.end_epoch()) {
            printer.push_block(vec![
                format!("Start: {start}").into(),
                format!("End:   {end}").into(),
                format!(
                    "Duration: {:.1} minutes",
                    mjd_span_seconds(obs.mjd[0], obs.mjd[obs.num_samples() - 1]) / 60.0
                )
                .into(),
            ]);
        }
        let num_dead = (0..obs.num_feeds())
            .cartesian_product(0..obs.num_sidebands())
            .filter(|&(f, s)| obs.is_dead_channel(f, s))
            .count();
        if num_dead > 0 {
            printer.push_line(format!("{num_dead} dead channels").into());
        }
        printer.display();

        if obs.source.is_none() {
            format!("Obsid {} has no source attribute", obs.obsid).warn();
        }
        display_warnings();

        Ok(obs)
    }
}

/// Which part of the observation to plot.
#[derive(Parser, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub(super) struct SubsequenceArgs {
    /// The subsequence window to plot, counting from 1. Each window is 10
    /// minutes of data.
    #[clap(short, long, help_heading = "SUBSEQUENCE")]
    pub(super) subseq: Option<usize>,

    /// Plot the samples from START up to (but not including) END instead of
    /// a whole window.
    #[clap(
        long,
        number_of_values = 2,
        value_names = &["START", "END"],
        conflicts_with = "subseq",
        help_heading = "SUBSEQUENCE"
    )]
    pub(super) indices: Option<Vec<usize>>,
}

impl SubsequenceArgs {
    /// The subsequence is selected as a whole; if either argument was given
    /// on the command line, the file's selection is ignored.
    pub(super) fn merge(self, other: Self) -> Self {
        if self.subseq.is_some() || self.indices.is_some() {
            self
        } else {
            other
        }
    }

    pub(super) fn parse(self) -> Result<Subsequence, TodplotError> {
        match (self.subseq, self.indices.as_deref()) {
            (Some(_), Some(_)) => Err(PlotArgsError::BothSubsequences.into()),
            (Some(n), None) => Ok(Subsequence::Window(n)),
            (None, Some(&[start, end])) => Ok(Subsequence::Indices { start, end }),
            (None, Some(other)) => Err(PlotArgsError::IndicesCount(other.len()).into()),
            (None, None) => Err(PlotArgsError::NoSubsequence.into()),
        }
    }
}
