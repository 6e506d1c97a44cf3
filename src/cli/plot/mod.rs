// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Arguments for each of the plotting subcommands.
//!
//! All booleans must have `#[serde(default)]` annotated, and anything that
//! isn't a boolean must be optional. This allows all arguments to be optional
//! *and* usable in an arguments file.

mod error;

pub(crate) use error::PlotArgsError;

use std::path::{Path, PathBuf};

use clap::Parser;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::common::{ObservationArgs, ObservationParams, SubsequenceArgs, Warn, ARG_FILE_HELP};
use crate::{Observation, Subsequence, TodplotError};

/// The channel plotted by `az-el-removal` if none is specified.
const DEFAULT_FEED_INDEX: usize = 0;
const DEFAULT_SIDEBAND_INDEX: usize = 0;

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct WholeTodArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    pub(super) args_file: Option<PathBuf>,

    #[clap(flatten)]
    #[serde(rename = "observation")]
    #[serde(default)]
    pub(super) obs_args: ObservationArgs,
}

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct SubseqPlotArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    pub(super) args_file: Option<PathBuf>,

    #[clap(flatten)]
    #[serde(rename = "observation")]
    #[serde(default)]
    pub(super) obs_args: ObservationArgs,

    #[clap(flatten)]
    #[serde(rename = "subsequence")]
    #[serde(default)]
    pub(super) subseq_args: SubsequenceArgs,
}

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct AzElRemovalArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    pub(super) args_file: Option<PathBuf>,

    /// The index of the feed to plot (not the feed number). Default: 0
    #[clap(long, help_heading = "CHANNEL")]
    pub(super) feed: Option<usize>,

    /// The index of the sideband to plot. Default: 0
    #[clap(long, help_heading = "CHANNEL")]
    pub(super) sideband: Option<usize>,

    #[clap(flatten)]
    #[serde(rename = "observation")]
    #[serde(default)]
    pub(super) obs_args: ObservationArgs,

    #[clap(flatten)]
    #[serde(rename = "subsequence")]
    #[serde(default)]
    pub(super) subseq_args: SubsequenceArgs,
}

/// The plot to make, and everything it needs other than the observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum PlotKind {
    WholeTod,
    Subsequence,
    AzElRemoval { feed: usize, sideband: usize },
    Scaled,
}

/// Parsed plotting arguments.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct PlotParams {
    pub(super) kind: PlotKind,
    pub(super) obs: ObservationParams,
    /// The whole observation is plotted if this is `None`.
    pub(super) subseq: Option<Subsequence>,
}

impl WholeTodArgs {
    /// Both command-line and file arguments overlap in terms of what is
    /// available; this function consolidates everything that was specified into
    /// a single struct. Where applicable, it will prefer CLI parameters over
    /// those in the file.
    pub(super) fn merge(self) -> Result<WholeTodArgs, TodplotError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            // Read in the file arguments. Ensure all of the file args are
            // accounted for by pattern matching.
            let WholeTodArgs {
                args_file: _,
                obs_args,
            } = unpack_arg_file!(arg_file);

            Ok(WholeTodArgs {
                args_file: None,
                obs_args: cli_args.obs_args.merge(obs_args),
            })
        } else {
            Ok(cli_args)
        }
    }

    pub(super) fn parse(self) -> Result<PlotParams, TodplotError> {
        debug!("{:#?}", self);

        Ok(PlotParams {
            kind: PlotKind::WholeTod,
            obs: self.obs_args.parse()?,
            subseq: None,
        })
    }
}

impl SubseqPlotArgs {
    pub(super) fn merge(self) -> Result<SubseqPlotArgs, TodplotError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            let SubseqPlotArgs {
                args_file: _,
                obs_args,
                subseq_args,
            } = unpack_arg_file!(arg_file);

            Ok(SubseqPlotArgs {
                args_file: None,
                obs_args: cli_args.obs_args.merge(obs_args),
                subseq_args: cli_args.subseq_args.merge(subseq_args),
            })
        } else {
            Ok(cli_args)
        }
    }

    /// `scaled` takes the same arguments as `subsequence`, so `kind` says
    /// which one these arguments are for.
    pub(super) fn parse(self, kind: PlotKind) -> Result<PlotParams, TodplotError> {
        debug!("{:#?}", self);

        Ok(PlotParams {
            kind,
            obs: self.obs_args.parse()?,
            subseq: Some(self.subseq_args.parse()?),
        })
    }
}

impl AzElRemovalArgs {
    pub(super) fn merge(self) -> Result<AzElRemovalArgs, TodplotError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            let AzElRemovalArgs {
                args_file: _,
                feed,
                sideband,
                obs_args,
                subseq_args,
            } = unpack_arg_file!(arg_file);

            Ok(AzElRemovalArgs {
                args_file: None,
                feed: cli_args.feed.or(feed),
                sideband: cli_args.sideband.or(sideband),
                obs_args: cli_args.obs_args.merge(obs_args),
                subseq_args: cli_args.subseq_args.merge(subseq_args),
            })
        } else {
            Ok(cli_args)
        }
    }

    pub(super) fn parse(self) -> Result<PlotParams, TodplotError> {
        debug!("{:#?}", self);

        let Self {
            args_file: _,
            feed,
            sideband,
            obs_args,
            subseq_args,
        } = self;

        Ok(PlotParams {
            kind: PlotKind::AzElRemoval {
                feed: feed.unwrap_or(DEFAULT_FEED_INDEX),
                sideband: sideband.unwrap_or(DEFAULT_SIDEBAND_INDEX),
            },
            obs: obs_args.parse()?,
            subseq: Some(subseq_args.parse()?),
        })
    }
}

impl PlotParams {
    pub(super) fn run(self, dry_run: bool) -> Result<(), TodplotError> {
        let PlotParams { kind, obs, subseq } = self;

        let observation = obs.load()?;
        let (observation, label) = match subseq {
            Some(subseq) => (observation.subsequence(subseq)?, subseq.label()),
            None => (observation, 0),
        };
        if let PlotKind::AzElRemoval { feed, sideband } = kind {
            if feed < observation.num_feeds()
                && sideband < observation.num_sidebands()
                && observation.is_dead_channel(feed, sideband)
            {
                format!("Feed index {feed}, sideband {sideband} is dead; its plot will be flat")
                    .warn();
            }
        }
        super::common::display_warnings();

        if dry_run {
            info!("Dry run -- not plotting");
            return Ok(());
        }

        let file = render(kind, &observation, label, &obs.output_dir)?;
        info!("Wrote {}", file.display());
        Ok(())
    }
}

#[cfg(feature = "plotting")]
fn render(
    kind: PlotKind,
    obs: &Observation,
    label: usize,
    output_dir: &Path,
) -> Result<PathBuf, TodplotError> {
    use crate::plotting::*;

    let file = match kind {
        PlotKind::WholeTod => plot_whole_tod(obs, output_dir)?,
        PlotKind::Subsequence => plot_subsequence(obs, label, output_dir)?,
        PlotKind::AzElRemoval { feed, sideband } => {
            plot_az_el_removal(obs, label, feed, sideband, output_dir)?
        }
        PlotKind::Scaled => plot_scaled(obs, label, output_dir)?,
    };
    Ok(file)
}

#[cfg(not(feature = "plotting"))]
fn render(
    _kind: PlotKind,
    _obs: &Observation,
    _label: usize,
    _output_dir: &Path,
) -> Result<PathBuf, TodplotError> {
    // Plotting is an optional feature, because it needs system fonts at
    // compile time.
    Err(TodplotError::from(PlotArgsError::NoPlottingFeature))
}
