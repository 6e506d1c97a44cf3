// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Command-line interface code. More specific options for `todplot`
//! subcommands are contained in modules.
//!
//! All booleans must have `#[serde(default)]` annotated, and anything that
//! isn't a boolean must be optional. This allows all arguments to be optional
//! *and* usable in an arguments file.
//!
//! Only 3 things should be public in this module: `Todplot`, `Todplot::run`,
//! and `TodplotError`.

#[macro_use]
mod common;
mod error;
mod plot;

pub use error::TodplotError;

use std::path::PathBuf;

use clap::{AppSettings, Args, Parser, Subcommand};
use log::info;

use plot::PlotKind;

// Add build-time information from the "built" crate.
include!(concat!(env!("OUT_DIR"), "/built.rs"));

#[derive(Debug, Parser)]
#[clap(
    version,
    author,
    about = "Diagnostic plots of raw time-ordered data from a radio telescope spectrometer"
)]
#[clap(global_setting(AppSettings::DeriveDisplayOrder))]
#[clap(disable_help_subcommand = true)]
#[clap(infer_subcommands = true)]
#[clap(propagate_version = true)]
#[clap(infer_long_args = true)]
pub struct Todplot {
    #[clap(flatten)]
    global_opts: GlobalArgs,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct GlobalArgs {
    /// The verbosity of the program. Increase by specifying multiple times
    /// (e.g. -vv). The default is to print only high-level information.
    #[clap(short, long, parse(from_occurrences))]
    #[clap(global = true)]
    verbosity: u8,

    /// Only verify that arguments were correctly ingested and that the
    /// observation can be read, then print out high-level information.
    #[clap(long)]
    #[clap(global = true)]
    dry_run: bool,

    /// Save the input arguments into a new TOML file that can be used to
    /// reproduce this run.
    #[clap(long)]
    #[clap(global = true)]
    save_toml: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
#[clap(arg_required_else_help = true)]
enum Command {
    #[clap(alias = "whole")]
    #[clap(about = "Plot every channel of a whole observation against UTC, marking the subsequence windows.")]
    WholeTod(plot::WholeTodArgs),

    #[clap(alias = "subseq")]
    #[clap(about = "Plot every channel of one subsequence against UTC.")]
    Subsequence(plot::SubseqPlotArgs),

    #[clap(alias = "remove-az-el")]
    #[clap(
        about = "Plot one channel of a subsequence before and after removing elevation and azimuth structures."
    )]
    AzElRemoval(plot::AzElRemovalArgs),

    #[clap(about = "Plot every channel of a subsequence after removing elevation and azimuth structures and scaling by the channel mean.")]
    Scaled(plot::SubseqPlotArgs),
}

impl Todplot {
    pub fn run(self) -> Result<(), TodplotError> {
        // Set up logging.
        let GlobalArgs {
            verbosity,
            dry_run,
            save_toml,
        } = self.global_opts;
        setup_logging(verbosity)?;

        // Print the version of todplot and its build-time information.
        let sub_command = match &self.command {
            Command::WholeTod(_) => "whole-tod",
            Command::Subsequence(_) => "subsequence",
            Command::AzElRemoval(_) => "az-el-removal",
            Command::Scaled(_) => "scaled",
        };
        info!("todplot {} {}", sub_command, env!("CARGO_PKG_VERSION"));
        display_build_info();

        macro_rules! merge_save {
            ($args:expr) => {{
                let args = $args.merge()?;
                if let Some(toml) = save_toml {
                    use std::{
                        fs::File,
                        io::{BufWriter, Write},
                    };

                    let mut f = BufWriter::new(File::create(toml)?);
                    let toml_str = toml::to_string(&args)
                        .map_err(|e| TodplotError::ArgFile(format!("Couldn't serialise arguments to toml: {e}")))?;
                    f.write_all(toml_str.as_bytes())?;
                }
                args
            }};
        }

        let params = match self.command {
            Command::WholeTod(args) => merge_save!(args).parse()?,
            Command::Subsequence(args) => merge_save!(args).parse(PlotKind::Subsequence)?,
            Command::AzElRemoval(args) => merge_save!(args).parse()?,
            Command::Scaled(args) => merge_save!(args).parse(PlotKind::Scaled)?,
        };
        params.run(dry_run)?;

        info!("todplot {} complete.", sub_command);
        Ok(())
    }
}

/// Activate a logger. All log messages are put onto `stdout`. `env_logger`
/// automatically only uses colours and fancy symbols if we're on a tty (e.g. a
/// terminal); piped output will be formatted sensibly. Source code lines are
/// displayed in log messages when verbosity >= 3.
fn setup_logging(verbosity: u8) -> Result<(), TodplotError> {
    let mut builder = env_logger::Builder::from_default_env();
    builder.target(env_logger::Target::Stdout);
    builder.format_target(false);
    match verbosity {
        0 => builder.filter_level(log::LevelFilter::Info),
        1 => builder.filter_level(log::LevelFilter::Debug),
        2 => builder.filter_level(log::LevelFilter::Trace),
        _ => {
            builder.filter_level(log::LevelFilter::Trace);
            builder.format(|buf, record| {
                use std::io::Write;

                let timestamp = buf.timestamp();
                let level = record.level();
                let target = record.target();
                let line = record.line().unwrap_or(0);
                let message = record.args();

                writeln!(buf, "[{timestamp} {level} {target}:{line}] {message}")
            })
        }
    };
    builder
        .try_init()
        .map_err(|e| TodplotError::Generic(format!("Failed to initialise logging: {e}")))
}

/// Write many info-level log lines of how this executable was compiled.
fn display_build_info() {
    let dirty = match GIT_DIRTY {
        Some(true) => " (dirty)",
        _ => "",
    };
    match GIT_COMMIT_HASH_SHORT {
        Some(hash) => {
            info!("Compiled on git commit hash: {hash}{dirty}");
        }
        None => info!("Compiled on git commit hash: <no git info>"),
    }
    if let Some(hr) = GIT_HEAD_REF {
        info!("            git head ref: {}", hr);
    }
    info!("            {}", BUILT_TIME_UTC);
    info!("         with compiler {}", RUSTC_VERSION);
    info!("");
}
