// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Diagnostic plots of time-ordered data.
//!
//! Every plot is written as a PNG into an output directory, with a filename
//! made from the obsid and the kind of plot.


use std::{
    ops::Range,
    path::{Path, PathBuf},
};

use log::debug;
use ndarray::prelude::*;
use plotters::{coord::Shift, prelude::*, style::RGBAColor};
use thiserror::Error;

use crate::{
    constants::SUBSEQUENCE_LENGTH,
    preprocessing::{remove_elevation_azimuth_structures, scale},
    time::{format_utc_hms, minute_ticks},
    Observation,
};

/// The line colours. Feeds are coloured by their index into this palette.
const PALETTE: [RGBColor; 10] = [
    RGBColor(0x1f, 0x77, 0xb4),
    RGBColor(0xff, 0x7f, 0x0e),
    RGBColor(0x2c, 0xa0, 0x2c),
    RGBColor(0xd6, 0x27, 0x28),
    RGBColor(0x94, 0x67, 0xbd),
    RGBColor(0x8c, 0x56, 0x4b),
    RGBColor(0xe3, 0x77, 0xc2),
    RGBColor(0x7f, 0x7f, 0x7f),
    RGBColor(0xbc, 0xbd, 0x22),
    RGBColor(0x17, 0xbe, 0xcf),
];

const WHOLE_TOD_PIXELS: (u32, u32) = (2200, 1000);
const SUBSEQUENCE_PIXELS: (u32, u32) = (1000, 800);
const AZ_EL_PIXELS: (u32, u32) = (2200, 600);
const SCALED_PIXELS: (u32, u32) = (1000, 800);

/// Minutes between time ticks on the whole-observation plot.
const WHOLE_TOD_TICK_MINUTES: u32 = 10;
/// Minutes between time ticks on the subsequence plot.
const SUBSEQUENCE_TICK_MINUTES: u32 = 2;

/// The fixed y range of the scaled plot.
const SCALED_Y_RANGE: Range<f64> = -0.1..0.1;

const FONT: &str = "sans-serif";
const TITLE_FONT_SIZE: i32 = 40;
const LABEL_FONT_SIZE: i32 = 24;

lazy_static::lazy_static! {
    static ref MARKER_COLOUR: RGBAColor = BLACK.mix(0.5);
}

#[derive(Error, Debug)]
pub enum DrawError {
    #[error("Obsid {obsid} has no channel for feed index {feed}, sideband {sideband} (it has {num_feeds} feeds and {num_sidebands} sidebands)")]
    NoSuchChannel {
        obsid: u32,
        feed: usize,
        sideband: usize,
        num_feeds: usize,
        num_sidebands: usize,
    },

    #[error("Error from the plotters library: {0}")]
    Plotters(Box<dyn std::error::Error>),

    #[error(transparent)]
    IO(#[from] std::io::Error),
}

/// Plot every channel of the whole observation against UTC, marking the
/// subsequence windows.
pub fn plot_whole_tod(obs: &Observation, output_dir: &Path) -> Result<PathBuf, DrawError> {
    let path = output_path(output_dir, obs.obsid, "whole_tod")?;
    debug!("Plotting the whole TOD of obsid {} to {}", obs.obsid, path.display());

    let (y_min, y_max) = whole_tod_y_range(obs.tod.view());
    let root = BitMapBackend::new(&path, WHOLE_TOD_PIXELS).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| DrawError::Plotters(Box::new(e)))?;
    let markers = window_markers(obs.num_samples());
    draw_time_traces(
        &root,
        obs,
        y_min..y_max,
        WHOLE_TOD_TICK_MINUTES,
        false,
        &markers,
    )?;
    root.present()
        .map_err(|e| DrawError::Plotters(Box::new(e)))?;

    Ok(path.clone())
}

/// Plot every channel of an already-cropped observation against UTC.
pub fn plot_subsequence(
    obs: &Observation,
    label: usize,
    output_dir: &Path,
) -> Result<PathBuf, DrawError> {
    let path = output_path(output_dir, obs.obsid, &format!("subseq_{label}_scaled"))?;
    debug!("Plotting subsequence {label} of obsid {} to {}", obs.obsid, path.display());

    let y_range = {
        let (min, max) = min_max(
            traced_channels(obs)
                .into_iter()
                .flat_map(|(f, s)| obs.tod.slice(s![f, s, ..]).to_vec()),
        )
        .unwrap_or((0.0, 1.0));
        padded_range(min, max, 0.05)
    };
    let root = BitMapBackend::new(&path, SUBSEQUENCE_PIXELS).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| DrawError::Plotters(Box::new(e)))?;
    draw_time_traces(&root, obs, y_range, SUBSEQUENCE_TICK_MINUTES, true, &[])?;
    root.present()
        .map_err(|e| DrawError::Plotters(Box::new(e)))?;

    Ok(path.clone())
}

/// Plot a single channel of an already-cropped observation before and after
/// the removal of elevation and azimuth structures, side by side.
pub fn plot_az_el_removal(
    obs: &Observation,
    label: usize,
    feed: usize,
    sideband: usize,
    output_dir: &Path,
) -> Result<PathBuf, DrawError> {
    if feed >= obs.num_feeds() || sideband >= obs.num_sidebands() {
        return Err(DrawError::NoSuchChannel {
            obsid: obs.obsid,
            feed,
            sideband,
            num_feeds: obs.num_feeds(),
            num_sidebands: obs.num_sidebands(),
        });
    }
    let path = output_path(
        output_dir,
        obs.obsid,
        &format!("subseq_{label}_{feed}_{sideband}_remove_az_el"),
    )?;
    debug!(
        "Plotting elevation/azimuth removal of subsequence {label} of obsid {} to {}",
        obs.obsid,
        path.display()
    );

    let before = obs.tod.slice(s![feed, sideband, ..]).to_owned();
    let after = remove_elevation_azimuth_structures(obs.tod.view(), obs.el.view(), obs.az.view())
        .slice_move(s![feed, sideband, ..]);
    // Both panels share a top limit, so the levels can be compared.
    let top = before.iter().copied().fold(f64::NEG_INFINITY, f64::max) * 1.001;

    let root = BitMapBackend::new(&path, AZ_EL_PIXELS).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| DrawError::Plotters(Box::new(e)))?;
    let root = root
        .titled(
            &format!("ObsID: {}", obs.obsid),
            (FONT, TITLE_FONT_SIZE).into_font(),
        )
        .map_err(|e| DrawError::Plotters(Box::new(e)))?;
    let (left, right) = root.split_horizontally(AZ_EL_PIXELS.0 / 2);
    draw_sample_panel(&left, before.view(), top, "d_before", PALETTE[0])?;
    draw_sample_panel(&right, after.view(), top, "d_after", PALETTE[0])?;
    root.present()
        .map_err(|e| DrawError::Plotters(Box::new(e)))?;

    Ok(path.clone())
}

/// Plot every live channel of an already-cropped observation after removing
/// elevation and azimuth structures and scaling, on a fixed y range.
pub fn plot_scaled(obs: &Observation, label: usize, output_dir: &Path) -> Result<PathBuf, DrawError> {
    let path = output_path(
        output_dir,
        obs.obsid,
        &format!("subseq_{label}_scaled_same_y"),
    )?;
    debug!("Plotting scaled subsequence {label} of obsid {} to {}", obs.obsid, path.display());

    let detrended =
        remove_elevation_azimuth_structures(obs.tod.view(), obs.el.view(), obs.az.view());
    let scaled = scale(detrended.view());

    let root = BitMapBackend::new(&path, SCALED_PIXELS).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| DrawError::Plotters(Box::new(e)))?;
    let num_samples = obs.num_samples();
    let mut chart = ChartBuilder::on(&root)
        .caption(format!("ObsID: {}", obs.obsid), (FONT, TITLE_FONT_SIZE))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(90)
        .build_cartesian_2d(sample_range(num_samples), SCALED_Y_RANGE)
        .map_err(|e| DrawError::Plotters(Box::new(e)))?;
    chart
        .configure_mesh()
        .x_desc("Sample")
        .y_desc("Power")
        .label_style((FONT, LABEL_FONT_SIZE))
        .draw()
        .map_err(|e| DrawError::Plotters(Box::new(e)))?;

    for (feed, feed_tod) in scaled.outer_iter().enumerate() {
        for (sideband, channel) in feed_tod.outer_iter().enumerate() {
            if obs.is_dead_channel(feed, sideband) {
                continue;
            }
            chart
                .draw_series(LineSeries::new(
                    channel.iter().enumerate().map(|(i, &y)| (i as f64, y)),
                    feed_colour(feed).stroke_width(1),
                ))
                .map_err(|e| DrawError::Plotters(Box::new(e)))?;
        }
    }
    root.present()
        .map_err(|e| DrawError::Plotters(Box::new(e)))?;

    Ok(path.clone())
}

/// A subsequence boundary on the whole-observation plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct WindowMarker {
    /// The sample index of the boundary.
    pub(crate) index: usize,

    /// The window number, and the sample index to write it at.
    pub(crate) label: Option<(usize, usize)>,
}

/// Every window boundary that falls within the data. The number of each
/// window is written halfway through it, except after the final boundary.
pub(crate) fn window_markers(num_samples: usize) -> Vec<WindowMarker> {
    let num_boundaries = num_samples / SUBSEQUENCE_LENGTH;
    (0..=num_boundaries)
        .map(|i| (i, i * SUBSEQUENCE_LENGTH))
        .filter(|&(_, index)| index < num_samples)
        .map(|(i, index)| {
            let mid = index + SUBSEQUENCE_LENGTH / 2;
            let label = if i != num_boundaries && mid < num_samples {
                Some((i + 1, mid))
            } else {
                None
            };
            WindowMarker { index, label }
        })
        .collect()
}

/// The (feed, sideband) channels drawn on the time plots. The last feed is
/// left out (unless it's the only one), as are dead channels.
pub(crate) fn traced_channels(obs: &Observation) -> Vec<(usize, usize)> {
    let num_feeds = match obs.num_feeds() {
        0 | 1 => obs.num_feeds(),
        n => n - 1,
    };
    (0..num_feeds)
        .flat_map(|f| (0..obs.num_sidebands()).map(move |s| (f, s)))
        .filter(|&(f, s)| !obs.is_dead_channel(f, s))
        .collect()
}

/// The y range of the whole-observation plot: from 1% of the maximum below
/// the minimum to 15% above the maximum. The last feed doesn't contribute.
pub(crate) fn whole_tod_y_range(tod: ArrayView3<f64>) -> (f64, f64) {
    let num_feeds = match tod.len_of(Axis(0)) {
        0 | 1 => tod.len_of(Axis(0)),
        n => n - 1,
    };
    match min_max(tod.slice(s![..num_feeds, .., ..]).iter().copied()) {
        Some((min, max)) if max > 0.0 => (min - max * 0.01, max * 1.15),
        Some((min, max)) => {
            let r = padded_range(min, max, 0.05);
            (r.start, r.end)
        }
        None => (0.0, 1.0),
    }
}

/// Pad a range by a fraction of its span. Empty ranges are widened so that
/// plotters has something to draw.
pub(crate) fn padded_range(min: f64, max: f64, frac: f64) -> Range<f64> {
    let span = max - min;
    if span <= f64::EPSILON * max.abs().max(1.0) {
        let pad = (max.abs() * frac).max(0.5);
        return (min - pad)..(max + pad);
    }
    (min - span * frac)..(max + span * frac)
}

fn min_max(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((min, max)) => Some((min.min(v), max.max(v))),
        })
}

fn sample_range(num_samples: usize) -> Range<f64> {
    0.0..(num_samples.max(2) - 1) as f64
}

fn feed_colour(feed: usize) -> RGBColor {
    PALETTE[feed % PALETTE.len()]
}

pub(crate) fn output_path(
    output_dir: &Path,
    obsid: u32,
    suffix: &str,
) -> Result<PathBuf, DrawError> {
    if !output_dir.exists() {
        std::fs::create_dir_all(output_dir)?;
    }
    Ok(output_dir.join(format!("{obsid}_{suffix}.png")))
}

/// Draw the traced channels of `obs` against UTC time.
fn draw_time_traces<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    obs: &Observation,
    y_range: Range<f64>,
    tick_minutes: u32,
    grid: bool,
    markers: &[WindowMarker],
) -> Result<(), DrawError>
where
    DB::ErrorType: 'static,
{
    let (start, end) = match (obs.mjd.first(), obs.mjd.last()) {
        (Some(&s), Some(&e)) if e > s => (s, e),
        (Some(&s), _) => (s, s + 1.0 / 86400.0),
        _ => (0.0, 1.0),
    };
    let ticks = minute_ticks(start, end, tick_minutes);
    let mut chart = ChartBuilder::on(area)
        .caption(format!("ObsID: {}", obs.obsid), (FONT, TITLE_FONT_SIZE))
        .margin(20)
        .x_label_area_size(90)
        .y_label_area_size(110)
        .build_cartesian_2d((start..end).with_key_points(ticks), y_range.clone())
        .map_err(|e| DrawError::Plotters(Box::new(e)))?;

    let x_label_formatter = |x: &f64| format_utc_hms(*x);
    let mut mesh = chart.configure_mesh();
    mesh.x_desc("UTC (hours)")
        .y_desc("Power")
        .x_label_formatter(&x_label_formatter)
        .label_style((FONT, LABEL_FONT_SIZE));
    if !grid {
        mesh.disable_mesh();
    }
    mesh.draw().map_err(|e| DrawError::Plotters(Box::new(e)))?;

    for (feed, sideband) in traced_channels(obs) {
        let channel = obs.tod.slice(s![feed, sideband, ..]);
        chart
            .draw_series(LineSeries::new(
                obs.mjd.iter().copied().zip(channel.iter().copied()),
                feed_colour(feed).stroke_width(1),
            ))
            .map_err(|e| DrawError::Plotters(Box::new(e)))?;
    }

    let label_y = if y_range.end * 0.85 > y_range.start {
        y_range.end * 0.85
    } else {
        y_range.start + 0.85 * (y_range.end - y_range.start)
    };
    for marker in markers {
        let x = obs.mjd[marker.index];
        chart
            .draw_series(std::iter::once(PathElement::new(
                vec![(x, y_range.start), (x, y_range.end)],
                *MARKER_COLOUR,
            )))
            .map_err(|e| DrawError::Plotters(Box::new(e)))?;
        if let Some((number, mid)) = marker.label {
            chart
                .draw_series(std::iter::once(Text::new(
                    number.to_string(),
                    (obs.mjd[mid], label_y),
                    (FONT, LABEL_FONT_SIZE).into_font().color(&*MARKER_COLOUR),
                )))
                .map_err(|e| DrawError::Plotters(Box::new(e)))?;
        }
    }

    Ok(())
}

/// Draw a single channel against sample index. The y axis runs from just
/// below the data to `top`.
fn draw_sample_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    data: ArrayView1<f64>,
    top: f64,
    legend: &str,
    colour: RGBColor,
) -> Result<(), DrawError>
where
    DB::ErrorType: 'static,
{
    let y_range = match min_max(data.iter().copied()) {
        Some((min, _)) if top.is_finite() && top > min => {
            let r = padded_range(min, top, 0.05);
            r.start..top
        }
        Some((min, max)) => padded_range(min, max, 0.05),
        None => 0.0..1.0,
    };
    let mut chart = ChartBuilder::on(area)
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(110)
        .build_cartesian_2d(sample_range(data.len()), y_range)
        .map_err(|e| DrawError::Plotters(Box::new(e)))?;
    chart
        .configure_mesh()
        .x_desc("Sample")
        .y_desc("Power")
        .label_style((FONT, LABEL_FONT_SIZE))
        .draw()
        .map_err(|e| DrawError::Plotters(Box::new(e)))?;

    chart
        .draw_series(LineSeries::new(
            data.iter().enumerate().map(|(i, &y)| (i as f64, y)),
            colour.stroke_width(1),
        ))
        .map_err(|e| DrawError::Plotters(Box::new(e)))?
        .label(legend)
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], colour));
    chart
        .configure_series_labels()
        .label_font((FONT, LABEL_FONT_SIZE))
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(|e| DrawError::Plotters(Box::new(e)))?;

    Ok(())
}
