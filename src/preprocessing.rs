// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Signal conditioning applied to time-ordered data before plotting.
//!
//! All functions take power arrays with dimensions \[feed, sideband, sample\]
//! and pointing arrays with dimensions \[feed, sample\].

use ndarray::{prelude::*, Zip};

/// Squared deviations summing to less than this (per sample) mean a
/// regressor is constant.
const DEGENERATE_TOL: f64 = 1e-12;

/// Remove the structure in each channel that correlates with the telescope's
/// pointing. Each channel is fitted with
///
/// `d = g / sin(el) + a * az + c`
///
/// by least squares, and the elevation and azimuth terms are subtracted
/// about their means, so each channel keeps its mean level. A regressor that
/// doesn't vary (e.g. a constant-elevation scan) is left out of the fit.
/// Dead (all-zero) channels are returned unchanged.
pub fn remove_elevation_azimuth_structures(
    tod: ArrayView3<f64>,
    el: ArrayView2<f64>,
    az: ArrayView2<f64>,
) -> Array3<f64> {
    assert_eq!(tod.len_of(Axis(0)), el.len_of(Axis(0)));
    assert_eq!(tod.len_of(Axis(2)), el.len_of(Axis(1)));
    assert_eq!(el.dim(), az.dim());

    let mut out = tod.to_owned();
    for ((mut feed_tod, el), az) in out
        .outer_iter_mut()
        .zip(el.outer_iter())
        .zip(az.outer_iter())
    {
        let airmass = el.mapv(|e| 1.0 / e.to_radians().sin());
        let airmass = if airmass.iter().all(|a| a.is_finite()) {
            Some(centred(airmass))
        } else {
            None
        };
        let az = centred(az.to_owned());

        for mut channel in feed_tod.outer_iter_mut() {
            if channel.sum() == 0.0 {
                continue;
            }
            let (g, a) = fit(airmass.as_ref(), &az, channel.view());
            match airmass.as_ref() {
                Some(airmass) => Zip::from(&mut channel)
                    .and(airmass)
                    .and(&az)
                    .for_each(|d, &x1, &x2| *d -= g * x1 + a * x2),
                None => Zip::from(&mut channel)
                    .and(&az)
                    .for_each(|d, &x2| *d -= a * x2),
            }
        }
    }

    out
}

fn centred(mut x: Array1<f64>) -> Array1<f64> {
    let mean = x.mean().unwrap_or(0.0);
    x -= mean;
    x
}

/// Least-squares coefficients of the (already centred) airmass and azimuth
/// regressors.
fn fit(airmass: Option<&Array1<f64>>, az: &Array1<f64>, d: ArrayView1<f64>) -> (f64, f64) {
    let n = d.len() as f64;
    let d = centred(d.to_owned());
    let s22 = az.dot(az);
    let s2y = az.dot(&d);
    let az_varies = s22 > DEGENERATE_TOL * n;

    let (s11, s12, s1y) = match airmass {
        Some(x1) => (x1.dot(x1), x1.dot(az), x1.dot(&d)),
        None => (0.0, 0.0, 0.0),
    };
    let el_varies = s11 > DEGENERATE_TOL * n;

    match (el_varies, az_varies) {
        (true, true) => {
            let det = s11 * s22 - s12 * s12;
            if det > 1e-9 * s11 * s22 {
                ((s1y * s22 - s2y * s12) / det, (s2y * s11 - s1y * s12) / det)
            } else {
                // The regressors are collinear; elevation explains it all.
                (s1y / s11, 0.0)
            }
        }
        (true, false) => (s1y / s11, 0.0),
        (false, true) => (0.0, s2y / s22),
        (false, false) => (0.0, 0.0),
    }
}

/// Normalise each channel by its mean, so that it fluctuates about zero:
/// `d / mean(d) - 1`. Channels with a zero (or non-finite) mean become zero.
pub fn scale(tod: ArrayView3<f64>) -> Array3<f64> {
    let mut out = tod.to_owned();
    for mut channel in out.lanes_mut(Axis(2)) {
        let mean = channel.mean().unwrap_or(0.0);
        if mean == 0.0 || !mean.is_finite() {
            channel.fill(0.0);
        } else {
            channel.mapv_inplace(|d| d / mean - 1.0);
        }
    }
    out
}
