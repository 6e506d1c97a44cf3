// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Diagnostic plots of raw time-ordered data from a radio telescope
spectrometer.

Level-1 HDF5 files are read into an [`Observation`], with Tsys measurements
removed and NaNs patched. Subsequences of it can be selected, elevation and
azimuth structures removed, and (with the "plotting" feature) plots made of
the result.
 */

mod cli;
pub mod constants;
#[cfg(feature = "plotting")]
pub mod plotting;
pub mod preprocessing;
pub mod time;
pub mod tod;

// Re-exports.
pub use cli::{Todplot, TodplotError};
pub use tod::{Observation, Subsequence};
