// SPDX-License-Identifier: AGPL-3.0-or-later
//! vegplot — vegetation survey plot analysis.
//!
//! Numerical core for field plots recorded one individual at a time:
//! - Alpha diversity and evenness indices per plot ([`ecology::diversity`])
//! - Power-law species-area fits S = c·Aᶻ ([`ecology::species_area`])
//! - Project-level summaries over a plot store ([`ecology::project`])
//!
//! The index and fit functions are pure and total. Storage stays behind
//! the [`store::ObservationSource`] trait; [`io::plot_csv`] loads and
//! exports tables.

pub mod ecology;
pub mod error;
pub mod io;
pub mod numeric;
pub mod store;
pub mod tolerances;
pub mod validation;

pub use ecology::diversity::{compute_indices, DiversityIndices};
pub use ecology::observation::{Measurements, Observation};
pub use ecology::species_area::{fit_power_law, AreaObservation, PowerLawFit};
pub use error::{Error, Result};
