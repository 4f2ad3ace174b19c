// SPDX-License-Identifier: AGPL-3.0-or-later
//! Species-area relationship: power-law fit S = c·Aᶻ.
//!
//! [`fit_power_law`] runs ordinary least squares on (ln A, ln S) and
//! reports c, z and R², each rounded to 4 decimal places. Degenerate
//! input (fewer than two usable points, identical areas, identical
//! species counts) yields the zero sentinels documented on each field
//! rather than an error. A fit whose coefficient overflows `f64` is
//! reported as [`PowerLawFit::DEGENERATE`] as well.
//!
//! [`nested_area_points`] builds the input points from a nested subplot
//! layout by species accumulation.

use super::observation::Observation;
use crate::error::{Error, Result};
use crate::numeric::round_to;
use crate::tolerances::FIT_DECIMALS;
use std::collections::HashSet;
use std::hash::Hash;

/// One nested-plot sampling point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaObservation {
    /// Sampled area (m²).
    pub area: f64,
    /// Species counted within `area`.
    ///
    /// Integer for field counts; fractional values from rarefied or
    /// interpolated curves are accepted as-is.
    pub species_count: f64,
}

impl AreaObservation {
    /// Point from an area and an integer species count.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_count(area: f64, species_count: usize) -> Self {
        Self {
            area,
            species_count: species_count as f64,
        }
    }

    fn is_fittable(&self) -> bool {
        self.area.is_finite()
            && self.species_count.is_finite()
            && self.area > 0.0
            && self.species_count > 0.0
    }
}

/// Fitted S = c·Aᶻ.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerLawFit {
    /// Coefficient c = exp(intercept); 0.0 for a degenerate fit.
    pub c: f64,
    /// Exponent z (log-log slope); 0.0 when all areas are equal.
    pub z: f64,
    /// Coefficient of determination; 0.0 when all species counts are equal.
    pub r_squared: f64,
}

impl PowerLawFit {
    /// Result for fewer than two usable points or a non-finite fit.
    pub const DEGENERATE: Self = Self {
        c: 0.0,
        z: 0.0,
        r_squared: 0.0,
    };

    /// Predicted species count at `area`.
    #[must_use]
    pub fn predict(&self, area: f64) -> f64 {
        self.c * area.powf(self.z)
    }
}

/// Fit S = c·Aᶻ by least squares on log-transformed points.
///
/// Points with non-positive (or non-finite) area or species count are
/// ignored. Input order does not affect the result.
///
/// The result is always finite. When the fitted line is so steep that
/// c = exp(intercept) overflows (nearly equal areas with very different
/// counts), or any other field comes out non-finite, the whole fit is
/// [`PowerLawFit::DEGENERATE`] rather than a saturated coefficient.
///
/// ```
/// use vegplot::ecology::species_area::{fit_power_law, AreaObservation};
///
/// let points: Vec<AreaObservation> = [1.0, 2.0, 4.0, 8.0]
///     .into_iter()
///     .map(|a: f64| AreaObservation { area: a, species_count: 2.0 * a.powf(0.3) })
///     .collect();
/// let fit = fit_power_law(&points);
/// assert_eq!((fit.c, fit.z, fit.r_squared), (2.0, 0.3, 1.0));
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn fit_power_law(points: &[AreaObservation]) -> PowerLawFit {
    let mut valid: Vec<(f64, f64)> = points
        .iter()
        .filter(|p| p.is_fittable())
        .map(|p| (p.area, p.species_count))
        .collect();
    if valid.len() < 2 {
        return PowerLawFit::DEGENERATE;
    }
    // Fixed summation order keeps permuted inputs bit-identical.
    valid.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));

    let logs: Vec<(f64, f64)> = valid.iter().map(|&(a, s)| (a.ln(), s.ln())).collect();
    let m = logs.len() as f64;
    let x_mean = logs.iter().map(|&(x, _)| x).sum::<f64>() / m;
    let y_mean = logs.iter().map(|&(_, y)| y).sum::<f64>() / m;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for &(x, y) in &logs {
        let dx = x - x_mean;
        sxx += dx * dx;
        sxy += dx * (y - y_mean);
    }

    let (z, intercept) = if sxx == 0.0 {
        (0.0, y_mean)
    } else {
        let z = sxy / sxx;
        (z, z.mul_add(-x_mean, y_mean))
    };

    let mut ss_tot = 0.0;
    let mut ss_res = 0.0;
    for &(x, y) in &logs {
        let resid = y - z.mul_add(x, intercept);
        let dev = y - y_mean;
        ss_tot += dev * dev;
        ss_res += resid * resid;
    }
    let r_squared = if ss_tot == 0.0 {
        0.0
    } else {
        1.0 - ss_res / ss_tot
    };

    let c = intercept.exp();
    if !(c.is_finite() && z.is_finite() && r_squared.is_finite()) {
        return PowerLawFit::DEGENERATE;
    }
    PowerLawFit {
        c: round_to(c, FIT_DECIMALS),
        z: round_to(z, FIT_DECIMALS),
        r_squared: round_to(r_squared, FIT_DECIMALS),
    }
}

/// One subplot of a nested layout with the individuals recorded in it.
#[derive(Debug, Clone, PartialEq)]
pub struct Subplot<K> {
    /// Area added by this subplot (m²).
    pub area: f64,
    /// Individuals recorded in this subplot only.
    pub observations: Vec<Observation<K>>,
}

/// Species-accumulation points for a nested layout.
///
/// Subplots are taken in nesting order: point `i` has the cumulative
/// area of subplots `0..=i` and the number of distinct species seen in
/// them.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] if a subplot area is negative or not
/// finite.
pub fn nested_area_points<K: Eq + Hash>(subplots: &[Subplot<K>]) -> Result<Vec<AreaObservation>> {
    let mut seen: HashSet<&K> = HashSet::new();
    let mut area = 0.0;
    let mut points = Vec::with_capacity(subplots.len());
    for (i, sub) in subplots.iter().enumerate() {
        if !sub.area.is_finite() || sub.area < 0.0 {
            return Err(Error::InvalidInput(format!(
                "subplot {i}: area must be a finite non-negative number, got {}",
                sub.area
            )));
        }
        area += sub.area;
        seen.extend(sub.observations.iter().map(|o| &o.species));
        points.push(AreaObservation::from_count(area, seen.len()));
    }
    Ok(points)
}

/// Build the nested-area points for a layout and fit them.
///
/// # Errors
///
/// Propagates [`nested_area_points`] errors.
pub fn fit_plot_species_area<K: Eq + Hash>(subplots: &[Subplot<K>]) -> Result<PowerLawFit> {
    Ok(fit_power_law(&nested_area_points(subplots)?))
}
