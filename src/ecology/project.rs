// SPDX-License-Identifier: AGPL-3.0-or-later
//! Per-plot and project-level diversity summaries.
//!
//! A project is every plot an [`ObservationSource`] holds. Its aggregate
//! is the field-wise arithmetic mean of the per-plot indices; empty plots
//! contribute their all-zero indices like any other plot.

use super::diversity::{compute_indices, DiversityIndices};
use crate::error::Result;
use crate::numeric::mean;
use crate::store::ObservationSource;
use std::hash::Hash;

/// Indices computed for one plot.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotIndices {
    /// Plot identifier.
    pub plot_id: String,
    /// Diversity indices of the plot.
    pub indices: DiversityIndices,
}

/// Per-plot indices and their project mean.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectSummary {
    /// One entry per plot, in the source's plot-id order.
    pub plots: Vec<PlotIndices>,
    /// Field-wise mean across `plots`.
    pub mean: DiversityIndices,
}

/// Compute the indices of one plot from `source`.
///
/// # Errors
///
/// Propagates the source's lookup error for an unknown plot.
pub fn plot_indices<K, S>(source: &S, plot_id: &str) -> Result<DiversityIndices>
where
    K: Eq + Hash,
    S: ObservationSource<K> + ?Sized,
{
    let observations = source.list_observations_for_plot(plot_id)?;
    Ok(compute_indices(&observations))
}

/// Field-wise mean of `indices`; all zeros for an empty slice.
#[must_use]
pub fn mean_indices(indices: &[DiversityIndices]) -> DiversityIndices {
    let columns: Vec<[f64; 7]> = indices.iter().map(DiversityIndices::to_array).collect();
    let mut out = [0.0; 7];
    for (field, slot) in out.iter_mut().enumerate() {
        let column: Vec<f64> = columns.iter().map(|row| row[field]).collect();
        *slot = mean(&column);
    }
    DiversityIndices::from_array(out)
}

/// Compute every plot in `source` and the project mean.
///
/// # Errors
///
/// Propagates the source's lookup errors.
pub fn project_indices<K, S>(source: &S) -> Result<ProjectSummary>
where
    K: Eq + Hash,
    S: ObservationSource<K> + ?Sized,
{
    let plots = source
        .plot_ids()
        .into_iter()
        .map(|plot_id| -> Result<PlotIndices> {
            let indices = plot_indices(source, &plot_id)?;
            Ok(PlotIndices { plot_id, indices })
        })
        .collect::<Result<Vec<_>>>()?;
    let per_plot: Vec<DiversityIndices> = plots.iter().map(|p| p.indices).collect();
    Ok(ProjectSummary {
        mean: mean_indices(&per_plot),
        plots,
    })
}
