// SPDX-License-Identifier: AGPL-3.0-or-later
//! Data-access seam between plot storage and the analysis code.
//!
//! Analyses take any [`ObservationSource`]; they never know how plots
//! are stored or identified beyond a string id. [`MemoryStore`] is the
//! in-process implementation, filled directly or by
//! [`crate::io::plot_csv::read_observations`].

use crate::ecology::observation::Observation;
use crate::error::{Error, Result};
use std::collections::BTreeMap;

/// Read access to the observations recorded per plot.
pub trait ObservationSource<K> {
    /// All plot ids, in a stable order.
    fn plot_ids(&self) -> Vec<String>;

    /// Observations recorded in `plot_id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownPlot`] if the source holds no such plot.
    fn list_observations_for_plot(&self, plot_id: &str) -> Result<Vec<Observation<K>>>;
}

/// Plots held in memory, keyed and ordered by plot id.
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryStore<K> {
    plots: BTreeMap<String, Vec<Observation<K>>>,
}

impl<K> Default for MemoryStore<K> {
    fn default() -> Self {
        Self {
            plots: BTreeMap::new(),
        }
    }
}

impl<K> MemoryStore<K> {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the observations of `plot_id`.
    pub fn insert(&mut self, plot_id: impl Into<String>, observations: Vec<Observation<K>>) {
        self.plots.insert(plot_id.into(), observations);
    }

    /// Append one observation, creating the plot if needed.
    pub fn push(&mut self, plot_id: &str, observation: Observation<K>) {
        if let Some(list) = self.plots.get_mut(plot_id) {
            list.push(observation);
        } else {
            self.plots.insert(plot_id.to_string(), vec![observation]);
        }
    }

    /// Borrow the observations of `plot_id`.
    #[must_use]
    pub fn get(&self, plot_id: &str) -> Option<&[Observation<K>]> {
        self.plots.get(plot_id).map(Vec::as_slice)
    }

    /// Number of plots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.plots.len()
    }

    /// Whether the store holds no plots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.plots.is_empty()
    }

    /// Total observations across all plots.
    #[must_use]
    pub fn total_observations(&self) -> usize {
        self.plots.values().map(Vec::len).sum()
    }
}

impl<K: Clone> ObservationSource<K> for MemoryStore<K> {
    fn plot_ids(&self) -> Vec<String> {
        self.plots.keys().cloned().collect()
    }

    fn list_observations_for_plot(&self, plot_id: &str) -> Result<Vec<Observation<K>>> {
        self.get(plot_id)
            .map(<[Observation<K>]>::to_vec)
            .ok_or_else(|| Error::UnknownPlot(plot_id.to_string()))
    }
}
