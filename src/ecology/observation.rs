// SPDX-License-Identifier: AGPL-3.0-or-later
//! Recorded individuals and their per-plot abundance table.
//!
//! An [`Observation`] is one individual plant measured in a plot. Its
//! species identifier is opaque: any `Eq + Hash` value (numeric key,
//! code string, UUID) works, and it is never checked against a species
//! registry. The measurement fields are carried for callers and exports;
//! the diversity and species-area math reads only the identifier.

use std::collections::HashMap;
use std::hash::Hash;

/// Optional continuous measurements taken on one individual.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Measurements {
    /// Stem girth (cm).
    pub girth: Option<f64>,
    /// Stem diameter (cm).
    pub diameter: Option<f64>,
    /// Total height (m).
    pub height: Option<f64>,
    /// Height of the first branch (m).
    pub branch_height: Option<f64>,
    /// Canopy cover (%).
    pub canopy_cover: Option<f64>,
}

/// One recorded individual.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation<K> {
    /// Opaque species identifier.
    pub species: K,
    /// Field measurements, unused by the index math.
    pub measurements: Measurements,
}

impl<K> Observation<K> {
    /// Observation with no measurements.
    #[must_use]
    pub fn new(species: K) -> Self {
        Self {
            species,
            measurements: Measurements::default(),
        }
    }

    /// Observation with field measurements.
    #[must_use]
    pub const fn with_measurements(species: K, measurements: Measurements) -> Self {
        Self {
            species,
            measurements,
        }
    }
}

/// Species → individual count for one sampling unit.
///
/// Built fresh for every computation and dropped afterwards; it borrows
/// the identifiers from the caller's observation list.
#[derive(Debug, Clone)]
pub struct AbundanceTable<'a, K> {
    counts: HashMap<&'a K, usize>,
    total: usize,
}

impl<'a, K: Eq + Hash> AbundanceTable<'a, K> {
    /// Group `observations` by species identifier.
    #[must_use]
    pub fn from_observations(observations: &'a [Observation<K>]) -> Self {
        let mut counts: HashMap<&'a K, usize> = HashMap::new();
        for obs in observations {
            *counts.entry(&obs.species).or_insert(0) += 1;
        }
        Self {
            counts,
            total: observations.len(),
        }
    }

    /// Number of distinct species (S).
    #[must_use]
    pub fn richness(&self) -> usize {
        self.counts.len()
    }

    /// Number of individuals (N).
    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Per-species counts in ascending order.
    ///
    /// Index sums run over this order, never over hash order, so repeated
    /// calls are bit-identical.
    #[must_use]
    pub fn sorted_counts(&self) -> Vec<usize> {
        let mut counts: Vec<usize> = self.counts.values().copied().collect();
        counts.sort_unstable();
        counts
    }
}
