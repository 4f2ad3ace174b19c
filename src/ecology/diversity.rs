// SPDX-License-Identifier: AGPL-3.0-or-later
//! Alpha diversity and evenness indices for one vegetation plot.
//!
//! Implements species richness, Shannon-Wiener H′, Simpson D, the
//! Gini-Simpson complement 1 − D, Pielou J, Menhinick and Margalef
//! from a flat list of recorded individuals.
//!
//! Every function here is total: empty plots, single individuals and
//! single-species plots produce the documented 0.0 sentinels, never NaN,
//! infinities or panics. Natural log throughout; no rounding.

use super::observation::{AbundanceTable, Observation};
use std::hash::Hash;

/// The seven indices reported for a plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiversityIndices {
    /// Distinct species (S).
    pub species_richness: f64,
    /// Shannon-Wiener H′ = −Σ pᵢ ln pᵢ.
    pub shannon_wiener: f64,
    /// Simpson D = Σ pᵢ².
    pub simpson_index: f64,
    /// 1 − D (Gini-Simpson).
    ///
    /// Named "reciprocal" for compatibility with existing exports and
    /// charts; the value is the complement, not 1/D.
    pub simpson_reciprocal: f64,
    /// Pielou J = H′ / ln S.
    pub pielou_evenness: f64,
    /// Menhinick S / √N.
    pub menhinick_index: f64,
    /// Margalef (S − 1) / ln N.
    pub margalef_index: f64,
}

impl DiversityIndices {
    /// All-zero indices, as reported for an empty plot.
    pub const ZERO: Self = Self {
        species_richness: 0.0,
        shannon_wiener: 0.0,
        simpson_index: 0.0,
        simpson_reciprocal: 0.0,
        pielou_evenness: 0.0,
        menhinick_index: 0.0,
        margalef_index: 0.0,
    };

    /// Fields in export order.
    #[must_use]
    pub const fn to_array(&self) -> [f64; 7] {
        [
            self.species_richness,
            self.shannon_wiener,
            self.simpson_index,
            self.simpson_reciprocal,
            self.pielou_evenness,
            self.menhinick_index,
            self.margalef_index,
        ]
    }

    /// Inverse of [`Self::to_array`].
    #[must_use]
    pub const fn from_array(values: [f64; 7]) -> Self {
        Self {
            species_richness: values[0],
            shannon_wiener: values[1],
            simpson_index: values[2],
            simpson_reciprocal: values[3],
            pielou_evenness: values[4],
            menhinick_index: values[5],
            margalef_index: values[6],
        }
    }

    /// Column names matching [`Self::to_array`].
    pub const FIELD_NAMES: [&'static str; 7] = [
        "species_richness",
        "shannon_wiener",
        "simpson_index",
        "simpson_reciprocal",
        "pielou_evenness",
        "menhinick_index",
        "margalef_index",
    ];
}

/// Compute all seven indices for one plot.
///
/// ```
/// use vegplot::ecology::diversity::compute_indices;
/// use vegplot::ecology::observation::Observation;
///
/// let plot: Vec<Observation<u32>> = [1, 1, 2, 2].into_iter().map(Observation::new).collect();
/// let idx = compute_indices(&plot);
/// assert_eq!(idx.species_richness, 2.0);
/// assert!((idx.pielou_evenness - 1.0).abs() < 1e-12);
///
/// let empty: Vec<Observation<u32>> = Vec::new();
/// assert_eq!(compute_indices(&empty).shannon_wiener, 0.0);
/// ```
#[must_use]
pub fn compute_indices<K: Eq + Hash>(observations: &[Observation<K>]) -> DiversityIndices {
    indices_from_table(&AbundanceTable::from_observations(observations))
}

/// Compute all seven indices from an already grouped table.
#[must_use]
pub fn indices_from_table<K: Eq + Hash>(table: &AbundanceTable<'_, K>) -> DiversityIndices {
    let shannon_wiener = shannon_wiener(table);
    let simpson_index = simpson_index(table);
    DiversityIndices {
        species_richness: species_richness(table),
        shannon_wiener,
        simpson_index,
        simpson_reciprocal: gini_simpson(simpson_index),
        pielou_evenness: pielou_evenness(table, shannon_wiener),
        menhinick_index: menhinick_index(table),
        margalef_index: margalef_index(table),
    }
}

/// Species richness S.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn species_richness<K: Eq + Hash>(table: &AbundanceTable<'_, K>) -> f64 {
    table.richness() as f64
}

/// Shannon-Wiener H′ = −Σ pᵢ ln pᵢ; 0.0 for an empty plot.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn shannon_wiener<K: Eq + Hash>(table: &AbundanceTable<'_, K>) -> f64 {
    if table.total() == 0 {
        return 0.0;
    }
    let n = table.total() as f64;
    let mut h = 0.0;
    for c in table.sorted_counts() {
        let p = c as f64 / n;
        h -= p * p.ln();
    }
    h
}

/// Simpson D = Σ pᵢ²; 0.0 for an empty plot.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn simpson_index<K: Eq + Hash>(table: &AbundanceTable<'_, K>) -> f64 {
    if table.total() == 0 {
        return 0.0;
    }
    let n = table.total() as f64;
    table
        .sorted_counts()
        .into_iter()
        .map(|c| {
            let p = c as f64 / n;
            p * p
        })
        .sum()
}

/// Gini-Simpson 1 − D, or 0.0 when D is not positive.
#[must_use]
pub fn gini_simpson(simpson_index: f64) -> f64 {
    if simpson_index > 0.0 {
        1.0 - simpson_index
    } else {
        0.0
    }
}

/// Pielou J = H′ / ln S; 0.0 when S ≤ 1.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn pielou_evenness<K: Eq + Hash>(table: &AbundanceTable<'_, K>, shannon_wiener: f64) -> f64 {
    let s = table.richness();
    if s <= 1 {
        return 0.0;
    }
    shannon_wiener / (s as f64).ln()
}

/// Menhinick S / √N; 0.0 for an empty plot.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn menhinick_index<K: Eq + Hash>(table: &AbundanceTable<'_, K>) -> f64 {
    if table.total() == 0 {
        return 0.0;
    }
    table.richness() as f64 / (table.total() as f64).sqrt()
}

/// Margalef (S − 1) / ln N; 0.0 when N ≤ 1.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn margalef_index<K: Eq + Hash>(table: &AbundanceTable<'_, K>) -> f64 {
    let n = table.total();
    if n <= 1 {
        return 0.0;
    }
    (table.richness() as f64 - 1.0) / (n as f64).ln()
}
