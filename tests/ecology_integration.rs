// SPDX-License-Identifier: AGPL-3.0-or-later
//! Integration tests for the ecology modules: diversity indices over
//! varied plots, species-area fits, nested layouts, and project
//! summaries through the data-access trait.

use std::collections::HashMap;
use vegplot::ecology::diversity::{compute_indices, DiversityIndices};
use vegplot::ecology::observation::{Measurements, Observation};
use vegplot::ecology::project::{mean_indices, project_indices};
use vegplot::ecology::species_area::{
    fit_plot_species_area, fit_power_law, AreaObservation, PowerLawFit, Subplot,
};
use vegplot::store::{MemoryStore, ObservationSource};
use vegplot::tolerances;

fn plot_from_counts(counts: &[usize]) -> Vec<Observation<usize>> {
    counts
        .iter()
        .enumerate()
        .flat_map(|(sp, &c)| std::iter::repeat_n(sp, c))
        .map(Observation::new)
        .collect()
}

// ── Diversity totality ──────────────────────────────────────────

#[test]
fn indices_finite_for_every_small_community() {
    // Every abundance vector with up to 4 species of 0..=4 individuals.
    for a in 0..=4 {
        for b in 0..=4 {
            for c in 0..=4 {
                for d in 0..=4 {
                    let idx = compute_indices(&plot_from_counts(&[a, b, c, d]));
                    for (name, v) in DiversityIndices::FIELD_NAMES.iter().zip(idx.to_array()) {
                        assert!(v.is_finite(), "{name} = {v} for {:?}", [a, b, c, d]);
                        assert!(v >= 0.0, "{name} = {v} negative for {:?}", [a, b, c, d]);
                    }
                }
            }
        }
    }
}

#[test]
fn empty_plot_is_all_zero() {
    let empty: Vec<Observation<String>> = Vec::new();
    let idx = compute_indices(&empty);
    assert_eq!(idx.to_array(), [0.0; 7]);
}

#[test]
fn single_individual_matches_guards() {
    let idx = compute_indices(&[Observation::new("Acer campestre")]);
    assert_eq!(idx.to_array(), [1.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0]);
}

#[test]
fn two_species_two_each() {
    let idx = compute_indices(&plot_from_counts(&[2, 2]));
    assert!((idx.shannon_wiener - 0.6931).abs() < 1e-4);
    assert!((idx.simpson_index - 0.5).abs() < tolerances::ANALYTICAL_F64);
    assert!((idx.simpson_reciprocal - 0.5).abs() < tolerances::ANALYTICAL_F64);
    assert!((idx.pielou_evenness - 1.0).abs() < tolerances::ANALYTICAL_F64);
    assert!((idx.menhinick_index - 1.0).abs() < tolerances::ANALYTICAL_F64);
    assert!((idx.margalef_index - 0.7213).abs() < 1e-4);
}

#[test]
fn evenness_monotonic_for_three_species() {
    // N = 30 moved step by step from [28, 1, 1] to [10, 10, 10].
    let steps = [
        [28, 1, 1],
        [24, 3, 3],
        [20, 5, 5],
        [16, 7, 7],
        [12, 9, 9],
        [10, 10, 10],
    ];
    let indices: Vec<DiversityIndices> = steps.iter().map(|c| compute_indices(&plot_from_counts(c))).collect();
    for w in indices.windows(2) {
        assert!(w[1].shannon_wiener > w[0].shannon_wiener);
        assert!(w[1].simpson_reciprocal > w[0].simpson_reciprocal);
    }
    assert!((indices[5].pielou_evenness - 1.0).abs() < tolerances::ANALYTICAL_F64);
}

#[test]
fn measurements_do_not_affect_indices() {
    let bare: Vec<Observation<u32>> = [1, 1, 2, 3].into_iter().map(Observation::new).collect();
    let measured: Vec<Observation<u32>> = bare
        .iter()
        .enumerate()
        .map(|(i, o)| {
            Observation::with_measurements(
                o.species,
                Measurements {
                    girth: Some(10.0 * (i as f64 + 1.0)),
                    height: Some(2.5),
                    canopy_cover: Some(40.0),
                    ..Measurements::default()
                },
            )
        })
        .collect();
    assert_eq!(compute_indices(&bare), compute_indices(&measured));
}

// ── Species-area ────────────────────────────────────────────────

#[test]
fn power_law_recovery_spec_example() {
    let points: Vec<AreaObservation> = [1.0, 2.0, 4.0, 8.0]
        .into_iter()
        .map(|a: f64| AreaObservation {
            area: a,
            species_count: 2.0 * a.powf(0.3),
        })
        .collect();
    let fit = fit_power_law(&points);
    assert!((fit.c - 2.0).abs() < tolerances::POWER_LAW_RECOVERY);
    assert!((fit.z - 0.3).abs() < tolerances::POWER_LAW_RECOVERY);
    assert!((fit.r_squared - 1.0).abs() < tolerances::POWER_LAW_RECOVERY);
}

#[test]
fn too_few_valid_points_gives_zero_fit() {
    let points = [
        AreaObservation::from_count(-4.0, 6),
        AreaObservation::from_count(4.0, 6),
    ];
    let fit = fit_power_law(&points);
    assert_eq!(
        (fit.c, fit.z, fit.r_squared),
        (0.0, 0.0, 0.0),
        "zero sentinel expected"
    );
    assert_eq!(fit, PowerLawFit::DEGENERATE);
}

#[test]
fn fit_is_permutation_invariant() {
    let points = vec![
        AreaObservation::from_count(0.5, 2),
        AreaObservation::from_count(1.0, 4),
        AreaObservation::from_count(5.0, 7),
        AreaObservation::from_count(10.0, 8),
        AreaObservation::from_count(50.0, 14),
        AreaObservation::from_count(100.0, 15),
    ];
    let reference = fit_power_law(&points);
    for shift in 1..points.len() {
        let mut rotated = points.clone();
        rotated.rotate_left(shift);
        let fit = fit_power_law(&rotated);
        assert_eq!(fit.c.to_bits(), reference.c.to_bits());
        assert_eq!(fit.z.to_bits(), reference.z.to_bits());
        assert_eq!(fit.r_squared.to_bits(), reference.r_squared.to_bits());
    }
}

#[test]
fn nested_layout_fit_has_positive_exponent() {
    let layout: Vec<Subplot<&str>> = vec![
        Subplot {
            area: 1.0,
            observations: vec![Observation::new("a"), Observation::new("b")],
        },
        Subplot {
            area: 3.0,
            observations: vec![Observation::new("a"), Observation::new("c")],
        },
        Subplot {
            area: 12.0,
            observations: ["d", "e", "b", "f"].into_iter().map(Observation::new).collect(),
        },
    ];
    let fit = fit_plot_species_area(&layout).unwrap();
    assert!(fit.z > 0.0 && fit.z < 1.0);
    assert!(fit.c > 0.0);
}

// ── Project summaries ───────────────────────────────────────────

/// Source that counts lookups, standing in for a database-backed store.
struct CountingSource {
    plots: HashMap<String, Vec<Observation<u16>>>,
    lookups: std::cell::Cell<usize>,
}

impl ObservationSource<u16> for CountingSource {
    fn plot_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.plots.keys().cloned().collect();
        ids.sort();
        ids
    }

    fn list_observations_for_plot(&self, plot_id: &str) -> vegplot::Result<Vec<Observation<u16>>> {
        self.lookups.set(self.lookups.get() + 1);
        self.plots
            .get(plot_id)
            .cloned()
            .ok_or_else(|| vegplot::Error::UnknownPlot(plot_id.to_string()))
    }
}

#[test]
fn project_summary_through_custom_source() {
    let mut plots = HashMap::new();
    plots.insert("north".to_string(), [1, 2, 3, 4].into_iter().map(Observation::new).collect());
    plots.insert("south".to_string(), [1, 1, 1, 1].into_iter().map(Observation::new).collect());
    plots.insert("east".to_string(), Vec::new());
    let source = CountingSource {
        plots,
        lookups: std::cell::Cell::new(0),
    };

    let summary = project_indices(&source).unwrap();
    assert_eq!(source.lookups.get(), 3);
    let ids: Vec<&str> = summary.plots.iter().map(|p| p.plot_id.as_str()).collect();
    assert_eq!(ids, vec!["east", "north", "south"]);

    // Richness 0, 4, 1 → mean 5/3.
    assert!((summary.mean.species_richness - 5.0 / 3.0).abs() < tolerances::ANALYTICAL_F64);
    let per_plot: Vec<DiversityIndices> = summary.plots.iter().map(|p| p.indices).collect();
    assert_eq!(mean_indices(&per_plot), summary.mean);
}

#[test]
fn memory_store_project_matches_direct_computation() {
    let mut store = MemoryStore::new();
    let plot: Vec<Observation<usize>> = plot_from_counts(&[5, 3, 1]);
    store.insert("only", plot.clone());
    let summary = project_indices(&store).unwrap();
    assert_eq!(summary.mean, compute_indices(&plot));
}

#[test]
fn result_types_are_thread_safe() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<DiversityIndices>();
    assert_send_sync::<PowerLawFit>();
    assert_send_sync::<AreaObservation>();
    assert_send_sync::<MemoryStore<String>>();
}

#[test]
fn concurrent_calls_agree() {
    let plot = plot_from_counts(&[9, 4, 4, 2, 1]);
    let expected = compute_indices(&plot);
    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4).map(|_| s.spawn(|| compute_indices(&plot))).collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), expected);
        }
    });
}
