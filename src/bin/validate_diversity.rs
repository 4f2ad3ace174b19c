// SPDX-License-Identifier: AGPL-3.0-or-later
//! Validate plot diversity indices against closed-form values.
//!
//! # Methodology
//!
//! - **Boundary plots**: empty plot, single individual, single species
//! - **Analytical plots**: even communities where H′ = ln S, D = 1/S, J = 1
//! - **Evenness ordering**: fixed N redistributed toward equal abundance
//! - **Determinism**: repeated and reordered input, compared bit for bit

use vegplot::ecology::diversity::{compute_indices, DiversityIndices};
use vegplot::ecology::observation::Observation;
use vegplot::tolerances;
use vegplot::validation::Validator;

/// `counts[i]` individuals of species `i`.
fn plot_from_counts(counts: &[usize]) -> Vec<Observation<usize>> {
    counts
        .iter()
        .enumerate()
        .flat_map(|(sp, &c)| std::iter::repeat_n(sp, c))
        .map(Observation::new)
        .collect()
}

fn main() {
    let mut v = Validator::new("vegplot Diversity Index Validation");

    validate_boundaries(&mut v);
    validate_analytical(&mut v);
    validate_evenness_ordering(&mut v);
    validate_determinism(&mut v);

    v.finish();
}

fn validate_boundaries(v: &mut Validator) {
    v.section("── Boundary plots ──");

    let empty = compute_indices(&plot_from_counts(&[]));
    for (name, value) in DiversityIndices::FIELD_NAMES.iter().zip(empty.to_array()) {
        v.check(&format!("empty plot: {name}"), value, 0.0, tolerances::EXACT);
    }

    let single = compute_indices(&plot_from_counts(&[1]));
    let expected = [1.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0];
    for ((name, value), want) in DiversityIndices::FIELD_NAMES
        .iter()
        .zip(single.to_array())
        .zip(expected)
    {
        v.check(&format!("single individual: {name}"), value, want, tolerances::EXACT);
    }

    let monoculture = compute_indices(&plot_from_counts(&[25]));
    v.check(
        "monoculture (N=25): Pielou guard",
        monoculture.pielou_evenness,
        0.0,
        tolerances::EXACT,
    );
    v.check(
        "monoculture (N=25): Menhinick = 1/5",
        monoculture.menhinick_index,
        0.2,
        tolerances::ANALYTICAL_F64,
    );
}

fn validate_analytical(v: &mut Validator) {
    v.section("── Even communities ──");

    let pair = compute_indices(&plot_from_counts(&[2, 2]));
    v.check("S=2,N=4: richness", pair.species_richness, 2.0, tolerances::EXACT);
    v.check(
        "S=2,N=4: Shannon = ln 2",
        pair.shannon_wiener,
        std::f64::consts::LN_2,
        tolerances::ANALYTICAL_F64,
    );
    v.check("S=2,N=4: Simpson = 0.5", pair.simpson_index, 0.5, tolerances::ANALYTICAL_F64);
    v.check(
        "S=2,N=4: 1 - D = 0.5",
        pair.simpson_reciprocal,
        0.5,
        tolerances::ANALYTICAL_F64,
    );
    v.check("S=2,N=4: Pielou = 1", pair.pielou_evenness, 1.0, tolerances::ANALYTICAL_F64);
    v.check("S=2,N=4: Menhinick = 1", pair.menhinick_index, 1.0, tolerances::ANALYTICAL_F64);
    v.check(
        "S=2,N=4: Margalef = 1/ln 4",
        pair.margalef_index,
        1.0 / 4.0_f64.ln(),
        tolerances::ANALYTICAL_F64,
    );

    let even_20 = compute_indices(&plot_from_counts(&[5; 20]));
    v.check(
        "S=20,N=100: Shannon = ln 20",
        even_20.shannon_wiener,
        20.0_f64.ln(),
        tolerances::ANALYTICAL_F64,
    );
    v.check(
        "S=20,N=100: Simpson = 1/20",
        even_20.simpson_index,
        0.05,
        tolerances::ANALYTICAL_F64,
    );
    v.check(
        "S=20,N=100: Menhinick = 2",
        even_20.menhinick_index,
        2.0,
        tolerances::ANALYTICAL_F64,
    );
    v.check(
        "S=20,N=100: Margalef = 19/ln 100",
        even_20.margalef_index,
        19.0 / 100.0_f64.ln(),
        tolerances::ANALYTICAL_F64,
    );
}

fn validate_evenness_ordering(v: &mut Validator) {
    v.section("── Evenness ordering at N = 20 ──");

    let uneven = compute_indices(&plot_from_counts(&[17, 1, 1, 1]));
    let moderate = compute_indices(&plot_from_counts(&[8, 6, 4, 2]));
    let even = compute_indices(&plot_from_counts(&[5, 5, 5, 5]));

    v.check_true(
        "Shannon: uneven < moderate < even",
        uneven.shannon_wiener < moderate.shannon_wiener
            && moderate.shannon_wiener < even.shannon_wiener,
    );
    v.check_true(
        "1 - D: uneven < moderate < even",
        uneven.simpson_reciprocal < moderate.simpson_reciprocal
            && moderate.simpson_reciprocal < even.simpson_reciprocal,
    );
    v.check(
        "even: Pielou = 1",
        even.pielou_evenness,
        1.0,
        tolerances::ANALYTICAL_F64,
    );
}

fn validate_determinism(v: &mut Validator) {
    v.section("── Determinism ──");

    let counts: Vec<usize> = (1..=60).map(|i| i * 7 % 23 + 1).collect();
    let plot = plot_from_counts(&counts);
    let run1 = compute_indices(&plot);
    let run2 = compute_indices(&plot);
    let mut reversed = plot;
    reversed.reverse();
    let run3 = compute_indices(&reversed);

    for ((name, a), (b, c)) in DiversityIndices::FIELD_NAMES
        .iter()
        .zip(run1.to_array())
        .zip(run2.to_array().into_iter().zip(run3.to_array()))
    {
        v.check_bits(&format!("rerun: {name}"), b, a);
        v.check_bits(&format!("reversed input: {name}"), c, a);
    }
}
