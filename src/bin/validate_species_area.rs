// SPDX-License-Identifier: AGPL-3.0-or-later
//! Validate the species-area power-law fit.
//!
//! # Methodology
//!
//! - **Recovery**: exact S = c·Aᶻ data for several (c, z) pairs, and the
//!   fitted curve's prediction at the largest sampled area
//! - **Degenerate input**: too few usable points, equal areas, equal counts
//! - **Permutation**: shuffled input compared bit for bit
//! - **Nested layout**: species accumulation over a 1-2-4-8-16 m² design

use vegplot::ecology::observation::Observation;
use vegplot::ecology::species_area::{
    fit_plot_species_area, fit_power_law, nested_area_points, AreaObservation, PowerLawFit,
    Subplot,
};
use vegplot::tolerances;
use vegplot::validation::Validator;

fn main() {
    let mut v = Validator::new("vegplot Species-Area Validation");

    validate_recovery(&mut v);
    validate_degenerate(&mut v);
    validate_permutation(&mut v);
    validate_nested_layout(&mut v);

    v.finish();
}

fn exact_points(c: f64, z: f64, areas: &[f64]) -> Vec<AreaObservation> {
    areas
        .iter()
        .map(|&area| AreaObservation {
            area,
            species_count: c * area.powf(z),
        })
        .collect()
}

fn validate_recovery(v: &mut Validator) {
    v.section("── Recovery of exact power laws ──");

    let areas = [1.0, 2.0, 4.0, 8.0, 16.0, 32.0];
    for (c, z) in [(2.0, 0.3), (5.0, 0.15), (0.8, 0.45), (31.6, 0.22)] {
        let fit = fit_power_law(&exact_points(c, z, &areas));
        v.check(&format!("c={c}, z={z}: c"), fit.c, c, tolerances::POWER_LAW_RECOVERY);
        v.check(&format!("c={c}, z={z}: z"), fit.z, z, tolerances::POWER_LAW_RECOVERY);
        v.check(
            &format!("c={c}, z={z}: R²"),
            fit.r_squared,
            1.0,
            tolerances::POWER_LAW_RECOVERY,
        );
        // Relative error of the rounded curve at 32 m².
        let expected = c * 32f64.powf(z);
        v.check(
            &format!("c={c}, z={z}: S(32) / expected"),
            fit.predict(32.0) / expected,
            1.0,
            tolerances::POWER_LAW_RECOVERY,
        );
    }
}

fn validate_degenerate(v: &mut Validator) {
    v.section("── Degenerate input ──");

    let cases: [(&str, Vec<AreaObservation>); 3] = [
        ("no points", Vec::new()),
        ("one point", vec![AreaObservation::from_count(10.0, 4)]),
        (
            "one usable point",
            vec![
                AreaObservation::from_count(0.0, 4),
                AreaObservation::from_count(5.0, 0),
                AreaObservation::from_count(10.0, 4),
            ],
        ),
    ];
    for (label, points) in &cases {
        let fit = fit_power_law(points);
        v.check_true(&format!("{label}: zero fit"), fit == PowerLawFit::DEGENERATE);
    }

    let equal_areas = fit_power_law(&[
        AreaObservation::from_count(4.0, 3),
        AreaObservation::from_count(4.0, 12),
    ]);
    v.check("equal areas: z", equal_areas.z, 0.0, tolerances::EXACT);
    v.check("equal areas: c = geometric mean", equal_areas.c, 6.0, tolerances::FIT_ROUNDING);

    let equal_counts = fit_power_law(&[
        AreaObservation::from_count(1.0, 7),
        AreaObservation::from_count(50.0, 7),
    ]);
    v.check("equal counts: R²", equal_counts.r_squared, 0.0, tolerances::EXACT);

    let overflow = fit_power_law(&[
        AreaObservation::from_count(100.0, 100),
        AreaObservation::from_count(103.0, 1),
    ]);
    v.check_true("overflowing c: zero fit", overflow == PowerLawFit::DEGENERATE);
}

fn validate_permutation(v: &mut Validator) {
    v.section("── Input order ──");

    let points = vec![
        AreaObservation::from_count(1.0, 4),
        AreaObservation::from_count(2.0, 5),
        AreaObservation::from_count(4.0, 9),
        AreaObservation::from_count(8.0, 10),
        AreaObservation::from_count(16.0, 15),
        AreaObservation::from_count(32.0, 17),
    ];
    let reference = fit_power_law(&points);
    let mut shuffled = points;
    shuffled.rotate_left(2);
    shuffled.swap(0, 5);
    let permuted = fit_power_law(&shuffled);

    v.check_bits("permuted: c", permuted.c, reference.c);
    v.check_bits("permuted: z", permuted.z, reference.z);
    v.check_bits("permuted: R²", permuted.r_squared, reference.r_squared);
}

fn subplot(area: f64, species: &[u32]) -> Subplot<u32> {
    Subplot {
        area,
        observations: species.iter().copied().map(Observation::new).collect(),
    }
}

fn validate_nested_layout(v: &mut Validator) {
    v.section("── Nested 1-2-4-8-16 m² layout ──");

    let layout = [
        subplot(1.0, &[1, 2, 2]),
        subplot(1.0, &[1, 3]),
        subplot(2.0, &[2, 4, 5]),
        subplot(4.0, &[6, 1, 7]),
        subplot(8.0, &[8, 9, 3]),
    ];
    let points = match nested_area_points(&layout) {
        Ok(p) => p,
        Err(e) => {
            v.check_true(&format!("layout accepted ({e})"), false);
            return;
        }
    };
    v.check_count("points", points.len(), 5);
    v.check("cumulative area", points[4].area, 16.0, tolerances::EXACT);
    v.check("cumulative species", points[4].species_count, 9.0, tolerances::EXACT);

    match fit_plot_species_area(&layout) {
        Ok(fit) => {
            v.check_true("z within (0, 1)", fit.z > 0.0 && fit.z < 1.0);
            v.check_true("R² within [0, 1]", (0.0..=1.0).contains(&fit.r_squared));
            let predicted = fit.predict(16.0);
            println!("  predicted species at 16 m²: {predicted:.2} (observed 9)");
            v.check("S(16) near observed", predicted, 9.0, 2.0);
        }
        Err(e) => v.check_true(&format!("fit accepted ({e})"), false),
    }
}
