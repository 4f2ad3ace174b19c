// SPDX-License-Identifier: AGPL-3.0-or-later
//! Load a field plot CSV, compute per-plot and project indices, and export
//! the index table.
//!
//! # Data
//!
//! Reads `plots.csv` (or `plots.csv.gz`) from `$VEGPLOT_FIELD_DIR`,
//! defaulting to `data/field/` in the crate root. Exits 2 (skipped) when
//! neither file exists. The index table is written to the system temp
//! directory as `vegplot_plot_indices.csv`.

use vegplot::ecology::diversity::DiversityIndices;
use vegplot::ecology::project::project_indices;
use vegplot::io::plot_csv;
use vegplot::validation::{self, Validator};

fn main() {
    let dir = validation::data_dir("VEGPLOT_FIELD_DIR", "data/field");
    let Some(input) = ["plots.csv", "plots.csv.gz"]
        .iter()
        .map(|name| dir.join(name))
        .find(|p| p.exists())
    else {
        validation::exit_skipped(&format!("no plots.csv in {}", dir.display()));
    };

    let mut v = Validator::new("vegplot Field Plot Validation");
    v.section(&format!("── {} ──", input.display()));

    let store = match plot_csv::read_observations(&input) {
        Ok(s) => s,
        Err(e) => {
            v.check_true(&format!("parse ({e})"), false);
            v.finish();
        }
    };
    v.check_true("at least one plot", !store.is_empty());
    println!(
        "  {} plots, {} individuals",
        store.len(),
        store.total_observations()
    );

    let summary = match project_indices(&store) {
        Ok(s) => s,
        Err(e) => {
            v.check_true(&format!("project indices ({e})"), false);
            v.finish();
        }
    };
    v.check_count("plots summarised", summary.plots.len(), store.len());

    v.section("── Per-plot index ranges ──");
    for plot in &summary.plots {
        let idx = &plot.indices;
        v.check_true(
            &format!("{}: all indices finite", plot.plot_id),
            idx.to_array().iter().all(|x| x.is_finite()),
        );
        v.check_true(
            &format!("{}: 0 <= Simpson <= 1", plot.plot_id),
            (0.0..=1.0).contains(&idx.simpson_index),
        );
        v.check_true(
            &format!("{}: 0 <= Pielou <= 1", plot.plot_id),
            (0.0..=1.0 + 1e-12).contains(&idx.pielou_evenness),
        );
    }

    v.section("── Project mean ──");
    for (name, value) in DiversityIndices::FIELD_NAMES
        .iter()
        .zip(summary.mean.to_array())
    {
        println!("  {name}: {value:.3}");
    }

    let out = std::env::temp_dir().join("vegplot_plot_indices.csv");
    match plot_csv::write_indices_file(&out, &summary.plots) {
        Ok(()) => v.check_true(&format!("exported {}", out.display()), true),
        Err(e) => v.check_true(&format!("export ({e})"), false),
    }

    v.finish();
}
