// SPDX-License-Identifier: AGPL-3.0-or-later
//! Check-and-report framework for the validation binaries.
//!
//! `validate_diversity` and `validate_species_area` compare computed
//! indices and fits against closed-form values and published field
//! figures. Each check prints one `[OK]` / `[FAIL]` line with the actual
//! value, the expected value and the tolerance applied.
//!
//! Exit codes: 0 = all passed, 1 = at least one failed, 2 = skipped
//! (input data not available).

// ── Standalone helpers ─────────────────────────────────────────

/// Compare `actual` against `expected` within absolute `tolerance`.
///
/// Prints a formatted line and returns whether the check passed.
/// A tolerance of `0.0` requires an exact match.
///
/// ```
/// use vegplot::validation::check;
///
/// assert!(check("Shannon(even, S=2)", 2.0_f64.ln(), 2.0_f64.ln(), 1e-12));
/// assert!(!check("deliberate fail", 2.0, 1.0, 0.5));
/// ```
#[must_use]
pub fn check(label: &str, actual: f64, expected: f64, tolerance: f64) -> bool {
    let pass = actual.is_finite() && (actual - expected).abs() <= tolerance;
    let tag = if pass { "OK" } else { "FAIL" };
    println!("  [{tag}]  {label}: {actual:.6} (expected {expected:.6}, tol {tolerance:.6})");
    pass
}

/// Compare an exact count.
///
/// ```
/// use vegplot::validation::check_count;
///
/// assert!(check_count("plots loaded", 12, 12));
/// assert!(!check_count("mismatched", 10, 20));
/// ```
#[must_use]
pub fn check_count(label: &str, actual: usize, expected: usize) -> bool {
    let pass = actual == expected;
    let tag = if pass { "OK" } else { "FAIL" };
    println!("  [{tag}]  {label}: {actual} (expected {expected})");
    pass
}

/// Print the summary banner and return whether all checks passed.
#[must_use]
pub fn print_result(name: &str, passed: u32, total: u32) -> bool {
    println!("\n═══════════════════════════════════════════════════════════");
    println!("  {name}: {passed}/{total} checks passed");
    if passed == total {
        println!("  RESULT: PASS");
    } else {
        println!("  RESULT: FAIL ({} checks failed)", total - passed);
    }
    println!("═══════════════════════════════════════════════════════════");
    passed == total
}

/// Exit with code 2: the validation was skipped because data is missing.
pub fn exit_skipped(reason: &str) -> ! {
    println!("  SKIP: {reason}");
    println!("  (exit 2 = skipped, not a failure)");
    std::process::exit(2)
}

/// Resolve a data directory from `env_var`, falling back to
/// `CARGO_MANIFEST_DIR/{default_subpath}`.
///
/// ```text
/// let dir = data_dir("VEGPLOT_FIELD_DIR", "data/field");
/// ```
#[must_use]
pub fn data_dir(env_var: &str, default_subpath: &str) -> std::path::PathBuf {
    std::env::var(env_var).map_or_else(
        |_| std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join(default_subpath),
        std::path::PathBuf::from,
    )
}

// ── Validator ──────────────────────────────────────────────────

/// Pass/fail accumulator for one validation binary.
///
/// ```
/// use vegplot::validation::Validator;
///
/// let mut v = Validator::new("doc-test");
/// v.check("ln 2", std::f64::consts::LN_2, 0.6931, 1e-4);
/// v.check_count("species", 2, 2);
/// v.check_bits("rerun", 0.5, 0.5);
/// assert_eq!(v.counts(), (3, 3));
/// ```
pub struct Validator {
    name: String,
    passed: u32,
    total: u32,
}

impl Validator {
    /// Create a validator and print its banner.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        println!("═══════════════════════════════════════════════════════════");
        println!("  {name}");
        println!("═══════════════════════════════════════════════════════════\n");
        Self {
            name,
            passed: 0,
            total: 0,
        }
    }

    /// Print a section header (no check counted).
    pub fn section(&self, label: &str) {
        println!("\n{label}");
    }

    /// Check an f64 value against `expected` within `tolerance`.
    pub fn check(&mut self, label: &str, actual: f64, expected: f64, tolerance: f64) {
        self.record(check(label, actual, expected, tolerance));
    }

    /// Check an exact count.
    pub fn check_count(&mut self, label: &str, actual: usize, expected: usize) {
        self.record(check_count(label, actual, expected));
    }

    /// Check that two f64 values are bit-identical (reruns, permutations).
    pub fn check_bits(&mut self, label: &str, actual: f64, expected: f64) {
        let pass = actual.to_bits() == expected.to_bits();
        let tag = if pass { "OK" } else { "FAIL" };
        println!("  [{tag}]  {label}: {actual:e} (expected bits of {expected:e})");
        self.record(pass);
    }

    /// Check a boolean condition.
    pub fn check_true(&mut self, label: &str, condition: bool) {
        let tag = if condition { "OK" } else { "FAIL" };
        println!("  [{tag}]  {label}");
        self.record(condition);
    }

    fn record(&mut self, pass: bool) {
        self.total += 1;
        if pass {
            self.passed += 1;
        }
    }

    /// Current (passed, total).
    #[must_use]
    pub const fn counts(&self) -> (u32, u32) {
        (self.passed, self.total)
    }

    /// Print the summary and exit with 0 (pass) or 1 (fail).
    pub fn finish(self) -> ! {
        let ok = print_result(&self.name, self.passed, self.total);
        std::process::exit(i32::from(!ok))
    }
}
