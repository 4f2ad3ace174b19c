// SPDX-License-Identifier: AGPL-3.0-or-later
//! Numerical tolerances and display precisions, each with its origin.
//!
//! Every threshold used by tests, validation binaries and the CSV writers
//! is defined here. No ad-hoc magic numbers.
//!
//! | Category | Basis | Example |
//! |----------|-------|---------|
//! | Exact | IEEE 754 f64 | 0.0 for richness counts |
//! | Machine | f64 arithmetic | 1e-12 for closed-form indices |
//! | Rounded | contract rounding | 5e-5 for 4-decimal fit output |
//! | Recovery | log-linear regression | 1e-3 for power-law parameters |

// ═══════════════════════════════════════════════════════════════════
// Machine-precision tolerances (IEEE 754 f64)
// ═══════════════════════════════════════════════════════════════════

/// Quantities that must be exact (species richness, zero sentinels).
pub const EXACT: f64 = 0.0;

/// Closed-form diversity values (Shannon of an even community = ln S).
///
/// f64 carries ~15.9 significant digits; 1e-12 leaves room for the
/// rounding accumulated over a few hundred proportion terms.
pub const ANALYTICAL_F64: f64 = 1e-12;

// ═══════════════════════════════════════════════════════════════════
// Species-area fit tolerances
// ═══════════════════════════════════════════════════════════════════

/// Decimal places kept in a [`crate::ecology::species_area::PowerLawFit`].
pub const FIT_DECIMALS: u32 = 4;

/// Maximum error introduced by rounding to [`FIT_DECIMALS`] places.
pub const FIT_ROUNDING: f64 = 5e-5;

/// Recovery of c and z from exact power-law data.
///
/// Rounding to 4 decimals bounds the error at 5e-5; 1e-3 is the
/// acceptance window field ecologists quote for published z values.
pub const POWER_LAW_RECOVERY: f64 = 1e-3;

// ═══════════════════════════════════════════════════════════════════
// Display precision
// ═══════════════════════════════════════════════════════════════════

/// Decimal places written to exported index tables.
pub const DISPLAY_DECIMALS: u32 = 3;

/// Maximum error introduced by rounding to [`DISPLAY_DECIMALS`] places.
pub const DISPLAY_ROUNDING: f64 = 5e-4;
