// SPDX-License-Identifier: AGPL-3.0-or-later
//! Small numeric helpers shared by the fitter and the exporters.

/// Round `value` to `decimals` decimal places (half away from zero).
///
/// Non-finite input is returned unchanged.
///
/// ```
/// use vegplot::numeric::round_to;
///
/// assert_eq!(round_to(0.693_147, 3), 0.693);
/// assert_eq!(round_to(0.721_348, 4), 0.7213);
/// ```
#[must_use]
#[allow(clippy::cast_possible_wrap)]
pub fn round_to(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}

/// Arithmetic mean, 0.0 for an empty slice.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn round_to_places() {
        assert_eq!(round_to(2.000_04, 4), 2.0);
        assert_eq!(round_to(0.299_96, 4), 0.3);
        assert_eq!(round_to(-1.234_56, 2), -1.23);
        assert_eq!(round_to(5.0, 0), 5.0);
    }

    #[test]
    fn round_to_passes_non_finite_through() {
        assert!(round_to(f64::NAN, 3).is_nan());
        assert_eq!(round_to(f64::INFINITY, 3), f64::INFINITY);
    }

    #[test]
    fn mean_of_empty_is_zero() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[1.0, 2.0, 3.0]), 2.0);
    }
}
