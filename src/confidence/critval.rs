//! Two-sided normal critical values.
use crate::errors::{SvarError, SvarResult};
use statrs::distribution::{ContinuousCDF, Normal};

/// Two-sided standard-normal critical value `z_{1−α/2}` for a confidence
/// level `1 − α`, optionally squared (the χ²(1) quantile).
///
/// Errors
/// ------
/// - `InvalidConfidence` unless `0 < confidence < 1`.
pub fn norm_critval(confidence: f64, squared: bool) -> SvarResult<f64> {
    if !(confidence > 0.0 && confidence < 1.0) {
        return Err(SvarError::InvalidConfidence(confidence));
    }
    let z = Normal::new(0.0, 1.0)
        .expect("standard normal parameters")
        .inverse_cdf(1.0 - (1.0 - confidence) / 2.0);
    Ok(if squared { z * z } else { z })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    // Purpose
    // -------
    // Known quantiles at the usual confidence levels.
    fn matches_tabulated_quantiles() {
        let z95 = norm_critval(0.95, false).expect("valid level");
        let z90 = norm_critval(0.90, false).expect("valid level");
        let chi95 = norm_critval(0.95, true).expect("valid level");
        assert_relative_eq!(z95, 1.959_963_984_540_054, epsilon = 1e-9);
        assert_relative_eq!(z90, 1.644_853_626_951_472, epsilon = 1e-9);
        assert_relative_eq!(chi95, 3.841_458_820_694_124, epsilon = 1e-8);
    }

    #[test]
    fn rejects_levels_outside_unit_interval() {
        for bad in [0.0, 1.0, -0.1, 1.5, f64::NAN] {
            assert!(matches!(norm_critval(bad, true), Err(SvarError::InvalidConfidence(_))));
        }
    }
}
