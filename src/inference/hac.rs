//! inference::hac — long-run (HAC) covariance of stacked moment series.
//!
//! Purpose
//! -------
//! Estimate the long-run covariance of a `T × d` matrix of per-observation
//! moments (rows = time). The estimator has the form
//!
//! ```text
//! Ω  =  Γ₀  +  ∑_{k=1}^{L} w_k ( Γ_k + Γ_kᵀ ),
//! Γ₀ = (1/T) VᵀV,
//! Γ_k = c_k · ∑_{t=k}^{T−1} v_t v_{t−k}ᵀ,
//! ```
//!
//! with `c_k = 1/T` by default (`1/(T−k)` under the Newey–West
//! small-sample correction) and `w_k = w(k/(L+1))` from [`KernelType`].
//!
//! Key behaviors
//! -------------
//! - [`hac_covariance`] is the Bartlett / Newey–West estimator with a fixed
//!   lag truncation. With `L = 0` it is the plain second moment `VᵀV/T`,
//!   which is what the instrument Wald test uses on its demeaned moment
//!   stack.
//! - [`calculate_hac_cov`] exposes the general configuration through
//!   [`HACOptions`] (kernel, truncation, centering, small-sample scaling).
//!
//! Invariants & assumptions
//! ------------------------
//! - `T ≥ 1`; zero-row input returns `SvarError::InsufficientData`.
//! - The truncation is clamped to `L ≤ T − 1` so no lag exceeds the sample.
//! - Output is a symmetric `d × d` matrix.
use crate::{
    errors::{SvarError, SvarResult},
    inference::kernel::KernelType,
};
use ndarray::{Array2, Axis, s};
use std::{borrow::Cow, cmp::min};

/// HACOptions — configuration for long-run covariance estimation.
///
/// Fields
/// ------
/// - `kernel`: [`KernelType`]
///   Lag-window family supplying `w_k`.
/// - `bandwidth`: `usize`
///   Lag truncation `L` (clamped to `T − 1` at compute time).
/// - `center`: `bool`
///   Demean columns before aggregation.
/// - `small_sample_correction`: `bool`
///   Scale lag-`k` cross products by `1/(T−k)` instead of `1/T`.
///
/// Notes
/// -----
/// - `Default` is Bartlett with `L = 0`, no centering and `1/T` scaling,
///   i.e. the sample second moment.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HACOptions {
    pub kernel: KernelType,
    pub bandwidth: usize,
    pub center: bool,
    pub small_sample_correction: bool,
}

impl HACOptions {
    /// Construct options from explicit settings. No validation is needed:
    /// every combination is admissible.
    pub fn new(
        bandwidth: usize, kernel: KernelType, center: bool, small_sample_correction: bool,
    ) -> HACOptions {
        HACOptions { kernel, bandwidth, center, small_sample_correction }
    }

    /// Newey–West (Bartlett, `1/T`) options with truncation `lags`.
    pub fn newey_west(lags: usize) -> HACOptions {
        HACOptions { bandwidth: lags, ..HACOptions::default() }
    }
}

/// Newey–West long-run covariance with Bartlett weights `1 − k/(L+1)`.
///
/// Parameters
/// ----------
/// - `vars`: `&Array2<f64>`
///   `T × d` stacked series (rows = time), already ordered as the model
///   expects.
/// - `lags`: `usize`
///   Truncation `L`; `0` disables the autocorrelation correction.
///
/// Returns
/// -------
/// `SvarResult<Array2<f64>>`
///   Symmetric `d × d` matrix.
///
/// Errors
/// ------
/// - `InsufficientData` when `vars` has no rows.
pub fn hac_covariance(vars: &Array2<f64>, lags: usize) -> SvarResult<Array2<f64>> {
    calculate_hac_cov(&HACOptions::newey_west(lags), vars)
}

/// Long-run covariance under a general [`HACOptions`] configuration.
///
/// Errors
/// ------
/// - `InsufficientData` when `vars` has no rows.
pub fn calculate_hac_cov(hac_opts: &HACOptions, vars: &Array2<f64>) -> SvarResult<Array2<f64>> {
    let t = vars.nrows();
    let d = vars.ncols();

    let col_means = match vars.mean_axis(Axis(0)) {
        Some(means) => means,
        None => return Err(SvarError::InsufficientData { rows: t, needed: 1 }),
    };
    let series: Cow<'_, Array2<f64>> =
        if hac_opts.center { Cow::Owned(vars - &col_means) } else { Cow::Borrowed(vars) };

    let bandwidth = min(hac_opts.bandwidth, t - 1);
    let mut omega = Array2::<f64>::zeros((d, d));
    for lag in 0..=bandwidth {
        add_lag_component(&mut omega, series.as_ref(), lag, bandwidth, hac_opts);
    }
    Ok(omega)
}

// ---- Helper methods ----

/// Accumulate the lag-`lag` term into `omega`.
///
/// `lag = 0` adds `VᵀV/T`; `lag > 0` adds `w_k (Γ_k + Γ_kᵀ)`. Callers
/// guarantee `lag ≤ bandwidth ≤ T − 1`.
fn add_lag_component(
    omega: &mut Array2<f64>, series: &Array2<f64>, lag: usize, bandwidth: usize,
    hac_opts: &HACOptions,
) {
    let t = series.nrows();
    if lag == 0 {
        omega.scaled_add(1.0 / t as f64, &series.t().dot(series));
        return;
    }
    let scale = if hac_opts.small_sample_correction {
        1.0 / (t - lag) as f64
    } else {
        1.0 / t as f64
    };
    let weight = hac_opts.kernel.lag_weight(lag, bandwidth);
    let current = series.slice(s![lag.., ..]);
    let lagged = series.slice(s![..t - lag, ..]);
    let gamma_k = current.t().dot(&lagged) * scale;
    omega.scaled_add(weight, &gamma_k);
    omega.scaled_add(weight, &gamma_k.t());
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - the zero-lag reduction to `VᵀV/T`,
    // - agreement with a hand-computed Bartlett estimator,
    // - symmetry, centering invariance for mean-zero input, and
    // - bandwidth clamping and the empty-input error.
    // -------------------------------------------------------------------------

    const TOL: f64 = 1e-12;

    fn assert_matrices_close(a: &Array2<f64>, b: &Array2<f64>, tol: f64) {
        assert_eq!(a.shape(), b.shape(), "shape mismatch: {:?} vs {:?}", a.shape(), b.shape());
        for (x, y) in a.iter().zip(b.iter()) {
            assert_relative_eq!(*x, *y, epsilon = tol, max_relative = tol);
        }
    }

    #[test]
    // Purpose
    // -------
    // With zero lags the estimator is the plain second moment `VᵀV/T`.
    //
    // Given
    // -----
    // - A 4×2 matrix with non-zero column means.
    //
    // Expect
    // ------
    // - `hac_covariance(v, 0) == VᵀV / 4`.
    fn zero_lags_equals_sample_second_moment() {
        let v = array![[1.0, 2.0], [3.0, -1.0], [0.5, 0.5], [-2.0, 4.0]];
        let expected = v.t().dot(&v) / 4.0;

        let omega = hac_covariance(&v, 0).expect("non-empty input");

        assert_matrices_close(&omega, &expected, TOL);
    }

    #[test]
    // Purpose
    // -------
    // Match a direct implementation of the Bartlett formula.
    //
    // Given
    // -----
    // - A univariate series of length 5 and `L = 2`.
    //
    // Expect
    // ------
    // - `Ω = γ₀ + 2·(2/3)·γ₁ + 2·(1/3)·γ₂`, `γ_k = (1/T) ∑ v_t v_{t−k}`.
    fn bartlett_matches_manual_formula() {
        let v = array![[1.0], [-0.5], [2.0], [0.25], [-1.0]];
        let x: Vec<f64> = v.column(0).to_vec();
        let t = x.len() as f64;
        let gamma = |k: usize| (k..x.len()).map(|i| x[i] * x[i - k]).sum::<f64>() / t;
        let manual = gamma(0) + 2.0 * (2.0 / 3.0) * gamma(1) + 2.0 * (1.0 / 3.0) * gamma(2);

        let omega = hac_covariance(&v, 2).expect("non-empty input");

        assert_relative_eq!(omega[[0, 0]], manual, epsilon = TOL);
    }

    #[test]
    // Purpose
    // -------
    // The long-run covariance is symmetric for generic input and kernels.
    fn output_is_symmetric() {
        let v = array![[0.5, -1.0, 2.0], [1.0, 0.0, -0.5], [-0.5, 1.5, 0.25], [2.0, -0.5, 1.0]];
        for kernel in [KernelType::Bartlett, KernelType::Parzen, KernelType::QuadraticSpectral] {
            let omega = calculate_hac_cov(&HACOptions::new(2, kernel, true, true), &v)
                .expect("non-empty input");
            assert_matrices_close(&omega, &omega.t().to_owned(), TOL);
        }
    }

    #[test]
    // Purpose
    // -------
    // Centering is a no-op on mean-zero columns, and bandwidths beyond
    // `T − 1` are clamped rather than panicking.
    fn centering_invariance_and_bandwidth_clamp() {
        let v = array![[1.0, -1.0], [-1.0, 1.0], [2.0, -2.0], [-2.0, 2.0]];
        let raw = calculate_hac_cov(&HACOptions::new(2, KernelType::Bartlett, false, false), &v)
            .expect("non-empty input");
        let centered =
            calculate_hac_cov(&HACOptions::new(2, KernelType::Bartlett, true, false), &v)
                .expect("non-empty input");
        assert_matrices_close(&raw, &centered, TOL);

        let clamped = hac_covariance(&v, 100).expect("non-empty input");
        let at_max = hac_covariance(&v, 3).expect("non-empty input");
        assert_matrices_close(&clamped, &at_max, TOL);
        assert!(clamped.iter().all(|x| x.is_finite()));
    }

    #[test]
    // Purpose
    // -------
    // Zero-row input is reported as an error.
    fn empty_input_is_an_error() {
        let v = Array2::<f64>::zeros((0, 3));
        assert_eq!(hac_covariance(&v, 0), Err(SvarError::InsufficientData { rows: 0, needed: 1 }));
    }
}
