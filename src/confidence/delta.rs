//! confidence::delta — standard Delta-method bands for normalized IRFs.
//!
//! Purpose
//! -------
//! Linearize the normalized response `λ_jh = s · e_jᵀ C_h Γ / Γ_nv` around
//! the estimates and report symmetric Gaussian intervals.
//!
//! Key behaviors
//! -------------
//! - Plug-in estimate `λ̂ = s r / Γ̂_nv`.
//! - Gradient (up to the factor `1/Γ̂_nv`) `d = [s g, s c_row − λ̂ e_nvᵀ]ᵀ`,
//!   variance `dᵀ WHat d`.
//! - Bounds `λ̂ ± √(κ/T) √var / |Γ̂_nv|`, standard error
//!   `√var / (√T |Γ̂_nv|)`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Intervals are symmetric around `λ̂` by construction.
//! - `Γ̂_nv ≠ 0`; a zero normalizing impact is an error here, unlike the
//!   MSW sets which remain defined.
use crate::{
    confidence::bands::{BandContext, BandInputs, BandOptions},
    errors::{SvarError, SvarResult},
};
use ndarray::{Array1, Array2, s};

/// DeltaCell — Delta-method summary for one (variable, horizon) cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeltaCell {
    pub plugin: f64,
    pub variance: f64,
    pub lower: f64,
    pub upper: f64,
    pub std_error: f64,
}

/// DeltaBands — `n × H` Delta-method outputs.
#[derive(Debug, Clone, PartialEq)]
pub struct DeltaBands {
    /// Plug-in normalized IRF `λ̂`.
    pub plugin_irf: Array2<f64>,
    /// `dᵀ WHat d`.
    pub variance: Array2<f64>,
    pub lower: Array2<f64>,
    pub upper: Array2<f64>,
    /// Standard error of `λ̂`.
    pub std_error: Array2<f64>,
}

impl BandContext<'_> {
    /// Delta-method summary for cell `(j, h)`.
    ///
    /// Panics
    /// ------
    /// - If `j >= n` or `h >= H` (see [`BandContext::terms`]).
    pub fn delta_cell(&self, j: usize, h: usize) -> DeltaCell {
        let terms = self.terms(j, h);
        let gamma_nv = self.gamma_nv();
        let n_coef = terms.g.len();
        let plugin = self.scale * terms.response / gamma_nv;

        let mut d = Array1::<f64>::zeros(n_coef + self.n());
        d.slice_mut(s![..n_coef]).assign(&(&terms.g * self.scale));
        d.slice_mut(s![n_coef..]).assign(&(&terms.c_row * self.scale));
        d[n_coef + self.nv] -= plugin;

        let variance = d.dot(&self.what.dot(&d));
        let half_width = (self.kappa / self.t).sqrt() * variance.sqrt() / gamma_nv.abs();
        DeltaCell {
            plugin,
            variance,
            lower: plugin - half_width,
            upper: plugin + half_width,
            std_error: variance.sqrt() / (self.t.sqrt() * gamma_nv.abs()),
        }
    }
}

/// Standard Delta-method bands for every (variable, horizon) cell.
///
/// Parameters
/// ----------
/// - `inputs`: `&BandInputs`
///   `Γ̂`, `WHat`, `C` and the matching `G`, and `T`.
/// - `opts`: `&BandOptions`
///   Confidence level, `scale` and `nvar`.
///
/// Errors
/// ------
/// - Propagates validation errors from [`BandContext::new`].
/// - `ZeroNormalization` if `Γ̂_nvar == 0`.
pub fn ci_delta_standard(inputs: &BandInputs<'_>, opts: &BandOptions) -> SvarResult<DeltaBands> {
    let ctx = BandContext::new(inputs, opts)?;
    if ctx.gamma_nv() == 0.0 {
        return Err(SvarError::ZeroNormalization { nvar: opts.nvar });
    }
    let cells = ctx.grid(|j, h| ctx.delta_cell(j, h));

    Ok(DeltaBands {
        plugin_irf: cells.map(|cell| cell.plugin),
        variance: cells.map(|cell| cell.variance),
        lower: cells.map(|cell| cell.lower),
        upper: cells.map(|cell| cell.upper),
        std_error: cells.map(|cell| cell.std_error),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        confidence::critval::norm_critval,
        irf::{g_matrices, ma_representation},
    };
    use approx::assert_relative_eq;
    use ndarray::{Array3, array};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - symmetry of the interval around the plug-in estimate,
    // - the plug-in estimate against `irf_gamma`-style normalization,
    // - a hand-computed variance at impact, and
    // - the zero-normalization error.
    // -------------------------------------------------------------------------

    fn fixture(gamma: Array1<f64>) -> (Array1<f64>, Array2<f64>, Vec<Array2<f64>>, Array3<f64>) {
        let betas = array![[0.5, 0.2], [0.1, 0.3]];
        let c = ma_representation(&betas, 1, 5).expect("valid");
        let g = g_matrices(&betas, 1, 5).expect("valid").g;
        let what = Array2::from_shape_fn((6, 6), |(i, j)| {
            if i == j { 0.5 + i as f64 * 0.1 } else { 0.05 / (1.0 + (i as f64 - j as f64).abs()) }
        });
        (gamma, what, c, g)
    }

    #[test]
    // Purpose
    // -------
    // The interval is symmetric around the plug-in IRF in every cell and
    // the standard error is consistent with the half-width.
    //
    // Expect
    // ------
    // - `upper − λ̂ == λ̂ − lower` and `half-width == √κ · std_error`.
    fn interval_is_symmetric() {
        let (gamma, what, c, g) = fixture(array![0.7, -0.2]);
        let inputs = BandInputs { gamma_hat: &gamma, what: &what, c: &c, g: &g, t: 150 };
        let bands = ci_delta_standard(&inputs, &BandOptions::default()).expect("valid inputs");
        let z = norm_critval(0.95, false).expect("valid level");

        assert_eq!(bands.lower.dim(), (2, 5));
        for ((j, h), lambda) in bands.plugin_irf.indexed_iter() {
            let up = bands.upper[[j, h]] - lambda;
            let down = lambda - bands.lower[[j, h]];
            assert_relative_eq!(up, down, epsilon = 1e-12);
            assert_relative_eq!(up, z * bands.std_error[[j, h]], epsilon = 1e-12);
            assert!(bands.variance[[j, h]] >= 0.0);
        }
    }

    #[test]
    // Purpose
    // -------
    // The plug-in IRF is `s · C_h Γ̂ / Γ̂_nv`; the normalization cell equals
    // `scale` with zero variance.
    //
    // Given
    // -----
    // - `nvar = 2`, `scale = 2.0`.
    //
    // Expect
    // ------
    // - `plugin_irf[1, 0] == 2.0`, `variance[1, 0] == 0`.
    // - `plugin_irf[0, h] == 2 · (C_h Γ̂)_0 / Γ̂_1`.
    fn plugin_matches_normalized_response() {
        let (gamma, what, c, g) = fixture(array![0.7, -0.2]);
        let inputs = BandInputs { gamma_hat: &gamma, what: &what, c: &c, g: &g, t: 150 };
        let opts = BandOptions { nvar: 2, scale: 2.0, ..BandOptions::default() };
        let bands = ci_delta_standard(&inputs, &opts).expect("valid inputs");

        assert_relative_eq!(bands.plugin_irf[[1, 0]], 2.0, epsilon = 1e-14);
        assert_relative_eq!(bands.variance[[1, 0]], 0.0, epsilon = 1e-14);
        for h in 0..5 {
            let expected = 2.0 * c[h].dot(&gamma)[0] / gamma[1];
            assert_relative_eq!(bands.plugin_irf[[0, h]], expected, epsilon = 1e-13);
        }
    }

    #[test]
    // Purpose
    // -------
    // At impact `G_0 = 0`, so the variance only involves `W2`.
    //
    // Given
    // -----
    // - `j = 2`, `nvar = 1`, `scale = 1`: `d = [0, …, 0, −λ̂, 1]`.
    //
    // Expect
    // ------
    // - `var = λ̂² W2[0,0] − 2 λ̂ W2[0,1] + W2[1,1]`.
    fn impact_variance_uses_only_gamma_block() {
        let (gamma, what, c, g) = fixture(array![0.7, -0.2]);
        let inputs = BandInputs { gamma_hat: &gamma, what: &what, c: &c, g: &g, t: 150 };
        let bands = ci_delta_standard(&inputs, &BandOptions::default()).expect("valid inputs");

        let lambda = gamma[1] / gamma[0];
        let w2 = what.slice(s![4.., 4..]);
        let expected = lambda * lambda * w2[[0, 0]] - 2.0 * lambda * w2[[0, 1]] + w2[[1, 1]];
        assert_relative_eq!(bands.plugin_irf[[1, 0]], lambda, epsilon = 1e-14);
        assert_relative_eq!(bands.variance[[1, 0]], expected, epsilon = 1e-13);
    }

    #[test]
    // Purpose
    // -------
    // A zero normalizing impact is reported instead of producing ±∞.
    fn zero_normalization_is_an_error() {
        let (gamma, what, c, g) = fixture(array![0.0, 0.4]);
        let inputs = BandInputs { gamma_hat: &gamma, what: &what, c: &c, g: &g, t: 150 };
        assert_eq!(
            ci_delta_standard(&inputs, &BandOptions::default()),
            Err(SvarError::ZeroNormalization { nvar: 1 })
        );
    }
}
