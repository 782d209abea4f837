//! irf::gradient — Jacobians of the MA coefficients with respect to `vec(A)`.
//!
//! Purpose
//! -------
//! Build the per-horizon gradient ("G") matrices
//! `G_h = ∂vec(C_h) / ∂vec(A)ᵀ` used by Delta-method variance propagation,
//! together with their running sums `Gcum_h = Σ_{i≤h} G_i` for cumulative
//! responses.
//!
//! Key behaviors
//! -------------
//! - With the companion matrix
//!   ```text
//!   Ã = [ A_1  A_2  …  A_{p−1}  A_p ]
//!       [ I_n  0    …  0        0   ]
//!       [ 0    I_n  …  0        0   ]
//!       [ …                         ]
//!       [ 0    0    …  I_n      0   ]
//!   ```
//!   and the selector `J = [I_n 0 … 0]`, each slice is
//!   `G_h = Σ_{i=0}^{h−1} (J (Ãᵀ)^{h−1−i}) ⊗ C_i` for `h ≥ 1`, and
//!   `G_0 = 0` because `C_0 = I` does not depend on `A`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Both arrays have shape `(n², n²·p, H)`: rows index `vec(C_h)`,
//!   columns index `vec(A)`, the last axis is the horizon. Slicing
//!   `[.., .., h]` yields the Jacobian used in `g = (Γᵀ ⊗ e_jᵀ) G_h`.
//! - Vectorization is column-major on both sides, matching `WHat`.
//!
//! Testing notes
//! -------------
//! - The analytic slices are compared against central finite differences
//!   of [`ma_representation`].
use crate::{errors::SvarResult, estimation::var::check_betas, irf::ma::ma_representation};
use ndarray::{Array2, Array3, ArrayView2, linalg::kron, s};

/// GMatrices — level and cumulative MA gradients.
#[derive(Debug, Clone, PartialEq)]
pub struct GMatrices {
    /// `(n², n²p, H)` array of `∂vec(C_h)/∂vec(A)ᵀ`.
    pub g: Array3<f64>,
    /// Prefix sums of `g` along the horizon axis.
    pub gcum: Array3<f64>,
}

impl GMatrices {
    /// Level Jacobian at horizon `h`.
    pub fn level(&self, h: usize) -> ArrayView2<'_, f64> {
        self.g.slice(s![.., .., h])
    }

    /// Cumulative Jacobian at horizon `h`.
    pub fn cumulative(&self, h: usize) -> ArrayView2<'_, f64> {
        self.gcum.slice(s![.., .., h])
    }

    /// Number of horizons `H`.
    pub fn horizon(&self) -> usize {
        self.g.len_of(ndarray::Axis(2))
    }
}

/// Gradient matrices `G` and `Gcum` for horizons `0..H`.
///
/// Parameters
/// ----------
/// - `betas`: `&Array2<f64>`
///   `n × (n·p)` lag-coefficient matrix.
/// - `p`: `usize`
///   Lag order.
/// - `horizon`: `usize`
///   Number of horizons `H ≥ 1`.
///
/// Errors
/// ------
/// - Same as [`ma_representation`]: `InvalidLagOrder`, `ShapeMismatch`,
///   `InvalidHorizon`.
pub fn g_matrices(betas: &Array2<f64>, p: usize, horizon: usize) -> SvarResult<GMatrices> {
    let n = check_betas(betas, p)?;
    let c = ma_representation(betas, p, horizon)?;
    let np = n * p;

    // Rows 0..n of (Ãᵀ)^k, i.e. J (Ãᵀ)^k, for k = 0..H−2.
    let companion_t = companion(betas, n, p).reversed_axes();
    let mut power = Array2::<f64>::eye(np);
    let mut j_powers: Vec<Array2<f64>> = Vec::with_capacity(horizon.saturating_sub(1));
    for _ in 1..horizon {
        j_powers.push(power.slice(s![..n, ..]).to_owned());
        power = power.dot(&companion_t);
    }

    let mut g = Array3::<f64>::zeros((n * n, n * np, horizon));
    for h in 1..horizon {
        let mut slice = g.slice_mut(s![.., .., h]);
        for (i, ci) in c.iter().enumerate().take(h) {
            slice += &kron(&j_powers[h - 1 - i], ci);
        }
    }

    let mut gcum = g.clone();
    for h in 1..horizon {
        let prev = gcum.slice(s![.., .., h - 1]).to_owned();
        let mut current = gcum.slice_mut(s![.., .., h]);
        current += &prev;
    }

    log::debug!("gradient matrices: n = {n}, p = {p}, H = {horizon}");
    Ok(GMatrices { g, gcum })
}

/// Companion matrix `Ã` (`np × np`) of the VAR(p).
pub(crate) fn companion(betas: &Array2<f64>, n: usize, p: usize) -> Array2<f64> {
    let np = n * p;
    let mut a = Array2::<f64>::zeros((np, np));
    a.slice_mut(s![..n, ..]).assign(betas);
    if p > 1 {
        a.slice_mut(s![n.., ..np - n]).assign(&Array2::eye(np - n));
    }
    a
}
