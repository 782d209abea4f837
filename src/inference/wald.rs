//! inference::wald — joint covariance of (VAR coefficients, Γ̂) and the
//! instrument-relevance Wald statistic.
//!
//! Purpose
//! -------
//! Given the VAR regressors `X`, a single external instrument `Z` and the
//! reduced-form residuals `η`, estimate
//!
//! - the impact vector `Γ̂ = (Zᵀη / T)ᵀ`,
//! - the asymptotic covariance `WHat` of `√T (vec(Â) − vec(A), Γ̂ − Γ)`,
//!   partitioned as `[[W1, W12], [W12ᵀ, W2]]`, and
//! - the Wald statistic `T · Γ̂²_nvar / W2[nvar, nvar]` for the null that
//!   the instrument is irrelevant for the normalization variable.
//!
//! Key behaviors
//! -------------
//! - Per-observation moments `η_t [X_t, η_t, Z_t]` are flattened
//!   column-major, demeaned, and aggregated with the zero-lag HAC estimator.
//! - A linear map `Ŝ` turns the moment covariance into the covariance of
//!   `(vec(Â), vech(Σ̂), Γ̂)`; the `vech(Σ̂)` nuisance block is dropped.
//! - The χ²(1) p-value of the statistic is reported alongside it.
//!
//! Invariants & assumptions
//! ------------------------
//! - The lag regressors are the trailing `n·p` columns of `X`; any
//!   deterministic columns come first.
//! - Exactly one instrument column.
//! - Flattening is column-major: moment entry `(i, j)` lives at `j·n + i`,
//!   which makes the moment vector equal to `[X_t, η_t, Z_t]ᵀ ⊗ η_t`. The
//!   selector `V` and the Kronecker blocks of `Ŝ` are built against this.
//!
//! Conventions
//! -----------
//! - `vec(Â)` is the column-major vectorization of the `n × n·p` `betas`
//!   matrix, matching the gradient matrices in `irf::gradient`.
//! - `nvar` is 1-based.
use crate::{
    errors::{SvarError, SvarResult, nvar_index},
    inference::hac::hac_covariance,
    linalg::inverse,
};
use ndarray::{Array1, Array2, ArrayView2, Axis, linalg::kron, s};
use statrs::distribution::{ChiSquared, ContinuousCDF};

/// WaldOutcome — Γ̂, its joint covariance with the VAR coefficients, and
/// the instrument-relevance Wald statistic.
///
/// Fields
/// ------
/// - `what`: `(n²p + n) × (n²p + n)` symmetric covariance `WHat`.
/// - `wald`: Wald statistic for `Γ_nvar = 0`; NaN (with a NaN p-value)
///   when the instrument moments carry no variation.
/// - `p_value`: χ²(1) upper-tail probability of `wald`.
/// - `gamma_hat`: length-`n` impact estimate `Γ̂`.
#[derive(Debug, Clone, PartialEq)]
pub struct WaldOutcome {
    what: Array2<f64>,
    wald: f64,
    p_value: f64,
    gamma_hat: Array1<f64>,
}

impl WaldOutcome {
    /// Estimate `Γ̂`, `WHat` and the Wald statistic.
    ///
    /// Parameters
    /// ----------
    /// - `x`: `&Array2<f64>`
    ///   `T × (m + n·p)` VAR regressors, lag block last.
    /// - `z`: `&Array2<f64>`
    ///   `T × 1` external instrument, row-aligned with `x`.
    /// - `eta`: `&Array2<f64>`
    ///   `T × n` reduced-form residuals.
    /// - `p`: `usize`
    ///   Lag order.
    /// - `n`: `usize`
    ///   Number of endogenous variables.
    /// - `nvar`: `usize`
    ///   1-based index of the variable under test.
    ///
    /// Returns
    /// -------
    /// `SvarResult<WaldOutcome>`
    ///
    /// Errors
    /// ------
    /// - `ShapeMismatch` when rows are misaligned, `eta` is not `T × n`,
    ///   `z` has more than one column, or `x` has fewer than `n·p` columns.
    /// - `InsufficientData` when `T == 0`.
    /// - `InvalidLagOrder(0)`, `InvalidNvar` for bad scalars.
    /// - `SingularMatrix` when `XᵀX/T` cannot be inverted.
    ///
    /// Notes
    /// -----
    /// - `Ŝ` has the block layout
    ///   ```text
    ///   [ ([0 I_{np}] Q1⁻¹) ⊗ I_n   0   0   ]   rows n²p
    ///   [ 0                         V   0   ]   rows n(n+1)/2
    ///   [ −(Q2 Q1⁻¹) ⊗ I_n          0   I_n ]   rows n
    ///   ```
    ///   with `Q1 = XᵀX/T` and `Q2 = ZᵀX/T`.
    pub fn gamma_wald(
        x: &Array2<f64>, z: &Array2<f64>, eta: &Array2<f64>, p: usize, n: usize, nvar: usize,
    ) -> SvarResult<Self> {
        validate_inputs(x, z, eta, p, n)?;
        let nv = nvar_index(nvar, n)?;
        let t = eta.nrows();
        let tf = t as f64;

        let gamma_hat: Array1<f64> = z.column(0).dot(eta) / tf;

        let omega = hac_covariance(&moment_stack(x, eta, z), 0)?;
        let shat = moment_map(x, z, p, n)?;
        let aux = shat.dot(&omega).dot(&shat.t());

        let n_coef = n * n * p;
        let n_vech = n * (n + 1) / 2;
        let keep: Vec<usize> = (0..n_coef).chain(n_coef + n_vech..aux.nrows()).collect();
        let what_raw = aux.select(Axis(0), &keep).select(Axis(1), &keep);
        let what = (&what_raw + &what_raw.t()) * 0.5;

        let place = n_coef + nv;
        let wald = tf * gamma_hat[nv].powi(2) / what[[place, place]];
        let p_value = match ChiSquared::new(1.0) {
            Ok(chi2) if !wald.is_nan() => 1.0 - chi2.cdf(wald),
            _ => f64::NAN,
        };

        log::debug!(
            "instrument Wald test: T = {t}, n = {n}, p = {p}, nvar = {nvar}, wald = {wald:.4}"
        );

        Ok(WaldOutcome { what, wald, p_value, gamma_hat })
    }

    /// Joint covariance `WHat`.
    pub fn what(&self) -> &Array2<f64> {
        &self.what
    }

    /// Wald statistic.
    pub fn wald(&self) -> f64 {
        self.wald
    }

    /// χ²(1) p-value of [`wald`](Self::wald).
    pub fn p_value(&self) -> f64 {
        self.p_value
    }

    /// Impact estimate `Γ̂`.
    pub fn gamma_hat(&self) -> &Array1<f64> {
        &self.gamma_hat
    }

    /// Block view `[[W1, W12], [W12ᵀ, W2]]` of `WHat`.
    pub fn blocks(&self) -> SvarResult<WHatBlocks<'_>> {
        WHatBlocks::split(&self.what, self.gamma_hat.len())
    }
}

/// WHatBlocks — borrowed partition of `WHat`.
///
/// - `w1`: `n²p × n²p`, covariance of `vec(Â)`.
/// - `w12`: `n²p × n`, cross-covariance of `vec(Â)` and `Γ̂`.
/// - `w2`: `n × n`, covariance of `Γ̂`.
#[derive(Debug, Clone)]
pub struct WHatBlocks<'a> {
    pub w1: ArrayView2<'a, f64>,
    pub w12: ArrayView2<'a, f64>,
    pub w2: ArrayView2<'a, f64>,
}

impl<'a> WHatBlocks<'a> {
    /// Partition a `(n²p + n)`-square `WHat`.
    ///
    /// Errors
    /// ------
    /// - `ShapeMismatch` if `what` is not square or its size is not
    ///   `n²·p + n` for some `p ≥ 1`.
    pub fn split(what: &'a Array2<f64>, n: usize) -> SvarResult<Self> {
        let size = what.nrows();
        if what.ncols() != size {
            return Err(SvarError::ShapeMismatch {
                what: "WHat columns",
                expected: size,
                found: what.ncols(),
            });
        }
        let n_coef = size.saturating_sub(n);
        if n == 0 || n_coef == 0 || n_coef % (n * n) != 0 {
            return Err(SvarError::ShapeMismatch {
                what: "WHat size (n²p + n)",
                expected: n * n + n,
                found: size,
            });
        }
        Ok(WHatBlocks {
            w1: what.slice(s![..n_coef, ..n_coef]),
            w12: what.slice(s![..n_coef, n_coef..]),
            w2: what.slice(s![n_coef.., n_coef..]),
        })
    }
}

// ---- Helper methods ----

fn validate_inputs(
    x: &Array2<f64>, z: &Array2<f64>, eta: &Array2<f64>, p: usize, n: usize,
) -> SvarResult<()> {
    let t = eta.nrows();
    if p == 0 {
        return Err(SvarError::InvalidLagOrder(p));
    }
    if t == 0 {
        return Err(SvarError::InsufficientData { rows: 0, needed: 1 });
    }
    let checks = [
        ("residual columns", n, eta.ncols()),
        ("regressor rows", t, x.nrows()),
        ("instrument rows", t, z.nrows()),
        ("instrument columns", 1, z.ncols()),
    ];
    if let Some(&(what, expected, found)) = checks.iter().find(|(_, e, f)| e != f) {
        return Err(SvarError::ShapeMismatch { what, expected, found });
    }
    if x.ncols() < n * p {
        return Err(SvarError::ShapeMismatch {
            what: "regressor columns (≥ n·p)",
            expected: n * p,
            found: x.ncols(),
        });
    }
    Ok(())
}

/// Demeaned `T × n·d` stack of `vec(η_t [X_t, η_t, Z_t])`, `d = m + n·p + n + 1`.
///
/// Row `t`, column `j·n + i` holds `η_{t,i} · agg_{t,j}`.
fn moment_stack(x: &Array2<f64>, eta: &Array2<f64>, z: &Array2<f64>) -> Array2<f64> {
    let (t, n) = eta.dim();
    let d = x.ncols() + n + z.ncols();
    let mut stack = Array2::<f64>::zeros((t, n * d));
    for (obs, mut row) in stack.outer_iter_mut().enumerate() {
        let agg = x.row(obs).into_iter().chain(eta.row(obs)).chain(z.row(obs));
        for (j, a) in agg.enumerate() {
            for i in 0..n {
                row[j * n + i] = eta[[obs, i]] * a;
            }
        }
    }
    if let Some(means) = stack.mean_axis(Axis(0)) {
        stack -= &means;
    }
    stack
}

/// Selector `V` with `V vec(Σ) = vech(Σ)`, stacked from `e_iᵀ ⊗ [e_i … e_n]ᵀ`.
pub(crate) fn vech_selector(n: usize) -> Array2<f64> {
    let eye = Array2::<f64>::eye(n);
    let mut v = Array2::<f64>::zeros((n * (n + 1) / 2, n * n));
    let mut offset = 0;
    for i in 0..n {
        let block = kron(&eye.slice(s![i..i + 1, ..]), &eye.slice(s![i.., ..]));
        v.slice_mut(s![offset..offset + n - i, ..]).assign(&block);
        offset += n - i;
    }
    v
}

/// The linear map `Ŝ` from moment space to `(vec(Â), vech(Σ̂), Γ̂)`.
fn moment_map(x: &Array2<f64>, z: &Array2<f64>, p: usize, n: usize) -> SvarResult<Array2<f64>> {
    let tf = x.nrows() as f64;
    let (mx, k, np) = (x.ncols(), z.ncols(), n * p);
    let q1 = x.t().dot(x) / tf;
    let q2 = z.t().dot(x) / tf;
    let q1_inv = inverse(&q1, "instrument Wald test (XᵀX/T)")?;

    let mut lag_selector = Array2::<f64>::zeros((np, mx));
    lag_selector.slice_mut(s![.., mx - np..]).assign(&Array2::eye(np));
    let eye_n = Array2::<f64>::eye(n);
    let coef_block = kron(&lag_selector.dot(&q1_inv), &eye_n);
    let gamma_block = -kron(&q2.dot(&q1_inv), &eye_n);
    let v = vech_selector(n);

    let r_coef = n * np;
    let r_vech = r_coef + v.nrows();
    let c_eta = n * mx;
    let c_z = c_eta + n * n;
    let mut shat = Array2::<f64>::zeros((r_vech + k * n, c_z + k * n));
    shat.slice_mut(s![..r_coef, ..c_eta]).assign(&coef_block);
    shat.slice_mut(s![r_coef..r_vech, c_eta..c_z]).assign(&v);
    shat.slice_mut(s![r_vech.., ..c_eta]).assign(&gamma_block);
    shat.slice_mut(s![r_vech.., c_z..]).assign(&Array2::eye(k * n));
    Ok(shat)
}
