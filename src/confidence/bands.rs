//! confidence::bands — validated inputs shared by the MSW and standard
//! Delta-method confidence bands.
//!
//! Purpose
//! -------
//! Both interval methods evaluate, for every (variable `j`, horizon `h`)
//! cell, the same three building blocks:
//!
//! ```text
//! r_jh = e_jᵀ C_h Γ̂                 (unnormalized response)
//! g_jh = (Γ̂ᵀ ⊗ e_jᵀ) G_h             (1 × n²p, gradient through vec(A))
//! c_jh = e_jᵀ C_h                   (1 × n,   gradient through Γ̂)
//! ```
//!
//! [`BandContext`] checks the shapes once, partitions `WHat`, resolves the
//! critical value, and hands out these per-cell terms.
//!
//! Invariants & assumptions
//! ------------------------
//! - `c` and `g` describe the same horizons: `c.len() == g.dim().2 == H`.
//!   Pass level `C` with `G`, or cumulative `C` with `Gcum`.
//! - `g` is `(n², n²p, H)` and `WHat` is `(n²p + n)`-square.
use crate::{
    confidence::critval::norm_critval,
    errors::{SvarError, SvarResult, nvar_index},
    inference::wald::WHatBlocks,
};
use ndarray::{Array1, Array2, Array3, ArrayView1, Axis};

/// BandInputs — estimates consumed by the confidence-band routines.
#[derive(Debug, Clone, Copy)]
pub struct BandInputs<'a> {
    /// Length-`n` impact estimate `Γ̂`.
    pub gamma_hat: &'a Array1<f64>,
    /// Joint covariance `[[W1, W12], [W12ᵀ, W2]]` of `(vec(Â), Γ̂)`.
    pub what: &'a Array2<f64>,
    /// MA coefficients `C_0..C_{H−1}` (level or cumulative).
    pub c: &'a [Array2<f64>],
    /// Gradient array `(n², n²p, H)` matching `c` (`G` or `Gcum`).
    pub g: &'a Array3<f64>,
    /// Effective sample size `T`.
    pub t: usize,
}

/// BandOptions — confidence level and normalization of the bands.
///
/// Fields
/// ------
/// - `confidence`: two-sided level in `(0, 1)` (default 0.95).
/// - `scale`: size of the normalized impact (default 1.0).
/// - `nvar`: 1-based normalization variable (default 1).
#[derive(Debug, Clone, PartialEq)]
pub struct BandOptions {
    pub confidence: f64,
    pub scale: f64,
    pub nvar: usize,
}

impl Default for BandOptions {
    fn default() -> Self {
        BandOptions { confidence: 0.95, scale: 1.0, nvar: 1 }
    }
}

/// Per-cell building blocks `(r_jh, g_jh, c_jh)`.
#[derive(Debug, Clone)]
pub struct CellTerms<'a> {
    pub response: f64,
    pub g: Array1<f64>,
    pub c_row: ArrayView1<'a, f64>,
}

/// BandContext — validated, partitioned view over [`BandInputs`].
#[derive(Debug, Clone)]
pub struct BandContext<'a> {
    pub(crate) gamma_hat: &'a Array1<f64>,
    pub(crate) what: &'a Array2<f64>,
    pub(crate) blocks: WHatBlocks<'a>,
    pub(crate) c: &'a [Array2<f64>],
    pub(crate) g: &'a Array3<f64>,
    pub(crate) t: f64,
    pub(crate) kappa: f64,
    pub(crate) scale: f64,
    pub(crate) nv: usize,
}

impl<'a> BandContext<'a> {
    /// Validate inputs and options.
    ///
    /// Errors
    /// ------
    /// - `ShapeMismatch` on any inconsistency between `Γ̂`, `WHat`, `C`
    ///   and `G`.
    /// - `InvalidHorizon(0)` if `c` is empty.
    /// - `InsufficientData` if `t == 0`.
    /// - `InvalidConfidence`, `InvalidNvar`, `NonFiniteParameter` for bad
    ///   options.
    pub fn new(inputs: &BandInputs<'a>, opts: &BandOptions) -> SvarResult<Self> {
        let n = inputs.gamma_hat.len();
        let blocks = WHatBlocks::split(inputs.what, n)?;
        let n_coef = blocks.w1.nrows();
        let horizon = inputs.c.len();
        if horizon == 0 {
            return Err(SvarError::InvalidHorizon(horizon));
        }
        let (g_rows, g_cols, g_h) = inputs.g.dim();
        let checks = [
            ("G rows (n²)", n * n, g_rows),
            ("G columns (n²p)", n_coef, g_cols),
            ("G horizons", horizon, g_h),
        ];
        if let Some(&(what, expected, found)) = checks.iter().find(|(_, e, f)| e != f) {
            return Err(SvarError::ShapeMismatch { what, expected, found });
        }
        if let Some(bad) = inputs.c.iter().find(|ch| ch.dim() != (n, n)) {
            let (what, found) = if bad.nrows() != n {
                ("MA coefficient rows", bad.nrows())
            } else {
                ("MA coefficient columns", bad.ncols())
            };
            return Err(SvarError::ShapeMismatch { what, expected: n, found });
        }
        if inputs.t == 0 {
            return Err(SvarError::InsufficientData { rows: 0, needed: 1 });
        }
        if !opts.scale.is_finite() {
            return Err(SvarError::NonFiniteParameter { name: "scale", value: opts.scale });
        }
        let nv = nvar_index(opts.nvar, n)?;
        let kappa = norm_critval(opts.confidence, true)?;

        Ok(BandContext {
            gamma_hat: inputs.gamma_hat,
            what: inputs.what,
            blocks,
            c: inputs.c,
            g: inputs.g,
            t: inputs.t as f64,
            kappa,
            scale: opts.scale,
            nv,
        })
    }

    /// Number of endogenous variables `n`.
    pub fn n(&self) -> usize {
        self.gamma_hat.len()
    }

    /// Number of horizons `H`.
    pub fn horizon(&self) -> usize {
        self.c.len()
    }

    /// Squared critical value `κ`.
    pub fn kappa(&self) -> f64 {
        self.kappa
    }

    /// Normalizing impact `Γ̂_nvar`.
    pub fn gamma_nv(&self) -> f64 {
        self.gamma_hat[self.nv]
    }

    /// Building blocks for cell `(j, h)`.
    ///
    /// `(Γ̂ᵀ ⊗ e_jᵀ)` is nonzero only at positions `k·n + j`, so `g_jh` is
    /// the `Γ̂`-weighted sum of rows `k·n + j` of `G_h`.
    ///
    /// Panics
    /// ------
    /// - If `j >= n` or `h >= H`.
    pub fn terms(&self, j: usize, h: usize) -> CellTerms<'a> {
        let n = self.n();
        let c: &'a [Array2<f64>] = self.c;
        let c_row = c[h].row(j);
        let response = c_row.dot(self.gamma_hat);
        let g_h = self.g.index_axis(Axis(2), h);
        let mut g = Array1::<f64>::zeros(g_h.ncols());
        for (k, gamma_k) in self.gamma_hat.iter().enumerate() {
            g.scaled_add(*gamma_k, &g_h.row(k * n + j));
        }
        CellTerms { response, g, c_row }
    }

    /// Build an `n × H` array from a per-cell function.
    pub(crate) fn grid<T, F: FnMut(usize, usize) -> T>(&self, mut f: F) -> Array2<T> {
        Array2::from_shape_fn((self.n(), self.horizon()), |(j, h)| f(j, h))
    }
}
