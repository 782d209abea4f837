//! irf::shocks — impulse responses to an identified structural shock.
//!
//! Purpose
//! -------
//! Scale the MA representation of a VAR into the response path of every
//! endogenous variable to one structural shock, identified either
//! recursively (Cholesky) or through an external instrument (`Γ̂`).
//!
//! Key behaviors
//! -------------
//! - [`irf_cholesky`]: the impact vector is the first column of the lower
//!   Cholesky factor of a reduced-form covariance, or a supplied `n × 1`
//!   impact vector. Responses are propagated with the VAR recursion.
//! - [`irf_gamma`]: closed form `C_h Γ̂ / Γ̂_nvar · coefficient`.
//! - Both honor [`IrfOptions`] (horizon, normalization, cumulation).
//!
//! Conventions
//! -----------
//! - Outputs are `H × n`: row `h` holds the responses at horizon `h`.
//! - Cholesky-identified shocks are normalized on the first variable;
//!   instrument-identified shocks on `nvar` (1-based).
use crate::{
    errors::{SvarError, SvarResult, nvar_index},
    estimation::var::{lag_order, split_lags},
    irf::ma::ma_representation,
    linalg::cholesky_lower,
};
use ndarray::{Array1, Array2, Axis};

/// IrfOptions — shape and scaling of an impulse-response path.
///
/// Fields
/// ------
/// - `horizon`: number of horizons `H` (default 21).
/// - `normalize`: rescale the impact so the normalization entry equals
///   `shock_coefficient` (default `true`). Only used by [`irf_cholesky`];
///   [`irf_gamma`] is normalized by construction.
/// - `shock_coefficient`: size of the normalized impact (default 0.1).
/// - `cumulative`: return running sums over horizons (default `true`).
/// - `nvar`: 1-based normalization variable for [`irf_gamma`] (default 1).
#[derive(Debug, Clone, PartialEq)]
pub struct IrfOptions {
    pub horizon: usize,
    pub normalize: bool,
    pub shock_coefficient: f64,
    pub cumulative: bool,
    pub nvar: usize,
}

impl IrfOptions {
    /// Construct options from explicit settings.
    ///
    /// Errors
    /// ------
    /// - `InvalidHorizon(0)` if `horizon == 0`.
    /// - `NonFiniteParameter` if `shock_coefficient` is NaN or infinite.
    /// - `InvalidNvar` if `nvar == 0` (the upper bound is checked at use).
    pub fn new(
        horizon: usize, normalize: bool, shock_coefficient: f64, cumulative: bool, nvar: usize,
    ) -> SvarResult<Self> {
        let opts = IrfOptions { horizon, normalize, shock_coefficient, cumulative, nvar };
        opts.validate()?;
        Ok(opts)
    }

    /// Check the scalar invariants documented on [`IrfOptions::new`].
    pub fn validate(&self) -> SvarResult<()> {
        if self.horizon == 0 {
            return Err(SvarError::InvalidHorizon(self.horizon));
        }
        if !self.shock_coefficient.is_finite() {
            return Err(SvarError::NonFiniteParameter {
                name: "shock_coefficient",
                value: self.shock_coefficient,
            });
        }
        if self.nvar == 0 {
            return Err(SvarError::InvalidNvar { nvar: self.nvar, n: 0 });
        }
        Ok(())
    }
}

impl Default for IrfOptions {
    fn default() -> Self {
        IrfOptions {
            horizon: 21,
            normalize: true,
            shock_coefficient: 0.1,
            cumulative: true,
            nvar: 1,
        }
    }
}

/// Impulse responses to a recursively identified shock.
///
/// Parameters
/// ----------
/// - `betas`: `&Array2<f64>`
///   `n × (n·p)` lag coefficients; `p` is inferred from the shape.
/// - `s`: `&Array2<f64>`
///   Either an `n × n` reduced-form covariance (≥ 2 columns, factorized
///   with Cholesky) or an `n × 1` impact vector used as is.
/// - `opts`: `&IrfOptions`
///
/// Returns
/// -------
/// `SvarResult<Array2<f64>>`
///   `H × n` responses, cumulated if `opts.cumulative`.
///
/// Errors
/// ------
/// - `ShapeMismatch` if `betas` or `s` do not conform; `s` must have
///   either one column or `n` columns.
/// - `NotPositiveDefinite` if the Cholesky factorization fails.
/// - `ZeroNormalization { nvar: 1 }` if normalizing by a zero first entry.
pub fn irf_cholesky(
    betas: &Array2<f64>, s: &Array2<f64>, opts: &IrfOptions,
) -> SvarResult<Array2<f64>> {
    opts.validate()?;
    let p = lag_order(betas)?;
    let lags = split_lags(betas, p)?;
    let n = betas.nrows();
    if s.nrows() != n {
        return Err(SvarError::ShapeMismatch {
            what: "covariance / impact rows",
            expected: n,
            found: s.nrows(),
        });
    }
    if s.ncols() != 1 && s.ncols() != n {
        return Err(SvarError::ShapeMismatch {
            what: "covariance / impact columns",
            expected: n,
            found: s.ncols(),
        });
    }

    let mut impact: Array1<f64> = if s.ncols() >= 2 {
        cholesky_lower(s, "Cholesky impulse response")?.column(0).to_owned()
    } else {
        s.column(0).to_owned()
    };
    if opts.normalize {
        if impact[0] == 0.0 {
            return Err(SvarError::ZeroNormalization { nvar: 1 });
        }
        let factor = opts.shock_coefficient / impact[0];
        impact *= factor;
    }

    let horizon = opts.horizon;
    let mut irf = Array2::<f64>::zeros((horizon, n));
    irf.row_mut(0).assign(&impact);
    for t in 1..horizon {
        let mut response = Array1::<f64>::zeros(n);
        for (m, a_m) in lags.iter().enumerate().take(t.min(p)) {
            response += &a_m.dot(&irf.row(t - 1 - m));
        }
        irf.row_mut(t).assign(&response);
    }

    if opts.cumulative {
        irf.accumulate_axis_inplace(Axis(0), |&prev, curr| *curr += prev);
    }
    Ok(irf)
}

/// Impulse responses to the instrument-identified shock.
///
/// Row `h` is `C_h Γ̂ / Γ̂_nvar · shock_coefficient` (running sums of these
/// when `opts.cumulative`), so the normalization variable responds by
/// exactly `shock_coefficient` on impact.
///
/// Errors
/// ------
/// - `ShapeMismatch` if `gamma_hat.len() != n` or `betas` is malformed.
/// - `InvalidNvar` if `nvar` is outside `1..=n`.
/// - `ZeroNormalization` if `Γ̂_nvar == 0`.
pub fn irf_gamma(
    betas: &Array2<f64>, gamma_hat: &Array1<f64>, opts: &IrfOptions,
) -> SvarResult<Array2<f64>> {
    opts.validate()?;
    let p = lag_order(betas)?;
    let n = betas.nrows();
    if gamma_hat.len() != n {
        return Err(SvarError::ShapeMismatch {
            what: "Gamma_hat length",
            expected: n,
            found: gamma_hat.len(),
        });
    }
    let nv = nvar_index(opts.nvar, n)?;
    let denom = gamma_hat[nv];
    if denom == 0.0 {
        return Err(SvarError::ZeroNormalization { nvar: opts.nvar });
    }

    let c = ma_representation(betas, p, opts.horizon)?;
    let scale = opts.shock_coefficient / denom;
    let mut irf = Array2::<f64>::zeros((opts.horizon, n));
    for (mut row, ch) in irf.outer_iter_mut().zip(&c) {
        row.assign(&(ch.dot(gamma_hat) * scale));
    }
    if opts.cumulative {
        irf.accumulate_axis_inplace(Axis(0), |&prev, curr| *curr += prev);
    }
    Ok(irf)
}
